//! Splits simple XML text into begin tags, end tags and literal text
//!
//! The tokenizer is deliberately coarse: it drops the XML declaration,
//! removes every whitespace character (including inside text), and cuts the
//! remainder after each `>` and before each `</`.

/// Token produced by [`tokenize`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name>`
    Begin(&'a str),
    /// `</name>`
    End(&'a str),
    /// Anything that is neither
    Text(&'a str),
}

/// Removes the XML declaration and all whitespace
///
/// Everything up to and including the first `?>` is dropped.
pub fn normalize(xml: &str) -> String {
    let body = match xml.find("?>") {
        Some(end) => xml.get(end + 2..).unwrap_or_default(),
        None => xml,
    };
    body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Splits normalized text into classified tokens
///
/// Empty pieces between adjacent boundaries are skipped.
pub fn tokenize(normalized: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (idx, ch) in normalized.char_indices() {
        if ch == '<' && normalized.get(idx + 1..idx + 2) == Some("/") {
            push_piece(&mut tokens, normalized.get(start..idx));
            start = idx;
        } else if ch == '>' {
            push_piece(&mut tokens, normalized.get(start..=idx));
            start = idx + 1;
        }
    }
    push_piece(&mut tokens, normalized.get(start..));

    tokens
}

fn push_piece<'a>(tokens: &mut Vec<Token<'a>>, piece: Option<&'a str>) {
    if let Some(piece) = piece.filter(|p| !p.is_empty()) {
        tokens.push(classify(piece));
    }
}

/// Classifies a piece by searching for `</name>` first, then `<name>`
pub fn classify(piece: &str) -> Token<'_> {
    if let Some(name) = find_tag(piece, "</") {
        Token::End(name)
    } else if let Some(name) = find_tag(piece, "<") {
        Token::Begin(name)
    } else {
        Token::Text(piece)
    }
}

/// Finds the first `{opener}name>` where name is zero or more word characters
fn find_tag<'a>(piece: &'a str, opener: &str) -> Option<&'a str> {
    let mut offset = 0;
    while let Some(found) = piece.get(offset..).and_then(|rest| rest.find(opener)) {
        let name_start = offset + found + opener.len();
        let rest = piece.get(name_start..)?;
        let name_len = rest
            .find(|c: char| !is_word_char(c))
            .unwrap_or(rest.len());
        if rest.get(name_len..name_len + 1) == Some(">") {
            return rest.get(..name_len);
        }
        offset = offset + found + 1;
    }
    None
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
