//! Stack automaton turning simple XML tokens into a Document Tree

use tracing::{debug, instrument, warn};

use crate::error::{Error, ErrorKind, Result};
use crate::tree::{Node, Object};
use crate::xml::tokenizer::{normalize, tokenize, Token};

/// What to do when a parent already holds a child with the same tag name
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SiblingPolicy {
    /// Last occurrence wins; the key keeps the position of the first one
    #[default]
    Overwrite,
    /// First occurrence wins; later ones are dropped
    KeepFirst,
    /// Fail with [`ErrorKind::DuplicateSibling`]
    Reject,
}

/// Configuration for the XML parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    /// Handling of repeated sibling tags
    pub siblings: SiblingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
            siblings: SiblingPolicy::Overwrite,
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
            siblings: SiblingPolicy::Overwrite,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            siblings: SiblingPolicy::Overwrite,
        }
    }

    pub const fn with_siblings(mut self, siblings: SiblingPolicy) -> Self {
        self.siblings = siblings;
        self
    }
}

/// Simple XML parser
///
/// Tags and partially built nodes live on two explicit stacks, so parsing
/// never recurses. Unmatched closing tags are dropped instead of failing.
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    config: Config,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new parser with custom configuration
    pub const fn with_config(input: &'a str, config: Config) -> Self {
        Self { input, config }
    }

    /// Parse the input into the object left on top of the value stack
    #[instrument(level = "debug", skip(self), fields(bytes = self.input.len()))]
    pub fn parse(&self) -> Result<Object> {
        if self.config.max_size > 0 && self.input.len() > self.config.max_size {
            return Err(Error::new(ErrorKind::MaxSizeExceeded {
                max: self.config.max_size,
            }));
        }

        let normalized = normalize(self.input);
        let tokens = tokenize(&normalized);
        if tokens.is_empty() {
            return Err(Error::with_detail(ErrorKind::IllegalXml, "empty token stream"));
        }
        debug!(tokens = tokens.len(), "tokenized xml");

        let mut tags: Vec<&str> = Vec::new();
        // implicit document root
        let mut values: Vec<Node> = vec![Node::default()];

        for (index, token) in tokens.into_iter().enumerate() {
            match token {
                Token::Begin(name) => {
                    let max = self.config.max_depth;
                    if max > 0 && tags.len() >= usize::from(max) {
                        return Err(Error::at_token(
                            ErrorKind::MaxDepthExceeded { max },
                            index,
                            format!("<{name}> nests too deep"),
                        ));
                    }
                    tags.push(name);
                    values.push(Node::default());
                }
                Token::End(name) => self.close(name, index, &mut tags, &mut values)?,
                Token::Text(text) => values.push(Node::Text(text.to_string())),
            }
        }

        match values.pop() {
            Some(Node::Object(root)) => Ok(root),
            Some(Node::Text(_) | Node::Null) => Err(Error::with_detail(
                ErrorKind::IllegalXml,
                "document does not resolve to an element tree",
            )),
            None => Err(Error::with_detail(ErrorKind::IllegalXml, "unresolved root")),
        }
    }

    fn close<'t>(
        &self,
        name: &'t str,
        index: usize,
        tags: &mut Vec<&'t str>,
        values: &mut Vec<Node>,
    ) -> Result<()> {
        let Some(&open) = tags.last() else {
            return Err(Error::at_token(
                ErrorKind::IllegalXml,
                index,
                format!("</{name}> closes nothing"),
            ));
        };
        if open != name {
            warn!(expected = open, found = name, token = index, "dropping unmatched closing tag");
            return Ok(());
        }

        let content = values.pop();
        if matches!(content, Some(Node::Text(_))) {
            // the placeholder object pushed by the begin tag
            values.pop();
        }
        tags.pop();

        let Some(content) = content else {
            return Ok(());
        };
        match values.last_mut() {
            Some(Node::Object(parent)) => self.attach(parent, name, content, index),
            _ => {
                debug!(tag = name, "dropping element with non-object parent");
                Ok(())
            }
        }
    }

    fn attach(&self, parent: &mut Object, name: &str, content: Node, index: usize) -> Result<()> {
        if !parent.contains_key(name) {
            parent.insert(name, content);
            return Ok(());
        }
        match self.config.siblings {
            SiblingPolicy::Overwrite => {
                debug!(tag = name, "repeated sibling overwrites previous value");
                parent.insert(name, content);
                Ok(())
            }
            SiblingPolicy::KeepFirst => {
                debug!(tag = name, "repeated sibling dropped");
                Ok(())
            }
            SiblingPolicy::Reject => Err(Error::at_token(
                ErrorKind::DuplicateSibling {
                    name: name.to_string(),
                },
                index,
                "repeated sibling tag",
            )),
        }
    }
}
