//! Document Tree to indented simple XML

use crate::tree::{Node, Object};

/// Header line written before the first element
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

const INDENT: &str = "\t";

/// Serialize a tree as simple XML
///
/// Text leaves that are blank and null leaves are skipped entirely; no
/// self-closing tags are produced. Text is written verbatim.
pub fn serialize(tree: &Object) -> String {
    let mut output = String::with_capacity(64);
    output.push_str(XML_HEADER);
    output.push('\n');
    serialize_object(tree, 0, &mut output);
    output
}

fn serialize_object(obj: &Object, depth: usize, output: &mut String) {
    for (name, child) in obj {
        match child {
            Node::Object(inner) => {
                push_indent(depth, output);
                push_tag(name, false, output);
                output.push('\n');
                serialize_object(inner, depth + 1, output);
                push_indent(depth, output);
                push_tag(name, true, output);
                output.push('\n');
            }
            Node::Null => {}
            Node::Text(text) if text.trim().is_empty() => {}
            Node::Text(text) => {
                push_indent(depth, output);
                push_tag(name, false, output);
                output.push_str(text);
                push_tag(name, true, output);
                output.push('\n');
            }
        }
    }
}

fn push_indent(depth: usize, output: &mut String) {
    for _ in 0..depth {
        output.push_str(INDENT);
    }
}

fn push_tag(name: &str, closing: bool, output: &mut String) {
    output.push_str(if closing { "</" } else { "<" });
    output.push_str(name);
    output.push('>');
}
