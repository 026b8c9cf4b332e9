//! Simple XML: nested elements and text leaves only
//!
//! Attributes, namespaces, CDATA, comments and mixed content are not
//! understood. Whitespace is not significant anywhere, including inside text.

pub mod parser;
pub mod serializer;
pub mod tokenizer;

pub use parser::{Config, Parser, SiblingPolicy};
pub use serializer::{serialize, XML_HEADER};

use crate::error::Result;
use crate::tree::Object;

/// Parse simple XML with the default configuration
pub fn parse(xml: &str) -> Result<Object> {
    Parser::new(xml).parse()
}

/// Parse simple XML with a custom configuration
pub fn parse_with_config(xml: &str, config: Config) -> Result<Object> {
    Parser::with_config(xml, config).parse()
}
