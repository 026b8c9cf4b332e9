//! bodykit - request body transcoding and templating
//!
//! Converts declared request bodies into what an HTTP execution engine
//! sends: simple XML and JSON are read into one ordered Document Tree,
//! placeholders in its text leaves are resolved by an external
//! [`Evaluator`], and the [`Assembler`] decides how a body descriptor
//! becomes parameters, raw text and file attachments.
//!
//! # Quick Start
//!
//! ```
//! use bodykit::{from_xml_str, to_json_pretty, Node};
//! # fn main() -> Result<(), bodykit::Error> {
//! let tree = from_xml_str("<user><name>John</name></user>")?;
//! let name = tree.get_path(&["user", "name"]).and_then(Node::as_text);
//! assert_eq!(name, Some("John"));
//! assert!(to_json_pretty(&tree).contains("\"name\": \"John\""));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{BoxError, Error, ErrorKind, Result};

pub mod tree;
pub use tree::{Node, Object};

pub mod json;
pub mod xml;
pub use json::{from_json_str, to_json_pretty, to_json_string};
pub use xml::{Config as XmlConfig, Parser as XmlParser, SiblingPolicy};

pub mod template;
pub use template::{materialize, Evaluator, PassThrough};

pub mod body;
pub use body::{Body, BodyType, FileRef, KeyValue, JSON_SCHEMA_FORMAT};

pub mod store;
pub use store::{BodyFileDir, FileStore};

pub mod assemble;
pub use assemble::{AssembledBody, Assembler, FileAttachment, Parameter, SchemaGenerator};

/// Parse simple XML into a Document Tree
pub fn from_xml_str(xml: &str) -> Result<Object> {
    xml::parse(xml)
}

/// Serialize a Document Tree as indented simple XML
pub fn to_xml_string(tree: &Object) -> String {
    xml::serialize(tree)
}

/// Transcode simple XML to pretty JSON
pub fn xml_to_json(xml: &str) -> Result<String> {
    Ok(to_json_pretty(&from_xml_str(xml)?))
}

/// Transcode a JSON object of objects and strings to simple XML
pub fn json_to_xml(json: &str) -> Result<String> {
    Ok(to_xml_string(&from_json_str(json)?))
}
