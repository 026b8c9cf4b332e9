//! Turns a body descriptor into the parameters, raw text and file
//! attachments handed to the execution engine
//!
//! Form-like bodies (`Form Data`, `WWW_FORM`, `BINARY`) become a filtered
//! parameter list plus file attachments. Every other body becomes a single
//! raw parameter, optionally regenerated from its JSON schema or
//! materialized through the evaluator first.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::body::{Body, KeyValue};
use crate::error::{BoxError, Error, ErrorKind, Result};
use crate::json::{from_json_str, to_json_pretty};
use crate::store::FileStore;
use crate::template::{materialize, Evaluator};
use crate::xml;

/// Produces example text from a JSON schema
pub trait SchemaGenerator {
    fn generate(&self, schema: &serde_json::Value) -> std::result::Result<String, BoxError>;
}

impl<F> SchemaGenerator for F
where
    F: Fn(&serde_json::Value) -> std::result::Result<String, BoxError>,
{
    fn generate(&self, schema: &serde_json::Value) -> std::result::Result<String, BoxError> {
        self(schema)
    }
}

/// A request parameter in body order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub encode: bool,
}

impl Parameter {
    fn from_entry(kv: &KeyValue) -> Self {
        Self {
            name: kv.name.clone().unwrap_or_default(),
            value: kv.value.clone().unwrap_or_default(),
            encode: kv.encode,
        }
    }

    fn raw(value: String) -> Self {
        Self {
            name: String::new(),
            value,
            encode: false,
        }
    }
}

/// A file sent as part of a multipart body
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub path: PathBuf,
    pub field_name: String,
    pub content_type: Option<String>,
}

/// Everything the execution engine needs to send a body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledBody {
    pub parameters: Vec<Parameter>,
    pub attachments: Vec<FileAttachment>,
    /// Files are attached, send as multipart
    pub multipart: bool,
    /// The single parameter is the raw body
    pub raw_body: bool,
}

impl AssembledBody {
    /// The raw body text, if this is a raw body
    pub fn raw(&self) -> Option<&str> {
        if !self.raw_body {
            return None;
        }
        self.parameters.first().map(|p| p.value.as_str())
    }
}

/// Payload assembler with its collaborators injected at construction
///
/// Holds no mutable state; one instance can serve concurrent callers when
/// the collaborators allow it.
#[derive(Clone, Debug)]
pub struct Assembler<E, S, F> {
    evaluator: E,
    schema_generator: S,
    file_store: F,
    xml: xml::Config,
}

impl<E, S, F> Assembler<E, S, F>
where
    E: Evaluator,
    S: SchemaGenerator,
    F: FileStore,
{
    pub fn new(evaluator: E, schema_generator: S, file_store: F) -> Self {
        Self {
            evaluator,
            schema_generator,
            file_store,
            xml: xml::Config::default(),
        }
    }

    /// Parser configuration used for templated XML raw bodies
    pub fn with_xml_config(mut self, config: xml::Config) -> Self {
        self.xml = config;
        self
    }

    /// Assemble the body of one request
    ///
    /// `request_id` names file fields whose entry has no name. The
    /// descriptor is not validated here and never modified.
    #[instrument(level = "debug", skip(self, body), fields(body_type = ?body.body_type))]
    pub fn assemble(&self, body: &Body, request_id: &str) -> Result<AssembledBody> {
        if body.is_kv() {
            self.assemble_form(body, request_id)
        } else {
            let raw = self.render_raw(body)?;
            debug!(bytes = raw.len(), "assembled raw body");
            Ok(AssembledBody {
                parameters: vec![Parameter::raw(raw)],
                attachments: Vec::new(),
                multipart: false,
                raw_body: true,
            })
        }
    }

    fn assemble_form(&self, body: &Body, request_id: &str) -> Result<AssembledBody> {
        let binary: &[KeyValue] = if body.is_binary() { &body.binary } else { &[] };
        let parameters: Vec<Parameter> = body
            .kvs
            .iter()
            .chain(binary)
            .filter(|kv| kv.enable && kv.is_valid())
            .map(Parameter::from_entry)
            .collect();

        let store = &self.file_store;
        let attachments = body
            .kvs
            .iter()
            .chain(&body.binary)
            .filter(|kv| kv.is_file() && kv.enable)
            .flat_map(|kv| {
                kv.files.iter().map(move |file| -> Result<FileAttachment> {
                    Ok(FileAttachment {
                        path: store.resolve(file)?,
                        field_name: kv.name.clone().unwrap_or_else(|| request_id.to_string()),
                        content_type: kv.content_type.clone(),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            parameters = parameters.len(),
            attachments = attachments.len(),
            "assembled form body"
        );
        Ok(AssembledBody {
            multipart: !attachments.is_empty(),
            parameters,
            attachments,
            raw_body: false,
        })
    }

    fn render_raw(&self, body: &Body) -> Result<String> {
        let Some(schema) = body.json_schema.as_ref().filter(|_| body.is_templated()) else {
            return Ok(body.raw.clone());
        };

        if body.is_schema_driven() {
            debug!("generating raw body from json schema");
            return self
                .schema_generator
                .generate(schema)
                .map_err(|source| Error::new(ErrorKind::SchemaGeneration).with_source(source));
        }

        let tree = if body.raw.trim_start().starts_with('<') {
            debug!(format = %body.format, "materializing xml raw body");
            xml::parse_with_config(&body.raw, self.xml)?
        } else {
            debug!(format = %body.format, "materializing json raw body");
            from_json_str(&body.raw)?
        };
        let tree = materialize(&tree, &self.evaluator)?;
        Ok(to_json_pretty(&tree))
    }
}
