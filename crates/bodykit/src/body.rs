//! Request body descriptors as stored by the platform

use serde::{Deserialize, Serialize};

/// Format sentinel selecting example generation from `json_schema`
pub const JSON_SCHEMA_FORMAT: &str = "JSON-SCHEMA";

/// Declared body type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    /// Legacy key/value bodies; never assembled as form or multipart
    #[serde(rename = "KeyValue")]
    KeyValue,
    #[serde(rename = "Form Data")]
    FormData,
    #[serde(rename = "WWW_FORM")]
    WwwForm,
    #[serde(rename = "BINARY")]
    Binary,
    #[serde(rename = "Raw")]
    Raw,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "XML")]
    Xml,
    /// Blank or unrecognized type string
    #[default]
    #[serde(other)]
    Unspecified,
}

impl BodyType {
    /// Form Data, WWW_FORM and BINARY carry entries instead of raw text
    pub fn is_kv(self) -> bool {
        matches!(self, Self::FormData | Self::WwwForm | Self::Binary)
    }
}

/// File uploaded for a body entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: String,
    pub name: String,
}

impl FileRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Storage file name, unique through `id`
    pub fn stored_name(&self) -> String {
        format!("{}_{}", self.id, self.name)
    }
}

/// One form field or file field of a body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyValue {
    pub name: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub enable: bool,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content_type: Option<String>,
    pub files: Vec<FileRef>,
    pub encode: bool,
}

impl Default for KeyValue {
    fn default() -> Self {
        Self {
            name: None,
            value: None,
            description: None,
            enable: true,
            required: false,
            kind: None,
            content_type: None,
            files: Vec::new(),
            encode: true,
        }
    }
}

impl KeyValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// File field carrying the given uploads
    pub fn file(name: impl Into<String>, files: Vec<FileRef>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some("file".to_string()),
            files,
            ..Self::default()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enable = false;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// An ordinary field with a non-blank name or value; file fields are
    /// never valid parameters
    pub fn is_valid(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.trim().is_empty());
        (filled(&self.name) || filled(&self.value)) && !self.is_file()
    }

    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some("file")
    }
}

/// Declared request body of a test step
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Body {
    #[serde(rename = "type")]
    pub body_type: BodyType,
    pub raw: String,
    pub format: String,
    pub kvs: Vec<KeyValue>,
    pub binary: Vec<KeyValue>,
    pub json_schema: Option<serde_json::Value>,
}

impl Body {
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            ..Self::default()
        }
    }

    /// Raw-bodied descriptor holding the given text
    pub fn raw(body_type: BodyType, raw: impl Into<String>) -> Self {
        Self {
            body_type,
            raw: raw.into(),
            ..Self::default()
        }
    }

    pub fn is_kv(&self) -> bool {
        self.body_type.is_kv()
    }

    pub fn is_binary(&self) -> bool {
        self.body_type == BodyType::Binary
    }

    /// True when the body can be sent: an enabled valid or file entry for
    /// form types (`binary` entries counted for BINARY only), non-blank raw
    /// text otherwise
    pub fn is_valid(&self) -> bool {
        if self.is_kv() {
            let binary: &[KeyValue] = if self.is_binary() { &self.binary } else { &[] };
            self.kvs
                .iter()
                .chain(binary)
                .any(|kv| kv.enable && (kv.is_valid() || kv.is_file()))
        } else {
            !self.raw.trim().is_empty()
        }
    }

    /// Whether `raw` gets rewritten from the schema or by materialization
    pub fn is_templated(&self) -> bool {
        !self.format.trim().is_empty() && self.json_schema.is_some()
    }

    pub fn is_schema_driven(&self) -> bool {
        self.is_templated() && self.format == JSON_SCHEMA_FORMAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_wire_names() -> Result<(), serde_json::Error> {
        let cases = [
            ("\"KeyValue\"", BodyType::KeyValue),
            ("\"Form Data\"", BodyType::FormData),
            ("\"WWW_FORM\"", BodyType::WwwForm),
            ("\"BINARY\"", BodyType::Binary),
            ("\"Raw\"", BodyType::Raw),
            ("\"JSON\"", BodyType::Json),
            ("\"XML\"", BodyType::Xml),
            ("\"\"", BodyType::Unspecified),
            ("\"GraphQL\"", BodyType::Unspecified),
        ];
        for (wire, expected) in cases {
            assert_eq!(serde_json::from_str::<BodyType>(wire)?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_deserialize_descriptor() -> Result<(), serde_json::Error> {
        let body: Body = serde_json::from_str(
            r#"{
                "type": "Form Data",
                "kvs": [
                    {"name": "a", "value": "1", "enable": true},
                    {"name": "f", "type": "file", "contentType": "image/png",
                     "files": [{"id": "f1", "name": "x.png"}]}
                ]
            }"#,
        )?;
        assert_eq!(body.body_type, BodyType::FormData);
        assert_eq!(body.kvs.len(), 2);
        let file = &body.kvs[1];
        assert!(file.is_file());
        assert!(file.enable);
        assert!(file.encode);
        assert_eq!(file.files[0].stored_name(), "f1_x.png");
        Ok(())
    }

    #[test]
    fn test_validity() {
        let mut body = Body::new(BodyType::WwwForm);
        assert!(!body.is_valid());
        body.kvs.push(KeyValue::new(" ", " "));
        assert!(!body.is_valid());
        body.kvs.push(KeyValue::new("a", "1").disabled());
        assert!(!body.is_valid());
        body.kvs.push(KeyValue::new("b", "2"));
        assert!(body.is_valid());

        let mut binary = Body::new(BodyType::Binary);
        binary.binary.push(KeyValue::file("upload", Vec::new()));
        assert!(binary.is_valid());

        assert!(!Body::raw(BodyType::Json, "  ").is_valid());
        assert!(Body::raw(BodyType::Json, "{}").is_valid());
        assert!(Body::raw(BodyType::KeyValue, "x").is_valid());
    }

    #[test]
    fn test_entry_validity_checks_name_or_value() {
        assert!(KeyValue::new("a", "").is_valid());
        assert!(KeyValue::new("", "v").is_valid());
        assert!(!KeyValue::new(" ", "\t").is_valid());
        assert!(!KeyValue::default().is_valid());
        assert!(!KeyValue::file("doc", vec![FileRef::new("1", "a.txt")]).is_valid());

        let mut form = Body::new(BodyType::FormData);
        form.kvs.push(KeyValue::file("doc", Vec::new()));
        assert!(form.is_valid());
    }

    #[test]
    fn test_templated_flags() {
        let mut body = Body::raw(BodyType::Json, "{}");
        body.format = JSON_SCHEMA_FORMAT.to_string();
        assert!(!body.is_templated());
        body.json_schema = Some(serde_json::json!({"type": "object"}));
        assert!(body.is_schema_driven());
        body.format = "JSON".to_string();
        assert!(body.is_templated());
        assert!(!body.is_schema_driven());
    }
}
