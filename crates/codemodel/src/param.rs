//! Method and client parameters.
//!
//! A parameter is a flat record (name, type, style, location) plus a
//! [`ParameterKind`] that pins down how the value is transmitted: body,
//! partial body, header, path, query, host URI, form, multipart, or the
//! synthesized resume token for long-running operations. Collection kinds
//! carry their own delimiter format and encoding rules.

use serde::{Deserialize, Serialize};

use crate::types::{Docs, Literal, WireType};

/// Defines the style of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ParameterStyle {
    /// The parameter is required.
    Required,

    /// The parameter is optional.
    Optional,

    /// There is no formal parameter; the value is emitted directly in the
    /// generated code (e.g. a fixed `Accept` header).
    Literal,

    /// The value is a literal emitted in the code, but sent only when the
    /// flag parameter is non-nil.
    Flag,

    /// The parameter has a default value that's sent if one isn't specified.
    /// Implies optional.
    ClientSideDefault { default_value: Literal },
}

impl ParameterStyle {
    /// Returns true for styles a caller must supply a value for.
    pub fn is_required(&self) -> bool {
        matches!(self, ParameterStyle::Required)
    }
}

/// Indicates where the value of a parameter originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// The value is persisted on the client and supplied at construction.
    Client,
    /// The value is supplied per method invocation.
    Method,
}

/// The delimiter format for collection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated.
    Csv,
    /// Space separated.
    Ssv,
    /// Tab separated.
    Tsv,
    /// Pipe separated.
    Pipes,
    /// Each value gets its own key entry (query strings only).
    Multi,
}

impl CollectionFormat {
    /// The join delimiter, or `None` for the multi format which repeats the
    /// key instead of joining values.
    pub fn delimiter(self) -> Option<&'static str> {
        match self {
            CollectionFormat::Csv => Some(","),
            CollectionFormat::Ssv => Some(" "),
            CollectionFormat::Tsv => Some("\t"),
            CollectionFormat::Pipes => Some("|"),
            CollectionFormat::Multi => None,
        }
    }
}

/// The wire format of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BodyFormat {
    Json,
    Xml,
    Text,
    Binary,
}

/// How a parameter's value is transmitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ParameterKind {
    /// The complete HTTP request body.
    Body { format: BodyFormat },

    /// A field within a synthesized type sent as the request body.
    PartialBody {
        /// The name of the field within the body payload.
        serialized_name: String,
        format: BodyFormat,
    },

    /// A single value sent in an HTTP header.
    HeaderScalar { header_name: String },

    /// A collection of values sent in one HTTP header.
    HeaderCollection {
        header_name: String,
        collection_format: CollectionFormat,
    },

    /// A string-keyed map of values sent as prefixed HTTP headers.
    HeaderMap {
        /// The prefix prepended to each key in the map.
        header_prefix: String,
    },

    /// A single value replacing a path segment.
    PathScalar { segment: String, is_encoded: bool },

    /// A collection of values replacing a path segment.
    PathCollection {
        segment: String,
        is_encoded: bool,
        collection_format: CollectionFormat,
    },

    /// A single value in the query string.
    QueryScalar { key: String, is_encoded: bool },

    /// A collection of values in the query string.
    QueryCollection {
        key: String,
        is_encoded: bool,
        collection_format: CollectionFormat,
    },

    /// A segment of the host's URI.
    Uri { segment: String },

    /// A single value in a form-encoded body.
    FormBodyScalar { form_name: String },

    /// A collection of values in a form-encoded body.
    FormBodyCollection {
        form_name: String,
        collection_format: CollectionFormat,
    },

    /// A value sent as multipart/form content.
    MultipartFormBody,

    /// The synthesized resume-token parameter for long-running operations.
    ResumeToken,

    /// A credential supplied at client construction.
    Credential,

    /// A parameter that's not used for creating HTTP requests.
    Plain,
}

/// A parameter to a client constructor or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// The parameter's Go name.
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    #[serde(rename = "type")]
    pub ty: WireType,

    pub style: ParameterStyle,

    /// Indicates if the parameter is passed by value or by pointer.
    pub by_value: bool,

    pub location: ParameterLocation,

    /// The parameter group this parameter belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(flatten)]
    pub kind: ParameterKind,
}

impl Parameter {
    /// Returns true when the generated signature takes this parameter by
    /// value: required parameters and explicitly by-value ones.
    pub fn emitted_by_value(&self) -> bool {
        self.style.is_required() || self.by_value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{LiteralType, LiteralValue};

    #[test]
    fn delimiters_per_collection_format() {
        assert_eq!(CollectionFormat::Csv.delimiter(), Some(","));
        assert_eq!(CollectionFormat::Ssv.delimiter(), Some(" "));
        assert_eq!(CollectionFormat::Tsv.delimiter(), Some("\t"));
        assert_eq!(CollectionFormat::Pipes.delimiter(), Some("|"));
        assert_eq!(CollectionFormat::Multi.delimiter(), None);
    }

    #[test]
    fn client_side_default_is_not_required() {
        let style = ParameterStyle::ClientSideDefault {
            default_value: Literal {
                ty: LiteralType::String,
                value: LiteralValue::Str("v1".to_string()),
            },
        };
        assert!(!style.is_required());
        assert!(ParameterStyle::Required.is_required());
    }

    #[test]
    fn parameter_kind_serializes_with_kind_tag() {
        let param = Parameter {
            name: "interval".to_string(),
            docs: Docs::default(),
            ty: WireType::String,
            style: ParameterStyle::Optional,
            by_value: false,
            location: ParameterLocation::Method,
            group: None,
            kind: ParameterKind::QueryScalar { key: "interval".to_string(), is_encoded: true },
        };
        let json = serde_json::to_string(&param).unwrap();
        assert!(json.contains("\"kind\":\"queryScalar\""));
        let back: Parameter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, param);
    }
}
