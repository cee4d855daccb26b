//! Method results and response envelopes.
//!
//! A response envelope is the synthesized type returned from a client
//! method: the body result (if any) merged with any modeled response
//! headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Docs, WireType, XmlInfo};

/// Indicates the wire format for response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultFormat {
    Json,
    Xml,
    Text,
}

/// The wire format a model participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SerdeFormat {
    Json,
    Xml,
}

/// The possible method result types within a response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ResultKind {
    /// For endpoints that return a different schema based on the HTTP
    /// status code. Status codes that don't return a schema are absent.
    Any {
        field_name: String,
        #[serde(default)]
        docs: Docs,
        http_status_code_type: BTreeMap<u16, WireType>,
        format: ResultFormat,
    },

    /// For endpoints that return a streaming response body.
    Binary {
        field_name: String,
        #[serde(default)]
        docs: Docs,
    },

    /// For HTTP HEAD requests that treat the status code as success/failure.
    HeadAsBoolean {
        field_name: String,
        #[serde(default)]
        docs: Docs,
    },

    /// A typed model payload, anonymously embedded in the envelope.
    Model {
        #[serde(default)]
        docs: Docs,
        /// The name of the model returned in the envelope.
        model: String,
        format: SerdeFormat,
    },

    /// Scalar results, or maps/slices of scalars/models/interfaces.
    /// Maps and slices can nest (e.g. `map[string][]*T`).
    Monomorphic {
        field_name: String,
        #[serde(default)]
        docs: Docs,
        #[serde(rename = "type")]
        ty: WireType,
        format: ResultFormat,
        by_value: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        xml: Option<XmlInfo>,
    },

    /// A discriminated-type payload, anonymously embedded in the envelope.
    /// Only JSON is supported for polymorphic results.
    Polymorphic {
        #[serde(default)]
        docs: Docs,
        /// The name of the interface type for the discriminated union.
        interface: String,
    },
}

impl ResultKind {
    /// Returns the underlying wire type for this result.
    pub fn field_type(&self) -> WireType {
        match self {
            ResultKind::Any { .. } => WireType::Any,
            ResultKind::Binary { .. } => WireType::Qualified {
                name: "ReadCloser".to_string(),
                module: "io".to_string(),
            },
            ResultKind::HeadAsBoolean { .. } => WireType::Scalar {
                ty: crate::types::ScalarKind::Bool,
                encode_as_string: false,
            },
            ResultKind::Model { model, .. } => WireType::Model { name: model.clone() },
            ResultKind::Monomorphic { ty, .. } => ty.clone(),
            ResultKind::Polymorphic { interface, .. } => {
                WireType::Interface { name: interface.clone() }
            }
        }
    }

    /// The envelope field name for non-embedded results, or `None` for
    /// anonymously embedded model/polymorphic results.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            ResultKind::Any { field_name, .. }
            | ResultKind::Binary { field_name, .. }
            | ResultKind::HeadAsBoolean { field_name, .. }
            | ResultKind::Monomorphic { field_name, .. } => Some(field_name),
            ResultKind::Model { .. } | ResultKind::Polymorphic { .. } => None,
        }
    }

    pub fn docs(&self) -> &Docs {
        match self {
            ResultKind::Any { docs, .. }
            | ResultKind::Binary { docs, .. }
            | ResultKind::HeadAsBoolean { docs, .. }
            | ResultKind::Model { docs, .. }
            | ResultKind::Monomorphic { docs, .. }
            | ResultKind::Polymorphic { docs, .. } => docs,
        }
    }
}

/// A typed header returned in an HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HeaderResponse {
    /// A single typed header value.
    Scalar {
        /// The name of the field within the response envelope.
        field_name: String,
        #[serde(default)]
        docs: Docs,
        #[serde(rename = "type")]
        ty: WireType,
        by_value: bool,
        /// The name of the header sent over the wire.
        header_name: String,
    },

    /// A collection of headers sharing a common prefix, surfaced as a map.
    Map {
        /// The name of the field within the response envelope.
        field_name: String,
        #[serde(default)]
        docs: Docs,
        #[serde(rename = "type")]
        ty: WireType,
        /// The prefix shared by each header in the map.
        header_prefix: String,
    },
}

impl HeaderResponse {
    pub fn field_name(&self) -> &str {
        match self {
            HeaderResponse::Scalar { field_name, .. } | HeaderResponse::Map { field_name, .. } => {
                field_name
            }
        }
    }

    pub fn field_type(&self) -> &WireType {
        match self {
            HeaderResponse::Scalar { ty, .. } | HeaderResponse::Map { ty, .. } => ty,
        }
    }

    pub fn docs(&self) -> &Docs {
        match self {
            HeaderResponse::Scalar { docs, .. } | HeaderResponse::Map { docs, .. } => docs,
        }
    }

    /// Headers are emitted by value only when the scalar header says so;
    /// header maps are always by value.
    pub fn by_value(&self) -> bool {
        match self {
            HeaderResponse::Scalar { by_value, .. } => *by_value,
            HeaderResponse::Map { .. } => true,
        }
    }
}

/// The type returned from a client method: response headers merged with any
/// body result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// The name of the envelope type.
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// The body result. `None` for operations that return no body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultKind>,

    /// Any modeled response headers. Can be empty.
    #[serde(default)]
    pub headers: Vec<HeaderResponse>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn embedded_results_have_no_field_name() {
        let model = ResultKind::Model {
            docs: Docs::default(),
            model: "Widget".to_string(),
            format: SerdeFormat::Json,
        };
        assert_eq!(model.field_name(), None);
        assert_eq!(model.field_type().declaration(None), "Widget");

        let poly = ResultKind::Polymorphic {
            docs: Docs::default(),
            interface: "ShapeClassification".to_string(),
        };
        assert_eq!(poly.field_name(), None);
        assert_eq!(poly.field_type().declaration(None), "ShapeClassification");
    }

    #[test]
    fn binary_result_is_a_read_closer() {
        let result = ResultKind::Binary {
            field_name: "Body".to_string(),
            docs: Docs::default(),
        };
        assert_eq!(result.field_name(), Some("Body"));
        assert_eq!(result.field_type().declaration(None), "io.ReadCloser");
    }

    #[test]
    fn head_as_boolean_is_a_bool() {
        let result = ResultKind::HeadAsBoolean {
            field_name: "Success".to_string(),
            docs: Docs::default(),
        };
        assert_eq!(result.field_type().declaration(None), "bool");
    }
}
