//! Clients, constructors, and method kinds.

use serde::{Deserialize, Serialize};

use crate::param::Parameter;
use crate::result::ResponseEnvelope;
use crate::types::Docs;

/// The HTTP verb for a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Delete,
    Get,
    Head,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Delete => "Delete",
            HttpMethod::Get => "Get",
            HttpMethod::Head => "Head",
            HttpMethod::Patch => "Patch",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
        }
    }
}

/// How a long-running operation's terminal state is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinalStateVia {
    AsyncOperation,
    Location,
    OperationLocation,
    OriginalUri,
}

/// The kind of a client method. Long-running and pageable methods refine the
/// plain kind; an operation can be both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MethodKind {
    /// A plain request/response method.
    Method,

    /// A long-running operation.
    Lro {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        final_state_via: Option<FinalStateVia>,
    },

    /// A method returning results one page at a time.
    Pageable {
        /// The envelope field holding the link to the next page, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_link_name: Option<String>,
    },

    /// A long-running operation whose terminal response pages.
    LroPageable {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        final_state_via: Option<FinalStateVia>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_link_name: Option<String>,
    },
}

impl MethodKind {
    /// Returns true for long-running kinds.
    pub fn is_lro(&self) -> bool {
        matches!(self, MethodKind::Lro { .. } | MethodKind::LroPageable { .. })
    }

    /// Returns true for pageable kinds.
    pub fn is_pageable(&self) -> bool {
        matches!(self, MethodKind::Pageable { .. } | MethodKind::LroPageable { .. })
    }
}

/// A method on a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// The method's Go name.
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    pub kind: MethodKind,

    pub http_method: HttpMethod,

    /// The fixed path for this method's HTTP request.
    pub http_path: String,

    /// Expected HTTP status codes for a successful call.
    #[serde(default)]
    pub http_status_codes: Vec<u16>,

    /// The parameters to this method, in signature order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// The type returned by this method.
    pub response_envelope: ResponseEnvelope,

    /// The name of the method's optional-parameters group type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_group: Option<String>,
}

/// A client constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    /// The constructor's Go name (e.g. `NewWidgetsClient`).
    pub name: String,

    /// The constructor's parameters, in signature order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// An accessor method returning a sub-client of a hierarchical client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAccessor {
    /// The accessor's Go name (e.g. `NewWidgetPartsClient`).
    pub name: String,

    /// The name of the client type the accessor returns.
    pub sub_client: String,
}

/// A grouping of methods, usually one per operation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// The client's Go type name (e.g. `WidgetsClient`).
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// Parameters persisted as fields on the client struct.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub constructors: Vec<Constructor>,

    #[serde(default)]
    pub methods: Vec<Method>,

    /// Accessors to sub-clients for hierarchical clients.
    #[serde(default)]
    pub client_accessors: Vec<ClientAccessor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_kind_refinements() {
        assert!(!MethodKind::Method.is_lro());
        assert!(!MethodKind::Method.is_pageable());
        assert!(MethodKind::Lro { final_state_via: None }.is_lro());
        assert!(MethodKind::Pageable { next_link_name: None }.is_pageable());

        let both = MethodKind::LroPageable { final_state_via: Some(FinalStateVia::Location), next_link_name: Some("NextLink".to_string()) };
        assert!(both.is_lro());
        assert!(both.is_pageable());
    }
}
