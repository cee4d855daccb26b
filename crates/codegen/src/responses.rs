//! Response envelope emission.

use gosdk_codemodel::{
    CodeModel, Docs, Method, Package, ResultFormat, ResultKind,
};

use crate::helpers::{content_preamble, format_doc_comment, star};
use crate::imports::ImportManager;

/// The generated responses file and its companion serde file.
#[derive(Debug)]
pub struct ResponsesSerde {
    pub responses: String,
    pub serde: String,
}

/// Creates the content for the responses file, or empty strings when the
/// package has no response envelopes.
pub fn generate_responses(code_model: &CodeModel, pkg: &Package) -> ResponsesSerde {
    let mut methods: Vec<&Method> = pkg
        .clients
        .iter()
        .flat_map(|c| c.methods.iter())
        .collect();
    if methods.is_empty() {
        return ResponsesSerde { responses: String::new(), serde: String::new() };
    }
    methods.sort_by(|a, b| a.response_envelope.name.cmp(&b.response_envelope.name));

    let mut imports = ImportManager::new();
    let mut serde_imports = ImportManager::new();
    let mut resp_content = String::new();
    let mut serde_content = String::new();

    for method in methods {
        resp_content.push_str(&emit(method, &mut imports));
        serde_content.push_str(&unmarshaller(method, &mut serde_imports));
    }

    let mut responses = content_preamble(code_model, &pkg.name);
    responses.push_str(&imports.text());
    responses.push_str(&resp_content);

    let mut serde = String::new();
    if !serde_content.is_empty() {
        serde = content_preamble(code_model, &pkg.name);
        serde.push_str(&serde_imports.text());
        serde.push_str(&serde_content);
    }

    ResponsesSerde { responses, serde }
}

/// An envelope needs an unmarshaller when it embeds a discriminated type,
/// or when a long-running operation returns a monomorphic payload.
fn unmarshaller(method: &Method, imports: &mut ImportManager) -> String {
    let envelope = &method.response_envelope;
    let (polymorphic, monomorphic) = match &envelope.result {
        Some(ResultKind::Polymorphic { interface, .. }) => (Some(interface), None),
        Some(ResultKind::Monomorphic { field_name, .. }) if method.kind.is_lro() => {
            (None, Some(field_name))
        }
        _ => return String::new(),
    };

    let receiver = envelope
        .name
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase().to_string())
        .unwrap_or_default();
    let mut text = format!(
        "// UnmarshalJSON implements the json.Unmarshaller interface for type {}.\n",
        envelope.name
    );
    text.push_str(&format!(
        "func ({receiver} *{}) UnmarshalJSON(data []byte) error {{\n",
        envelope.name
    ));

    if let Some(interface) = polymorphic {
        text.push_str(&format!("\tres, err := unmarshal{interface}(data)\n"));
        text.push_str("\tif err != nil {\n");
        text.push_str("\t\treturn err\n");
        text.push_str("\t}\n");
        text.push_str(&format!("\t{receiver}.{interface} = res\n"));
        text.push_str("\treturn nil\n");
    } else if let Some(field_name) = monomorphic {
        imports.add("encoding/json", None);
        text.push_str(&format!(
            "\treturn json.Unmarshal(data, &{receiver}.{field_name})\n"
        ));
    }
    text.push_str("}\n\n");
    text
}

fn emit(method: &Method, imports: &mut ImportManager) -> String {
    let envelope = &method.response_envelope;
    let mut text = format_doc_comment(&envelope.docs);
    text.push_str(&format!("type {} struct {{\n", envelope.name));

    if envelope.result.is_none() && envelope.headers.is_empty() {
        // an empty response envelope
        text.push_str("\t// placeholder for future response values\n");
        text.push_str("}\n\n");
        return text;
    }

    // headers and any non-embedded result merge into one sorted field list
    let mut fields: Vec<(Docs, String)> = Vec::new();
    let mut first = true;

    if let Some(result) = &envelope.result {
        match result {
            ResultKind::Model { .. } | ResultKind::Polymorphic { .. } => {
                // the embedded type always goes first
                text.push_str(&format_doc_comment(result.docs()));
                text.push_str(&format!("\t{}\n", result.field_type().declaration(None)));
                first = false;
            }
            _ => {
                let ty = result.field_type();
                imports.add_for_type(&ty);

                let mut tag = String::new();
                if let ResultKind::Monomorphic { format: ResultFormat::Xml, xml, .. } = result {
                    // only XML carries tags; JSON has custom serde methods
                    if let Some(wraps) = xml.as_ref().and_then(|x| x.wraps.as_deref()) {
                        tag = format!(" `xml:\"{wraps}\"`");
                    } else if let Some(name) = xml.as_ref().and_then(|x| x.name.as_deref()) {
                        tag = format!(" `xml:\"{name}\"`");
                    }
                }

                let by_value = match result {
                    ResultKind::Monomorphic { by_value, .. } => *by_value,
                    _ => true,
                };

                let field_name = result.field_name().unwrap_or_default();
                fields.push((
                    result.docs().clone(),
                    format!(
                        "\t{field_name} {}{}{tag}\n",
                        star(by_value),
                        ty.declaration(None)
                    ),
                ));
            }
        }
    }

    for header in &envelope.headers {
        imports.add_for_type(header.field_type());
        fields.push((
            header.docs().clone(),
            format!(
                "\t{} {}{}\n",
                header.field_name(),
                star(header.by_value()),
                header.field_type().declaration(None)
            ),
        ));
    }

    fields.sort_by(|a, b| a.1.cmp(&b.1));

    for (docs, field) in fields {
        if !docs.is_empty() {
            if !first {
                // an extra new-line between commented fields
                text.push('\n');
            }
            text.push_str(&format_doc_comment(&docs));
        }
        text.push_str(&field);
        first = false;
    }

    text.push_str("}\n\n");
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gosdk_codemodel::{
        Client, CodeModelKind, HeaderResponse, HttpMethod, Info, MethodKind, Module, Options,
        ResponseEnvelope, ScalarKind, WireType,
    };

    fn code_model() -> CodeModel {
        CodeModel {
            info: Info { title: "test".to_string() },
            kind: CodeModelKind::DataPlane,
            options: Options::default(),
            module: Module {
                identity: "github.com/contoso/widgets".to_string(),
                version: "0.1.0".to_string(),
            },
            packages: Vec::new(),
        }
    }

    fn method(name: &str, kind: MethodKind, envelope: ResponseEnvelope) -> Method {
        Method {
            name: name.to_string(),
            docs: Docs::default(),
            kind,
            http_method: HttpMethod::Get,
            http_path: "/widgets".to_string(),
            http_status_codes: vec![200],
            parameters: Vec::new(),
            response_envelope: envelope,
            options_group: None,
        }
    }

    fn pkg(methods: Vec<Method>) -> Package {
        Package {
            name: "widgets".to_string(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            models: Vec::new(),
            param_groups: Vec::new(),
            clients: vec![Client {
                name: "WidgetsClient".to_string(),
                docs: Docs::default(),
                parameters: Vec::new(),
                constructors: Vec::new(),
                methods,
                client_accessors: Vec::new(),
            }],
        }
    }

    #[test]
    fn model_result_is_embedded_before_sorted_headers() {
        let envelope = ResponseEnvelope {
            name: "WidgetsClientGetResponse".to_string(),
            docs: Docs::default(),
            result: Some(ResultKind::Model {
                docs: Docs::default(),
                model: "Widget".to_string(),
                format: gosdk_codemodel::SerdeFormat::Json,
            }),
            headers: vec![
                HeaderResponse::Scalar {
                    field_name: "RequestID".to_string(),
                    docs: Docs::default(),
                    ty: WireType::String,
                    by_value: false,
                    header_name: "x-request-id".to_string(),
                },
                HeaderResponse::Scalar {
                    field_name: "ETag".to_string(),
                    docs: Docs::default(),
                    ty: WireType::String,
                    by_value: false,
                    header_name: "ETag".to_string(),
                },
            ],
        };
        let out = generate_responses(&code_model(), &pkg(vec![method("Get", MethodKind::Method, envelope)]));

        let embed = out.responses.find("\tWidget\n").unwrap();
        let etag = out.responses.find("\tETag *string\n").unwrap();
        let request_id = out.responses.find("\tRequestID *string\n").unwrap();
        assert!(embed < etag && etag < request_id);
        // no unmarshaller needed
        assert_eq!(out.serde, "");
    }

    #[test]
    fn empty_envelope_gets_placeholder() {
        let envelope = ResponseEnvelope {
            name: "WidgetsClientDeleteResponse".to_string(),
            docs: Docs::default(),
            result: None,
            headers: Vec::new(),
        };
        let out = generate_responses(&code_model(), &pkg(vec![method("Delete", MethodKind::Method, envelope)]));
        assert!(out
            .responses
            .contains("type WidgetsClientDeleteResponse struct {\n\t// placeholder for future response values\n}\n"));
    }

    #[test]
    fn polymorphic_result_gets_an_unmarshaller() {
        let envelope = ResponseEnvelope {
            name: "WidgetsClientGetShapeResponse".to_string(),
            docs: Docs::default(),
            result: Some(ResultKind::Polymorphic {
                docs: Docs::default(),
                interface: "ShapeClassification".to_string(),
            }),
            headers: Vec::new(),
        };
        let out = generate_responses(&code_model(), &pkg(vec![method("GetShape", MethodKind::Method, envelope)]));

        assert!(out.responses.contains("\tShapeClassification\n"));
        assert!(out.serde.contains("func (w *WidgetsClientGetShapeResponse) UnmarshalJSON(data []byte) error {"));
        assert!(out.serde.contains("res, err := unmarshalShapeClassification(data)"));
        assert!(out.serde.contains("w.ShapeClassification = res"));
    }

    #[test]
    fn lro_monomorphic_result_gets_an_unmarshaller() {
        let envelope = ResponseEnvelope {
            name: "WidgetsClientCountResponse".to_string(),
            docs: Docs::default(),
            result: Some(ResultKind::Monomorphic {
                field_name: "Value".to_string(),
                docs: Docs::default(),
                ty: WireType::Scalar { ty: ScalarKind::Int64, encode_as_string: false },
                format: ResultFormat::Json,
                by_value: false,
                xml: None,
            }),
            headers: Vec::new(),
        };
        let out = generate_responses(
            &code_model(),
            &pkg(vec![method("Count", MethodKind::Lro { final_state_via: None }, envelope)]),
        );
        assert!(out.serde.contains("return json.Unmarshal(data, &w.Value)"));
    }
}
