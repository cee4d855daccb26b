//! Client scaffolding: the client struct, its constructors, and accessors
//! to sub-clients. Method bodies are produced by the operations layer on
//! top of this core.

use gosdk_codemodel::{
    Client, CodeModel, CodeModelKind, Package, Parameter, ParameterKind,
};

use crate::helpers::{
    content_preamble, format_comment_as_bullet_item, format_doc_comment, star, CORE_MGMT_MODULE,
    CORE_MODULE,
};
use crate::imports::ImportManager;

/// Creates the content for one client's scaffolding file.
pub fn generate_client(code_model: &CodeModel, pkg: &Package, client: &Client) -> String {
    let mut imports = ImportManager::new();
    let mut content = String::new();

    content.push_str(&emit_struct(code_model, client));
    for ctor in &client.constructors {
        content.push_str(&emit_constructor(code_model, client, ctor, &mut imports));
    }
    for accessor in &client.client_accessors {
        content.push_str(&emit_accessor(client, accessor));
    }

    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(&content);
    text
}

/// The type name for the internal pipeline field: management-plane clients
/// share the mgmt pipeline, everything else the plain core client.
fn internal_type(code_model: &CodeModel) -> &'static str {
    match code_model.kind {
        CodeModelKind::Management => "mgmt.Client",
        CodeModelKind::DataPlane => "core.Client",
    }
}

fn internal_module(code_model: &CodeModel) -> &'static str {
    match code_model.kind {
        CodeModelKind::Management => CORE_MGMT_MODULE,
        CodeModelKind::DataPlane => CORE_MODULE,
    }
}

fn emit_struct(code_model: &CodeModel, client: &Client) -> String {
    let mut text = format_doc_comment(&client.docs);
    if text.is_empty() {
        text.push_str(&format!(
            "// {} contains the methods for the {} group.\n",
            client.name,
            client.name.trim_end_matches("Client")
        ));
    }
    text.push_str(&format!(
        "// Don't use this type directly, use New{}() instead.\n",
        client.name
    ));
    text.push_str(&format!("type {} struct {{\n", client.name));
    text.push_str(&format!("\tinternal *{}\n", internal_type(code_model)));
    for param in persisted_parameters(client) {
        text.push_str(&format!(
            "\t{} {}{}\n",
            param.name,
            star(param.emitted_by_value()),
            param.ty.declaration(None)
        ));
    }
    text.push_str("}\n\n");
    text
}

/// Client parameters persisted as struct fields. Credentials are consumed
/// by the pipeline and never stored.
fn persisted_parameters(client: &Client) -> impl Iterator<Item = &Parameter> {
    client
        .parameters
        .iter()
        .filter(|p| !matches!(p.kind, ParameterKind::Credential))
}

fn emit_constructor(
    code_model: &CodeModel,
    client: &Client,
    ctor: &gosdk_codemodel::Constructor,
    imports: &mut ImportManager,
) -> String {
    imports.add(internal_module(code_model), None);

    let mut text = format!(
        "// {} creates a new instance of {} with the specified values.\n",
        ctor.name, client.name
    );
    for param in &ctor.parameters {
        text.push_str(&format_comment_as_bullet_item(&param.name, &param.docs));
    }

    let params = ctor
        .parameters
        .iter()
        .map(|p| {
            imports.add_for_type(&p.ty);
            format!("{} {}{}", p.name, star(p.emitted_by_value()), p.ty.declaration(None))
        })
        .collect::<Vec<_>>()
        .join(", ");

    text.push_str(&format!(
        "func {}({params}) (*{}, error) {{\n",
        ctor.name, client.name
    ));
    let pipeline = match code_model.kind {
        CodeModelKind::Management => "mgmt.NewClient",
        CodeModelKind::DataPlane => "core.NewClient",
    };
    text.push_str(&format!(
        "\tinternal, err := {pipeline}(moduleName, moduleVersion, credential, options)\n"
    ));
    text.push_str("\tif err != nil {\n");
    text.push_str("\t\treturn nil, err\n");
    text.push_str("\t}\n");
    text.push_str(&format!("\treturn &{}{{\n", client.name));
    for param in &ctor.parameters {
        if matches!(param.kind, ParameterKind::Credential) {
            continue;
        }
        if client.parameters.iter().any(|p| p.name == param.name) {
            text.push_str(&format!("\t\t{}: {},\n", param.name, param.name));
        }
    }
    text.push_str("\t\tinternal: internal,\n");
    text.push_str("\t}, nil\n");
    text.push_str("}\n\n");
    text
}

fn emit_accessor(client: &Client, accessor: &gosdk_codemodel::ClientAccessor) -> String {
    let mut text = format!(
        "// {} creates a new instance of {}.\n",
        accessor.name, accessor.sub_client
    );
    text.push_str(&format!(
        "func (client *{}) {}() *{} {{\n",
        client.name, accessor.name, accessor.sub_client
    ));
    text.push_str(&format!("\treturn &{}{{\n", accessor.sub_client));
    for param in persisted_parameters(client) {
        text.push_str(&format!("\t\t{}: client.{},\n", param.name, param.name));
    }
    text.push_str("\t\tinternal: client.internal,\n");
    text.push_str("\t}\n");
    text.push_str("}\n\n");
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gosdk_codemodel::{
        ClientAccessor, Constructor, Docs, Info, Module, Options, ParameterLocation,
        ParameterStyle, WireType,
    };

    fn code_model(kind: CodeModelKind) -> CodeModel {
        CodeModel {
            info: Info { title: "test".to_string() },
            kind,
            options: Options::default(),
            module: Module {
                identity: "github.com/contoso/widgets".to_string(),
                version: "1.0.0".to_string(),
            },
            packages: Vec::new(),
        }
    }

    fn param(name: &str, ty: WireType, kind: ParameterKind) -> Parameter {
        Parameter {
            name: name.to_string(),
            docs: Docs::default(),
            ty,
            style: ParameterStyle::Required,
            by_value: true,
            location: ParameterLocation::Client,
            group: None,
            kind,
        }
    }

    fn credential() -> Parameter {
        param(
            "credential",
            WireType::Qualified {
                name: "TokenCredential".to_string(),
                module: CORE_MODULE.to_string(),
            },
            ParameterKind::Credential,
        )
    }

    fn widgets_client() -> Client {
        Client {
            name: "WidgetsClient".to_string(),
            docs: Docs::default(),
            parameters: vec![
                param("subscriptionID", WireType::String, ParameterKind::Uri { segment: "subscriptionId".to_string() }),
            ],
            constructors: vec![Constructor {
                name: "NewWidgetsClient".to_string(),
                parameters: vec![
                    param("subscriptionID", WireType::String, ParameterKind::Uri { segment: "subscriptionId".to_string() }),
                    credential(),
                    Parameter {
                        style: ParameterStyle::Optional,
                        by_value: false,
                        ..param(
                            "options",
                            WireType::Qualified {
                                name: "ClientOptions".to_string(),
                                module: CORE_MGMT_MODULE.to_string(),
                            },
                            ParameterKind::Plain,
                        )
                    },
                ],
            }],
            methods: Vec::new(),
            client_accessors: vec![ClientAccessor {
                name: "NewWidgetPartsClient".to_string(),
                sub_client: "WidgetPartsClient".to_string(),
            }],
        }
    }

    fn pkg() -> Package {
        Package {
            name: "widgets".to_string(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            models: Vec::new(),
            param_groups: Vec::new(),
            clients: vec![widgets_client()],
        }
    }

    #[test]
    fn management_client_uses_the_mgmt_pipeline() {
        let model = code_model(CodeModelKind::Management);
        let text = generate_client(&model, &pkg(), &widgets_client());

        assert!(text.contains("// Don't use this type directly, use NewWidgetsClient() instead."));
        assert!(text.contains("type WidgetsClient struct {\n\tinternal *mgmt.Client\n\tsubscriptionID string\n}"));
        assert!(text.contains("func NewWidgetsClient(subscriptionID string, credential core.TokenCredential, options *mgmt.ClientOptions) (*WidgetsClient, error) {"));
        assert!(text.contains("internal, err := mgmt.NewClient(moduleName, moduleVersion, credential, options)"));
        // the credential isn't persisted on the client
        assert!(!text.contains("credential: credential"));
        assert!(text.contains("\t\tsubscriptionID: subscriptionID,\n"));
    }

    #[test]
    fn accessor_forwards_persisted_parameters() {
        let model = code_model(CodeModelKind::Management);
        let text = generate_client(&model, &pkg(), &widgets_client());

        assert!(text.contains("func (client *WidgetsClient) NewWidgetPartsClient() *WidgetPartsClient {"));
        assert!(text.contains("\t\tsubscriptionID: client.subscriptionID,\n"));
        assert!(text.contains("\t\tinternal: client.internal,\n"));
    }

    #[test]
    fn data_plane_client_uses_the_core_pipeline() {
        let model = code_model(CodeModelKind::DataPlane);
        let text = generate_client(&model, &pkg(), &widgets_client());
        assert!(text.contains("\tinternal *core.Client\n"));
        assert!(text.contains("internal, err := core.NewClient(moduleName, moduleVersion, credential, options)"));
    }
}
