//! The management-plane client factory.
//!
//! The factory persists the parameters shared by client constructors and
//! synthesizes one dispatch constructor per client, forwarding factory-held
//! parameters and accepting any client-private ones as arguments.

use std::cmp::Ordering;
use std::collections::HashMap;

use gosdk_codemodel::{CodeModel, CodeModelKind, Package, Parameter, ParameterKind};

use crate::helpers::{
    content_preamble, format_comment_as_bullet_item, star, CORE_MGMT_MODULE, CORE_MODULE,
};
use crate::imports::ImportManager;

/// Creates the content for the client factory file. For data-plane targets,
/// or packages with no clients, the empty string is returned.
pub fn generate_client_factory(code_model: &CodeModel, pkg: &Package) -> String {
    if code_model.kind != CodeModelKind::Management || pkg.clients.is_empty() {
        return String::new();
    }

    let factory_params = if code_model.options.factory_gather_all_params {
        all_client_parameters(pkg)
    } else {
        common_client_parameters(pkg)
    };
    let factory_param_names: HashMap<&str, ()> =
        factory_params.iter().map(|p| (p.name.as_str(), ())).collect();

    let mut imports = ImportManager::new();
    imports.add(CORE_MODULE, None);
    imports.add(CORE_MGMT_MODULE, None);
    let mut result = String::new();

    // factory type
    result.push_str("// ClientFactory is a client factory used to create any client in this module.\n");
    result.push_str("// Don't use this type directly, use NewClientFactory instead.\n");
    result.push_str("type ClientFactory struct {\n");
    for param in &factory_params {
        result.push_str(&format!(
            "\t{} {}{}\n",
            param.name,
            star(param.emitted_by_value()),
            param.ty.declaration(None)
        ));
    }
    result.push_str("\tinternal *mgmt.Client\n");
    result.push_str("}\n\n");

    // factory constructor
    result.push_str("// NewClientFactory creates a new instance of ClientFactory with the specified values.\n");
    result.push_str("// The parameter values will be propagated to any client created from this factory.\n");
    for param in &factory_params {
        imports.add_for_type(&param.ty);
        result.push_str(&format_comment_as_bullet_item(&param.name, &param.docs));
    }
    result.push_str("//   - credential - used to authorize requests.\n");
    result.push_str("//   - options - pass nil to accept the default values.\n");

    let mut signature = factory_params
        .iter()
        .map(|p| format!("{} {}{}", p.name, star(p.emitted_by_value()), p.ty.declaration(None)))
        .collect::<Vec<_>>()
        .join(", ");
    if !signature.is_empty() {
        signature.push_str(", ");
    }
    result.push_str(&format!(
        "func NewClientFactory({signature}credential core.TokenCredential, options *mgmt.ClientOptions) (*ClientFactory, error) {{\n"
    ));
    result.push_str("\tinternal, err := mgmt.NewClient(moduleName, moduleVersion, credential, options)\n");
    result.push_str("\tif err != nil {\n");
    result.push_str("\t\treturn nil, err\n");
    result.push_str("\t}\n");
    result.push_str("\treturn &ClientFactory{\n");
    for param in &factory_params {
        result.push_str(&format!("\t\t{}: {},\n", param.name, param.name));
    }
    result.push_str("\t\tinternal: internal,\n");
    result.push_str("\t}, nil\n");
    result.push_str("}\n\n");

    // one dispatch constructor per client
    for client in &pkg.clients {
        let mut private_params: Vec<&Parameter> = Vec::new();
        let mut common_params: Vec<&Parameter> = Vec::new();
        for ctor in &client.constructors {
            for param in &ctor.parameters {
                if matches!(param.kind, ParameterKind::Plain | ParameterKind::Credential) {
                    // the pipeline inputs are factory-held by construction
                    continue;
                }
                if factory_param_names.contains_key(param.name.as_str()) {
                    common_params.push(param);
                } else {
                    private_params.push(param);
                }
            }
        }

        let ctor_name = format!("New{}", client.name);
        result.push_str(&format!("// {ctor_name} creates a new instance of {}.\n", client.name));
        result.push_str(&format!("func (c *ClientFactory) {ctor_name}("));
        result.push_str(
            &private_params
                .iter()
                .map(|p| format!("{} {}{}", p.name, star(p.emitted_by_value()), p.ty.declaration(None)))
                .collect::<Vec<_>>()
                .join(", "),
        );
        result.push_str(&format!(") *{} {{\n", client.name));
        result.push_str(&format!("\treturn &{}{{\n", client.name));
        for param in &private_params {
            result.push_str(&format!("\t\t{}: {},\n", param.name, param.name));
        }
        for param in &common_params {
            result.push_str(&format!("\t\t{}: c.{},\n", param.name, param.name));
        }
        result.push_str("\t\tinternal: c.internal,\n");
        result.push_str("\t}\n");
        result.push_str("}\n\n");
    }

    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(&result);
    text
}

/// The union of every client's persisted parameters, deduplicated by name.
/// Credentials are never persisted; the factory takes one explicitly.
fn all_client_parameters(pkg: &Package) -> Vec<&Parameter> {
    let mut params: Vec<&Parameter> = Vec::new();
    for client in &pkg.clients {
        for param in &client.parameters {
            if matches!(param.kind, ParameterKind::Credential)
                || params.iter().any(|p| p.name == param.name)
            {
                continue;
            }
            params.push(param);
        }
    }
    sort_by_required(&mut params);
    params
}

/// The intersection of parameters shared by every client, by name.
fn common_client_parameters(pkg: &Package) -> Vec<&Parameter> {
    let mut params: Vec<&Parameter> = Vec::new();
    for client in &pkg.clients {
        for param in &client.parameters {
            if matches!(param.kind, ParameterKind::Credential) {
                continue;
            }
            let shared = pkg
                .clients
                .iter()
                .all(|c| c.parameters.iter().any(|p| p.name == param.name));
            if shared && !params.iter().any(|p| p.name == param.name) {
                params.push(param);
            }
        }
    }
    sort_by_required(&mut params);
    params
}

/// Required parameters first, then alphabetical.
fn sort_by_required(params: &mut [&Parameter]) {
    params.sort_by(|a, b| {
        match (a.style.is_required(), b.style.is_required()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        }
    });
}
