//! Discriminated-type interface emission.
//!
//! Each interface type becomes a Go interface with a single marker method
//! returning the hierarchy's root type. Nested hierarchies embed the
//! parent interface.

use gosdk_codemodel::{CodeModel, Package};

use crate::helpers::{comment, content_preamble, format_doc_comment};

/// Creates the content for the interfaces file, or the empty string when
/// the package defines no discriminated types.
pub fn generate_interfaces(code_model: &CodeModel, pkg: &Package) -> String {
    if pkg.interfaces.is_empty() {
        return String::new();
    }

    let mut text = content_preamble(code_model, &pkg.name);
    for iface in &pkg.interfaces {
        if iface.docs.is_empty() {
            text.push_str(&comment(
                &format!(
                    "{} provides polymorphic access to related types. Call the interface's Get{}() method to return the concrete type.",
                    iface.name, iface.root_type
                ),
                "// ",
            ));
        } else {
            text.push_str(&format_doc_comment(&iface.docs));
        }
        text.push_str(&format!("type {} interface {{\n", iface.name));
        if let Some(parent) = &iface.parent {
            text.push_str(&format!("\t{parent}\n"));
        }
        text.push_str(&format!(
            "\t// Get{root} returns the {root} content of the underlying type.\n",
            root = iface.root_type
        ));
        text.push_str(&format!("\tGet{root}() *{root}\n", root = iface.root_type));
        text.push_str("}\n\n");
    }
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gosdk_codemodel::{
        CodeModelKind, Docs, Info, InterfaceType, Module, Options, PolymorphicCase,
    };

    fn code_model() -> CodeModel {
        CodeModel {
            info: Info { title: "test".to_string() },
            kind: CodeModelKind::DataPlane,
            options: Options::default(),
            module: Module {
                identity: "github.com/contoso/aviary".to_string(),
                version: "0.1.0".to_string(),
            },
            packages: Vec::new(),
        }
    }

    fn interface(name: &str, root: &str, parent: Option<&str>) -> InterfaceType {
        InterfaceType {
            name: name.to_string(),
            docs: Docs::default(),
            discriminator_field: "kind".to_string(),
            possible_types: vec![PolymorphicCase {
                name: root.to_string(),
                discriminator_value: None,
            }],
            parent: parent.map(str::to_string),
            root_type: root.to_string(),
        }
    }

    #[test]
    fn interface_carries_the_marker_method() {
        let pkg = Package {
            name: "aviary".to_string(),
            constants: Vec::new(),
            interfaces: vec![interface("BirdClassification", "Bird", None)],
            models: Vec::new(),
            param_groups: Vec::new(),
            clients: Vec::new(),
        };
        let text = generate_interfaces(&code_model(), &pkg);
        assert!(text.contains("type BirdClassification interface {"));
        assert!(text.contains("\tGetBird() *Bird\n"));
    }

    #[test]
    fn nested_hierarchies_embed_the_parent_interface() {
        let pkg = Package {
            name: "aviary".to_string(),
            constants: Vec::new(),
            interfaces: vec![
                interface("BirdClassification", "Bird", None),
                interface("RaptorClassification", "Raptor", Some("BirdClassification")),
            ],
            models: Vec::new(),
            param_groups: Vec::new(),
            clients: Vec::new(),
        };
        let text = generate_interfaces(&code_model(), &pkg);
        assert!(text.contains("type RaptorClassification interface {\n\tBirdClassification\n"));
        assert!(text.contains("\tGetRaptor() *Raptor\n"));
    }

    #[test]
    fn no_interfaces_emit_nothing() {
        let pkg = Package {
            name: "aviary".to_string(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            models: Vec::new(),
            param_groups: Vec::new(),
            clients: Vec::new(),
        };
        assert_eq!(generate_interfaces(&code_model(), &pkg), "");
    }
}
