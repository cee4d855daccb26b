//! Options and parameter-group struct emission.

use gosdk_codemodel::{CodeModel, Package, StructType, WireType};

use crate::helpers::{content_preamble, format_doc_comment, star};
use crate::imports::ImportManager;
use crate::naming::capitalize;

/// Creates the content for the options file, or the empty string when the
/// package defines no parameter groups.
pub fn generate_options(code_model: &CodeModel, pkg: &Package) -> String {
    if pkg.param_groups.is_empty() {
        return String::new();
    }

    let mut imports = ImportManager::new();
    let mut content = String::new();
    for group in &pkg.param_groups {
        content.push_str(&emit(group, &mut imports));
    }

    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(&content);
    text
}

fn emit(group: &StructType, imports: &mut ImportManager) -> String {
    let mut text = format_doc_comment(&group.docs);
    text.push_str(&format!("type {} struct {{\n", group.name));

    if group.fields.is_empty() {
        // a zero-field group still needs to be a valid non-empty type
        text.push_str("\t// placeholder for future optional parameters\n");
    } else {
        let mut first = true;
        for field in &group.fields {
            imports.add_for_type(&field.ty);
            if !field.docs.is_empty() {
                if !first {
                    // an extra new-line between commented fields
                    text.push('\n');
                }
                for line in format_doc_comment(&field.docs).lines() {
                    text.push_str(&format!("\t{line}\n"));
                }
            }

            let type_name = match &field.ty {
                // for literal fields the underlying type name is used
                WireType::Literal { literal } => literal.ty.declaration(),
                other => other.declaration(None),
            };

            text.push_str(&format!(
                "\t{} {}{}\n",
                capitalize(&field.name),
                star(field.by_value),
                type_name
            ));
            first = false;
        }
    }

    text.push_str("}\n\n");
    text
}
