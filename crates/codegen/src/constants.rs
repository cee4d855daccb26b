//! Const type emission.

use gosdk_codemodel::{CodeModel, ConstantKind, ConstantType, LiteralValue, Package};

use crate::helpers::{comment, content_preamble, format_doc_comment};

/// Creates the content for the constants file, or the empty string when the
/// package defines no const types.
pub fn generate_constants(code_model: &CodeModel, pkg: &Package) -> String {
    if pkg.constants.is_empty() {
        return String::new();
    }

    let mut text = content_preamble(code_model, &pkg.name);
    for constant in &pkg.constants {
        text.push_str(&emit(constant));
    }
    text
}

fn emit(constant: &ConstantType) -> String {
    let mut text = format_doc_comment(&constant.docs);
    text.push_str(&format!("type {} {}\n\n", constant.name, constant.ty.as_str()));

    text.push_str("const (\n");
    for value in &constant.values {
        if !value.docs.is_empty() {
            text.push_str(&indented_doc_comment(value));
        }
        text.push_str(&format!(
            "\t{} {} = {}\n",
            value.name,
            constant.name,
            format_value(constant.ty, &value.value)
        ));
    }
    text.push_str(")\n\n");

    // the accessor returns values in declaration order, which is the wire
    // contract; it is never re-sorted
    text.push_str(&comment(
        &format!(
            "{} returns the possible values for the {} const type.",
            constant.values_func_name, constant.name
        ),
        "// ",
    ));
    text.push_str(&format!(
        "func {}() []{} {{\n",
        constant.values_func_name, constant.name
    ));
    text.push_str(&format!("\treturn []{}{{\n", constant.name));
    for value in &constant.values {
        text.push_str(&format!("\t\t{},\n", value.name));
    }
    text.push_str("\t}\n}\n\n");
    text
}

fn indented_doc_comment(value: &gosdk_codemodel::ConstantValue) -> String {
    format_doc_comment(&value.docs)
        .lines()
        .map(|line| format!("\t{line}\n"))
        .collect()
}

fn format_value(kind: ConstantKind, value: &LiteralValue) -> String {
    match value {
        LiteralValue::Str(s) => match kind {
            ConstantKind::String => format!("\"{s}\""),
            _ => s.clone(),
        },
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Float(f) => f.to_string(),
    }
}
