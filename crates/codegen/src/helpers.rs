//! Shared formatting helpers used across the generators.

use gosdk_codemodel::{CodeModel, Docs, Literal, LiteralType, LiteralValue, ScalarKind};

/// Maximum width for wrapped comment lines.
pub const COMMENT_LENGTH: usize = 120;

/// The core runtime library the generated code builds on.
pub const CORE_MODULE: &str = "github.com/gosdk-tools/sdk-go/core";

/// The core runtime helpers (base64, transport plumbing).
pub const CORE_RUNTIME_MODULE: &str = "github.com/gosdk-tools/sdk-go/core/runtime";

/// Pointer-conversion helpers.
pub const CORE_TO_MODULE: &str = "github.com/gosdk-tools/sdk-go/core/to";

/// Management-plane client plumbing.
pub const CORE_MGMT_MODULE: &str = "github.com/gosdk-tools/sdk-go/core/mgmt";

/// Returns the common source-file preamble: header comment, generated-code
/// marker, and package clause.
pub fn content_preamble(code_model: &CodeModel, package_name: &str) -> String {
    let mut text = String::new();
    if let Some(header) = &code_model.options.header_text {
        text.push_str(&comment(header, "// "));
        text.push('\n');
    }
    // the marker lets tools recognize the file as generated
    text.push_str("// Code generated by gosdk. DO NOT EDIT.\n");
    text.push_str(&format!("\npackage {package_name}\n\n"));
    text
}

/// Formats `text` as a comment with the given prefix, wrapping lines at
/// [`COMMENT_LENGTH`] columns.
pub fn comment(text: &str, prefix: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        if line.is_empty() {
            out.push_str(prefix.trim_end());
            out.push('\n');
            continue;
        }
        let mut current = String::from(prefix);
        for word in line.split_whitespace() {
            if current.len() > prefix.len() && current.len() + word.len() + 1 > COMMENT_LENGTH {
                out.push_str(current.trim_end());
                out.push('\n');
                current = String::from(prefix);
            }
            if current.len() > prefix.len() {
                current.push(' ');
            }
            current.push_str(word);
        }
        out.push_str(current.trim_end());
        out.push('\n');
    }
    out
}

/// Formats the doc comment for a type or field, summary first.
pub fn format_doc_comment(docs: &Docs) -> String {
    let mut text = String::new();
    if let Some(summary) = &docs.summary {
        text.push_str(&comment(summary, "// "));
    }
    if let Some(description) = &docs.description {
        text.push_str(&comment(description, "// "));
    }
    text
}

/// Formats docs as a `//   - name: ...` bullet item for constructor and
/// factory parameter lists.
pub fn format_comment_as_bullet_item(name: &str, docs: &Docs) -> String {
    let body = docs
        .summary
        .as_deref()
        .or_else(|| docs.description.as_deref())
        .unwrap_or_default();
    if body.is_empty() {
        return String::new();
    }
    comment(&format!("{name} - {body}"), "//   - ")
}

/// Returns `*` for pointer-to-type fields and parameters.
pub fn star(by_value: bool) -> &'static str {
    if by_value { "" } else { "*" }
}

/// Formats a literal for direct emission into generated source.
///
/// With `with_cast`, sized numeric literals are wrapped in a conversion so
/// the emitted expression has the exact Go type.
pub fn format_literal_value(literal: &Literal, with_cast: bool) -> String {
    match &literal.ty {
        LiteralType::Constant { .. } => match &literal.value {
            // for constants the value holds the Go name of the const value
            LiteralValue::Str(name) => name.clone(),
            other => raw_literal(other),
        },
        LiteralType::EncodedBytes { .. } => raw_literal(&literal.value),
        LiteralType::Scalar { ty } => {
            let raw = raw_literal(&literal.value);
            if !with_cast {
                return raw;
            }
            match ty {
                ScalarKind::Float32 => format!("float32({raw})"),
                ScalarKind::Float64 => format!("float64({raw})"),
                ScalarKind::Int32 => format!("int32({raw})"),
                ScalarKind::Int64 => format!("int64({raw})"),
                _ => raw,
            }
        }
        LiteralType::String => {
            let raw = raw_literal(&literal.value);
            if raw.starts_with('"') {
                // already quoted
                raw
            } else {
                format!("\"{raw}\"")
            }
        }
        LiteralType::Time { .. } => format!("\"{}\"", raw_literal(&literal.value)),
    }
}

fn raw_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Float(f) => f.to_string(),
        LiteralValue::Str(s) => s.clone(),
    }
}
