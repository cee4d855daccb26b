//! Name resolution: stuttering-prefix trimming and collision detection.
//!
//! An exported name "stutters" when it needlessly repeats its owning
//! package's name as a prefix (`widgets.WidgetsClient`). Trimming removes
//! the prefix, but only on a word boundary, and a run aborts if two
//! distinct originals collapse to the same trimmed name.

use std::collections::HashMap;

use gosdk_codemodel::{CodeModel, LiteralType, ResultKind, WireType};
use tracing::debug;

use crate::errors::{CodegenError, Result};

/// Trims the package prefix from `name` when it stutters.
///
/// The prefix comparison is against the upper-cased form of `pkg`, and the
/// character following the prefix must be upper-case so the prefix ends on
/// a word boundary. Trimming is idempotent: a name that no longer carries
/// the prefix comes back unchanged.
pub fn trim_package_prefix(pkg: &str, name: &str) -> String {
    let prefix = pkg.to_uppercase();

    // widgets.Widget doesn't stutter
    if name.len() <= prefix.len() {
        return name.to_string();
    }

    if prefix != name[..prefix.len()].to_uppercase() {
        return name.to_string();
    }

    // we cannot simply remove the prefix, consider the following case:
    //   pkg = tables, name = TableServicesClient; we'd end up with ervicesClient.
    // the character after the prefix must be upper-case.
    let boundary = &name[prefix.len()..];
    match boundary.chars().next() {
        Some(c) if c.is_uppercase() => name[prefix.len()..].to_string(),
        _ => name.to_string(),
    }
}

/// Acronyms kept fully upper-cased by [`capitalize`].
const ACRONYMS: &[&str] = &["ip", "os", "ms", "vm"];

/// Upper-cases the leading character, promoting known acronyms whole.
pub fn capitalize(s: &str) -> String {
    if ACRONYMS.contains(&s) {
        return s.to_uppercase();
    }
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// A per-run trim ledger. Records every applied trim so that two distinct
/// originals collapsing to one trimmed name is detected and reported, not
/// silently resolved in favor of whichever came first.
#[derive(Debug, Default)]
pub struct Namer {
    /// trimmed name -> original name
    applied: HashMap<String, String>,
    collisions: Vec<String>,
}

impl Namer {
    pub fn new() -> Self {
        Namer::default()
    }

    /// Trims `name` against `pkg`, recording the result.
    pub fn resolve(&mut self, pkg: &str, name: &str) -> String {
        let trimmed = trim_package_prefix(pkg, name);
        if let Some(existing) = self.applied.get(&trimmed) {
            if existing != name {
                self.collisions.push(format!(
                    "{existing} and {name} both resolve to {trimmed}"
                ));
            }
        } else {
            self.applied.insert(trimmed.clone(), name.to_string());
        }
        trimmed
    }

    /// Returns every collision recorded so far, aggregated into one error.
    pub fn finish(self) -> Result<()> {
        if self.collisions.is_empty() {
            Ok(())
        } else {
            Err(CodegenError::NameCollision(self.collisions))
        }
    }
}

/// Applies stuttering trims across the whole code model: every top-level
/// type name is resolved against its package name, and every by-name
/// reference is rewritten to match. Fails with the aggregated collision
/// list before anything is emitted.
pub fn apply_stutter_trim(model: &mut CodeModel) -> Result<()> {
    let mut namer = Namer::new();

    for pkg in &mut model.packages {
        let pkg_name = pkg.name.clone();
        let mut renames: HashMap<String, String> = HashMap::new();

        let mut record = |namer: &mut Namer, name: &mut String| {
            let trimmed = namer.resolve(&pkg_name, name);
            if trimmed != *name {
                debug!(original = %name, %trimmed, "trimmed stuttering name");
                renames.insert(name.clone(), trimmed.clone());
                *name = trimmed;
            }
        };

        for constant in &mut pkg.constants {
            let before = constant.name.clone();
            record(&mut namer, &mut constant.name);
            if before != constant.name {
                // the values accessor embeds the type name
                constant.values_func_name =
                    constant.values_func_name.replace(&before, &constant.name);
            }
            for value in &mut constant.values {
                record(&mut namer, &mut value.name);
            }
        }
        for iface in &mut pkg.interfaces {
            record(&mut namer, &mut iface.name);
        }
        for model in &mut pkg.models {
            record(&mut namer, &mut model.name);
        }
        for group in &mut pkg.param_groups {
            record(&mut namer, &mut group.name);
        }
        for client in &mut pkg.clients {
            record(&mut namer, &mut client.name);
        }

        if renames.is_empty() {
            continue;
        }

        // rewrite every by-name reference to the renamed definitions
        let rename = |name: &mut String| {
            if let Some(new_name) = renames.get(name) {
                *name = new_name.clone();
            }
        };

        for iface in &mut pkg.interfaces {
            rename(&mut iface.root_type);
            if let Some(parent) = &mut iface.parent {
                rename(parent);
            }
            for case in &mut iface.possible_types {
                rename(&mut case.name);
                if let Some(value) = &mut case.discriminator_value {
                    rename_in_literal(value, &renames);
                }
            }
        }

        for model in &mut pkg.models {
            if let Some(poly) = &mut model.polymorphic {
                rename(&mut poly.interface);
                if let Some(value) = &mut poly.discriminator_value {
                    rename_in_literal(value, &renames);
                }
            }
            for field in &mut model.fields {
                rename_in_type(&mut field.ty, &renames);
                if let Some(default) = &mut field.default_value {
                    rename_in_literal(default, &renames);
                }
            }
        }

        for group in &mut pkg.param_groups {
            for field in &mut group.fields {
                rename_in_type(&mut field.ty, &renames);
            }
        }

        for client in &mut pkg.clients {
            for accessor in &mut client.client_accessors {
                rename(&mut accessor.sub_client);
            }
            for param in &mut client.parameters {
                rename_in_type(&mut param.ty, &renames);
            }
            for ctor in &mut client.constructors {
                for param in &mut ctor.parameters {
                    rename_in_type(&mut param.ty, &renames);
                }
            }
            for method in &mut client.methods {
                for param in &mut method.parameters {
                    rename_in_type(&mut param.ty, &renames);
                }
                rename_in_envelope(method, &renames);
            }
        }
    }

    namer.finish()
}

fn rename_in_envelope(method: &mut gosdk_codemodel::Method, renames: &HashMap<String, String>) {
    let envelope = &mut method.response_envelope;
    if let Some(result) = &mut envelope.result {
        match result {
            ResultKind::Model { model, .. } => {
                if let Some(new_name) = renames.get(model) {
                    *model = new_name.clone();
                }
            }
            ResultKind::Polymorphic { interface, .. } => {
                if let Some(new_name) = renames.get(interface) {
                    *interface = new_name.clone();
                }
            }
            ResultKind::Monomorphic { ty, .. } => rename_in_type(ty, renames),
            ResultKind::Any { http_status_code_type, .. } => {
                for ty in http_status_code_type.values_mut() {
                    rename_in_type(ty, renames);
                }
            }
            ResultKind::Binary { .. } | ResultKind::HeadAsBoolean { .. } => {}
        }
    }
    for header in &mut envelope.headers {
        match header {
            gosdk_codemodel::HeaderResponse::Scalar { ty, .. }
            | gosdk_codemodel::HeaderResponse::Map { ty, .. } => rename_in_type(ty, renames),
        }
    }
}

/// Rewrites named-type references inside a wire type, recursing through
/// maps and slices.
fn rename_in_type(ty: &mut WireType, renames: &HashMap<String, String>) {
    match ty {
        WireType::Constant { name } | WireType::Interface { name } | WireType::Model { name } => {
            if let Some(new_name) = renames.get(name) {
                *name = new_name.clone();
            }
        }
        WireType::Map { value_type, .. } => rename_in_type(value_type, renames),
        WireType::Slice { element_type, .. } => rename_in_type(element_type, renames),
        WireType::Literal { literal } => rename_in_literal(literal, renames),
        _ => {}
    }
}

/// Rewrites the const-type reference and const-value name inside a literal.
fn rename_in_literal(literal: &mut gosdk_codemodel::Literal, renames: &HashMap<String, String>) {
    if let LiteralType::Constant { name } = &mut literal.ty {
        if let Some(new_name) = renames.get(name) {
            *name = new_name.clone();
        }
        // constant-typed literals hold the Go name of the const value
        if let gosdk_codemodel::LiteralValue::Str(value) = &mut literal.value {
            if let Some(new_value) = renames.get(value) {
                *value = new_value.clone();
            }
        }
    }
}
