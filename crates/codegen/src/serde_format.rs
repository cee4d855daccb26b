//! Wire-format resolution for models.
//!
//! A model's wire format (JSON vs. XML) is determined by how it's reached
//! from client methods: request bodies and response results carry the
//! format, and everything transitively reachable from them inherits it.
//! The index is computed in one pass over the whole code model up front;
//! lookups afterwards are pure and order-independent. The index is owned by
//! the generation run, never shared process-wide.

use std::collections::HashMap;

use gosdk_codemodel::{
    BodyFormat, Model, Package, ParameterKind, ResultFormat, ResultKind, SerdeFormat, WireType,
};
use tracing::debug;

/// The model-name → wire-format index for one package.
#[derive(Debug)]
pub struct SerdeFormatIndex {
    formats: HashMap<String, SerdeFormat>,
}

impl SerdeFormatIndex {
    /// Pass one: walk every wire-reachable root (body parameters, response
    /// results) to every leaf, fixing each model's format.
    pub fn build(pkg: &Package) -> Self {
        let mut formats = HashMap::new();

        for client in &pkg.clients {
            for method in &client.methods {
                for param in &method.parameters {
                    let format = match &param.kind {
                        ParameterKind::Body { format }
                        | ParameterKind::PartialBody { format, .. } => match format {
                            BodyFormat::Json => SerdeFormat::Json,
                            BodyFormat::Xml => SerdeFormat::Xml,
                            BodyFormat::Text | BodyFormat::Binary => continue,
                        },
                        _ => continue,
                    };
                    walk(pkg, &param.ty, format, &mut formats);
                }

                match &method.response_envelope.result {
                    Some(ResultKind::Any { http_status_code_type, format, .. }) => {
                        if let Some(format) = result_format(*format) {
                            for ty in http_status_code_type.values() {
                                walk(pkg, ty, format, &mut formats);
                            }
                        }
                    }
                    Some(ResultKind::Model { model, format, .. }) => {
                        walk(pkg, &WireType::Model { name: model.clone() }, *format, &mut formats);
                    }
                    Some(ResultKind::Monomorphic { ty, format, .. }) => {
                        if let Some(format) = result_format(*format) {
                            walk(pkg, ty, format, &mut formats);
                        }
                    }
                    Some(ResultKind::Polymorphic { interface, .. }) => {
                        // polymorphic payloads are always JSON
                        walk(
                            pkg,
                            &WireType::Interface { name: interface.clone() },
                            SerdeFormat::Json,
                            &mut formats,
                        );
                    }
                    Some(ResultKind::Binary { .. })
                    | Some(ResultKind::HeadAsBoolean { .. })
                    | None => {}
                }
            }
        }

        SerdeFormatIndex { formats }
    }

    /// Pass two: pure lookup. Models unreachable from any method default to
    /// JSON, a policy choice for dead schemas rather than a derived fact.
    pub fn format_for(&self, model: &Model) -> SerdeFormat {
        match self.formats.get(&model.name) {
            Some(format) => *format,
            None => {
                debug!(model = %model.name, "model unreferenced by any method, defaulting to JSON");
                SerdeFormat::Json
            }
        }
    }
}

fn result_format(format: ResultFormat) -> Option<SerdeFormat> {
    match format {
        ResultFormat::Json => Some(SerdeFormat::Json),
        ResultFormat::Xml => Some(SerdeFormat::Xml),
        ResultFormat::Text => None,
    }
}

/// Recursively fixes the format of every model reachable from `ty`.
fn walk(pkg: &Package, ty: &WireType, format: SerdeFormat, formats: &mut HashMap<String, SerdeFormat>) {
    match ty.unwrap_collection() {
        WireType::Interface { name } => {
            if let Some(iface) = pkg.interface(name) {
                walk(pkg, &WireType::Model { name: iface.root_type.clone() }, format, formats);
                for case in &iface.possible_types {
                    walk(pkg, &WireType::Model { name: case.name.clone() }, format, formats);
                }
            }
        }
        WireType::Model { name } => {
            if formats.contains_key(name) {
                // already processed, don't recurse again
                return;
            }
            formats.insert(name.clone(), format);
            if let Some(model) = pkg.model(name) {
                for field in &model.fields {
                    walk(pkg, &field.ty, format, formats);
                }
            }
        }
        _ => {}
    }
}
