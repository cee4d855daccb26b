//! Discriminated-type unmarshalling helpers.
//!
//! For every interface type that's actually referenced, directly or as the
//! leaf of a slice/map nesting, this generates the scalar, array, and map
//! unmarshaller functions the model serde methods call into.

use std::collections::BTreeSet;

use gosdk_codemodel::{CodeModel, LiteralType, Package, ResultKind, WireType};
use tracing::debug;

use crate::helpers::{content_preamble, format_literal_value};
use crate::imports::ImportManager;

/// Creates the content for the polymorphic helpers file, or the empty
/// string when the package has no referenced polymorphic types.
pub fn generate_polymorphic_helpers(code_model: &CodeModel, pkg: &Package) -> String {
    if pkg.interfaces.is_empty() {
        // no polymorphic types
        return String::new();
    }

    let mut scalars = BTreeSet::new();
    let mut arrays = BTreeSet::new();
    let mut maps = BTreeSet::new();

    // we know there are polymorphic types but not how they're used: as
    // plain fields, elements in a slice, or values in a map. types inside
    // maps/slices also need the scalar helper. for nested collections the
    // array/map choice follows the collection level just above the leaf,
    // which is the one the staged population loops hand to a helper.
    for model in &pkg.models {
        for field in &model.fields {
            track(&field.ty, &mut scalars, &mut arrays, &mut maps);
        }
    }

    for envelope in pkg.response_envelopes() {
        match &envelope.result {
            Some(ResultKind::Monomorphic { ty, .. }) => match ty {
                WireType::Map { value_type, .. } => {
                    track(value_type, &mut scalars, &mut arrays, &mut maps);
                }
                WireType::Slice { element_type, .. } => {
                    track(element_type, &mut scalars, &mut arrays, &mut maps);
                }
                _ => {}
            },
            Some(ResultKind::Polymorphic { interface, .. }) => {
                scalars.insert(interface.clone());
            }
            _ => {}
        }
    }

    if scalars.is_empty() && arrays.is_empty() && maps.is_empty() {
        // every discriminated type is unreferenced, nothing to emit
        debug!(package = %pkg.name, "polymorphic types defined but never referenced");
        return String::new();
    }

    let mut text = content_preamble(code_model, &pkg.name);
    let mut imports = ImportManager::new();
    imports.add("encoding/json", None);
    text.push_str(&imports.text());

    for iface in &pkg.interfaces {
        // scalar unmarshaller
        if scalars.contains(&iface.name) {
            text.push_str(&format!(
                "func unmarshal{name}(rawMsg json.RawMessage) ({name}, error) {{\n",
                name = iface.name
            ));
            text.push_str("\tif rawMsg == nil || string(rawMsg) == \"null\" {\n");
            text.push_str("\t\treturn nil, nil\n");
            text.push_str("\t}\n");
            text.push_str("\tvar m map[string]any\n");
            text.push_str("\tif err := json.Unmarshal(rawMsg, &m); err != nil {\n");
            text.push_str("\t\treturn nil, err\n");
            text.push_str("\t}\n");
            text.push_str(&format!("\tvar b {}\n", iface.name));
            text.push_str(&format!("\tswitch m[\"{}\"] {{\n", iface.discriminator_field));
            for case in &iface.possible_types {
                let Some(value) = &case.discriminator_value else {
                    // the root type has no discriminator value; it's the
                    // default arm below
                    continue;
                };
                let mut disc = format_literal_value(value, true);
                if matches!(value.ty, LiteralType::Constant { .. }) {
                    // enum discriminators compare as their string form
                    disc = format!("string({disc})");
                }
                text.push_str(&format!("\tcase {disc}:\n"));
                text.push_str(&format!("\t\tb = &{}{{}}\n", case.name));
            }
            text.push_str("\tdefault:\n");
            text.push_str(&format!("\t\tb = &{}{{}}\n", iface.root_type));
            text.push_str("\t}\n");
            text.push_str("\tif err := json.Unmarshal(rawMsg, b); err != nil {\n\t\treturn nil, err\n\t}\n");
            text.push_str("\treturn b, nil\n");
            text.push_str("}\n\n");
        }

        // array unmarshaller
        if arrays.contains(&iface.name) {
            text.push_str(&format!(
                "func unmarshal{name}Array(rawMsg json.RawMessage) ([]{name}, error) {{\n",
                name = iface.name
            ));
            text.push_str("\tif rawMsg == nil || string(rawMsg) == \"null\" {\n");
            text.push_str("\t\treturn nil, nil\n");
            text.push_str("\t}\n");
            text.push_str("\tvar rawMessages []json.RawMessage\n");
            text.push_str("\tif err := json.Unmarshal(rawMsg, &rawMessages); err != nil {\n");
            text.push_str("\t\treturn nil, err\n");
            text.push_str("\t}\n");
            text.push_str(&format!(
                "\tfArray := make([]{}, len(rawMessages))\n",
                iface.name
            ));
            text.push_str("\tfor index, rawMessage := range rawMessages {\n");
            text.push_str(&format!("\t\tf, err := unmarshal{}(rawMessage)\n", iface.name));
            text.push_str("\t\tif err != nil {\n");
            text.push_str("\t\t\treturn nil, err\n");
            text.push_str("\t\t}\n");
            text.push_str("\t\tfArray[index] = f\n");
            text.push_str("\t}\n");
            text.push_str("\treturn fArray, nil\n");
            text.push_str("}\n\n");
        }

        // map unmarshaller
        if maps.contains(&iface.name) {
            text.push_str(&format!(
                "func unmarshal{name}Map(rawMsg json.RawMessage) (map[string]{name}, error) {{\n",
                name = iface.name
            ));
            text.push_str("\tif rawMsg == nil || string(rawMsg) == \"null\" {\n");
            text.push_str("\t\treturn nil, nil\n");
            text.push_str("\t}\n");
            text.push_str("\tvar rawMessages map[string]json.RawMessage\n");
            text.push_str("\tif err := json.Unmarshal(rawMsg, &rawMessages); err != nil {\n");
            text.push_str("\t\treturn nil, err\n");
            text.push_str("\t}\n");
            text.push_str(&format!(
                "\tfMap := make(map[string]{}, len(rawMessages))\n",
                iface.name
            ));
            text.push_str("\tfor key, rawMessage := range rawMessages {\n");
            text.push_str(&format!("\t\tf, err := unmarshal{}(rawMessage)\n", iface.name));
            text.push_str("\t\tif err != nil {\n");
            text.push_str("\t\t\treturn nil, err\n");
            text.push_str("\t\t}\n");
            text.push_str("\t\tfMap[key] = f\n");
            text.push_str("\t}\n");
            text.push_str("\treturn fMap, nil\n");
            text.push_str("}\n\n");
        }
    }

    text
}

/// Records which unmarshaller helpers a type reference needs. The scalar
/// helper is always needed; the array/map helper is chosen by the wrapper
/// directly above the interface leaf.
fn track(
    ty: &WireType,
    scalars: &mut BTreeSet<String>,
    arrays: &mut BTreeSet<String>,
    maps: &mut BTreeSet<String>,
) {
    match ty {
        WireType::Interface { name } => {
            scalars.insert(name.clone());
        }
        WireType::Slice { element_type, .. } => match element_type.as_ref() {
            WireType::Interface { name } => {
                scalars.insert(name.clone());
                arrays.insert(name.clone());
            }
            inner => track(inner, scalars, arrays, maps),
        },
        WireType::Map { value_type, .. } => match value_type.as_ref() {
            WireType::Interface { name } => {
                scalars.insert(name.clone());
                maps.insert(name.clone());
            }
            inner => track(inner, scalars, arrays, maps),
        },
        _ => {}
    }
}
