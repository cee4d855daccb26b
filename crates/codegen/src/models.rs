//! Model emission: struct definitions and their serde methods.
//!
//! Each model gets its Go struct plus, unless annotated otherwise, a
//! marshaller/unmarshaller pair. The per-field emission strategy is keyed
//! on the field's type variant and annotations; the most intricate path is
//! the staged decode for nested collections of discriminated types.

use gosdk_codemodel::{
    BytesEncoding, CodeModel, Model, ModelField, Package, ScalarKind, SerdeFormat, WireType,
};
use tracing::debug;

use crate::errors::{CodegenError, Result};
use crate::helpers::{
    comment, content_preamble, format_doc_comment, format_literal_value, star, CORE_MODULE,
    CORE_RUNTIME_MODULE, CORE_TO_MODULE,
};
use crate::imports::ImportManager;
use crate::serde_format::SerdeFormatIndex;

/// The generated models file and its companion serde file.
#[derive(Debug)]
pub struct ModelsSerde {
    pub models: String,
    pub serde: String,
}

/// Creates the content for the models file and the models serde file.
pub fn generate_models(code_model: &CodeModel, pkg: &Package) -> Result<ModelsSerde> {
    let formats = SerdeFormatIndex::build(pkg);

    let mut model_imports = ImportManager::new();
    let mut serde_imports = ImportManager::new();
    let mut model_text = content_preamble(code_model, &pkg.name);

    // model generation runs first as it can add imports to the list
    let mut defs = Vec::new();
    for model in &pkg.models {
        defs.push(build_model_def(code_model, pkg, model, &formats, &mut model_imports, &mut serde_imports)?);
    }

    model_text.push_str(&model_imports.text());

    let mut needs_populate = false;
    let mut needs_unpopulate = false;
    let mut needs_populate_byte_array = false;
    let mut needs_populate_any = false;
    let mut serde_body = String::new();

    for def in &mut defs {
        model_text.push_str(&def.struct_text);

        def.methods.sort_by(|a, b| a.name.cmp(&b.name));
        for method in &def.methods {
            if !method.desc.is_empty() {
                model_text.push_str(&comment(&method.desc, "// "));
            }
            model_text.push_str(&method.text);
        }

        def.serde_methods.sort_by(|a, b| a.name.cmp(&b.name));
        for method in &def.serde_methods {
            if !method.desc.is_empty() {
                serde_body.push_str(&comment(&method.desc, "// "));
            }
            serde_body.push_str(&method.text);
        }
        if !def.serde_methods.is_empty() {
            needs_populate = true;
            needs_unpopulate = true;
        }
        if def.has_json_byte_array {
            needs_populate_byte_array = true;
        }
        if def.has_any {
            needs_populate_any = true;
        }
    }

    if needs_populate {
        serde_body.push_str("func populate(m map[string]any, k string, v any) {\n");
        serde_body.push_str("\tif v == nil {\n");
        serde_body.push_str("\t\treturn\n");
        serde_body.push_str("\t} else if core.IsNullValue(v) {\n");
        serde_body.push_str("\t\tm[k] = nil\n");
        serde_body.push_str("\t} else if !reflect.ValueOf(v).IsNil() {\n");
        serde_body.push_str("\t\tm[k] = v\n");
        serde_body.push_str("\t}\n");
        serde_body.push_str("}\n\n");
    }
    if needs_populate_any {
        serde_body.push_str("func populateAny(m map[string]any, k string, v any) {\n");
        serde_body.push_str("\tif v == nil {\n");
        serde_body.push_str("\t\treturn\n");
        serde_body.push_str("\t} else if core.IsNullValue(v) {\n");
        serde_body.push_str("\t\tm[k] = nil\n");
        serde_body.push_str("\t} else {\n");
        serde_body.push_str("\t\tm[k] = v\n");
        serde_body.push_str("\t}\n");
        serde_body.push_str("}\n\n");
    }
    if needs_populate_byte_array {
        serde_imports.add(CORE_RUNTIME_MODULE, None);
        serde_body.push_str(
            "func populateByteArray(m map[string]any, k string, b []byte, f runtime.Base64Encoding) {\n",
        );
        serde_body.push_str("\tif core.IsNullValue(b) {\n");
        serde_body.push_str("\t\tm[k] = nil\n");
        serde_body.push_str("\t} else if len(b) == 0 {\n");
        serde_body.push_str("\t\treturn\n");
        serde_body.push_str("\t} else {\n");
        serde_body.push_str("\t\tm[k] = runtime.EncodeByteArray(b, f)\n");
        serde_body.push_str("\t}\n");
        serde_body.push_str("}\n\n");
    }
    if needs_unpopulate {
        serde_imports.add("fmt", None);
        serde_body.push_str("func unpopulate(data json.RawMessage, fn string, v any) error {\n");
        serde_body.push_str("\tif data == nil {\n");
        serde_body.push_str("\t\treturn nil\n");
        serde_body.push_str("\t}\n");
        serde_body.push_str("\tif err := json.Unmarshal(data, v); err != nil {\n");
        serde_body.push_str("\t\treturn fmt.Errorf(\"struct field %s: %v\", fn, err)\n");
        serde_body.push_str("\t}\n");
        serde_body.push_str("\treturn nil\n");
        serde_body.push_str("}\n\n");
    }

    let mut serde_text = String::new();
    if !serde_body.is_empty() {
        serde_text = content_preamble(code_model, &pkg.name);
        serde_text.push_str(&serde_imports.text());
        serde_text.push_str(&serde_body);
    }

    Ok(ModelsSerde { models: model_text, serde: serde_text })
}

/// A generated method attached to a model.
#[derive(Debug)]
struct ModelMethod {
    name: String,
    desc: String,
    text: String,
}

#[derive(Debug)]
struct ModelDef {
    struct_text: String,
    methods: Vec<ModelMethod>,
    serde_methods: Vec<ModelMethod>,
    has_json_byte_array: bool,
    has_any: bool,
}

fn build_model_def(
    code_model: &CodeModel,
    pkg: &Package,
    model: &Model,
    formats: &SerdeFormatIndex,
    model_imports: &mut ImportManager,
    serde_imports: &mut ImportManager,
) -> Result<ModelDef> {
    let format = formats.format_for(model);
    let mut def = ModelDef {
        struct_text: struct_text(model, format),
        methods: Vec::new(),
        serde_methods: Vec::new(),
        has_json_byte_array: false,
        has_any: false,
    };

    for field in &model.fields {
        model_imports.add_for_type(&field.ty);
        if matches!(field.ty, WireType::Any) {
            def.has_any = true;
        }
    }

    if format == SerdeFormat::Xml && model.polymorphic.is_none() {
        if !model.annotations.omit_serde_methods {
            serde_imports.add("encoding/xml", None);
            let mut needs_datetime = false;
            let mut byte_array = false;
            for field in &model.fields {
                serde_imports.add_for_type(&field.ty);
                match &field.ty {
                    WireType::Time { .. } => needs_datetime = true,
                    WireType::EncodedBytes { .. } => byte_array = true,
                    _ => {}
                }
            }
            let has_wrapper = model.xml.as_ref().is_some_and(|x| x.wrapper.is_some());
            let has_slices = model.fields.iter().any(|f| matches!(f.ty, WireType::Slice { .. }));
            // the additional-properties wrapper type has its own unmarshaller
            let needs_dict = model.fields.iter().any(|f| {
                matches!(f.ty, WireType::Map { .. }) && !f.annotations.is_additional_properties
            });

            // XML marshallers differ enough from JSON that an alias-struct
            // technique is used instead of the objectMap approach
            if needs_datetime || has_wrapper || has_slices || byte_array {
                generate_xml_marshaller(model, &mut def, serde_imports);
                if needs_datetime || byte_array {
                    generate_xml_unmarshaller(model, &mut def, serde_imports);
                }
            } else if needs_dict {
                generate_xml_unmarshaller(model, &mut def, serde_imports);
            }
        }
        return Ok(def);
    }

    if let Some(poly) = &model.polymorphic {
        // marker methods for the whole hierarchy
        let mut iface_name = Some(poly.interface.clone());
        while let Some(name) = iface_name {
            let iface = pkg.interface(&name).ok_or_else(|| {
                CodegenError::Internal(format!("model {} references unknown interface {name}", model.name))
            })?;
            generate_discriminator_marker_method(pkg, iface, model, &mut def)?;
            iface_name = iface.parent.clone();
        }
    }

    for field in &model.fields {
        if matches!(field.ty, WireType::EncodedBytes { .. }) {
            def.has_json_byte_array = true;
        }
    }

    if !model.annotations.omit_serde_methods {
        serde_imports.add("reflect", None);
        serde_imports.add(CORE_MODULE, None);
        generate_json_marshaller(model, &mut def, serde_imports);
        generate_json_unmarshaller(code_model, model, &mut def, serde_imports);
    } else {
        debug!(model = %model.name, "serde methods omitted by annotation");
    }

    Ok(def)
}

/// Emits the Go struct definition for a model.
fn struct_text(model: &Model, format: SerdeFormat) -> String {
    let mut text = format_doc_comment(&model.docs);
    text.push_str(&format!("type {} struct {{\n", model.name));

    // group fields as required, optional, then read-only
    let mut fields: Vec<&ModelField> = model.fields.iter().collect();
    fields.sort_by_key(|f| {
        if f.annotations.required {
            0
        } else if f.annotations.read_only {
            2
        } else {
            1
        }
    });

    let mut first = true;
    for field in fields {
        if !field.docs.is_empty() {
            if !first {
                // an extra new-line between commented fields
                text.push('\n');
            }
            let doc = format_doc_comment(&field.docs);
            for line in doc.lines() {
                text.push_str(&format!("\t{line}\n"));
            }
        }

        let type_name = match &field.ty {
            // for literal fields the underlying type name is used
            WireType::Literal { literal } => literal.ty.declaration(),
            other => other.declaration(None),
        };

        // only XML uses struct tags; JSON goes through custom serde methods
        let mut tag = String::new();
        if format == SerdeFormat::Xml && !field.annotations.is_additional_properties {
            tag = format!(" `xml:\"{}\"`", xml_serialization(field, false));
        }

        text.push_str(&format!(
            "\t{} {}{}{}\n",
            field.name,
            star(field.by_value),
            type_name,
            tag
        ));
        first = false;
    }

    text.push_str("}\n\n");
    text
}

/// The serialized name used in an XML struct tag.
pub fn xml_serialization(field: &ModelField, is_response_envelope: bool) -> String {
    let mut serialization = field.serialized_name.clone();
    if let Some(xml) = &field.xml {
        if let Some(name) = &xml.name {
            serialization = name.clone();
        } else if xml.text {
            // character data, not a node
            serialization = ",chardata".to_string();
        }
        if xml.attribute {
            serialization.push_str(",attr");
            return serialization;
        }
    }
    if let WireType::Slice { element_type, .. } = &field.ty {
        let mut inner = element_type.declaration(None);
        if let Some(name) = field.xml.as_ref().and_then(|x| x.name.as_deref()) {
            inner = name.to_string();
        }
        // wrapped arrays nest the element name under the wrapper; response
        // envelopes unmarshal directly so no unwrapping is added there
        if let Some(wraps) = field.xml.as_ref().and_then(|x| x.wraps.as_deref()) {
            if !is_response_envelope {
                serialization.push('>');
                serialization.push_str(wraps);
            } else {
                serialization = inner;
            }
        } else {
            serialization = inner;
        }
    }
    serialization
}

/// Generates the interface marker method for a polymorphic model.
fn generate_discriminator_marker_method(
    pkg: &Package,
    iface: &gosdk_codemodel::InterfaceType,
    model: &Model,
    def: &mut ModelDef,
) -> Result<()> {
    let root_name = &iface.root_type;
    let receiver = model.receiver();
    let method_name = format!("Get{root_name}");

    let mut text = format!(
        "func ({receiver} *{}) {method_name}() *{root_name} {{",
        model.name
    );
    if *root_name == model.name {
        // the marker is on the root itself, just return the receiver
        text.push_str(&format!(" return {receiver} }}\n\n"));
    } else {
        // return an instance of the root type populated from the receiver
        let root = pkg.model(root_name).ok_or_else(|| {
            CodegenError::Internal(format!(
                "interface {} references unknown root type {root_name}",
                iface.name
            ))
        })?;
        text.push_str(&format!("\n\treturn &{root_name}{{\n"));
        for field in &root.fields {
            text.push_str(&format!("\t\t{}: {receiver}.{},\n", field.name, field.name));
        }
        text.push_str("\t}\n}\n\n");
    }

    def.methods.push(ModelMethod {
        name: method_name.clone(),
        desc: format!(
            "{method_name} implements the {} interface for type {}.",
            iface.name, model.name
        ),
        text,
    });
    Ok(())
}

fn generate_json_marshaller(model: &Model, def: &mut ModelDef, imports: &mut ImportManager) {
    if model.polymorphic.is_none() && model.fields.is_empty() {
        // plain types without content don't need a custom marshaller
        return;
    }
    imports.add("encoding/json", None);
    let receiver = model.receiver();
    let mut text = format!(
        "func ({receiver} {}) MarshalJSON() ([]byte, error) {{\n",
        model.name
    );
    text.push_str("\tobjectMap := make(map[string]any)\n");
    text.push_str(&json_marshaller_body(model, &receiver, imports));
    text.push_str("\treturn json.Marshal(objectMap)\n");
    text.push_str("}\n\n");
    def.serde_methods.push(ModelMethod {
        name: "MarshalJSON".to_string(),
        desc: format!(
            "MarshalJSON implements the json.Marshaller interface for type {}.",
            model.name
        ),
        text,
    });
}

fn json_marshaller_body(model: &Model, receiver: &str, imports: &mut ImportManager) -> String {
    let mut text = String::new();
    let mut addl_props: Option<(&ModelField, &WireType, bool)> = None;

    for field in &model.fields {
        if let WireType::Map { value_type, by_value } = &field.ty {
            if field.annotations.is_additional_properties {
                addl_props = Some((field, value_type, *by_value));
                continue;
            }
        }

        let sn = &field.serialized_name;
        let access = format!("{receiver}.{}", field.name);

        if field.annotations.is_discriminator {
            if let Some(default) = &field.default_value {
                text.push_str(&format!(
                    "\tobjectMap[\"{sn}\"] = {}\n",
                    format_literal_value(default, false)
                ));
            } else {
                // no fixed discriminator value: emit the stored value to
                // support server-known-but-client-unknown variants
                text.push_str(&format!("\tobjectMap[\"{sn}\"] = {access}\n"));
            }
        } else if let WireType::EncodedBytes { encoding } = &field.ty {
            imports.add(CORE_RUNTIME_MODULE, None);
            text.push_str(&format!(
                "\tpopulateByteArray(objectMap, \"{sn}\", {access}, runtime.Base64{}Format)\n",
                bytes_encoding(*encoding)
            ));
        } else if let WireType::Slice { element_type, by_value } = &field.ty {
            if let WireType::Time { format, .. } = element_type.as_ref() {
                let element_ptr = star(*by_value);
                text.push_str(&format!(
                    "\taux := make([]{element_ptr}{adapter}, len({access}), len({access}))\n",
                    adapter = format.adapter_name()
                ));
                text.push_str(&format!("\tfor i := 0; i < len({access}); i++ {{\n"));
                text.push_str(&format!(
                    "\t\taux[i] = ({element_ptr}{adapter})({access}[i])\n",
                    adapter = format.adapter_name()
                ));
                text.push_str("\t}\n");
                text.push_str(&format!("\tpopulate(objectMap, \"{sn}\", aux)\n"));
            } else {
                text.push_str(&format!("\tpopulate(objectMap, \"{sn}\", {access})\n"));
            }
        } else if let WireType::Literal { literal } = &field.ty {
            text.push_str(&format!(
                "\tobjectMap[\"{sn}\"] = {}\n",
                format_literal_value(literal, false)
            ));
        } else if matches!(field.ty, WireType::RawJson) {
            text.push_str(&format!(
                "\tpopulate(objectMap, \"{sn}\", json.RawMessage({access}))\n"
            ));
        } else if let WireType::Scalar { ty, encode_as_string: true } = &field.ty {
            imports.add("strconv", None);
            text.push_str(&string_encoded_marshal(field, *ty, &access, sn));
        } else {
            if let Some(default) = &field.default_value {
                imports.add(CORE_TO_MODULE, None);
                text.push_str(&format!(
                    "\tif {access} == nil {{\n\t\t{access} = to.Ptr({})\n\t}}\n",
                    format_literal_value(default, false)
                ));
            }
            let populate = match &field.ty {
                WireType::Time { format, .. } => format!("populate{}", format.helper_suffix()),
                WireType::Any => "populateAny".to_string(),
                _ => "populate".to_string(),
            };
            text.push_str(&format!("\t{populate}(objectMap, \"{sn}\", {access})\n"));
        }
    }

    if let Some((field, value_type, _)) = addl_props {
        // additional properties merge into the object map last
        text.push_str(&format!("\tif {receiver}.{} != nil {{\n", field.name));
        text.push_str(&format!(
            "\t\tfor key, val := range {receiver}.{} {{\n",
            field.name
        ));
        let assignment = match value_type {
            WireType::Time { format, .. } => {
                format!("(*{})(val)", format.adapter_name())
            }
            _ => "val".to_string(),
        };
        text.push_str(&format!("\t\t\tobjectMap[key] = {assignment}\n"));
        text.push_str("\t\t}\n");
        text.push_str("\t}\n");
    }
    text
}

fn string_encoded_marshal(field: &ModelField, ty: ScalarKind, access: &str, sn: &str) -> String {
    let value = if field.by_value {
        access.to_string()
    } else {
        format!("*{access}")
    };
    let formatted = match ty {
        ScalarKind::Bool => format!("strconv.FormatBool({value})"),
        ScalarKind::Float32 | ScalarKind::Float64 => {
            format!("strconv.FormatFloat(float64({value}), 'f', -1, 64)")
        }
        ScalarKind::Uint8 | ScalarKind::Uint16 | ScalarKind::Uint32 | ScalarKind::Uint64 => {
            format!("strconv.FormatUint(uint64({value}), 10)")
        }
        _ => format!("strconv.FormatInt(int64({value}), 10)"),
    };
    if field.by_value {
        format!("\tobjectMap[\"{sn}\"] = {formatted}\n")
    } else {
        format!("\tif {access} != nil {{\n\t\tobjectMap[\"{sn}\"] = {formatted}\n\t}}\n")
    }
}

fn generate_json_unmarshaller(
    code_model: &CodeModel,
    model: &Model,
    def: &mut ModelDef,
    imports: &mut ImportManager,
) {
    // a derived type might not add any new fields; skip the unmarshaller as
    // it's not necessary
    if model.fields.is_empty() {
        return;
    }
    imports.add("encoding/json", None);
    imports.add("fmt", None);
    let receiver = model.receiver();
    let mut text = format!(
        "func ({receiver} *{}) UnmarshalJSON(data []byte) error {{\n",
        model.name
    );
    text.push_str("\tvar rawMsg map[string]json.RawMessage\n");
    text.push_str("\tif err := json.Unmarshal(data, &rawMsg); err != nil {\n");
    text.push_str(&format!(
        "\t\treturn fmt.Errorf(\"unmarshalling type %T: %v\", {receiver}, err)\n"
    ));
    text.push_str("\t}\n");
    text.push_str(&json_unmarshaller_body(code_model, model, &receiver, imports));
    text.push_str("}\n\n");
    def.serde_methods.push(ModelMethod {
        name: "UnmarshalJSON".to_string(),
        desc: format!(
            "UnmarshalJSON implements the json.Unmarshaller interface for type {}.",
            model.name
        ),
        text,
    });
}

fn json_unmarshaller_body(
    code_model: &CodeModel,
    model: &Model,
    receiver: &str,
    imports: &mut ImportManager,
) -> String {
    let mut text = String::new();
    text.push_str("\tfor key, val := range rawMsg {\n");
    text.push_str("\t\tvar err error\n");
    text.push_str("\t\tswitch key {\n");

    let mut addl_props: Option<(&ModelField, &WireType, bool)> = None;
    for field in &model.fields {
        if let WireType::Map { value_type, by_value } = &field.ty {
            if field.annotations.is_additional_properties {
                addl_props = Some((field, value_type, *by_value));
                continue;
            }
        }
        let sn = &field.serialized_name;
        let name = &field.name;
        let access = format!("{receiver}.{name}");
        text.push_str(&format!("\t\tcase \"{sn}\":\n"));

        if field.ty.has_discriminator_interface() {
            text.push_str(&discriminator_unmarshaller(field, receiver));
        } else if let WireType::Time { format, .. } = &field.ty {
            text.push_str(&format!(
                "\t\t\terr = unpopulate{}(val, \"{name}\", &{access})\n",
                format.helper_suffix()
            ));
        } else if let WireType::Slice { element_type, by_value } = &field.ty {
            if let WireType::Time { format, .. } = element_type.as_ref() {
                imports.add("time", None);
                let element_ptr = star(*by_value);
                text.push_str(&format!(
                    "\t\t\tvar aux []{element_ptr}{}\n",
                    format.adapter_name()
                ));
                text.push_str(&format!("\t\t\terr = unpopulate(val, \"{name}\", &aux)\n"));
                text.push_str("\t\t\tfor _, au := range aux {\n");
                text.push_str(&format!(
                    "\t\t\t\t{access} = append({access}, ({element_ptr}time.Time)(au))\n"
                ));
                text.push_str("\t\t\t}\n");
            } else {
                text.push_str(&format!("\t\t\terr = unpopulate(val, \"{name}\", &{access})\n"));
            }
        } else if let WireType::EncodedBytes { encoding } = &field.ty {
            imports.add(CORE_RUNTIME_MODULE, None);
            text.push_str(&format!(
                "\t\t\terr = runtime.DecodeByteArray(string(val), &{access}, runtime.Base64{}Format)\n",
                bytes_encoding(*encoding)
            ));
        } else if matches!(field.ty, WireType::RawJson) {
            text.push_str(&format!("\t\t\t{access} = val\n"));
        } else if let WireType::Scalar { ty, encode_as_string: true } = &field.ty {
            imports.add("strconv", None);
            text.push_str(&string_encoded_unmarshal(field, *ty, &access));
        } else {
            text.push_str(&format!("\t\t\terr = unpopulate(val, \"{name}\", &{access})\n"));
        }
        text.push_str("\t\t\tdelete(rawMsg, key)\n");
    }

    if let Some((field, value_type, by_value)) = addl_props {
        text.push_str("\t\tdefault:\n");
        text.push_str(&addl_props_unmarshal(field, value_type, by_value, receiver, imports));
    } else if code_model.options.disallow_unknown_fields {
        text.push_str("\t\tdefault:\n");
        text.push_str(&format!(
            "\t\t\terr = fmt.Errorf(\"unmarshalling type %T, unknown field %q\", {receiver}, key)\n"
        ));
    }

    text.push_str("\t\t}\n");
    text.push_str("\t\tif err != nil {\n");
    text.push_str(&format!(
        "\t\t\treturn fmt.Errorf(\"unmarshalling type %T: %v\", {receiver}, err)\n"
    ));
    text.push_str("\t\t}\n");
    text.push_str("\t}\n");
    text.push_str("\treturn nil\n");
    text
}

fn addl_props_unmarshal(
    field: &ModelField,
    value_type: &WireType,
    by_value: bool,
    receiver: &str,
    imports: &mut ImportManager,
) -> String {
    let access = format!("{receiver}.{}", field.name);
    let mut text = format!("\t\t\tif {access} == nil {{\n");
    text.push_str(&format!("\t\t\t\t{access} = {}{{}}\n", field.ty.declaration(None)));
    text.push_str("\t\t\t}\n");
    text.push_str("\t\t\tif val != nil {\n");

    let reference = if by_value { "" } else { "&" };
    let mut aux_type = value_type.declaration(None);
    let mut assignment = format!("{reference}aux");
    if let WireType::Time { format, .. } = value_type {
        imports.add("time", None);
        aux_type = format.adapter_name().to_string();
        assignment = format!("(*time.Time)({assignment})");
    }
    text.push_str(&format!("\t\t\t\tvar aux {aux_type}\n"));
    text.push_str("\t\t\t\terr = json.Unmarshal(val, &aux)\n");
    text.push_str(&format!("\t\t\t\t{access}[key] = {assignment}\n"));
    text.push_str("\t\t\t}\n");
    text.push_str("\t\t\tdelete(rawMsg, key)\n");
    text
}

fn string_encoded_unmarshal(field: &ModelField, ty: ScalarKind, access: &str) -> String {
    let go_type = ty.as_str();
    let bit_size = ty.bit_size().unwrap_or("64");
    let mut text = String::from("\t\t\tvar aux string\n");
    text.push_str(&format!("\t\t\terr = unpopulate(val, \"{}\", &aux)\n", field.name));
    text.push_str("\t\t\tif err == nil && aux != \"\" {\n");
    match ty {
        ScalarKind::Bool => {
            text.push_str("\t\t\t\tvar parsed bool\n");
            text.push_str("\t\t\t\tparsed, err = strconv.ParseBool(aux)\n");
        }
        ScalarKind::Float32 | ScalarKind::Float64 => {
            text.push_str("\t\t\t\tvar parsed float64\n");
            text.push_str(&format!(
                "\t\t\t\tparsed, err = strconv.ParseFloat(aux, {bit_size})\n"
            ));
        }
        ScalarKind::Uint8 | ScalarKind::Uint16 | ScalarKind::Uint32 | ScalarKind::Uint64 => {
            text.push_str("\t\t\t\tvar parsed uint64\n");
            text.push_str(&format!(
                "\t\t\t\tparsed, err = strconv.ParseUint(aux, 10, {bit_size})\n"
            ));
        }
        _ => {
            text.push_str("\t\t\t\tvar parsed int64\n");
            text.push_str(&format!(
                "\t\t\t\tparsed, err = strconv.ParseInt(aux, 10, {bit_size})\n"
            ));
        }
    }
    text.push_str("\t\t\t\tif err == nil {\n");
    if field.by_value {
        text.push_str(&format!("\t\t\t\t\t{access} = {go_type}(parsed)\n"));
    } else {
        text.push_str(&format!("\t\t\t\t\tv := {go_type}(parsed)\n"));
        text.push_str(&format!("\t\t\t\t\t{access} = &v\n"));
    }
    text.push_str("\t\t\t\t}\n");
    text.push_str("\t\t\t}\n");
    text
}

/// The text for unmarshalling a field holding a discriminated type,
/// possibly nested inside collections.
fn discriminator_unmarshaller(field: &ModelField, receiver: &str) -> String {
    let indent = "\t\t\t";
    let name = &field.name;

    // the simple, non-nested cases
    match &field.ty {
        WireType::Interface { name: iface } => {
            return format!("{indent}{receiver}.{name}, err = unmarshal{iface}(val)\n");
        }
        WireType::Slice { element_type, .. } => {
            if let WireType::Interface { name: iface } = element_type.as_ref() {
                return format!("{indent}{receiver}.{name}, err = unmarshal{iface}Array(val)\n");
            }
        }
        WireType::Map { value_type, .. } => {
            if let WireType::Interface { name: iface } = value_type.as_ref() {
                return format!("{indent}{receiver}.{name}, err = unmarshal{iface}Map(val)\n");
            }
        }
        _ => {}
    }

    // nested case (e.g. [][]I, map[string]map[string]I): first decode the
    // raw shape, then populate the typed shape one nesting level at a time
    let raw_var = format!("{}Raw", field.serialized_name);
    let mut text = format!(
        "{indent}var {raw_var} {}\n",
        discriminator_type_name(&field.ty, true)
    );
    text.push_str(&format!(
        "{indent}if err = json.Unmarshal(val, &{raw_var}); err != nil {{\n"
    ));
    text.push_str(&format!("{indent}\treturn err\n{indent}}}\n"));

    let final_var = field.serialized_name.clone();
    let final_ctor = match &field.ty {
        WireType::Slice { .. } => {
            format!("make({}, len({raw_var}))", discriminator_type_name(&field.ty, false))
        }
        // must be a map
        _ => format!("{}{{}}", discriminator_type_name(&field.ty, false)),
    };
    text.push_str(&format!("{indent}{final_var} := {final_ctor}\n"));

    text.push_str(&populate_discriminator(
        &field.ty,
        receiver,
        &raw_var,
        &final_var,
        indent,
        1,
    ));

    text.push_str(&format!("{indent}{receiver}.{name} = {final_var}\n"));
    text
}

/// Constructs the type name for a nested discriminated type.
///
/// With `raw`, the declaration stops one level above the leaf so the leaf
/// decodes as `json.RawMessage` (e.g. `map[string][]json.RawMessage`);
/// otherwise the fully-typed declaration is produced.
fn discriminator_type_name(ty: &WireType, raw: bool) -> String {
    match ty {
        WireType::Slice { element_type, .. } => {
            if !raw || !matches!(element_type.as_ref(), WireType::Interface { .. }) {
                return format!("[]{}", discriminator_type_name(element_type, raw));
            }
        }
        WireType::Map { value_type, .. } => {
            if !raw || !matches!(value_type.as_ref(), WireType::Interface { .. }) {
                return format!("map[string]{}", discriminator_type_name(value_type, raw));
            }
        }
        _ => {}
    }
    if raw {
        "json.RawMessage".to_string()
    } else {
        ty.declaration(None)
    }
}

/// Recursively constructs the loops that populate a nested discriminated
/// collection from its raw decoded shape. `nesting` drives the loop
/// variable names (`i1`, `k2`, `v2`, …) so inner levels never shadow
/// outer ones.
fn populate_discriminator(
    ty: &WireType,
    receiver: &str,
    raw_src: &str,
    dest: &str,
    indent: &str,
    nesting: usize,
) -> String {
    let mut text = String::new();
    let iface_name;
    let helper_kind;

    match ty {
        WireType::Slice { element_type, .. } => {
            if !matches!(element_type.as_ref(), WireType::Interface { .. }) {
                if nesting > 1 {
                    // at nesting level 1 the destination was already created
                    text.push_str(&format!(
                        "{indent}{dest} = make({}, len({raw_src}))\n",
                        discriminator_type_name(ty, false)
                    ));
                }
                text.push_str(&format!("{indent}for i{nesting} := range {raw_src} {{\n"));
                let inner_src = format!("{raw_src}[i{nesting}]");
                let inner_dest = format!("{dest}[i{nesting}]");
                text.push_str(&populate_discriminator(
                    element_type,
                    receiver,
                    &inner_src,
                    &inner_dest,
                    &format!("{indent}\t"),
                    nesting + 1,
                ));
                text.push_str(&format!("{indent}}}\n"));
                return text;
            }
            // one level above the leaf
            iface_name = element_type.declaration(None);
            helper_kind = "Array";
        }
        WireType::Map { value_type, .. } => {
            if !matches!(value_type.as_ref(), WireType::Interface { .. }) {
                if nesting > 1 {
                    text.push_str(&format!(
                        "{indent}{dest} = {}{{}}\n",
                        discriminator_type_name(ty, false)
                    ));
                }
                text.push_str(&format!(
                    "{indent}for k{nesting}, v{nesting} := range {raw_src} {{\n"
                ));
                let inner_src = format!("v{nesting}");
                let inner_dest = format!("{dest}[k{nesting}]");
                text.push_str(&populate_discriminator(
                    value_type,
                    receiver,
                    &inner_src,
                    &inner_dest,
                    &format!("{indent}\t"),
                    nesting + 1,
                ));
                text.push_str(&format!("{indent}}}\n"));
                return text;
            }
            iface_name = value_type.declaration(None);
            helper_kind = "Map";
        }
        _ => return text,
    }

    text.push_str(&format!(
        "{indent}{dest}, err = unmarshal{iface_name}{helper_kind}({raw_src})\n"
    ));
    text.push_str(&format!(
        "{indent}if err != nil {{\n{indent}\treturn fmt.Errorf(\"unmarshalling type %T: %v\", {receiver}, err)\n{indent}}}\n"
    ));
    text
}

fn generate_xml_marshaller(model: &Model, def: &mut ModelDef, imports: &mut ImportManager) {
    let receiver = model.receiver();
    let mut text = format!(
        "func ({receiver} {}) MarshalXML(enc *xml.Encoder, start xml.StartElement) error {{\n",
        model.name
    );
    if let Some(wrapper) = model.xml.as_ref().and_then(|x| x.wrapper.as_deref()) {
        text.push_str(&format!("\tstart.Name.Local = \"{wrapper}\"\n"));
    }
    text.push_str(&alias_type(model, &receiver, true));
    for field in &model.fields {
        if matches!(field.ty, WireType::Slice { .. }) {
            text.push_str(&format!("\tif {receiver}.{} != nil {{\n", field.name));
            text.push_str(&format!("\t\taux.{} = &{receiver}.{}\n", field.name, field.name));
            text.push_str("\t}\n");
        } else if let WireType::EncodedBytes { encoding } = &field.ty {
            imports.add(CORE_RUNTIME_MODULE, None);
            text.push_str(&format!("\tif {receiver}.{} != nil {{\n", field.name));
            text.push_str(&format!(
                "\t\tencoded{name} := runtime.EncodeByteArray({receiver}.{name}, runtime.Base64{enc}Format)\n",
                name = field.name,
                enc = bytes_encoding(*encoding)
            ));
            text.push_str(&format!("\t\taux.{name} = &encoded{name}\n", name = field.name));
            text.push_str("\t}\n");
        }
    }
    text.push_str("\treturn enc.EncodeElement(aux, start)\n");
    text.push_str("}\n\n");
    def.serde_methods.push(ModelMethod {
        name: "MarshalXML".to_string(),
        desc: format!(
            "MarshalXML implements the xml.Marshaller interface for type {}.",
            model.name
        ),
        text,
    });
}

fn generate_xml_unmarshaller(model: &Model, def: &mut ModelDef, imports: &mut ImportManager) {
    let receiver = model.receiver();
    let mut text = format!(
        "func ({receiver} *{}) UnmarshalXML(dec *xml.Decoder, start xml.StartElement) error {{\n",
        model.name
    );
    text.push_str(&alias_type(model, &receiver, false));
    text.push_str("\tif err := dec.DecodeElement(aux, &start); err != nil {\n");
    text.push_str("\t\treturn err\n");
    text.push_str("\t}\n");
    for field in &model.fields {
        if matches!(field.ty, WireType::Time { .. }) {
            imports.add("time", None);
            text.push_str(&format!(
                "\t{receiver}.{name} = (*time.Time)(aux.{name})\n",
                name = field.name
            ));
        } else if field.annotations.is_additional_properties || matches!(field.ty, WireType::Map { .. }) {
            text.push_str(&format!(
                "\t{receiver}.{name} = (map[string]*string)(aux.{name})\n",
                name = field.name
            ));
        } else if let WireType::EncodedBytes { encoding } = &field.ty {
            imports.add(CORE_RUNTIME_MODULE, None);
            text.push_str(&format!("\tif aux.{} != nil {{\n", field.name));
            text.push_str(&format!(
                "\t\tif err := runtime.DecodeByteArray(*aux.{name}, &{receiver}.{name}, runtime.Base64{enc}Format); err != nil {{\n",
                name = field.name,
                enc = bytes_encoding(*encoding)
            ));
            text.push_str("\t\t\treturn err\n");
            text.push_str("\t\t}\n");
            text.push_str("\t}\n");
        }
    }
    text.push_str("\treturn nil\n");
    text.push_str("}\n\n");
    def.serde_methods.push(ModelMethod {
        name: "UnmarshalXML".to_string(),
        desc: format!(
            "UnmarshalXML implements the xml.Unmarshaller interface for type {}.",
            model.name
        ),
        text,
    });
}

/// The shadow struct used by the XML serde methods: the original type
/// aliased to drop its methods, with adapter-typed stand-ins for fields
/// whose declarative mapping can't express the wire format.
fn alias_type(model: &Model, receiver: &str, for_marshal: bool) -> String {
    let mut text = format!("\ttype alias {}\n", model.name);
    text.push_str("\taux := &struct {\n");
    text.push_str("\t\t*alias\n");
    for field in &model.fields {
        let sn = xml_serialization(field, false);
        if let WireType::Time { format, .. } = &field.ty {
            text.push_str(&format!(
                "\t\t{} *{} `xml:\"{sn}\"`\n",
                field.name,
                format.adapter_name()
            ));
        } else if field.annotations.is_additional_properties || matches!(field.ty, WireType::Map { .. }) {
            text.push_str(&format!(
                "\t\t{} additionalProperties `xml:\"{sn}\"`\n",
                field.name
            ));
        } else if matches!(field.ty, WireType::Slice { .. }) {
            text.push_str(&format!(
                "\t\t{} *{} `xml:\"{sn}\"`\n",
                field.name,
                field.ty.declaration(None)
            ));
        } else if matches!(field.ty, WireType::EncodedBytes { .. }) {
            text.push_str(&format!("\t\t{} *string `xml:\"{sn}\"`\n", field.name));
        }
    }
    text.push_str("\t}{\n");
    let reference = if for_marshal {
        format!("&{receiver}")
    } else {
        receiver.to_string()
    };
    text.push_str(&format!("\t\talias: (*alias)({reference}),\n"));
    if for_marshal {
        for field in &model.fields {
            if let WireType::Time { format, .. } = &field.ty {
                text.push_str(&format!(
                    "\t\t{name}: (*{adapter})({receiver}.{name}),\n",
                    name = field.name,
                    adapter = format.adapter_name()
                ));
            }
        }
    }
    text.push_str("\t}\n");
    text
}

fn bytes_encoding(encoding: BytesEncoding) -> &'static str {
    match encoding {
        BytesEncoding::Std => "Std",
        BytesEncoding::Url => "URL",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gosdk_codemodel::{
        CodeModelKind, Docs, FieldAnnotations, Info, InterfaceType, Literal, LiteralType,
        LiteralValue, Model, ModelAnnotations, Module, Options, PolymorphicCase, PolymorphicInfo,
        TimeFormat, UsageFlags, XmlInfo,
    };

    fn code_model(disallow_unknown: bool) -> CodeModel {
        CodeModel {
            info: Info { title: "test".to_string() },
            kind: CodeModelKind::DataPlane,
            options: Options { disallow_unknown_fields: disallow_unknown, ..Options::default() },
            module: Module {
                identity: "github.com/contoso/aviary".to_string(),
                version: "0.1.0".to_string(),
            },
            packages: Vec::new(),
        }
    }

    fn field(name: &str, sn: &str, ty: WireType, required: bool) -> ModelField {
        ModelField {
            name: name.to_string(),
            docs: Docs::default(),
            ty,
            by_value: false,
            serialized_name: sn.to_string(),
            annotations: FieldAnnotations { required, ..FieldAnnotations::default() },
            default_value: None,
            xml: None,
        }
    }

    fn model(name: &str, fields: Vec<ModelField>) -> Model {
        Model {
            name: name.to_string(),
            docs: Docs::default(),
            fields,
            annotations: ModelAnnotations::default(),
            usage: UsageFlags::INPUT | UsageFlags::OUTPUT,
            xml: None,
            polymorphic: None,
        }
    }

    fn package(models: Vec<Model>, interfaces: Vec<InterfaceType>) -> Package {
        Package {
            name: "aviary".to_string(),
            constants: Vec::new(),
            interfaces,
            models,
            param_groups: Vec::new(),
            clients: Vec::new(),
        }
    }

    #[test]
    fn required_string_and_optional_datetime_round_trip_strategies() {
        let widget = model(
            "Widget",
            vec![
                field(
                    "Created",
                    "created",
                    WireType::Time { format: TimeFormat::DateTimeRfc3339, utc: true },
                    false,
                ),
                field("Name", "name", WireType::String, true),
            ],
        );
        let pkg = package(vec![widget], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();

        assert!(out.models.contains("type Widget struct {"));
        // required field is grouped before the optional one in the struct
        let name_pos = out.models.find("\tName *string\n").unwrap();
        let created_pos = out.models.find("\tCreated *time.Time\n").unwrap();
        assert!(name_pos < created_pos);

        assert!(out.serde.contains("func (w Widget) MarshalJSON() ([]byte, error) {"));
        assert!(out.serde.contains("populateDateTimeRFC3339(objectMap, \"created\", w.Created)"));
        assert!(out.serde.contains("populate(objectMap, \"name\", w.Name)"));
        assert!(out.serde.contains("func (w *Widget) UnmarshalJSON(data []byte) error {"));
        assert!(out.serde.contains("err = unpopulateDateTimeRFC3339(val, \"Created\", &w.Created)"));
        assert!(out.serde.contains("err = unpopulate(val, \"Name\", &w.Name)"));
        // shared helpers are emitted once
        assert!(out.serde.contains("func populate(m map[string]any, k string, v any) {"));
        assert!(out.serde.contains("func unpopulate(data json.RawMessage, fn string, v any) error {"));
    }

    #[test]
    fn unknown_field_policy_controls_the_default_arm() {
        let widget = model("Widget", vec![field("Name", "name", WireType::String, true)]);

        let strict = generate_models(&code_model(true), &package(vec![widget.clone()], Vec::new())).unwrap();
        assert!(strict.serde.contains("unknown field %q"));

        let lax = generate_models(&code_model(false), &package(vec![widget], Vec::new())).unwrap();
        assert!(!lax.serde.contains("unknown field %q"));
    }

    #[test]
    fn nested_map_of_slice_uses_staged_decode_with_indexed_loops() {
        let aviary = model(
            "Aviary",
            vec![field(
                "Residents",
                "residents",
                WireType::Map {
                    value_type: Box::new(WireType::Slice {
                        element_type: Box::new(WireType::Interface {
                            name: "BirdClassification".to_string(),
                        }),
                        by_value: true,
                    }),
                    by_value: true,
                },
                false,
            )],
        );
        let pkg = package(vec![aviary], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();

        // stage one: decode into the raw shape; the slice level stays
        // undecoded because the array helper consumes it whole
        assert!(out.serde.contains("var residentsRaw map[string]json.RawMessage"));
        assert!(out.serde.contains("if err = json.Unmarshal(val, &residentsRaw); err != nil {"));
        assert!(out.serde.contains("residents := map[string][]BirdClassification{}"));
        // stage two: depth-indexed population loop with the array helper at the leaf
        assert!(out.serde.contains("for k1, v1 := range residentsRaw {"));
        assert!(out.serde.contains("residents[k1], err = unmarshalBirdClassificationArray(v1)"));
        assert!(out.serde.contains("a.Residents = residents"));
    }

    #[test]
    fn doubly_nested_slice_population() {
        let aviary = model(
            "Flocks",
            vec![field(
                "Layers",
                "layers",
                WireType::Slice {
                    element_type: Box::new(WireType::Slice {
                        element_type: Box::new(WireType::Slice {
                            element_type: Box::new(WireType::Interface {
                                name: "BirdClassification".to_string(),
                            }),
                            by_value: true,
                        }),
                        by_value: true,
                    }),
                    by_value: true,
                },
                false,
            )],
        );
        let pkg = package(vec![aviary], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();

        assert!(out.serde.contains("var layersRaw [][]json.RawMessage"));
        assert!(out.serde.contains("layers := make([][][]BirdClassification, len(layersRaw))"));
        assert!(out.serde.contains("for i1 := range layersRaw {"));
        // the inner level allocates its own destination before looping
        assert!(out.serde.contains("layers[i1] = make([][]BirdClassification, len(layersRaw[i1]))"));
        assert!(out.serde.contains("for i2 := range layersRaw[i1] {"));
        assert!(out.serde.contains("layers[i1][i2], err = unmarshalBirdClassificationArray(layersRaw[i1][i2])"));
    }

    #[test]
    fn discriminator_with_literal_emits_fixed_value_and_fallback_uses_stored() {
        let iface = InterfaceType {
            name: "BirdClassification".to_string(),
            docs: Docs::default(),
            discriminator_field: "birdType".to_string(),
            possible_types: vec![
                PolymorphicCase { name: "Bird".to_string(), discriminator_value: None },
                PolymorphicCase {
                    name: "Eagle".to_string(),
                    discriminator_value: Some(Literal {
                        ty: LiteralType::String,
                        value: LiteralValue::Str("eagle".to_string()),
                    }),
                },
            ],
            parent: None,
            root_type: "Bird".to_string(),
        };

        let mut disc_field = field(
            "BirdType",
            "birdType",
            WireType::Literal {
                literal: Literal {
                    ty: LiteralType::String,
                    value: LiteralValue::Str("eagle".to_string()),
                },
            },
            true,
        );
        disc_field.annotations.is_discriminator = true;
        disc_field.default_value = Some(Literal {
            ty: LiteralType::String,
            value: LiteralValue::Str("eagle".to_string()),
        });

        let mut eagle = model("Eagle", vec![disc_field]);
        eagle.polymorphic = Some(PolymorphicInfo {
            interface: "BirdClassification".to_string(),
            discriminator_value: Some(Literal {
                ty: LiteralType::String,
                value: LiteralValue::Str("eagle".to_string()),
            }),
        });

        let mut root_field = field("BirdType", "birdType", WireType::String, true);
        root_field.annotations.is_discriminator = true;
        let mut bird = model("Bird", vec![root_field]);
        bird.polymorphic = Some(PolymorphicInfo {
            interface: "BirdClassification".to_string(),
            discriminator_value: None,
        });

        let pkg = package(vec![bird, eagle], vec![iface]);
        let out = generate_models(&code_model(false), &pkg).unwrap();

        // fixed value on the concrete type
        assert!(out.serde.contains("objectMap[\"birdType\"] = \"eagle\""));
        // the root has no fixed value, so the stored value is used for
        // forward compatibility with unknown variants
        assert!(out.serde.contains("objectMap[\"birdType\"] = b.BirdType"));
        // marker methods exist for both members of the hierarchy
        assert!(out.models.contains("func (b *Bird) GetBird() *Bird { return b }"));
        assert!(out.models.contains("func (e *Eagle) GetBird() *Bird {"));
    }

    #[test]
    fn additional_properties_merge_after_named_fields() {
        let mut addl = field(
            "AdditionalProperties",
            "",
            WireType::Map { value_type: Box::new(WireType::String), by_value: false },
            false,
        );
        addl.annotations.is_additional_properties = true;
        let widget = model("Widget", vec![addl, field("Name", "name", WireType::String, true)]);
        let pkg = package(vec![widget], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();

        let named = out.serde.find("populate(objectMap, \"name\", w.Name)").unwrap();
        let merged = out.serde.find("for key, val := range w.AdditionalProperties {").unwrap();
        assert!(named < merged);

        // unmarshal gathers unrecognized keys into the map
        assert!(out.serde.contains("if w.AdditionalProperties == nil {"));
        assert!(out.serde.contains("w.AdditionalProperties[key] = &aux"));
    }

    #[test]
    fn byte_fields_route_through_base64_helpers() {
        let widget = model(
            "Widget",
            vec![field("Blob", "blob", WireType::EncodedBytes { encoding: BytesEncoding::Url }, false)],
        );
        let pkg = package(vec![widget], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();

        assert!(out.serde.contains("populateByteArray(objectMap, \"blob\", w.Blob, runtime.Base64URLFormat)"));
        assert!(out.serde.contains("err = runtime.DecodeByteArray(string(val), &w.Blob, runtime.Base64URLFormat)"));
        assert!(out.serde.contains("func populateByteArray(m map[string]any, k string, b []byte, f runtime.Base64Encoding) {"));
    }

    #[test]
    fn string_encoded_scalars_use_strconv() {
        let widget = model(
            "Widget",
            vec![field(
                "Count",
                "count",
                WireType::Scalar { ty: ScalarKind::Int32, encode_as_string: true },
                false,
            )],
        );
        let pkg = package(vec![widget], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();

        assert!(out.serde.contains("objectMap[\"count\"] = strconv.FormatInt(int64(*w.Count), 10)"));
        assert!(out.serde.contains("parsed, err = strconv.ParseInt(aux, 10, 32)"));
        assert!(out.serde.contains("v := int32(parsed)"));
    }

    #[test]
    fn xml_models_with_time_fields_use_the_alias_struct() {
        let mut expires = field(
            "Expires",
            "Expires",
            WireType::Time { format: TimeFormat::DateTimeRfc1123, utc: true },
            false,
        );
        expires.xml = Some(XmlInfo::default());
        let mut widget = model("AccessPolicy", vec![expires]);
        widget.usage = UsageFlags::INPUT | UsageFlags::OUTPUT;

        // reach the model through an XML body parameter
        use gosdk_codemodel::{
            BodyFormat, Client, HttpMethod, Method, MethodKind, Parameter, ParameterKind,
            ParameterLocation, ParameterStyle, ResponseEnvelope,
        };
        let pkg = Package {
            name: "storage".to_string(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            models: vec![widget],
            param_groups: Vec::new(),
            clients: vec![Client {
                name: "ContainersClient".to_string(),
                docs: Docs::default(),
                parameters: Vec::new(),
                constructors: Vec::new(),
                methods: vec![Method {
                    name: "SetAccessPolicy".to_string(),
                    docs: Docs::default(),
                    kind: MethodKind::Method,
                    http_method: HttpMethod::Put,
                    http_path: "/container".to_string(),
                    http_status_codes: vec![200],
                    parameters: vec![Parameter {
                        name: "policy".to_string(),
                        docs: Docs::default(),
                        ty: WireType::Model { name: "AccessPolicy".to_string() },
                        style: ParameterStyle::Required,
                        by_value: true,
                        location: ParameterLocation::Method,
                        group: None,
                        kind: ParameterKind::Body { format: BodyFormat::Xml },
                    }],
                    response_envelope: ResponseEnvelope {
                        name: "SetAccessPolicyResponse".to_string(),
                        docs: Docs::default(),
                        result: None,
                        headers: Vec::new(),
                    },
                    options_group: None,
                }],
                client_accessors: Vec::new(),
            }],
        };

        let out = generate_models(&code_model(false), &pkg).unwrap();
        assert!(out.serde.contains("func (a AccessPolicy) MarshalXML(enc *xml.Encoder, start xml.StartElement) error {"));
        assert!(out.serde.contains("type alias AccessPolicy"));
        assert!(out.serde.contains("Expires *dateTimeRFC1123 `xml:\"Expires\"`"));
        assert!(out.serde.contains("Expires: (*dateTimeRFC1123)(a.Expires),"));
        assert!(out.serde.contains("func (a *AccessPolicy) UnmarshalXML(dec *xml.Decoder, start xml.StartElement) error {"));
        assert!(out.serde.contains("a.Expires = (*time.Time)(aux.Expires)"));
        // XML structs carry tags
        assert!(out.models.contains("Expires *time.Time `xml:\"Expires\"`"));
    }

    #[test]
    fn omit_serde_methods_skips_generation() {
        let mut widget = model("Widget", vec![field("Name", "name", WireType::String, true)]);
        widget.annotations.omit_serde_methods = true;
        let pkg = package(vec![widget], Vec::new());
        let out = generate_models(&code_model(false), &pkg).unwrap();
        assert!(out.models.contains("type Widget struct {"));
        assert!(!out.serde.contains("MarshalJSON"));
    }
}
