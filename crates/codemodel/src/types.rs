//! The Go wire-type system.
//!
//! This module defines the closed set of types that can travel over the wire:
//! - [`WireType`]: the tagged union over all wire types
//! - [`Model`] / [`InterfaceType`] / [`ConstantType`]: named type definitions
//! - [`Literal`]: fixed wire values
//!
//! Named kinds inside [`WireType`] (`Constant`, `Interface`, `Model`) are
//! references by name; the definitions themselves are owned exactly once by
//! the containing package. This keeps the type graph acyclic even for
//! discriminated-type hierarchies, where a polymorphic model and its
//! interface refer to each other.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Doc-comment content attached to a type, field, or parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docs {
    /// The high level summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Detailed description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Docs {
    /// Returns true if there is no summary and no description.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.description.is_none()
    }
}

/// A type that goes across the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WireType {
    /// The Go `any` type.
    Any,

    /// Reference to a const type defined in the owning package.
    Constant { name: String },

    /// A byte slice that's base64 encoded.
    EncodedBytes { encoding: BytesEncoding },

    /// Reference to the Go interface type for a discriminated type.
    Interface { name: String },

    /// A literal value (e.g. "foo", 123, true).
    Literal { literal: Literal },

    /// A Go map. The key is always a string.
    Map {
        /// The type of values in the map.
        value_type: Box<WireType>,
        /// Indicates if the map's value type is pointer-to-type or not.
        by_value: bool,
    },

    /// Reference to a model or polymorphic model defined in the owning package.
    Model { name: String },

    /// A type defined in an external package (e.g. `io.ReadCloser`).
    Qualified {
        /// The type name minus any package qualifier (e.g. `ReadCloser`).
        name: String,
        /// The full name of the module to import (e.g. `io`).
        module: String,
    },

    /// A byte slice containing raw JSON.
    #[serde(rename = "rawJSON")]
    RawJson,

    /// A Go scalar type.
    Scalar {
        #[serde(rename = "type")]
        ty: ScalarKind,
        /// Indicates the value is sent/received as a string.
        encode_as_string: bool,
    },

    /// A Go slice.
    Slice {
        /// The element type for this slice.
        element_type: Box<WireType>,
        /// Indicates if the slice's element type is pointer-to-type or not.
        by_value: bool,
    },

    /// A Go string.
    String,

    /// A `time.Time` with a serde format specifier.
    Time { format: TimeFormat, utc: bool },
}

impl WireType {
    /// Returns the Go type declaration for this type.
    ///
    /// Any value in `pkg` is prefixed to named type references
    /// (e.g. `armfoo.Widget`). Map and slice declarations recurse into their
    /// value/element types, inserting a `*` for pointer-to-type entries.
    pub fn declaration(&self, pkg: Option<&str>) -> String {
        match self {
            WireType::Any => "any".to_string(),
            WireType::String => "string".to_string(),
            WireType::Constant { name } | WireType::Interface { name } | WireType::Model { name } => {
                match pkg {
                    Some(pkg) => format!("{pkg}.{name}"),
                    None => name.clone(),
                }
            }
            WireType::EncodedBytes { .. } | WireType::RawJson => "[]byte".to_string(),
            WireType::Literal { literal } => literal.ty.declaration(),
            WireType::Map { value_type, by_value } => {
                format!("map[string]{}{}", star(*by_value), value_type.declaration(pkg))
            }
            WireType::Qualified { name, module } => {
                // strip the module path to just the leaf package
                let leaf = match module.rfind('/') {
                    Some(idx) => &module[idx + 1..],
                    None => module.as_str(),
                };
                format!("{leaf}.{name}")
            }
            WireType::Scalar { ty, .. } => ty.as_str().to_string(),
            WireType::Slice { element_type, by_value } => {
                format!("[]{}{}", star(*by_value), element_type.declaration(pkg))
            }
            WireType::Time { .. } => "time.Time".to_string(),
        }
    }

    /// Returns the underlying map/slice value/element type.
    /// If this isn't a map or slice, `self` is returned.
    pub fn unwrap_collection(&self) -> &WireType {
        match self {
            WireType::Map { value_type, .. } => value_type.unwrap_collection(),
            WireType::Slice { element_type, .. } => element_type.unwrap_collection(),
            other => other,
        }
    }

    /// Returns true if this type is, or recursively contains, a reference to
    /// the interface type of a discriminated type.
    pub fn has_discriminator_interface(&self) -> bool {
        matches!(self.unwrap_collection(), WireType::Interface { .. })
    }
}

fn star(by_value: bool) -> &'static str {
    if by_value { "" } else { "*" }
}

/// The kinds of base64 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BytesEncoding {
    Std,
    #[serde(rename = "URL")]
    Url,
}

/// The supported Go scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Byte,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Rune,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl ScalarKind {
    /// The Go name for this scalar type.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Byte => "byte",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Rune => "rune",
            ScalarKind::Uint8 => "uint8",
            ScalarKind::Uint16 => "uint16",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Uint64 => "uint64",
        }
    }

    /// The bit size passed to `strconv` parse/format calls for this type.
    pub fn bit_size(self) -> Option<&'static str> {
        match self {
            ScalarKind::Int8 | ScalarKind::Uint8 => Some("8"),
            ScalarKind::Int16 | ScalarKind::Uint16 => Some("16"),
            ScalarKind::Int32 | ScalarKind::Uint32 | ScalarKind::Float32 => Some("32"),
            ScalarKind::Int64 | ScalarKind::Uint64 | ScalarKind::Float64 => Some("64"),
            _ => None,
        }
    }
}

/// The set of time serde formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// A date with no time component, e.g. `2006-01-02`.
    #[serde(rename = "dateType")]
    DateType,
    /// An RFC1123 date-time.
    #[serde(rename = "dateTimeRFC1123")]
    DateTimeRfc1123,
    /// An RFC3339 date-time.
    #[serde(rename = "dateTimeRFC3339")]
    DateTimeRfc3339,
    /// An RFC3339 time-of-day with no date component.
    #[serde(rename = "timeRFC3339")]
    TimeRfc3339,
    /// Seconds since the Unix epoch.
    #[serde(rename = "timeUnix")]
    TimeUnix,
}

impl TimeFormat {
    /// The name of the generated Go adapter type for this format.
    ///
    /// A raw `time.Time` is never marshalled directly; it's always converted
    /// through the matching adapter so the wire format is exact.
    pub fn adapter_name(self) -> &'static str {
        match self {
            TimeFormat::DateType => "dateType",
            TimeFormat::DateTimeRfc1123 => "dateTimeRFC1123",
            TimeFormat::DateTimeRfc3339 => "dateTimeRFC3339",
            TimeFormat::TimeRfc3339 => "timeRFC3339",
            TimeFormat::TimeUnix => "timeUnix",
        }
    }

    /// The adapter name with its leading character upper-cased, as used in
    /// the generated `populateX`/`unpopulateX` helper names.
    pub fn helper_suffix(self) -> &'static str {
        match self {
            TimeFormat::DateType => "DateType",
            TimeFormat::DateTimeRfc1123 => "DateTimeRFC1123",
            TimeFormat::DateTimeRfc3339 => "DateTimeRFC3339",
            TimeFormat::TimeRfc3339 => "TimeRFC3339",
            TimeFormat::TimeUnix => "TimeUnix",
        }
    }
}

/// The underlying type of a literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LiteralType {
    /// The literal is a value of the named const type.
    Constant { name: String },
    EncodedBytes { encoding: BytesEncoding },
    Scalar {
        #[serde(rename = "type")]
        ty: ScalarKind,
    },
    String,
    Time { format: TimeFormat },
}

impl LiteralType {
    /// Returns the Go type declaration for this literal type.
    pub fn declaration(&self) -> String {
        match self {
            LiteralType::Constant { name } => name.clone(),
            LiteralType::EncodedBytes { .. } => "[]byte".to_string(),
            LiteralType::Scalar { ty } => ty.as_str().to_string(),
            LiteralType::String => "string".to_string(),
            LiteralType::Time { .. } => "time.Time".to_string(),
        }
    }
}

/// A literal value and its underlying type.
///
/// For constant-typed literals the value holds the Go name of the const
/// value (e.g. `BirdTypeEagle`), not the wire string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    #[serde(rename = "type")]
    pub ty: LiteralType,
    pub value: LiteralValue,
}

/// The raw value carried by a [`Literal`] or [`ConstantValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A const type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantType {
    /// The const type name.
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// The underlying type of the const.
    #[serde(rename = "type")]
    pub ty: ConstantKind,

    /// The possible values, in declaration order. This order is the wire
    /// contract surfaced by the values accessor and is never re-sorted.
    pub values: Vec<ConstantValue>,

    /// The name of the generated func that returns the set of values.
    pub values_func_name: String,
}

/// The underlying type of a const.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantKind {
    Bool,
    Float32,
    Float64,
    Int32,
    Int64,
    String,
}

impl ConstantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstantKind::Bool => "bool",
            ConstantKind::Float32 => "float32",
            ConstantKind::Float64 => "float64",
            ConstantKind::Int32 => "int32",
            ConstantKind::Int64 => "int64",
            ConstantKind::String => "string",
        }
    }
}

/// A const value definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantValue {
    /// The const value's Go name (e.g. `ColorRed`).
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// The value sent over the wire.
    pub value: LiteralValue,
}

/// The Go interface type used for a discriminated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceType {
    /// The name of the interface (e.g. `BirdClassification`).
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// The name of the discriminator field in the payload (e.g. `birdType`).
    pub discriminator_field: String,

    /// The concrete type instances, in discriminator-value order.
    pub possible_types: Vec<PolymorphicCase>,

    /// The parent interface when discriminator hierarchies nest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// The "root" type of the hierarchy, used when no discriminator value
    /// matches. The root never carries a discriminator value of its own.
    pub root_type: String,
}

/// One concrete member of a discriminated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymorphicCase {
    /// The model name of the concrete type.
    pub name: String,

    /// The wire value that selects this type. `None` only for the root type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<Literal>,
}

bitflags! {
    /// Bit flags indicating how a model is used.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UsageFlags: u8 {
        /// The type is received over the wire.
        const INPUT = 1;
        /// The type is sent over the wire.
        const OUTPUT = 2;
    }
}

/// Additional settings for a model type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAnnotations {
    /// When true, serde methods will not be generated.
    pub omit_serde_methods: bool,

    /// Indicates the model should be converted into multipart/form data.
    pub multipart_form_data: bool,
}

/// Additional settings for a model field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnnotations {
    /// The field is required on input and will always be populated on output.
    pub required: bool,

    /// The field is read-only and will be populated on output only.
    pub read_only: bool,

    /// The field holds JSON additional properties.
    pub is_additional_properties: bool,

    /// The field is the discriminator for a discriminated type.
    pub is_discriminator: bool,
}

/// Metadata used for XML serde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlInfo {
    /// Element name to use instead of the default name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name propagated to the generated wrapper type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,

    /// Slices only: the name of the wrapped element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wraps: Option<String>,

    /// Value is an XML attribute.
    #[serde(default)]
    pub attribute: bool,

    /// Value is raw text (character data).
    #[serde(default)]
    pub text: bool,
}

/// Links a polymorphic model to its discriminated-type hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymorphicInfo {
    /// The name of the interface this type implements.
    pub interface: String,

    /// The wire value that indicates this type was sent. Root types carry
    /// no value; they are the fallback for unmatched values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<Literal>,
}

/// A struct that participates in serialization over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// The fields in this model. Can be empty.
    pub fields: Vec<ModelField>,

    #[serde(default)]
    pub annotations: ModelAnnotations,

    pub usage: UsageFlags,

    /// Any XML metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<XmlInfo>,

    /// Present when this model is a member of a discriminated type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polymorphic: Option<PolymorphicInfo>,
}

impl Model {
    /// The receiver name used for generated methods on this model.
    pub fn receiver(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase().to_string())
            .unwrap_or_default()
    }
}

/// A field within a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelField {
    /// The Go field name.
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    #[serde(rename = "type")]
    pub ty: WireType,

    /// Indicates if the field is pointer-to-type or not.
    pub by_value: bool,

    /// The name of the field as it's sent/received over the wire.
    pub serialized_name: String,

    #[serde(default)]
    pub annotations: FieldAnnotations,

    /// The value to send over the wire if one isn't specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Literal>,

    /// Any XML metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<XmlInfo>,
}

/// A vanilla struct definition, used for parameter groups and options types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    /// The fields in this struct. Can be empty.
    pub fields: Vec<StructField>,
}

/// A field definition within a [`StructType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    pub name: String,

    #[serde(default)]
    pub docs: Docs,

    #[serde(rename = "type")]
    pub ty: WireType,

    /// Indicates if the field is pointer-to-type or not.
    pub by_value: bool,
}
