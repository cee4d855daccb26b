//! The code model: an in-memory abstraction over REST endpoints used to
//! drive Go source emission.
//!
//! The model is built once per run by an external adapter, normalized with
//! [`CodeModel::sort_content`], and treated as immutable for the remainder
//! of generation. All unions are closed enums matched exhaustively; an
//! unhandled variant is a compile error, not a runtime surprise.
//!
//! ## Module structure
//!
//! - `types`: the wire-type system (models, interfaces, constants, literals)
//! - `param`: client/method parameters and their transmission kinds
//! - `client`: clients, constructors, and method kinds
//! - `result`: method results and response envelopes
//! - `package`: the code model root, packages, and generation options

mod client;
mod package;
mod param;
mod result;
mod types;

pub use client::{
    Client, ClientAccessor, Constructor, FinalStateVia, HttpMethod, Method, MethodKind,
};
pub use package::{CodeModel, CodeModelKind, Info, Module, Options, Package};
pub use param::{
    BodyFormat, CollectionFormat, Parameter, ParameterKind, ParameterLocation, ParameterStyle,
};
pub use result::{HeaderResponse, ResponseEnvelope, ResultFormat, ResultKind, SerdeFormat};
pub use types::{
    BytesEncoding, ConstantKind, ConstantType, ConstantValue, Docs, FieldAnnotations,
    InterfaceType, Literal, LiteralType, LiteralValue, Model, ModelAnnotations, ModelField,
    PolymorphicCase, PolymorphicInfo, ScalarKind, StructField, StructType, TimeFormat, UsageFlags,
    WireType, XmlInfo,
};
