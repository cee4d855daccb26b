//! Go source emission for the code model.
//!
//! Every generator is a pure function from (code-model subtree, options) to
//! text; the only mutable state is the per-file [`imports::ImportManager`].
//! No I/O happens here: output text is returned to the caller, and the few
//! idempotent files (`go.mod`, `version.go`) go through the [`host::Host`]
//! seam. A driver walks the package tree and decides where the returned
//! text lands; it may parallelize across packages since no state is shared
//! between files.
//!
//! ## Module structure
//!
//! - `errors`: the error taxonomy (invalid argument, internal, name collision)
//! - `naming`: stuttering-prefix trimming and collision detection
//! - `imports`: per-file import accumulation
//! - `serde_format`: the model-name → wire-format index
//! - `constants` / `interfaces` / `models` / `polymorphics`: type and serde emission
//! - `options` / `responses` / `clients` / `client_factory`: shape generators
//! - `time_helpers` / `xml_additional_props`: helper-file generators
//! - `gomod`: the idempotent module manifest and version constants

pub mod client_factory;
pub mod clients;
pub mod constants;
pub mod errors;
pub mod gomod;
pub mod helpers;
pub mod host;
pub mod imports;
pub mod interfaces;
pub mod models;
pub mod naming;
pub mod options;
pub mod polymorphics;
pub mod responses;
pub mod serde_format;
pub mod time_helpers;
pub mod xml_additional_props;

pub use client_factory::generate_client_factory;
pub use clients::generate_client;
pub use constants::generate_constants;
pub use errors::{CodegenError, Result};
pub use gomod::{generate_go_mod, generate_version_file, DEFAULT_CORE_VERSION};
pub use host::Host;
pub use imports::ImportManager;
pub use interfaces::generate_interfaces;
pub use models::{generate_models, ModelsSerde};
pub use naming::{apply_stutter_trim, trim_package_prefix, Namer};
pub use options::generate_options;
pub use polymorphics::generate_polymorphic_helpers;
pub use responses::{generate_responses, ResponsesSerde};
pub use serde_format::SerdeFormatIndex;
pub use time_helpers::{generate_time_helpers, Content, MarshallingRequirements};
pub use xml_additional_props::generate_xml_additional_props_helpers;
