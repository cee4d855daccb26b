//! The code model root: module, packages, and generation options.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::result::ResponseEnvelope;
use crate::types::{ConstantType, InterfaceType, Model, StructType};

/// The service flavor the code model represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeModelKind {
    /// Management-plane clients. Gets a client factory.
    Management,
    /// Data-plane clients.
    DataPlane,
}

/// Top-level info about the input source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
}

/// Global options for a generation run. Most values come from the host's
/// configuration; the whole struct is fixed before generation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Header text emitted at the top of every file. Usually contains
    /// license and copyright info.
    pub header_text: Option<String>,

    /// When true the generated JSON unmarshallers fail on fields absent from
    /// the model's field list instead of silently dropping them.
    pub disallow_unknown_fields: bool,

    /// Emits Go `any` types as `[]byte` containing raw JSON.
    pub raw_json_as_bytes: bool,

    /// Emit slice element types by value (e.g. `[]string` not `[]*string`).
    pub slice_elements_by_value: bool,

    /// Whether the client factory gathers the union of every client's
    /// constructor parameters (true) or only their common intersection.
    pub factory_gather_all_params: bool,

    /// Overrides the minimum core-library version written to the module
    /// manifest. Must be a valid semantic version.
    pub core_version: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            header_text: None,
            disallow_unknown_fields: false,
            raw_json_as_bytes: false,
            slice_elements_by_value: false,
            factory_gather_all_params: true,
            core_version: None,
        }
    }
}

/// The Go module receiving the generated packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The module's identity, e.g. `github.com/contoso/widgets`.
    pub identity: String,

    /// The module's release version, written to the version constants file.
    pub version: String,
}

impl Module {
    /// The package name derived from the module identity: the path's leaf
    /// with any major version suffix removed.
    pub fn package_name(&self) -> &str {
        let identity = self
            .identity
            .rsplit_once('/')
            .map_or(self.identity.as_str(), |(head, leaf)| {
                // a trailing /vN segment is a version suffix, not a package
                let is_version = leaf.len() > 1
                    && leaf.starts_with('v')
                    && leaf[1..].chars().all(|c| c.is_ascii_digit());
                if is_version { head } else { leaf }
            });
        identity.rsplit_once('/').map_or(identity, |(_, leaf)| leaf)
    }
}

/// A Go package and the content emitted into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// The package name.
    pub name: String,

    #[serde(default)]
    pub constants: Vec<ConstantType>,

    #[serde(default)]
    pub interfaces: Vec<InterfaceType>,

    #[serde(default)]
    pub models: Vec<Model>,

    /// Options and parameter-group struct definitions.
    #[serde(default)]
    pub param_groups: Vec<StructType>,

    #[serde(default)]
    pub clients: Vec<Client>,
}

impl Package {
    /// Looks up a model definition by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Looks up an interface definition by name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceType> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Looks up a const type definition by name.
    pub fn constant(&self, name: &str) -> Option<&ConstantType> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Iterates every response envelope in the package, one per method.
    pub fn response_envelopes(&self) -> impl Iterator<Item = &ResponseEnvelope> {
        self.clients
            .iter()
            .flat_map(|c| c.methods.iter())
            .map(|m| &m.response_envelope)
    }
}

/// The in-memory tree fully describing what to emit. Built once per run by
/// an external adapter, normalized with [`CodeModel::sort_content`], and
/// treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeModel {
    pub info: Info,

    #[serde(rename = "type")]
    pub kind: CodeModelKind,

    pub options: Options,

    pub module: Module,

    pub packages: Vec<Package>,
}

impl CodeModel {
    /// The single deterministic normalization pass: sorts every top-level
    /// list alphabetically by name so emission order is stable across runs.
    ///
    /// Constant values are deliberately left in declaration order; that
    /// order is surfaced by the generated values accessors.
    pub fn sort_content(&mut self) {
        for pkg in &mut self.packages {
            pkg.constants.sort_by(|a, b| a.name.cmp(&b.name));

            pkg.interfaces.sort_by(|a, b| a.name.cmp(&b.name));
            for iface in &mut pkg.interfaces {
                iface.possible_types.sort_by(|a, b| a.name.cmp(&b.name));
            }

            pkg.models.sort_by(|a, b| a.name.cmp(&b.name));
            for model in &mut pkg.models {
                model.fields.sort_by(|a, b| a.name.cmp(&b.name));
            }

            pkg.param_groups.sort_by(|a, b| a.name.cmp(&b.name));
            for group in &mut pkg.param_groups {
                group.fields.sort_by(|a, b| a.name.cmp(&b.name));
            }

            pkg.clients.sort_by(|a, b| a.name.cmp(&b.name));
            for client in &mut pkg.clients {
                client.methods.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
    }
}
