//! Module manifest and version constants.
//!
//! Both files are idempotent across repeated runs: a hand-edited `go.mod`
//! is patched, never regenerated, and `version.go` is written exactly once.
//! All file access goes through the caller-supplied [`Host`].

use gosdk_codemodel::CodeModel;
use semver::Version;
use tracing::debug;

use crate::errors::{CodegenError, Result};
use crate::helpers::CORE_MODULE;
use crate::host::Host;

/// The minimum core-library version required by the generated code. Can be
/// overridden with [`gosdk_codemodel::Options::core_version`].
pub const DEFAULT_CORE_VERSION: &str = "1.3.0";

/// Creates or updates the `go.mod` file.
pub fn generate_go_mod(code_model: &CodeModel, host: &mut dyn Host) -> Result<()> {
    let identity = &code_model.module.identity;

    let version = match &code_model.options.core_version {
        Some(version) => {
            // beta and pseudo versions are fine, but it must parse
            Version::parse(version).map_err(|_| {
                CodegenError::InvalidArgument(format!(
                    "core version {version} must be in the format major.minor.patch[-beta.N]"
                ))
            })?;
            version.clone()
        }
        None => DEFAULT_CORE_VERSION.to_string(),
    };

    let require = format!("{CORE_MODULE} v{version}");
    if !host.exists("go.mod") {
        let mut text = format!("module {identity}\n\n");
        text.push_str("go 1.24.0\n\n");
        text.push_str(&format!("require {require}\n"));
        return host.write("go.mod", &text);
    }

    let mut existing = host.read("go.mod")?;

    // the module identity can change across major versions
    if !existing.lines().any(|line| line.trim() == format!("module {identity}")) {
        existing = existing
            .lines()
            .map(|line| {
                if line.starts_with("module ") {
                    format!("module {identity}")
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        if !existing.ends_with('\n') {
            existing.push('\n');
        }
    }

    // bump the core-library requirement only when it's older than required.
    // models-only modules might not depend on it at all.
    if let Some((existing_ver, span)) = find_core_requirement(&existing) {
        let specified = parse_semver(&version)?;
        if let Ok(current) = parse_semver(&existing_ver) {
            if current < specified {
                debug!(from = %existing_ver, to = %version, "updating core library requirement");
                existing.replace_range(span, &require);
            }
        }
    }

    host.write("go.mod", &existing)
}

/// Finds the core-library requirement in a manifest, returning the version
/// and the byte span of the whole `module vX.Y.Z` token pair.
fn find_core_requirement(text: &str) -> Option<(String, std::ops::Range<usize>)> {
    let start = text.find(CORE_MODULE)?;
    let rest = &text[start + CORE_MODULE.len()..];
    let rest_trimmed = rest.trim_start_matches([' ', '\t']);
    let ws = rest.len() - rest_trimmed.len();
    if !rest_trimmed.starts_with('v') {
        return None;
    }
    let version: String = rest_trimmed[1..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    let end = start + CORE_MODULE.len() + ws + 1 + version.len();
    Some((version, start..end))
}

fn parse_semver(version: &str) -> Result<Version> {
    Version::parse(version).map_err(|err| {
        CodegenError::InvalidArgument(format!("invalid semantic version {version}: {err}"))
    })
}

/// Creates the `version.go` file holding the module name and version
/// constants. Never overwritten once present.
pub fn generate_version_file(code_model: &CodeModel, package_name: &str, host: &mut dyn Host) -> Result<()> {
    if host.exists("version.go") {
        debug!("version.go already exists, leaving it untouched");
        return Ok(());
    }

    let mut text = crate::helpers::content_preamble(code_model, package_name);
    text.push_str("const (\n");
    text.push_str(&format!(
        "\tmoduleName    = \"{}\"\n",
        code_model.module.identity
    ));
    text.push_str(&format!(
        "\tmoduleVersion = \"v{}\"\n",
        code_model.module.version
    ));
    text.push_str(")\n");
    host.write("version.go", &text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::host::testing::MemoryHost;
    use gosdk_codemodel::{CodeModelKind, Info, Module, Options};

    fn code_model(core_version: Option<&str>) -> CodeModel {
        CodeModel {
            info: Info { title: "test".to_string() },
            kind: CodeModelKind::Management,
            options: Options { core_version: core_version.map(str::to_string), ..Options::default() },
            module: Module {
                identity: "github.com/contoso/widgets".to_string(),
                version: "1.2.0".to_string(),
            },
            packages: Vec::new(),
        }
    }

    #[test]
    fn fresh_go_mod_is_generated() {
        let mut host = MemoryHost::default();
        generate_go_mod(&code_model(None), &mut host).unwrap();
        let text = &host.files["go.mod"];
        assert!(text.starts_with("module github.com/contoso/widgets\n"));
        assert!(text.contains("require github.com/gosdk-tools/sdk-go/core v1.3.0\n"));
    }

    #[test]
    fn ill_formed_version_override_is_invalid_argument() {
        let mut host = MemoryHost::default();
        let err = generate_go_mod(&code_model(Some("not-a-version")), &mut host).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArgument(_)));
        assert!(host.files.is_empty());
    }

    #[test]
    fn existing_go_mod_keeps_newer_core_version() {
        let mut host = MemoryHost::default();
        host.files.insert(
            "go.mod".to_string(),
            "module github.com/contoso/widgets\n\ngo 1.24.0\n\nrequire github.com/gosdk-tools/sdk-go/core v2.0.0\n".to_string(),
        );
        generate_go_mod(&code_model(None), &mut host).unwrap();
        assert!(host.files["go.mod"].contains("core v2.0.0"));
    }

    #[test]
    fn existing_go_mod_bumps_older_core_version() {
        let mut host = MemoryHost::default();
        host.files.insert(
            "go.mod".to_string(),
            "module github.com/contoso/widgets\n\ngo 1.24.0\n\nrequire github.com/gosdk-tools/sdk-go/core v1.0.0\n".to_string(),
        );
        generate_go_mod(&code_model(Some("1.5.0")), &mut host).unwrap();
        assert!(host.files["go.mod"].contains("core v1.5.0"));
    }

    #[test]
    fn module_identity_is_replaced_on_major_version_change() {
        let mut host = MemoryHost::default();
        host.files.insert(
            "go.mod".to_string(),
            "module github.com/contoso/widgets/v2\n\ngo 1.24.0\n".to_string(),
        );
        generate_go_mod(&code_model(None), &mut host).unwrap();
        assert!(host.files["go.mod"].starts_with("module github.com/contoso/widgets\n"));
    }

    #[test]
    fn hand_edited_extras_survive_an_update() {
        let mut host = MemoryHost::default();
        host.files.insert(
            "go.mod".to_string(),
            "module github.com/contoso/widgets\n\ngo 1.24.0\n\nrequire github.com/gosdk-tools/sdk-go/core v1.0.0\n\nrequire github.com/stretchr/testify v1.9.0 // indirect\n".to_string(),
        );
        generate_go_mod(&code_model(None), &mut host).unwrap();
        let text = &host.files["go.mod"];
        assert!(text.contains("testify v1.9.0"));
        assert!(text.contains("core v1.3.0"));
    }

    #[test]
    fn version_file_is_written_once() {
        let mut host = MemoryHost::default();
        generate_version_file(&code_model(None), "widgets", &mut host).unwrap();
        let first = host.files["version.go"].clone();
        assert!(first.contains("moduleName    = \"github.com/contoso/widgets\""));
        assert!(first.contains("moduleVersion = \"v1.2.0\""));

        // hand-edit, then re-run: the edit survives
        host.files.insert("version.go".to_string(), "edited".to_string());
        generate_version_file(&code_model(None), "widgets", &mut host).unwrap();
        assert_eq!(host.files["version.go"], "edited");
    }
}
