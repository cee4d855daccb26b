//! Per-file import accumulation.

use gosdk_codemodel::WireType;

#[derive(Debug, Clone)]
struct ImportEntry {
    path: String,
    alias: Option<String>,
}

/// Tracks the packages one output file needs to import.
///
/// Accumulation is first-write-wins on duplicate paths, and the emitted
/// block is sorted ascending by path. An instance is scoped to exactly one
/// output file's generation and discarded afterwards.
#[derive(Debug, Default)]
pub struct ImportManager {
    imports: Vec<ImportEntry>,
}

impl ImportManager {
    pub fn new() -> Self {
        ImportManager::default()
    }

    /// Adds a package for importing if not already in the list.
    /// Accepts an optional package alias.
    pub fn add(&mut self, path: &str, alias: Option<&str>) {
        if self.imports.iter().any(|existing| existing.path == path) {
            return;
        }
        self.imports.push(ImportEntry {
            path: path.to_string(),
            alias: alias.map(str::to_string),
        });
    }

    /// Adds the import required by the specified type, if any, recursing
    /// through maps and slices to their leaves. Named types live in the
    /// package being generated and need no import; only qualified types
    /// pull one in.
    pub fn add_for_type(&mut self, ty: &WireType) {
        match ty {
            WireType::Map { value_type, .. } => self.add_for_type(value_type),
            WireType::Slice { element_type, .. } => self.add_for_type(element_type),
            WireType::Qualified { module, .. } => self.add(module, None),
            WireType::Time { .. } => self.add("time", None),
            _ => {}
        }
    }

    /// The number of packages in the list.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Returns the import list as Go source.
    pub fn text(&self) -> String {
        match self.imports.len() {
            0 => String::new(),
            1 => {
                let first = &self.imports[0];
                format!("import {}\"{}\"\n\n", alias_prefix(first), first.path)
            }
            _ => {
                let mut sorted = self.imports.clone();
                sorted.sort_by(|a, b| a.path.cmp(&b.path));
                let mut text = String::from("import (\n");
                for imp in &sorted {
                    text.push_str(&format!("\t{}\"{}\"\n", alias_prefix(imp), imp.path));
                }
                text.push_str(")\n\n");
                text
            }
        }
    }
}

fn alias_prefix(entry: &ImportEntry) -> String {
    match &entry.alias {
        Some(alias) => format!("{alias} "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_emits_nothing() {
        assert_eq!(ImportManager::new().text(), "");
    }

    #[test]
    fn single_import_is_unparenthesized() {
        let mut imports = ImportManager::new();
        imports.add("encoding/json", None);
        assert_eq!(imports.text(), "import \"encoding/json\"\n\n");
    }

    #[test]
    fn block_is_sorted_ascending_by_path() {
        let mut imports = ImportManager::new();
        imports.add("time", None);
        imports.add("encoding/json", None);
        imports.add("fmt", None);
        assert_eq!(
            imports.text(),
            "import (\n\t\"encoding/json\"\n\t\"fmt\"\n\t\"time\"\n)\n\n"
        );
    }

    #[test]
    fn duplicate_paths_are_first_write_wins() {
        let mut imports = ImportManager::new();
        imports.add("fmt", None);
        imports.add("fmt", Some("fmt2"));
        assert_eq!(imports.len(), 1);
        assert_eq!(imports.text(), "import \"fmt\"\n\n");
    }

    #[test]
    fn alias_is_emitted_before_the_path() {
        let mut imports = ImportManager::new();
        imports.add("github.com/gosdk-tools/sdk-go/core/mgmt", Some("coremgmt"));
        assert_eq!(
            imports.text(),
            "import coremgmt \"github.com/gosdk-tools/sdk-go/core/mgmt\"\n\n"
        );
    }

    #[test]
    fn add_for_type_unwraps_collections() {
        let mut imports = ImportManager::new();
        let ty = WireType::Map {
            value_type: Box::new(WireType::Slice {
                element_type: Box::new(WireType::Qualified {
                    name: "ReadCloser".to_string(),
                    module: "io".to_string(),
                }),
                by_value: true,
            }),
            by_value: true,
        };
        imports.add_for_type(&ty);
        imports.add_for_type(&WireType::Model { name: "Widget".to_string() });
        assert_eq!(imports.text(), "import \"io\"\n\n");
    }
}
