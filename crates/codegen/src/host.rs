//! The host seam: the only side-effecting interface the core requires.
//!
//! A small number of files (the module manifest, the version constants)
//! must be idempotent across repeated runs: never overwritten when
//! hand-edited or already present. The core reads and writes those files
//! exclusively through a caller-supplied [`Host`]; everything else is
//! returned as text for the driver to place.

use crate::errors::Result;

/// Caller-supplied file access.
pub trait Host {
    /// Returns true if the named output file already exists.
    fn exists(&self, name: &str) -> bool;

    /// Reads the named output file.
    fn read(&self, name: &str) -> Result<String>;

    /// Writes the named output file.
    fn write(&mut self, name: &str, text: &str) -> Result<()>;
}
