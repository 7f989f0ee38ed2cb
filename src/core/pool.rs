//! Symbol pool discovery.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::error::{Error, Result};

const SYMBOL_EXTENSION: &str = "png";

/// One drawable symbol, backed by an image file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Symbol {
    pub name: String,
    pub path: PathBuf,
}

impl Symbol {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Read-only set of symbols available for binding, in file-name order.
#[derive(Debug, Clone, Default)]
pub struct SymbolPool {
    symbols: Vec<Symbol>,
}

impl SymbolPool {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Enumerate the PNG files directly inside `dir`. Subdirectories are ignored.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|err| Error::io(dir, err))?;
        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Error::io(dir, err))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_symbol = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case(SYMBOL_EXTENSION))
                .unwrap_or(false);
            if is_symbol {
                debug!("found symbol image {}", path.display());
                symbols.push(Symbol::new(path));
            }
        }
        // read_dir order is platform dependent; sort so seeded runs repeat
        symbols.sort();
        info!("loaded {} symbol images from {}", symbols.len(), dir.display());
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Fail fast when fewer than `required` symbols are available.
    pub fn ensure_at_least(&self, required: usize) -> Result<()> {
        if self.symbols.len() < required {
            return Err(Error::InsufficientSymbols {
                required,
                available: self.symbols.len(),
            });
        }
        Ok(())
    }
}
