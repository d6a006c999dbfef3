//! Compound data providers.
//!
//! A provider maps a compound name to its [`CompoundData`]. Names are matched
//! case-insensitively, and the name stored in the record must match the name
//! it was requested under.

use crate::compound::Compound;
use crate::data::CompoundData;
use crate::error::{DataError, DataResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of pure-compound data.
pub trait CompoundDataProvider {
    /// Look up the record for `name`.
    fn compound_data(&self, name: &str) -> DataResult<CompoundData>;

    /// Names of every compound this provider can supply.
    fn compound_names(&self) -> DataResult<Vec<String>>;

    fn load_compound(&self, name: &str) -> DataResult<Compound> {
        Compound::try_from(self.compound_data(name)?)
    }

    fn load_compounds(&self, names: &[String]) -> DataResult<Vec<Compound>> {
        names.iter().map(|name| self.load_compound(name)).collect()
    }
}

fn check_name(requested: &str, data: CompoundData) -> DataResult<CompoundData> {
    if data.name.eq_ignore_ascii_case(requested) {
        Ok(data)
    } else {
        Err(DataError::NameMismatch {
            requested: requested.to_string(),
            found: data.name,
        })
    }
}

/// Reads `<name>.yaml`, `<name>.yml` or legacy `<name>.compound` files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `(file stem, path)` for every compound file in the directory.
    fn compound_files(&self) -> DataResult<Vec<(String, PathBuf)>> {
        let io_err = |source| DataError::Io {
            path: self.root.clone(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_compound = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml" | "compound")
            );
            if !is_compound {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
        files.sort();
        Ok(files)
    }
}

impl CompoundDataProvider for DirectoryProvider {
    fn compound_data(&self, name: &str) -> DataResult<CompoundData> {
        let path = self
            .compound_files()?
            .into_iter()
            .find(|(stem, _)| stem.eq_ignore_ascii_case(name))
            .map(|(_, path)| path)
            .ok_or_else(|| DataError::NotFound {
                name: name.to_string(),
            })?;

        debug!(compound = name, path = %path.display(), "loading compound data");
        let text = std::fs::read_to_string(&path).map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;
        let data = match path.extension().and_then(|e| e.to_str()) {
            Some("compound") => CompoundData::from_legacy_str(&text)?,
            _ => CompoundData::from_yaml_str(&text)?,
        };
        check_name(name, data)
    }

    fn compound_names(&self) -> DataResult<Vec<String>> {
        let mut names: Vec<String> = self
            .compound_files()?
            .into_iter()
            .map(|(stem, _)| stem)
            .collect();
        names.dedup();
        Ok(names)
    }
}

/// Compound records held in memory, keyed by lower-case name.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    compounds: BTreeMap<String, CompoundData>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record.
    pub fn insert(&mut self, data: CompoundData) {
        self.compounds.insert(data.name.to_lowercase(), data);
    }

    pub fn with(mut self, data: CompoundData) -> Self {
        self.insert(data);
        self
    }
}

impl FromIterator<CompoundData> for MemoryProvider {
    fn from_iter<I: IntoIterator<Item = CompoundData>>(iter: I) -> Self {
        let mut provider = MemoryProvider::new();
        for data in iter {
            provider.insert(data);
        }
        provider
    }
}

impl CompoundDataProvider for MemoryProvider {
    fn compound_data(&self, name: &str) -> DataResult<CompoundData> {
        self.compounds
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| DataError::NotFound {
                name: name.to_string(),
            })
    }

    fn compound_names(&self) -> DataResult<Vec<String>> {
        Ok(self.compounds.values().map(|d| d.name.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn memory_provider_is_case_insensitive() {
        let provider = MemoryProvider::new().with(fixtures::benzene());
        assert_eq!(provider.compound_data("Benzene").unwrap().cas, "71-43-2");
        assert!(matches!(
            provider.compound_data("toluene"),
            Err(DataError::NotFound { .. })
        ));
        assert_eq!(provider.compound_names().unwrap(), vec!["benzene".to_string()]);
    }

    #[test]
    fn load_compounds_preserves_order() {
        let mut toluene = fixtures::benzene();
        toluene.name = "toluene".into();
        let provider: MemoryProvider = [fixtures::benzene(), toluene].into_iter().collect();
        let names = vec!["toluene".to_string(), "benzene".to_string()];
        let compounds = provider.load_compounds(&names).unwrap();
        assert_eq!(compounds[0].name(), "toluene");
        assert_eq!(compounds[1].name(), "benzene");
    }

    #[test]
    fn name_must_match_request() {
        let err = check_name("toluene", fixtures::benzene()).unwrap_err();
        assert!(matches!(err, DataError::NameMismatch { .. }));
    }
}
