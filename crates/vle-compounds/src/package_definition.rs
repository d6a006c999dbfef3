//! Property package definition files.
//!
//! A definition is an ordered list of compound names. YAML files
//! (`.yaml`/`.yml`) carry an optional display name; any other extension is
//! read as a plain list with one compound name per line (blank lines and
//! `#` comments ignored).

use crate::compound::Compound;
use crate::error::{DataError, DataResult};
use crate::provider::CompoundDataProvider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub compounds: Vec<String>,
}

impl PackageDefinition {
    pub fn new(compounds: Vec<String>) -> DataResult<Self> {
        let definition = Self {
            name: None,
            compounds,
        };
        definition.validate()?;
        Ok(definition)
    }

    pub fn from_yaml_str(text: &str) -> DataResult<Self> {
        let definition: PackageDefinition = serde_yaml::from_str(text)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn from_list_str(text: &str) -> DataResult<Self> {
        let compounds = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self::new(compounds)
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut definition = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            _ => Self::from_list_str(&text)?,
        };
        if definition.name.is_none() {
            definition.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string);
        }
        debug!(path = %path.display(), compounds = definition.compounds.len(), "loaded package definition");
        Ok(definition)
    }

    pub fn save_yaml(&self, path: &Path) -> DataResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// At least one compound, no name repeated (case-insensitive).
    pub fn validate(&self) -> DataResult<()> {
        if self.compounds.is_empty() {
            return Err(DataError::EmptyPackage);
        }
        for (i, name) in self.compounds.iter().enumerate() {
            if self.compounds[..i]
                .iter()
                .any(|other| other.eq_ignore_ascii_case(name))
            {
                return Err(DataError::Duplicate { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Load every listed compound from `provider`, in order.
    pub fn resolve(&self, provider: &dyn CompoundDataProvider) -> DataResult<Vec<Compound>> {
        self.validate()?;
        provider.load_compounds(&self.compounds)
    }
}
