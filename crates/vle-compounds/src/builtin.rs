//! Compound catalog compiled into the library.

use crate::data::CompoundData;
use crate::error::{DataError, DataResult};
use crate::provider::CompoundDataProvider;

const CATALOG: [(&str, &str); 5] = [
    ("benzene", include_str!("../../../data/compounds/benzene.yaml")),
    ("toluene", include_str!("../../../data/compounds/toluene.yaml")),
    ("n-hexane", include_str!("../../../data/compounds/n-hexane.yaml")),
    ("n-heptane", include_str!("../../../data/compounds/n-heptane.yaml")),
    ("water", include_str!("../../../data/compounds/water.yaml")),
];

/// Builtin catalog: benzene, toluene, n-hexane, n-heptane and water.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl CompoundDataProvider for BuiltinProvider {
    fn compound_data(&self, name: &str) -> DataResult<CompoundData> {
        let (_, text) = CATALOG
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::NotFound {
                name: name.to_string(),
            })?;
        CompoundData::from_yaml_str(text)
    }

    fn compound_names(&self) -> DataResult<Vec<String>> {
        Ok(CATALOG.iter().map(|(key, _)| key.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_compound_loads() {
        let provider = BuiltinProvider;
        for name in provider.compound_names().unwrap() {
            let compound = provider.load_compound(&name).unwrap();
            assert_eq!(compound.name(), name);
        }
    }

    #[test]
    fn builtin_boiling_points_are_consistent() {
        // Antoine fits should give ~1 atm at the stored normal boiling point
        let provider = BuiltinProvider;
        for name in provider.compound_names().unwrap() {
            let c = provider.load_compound(&name).unwrap();
            let p = c.vapor_pressure().value(c.normal_boiling_point());
            assert!(
                (p - 101_325.0).abs() / 101_325.0 < 0.02,
                "{name}: Psat(NBP) = {p}"
            );
        }
    }

    #[test]
    fn unknown_builtin() {
        assert!(BuiltinProvider.compound_data("unobtainium").is_err());
    }
}
