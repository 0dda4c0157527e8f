//! Shapes of the vanilla data generator reports, and the ID tables built from them.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use mc_protocol::{Identifier, strip_namespace};
use serde::Deserialize;
use tracing::warn;

/// Block state from Mojang's data generator
#[derive(Debug, Clone, Deserialize)]
pub struct BlockStateInfo {
    pub id: u16,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Block info from Mojang's data generator
#[derive(Debug, Clone, Deserialize)]
pub struct BlockInfo {
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
    pub states: Vec<BlockStateInfo>,
}

/// BlockName -> BlockInfo, in file order (`reports/blocks.json`)
pub type BlockReport = IndexMap<String, BlockInfo>;

/// Registry entry from `reports/registries.json`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegistryEntryInfo {
    pub protocol_id: u16,
}

/// Registry from `reports/registries.json`
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryInfo {
    #[serde(default)]
    pub default: Option<String>,
    pub protocol_id: u32,
    pub entries: IndexMap<String, RegistryEntryInfo>,
}

/// RegistryName -> RegistryInfo, in file order
pub type RegistryReport = IndexMap<String, RegistryInfo>;

/// Relative directory (`/`-joined, `""` for the root) -> entry names found in it.
///
/// Produced by scanning the data pack tree; this is where the entry lists of
/// data-driven registries such as `worldgen/biome` come from.
pub type RegistryListing = BTreeMap<String, Vec<String>>;

/// Identifier -> protocol ID for one registry.
///
/// Serves both as the item table and as the lookup for tag members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryTable {
    name: String,
    entries: IndexMap<Identifier, u16>,
}

impl RegistryTable {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: strip_namespace(name.as_ref()).to_owned(),
            entries: IndexMap::new(),
        }
    }

    pub fn from_report(name: impl AsRef<str>, info: &RegistryInfo) -> Self {
        let mut table = Self::new(name);
        table.entries = info
            .entries
            .iter()
            .map(|(entry, data)| (Identifier::new(entry), data.protocol_id))
            .collect();
        table
    }

    /// Look up `registry` (with or without namespace) in the report.
    pub fn from_registries(report: &RegistryReport, registry: &str) -> Option<Self> {
        let registry = strip_namespace(registry);
        report
            .iter()
            .find(|(name, _)| strip_namespace(name) == registry)
            .map(|(name, info)| Self::from_report(name, info))
    }

    pub fn insert(&mut self, name: impl AsRef<str>, id: u16) {
        self.entries.insert(Identifier::new(name), id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.entries.get(strip_namespace(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(strip_namespace(name))
    }

    /// ID of `name`, or the sentinel 0 when the registry has no such entry.
    pub fn resolve(&self, name: &str) -> u16 {
        self.get(name).unwrap_or_else(|| {
            warn!(registry = %self.name, entry = name, "unresolved identifier, using 0");
            0
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, u16)> + '_ {
        self.entries.iter().map(|(name, id)| (name, *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u16)> for RegistryTable {
    fn from_iter<I: IntoIterator<Item = (S, u16)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (name, id) in iter {
            table.insert(name, id);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRIES: &str = r#"{
        "minecraft:item": {
            "default": "minecraft:air",
            "protocol_id": 7,
            "entries": {
                "minecraft:air": { "protocol_id": 0 },
                "minecraft:stone": { "protocol_id": 1 },
                "minecraft:cobblestone": { "protocol_id": 35 }
            }
        }
    }"#;

    #[test]
    fn test_item_table_from_report() {
        let report: RegistryReport = serde_json::from_str(REGISTRIES).unwrap();
        let items = RegistryTable::from_registries(&report, "item").unwrap();

        assert_eq!(items.name(), "item");
        assert_eq!(items.len(), 3);
        assert_eq!(items.get("stone"), Some(1));
        assert_eq!(items.get("minecraft:cobblestone"), Some(35));
        let names: Vec<&str> = items.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["air", "stone", "cobblestone"]);
    }

    #[test]
    fn test_resolve_missing_is_zero() {
        let items: RegistryTable = [("stone", 1)].into_iter().collect();
        assert_eq!(items.resolve("stone"), 1);
        assert_eq!(items.resolve("not_a_block"), 0);
    }

    #[test]
    fn test_missing_registry() {
        let report: RegistryReport = serde_json::from_str(REGISTRIES).unwrap();
        assert!(RegistryTable::from_registries(&report, "minecraft:fluid").is_none());
    }
}
