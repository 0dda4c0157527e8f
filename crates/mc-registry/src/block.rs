use mc_protocol::Identifier;
use tracing::debug;

use crate::data::{BlockInfo, BlockReport, BlockStateInfo};

/// Boolean block property that gets a derived `snowy_` entry.
pub const SNOWY_PROPERTY: &str = "snowy";
pub const SNOWY_PREFIX: &str = "snowy_";

/// A block with its default network state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub name: Identifier,
    pub state_id: u16,
    /// State with `snowy=true` and otherwise default properties, if the block has one.
    pub snowy_state_id: Option<u16>,
}

impl BlockEntry {
    pub fn new(name: impl AsRef<str>, state_id: u16) -> Self {
        Self {
            name: Identifier::new(name),
            state_id,
            snowy_state_id: None,
        }
    }

    pub fn with_snowy_state(mut self, state_id: u16) -> Self {
        self.snowy_state_id = Some(state_id);
        self
    }
}

/// All blocks, ordered by default state ID ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTable {
    entries: Vec<BlockEntry>,
}

impl BlockTable {
    /// Build the table from `reports/blocks.json`.
    ///
    /// Blocks without a default state have no network ID and are skipped.
    /// The sort is stable, so ties keep report order.
    pub fn from_report(report: &BlockReport) -> Self {
        let mut entries: Vec<BlockEntry> = report
            .iter()
            .filter_map(|(name, info)| {
                let Some(state) = info.states.iter().find(|s| s.default) else {
                    debug!(block = %name, "no default state, skipping");
                    return None;
                };
                let mut entry = BlockEntry::new(name, state.id);
                entry.snowy_state_id = snowy_state(info, state);
                Some(entry)
            })
            .collect();

        entries.sort_by_key(|e| e.state_id);
        Self { entries }
    }

    pub fn entries(&self) -> &[BlockEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&BlockEntry> {
        let name = mc_protocol::strip_namespace(name);
        self.entries.iter().find(|e| e.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<BlockEntry> for BlockTable {
    /// Entries are taken as already ordered.
    fn from_iter<I: IntoIterator<Item = BlockEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn snowy_state(info: &BlockInfo, base: &BlockStateInfo) -> Option<u16> {
    if !info.properties.contains_key(SNOWY_PROPERTY) {
        return None;
    }
    let is_snowy = |s: &&BlockStateInfo| {
        s.properties.get(SNOWY_PROPERTY).map(String::as_str) == Some("true")
    };
    let same_otherwise = |s: &&BlockStateInfo| {
        s.properties
            .iter()
            .filter(|(k, _)| k.as_str() != SNOWY_PROPERTY)
            .all(|(k, v)| base.properties.get(k) == Some(v))
    };

    info.states
        .iter()
        .filter(is_snowy)
        .find(same_otherwise)
        .or_else(|| info.states.iter().find(is_snowy))
        .map(|s| s.id)
}
