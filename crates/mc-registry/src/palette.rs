//! Selection of the 256-slot block palette.
//!
//! The runtime stores one byte per block, so only 256 block states can exist
//! in its worlds. Which 256 is decided here, in priority order:
//!
//! 1. blocks whose name contains a blacklisted substring are removed;
//! 2. blocks with a `snowy` property gain a `snowy_<name>` entry right after themselves;
//! 3. whitelisted names are selected first, in whitelist order;
//! 4. the remaining blocks are walked in ascending state ID order and
//!    selected if they have an item of the same name (or are always included).
//!
//! Alongside the palette two lookups are produced. `block_to_item` answers
//! "what does breaking this block drop" and honours `overrides`.
//! `item_to_block` answers "what does placing this item create" and ignores
//! them, so a dropped item always places its natural block.

use std::collections::{BTreeMap, HashMap, HashSet};

use bytes::{Bytes, BytesMut};
use indexmap::IndexMap;
use mc_protocol::{Identifier, varint_len, write_varint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::block::{BlockEntry, BlockTable, SNOWY_PREFIX};
use crate::data::RegistryTable;

/// Number of block slots the runtime can address.
pub const PALETTE_CAPACITY: usize = 256;

/// Tunables for palette selection. Every list holds names without namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Selected first, in this order, whether or not an item exists.
    pub whitelist: Vec<String>,
    /// Substrings; a block containing any of them is never selected.
    pub blacklist: Vec<String>,
    /// Block -> item dropped when it is broken, where that differs from the block name.
    pub overrides: IndexMap<String, String>,
    /// Selected in the item-matched pass even though no item shares their name.
    pub always_include: Vec<String>,
    /// Derive `snowy_<name>` entries for blocks with a `snowy` property.
    pub snowy_variants: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            overrides: IndexMap::new(),
            always_include: vec!["air".into(), "water".into(), "lava".into()],
            snowy_variants: true,
        }
    }
}

impl PaletteConfig {
    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.iter().any(|pattern| name.contains(pattern.as_str()))
    }
}

/// One palette slot: the block name and the state ID sent for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: Identifier,
    pub state_id: u16,
}

/// The selected palette with its item mappings, all co-indexed by palette slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    block_to_item: Vec<u16>,
    item_to_block: BTreeMap<u16, u8>,
}

impl Palette {
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Palette slot of `name`.
    pub fn index_of(&self, name: &str) -> Option<u8> {
        let name = mc_protocol::strip_namespace(name);
        self.entries
            .iter()
            .position(|e| e.name.as_str() == name)
            .map(|i| i as u8)
    }

    /// Item dropped by each slot; 0 means none.
    pub fn block_to_item(&self) -> &[u16] {
        &self.block_to_item
    }

    /// Slot placed by `item`. Returns 0 for items with no block, which is
    /// indistinguishable from slot 0 (normally `air`).
    pub fn item_to_block(&self, item: u16) -> u8 {
        self.item_to_block.get(&item).copied().unwrap_or(0)
    }

    pub fn item_to_block_table(&self) -> &BTreeMap<u16, u8> {
        &self.item_to_block
    }

    pub fn state_ids_padded(&self) -> [u16; PALETTE_CAPACITY] {
        let mut out = [0; PALETTE_CAPACITY];
        for (slot, entry) in out.iter_mut().zip(&self.entries) {
            *slot = entry.state_id;
        }
        out
    }

    /// The 256 padded state IDs as consecutive VarInts, the palette every
    /// chunk section is sent with.
    pub fn network_palette(&self) -> Bytes {
        let states = self.state_ids_padded();
        let len = states.iter().map(|&s| varint_len(u32::from(s))).sum();
        let mut buf = BytesMut::with_capacity(len);
        for state in states {
            write_varint(&mut buf, u32::from(state));
        }
        buf.freeze()
    }

    pub fn block_to_item_padded(&self) -> [u16; PALETTE_CAPACITY] {
        let mut out = [0; PALETTE_CAPACITY];
        for (slot, item) in out.iter_mut().zip(&self.block_to_item) {
            *slot = *item;
        }
        out
    }

    fn push(&mut self, entry: &BlockEntry, items: &RegistryTable, config: &PaletteConfig) {
        let index = self.entries.len() as u8;
        let name = entry.name.as_str();
        let natural = items.get(name);

        let dropped = match config.overrides.get(name) {
            Some(target) => items.get(target).or_else(|| {
                warn!(block = name, item = %target, "override names an unknown item, using the natural item");
                natural
            }),
            None => natural,
        };
        self.block_to_item.push(dropped.unwrap_or(0));

        // First selected block claims the item.
        if let Some(item) = natural.filter(|&id| id != 0) {
            self.item_to_block.entry(item).or_insert(index);
        }

        debug!(index, block = name, state = entry.state_id, "selected");
        self.entries.push(PaletteEntry {
            name: entry.name.clone(),
            state_id: entry.state_id,
        });
    }

    fn is_full(&self) -> bool {
        self.entries.len() >= PALETTE_CAPACITY
    }
}

/// Blacklist filter plus derived snowy entries, in table order.
fn candidates(blocks: &BlockTable, config: &PaletteConfig) -> Vec<BlockEntry> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks.entries() {
        if config.is_blacklisted(block.name.as_str()) {
            continue;
        }
        out.push(block.clone());
        if let Some(state_id) = block.snowy_state_id.filter(|_| config.snowy_variants) {
            out.push(BlockEntry::new(
                format!("{SNOWY_PREFIX}{}", block.name),
                state_id,
            ));
        }
    }
    out
}

/// Select up to [`PALETTE_CAPACITY`] blocks and derive both item mappings.
pub fn build_palette(blocks: &BlockTable, items: &RegistryTable, config: &PaletteConfig) -> Palette {
    let candidates = candidates(blocks, config);
    let by_name: HashMap<&str, usize> = candidates
        .iter()
        .enumerate()
        .rev()
        .map(|(i, e)| (e.name.as_str(), i))
        .collect();

    let mut palette = Palette::default();
    let mut selected: HashSet<usize> = HashSet::new();

    for name in &config.whitelist {
        if palette.is_full() {
            break;
        }
        let name = mc_protocol::strip_namespace(name);
        let Some(&i) = by_name.get(name) else {
            warn!(block = name, "whitelisted block is not available, skipping");
            continue;
        };
        if selected.insert(i) {
            palette.push(&candidates[i], items, config);
        }
    }

    for (i, entry) in candidates.iter().enumerate() {
        if palette.is_full() {
            break;
        }
        if selected.contains(&i) {
            continue;
        }
        let name = entry.name.as_str();
        if items.contains(name) || config.always_include.iter().any(|n| n == name) {
            selected.insert(i);
            palette.push(entry, items, config);
        }
    }

    palette
}
