use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::palette::PaletteConfig;
use crate::tags::TagDefinitions;

/// Everything that varies between target runtimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Registries sent as Registry Data, in this order. Generation fails if any is missing.
    pub required_registries: Vec<String>,
    /// Registry -> the only entries to send for it, in this order.
    pub registry_filters: IndexMap<String, Vec<String>>,
    pub palette: PaletteConfig,
    pub tags: TagDefinitions,
    /// Also produce an Update Tags packet.
    pub emit_tags: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            required_registries: Vec::new(),
            registry_filters: IndexMap::new(),
            palette: PaletteConfig::default(),
            tags: TagDefinitions::new(),
            emit_tags: true,
        }
    }
}
