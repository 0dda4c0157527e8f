use std::fs;
use std::path::Path;

use bytes::Bytes;
use eyre::WrapErr;
use mc_registry::{
    BlockReport, BlockTable, GeneratorConfig, Palette, RegistryBundle, RegistryError,
    RegistryListing, RegistryReport, RegistryTable, build_palette, encode_registries, encode_tags,
    resolve_tags,
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::scan::scan_registries;

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).wrap_err_with(|| format!("failed to parse {}", path.display()))
}

/// Upstream data, fully loaded before anything is encoded.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub blocks: BlockReport,
    pub registries: RegistryReport,
    pub listing: RegistryListing,
}

impl Inputs {
    /// Load `reports/blocks.json`, `reports/registries.json` and scan
    /// `data/<namespace>/` below the data generator output directory.
    pub fn load(data_dir: &Path, namespace: &str) -> eyre::Result<Self> {
        let reports = data_dir.join("reports");
        let blocks: BlockReport = load_json(&reports.join("blocks.json"))?;
        let registries: RegistryReport = load_json(&reports.join("registries.json"))?;

        let pack = data_dir.join("data").join(namespace);
        let listing = scan_registries(&pack)
            .wrap_err_with(|| format!("failed to scan {}", pack.display()))?;

        info!(
            blocks = blocks.len(),
            registries = registries.len(),
            scanned = listing.len(),
            "loaded data generator output"
        );
        Ok(Self {
            blocks,
            registries,
            listing,
        })
    }
}

/// Everything the emitter writes out.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub registries: RegistryBundle,
    pub tags: Option<Bytes>,
    pub palette: Palette,
    pub items: RegistryTable,
}

/// Run every stage. Fails before producing anything if a required registry,
/// or the item registry, is missing.
pub fn generate(inputs: &Inputs, config: &GeneratorConfig) -> Result<Artifacts, RegistryError> {
    let registries = encode_registries(
        &inputs.listing,
        &config.required_registries,
        &config.registry_filters,
    )?;

    let items = RegistryTable::from_registries(&inputs.registries, "item").ok_or_else(|| {
        RegistryError::MissingRequiredRegistry {
            name: "item".to_owned(),
        }
    })?;

    let blocks = BlockTable::from_report(&inputs.blocks);
    let palette = build_palette(&blocks, &items, &config.palette);
    info!(
        palette = palette.len(),
        candidates = blocks.len(),
        "built block palette"
    );

    let tags = config
        .emit_tags
        .then(|| encode_tags(&resolve_tags(&config.tags, &inputs.registries)));

    Ok(Artifacts {
        registries,
        tags,
        palette,
        items,
    })
}
