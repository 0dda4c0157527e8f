use std::io;
use std::path::Path;

use mc_registry::RegistryListing;
use tracing::debug;
use walkdir::WalkDir;

/// Collect the entries of data-driven registries from a data pack tree.
///
/// Every `*.json` file contributes its stem to the list of its parent
/// directory, keyed relative to `root` with `/` separators
/// (`worldgen/biome/plains.json` -> `"worldgen/biome": ["plains", ..]`).
/// Directories are walked in file name order, so entry lists are sorted.
pub fn scan_registries(root: &Path) -> io::Result<RegistryListing> {
    let mut listing = RegistryListing::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let relative = path.strip_prefix(root).unwrap_or(path);
        let registry = relative
            .parent()
            .map(|dir| {
                dir.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        listing.entry(registry).or_default().push(stem.to_owned());
    }

    debug!(registries = listing.len(), "scanned {}", root.display());
    Ok(listing)
}
