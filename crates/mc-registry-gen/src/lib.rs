//! Glue around `mc-registry`: loads the vanilla data generator output, runs
//! the pipeline and renders the result as a Rust module.

pub mod emit;
pub mod pipeline;
pub mod scan;

pub use emit::emit;
pub use pipeline::{Artifacts, Inputs, generate, load_json};
pub use scan::scan_registries;

/// Configuration for the bareiron runtime (protocol 770).
pub const BAREIRON_CONFIG: &str = include_str!("../config/bareiron.json");
