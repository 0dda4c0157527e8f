//! Build-time compilation of game data into what a small server sends and looks up:
//!
//! - framed Registry Data packets for data-driven registries ([`registry`]);
//! - a framed Update Tags packet ([`tags`]);
//! - the 256-slot block palette with block/item mappings ([`palette`]).
//!
//! Everything here is a pure function of its inputs. Reading the data generator
//! output and writing the generated source live in `mc-registry-gen`.

pub mod block;
pub mod config;
pub mod data;
pub mod error;
pub mod palette;
pub mod registry;
pub mod tags;

pub use block::{BlockEntry, BlockTable};
pub use config::GeneratorConfig;
pub use data::{BlockReport, RegistryListing, RegistryReport, RegistryTable};
pub use error::RegistryError;
pub use palette::{PALETTE_CAPACITY, Palette, PaletteConfig, PaletteEntry, build_palette};
pub use registry::{RegistryBundle, RegistryDataPacket, encode_registries, encode_registry};
pub use tags::{TagDefinitions, TagGroups, UpdateTagsPacket, encode_tags, resolve_tags};
