use bytes::{Bytes, BytesMut};
use indexmap::IndexMap;
use mc_protocol::{Encode, Identifier, Packet, configuration, encode_packet, strip_namespace};
use tracing::{info, warn};

use crate::data::RegistryListing;
use crate::error::RegistryError;

/// Clientbound Registry Data
#[derive(Debug, Clone, PartialEq, Eq, Encode, Packet)]
#[packet(id = configuration::REGISTRY_DATA, name = "registry_data")]
pub struct RegistryDataPacket {
    pub registry: Identifier,
    pub entries: Vec<RegistryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode)]
pub struct RegistryEntry {
    pub id: Identifier,
    /// Always false: the client fills entry data in from its builtin data pack.
    pub has_data: bool,
}

impl RegistryEntry {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: Identifier::new(id),
            has_data: false,
        }
    }
}

impl RegistryDataPacket {
    pub fn new<I, S>(registry: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            registry: Identifier::new(registry),
            entries: entries.into_iter().map(RegistryEntry::new).collect(),
        }
    }
}

/// Encode one framed Registry Data packet. Entry order is kept and defines
/// the registry's index space on the client.
pub fn encode_registry<I, S>(name: &str, entries: I) -> Bytes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    encode_packet(&RegistryDataPacket::new(name, entries))
}

/// Every required registry, framed and concatenated, plus the entry order of each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryBundle {
    pub bytes: Bytes,
    pub registries: IndexMap<String, Vec<Identifier>>,
}

impl RegistryBundle {
    /// Index of `entry` within `registry`.
    pub fn index_of(&self, registry: &str, entry: &str) -> Option<usize> {
        let entry = strip_namespace(entry);
        self.registries
            .get(strip_namespace(registry))?
            .iter()
            .position(|e| e.as_str() == entry)
    }
}

/// Encode `required` registries from the scanned listing, in `required` order.
///
/// A registry listed in `filters` only sends the named entries, in filter order.
/// Fails without producing anything if a required registry was not found.
pub fn encode_registries(
    listing: &RegistryListing,
    required: &[String],
    filters: &IndexMap<String, Vec<String>>,
) -> Result<RegistryBundle, RegistryError> {
    let mut buf = BytesMut::new();
    let mut registries = IndexMap::new();

    for name in required {
        let name = strip_namespace(name);
        let available = listing
            .get(name)
            .ok_or_else(|| RegistryError::MissingRequiredRegistry {
                name: name.to_owned(),
            })?;

        let entries: Vec<Identifier> = match filters.get(name) {
            Some(keep) => keep
                .iter()
                .filter(|entry| {
                    let found = available.iter().any(|a| a == strip_namespace(entry));
                    if !found {
                        warn!(registry = name, entry = %entry, "filtered entry not found upstream, skipping");
                    }
                    found
                })
                .map(Identifier::new)
                .collect(),
            None => available.iter().map(Identifier::new).collect(),
        };

        let packet = RegistryDataPacket {
            registry: Identifier::new(name),
            entries: entries
                .iter()
                .cloned()
                .map(|id| RegistryEntry { id, has_data: false })
                .collect(),
        };
        let framed = encode_packet(&packet);
        info!(registry = name, entries = entries.len(), bytes = framed.len(), "encoded registry");
        buf.extend_from_slice(&framed);
        registries.insert(name.to_owned(), entries);
    }

    Ok(RegistryBundle {
        bytes: buf.freeze(),
        registries,
    })
}
