use bytes::Bytes;
use indexmap::IndexMap;
use mc_protocol::{Encode, Identifier, Packet, VarInt, configuration, encode_packet};
use tracing::warn;

use crate::data::{RegistryReport, RegistryTable};

/// Category ("block", "item", "fluid", ...) -> tag name -> member identifiers.
pub type TagDefinitions = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Category -> tag name -> member protocol IDs, in definition order.
pub type TagGroups = IndexMap<String, IndexMap<String, Vec<u32>>>;

/// Clientbound Update Tags
#[derive(Debug, Clone, PartialEq, Eq, Encode, Packet)]
#[packet(id = configuration::UPDATE_TAGS, name = "update_tags")]
pub struct UpdateTagsPacket {
    pub categories: Vec<TagCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode)]
pub struct TagCategory {
    pub registry: Identifier,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode)]
pub struct Tag {
    pub name: Identifier,
    pub entries: Vec<VarInt>,
}

impl From<&TagGroups> for UpdateTagsPacket {
    fn from(groups: &TagGroups) -> Self {
        let categories = groups
            .iter()
            .map(|(registry, tags)| TagCategory {
                registry: Identifier::new(registry),
                tags: tags
                    .iter()
                    .map(|(name, ids)| Tag {
                        name: Identifier::new(name),
                        entries: ids.iter().copied().map(VarInt).collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }
}

/// Encode one framed Update Tags packet. IDs are written as given; resolving
/// them is up to the caller (see [`resolve_tags`]).
pub fn encode_tags(groups: &TagGroups) -> Bytes {
    encode_packet(&UpdateTagsPacket::from(groups))
}

/// Resolve tag members to protocol IDs through registry `<category>` of the report.
///
/// Members that cannot be resolved become 0.
pub fn resolve_tags(definitions: &TagDefinitions, report: &RegistryReport) -> TagGroups {
    definitions
        .iter()
        .map(|(category, tags)| {
            let table = RegistryTable::from_registries(report, category).unwrap_or_else(|| {
                warn!(category = %category, "no registry for tag category, members resolve to 0");
                RegistryTable::new(category)
            });
            let resolved = tags
                .iter()
                .map(|(tag, members)| {
                    let ids = members.iter().map(|m| u32::from(table.resolve(m))).collect();
                    (tag.clone(), ids)
                })
                .collect();
            (category.clone(), resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(json: &str) -> TagGroups {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_tags() {
        assert_eq!(encode_tags(&TagGroups::new()).as_ref(), [0x02, 0x0D, 0x00]);
    }

    #[test]
    fn test_tag_packet_layout() {
        let bytes = encode_tags(&groups(r#"{ "fluid": { "water": [86, 87] } }"#));
        let mut expected = vec![0x0D, 0x01, 0x05];
        expected.extend_from_slice(b"fluid");
        expected.extend_from_slice(&[0x01, 0x05]);
        expected.extend_from_slice(b"water");
        expected.extend_from_slice(&[0x02, 86, 87]);
        assert_eq!(bytes[0] as usize, expected.len());
        assert_eq!(&bytes[1..], expected.as_slice());
    }

    #[test]
    fn test_multibyte_ids() {
        let bytes = encode_tags(&groups(r#"{ "item": { "planks": [300] } }"#));
        assert!(bytes.ends_with(&[0x01, 0xAC, 0x02]));
    }

    #[test]
    fn test_definition_order_is_kept() {
        let a = encode_tags(&groups(r#"{ "item": {}, "block": {} }"#));
        let b = encode_tags(&groups(r#"{ "block": {}, "item": {} }"#));
        assert_ne!(a, b);
        assert_eq!(&a[3..8], b"\x04item");
    }

    #[test]
    fn test_resolve_tags() {
        let report: RegistryReport = serde_json::from_str(
            r#"{
                "minecraft:fluid": {
                    "protocol_id": 2,
                    "entries": {
                        "minecraft:empty": { "protocol_id": 0 },
                        "minecraft:flowing_water": { "protocol_id": 1 },
                        "minecraft:water": { "protocol_id": 2 }
                    }
                }
            }"#,
        )
        .unwrap();
        let definitions: TagDefinitions = serde_json::from_str(
            r#"{
                "fluid": { "water": ["minecraft:water", "flowing_water", "milk"] },
                "potion": { "good": ["luck"] }
            }"#,
        )
        .unwrap();

        let resolved = resolve_tags(&definitions, &report);
        assert_eq!(resolved["fluid"]["water"], [2, 1, 0]);
        assert_eq!(resolved["potion"]["good"], [0]);
    }
}
