//! Palette selection against synthetic block and item tables.

use mc_registry::{
    BlockEntry, BlockReport, BlockTable, PALETTE_CAPACITY, PaletteConfig, RegistryTable,
    build_palette,
};

/// Blocks `block_0..block_n` with state IDs in ascending order, each with an item.
fn numbered(n: u16) -> (BlockTable, RegistryTable) {
    let blocks = (0..n).map(|i| BlockEntry::new(format!("block_{i}"), i * 4)).collect();
    let items = (0..n).map(|i| (format!("block_{i}"), i + 1)).collect();
    (blocks, items)
}

fn small_world() -> (BlockTable, RegistryTable) {
    let blocks: BlockTable = [
        BlockEntry::new("minecraft:air", 0),
        BlockEntry::new("minecraft:stone", 1),
        BlockEntry::new("minecraft:granite", 2),
        BlockEntry::new("minecraft:grass_block", 9).with_snowy_state(8),
        BlockEntry::new("minecraft:dirt", 10),
        BlockEntry::new("minecraft:cobblestone", 14),
        BlockEntry::new("minecraft:water", 86),
        BlockEntry::new("minecraft:lava", 102),
        BlockEntry::new("minecraft:sand", 118),
        BlockEntry::new("minecraft:infested_stone", 6000),
        BlockEntry::new("minecraft:potted_oak_sapling", 9000),
        BlockEntry::new("minecraft:torch", 2000),
        BlockEntry::new("minecraft:wall_torch", 2001),
    ]
    .into_iter()
    .collect();

    let items: RegistryTable = [
        ("minecraft:air", 0),
        ("minecraft:stone", 1),
        ("minecraft:granite", 2),
        ("minecraft:grass_block", 27),
        ("minecraft:dirt", 28),
        ("minecraft:cobblestone", 35),
        ("minecraft:sand", 59),
        ("minecraft:infested_stone", 400),
        ("minecraft:torch", 300),
    ]
    .into_iter()
    .collect();

    (blocks, items)
}

fn config() -> PaletteConfig {
    PaletteConfig {
        whitelist: vec![
            "air".into(),
            "water".into(),
            "lava".into(),
            "snowy_grass_block".into(),
            "torch".into(),
            "infested_stone".into(),
            "not_a_block".into(),
        ],
        blacklist: vec!["infested_".into(), "potted_".into()],
        overrides: [
            ("stone".to_owned(), "cobblestone".to_owned()),
            ("grass_block".to_owned(), "dirt".to_owned()),
            ("snowy_grass_block".to_owned(), "dirt".to_owned()),
        ]
        .into_iter()
        .collect(),
        ..PaletteConfig::default()
    }
}

fn names(blocks: &BlockTable, items: &RegistryTable, config: &PaletteConfig) -> Vec<String> {
    build_palette(blocks, items, config)
        .entries()
        .iter()
        .map(|e| e.name.to_string())
        .collect()
}

#[test]
fn test_selection_order() {
    let (blocks, items) = small_world();
    assert_eq!(
        names(&blocks, &items, &config()),
        [
            "air",
            "water",
            "lava",
            "snowy_grass_block",
            "torch",
            "stone",
            "granite",
            "grass_block",
            "dirt",
            "cobblestone",
            "sand",
        ]
    );
}

#[test]
fn test_capacity_is_never_exceeded() {
    for n in [0, 1, 255, 256, 257, 1000] {
        let (blocks, items) = numbered(n);
        let palette = build_palette(&blocks, &items, &PaletteConfig::default());
        assert_eq!(palette.len(), usize::from(n).min(PALETTE_CAPACITY), "n = {n}");
        assert_eq!(palette.block_to_item().len(), palette.len());
    }
}

#[test]
fn test_whitelist_stops_at_capacity() {
    let (blocks, items) = numbered(300);
    let config = PaletteConfig {
        whitelist: (0..300).rev().map(|i| format!("block_{i}")).collect(),
        ..PaletteConfig::default()
    };
    let palette = build_palette(&blocks, &items, &config);
    assert_eq!(palette.len(), PALETTE_CAPACITY);
    assert_eq!(palette.index_of("block_299"), Some(0));
    assert_eq!(palette.index_of("block_44"), Some(255));
    assert_eq!(palette.index_of("block_0"), None);
}

#[test]
fn test_deterministic() {
    let (blocks, items) = small_world();
    let first = build_palette(&blocks, &items, &config());
    let second = build_palette(&blocks, &items, &config());
    assert_eq!(first, second);
    assert_eq!(first.state_ids_padded(), second.state_ids_padded());
    assert_eq!(first.item_to_block_table(), second.item_to_block_table());
}

#[test]
fn test_whitelist_precedes_item_matched_blocks() {
    let (blocks, items) = small_world();
    let config = config();
    let palette = build_palette(&blocks, &items, &config);

    let last_whitelisted = config
        .whitelist
        .iter()
        .filter_map(|name| palette.index_of(name))
        .max()
        .unwrap();
    let first_other = palette
        .entries()
        .iter()
        .position(|e| !config.whitelist.iter().any(|w| w == e.name.as_str()))
        .unwrap();
    assert!(usize::from(last_whitelisted) < first_other);
}

#[test]
fn test_override_asymmetry() {
    let (blocks, items) = small_world();
    let palette = build_palette(&blocks, &items, &config());

    let stone = palette.index_of("stone").unwrap();
    let cobblestone = palette.index_of("cobblestone").unwrap();
    let cobblestone_item = items.get("cobblestone").unwrap();

    // Breaking stone drops cobblestone...
    assert_eq!(palette.block_to_item()[usize::from(stone)], cobblestone_item);
    // ...but placing cobblestone places cobblestone, and placing stone places stone.
    assert_eq!(palette.item_to_block(cobblestone_item), cobblestone);
    assert_eq!(palette.item_to_block(items.get("stone").unwrap()), stone);

    let grass = palette.index_of("grass_block").unwrap();
    let snowy = palette.index_of("snowy_grass_block").unwrap();
    let dirt_item = items.get("dirt").unwrap();
    assert_eq!(palette.block_to_item()[usize::from(grass)], dirt_item);
    assert_eq!(palette.block_to_item()[usize::from(snowy)], dirt_item);
    assert_eq!(palette.item_to_block(items.get("grass_block").unwrap()), grass);
}

#[test]
fn test_blacklist_applies_before_whitelist() {
    let (blocks, items) = small_world();
    let palette = build_palette(&blocks, &items, &config());
    assert_eq!(palette.index_of("infested_stone"), None);
    assert_eq!(palette.index_of("potted_oak_sapling"), None);
    assert_eq!(palette.item_to_block(400), 0);
}

#[test]
fn test_blocks_without_items_only_via_whitelist() {
    let (blocks, items) = small_world();
    let palette = build_palette(&blocks, &items, &config());
    assert_eq!(palette.index_of("wall_torch"), None);

    let water = palette.index_of("water").unwrap();
    assert_eq!(palette.block_to_item()[usize::from(water)], 0);
}

#[test]
fn test_first_selected_block_claims_shared_item() {
    let blocks: BlockTable = [
        BlockEntry::new("air", 0),
        BlockEntry::new("stone", 1),
        BlockEntry::new("smooth_stone", 2),
    ]
    .into_iter()
    .collect();
    let items: RegistryTable = [("air", 0), ("stone", 1), ("smooth_stone", 2)]
        .into_iter()
        .collect();
    let config = PaletteConfig {
        whitelist: vec!["air".into(), "smooth_stone".into()],
        ..PaletteConfig::default()
    };

    let palette = build_palette(&blocks, &items, &config);
    assert_eq!(palette.index_of("smooth_stone"), Some(1));
    assert_eq!(palette.index_of("stone"), Some(2));
    assert_eq!(palette.item_to_block(2), 1);
    assert_eq!(palette.item_to_block(1), 2);

    // Two palette slots naming the same item: the earlier slot keeps it.
    let duplicated: BlockTable = [
        BlockEntry::new("air", 0),
        BlockEntry::new("stone", 1),
        BlockEntry::new("stone", 5),
    ]
    .into_iter()
    .collect();
    let palette = build_palette(&duplicated, &items, &PaletteConfig::default());
    assert_eq!(palette.len(), 3);
    assert_eq!(palette.item_to_block(1), 1);
}

#[test]
fn test_block_without_default_state_is_never_selected() {
    let report: BlockReport = serde_json::from_str(
        r#"{
            "minecraft:air": { "states": [ { "id": 0, "default": true } ] },
            "minecraft:nodefault": { "states": [ { "id": 3 } ] }
        }"#,
    )
    .unwrap();
    let blocks = BlockTable::from_report(&report);
    let items: RegistryTable = [("air", 0), ("nodefault", 7)].into_iter().collect();
    let config = PaletteConfig {
        whitelist: vec!["nodefault".into()],
        ..PaletteConfig::default()
    };

    let palette = build_palette(&blocks, &items, &config);
    assert_eq!(palette.len(), 1);
    assert_eq!(palette.index_of("nodefault"), None);
    assert_eq!(palette.item_to_block(7), 0);
}
