//! Legacy tile identifier table
//!
//! Worlds written before the tile id rework stored different numeric ids.
//! Each old id maps to a tile *name*, which the registry then resolves. This
//! table is part of the persisted format: entries may be added, never changed.

/// `(old id, tile name)` pairs, sorted by old id
pub const LEGACY_TABLE: &[(u16, &str)] = &[
    (0, "grass"),
    (1, "rock"),
    (2, "water"),
    (3, "flower"),
    (4, "oak tree"),
    (5, "dirt"),
    (6, "sand"),
    (7, "cactus"),
    (8, "hole"),
    (9, "oak sapling"),
    (10, "cactus sapling"),
    (11, "farmland"),
    (12, "wheat"),
    (13, "lava"),
    (14, "stairs down"),
    (15, "stairs up"),
    (16, "infinite fall"),
    (17, "cloud"),
    (18, "hard rock"),
    (19, "iron ore"),
    (20, "gold ore"),
    (21, "gem ore"),
    (22, "cloud cactus"),
    (24, "lapis"),
    (30, "explode"),
    (31, "wood planks"),
    (32, "stone bricks"),
    (33, "plank wall"),
    (34, "stone wall"),
    (35, "wood door"),
    (36, "wood door"),
    (37, "stone door"),
    (38, "stone door"),
    (39, "lava brick"),
    // Lit tiles from before variants were derived on demand
    (40, "torch sand"),
    (41, "wool"),
    (42, "red wool"),
    (43, "blue wool"),
    (44, "torch grass"),
    (45, "green wool"),
    (46, "torch dirt"),
    (47, "torch wood planks"),
    (48, "torch stone bricks"),
    (49, "torch obsidian"),
    (50, "torch wool"),
    (51, "torch red wool"),
    (52, "torch blue wool"),
    (53, "torch green wool"),
    (54, "torch yellow wool"),
    (55, "torch black wool"),
    (56, "black wool"),
    (57, "wool"),
    (58, "red wool"),
    (59, "blue wool"),
    (60, "green wool"),
    (61, "yellow wool"),
    (62, "black wool"),
    (63, "obsidian"),
    (64, "oak sapling"),
    (65, "cactus sapling"),
    (100, "grass"),
    (101, "sand"),
    (102, "oak tree"),
    (103, "cactus"),
    (104, "water"),
    (105, "dirt"),
    (107, "flower"),
    (108, "stairs up"),
    (109, "stairs down"),
    (110, "wood planks"),
    (111, "stone bricks"),
    (112, "wood door"),
    (113, "wood door"),
    (114, "stone door"),
    (115, "stone door"),
    (116, "obsidian door"),
    (117, "obsidian door"),
    (119, "hole"),
    (120, "obsidian"),
    (121, "obsidian wall"),
    (122, "obsidian door"),
    (123, "obsidian door"),
    (127, "yellow wool"),
];

/// Tile name stored under a legacy id, if the id was ever assigned
pub fn legacy_tile_name(old_id: u16) -> Option<&'static str> {
    LEGACY_TABLE
        .binary_search_by_key(&old_id, |&(id, _)| id)
        .ok()
        .map(|idx| LEGACY_TABLE[idx].1)
}
