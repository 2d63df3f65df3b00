//! Tile registry - id and name lookup, lazy variants, legacy ids

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;
use thiserror::Error;

use super::{ConnectorTile, GroundTile, Tile, TileRef, TorchTile, builtin_tiles};
use crate::simulation::{TileId, legacy_tile_name};

/// Name lookups nested deeper than this are a configuration bug
pub const MAX_NAME_DEPTH: usize = 50;

/// Registry errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TileRegistryError {
    #[error("tile name lookup for '{name}' recursed {depth} levels deep")]
    NameRecursion { name: String, depth: usize },

    #[error("tile id {0} is below the variant offset; only variants may be added at runtime")]
    NotAVariantId(u16),
}

/// Split an encoded `"<name>_<data>"` tile name into its name and data parts
pub fn split_encoded_name(encoded: &str) -> (&str, Option<u8>) {
    match encoded.split_once('_') {
        Some((name, data)) => (name, data.trim().parse().ok()),
        None => (encoded, None),
    }
}

/// Mapping from tile id to tile behavior
///
/// Base tiles are registered up front. Lit variants (`id >= VARIANT_OFFSET`)
/// are built the first time they are requested and cached, so lookups take
/// `&self` and are safe while the simulation runs. A variant is never rebuilt
/// once cached.
#[derive(Debug)]
pub struct TileRegistry {
    tiles: RwLock<AHashMap<u16, TileRef>>,
    /// Uppercase name -> base id
    names: AHashMap<String, u16>,
    /// Uppercase alias -> uppercase target name
    aliases: AHashMap<String, String>,
    fallback: TileRef,
    boundary: TileRef,
}

impl TileRegistry {
    /// Registry with every built-in tile and alias
    pub fn new() -> Self {
        let mut registry = Self::with_tiles(builtin_tiles());
        registry.alias("Obsidian", "Raw Obsidian");
        registry.alias("Hard Rock", "Rock");
        registry.alias("Tilled Dirt", "Farmland");
        registry
    }

    /// Registry over `tiles`; grass and the boundary tile are added if missing
    pub fn with_tiles(tiles: impl IntoIterator<Item = TileRef>) -> Self {
        let fallback: TileRef = Arc::new(GroundTile::grass());
        let boundary: TileRef = Arc::new(ConnectorTile::new());
        let mut registry = Self {
            tiles: RwLock::new(AHashMap::new()),
            names: AHashMap::new(),
            aliases: AHashMap::new(),
            fallback: fallback.clone(),
            boundary: boundary.clone(),
        };
        for tile in tiles {
            registry.register(tile);
        }
        if !registry.contains(TileId::FALLBACK) {
            registry.register(fallback);
        }
        if !registry.contains(TileId::CONNECTOR) {
            registry.register(boundary);
        }
        if let Some(tile) = registry.lookup(TileId::FALLBACK) {
            registry.fallback = tile;
        }
        if let Some(tile) = registry.lookup(TileId::CONNECTOR) {
            registry.boundary = tile;
        }
        registry
    }

    /// Register a base tile. Variant ids are rejected with a warning.
    pub fn register(&mut self, tile: TileRef) {
        let id = tile.id();
        if TileId::is_variant(id) {
            log::warn!(
                "[TILES] Refusing to register variant id {} ({}) as a base tile",
                id,
                tile.name()
            );
            return;
        }
        self.names.insert(tile.name().to_uppercase(), id);
        let tiles = self.tiles.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = tiles.insert(id, tile) {
            log::warn!("[TILES] Tile id {} ({}) registered twice", id, old.name());
        }
    }

    /// Make `alias` resolve to whatever `target` resolves to
    pub fn alias(&mut self, alias: &str, target: &str) {
        self.aliases
            .insert(alias.trim().to_uppercase(), target.trim().to_uppercase());
    }

    /// Register a lazily built variant
    ///
    /// Only variant ids are accepted. If the id is already cached the existing
    /// tile is kept, so every caller sees the same instance.
    pub fn add(&self, id: u16, tile: TileRef) -> Result<TileRef, TileRegistryError> {
        if !TileId::is_variant(id) {
            return Err(TileRegistryError::NotAVariantId(id));
        }
        let mut tiles = self.tiles.write().unwrap_or_else(PoisonError::into_inner);
        Ok(tiles.entry(id).or_insert(tile).clone())
    }

    pub fn contains(&self, id: u16) -> bool {
        self.tiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    fn lookup(&self, id: u16) -> Option<TileRef> {
        self.tiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Tile for `id`
    ///
    /// Unknown base ids fall back to grass with a warning. Variant ids resolve
    /// to the lit variant of `id - VARIANT_OFFSET`, built on first request.
    pub fn get(&self, id: u16) -> TileRef {
        if let Some(tile) = self.lookup(id) {
            return tile;
        }
        if TileId::is_variant(id) {
            let base = self.get(TileId::base_of(id));
            return self.variant(base);
        }
        log::warn!(
            "[TILES] Unknown tile id {} requested; using {}",
            id,
            self.fallback.name()
        );
        self.fallback.clone()
    }

    /// Tile for a signed id as stored by old saves
    pub fn get_signed(&self, raw: i32) -> TileRef {
        self.get(TileId::from_signed(raw))
    }

    /// Lit variant of `base`, built and cached on first request
    pub fn variant(&self, base: TileRef) -> TileRef {
        let Some(id) = TileId::variant_of(base.id()) else {
            log::warn!("[TILES] {} is already a variant", base.name());
            return base;
        };
        if let Some(tile) = self.lookup(id) {
            return tile;
        }
        match TorchTile::over(base.clone()) {
            Some(torch) => {
                log::debug!("[TILES] Built variant {} ({})", id, torch.name());
                // `id` is a variant id, so `add` cannot fail here
                self.add(id, Arc::new(torch)).unwrap_or(base)
            }
            None => base,
        }
    }

    /// Case-insensitive lookup by name
    ///
    /// A `variant-` or `torch ` prefix selects the lit variant of the named
    /// tile, and anything after an underscore is treated as encoded cell data
    /// and ignored. Unknown names fall back to grass with a warning. Alias
    /// chains deeper than [`MAX_NAME_DEPTH`] are an error.
    pub fn get_by_name(&self, name: &str) -> Result<TileRef, TileRegistryError> {
        self.resolve_name(name, 0)
    }

    fn resolve_name(&self, name: &str, depth: usize) -> Result<TileRef, TileRegistryError> {
        if depth > MAX_NAME_DEPTH {
            log::error!("[TILES] Runaway tile name lookup on '{}'", name);
            return Err(TileRegistryError::NameRecursion {
                name: name.to_string(),
                depth,
            });
        }

        let mut key = name.trim().to_uppercase();
        let mut variant = false;
        for prefix in ["VARIANT-", "TORCH "] {
            if let Some(rest) = key.strip_prefix(prefix) {
                key = rest.to_string();
                variant = true;
                break;
            }
        }
        if let Some(idx) = key.find('_') {
            key.truncate(idx);
        }

        let tile = if let Some(target) = self.aliases.get(&key) {
            self.resolve_name(target, depth + 1)?
        } else if let Some(&id) = self.names.get(&key) {
            self.get(id)
        } else {
            log::warn!(
                "[TILES] Invalid tile name '{}' requested; using {}",
                name,
                self.fallback.name()
            );
            self.fallback.clone()
        };

        Ok(if variant { self.variant(tile) } else { tile })
    }

    /// Tile stored under a pre-rework numeric id
    pub fn from_legacy_id(&self, old_id: u16) -> Result<TileRef, TileRegistryError> {
        match legacy_tile_name(old_id) {
            Some(name) => self.get_by_name(name),
            None => {
                log::warn!(
                    "[TILES] Unknown legacy tile id {}; using {}",
                    old_id,
                    self.fallback.name()
                );
                Ok(self.fallback.clone())
            }
        }
    }

    /// Universal fallback (id 0)
    pub fn fallback(&self) -> TileRef {
        self.fallback.clone()
    }

    /// Impassable tile reported outside the grid
    pub fn boundary(&self) -> TileRef {
        self.boundary.clone()
    }

    /// Registered base tiles in id order
    pub fn base_tiles(&self) -> Vec<TileRef> {
        let tiles = self.tiles.read().unwrap_or_else(PoisonError::into_inner);
        let mut base: Vec<TileRef> = tiles
            .values()
            .filter(|t| !TileId::is_variant(t.id()))
            .cloned()
            .collect();
        base.sort_by_key(|t| t.id());
        base
    }

    /// Number of cached tiles, variants included
    pub fn len(&self) -> usize {
        self.tiles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
