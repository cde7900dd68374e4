//! Tile and entity type catalog supplied by the game configuration

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::board::tile::{Coord, Tile};
use crate::io::configuration::FOG_OF_WAR_TILE_ID;
use crate::io::error::{MapError, Result, WithPath};

/// Terrain type definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TileType {
    /// Catalog id
    pub id: i32,
    /// Human readable name
    pub name: String,
    /// Character used in textual board dumps
    pub symbol: char,
    /// Whether tiles of this type can be crossed
    #[serde(rename = "walkable")]
    pub is_walkable: bool,
    /// Whether tiles of this type obstruct sight
    #[serde(default)]
    pub blocks_sight: bool,
    /// Type placed when a map is created or an entity hides the terrain
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

impl TileType {
    /// Instantiate an unlocked tile of this type at `position`
    pub fn to_tile(&self, position: Coord) -> Tile {
        Tile {
            type_id: self.id,
            is_walkable: self.is_walkable,
            blocks_sight: self.blocks_sight,
            locked: false,
            position,
        }
    }
}

/// Entity type definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityType {
    /// Catalog id
    pub id: i32,
    /// Human readable name
    pub name: String,
    /// Character used in textual board dumps
    pub symbol: char,
}

/// On-disk catalog layout
#[derive(Deserialize)]
struct CatalogFile {
    tiles: Vec<TileType>,
    #[serde(default)]
    entities: Vec<EntityType>,
}

/// Read-only mapping from type ids to tile and entity definitions
///
/// Ordered maps keep gene pools and symbol lookups deterministic for a
/// given seed.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    tile_types: BTreeMap<i32, TileType>,
    entity_types: BTreeMap<i32, EntityType>,
    default_tile: TileType,
}

impl TypeCatalog {
    /// Build a catalog from type lists
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tile types are given
    /// - Two types of the same kind share an id
    /// - Two types share a dump symbol, or a symbol is whitespace or a digit
    /// - More than one tile type is flagged as default
    /// - No default is flagged and no walkable tile type exists
    pub fn new(tiles: Vec<TileType>, entities: Vec<EntityType>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_catalog("at least one tile type is required"));
        }

        let mut symbols = BTreeSet::new();
        let mut check_symbol = |symbol: char, name: &str| {
            if symbol.is_whitespace() || symbol.is_ascii_digit() {
                return Err(invalid_catalog(format!(
                    "symbol of '{name}' must not be whitespace or a digit"
                )));
            }
            if !symbols.insert(symbol) {
                return Err(invalid_catalog(format!(
                    "symbol '{symbol}' of '{name}' is already in use"
                )));
            }
            Ok(())
        };

        let mut tile_types = BTreeMap::new();
        for tile in tiles {
            check_symbol(tile.symbol, &tile.name)?;
            let id = tile.id;
            if tile_types.insert(id, tile).is_some() {
                return Err(invalid_catalog(format!("duplicate tile type id {id}")));
            }
        }

        let mut entity_types = BTreeMap::new();
        for entity in entities {
            check_symbol(entity.symbol, &entity.name)?;
            let id = entity.id;
            if entity_types.insert(id, entity).is_some() {
                return Err(invalid_catalog(format!("duplicate entity type id {id}")));
            }
        }

        let flagged: Vec<&TileType> = tile_types.values().filter(|tile| tile.is_default).collect();
        let default_tile = match flagged.as_slice() {
            [tile] => (*tile).clone(),
            [] => tile_types
                .values()
                .find(|tile| tile.is_walkable && tile.id != FOG_OF_WAR_TILE_ID)
                .cloned()
                .ok_or_else(|| invalid_catalog("no default tile and no walkable tile type"))?,
            _ => return Err(invalid_catalog("more than one tile type is flagged default")),
        };

        Ok(Self {
            tile_types,
            entity_types,
            default_tile,
        })
    }

    /// Parse a catalog from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON doesn't match the catalog schema or the
    /// catalog fails validation
    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|source| MapError::CatalogParse {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::new(file.tiles, file.entities)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read catalog")?;
        Self::from_json(&text, path)
    }

    /// Look up a tile type
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownTileType`] if the id is not in the catalog
    pub fn tile_type(&self, id: i32) -> Result<&TileType> {
        self.tile_types
            .get(&id)
            .ok_or(MapError::UnknownTileType { id })
    }

    /// Look up an entity type
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownEntityType`] if the id is not in the catalog
    pub fn entity_type(&self, id: i32) -> Result<&EntityType> {
        self.entity_types
            .get(&id)
            .ok_or(MapError::UnknownEntityType { id })
    }

    /// The tile type placed on fresh maps and under entities
    pub const fn default_tile(&self) -> &TileType {
        &self.default_tile
    }

    /// All tile types in id order
    pub fn tile_types(&self) -> impl Iterator<Item = &TileType> {
        self.tile_types.values()
    }

    /// All entity types in id order
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.entity_types.values()
    }

    /// Tile type drawn with `symbol`, if any
    pub fn tile_by_symbol(&self, symbol: char) -> Option<&TileType> {
        self.tile_types.values().find(|tile| tile.symbol == symbol)
    }

    /// Entity type drawn with `symbol`, if any
    pub fn entity_by_symbol(&self, symbol: char) -> Option<&EntityType> {
        self.entity_types
            .values()
            .find(|entity| entity.symbol == symbol)
    }
}

fn invalid_catalog(reason: impl Into<String>) -> MapError {
    MapError::InvalidCatalog {
        reason: reason.into(),
    }
}
