//! Tile gene pools drawn from by mutation

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::board::catalog::{TileType, TypeCatalog};
use crate::board::tile::Tile;
use crate::evolution::params::MutationPolicy;
use crate::io::configuration::FOG_OF_WAR_TILE_ID;
use crate::io::error::{Result, invalid_parameter};

/// Tile types available to mutation, split by walkability
///
/// The fog-of-war type is never a gene.
#[derive(Debug, Clone)]
pub struct TileGenes {
    all: Vec<TileType>,
    walkable: Vec<TileType>,
    blocked: Vec<TileType>,
}

impl TileGenes {
    /// Collect the gene pools from a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has no tile type besides fog of war
    pub fn from_catalog(catalog: &TypeCatalog) -> Result<Self> {
        let all: Vec<TileType> = catalog
            .tile_types()
            .filter(|tile| tile.id != FOG_OF_WAR_TILE_ID)
            .cloned()
            .collect();
        if all.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &"tile types",
                &"needs a tile type other than fog of war",
            ));
        }

        let (walkable, blocked): (Vec<TileType>, Vec<TileType>) =
            all.iter().cloned().partition(|tile| tile.is_walkable);
        Ok(Self {
            all,
            walkable,
            blocked,
        })
    }

    /// Every gene
    pub fn all(&self) -> &[TileType] {
        &self.all
    }

    /// Walkable genes
    pub fn walkable(&self) -> &[TileType] {
        &self.walkable
    }

    /// Non-walkable genes
    pub fn blocked(&self) -> &[TileType] {
        &self.blocked
    }

    /// Random replacement for `current`, placed at the same position
    ///
    /// Locked tiles are returned unchanged, as is any tile whose policy pool
    /// is empty.
    pub fn mutate<R: Rng>(&self, current: &Tile, policy: MutationPolicy, rng: &mut R) -> Tile {
        if current.locked {
            return current.clone();
        }
        let pool = match policy {
            MutationPolicy::Any => &self.all,
            MutationPolicy::PreserveWalkability if current.is_walkable => &self.walkable,
            MutationPolicy::PreserveWalkability => &self.blocked,
        };
        pool.choose(rng)
            .map_or_else(|| current.clone(), |gene| gene.to_tile(current.position))
    }
}
