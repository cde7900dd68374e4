//! Map candidate: a board, its entities and the metrics scored on them

use std::collections::{BTreeMap, BTreeSet};

use crate::board::catalog::EntityType;
use crate::board::grid::Board;
use crate::board::tile::{Coord, Entity, Owner, Tile};
use crate::io::error::{MapError, Result, invalid_board};
use crate::metrics::stats::MapStats;

/// One candidate map as produced by editing, the GA or the archive
///
/// Entity positions always lie on the board. Any edit clears the stored
/// scores, so `stats` only ever describes the current layout.
#[derive(Debug, Clone)]
pub struct MapCandidate {
    /// Display name
    pub name: String,
    board: Board,
    entities: Vec<Entity>,
    /// Player id to indices into `entities`
    owned: BTreeMap<u32, Vec<usize>>,
    next_entity_id: u32,
    feasible: bool,
    stats: MapStats,
}

impl MapCandidate {
    /// Create a candidate without entities
    pub fn new(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
            entities: Vec::new(),
            owned: BTreeMap::new(),
            next_entity_id: 0,
            feasible: false,
            stats: MapStats::default(),
        }
    }

    /// Create a candidate from an existing entity list
    ///
    /// # Errors
    ///
    /// Returns an error if an entity lies off the board or two entities
    /// share an id
    pub fn with_entities(
        name: impl Into<String>,
        board: Board,
        entities: Vec<Entity>,
    ) -> Result<Self> {
        let mut ids = BTreeSet::new();
        for entity in &entities {
            if !board.is_in_bounds(entity.position) {
                return Err(MapError::OutOfBounds {
                    coord: entity.position,
                    dimensions: (board.width(), board.height()),
                });
            }
            if !ids.insert(entity.id) {
                return Err(invalid_board(&format!("duplicate entity id {}", entity.id)));
            }
        }

        let next_entity_id = ids.last().map_or(0, |&id| id + 1);
        let mut candidate = Self::new(name, board);
        candidate.entities = entities;
        candidate.next_entity_id = next_entity_id;
        candidate.regroup();
        Ok(candidate)
    }

    /// The terrain grid
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// All entities in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Whether the last scoring found the map playable
    pub const fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Metrics from the last scoring
    pub const fn stats(&self) -> &MapStats {
        &self.stats
    }

    /// Store the result of scoring this candidate
    pub fn apply_scores(&mut self, feasible: bool, stats: MapStats) {
        self.feasible = feasible;
        self.stats = stats;
    }

    /// Place a new entity and return its id
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `position` is off the board
    pub fn add_entity(
        &mut self,
        entity_type: &EntityType,
        owner: Owner,
        position: Coord,
    ) -> Result<u32> {
        if !self.board.is_in_bounds(position) {
            return Err(MapError::OutOfBounds {
                coord: position,
                dimensions: (self.board.width(), self.board.height()),
            });
        }

        let id = self.next_entity_id;
        self.next_entity_id += 1;
        self.entities.push(Entity {
            id,
            type_id: entity_type.id,
            owner,
            position,
        });
        self.invalidate();
        self.regroup();
        Ok(id)
    }

    /// Remove every entity standing on `position`, returning how many went
    pub fn remove_entity_at(&mut self, position: Coord) -> usize {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.position != position);
        let removed = before - self.entities.len();
        if removed > 0 {
            self.invalidate();
            self.regroup();
        }
        removed
    }

    /// Remove all entities and restart id assignment
    pub fn clear_entities(&mut self) {
        self.entities.clear();
        self.next_entity_id = 0;
        self.invalidate();
        self.regroup();
    }

    /// Replace the tile at `position`
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `position` is off the board
    pub fn set_tile(&mut self, position: Coord, tile: Tile) -> Result<()> {
        self.board.set(position, tile)?;
        self.invalidate();
        Ok(())
    }

    /// Entity with the given id
    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// First entity standing on `position`
    pub fn entity_at(&self, position: Coord) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.position == position)
    }

    /// Cells holding at least one entity
    pub fn occupied_cells(&self) -> BTreeSet<Coord> {
        self.entities.iter().map(|entity| entity.position).collect()
    }

    /// Ids of the players owning at least one entity, ascending
    pub fn players(&self) -> impl Iterator<Item = u32> + '_ {
        self.owned.keys().copied()
    }

    /// Number of distinct players
    pub fn player_count(&self) -> usize {
        self.owned.len()
    }

    /// Entities owned by `player`
    pub fn owned_by(&self, player: u32) -> impl Iterator<Item = &Entity> {
        self.owned
            .get(&player)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.entities.get(index))
    }

    /// Entities owned by anyone other than `player`
    pub fn rivals_of(&self, player: u32) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| matches!(entity.owner, Owner::Player(id) if id != player))
    }

    /// Unowned entities, i.e. resources
    pub fn neutral_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|entity| entity.owner.is_neutral())
    }

    fn invalidate(&mut self) {
        self.feasible = false;
        self.stats = MapStats::default();
    }

    fn regroup(&mut self) {
        self.owned.clear();
        for (index, entity) in self.entities.iter().enumerate() {
            if let Owner::Player(player) = entity.owner {
                self.owned.entry(player).or_default().push(index);
            }
        }
    }
}
