//! Metric groups stored on every scored candidate

use std::collections::BTreeMap;

/// Counts and distances describing the map layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicStats {
    /// Neutral entities on the map
    pub available_resources: usize,
    /// Walkable tiles reachable from the first entity
    pub used_space: usize,
    /// Entities owned by each player
    pub owned_entities: BTreeMap<u32, usize>,
    /// Shortest path between entities of different players
    pub min_base_distance: u32,
    /// Mean path length between entities of different players
    pub average_base_distance: f64,
    /// Longest path between entities of different players
    pub max_base_distance: u32,
}

/// Walkability symmetry per reflection axis, as percentages
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SymmetryStats {
    /// Mirror across the horizontal centre line
    pub horizontal: f64,
    /// Mirror across the vertical centre line
    pub vertical: f64,
    /// Mirror across the top-left to bottom-right diagonal
    pub main_diagonal: f64,
    /// Mirror across the top-right to bottom-left diagonal
    pub anti_diagonal: f64,
    /// Mean of the four axes
    pub overall: f64,
}

/// Entity-related fairness and safety values, as percentages
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntityStats {
    /// How evenly entity types are split between players
    pub allocation_fairness: f64,
    /// Reachable area that some player controls, weighted by margin
    pub safe_area: f64,
    /// Worst player's controlled area relative to the best player's
    pub safe_area_fairness: f64,
    /// Resource tiles that some player controls, weighted by margin
    pub resource_safety: f64,
    /// Worst player's controlled resources relative to the best player's
    pub resource_safety_fairness: f64,
    /// Tiles crossed on the way to rivals, relative to the walkable area
    pub exploration: f64,
    /// Worst player's exploration relative to the best player's
    pub exploration_fairness: f64,
}

/// Headline fitness values, as percentages
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessStats {
    /// Overall walkability symmetry
    pub overall_symmetry: f64,
    /// Mean of the safe area, exploration and resource safety fairness
    pub overall_player_fairness: f64,
}

/// Every metric group of one candidate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapStats {
    /// Layout counts and distances
    pub basic: BasicStats,
    /// Per-axis symmetry
    pub symmetry: SymmetryStats,
    /// Fairness and safety
    pub entity: EntityStats,
    /// Headline fitness
    pub fitness: FitnessStats,
}

impl MapStats {
    /// Percentage metrics with their display labels
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Overall Symmetry", self.fitness.overall_symmetry),
            ("Overall Player Fairness", self.fitness.overall_player_fairness),
            ("Horizontal Symmetry", self.symmetry.horizontal),
            ("Vertical Symmetry", self.symmetry.vertical),
            ("Main Diagonal Symmetry", self.symmetry.main_diagonal),
            ("Anti Diagonal Symmetry", self.symmetry.anti_diagonal),
            ("Entity Allocation Fairness", self.entity.allocation_fairness),
            ("Safe Areas", self.entity.safe_area),
            ("Safe Area Fairness", self.entity.safe_area_fairness),
            ("Resource Safety", self.entity.resource_safety),
            ("Resource Safety Fairness", self.entity.resource_safety_fairness),
            ("Exploration", self.entity.exploration),
            ("Exploration Fairness", self.entity.exploration_fairness),
        ]
    }
}
