//! Shared catalog and compact map builders for unit tests
//!
//! Compact rows use one character per cell: tile symbols as in the catalog,
//! a digit for a base owned by that player, and `G` for a neutral gold mine.

use mapsmith::board::candidate::MapCandidate;
use mapsmith::board::catalog::{EntityType, TileType, TypeCatalog};
use mapsmith::io::dump::from_dump;

/// Tolerance for comparing computed percentages
pub const EPSILON: f64 = 1e-6;

/// Assert two floats agree within [`EPSILON`]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Catalog JSON matching [`catalog`]
pub const CATALOG_JSON: &str = r##"{
    "tiles": [
        { "id": -1, "name": "Fog", "symbol": "?", "walkable": false },
        { "id": 0, "name": "Plain", "symbol": ".", "walkable": true, "default": true },
        { "id": 1, "name": "Mountain", "symbol": "#", "walkable": false, "blocks_sight": true },
        { "id": 2, "name": "Water", "symbol": "~", "walkable": false },
        { "id": 3, "name": "Forest", "symbol": "f", "walkable": true, "blocks_sight": true }
    ],
    "entities": [
        { "id": 0, "name": "Base", "symbol": "B" },
        { "id": 1, "name": "Gold", "symbol": "G" }
    ]
}"##;

fn tile(id: i32, name: &str, symbol: char, is_walkable: bool, is_default: bool) -> TileType {
    TileType {
        id,
        name: name.to_owned(),
        symbol,
        is_walkable,
        blocks_sight: false,
        is_default,
    }
}

/// Plain, forest, mountain, water and fog tiles with base and gold entities
pub fn catalog() -> TypeCatalog {
    TypeCatalog::new(
        vec![
            tile(-1, "Fog", '?', false, false),
            tile(0, "Plain", '.', true, true),
            tile(1, "Mountain", '#', false, false),
            tile(2, "Water", '~', false, false),
            tile(3, "Forest", 'f', true, false),
        ],
        vec![
            EntityType {
                id: 0,
                name: "Base".to_owned(),
                symbol: 'B',
            },
            EntityType {
                id: 1,
                name: "Gold".to_owned(),
                symbol: 'G',
            },
        ],
    )
    .expect("fixture catalog is valid")
}

/// Expand compact rows into the three-character dump format
pub fn dump(rows: &[&str]) -> String {
    let mut text = String::new();
    for row in rows {
        for cell in row.chars() {
            if cell.is_ascii_digit() {
                text.push('B');
                text.push(cell);
                text.push(' ');
            } else {
                text.push(cell);
                text.push_str("  ");
            }
        }
        text.push('\n');
    }
    text
}

/// Parse compact rows into an unscored candidate
pub fn map(rows: &[&str]) -> MapCandidate {
    from_dump(&dump(rows), &catalog(), "fixture").expect("fixture map parses")
}

/// A 6x6 two-player map with one gold mine and a few obstacles
pub fn arena() -> MapCandidate {
    map(&[
        "0.....", //
        "..#...", //
        "...G..", //
        "..~...", //
        "...#..", //
        ".....1",
    ])
}
