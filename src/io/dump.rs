//! Textual board dumps
//!
//! One line per row, three characters per cell: the tile symbol followed by
//! two slots. An entity overwrites the tile symbol with its own and, when a
//! player owns it, writes the first digit of the owner id into the first
//! slot. Parsing reverses this: cells drawn with an entity symbol get the
//! catalog's default tile beneath the entity. Trailing whitespace on a row
//! is ignored.

use crate::board::candidate::MapCandidate;
use crate::board::catalog::TypeCatalog;
use crate::board::grid::Board;
use crate::board::tile::{Coord, Owner};
use crate::io::configuration::DUMP_CELL_WIDTH;
use crate::io::error::{MapError, Result, WithPath, invalid_board};
use std::path::Path;

/// Render a candidate as a textual dump
///
/// # Errors
///
/// Returns an error if a tile or entity type is missing from the catalog
pub fn to_dump(candidate: &MapCandidate, catalog: &TypeCatalog) -> Result<String> {
    let board = candidate.board();
    let mut rows = vec![vec![' '; board.width() * DUMP_CELL_WIDTH]; board.height()];

    for tile in board.tiles() {
        let symbol = catalog.tile_type(tile.type_id)?.symbol;
        if let Some(slot) = cell_slot(&mut rows, tile.position, 0) {
            *slot = symbol;
        }
    }

    for entity in candidate.entities() {
        let symbol = catalog.entity_type(entity.type_id)?.symbol;
        if let Some(slot) = cell_slot(&mut rows, entity.position, 0) {
            *slot = symbol;
        }
        if let Owner::Player(player) = entity.owner
            && let Some(digit) = player.to_string().chars().next()
            && let Some(slot) = cell_slot(&mut rows, entity.position, 1)
        {
            *slot = digit;
        }
    }

    let mut text = String::with_capacity(board.len() * DUMP_CELL_WIDTH + board.height());
    for row in rows {
        text.extend(row);
        text.push('\n');
    }
    Ok(text)
}

fn cell_slot(rows: &mut [Vec<char>], pos: Coord, offset: usize) -> Option<&mut char> {
    let row = usize::try_from(pos.y).ok()?;
    let col = usize::try_from(pos.x).ok()?;
    rows.get_mut(row)?.get_mut(col * DUMP_CELL_WIDTH + offset)
}

/// Parse a textual dump into a candidate named `name`
///
/// Entities are numbered in row-major order.
///
/// # Errors
///
/// Returns an error if:
/// - The dump has no rows
/// - Rows differ in cell count
/// - A cell symbol matches no tile or entity type
/// - An entity's owner slot holds something other than a digit or a blank
pub fn from_dump(text: &str, catalog: &TypeCatalog, name: &str) -> Result<MapCandidate> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.trim_end().chars().collect::<Vec<char>>())
        .collect();
    let height = rows
        .iter()
        .rposition(|row| !row.is_empty())
        .map_or(0, |last| last + 1);
    let rows = rows.get(..height).unwrap_or_default();
    let Some(first) = rows.first() else {
        return Err(invalid_board(&"dump contains no rows"));
    };

    let width = first.len().div_ceil(DUMP_CELL_WIDTH);
    let mut board = Board::filled(width, height, catalog.default_tile())?;
    let mut placements = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        let cells = row.len().div_ceil(DUMP_CELL_WIDTH);
        if cells != width {
            return Err(invalid_board(&format!(
                "row {row_index} has {cells} cells, expected {width}"
            )));
        }

        for (col_index, cell) in row.chunks(DUMP_CELL_WIDTH).enumerate() {
            let position = Coord::new(col_index as i32, row_index as i32);
            let symbol = cell.first().copied().unwrap_or(' ');

            if let Some(tile_type) = catalog.tile_by_symbol(symbol) {
                board.set(position, tile_type.to_tile(position))?;
            } else if let Some(entity_type) = catalog.entity_by_symbol(symbol) {
                let owner = match cell.get(1).copied() {
                    None | Some(' ') => Owner::Neutral,
                    Some(digit) => digit.to_digit(10).map(Owner::Player).ok_or(
                        MapError::UnknownSymbol {
                            symbol: digit,
                            row: row_index,
                            col: col_index,
                        },
                    )?,
                };
                placements.push((entity_type, owner, position));
            } else {
                return Err(MapError::UnknownSymbol {
                    symbol,
                    row: row_index,
                    col: col_index,
                });
            }
        }
    }

    let mut candidate = MapCandidate::new(name, board);
    for (entity_type, owner, position) in placements {
        candidate.add_entity(entity_type, owner, position)?;
    }
    Ok(candidate)
}

/// Write a candidate's dump to `path`
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written
pub fn write_dump(path: &Path, candidate: &MapCandidate, catalog: &TypeCatalog) -> Result<()> {
    let text = to_dump(candidate, catalog)?;
    std::fs::write(path, text).with_path(path, "write dump")
}

/// Read a dump from `path`, naming the candidate after the file stem
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse
pub fn read_dump(path: &Path, catalog: &TypeCatalog) -> Result<MapCandidate> {
    let text = std::fs::read_to_string(path).with_path(path, "read dump")?;
    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    from_dump(&text, catalog, &name)
}
