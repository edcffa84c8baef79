//! Solver for "pet detective" street puzzles: a car drives around a grid of
//! roads picking up pets and dropping them off at their houses, and we want
//! the fewest moves that get every pet home.
//!
//! Map format, one character per cell:
//! - `*` is a road cell, `+` a connector between two road cells, a space is
//!   blocked,
//! - `@` is where the car starts,
//! - a lowercase letter is a pet and the matching uppercase letter its house.
//!
//! Road cells sit on even rows and columns, connectors between them.

use std::{collections::BTreeMap, fs, path::Path, sync::Arc};

pub mod error;
pub mod grid;
pub mod pet;
pub mod registry;
pub mod search;
pub mod state;

pub use error::{Error, Result};
pub use grid::{Cell, Grid, Position};
pub use pet::{Pet, PetBuilder};
pub use registry::{Edge, Registry, StateId, StateNode};
pub use search::{solve, Search, Solution, Stats};
pub use state::{Configuration, Snapshot, MAX_CAPTURED};

const CAR: char = '@';

/// A parsed map: the streets plus where everything starts.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub grid: Arc<Grid>,
    pub initial: Configuration,
}

impl Puzzle {
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Puzzle> {
        let content = fs::read_to_string(path)?;
        parse_map(&content)
    }

    pub fn solve(&self) -> Solution {
        solve(&self.grid, &self.initial)
    }
}

// leading and trailing blank lines are not part of the map
pub(crate) fn map_lines(s: &str) -> impl Iterator<Item = &str> {
    let lines: Vec<&str> = s.lines().collect();
    let first = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let last = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(first, |ix| ix + 1);

    lines[first..last].to_vec().into_iter()
}

pub fn parse_map(s: &str) -> Result<Puzzle> {
    let mut builders: BTreeMap<char, PetBuilder> = BTreeMap::new();
    let mut car = Position::UNSET;
    let mut rows = Vec::new();

    for (i, line) in map_lines(s).enumerate() {
        let mut row = Vec::with_capacity(line.len());

        for (j, c) in line.chars().enumerate() {
            let pos = Position::new(i as i32, j as i32);

            let cell = if c.is_ascii_alphabetic() {
                builders
                    .entry(c.to_ascii_lowercase())
                    .or_default()
                    .add(c, pos)?;
                Cell::Road
            } else if c == CAR {
                if car.is_set() {
                    return Err(Error::DuplicateVehicle {
                        first: car,
                        second: pos,
                    });
                }
                car = pos;
                Cell::Road
            } else {
                u8::try_from(c)
                    .ok()
                    .and_then(Cell::from_byte)
                    .ok_or(Error::BadCharacter { ch: c, position: pos })?
            };

            row.push(cell);
        }

        rows.push(row);
    }

    let grid = Grid::new(rows)?;

    if !car.is_set() {
        return Err(Error::NoVehicle);
    }

    // BTreeMap keeps pets sorted by name, which fixes their order in every
    // configuration of this puzzle
    let pets = builders
        .values()
        .map(PetBuilder::build)
        .collect::<Result<Vec<_>>>()?;

    Ok(Puzzle {
        grid: Arc::new(grid),
        initial: Configuration::new(pets, car),
    })
}
