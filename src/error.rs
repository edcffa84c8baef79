use thiserror::Error;

use crate::grid::Position;

/// Everything that can go wrong while turning a map into a [`crate::Puzzle`].
///
/// The search itself never fails; an unsolvable puzzle is reported through
/// [`crate::Solution::path`] being `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("map is empty")]
    EmptyMap,

    #[error("line {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("bad character {ch:?} at {position}")]
    BadCharacter { ch: char, position: Position },

    #[error("invalid item name {0:?}")]
    InvalidName(char),

    #[error("item {found:?} does not belong to pet {expected:?}")]
    WrongName { expected: char, found: char },

    #[error("invalid position of {name:?} at {position}: pets and houses must be on even rows and columns")]
    OffLattice { name: char, position: Position },

    #[error("{name:?} appears more than once (at {first} and {second})")]
    DuplicateItem {
        name: char,
        first: Position,
        second: Position,
    },

    #[error("insufficient data to build pet {0:?}: needs both an animal and a house")]
    IncompletePet(char),

    #[error("no car position specified")]
    NoVehicle,

    #[error("more than one car (at {first} and {second})")]
    DuplicateVehicle { first: Position, second: Position },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
