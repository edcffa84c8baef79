use std::{
    fmt::{Display, Write},
    ops::Index,
};

use crate::error::{Error, Result};

/// A cell coordinate. Rows grow downwards, columns to the right.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Sentinel for a position that has not been seen yet.
    pub const UNSET: Position = Position { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    pub fn is_set(self) -> bool {
        self != Position::UNSET
    }

    /// Road cells (and so pets and houses) live on even rows and columns;
    /// odd coordinates are connectors between them.
    pub fn on_lattice(self) -> bool {
        self.row % 2 == 0 && self.col % 2 == 0
    }

    pub fn step(self, delta: (i32, i32), times: i32) -> Position {
        Position {
            row: self.row + delta.0 * times,
            col: self.col + delta.1 * times,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::UNSET
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Unit moves in the order successors are generated: right, down, left, up.
pub const DELTAS: &[(i32, i32)] = &[(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const ROAD: u8 = b'*';
pub const CONNECTOR: u8 = b'+';
pub const BLOCKED: u8 = b' ';

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    Road,
    Connector,
    Blocked,
}

impl Cell {
    pub fn from_byte(c: u8) -> Option<Cell> {
        match c {
            ROAD => Some(Cell::Road),
            CONNECTOR => Some(Cell::Connector),
            BLOCKED => Some(Cell::Blocked),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        (match self {
            Cell::Road => ROAD,
            Cell::Connector => CONNECTOR,
            Cell::Blocked => BLOCKED,
        }) as char
    }
}

/// The street map. Immutable once built and shared by every state of a search.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Grid {
    len_i: usize,
    len_j: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Grid> {
        let len_i = rows.len();
        let len_j = rows.first().map(Vec::len).ok_or(Error::EmptyMap)?;
        if len_j == 0 {
            return Err(Error::EmptyMap);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != len_j)
        {
            return Err(Error::RaggedRows {
                row,
                found,
                expected: len_j,
            });
        }

        let cells = rows.into_iter().flatten().collect();
        Ok(Grid {
            len_i,
            len_j,
            cells,
        })
    }

    /// Parses a map made only of road, connector and blocked cells.
    pub fn parse(s: &str) -> Result<Grid> {
        let rows = crate::map_lines(s)
            .enumerate()
            .map(|(i, line)| {
                line.bytes()
                    .enumerate()
                    .map(|(j, c)| {
                        Cell::from_byte(c).ok_or(Error::BadCharacter {
                            ch: c as char,
                            position: Position::new(i as i32, j as i32),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Grid::new(rows)
    }

    pub fn rows(&self) -> usize {
        self.len_i
    }

    pub fn cols(&self) -> usize {
        self.len_j
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }

        let (i, j) = (pos.row as usize, pos.col as usize);
        if i >= self.len_i || j >= self.len_j {
            return None;
        }

        Some(self[(i, j)])
    }

    /// True when `pos` is inside the map and not blocked.
    pub fn is_open(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Road | Cell::Connector))
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index.0 * self.len_j + index.1]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.cells.chunks(self.len_j) {
            for c in line {
                f.write_char(c.glyph())?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}
