use std::fmt::{Display, Write};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::grid::{Grid, Position, DELTAS};
use crate::pet::Pet;

/// How many pets fit in the car at once.
pub const MAX_CAPTURED: usize = 4;

pub type Pets = SmallVec<[Pet; 8]>;

/// Every direction can yield a plain move and a capturing one.
pub type Successors = SmallVec<[Configuration; 8]>;

/// Where every pet is and where the car is. This is the search key:
/// equality and hashing look at the whole thing, pets in order.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Configuration {
    pets: Pets,
    car: Position,
}

impl Configuration {
    /// `pets` must always come in the same order for the same puzzle.
    pub fn new(pets: impl IntoIterator<Item = Pet>, car: Position) -> Configuration {
        Configuration {
            pets: pets.into_iter().collect(),
            car,
        }
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn car(&self) -> Position {
        self.car
    }

    pub fn captured(&self) -> impl Iterator<Item = &Pet> + '_ {
        self.pets.iter().filter(|p| p.is_captured())
    }

    pub fn is_goal(&self) -> bool {
        self.pets.iter().all(Pet::is_home)
    }

    /// All configurations one car move away, in direction order.
    pub fn successors(&self, grid: &Grid) -> Successors {
        let mut out = Successors::new();
        perform_moves(self, grid, &mut out);
        out
    }

    pub fn display<'a>(&'a self, grid: &'a Grid) -> Snapshot<'a> {
        Snapshot {
            grid,
            configuration: self,
        }
    }
}

// the car drives from one road cell to the next, passing over the
// connector between them; both have to be on the map and open
fn perform_moves(from: &Configuration, grid: &Grid, out: &mut Successors) {
    let room_in_car = from.captured().count() < MAX_CAPTURED;

    for &delta in DELTAS {
        let connector = from.car.step(delta, 1);
        let car = from.car.step(delta, 2);
        if !grid.is_open(connector) || !grid.is_open(car) {
            continue;
        }

        let mut pets = from.pets.clone();
        for pet in &mut pets {
            pet.follow_car(car, false);
        }

        let capturable = room_in_car
            .then(|| pets.iter().position(|p| p.can_be_captured_at(car)))
            .flatten();

        if let Some(ix) = capturable {
            // NB: only the first pet found is picked up; maps never put
            // two animals on one cell
            let mut with_capture = pets.clone();
            with_capture[ix].follow_car(car, true);

            out.push(Configuration { pets, car });
            out.push(Configuration {
                pets: with_capture,
                car,
            });
        } else {
            out.push(Configuration { pets, car });
        }
    }
}

/// A configuration drawn over its map, plus the list of pets in the car.
pub struct Snapshot<'a> {
    grid: &'a Grid,
    configuration: &'a Configuration,
}

impl Display for Snapshot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pets = self.configuration.pets();

        for i in 0..self.grid.rows() {
            for j in 0..self.grid.cols() {
                let pos = Position::new(i as i32, j as i32);

                let c = if pos == self.configuration.car() {
                    '@'
                } else {
                    match pets
                        .iter()
                        .find(|p| p.house_position() == pos || p.animal_position() == pos)
                    {
                        Some(p) if p.house_position() == pos => p.house_name(),
                        Some(p) => p.animal_name(),
                        None => self.grid[(i, j)].glyph(),
                    }
                };

                f.write_char(c)?;
            }
            f.write_char('\n')?;
        }

        write!(
            f,
            "Captured: {}",
            self.configuration.captured().map(Pet::animal_name).join(" ")
        )
    }
}
