use crate::error::{Error, Result};
use crate::grid::Position;

/// A pet and its house. Only `animal` and `captured` change once built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Pet {
    name: char,
    animal: Position,
    house: Position,
    captured: bool,
}

impl Pet {
    pub fn animal_name(&self) -> char {
        self.name
    }

    pub fn house_name(&self) -> char {
        self.name.to_ascii_uppercase()
    }

    pub fn animal_position(&self) -> Position {
        self.animal
    }

    pub fn house_position(&self) -> Position {
        self.house
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn is_home(&self) -> bool {
        !self.captured && self.animal == self.house
    }

    /// Could be picked up by a car arriving at `pos`.
    pub fn can_be_captured_at(&self, pos: Position) -> bool {
        !self.is_home() && !self.captured && self.animal == pos
    }

    /// Reacts to the car arriving at `car`.
    ///
    /// A pet at home never moves again. A captured pet rides along with the
    /// car and is dropped off as soon as it reaches its house. A free pet
    /// sitting under the car is picked up only when `capture` is set.
    pub fn follow_car(&mut self, car: Position, capture: bool) {
        if self.is_home() {
            return;
        }

        if self.captured {
            self.animal = car;
        } else if self.animal == car && capture {
            self.captured = true;
        }

        if self.animal == self.house {
            self.captured = false;
        }
    }
}

/// Collects the animal and the house cell of one pet, in either order.
#[derive(Clone, Debug, Default)]
pub struct PetBuilder {
    name: Option<char>,
    animal: Option<Position>,
    house: Option<Position>,
}

impl PetBuilder {
    pub fn new() -> PetBuilder {
        PetBuilder::default()
    }

    /// Records `c` seen at `pos`: lowercase is the animal, uppercase the house.
    pub fn add(&mut self, c: char, pos: Position) -> Result<&mut PetBuilder> {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidName(c));
        }

        let name = c.to_ascii_lowercase();
        match self.name {
            None => self.name = Some(name),
            Some(expected) if expected != name => {
                return Err(Error::WrongName { expected, found: c })
            }
            Some(_) => {}
        }

        if !pos.on_lattice() {
            return Err(Error::OffLattice { name: c, position: pos });
        }

        let slot = if c.is_ascii_uppercase() {
            &mut self.house
        } else {
            &mut self.animal
        };

        if let Some(first) = *slot {
            return Err(Error::DuplicateItem {
                name: c,
                first,
                second: pos,
            });
        }

        *slot = Some(pos);
        Ok(self)
    }

    pub fn build(&self) -> Result<Pet> {
        let name = self.name.ok_or(Error::InvalidName('\0'))?;
        match (self.animal, self.house) {
            (Some(animal), Some(house)) => Ok(Pet {
                name,
                animal,
                house,
                captured: false,
            }),
            _ => Err(Error::IncompletePet(name)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pet(animal: (i32, i32), house: (i32, i32)) -> Pet {
        let mut b = PetBuilder::new();
        b.add('a', Position::new(animal.0, animal.1)).unwrap();
        b.add('A', Position::new(house.0, house.1)).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn builds_in_any_order() {
        let mut b = PetBuilder::new();
        b.add('F', Position::new(0, 4))
            .unwrap()
            .add('f', Position::new(0, 6))
            .unwrap();
        let p = b.build().unwrap();

        assert_eq!(p.animal_name(), 'f');
        assert_eq!(p.house_name(), 'F');
        assert_eq!(p.animal_position(), Position::new(0, 6));
        assert_eq!(p.house_position(), Position::new(0, 4));
        assert!(!p.is_captured());
        assert!(!p.is_home());
    }

    #[test]
    fn rejects_bad_input() {
        let mut b = PetBuilder::new();
        assert!(matches!(
            b.add('1', Position::new(0, 0)),
            Err(Error::InvalidName('1'))
        ));
        assert!(matches!(
            b.add('a', Position::new(1, 0)),
            Err(Error::OffLattice { name: 'a', .. })
        ));

        let mut b = PetBuilder::new();
        b.add('a', Position::new(0, 0)).unwrap();
        assert!(matches!(
            b.add('B', Position::new(0, 2)),
            Err(Error::WrongName {
                expected: 'a',
                found: 'B'
            })
        ));
        assert!(matches!(
            b.add('a', Position::new(0, 2)),
            Err(Error::DuplicateItem { name: 'a', .. })
        ));
        assert!(matches!(b.build(), Err(Error::IncompletePet('a'))));
    }

    #[test]
    fn home_pet_is_inert() {
        let home = pet((2, 2), (2, 2));
        assert!(home.is_home());

        for row in -2..6 {
            for col in -2..6 {
                for capture in [false, true] {
                    let mut p = home;
                    p.follow_car(Position::new(row, col), capture);
                    assert_eq!(p, home);
                }
            }
        }
    }

    #[test]
    fn capture_then_deliver() {
        let mut p = pet((0, 0), (4, 4));
        assert!(p.can_be_captured_at(Position::new(0, 0)));

        p.follow_car(Position::new(0, 0), true);
        assert!(p.is_captured());
        assert!(!p.can_be_captured_at(Position::new(0, 0)));

        p.follow_car(Position::new(4, 4), false);
        assert!(!p.is_captured());
        assert!(p.is_home());
    }

    #[test]
    fn free_pet_needs_capture_flag() {
        let mut p = pet((0, 0), (4, 4));
        p.follow_car(Position::new(0, 0), false);
        assert!(!p.is_captured());

        p.follow_car(Position::new(0, 2), true);
        assert!(!p.is_captured());
        assert_eq!(p.animal_position(), Position::new(0, 0));
    }

    #[test]
    fn captured_pet_rides_along() {
        let mut p = pet((0, 0), (4, 4));
        p.follow_car(Position::new(0, 0), true);
        p.follow_car(Position::new(0, 2), false);
        p.follow_car(Position::new(2, 2), true);

        assert!(p.is_captured());
        assert_eq!(p.animal_position(), Position::new(2, 2));
    }
}
