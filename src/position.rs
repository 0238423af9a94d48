use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::Serialize;

/// A cell coordinate on the map, `x` being the column and `y` the row.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The neighbouring cell one step away in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        match direction {
            Direction::North => Position::new(self.x, self.y - 1),
            Direction::South => Position::new(self.x, self.y + 1),
            Direction::West => Position::new(self.x - 1, self.y),
            Direction::East => Position::new(self.x + 1, self.y),
        }
    }
}

/// Represents the direction an entity can move.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.gen_range(0..4) {
            0 => Direction::North,
            1 => Direction::South,
            2 => Direction::West,
            _ => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn when_computing_the_manhattan_distance_both_axes_are_summed() {
        let a = Position::new(5, 5);
        let b = Position::new(2, 9);

        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn when_stepping_north_the_row_decreases() {
        let origin = Position::new(3, 3);

        assert_eq!(origin.step(Direction::North), Position::new(3, 2));
        assert_eq!(origin.step(Direction::South), Position::new(3, 4));
        assert_eq!(origin.step(Direction::West), Position::new(2, 3));
        assert_eq!(origin.step(Direction::East), Position::new(4, 3));
    }

    #[test]
    fn when_sampling_directions_all_four_are_produced() {
        let mut rng = StdRng::seed_from_u64(0);
        let directions: Vec<Direction> = (0..200).map(|_| rng.gen()).collect();

        assert!(directions.contains(&Direction::North));
        assert!(directions.contains(&Direction::South));
        assert!(directions.contains(&Direction::West));
        assert!(directions.contains(&Direction::East));
    }
}
