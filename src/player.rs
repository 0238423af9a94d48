use crate::map::{Cell, Map};
use crate::position::{Direction, Position};

pub const MAX_HEALTH: u32 = 100;

/// The result of a single player step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Move {
    Blocked,
    Moved,
    /// Moved onto scrap and picked it up.
    Collected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Position,
    health: u32,
    scrap: u32,
}

impl Player {
    pub fn new(position: Position) -> Player {
        Player {
            position,
            health: MAX_HEALTH,
            scrap: 0,
        }
    }

    /// Steps one cell in `direction`. Walls are silently refused.
    pub fn step(&mut self, direction: Direction, map: &mut Map) -> Move {
        let target = self.position.step(direction);

        if map.is_wall(target) {
            return Move::Blocked;
        }

        self.position = target;

        if map.get(target) == Cell::Resource {
            self.scrap += 1;
            map.set(target, Cell::Floor);
            return Move::Collected;
        }

        Move::Moved
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restores full health. Carried scrap is lost.
    pub fn revive(&mut self) {
        self.health = MAX_HEALTH;
        self.scrap = 0;
    }

    /// Puts the player at the start of a new day with empty pockets.
    pub fn enter(&mut self, position: Position) {
        self.position = position;
        self.scrap = 0;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn scrap(&self) -> u32 {
        self.scrap
    }
}
