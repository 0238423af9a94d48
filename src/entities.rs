use crate::map::{Cell, Map};
use crate::position::{Direction, Position};
use rand::rngs::StdRng;
use rand::Rng;
use std::any::type_name;
use uuid::Uuid;

pub const PURSUER_SYMBOL: char = 'M';

/// Pursuers chase the player when strictly closer than this Manhattan distance.
pub const CHASE_RADIUS: i32 = 6;

/// Health taken from the player by a single pursuer attack.
pub const ATTACK_DAMAGE: u32 = 25;

/// Something an entity does to the player during its turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    Damage(u32),
}

pub trait Entity: Send + Sync {
    fn name(&self) -> &str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }

    fn id(&self) -> &str;

    fn position(&self) -> Position;

    fn char(&self) -> char;

    /// Takes the entity's turn. Any movement is written to `map` immediately
    /// so entities acting later in the same tick see it.
    fn act(&mut self, map: &mut Map, player: Position, rng: &mut StdRng) -> Option<Effect>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Chase,
    Wander,
}

/// Stalks the player when close, otherwise drifts around at random.
pub struct Pursuer {
    id: String,
    position: Position,
}

impl Pursuer {
    pub fn new(position: Position) -> Pursuer {
        Pursuer {
            id: Uuid::new_v4().to_string(),
            position,
        }
    }

    /// Recomputed every tick from the distance alone.
    pub fn mode(&self, player: Position) -> Mode {
        let distance = self.position.manhattan(player);

        if distance > 0 && distance < CHASE_RADIUS {
            Mode::Chase
        } else {
            Mode::Wander
        }
    }

    fn chase(&mut self, map: &mut Map, player: Position) -> Option<Effect> {
        let dx = player.x - self.position.x;
        let dy = player.y - self.position.y;

        // Close the larger gap first, ties go to the vertical axis
        let target = if dx.abs() > dy.abs() {
            Position::new(self.position.x + dx.signum(), self.position.y)
        } else {
            Position::new(self.position.x, self.position.y + dy.signum())
        };

        if map.is_wall(target) {
            return None;
        }

        if target == player {
            return Some(Effect::Damage(ATTACK_DAMAGE));
        }

        self.try_move(map, target);
        None
    }

    fn wander(&mut self, map: &mut Map, rng: &mut StdRng) {
        if rng.gen::<bool>() {
            return;
        }

        let direction: Direction = rng.gen();
        let target = self.position.step(direction);

        if !map.is_wall(target) {
            self.try_move(map, target);
        }
    }

    // Pursuers only ever step onto bare floor
    fn try_move(&mut self, map: &mut Map, target: Position) {
        if map.get(target) != Cell::Floor {
            return;
        }

        map.set(self.position, Cell::Floor);
        self.position = target;
        map.set(self.position, Cell::Occupant(PURSUER_SYMBOL));
    }
}

impl Entity for Pursuer {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn char(&self) -> char {
        PURSUER_SYMBOL
    }

    fn act(&mut self, map: &mut Map, player: Position, rng: &mut StdRng) -> Option<Effect> {
        match self.mode(player) {
            Mode::Chase => self.chase(map, player),
            Mode::Wander => {
                self.wander(map, rng);
                None
            }
        }
    }
}

/// Creates an entity for every spawn marker on the map.
pub fn spawn_all(map: &Map) -> Vec<Box<dyn Entity>> {
    map.spawns()
        .iter()
        .map(|position| Box::new(Pursuer::new(*position)) as Box<dyn Entity>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn open_room() -> Map {
        Map::parse(
            "\
#########
#.......#
#.......#
#.......#
#.......#
#.......#
#.......#
#########",
            9,
            8,
        )
    }

    fn pursuer_on(map: &mut Map, position: Position) -> Pursuer {
        map.set(position, Cell::Occupant(PURSUER_SYMBOL));
        Pursuer::new(position)
    }

    #[test]
    fn when_the_player_is_within_range_the_pursuer_chases() {
        let map = open_room();
        let pursuer = Pursuer::new(Position::new(5, 5));

        assert_eq!(pursuer.mode(Position::new(5, 1)), Mode::Chase);
        assert_eq!(pursuer.mode(Position::new(1, 4)), Mode::Chase);
        assert_eq!(pursuer.mode(Position::new(1, 3)), Mode::Wander);
        assert_eq!(pursuer.mode(Position::new(5, 5)), Mode::Wander);
        assert!(!map.is_wall(pursuer.position()));
    }

    #[test]
    fn when_chasing_vertically_the_pursuer_steps_towards_the_player() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        let effect = pursuer.act(&mut map, Position::new(5, 1), &mut rng);

        assert!(effect.is_none());
        assert_eq!(pursuer.position(), Position::new(5, 4));
        assert_eq!(map.get(Position::new(5, 5)), Cell::Floor);
        assert_eq!(map.get(Position::new(5, 4)), Cell::Occupant('M'));
    }

    #[test]
    fn when_chasing_the_pursuer_closes_the_larger_gap_first() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        pursuer.act(&mut map, Position::new(2, 4), &mut rng);

        assert_eq!(pursuer.position(), Position::new(4, 5));
    }

    #[test]
    fn when_chasing_with_equal_gaps_the_pursuer_moves_vertically() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        pursuer.act(&mut map, Position::new(3, 3), &mut rng);

        assert_eq!(pursuer.position(), Position::new(5, 4));
    }

    #[test]
    fn when_the_next_step_is_the_player_the_pursuer_attacks_and_stays() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        let effect = pursuer.act(&mut map, Position::new(5, 4), &mut rng);

        assert_eq!(effect, Some(Effect::Damage(25)));
        assert_eq!(pursuer.position(), Position::new(5, 5));
        assert_eq!(map.get(Position::new(5, 5)), Cell::Occupant('M'));
        assert_eq!(map.get(Position::new(5, 4)), Cell::Floor);
    }

    #[test]
    fn when_chasing_into_scrap_the_pursuer_stays() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        map.set(Position::new(5, 4), Cell::Resource);
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        let effect = pursuer.act(&mut map, Position::new(5, 2), &mut rng);

        assert!(effect.is_none());
        assert_eq!(pursuer.position(), Position::new(5, 5));
        assert_eq!(map.get(Position::new(5, 4)), Cell::Resource);
    }

    #[test]
    fn when_chasing_into_a_wall_the_pursuer_stays() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        map.set(Position::new(5, 4), Cell::Wall);
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        pursuer.act(&mut map, Position::new(5, 2), &mut rng);

        assert_eq!(pursuer.position(), Position::new(5, 5));
    }

    #[test]
    fn when_chasing_into_another_pursuer_the_pursuer_stays() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(0);
        let _blocker = pursuer_on(&mut map, Position::new(5, 4));
        let mut pursuer = pursuer_on(&mut map, Position::new(5, 5));

        pursuer.act(&mut map, Position::new(5, 2), &mut rng);

        assert_eq!(pursuer.position(), Position::new(5, 5));
        assert_eq!(map.get(Position::new(5, 4)), Cell::Occupant('M'));
    }

    #[test]
    fn when_wandering_the_pursuer_moves_at_most_one_step() {
        let mut map = open_room();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pursuer = pursuer_on(&mut map, Position::new(4, 3));
        let far_away = Position::new(40, 40);

        let mut moves = 0;
        for _ in 0..100 {
            let before = pursuer.position();
            pursuer.act(&mut map, far_away, &mut rng);
            let after = pursuer.position();

            assert!(before.manhattan(after) <= 1);
            if before != after {
                moves += 1;
            }
        }

        // Half of the turns are idle and some steps hit walls
        assert!(moves > 0 && moves < 100);
    }

    #[test]
    fn when_wandering_with_the_same_seed_the_path_is_the_same() {
        let walk = |seed: u64| {
            let mut map = open_room();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pursuer = pursuer_on(&mut map, Position::new(4, 3));
            (0..50)
                .map(|_| {
                    pursuer.act(&mut map, Position::new(40, 40), &mut rng);
                    pursuer.position()
                })
                .collect::<Vec<Position>>()
        };

        assert_eq!(walk(11), walk(11));
    }

    #[test]
    fn when_spawning_entities_one_pursuer_is_created_per_marker() {
        let map = Map::parse("#####\n#M.M#\n#.E.#\n#####", 5, 4);

        let entities = spawn_all(&map);

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name(), "Pursuer");
        assert_eq!(entities[0].position(), Position::new(1, 1));
        assert_eq!(entities[1].position(), Position::new(3, 1));
        assert_ne!(entities[0].id(), entities[1].id());
    }

    proptest! {
        #[test]
        fn pursuers_never_enter_scrap_or_walls(
            seed in any::<u64>(),
            player_x in 0i32..9,
            player_y in 0i32..8,
        ) {
            let mut map = Map::parse(
                "\
#########
#.$...$.#
#..#....#
#...M.$.#
#.$..#..#
#....$..#
#.#...$.#
#########",
                9,
                8,
            );
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pursuer = Pursuer::new(Position::new(4, 3));
            let player = Position::new(player_x, player_y);

            for _ in 0..30 {
                let before = map.clone();
                pursuer.act(&mut map, player, &mut rng);
                let cell = before.get(pursuer.position());

                prop_assert!(!before.is_wall(pursuer.position()));
                prop_assert!(cell == Cell::Floor || cell == Cell::Occupant('M'));
            }
        }
    }
}
