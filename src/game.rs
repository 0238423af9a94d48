use crate::entities::{self, Effect, Entity};
use crate::error::Result;
use crate::map::Map;
use crate::player::{Move, Player};
use crate::position::Direction;
use crate::replay::{create_replay_logger, ReplayLogger};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{debug, info};

/// A single input from the player.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Move(Direction),
    /// Leave through the entrance and bank the carried scrap.
    Exit,
    Quit,
    /// Any other key. The player stands still while pursuers act.
    Wait,
}

impl Command {
    pub fn from_char(value: char) -> Command {
        match value.to_ascii_lowercase() {
            'w' => Command::Move(Direction::North),
            's' => Command::Move(Direction::South),
            'a' => Command::Move(Direction::West),
            'd' => Command::Move(Direction::East),
            'e' => Command::Exit,
            'q' => Command::Quit,
            _ => Command::Wait,
        }
    }
}

/// Represents what happened during a tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Continue,
    /// The player's health reached zero. Call [`Day::recover`] to keep playing.
    Died,
    /// The player left through the entrance carrying `banked` scrap.
    Exited { banked: u32 },
    Quit,
}

/// One day of scavenging on a single map.
pub struct Day {
    number: usize,
    map: Map,
    player: Player,
    entities: Vec<Box<dyn Entity>>,
    turn: usize,
    replay_logger: Box<dyn ReplayLogger>,
    rng: StdRng,
}

impl Day {
    /// Starts a day on `map`.
    ///
    /// # Arguments
    /// * `number` - The day number, used for logging and the replay.
    /// * `map` - The freshly loaded map.
    /// * `player` - The player, placed on the entrance with empty pockets.
    /// * `seed` - The seed for the pursuers' random number generator.
    /// * `replay_filename` - Where to save the replay of the day. If `None`, no replay is kept.
    pub fn new(
        number: usize,
        map: Map,
        mut player: Player,
        seed: u64,
        replay_filename: Option<PathBuf>,
    ) -> Day {
        player.enter(map.entrance());
        let entities = entities::spawn_all(&map);

        let mut replay_logger = create_replay_logger(
            replay_filename,
            number,
            map.width(),
            map.height(),
            map.rows(),
        );
        replay_logger.log_turn(0, player.health(), player.scrap());
        for entity in &entities {
            replay_logger.log_spawn(0, entity.name(), entity.id(), entity.position());
        }

        info!(
            day = number,
            pursuers = entities.len(),
            health = player.health(),
            "Day started"
        );

        Day {
            number,
            map,
            player,
            entities,
            turn: 0,
            replay_logger,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resolves one command: the player moves, then every entity acts in order.
    pub fn step(&mut self, command: Command) -> Outcome {
        match command {
            Command::Quit => {
                self.replay_logger.log_end_day("Quit".to_string());
                return Outcome::Quit;
            }
            Command::Exit if self.player.position() == self.map.entrance() => {
                let banked = self.player.scrap();
                info!(day = self.number, banked, "Left through the entrance");
                self.replay_logger.log_end_day("Exited".to_string());
                return Outcome::Exited { banked };
            }
            _ => {}
        }

        self.turn += 1;

        if let Command::Move(direction) = command {
            self.move_player(direction);
        }

        self.move_entities();

        self.replay_logger
            .log_turn(self.turn, self.player.health(), self.player.scrap());

        if !self.player.is_alive() {
            info!(
                day = self.number,
                turn = self.turn,
                lost = self.player.scrap(),
                "Player died"
            );
            self.replay_logger
                .log_death(self.turn, self.player.position(), self.player.scrap());
            return Outcome::Died;
        }

        Outcome::Continue
    }

    /// Brings the player back after a death. The day goes on.
    pub fn recover(&mut self) {
        self.player.revive();
    }

    pub fn save_replay(&self) -> Result<()> {
        self.replay_logger.save()
    }

    /// Draws the map with the given header lines.
    pub fn draw(&self, header: &[String]) -> std::io::Result<()> {
        self.map.draw(self.player.position(), header)
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn entities(&self) -> &[Box<dyn Entity>] {
        &self.entities
    }

    pub fn into_player(self) -> Player {
        self.player
    }

    fn move_player(&mut self, direction: Direction) {
        let from = self.player.position();

        match self.player.step(direction, &mut self.map) {
            Move::Blocked => {
                debug!(?from, ?direction, "Player bumped into a wall");
            }
            Move::Moved => {
                self.replay_logger
                    .log_move(self.turn, "Player", None, from, self.player.position());
            }
            Move::Collected => {
                let to = self.player.position();
                debug!(?to, scrap = self.player.scrap(), "Player picked up scrap");
                self.replay_logger
                    .log_move(self.turn, "Player", None, from, to);
                self.replay_logger.log_collect(self.turn, to);
            }
        }
    }

    fn move_entities(&mut self) {
        // Later entities see the moves of earlier ones
        for entity in self.entities.iter_mut() {
            let from = entity.position();
            let target = self.player.position();

            match entity.act(&mut self.map, target, &mut self.rng) {
                Some(Effect::Damage(damage)) => {
                    self.player.take_damage(damage);
                    debug!(
                        id = entity.id(),
                        damage,
                        health = self.player.health(),
                        "Player attacked"
                    );
                    self.replay_logger.log_attack(
                        self.turn,
                        entity.name(),
                        entity.id(),
                        from,
                        target,
                        damage,
                    );
                }
                None => {
                    let to = entity.position();
                    if to != from {
                        self.replay_logger.log_move(
                            self.turn,
                            entity.name(),
                            Some(entity.id()),
                            from,
                            to,
                        );
                    }
                }
            }
        }
    }
}
