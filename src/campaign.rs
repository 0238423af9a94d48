use crate::config::Config;
use crate::error::{Error, Result};
use crate::game::{Day, Outcome};
use crate::map::Map;
use crate::player::Player;
use crate::position::Position;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

/// The verdict of a quota review.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuotaReview {
    /// No review today.
    NotDue,
    /// The quota was met. The bank is emptied and the quota raised.
    Met { next_quota: u32 },
    /// The quota was missed and the run is over.
    Fired,
}

/// What a finished day contributed to the run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayReport {
    pub banked: u32,
    pub quit: bool,
}

/// Runs day after day, banking scrap and enforcing the quota.
pub struct Campaign {
    config: Config,
    day: usize,
    quota: u32,
    banked: u32,
    running: bool,
    player: Player,
    rng: StdRng,
}

impl Campaign {
    pub fn new(config: Config) -> Campaign {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Campaign {
            day: 1,
            quota: config.starting_quota,
            banked: 0,
            running: true,
            player: Player::new(Position::default()),
            rng,
            config,
        }
    }

    /// Reviews the bank against the quota on the first day of every cycle after the first.
    pub fn review_quota(&mut self) -> QuotaReview {
        let cycle = self.config.quota_cycle_days.max(1);
        if self.day <= 1 || (self.day - 1) % cycle != 0 {
            return QuotaReview::NotDue;
        }

        if self.banked >= self.quota {
            let next_quota = self.quota * 3 / 2 + 2;
            info!(
                day = self.day,
                banked = self.banked,
                quota = self.quota,
                next_quota,
                "Quota met"
            );
            self.banked = 0;
            self.quota = next_quota;
            QuotaReview::Met { next_quota }
        } else {
            warn!(
                day = self.day,
                banked = self.banked,
                quota = self.quota,
                "Quota missed"
            );
            self.running = false;
            QuotaReview::Fired
        }
    }

    /// Loads a random map and starts the current day on it.
    pub fn start_day(&mut self) -> Result<Day> {
        let path = match self.config.maps.choose(&mut self.rng) {
            Some(path) => path.clone(),
            None => {
                self.running = false;
                return Err(Error::NoMaps);
            }
        };

        let map = match Map::load(&path, self.config.width, self.config.height) {
            Ok(map) => map,
            Err(error) => {
                self.running = false;
                return Err(error);
            }
        };

        let seed = self.rng.gen();
        let replay_filename = self
            .config
            .replay_dir
            .as_ref()
            .map(|dir| dir.join(format!("day-{}.json", self.day)));

        Ok(Day::new(
            self.day,
            map,
            self.player.clone(),
            seed,
            replay_filename,
        ))
    }

    /// Closes a day with the outcome that ended it and moves on to the next one.
    pub fn finish_day(&mut self, day: Day, outcome: Outcome) -> Result<DayReport> {
        day.save_replay()?;
        self.player = day.into_player();

        let report = match outcome {
            Outcome::Exited { banked } => DayReport {
                banked,
                quit: false,
            },
            Outcome::Quit => DayReport {
                banked: 0,
                quit: true,
            },
            Outcome::Continue | Outcome::Died => DayReport {
                banked: 0,
                quit: false,
            },
        };

        self.banked += report.banked;
        if report.quit {
            self.running = false;
        }

        info!(
            day = self.day,
            banked = report.banked,
            total = self.banked,
            quota = self.quota,
            "Day finished"
        );
        self.day += 1;

        Ok(report)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn day(&self) -> usize {
        self.day
    }

    pub fn quota(&self) -> u32 {
        self.quota
    }

    pub fn banked(&self) -> u32 {
        self.banked
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}
