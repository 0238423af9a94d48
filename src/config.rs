use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MAP_WIDTH: usize = 40;
pub const MAP_HEIGHT: usize = 14;
pub const STARTING_QUOTA: u32 = 5;
pub const QUOTA_CYCLE_DAYS: usize = 3;

/// Settings for a whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Columns read from each map file.
    pub width: usize,
    /// Rows read from each map file.
    pub height: usize,
    pub starting_quota: u32,
    /// The quota is reviewed every this many days.
    pub quota_cycle_days: usize,
    /// Map files, one is picked at random every day.
    pub maps: Vec<PathBuf>,
    /// Seed for the run. A fresh one is drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Directory to write one JSON replay per day to.
    pub replay_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            starting_quota: STARTING_QUOTA,
            quota_cycle_days: QUOTA_CYCLE_DAYS,
            maps: vec![
                PathBuf::from("maps/map1.txt"),
                PathBuf::from("maps/map2.txt"),
                PathBuf::from("maps/map3.txt"),
            ],
            seed: None,
            replay_dir: None,
        }
    }
}
