//! # scrap_hunter
//!
//! The engine for Scrap Hunter, a turn-based scavenging game on an ASCII map.
//! Collect scrap, dodge the stalkers, get back to the entrance and keep up with the quota.

pub mod campaign;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod map;
pub mod player;
pub mod position;

pub use campaign::Campaign;
pub use campaign::DayReport;
pub use campaign::QuotaReview;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use game::Command;
pub use game::Day;
pub use game::Outcome;
pub use position::Direction;
pub use position::Position;

mod replay;
