use crate::error::Result;
use crate::position::Position;
use serde::Serialize;
use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter, path::PathBuf};
use tracing::info;

pub fn create_replay_logger(
    filename: Option<PathBuf>,
    day: usize,
    map_width: usize,
    map_height: usize,
    map_contents: Vec<String>,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(
            filename,
            day,
            map_width,
            map_height,
            map_contents,
        )),
    }
}

pub trait ReplayLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_turn(&mut self, turn: usize, health: u32, scrap: u32) {}

    #[allow(unused_variables)]
    fn log_end_day(&mut self, reason: String) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, turn: usize, event: Event) {}

    fn save(&self) -> Result<()> {
        Ok(())
    }

    fn log_spawn(&mut self, turn: usize, entity: &str, id: &str, location: Position) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Spawn,
                entity: entity.to_string(),
                entity_id: Some(id.to_string()),
                location: Some(location),
                destination: None,
                amount: None,
            },
        );
    }

    fn log_move(
        &mut self,
        turn: usize,
        entity: &str,
        id: Option<&str>,
        location: Position,
        destination: Position,
    ) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Move,
                entity: entity.to_string(),
                entity_id: id.map(str::to_string),
                location: Some(location),
                destination: Some(destination),
                amount: None,
            },
        );
    }

    fn log_collect(&mut self, turn: usize, location: Position) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Collect,
                entity: "Player".to_string(),
                entity_id: None,
                location: Some(location),
                destination: None,
                amount: Some(1),
            },
        );
    }

    fn log_attack(
        &mut self,
        turn: usize,
        entity: &str,
        id: &str,
        location: Position,
        destination: Position,
        damage: u32,
    ) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Attack,
                entity: entity.to_string(),
                entity_id: Some(id.to_string()),
                location: Some(location),
                destination: Some(destination),
                amount: Some(damage),
            },
        );
    }

    fn log_death(&mut self, turn: usize, location: Position, lost_scrap: u32) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Death,
                entity: "Player".to_string(),
                entity_id: None,
                location: Some(location),
                destination: None,
                amount: Some(lost_scrap),
            },
        );
    }
}

#[derive(Serialize)]
enum EventType {
    Spawn,
    Move,
    Collect,
    Attack,
    Death,
}

#[derive(Serialize)]
pub struct Event {
    event_type: EventType,
    entity: String,
    entity_id: Option<String>,
    location: Option<Position>,
    destination: Option<Position>,
    amount: Option<u32>,
}

struct Turn {
    turn: usize,
    health: u32,
    scrap: u32,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: PathBuf,
    day: usize,
    map_width: usize,
    map_height: usize,
    map_contents: Vec<String>,
    turns: Vec<Turn>,
    events: HashMap<usize, Vec<Event>>,
    end_reason: Option<String>,
}

impl JsonReplayLogger {
    pub fn new(
        filename: PathBuf,
        day: usize,
        map_width: usize,
        map_height: usize,
        map_contents: Vec<String>,
    ) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            day,
            map_width,
            map_height,
            map_contents,
            turns: Vec::new(),
            events: HashMap::new(),
            end_reason: None,
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_turn(&mut self, turn: usize, health: u32, scrap: u32) {
        self.turns.push(Turn {
            turn,
            health,
            scrap,
        });
    }

    fn log_end_day(&mut self, reason: String) {
        self.end_reason = Some(reason);
    }

    fn log_event(&mut self, turn: usize, event: Event) {
        self.events.entry(turn).or_default().push(event);
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.filename)?;
        let turns: Vec<_> = self
            .turns
            .iter()
            .map(|turn| {
                json!({
                    "turn": turn.turn,
                    "health": turn.health,
                    "scrap": turn.scrap,
                    "events": self.events.get(&turn.turn).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let data = json!({
            "day": self.day,
            "map": {
                "width": self.map_width,
                "height": self.map_height,
                "contents": self.map_contents,
            },
            "turns": turns,
            "end_reason": self.end_reason,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data)?;
        info!(path = %self.filename.display(), "Saved replay");

        Ok(())
    }
}
