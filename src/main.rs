//! Scrap Hunter - terminal front end
//!
//! Draws the map with crossterm, turns key presses into commands and runs the
//! campaign day after day until the player quits or misses the quota.

use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use scrap_hunter::config::{MAP_HEIGHT, MAP_WIDTH, QUOTA_CYCLE_DAYS, STARTING_QUOTA};
use scrap_hunter::{Campaign, Command, Config, Day, Direction, Outcome, QuotaReview, Result};
use std::fs::File;
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scrap Hunter - scavenge scrap, dodge stalkers, meet the quota
#[derive(Parser, Debug)]
#[command(name = "scrap_hunter")]
#[command(about = "Turn-based scavenging on ASCII maps")]
struct Args {
    /// Map file to pick from each day (repeatable, defaults to the stock maps)
    #[arg(long = "map", value_name = "FILE")]
    maps: Vec<PathBuf>,

    /// Columns read from each map
    #[arg(long, default_value_t = MAP_WIDTH)]
    width: usize,

    /// Rows read from each map
    #[arg(long, default_value_t = MAP_HEIGHT)]
    height: usize,

    /// Scrap to bank before the first review
    #[arg(long, default_value_t = STARTING_QUOTA)]
    quota: u32,

    /// Days between quota reviews
    #[arg(long, default_value_t = QUOTA_CYCLE_DAYS)]
    cycle: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to save one JSON replay per day to
    #[arg(long)]
    replay_dir: Option<PathBuf>,

    /// Where to write logs, the terminal is busy drawing the map
    #[arg(long, default_value = "scrap_hunter.log")]
    log_file: PathBuf,
}

impl Args {
    fn config(&self) -> Config {
        let defaults = Config::default();

        Config {
            width: self.width,
            height: self.height,
            starting_quota: self.quota,
            quota_cycle_days: self.cycle,
            maps: if self.maps.is_empty() {
                defaults.maps
            } else {
                self.maps.clone()
            },
            seed: self.seed,
            replay_dir: self.replay_dir.clone(),
        }
    }
}

/// Raw mode and the alternate screen, undone on drop.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Screen> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(Screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(stdout(), LeaveAlternateScreen, Show);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scrap_hunter=info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config = args.config();
    info!(?config, "Scrap Hunter starting");

    let result = {
        let _screen = Screen::enter()?;
        run(Campaign::new(config))
    };

    println!("Game Over.");
    result
}

fn run(mut campaign: Campaign) -> Result<()> {
    show(&[
        "Welcome to 'Scrap Hunter'".to_string(),
        "Controls: W, A, S, D".to_string(),
        "          'e': return, 'q': quit".to_string(),
        String::new(),
        "Press any key to continue...".to_string(),
    ])?;
    read_command()?;

    while campaign.is_running() {
        match campaign.review_quota() {
            QuotaReview::NotDue => {}
            QuotaReview::Met { next_quota } => {
                show(&["QUOTA MET!".to_string(), format!("New quota: {}", next_quota)])?;
                pause(3000);
            }
            QuotaReview::Fired => {
                show(&["FIRED.".to_string()])?;
                pause(3000);
                break;
            }
        }

        let mut day = campaign.start_day()?;
        let outcome = play(&mut day, &campaign)?;

        if let Outcome::Exited { .. } = outcome {
            show(&["Day Ended. Scraps saved.".to_string()])?;
            pause(2000);
        }

        campaign.finish_day(day, outcome)?;
    }

    Ok(())
}

/// Plays a day until the player leaves or quits. Deaths are recovered from on the spot.
fn play(day: &mut Day, campaign: &Campaign) -> Result<Outcome> {
    loop {
        let header = [
            format!(
                "Day: {} | Quota: {}/{}",
                campaign.day(),
                campaign.banked(),
                campaign.quota()
            ),
            format!(
                "HP: {} | Scrap: {}",
                day.player().health(),
                day.player().scrap()
            ),
            "Command (w/a/s/d/e/q):".to_string(),
        ];
        day.draw(&header)?;

        match day.step(read_command()?) {
            Outcome::Continue => {}
            Outcome::Died => {
                show(&["YOU DIED.".to_string()])?;
                pause(3000);
                day.recover();
            }
            outcome => return Ok(outcome),
        }
    }
}

fn read_command() -> io::Result<Command> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };

        if key.kind != KeyEventKind::Press {
            continue;
        }

        return Ok(match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Up => Command::Move(Direction::North),
            KeyCode::Down => Command::Move(Direction::South),
            KeyCode::Left => Command::Move(Direction::West),
            KeyCode::Right => Command::Move(Direction::East),
            KeyCode::Esc => Command::Quit,
            KeyCode::Char(value) => Command::from_char(value),
            _ => Command::Wait,
        });
    }
}

fn show(lines: &[String]) -> io::Result<()> {
    let mut stdout = stdout();
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in lines {
        queue!(stdout, Print(line), Print("\r\n"))?;
    }
    stdout.flush()
}

fn pause(millis: u64) {
    thread::sleep(Duration::from_millis(millis));
}
