use crate::entities::PURSUER_SYMBOL;
use crate::error::{Error, Result};
use crate::position::Position;
use crossterm::{
    cursor::{Hide, MoveTo},
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::fs;
use std::io::{stdout, Write};
use std::path::Path;
use tracing::{info, warn};

/// Where the player starts when a map has no entrance marker.
const DEFAULT_ENTRANCE: Position = Position { x: 1, y: 1 };

/// The glyph drawn on top of the cell the player stands on.
pub const PLAYER_SYMBOL: char = '@';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    Floor,
    Wall,
    Resource,
    Entrance,
    /// A cell currently holding an entity, marked with the entity's symbol.
    Occupant(char),
    Blank,
    /// Any other character found in a map file. Kept verbatim for drawing.
    Other(char),
}

impl Cell {
    pub fn from_char(value: char) -> Cell {
        match value {
            '.' => Cell::Floor,
            '#' => Cell::Wall,
            '$' => Cell::Resource,
            'E' => Cell::Entrance,
            PURSUER_SYMBOL => Cell::Occupant(PURSUER_SYMBOL),
            ' ' => Cell::Blank,
            other => Cell::Other(other),
        }
    }

    pub fn char(&self) -> char {
        match self {
            Cell::Floor => '.',
            Cell::Wall => '#',
            Cell::Resource => '$',
            Cell::Entrance => 'E',
            Cell::Occupant(symbol) => *symbol,
            Cell::Blank => ' ',
            Cell::Other(value) => *value,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Cell::Floor => Color::DarkGrey,
            Cell::Wall => Color::Grey,
            Cell::Resource => Color::Yellow,
            Cell::Entrance => Color::Green,
            Cell::Occupant(_) => Color::Red,
            Cell::Blank | Cell::Other(_) => Color::Reset,
        }
    }
}

/// The grid the player explores during a day.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    entrance: Position,
    spawns: Vec<Position>,
}

impl Map {
    /// Parses a map from its text form, one row per line.
    ///
    /// Short lines are padded with blanks and missing rows are blank-filled.
    /// Anything past `width` columns or `height` rows is ignored.
    pub fn parse(contents: &str, width: usize, height: usize) -> Map {
        let mut map = Map::new(width, height);
        let mut entrance = None;

        for (row, line) in contents.lines().take(height).enumerate() {
            for (col, value) in line.chars().take(width).enumerate() {
                let position = Position::new(col as i32, row as i32);
                let cell = Cell::from_char(value);

                match cell {
                    // The first entrance wins
                    Cell::Entrance if entrance.is_none() => entrance = Some(position),
                    Cell::Occupant(PURSUER_SYMBOL) => map.spawns.push(position),
                    _ => {}
                }

                map.set(position, cell);
            }
        }

        map.entrance = entrance.unwrap_or_else(|| {
            warn!(entrance = ?DEFAULT_ENTRANCE, "Map has no entrance, using the default");
            DEFAULT_ENTRANCE
        });

        map
    }

    /// Loads a map file from disk.
    pub fn load(path: impl AsRef<Path>, width: usize, height: usize) -> Result<Map> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::MapUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let map = Map::parse(&contents, width, height);
        info!(
            path = %path.display(),
            pursuers = map.spawns.len(),
            "Loaded map"
        );

        Ok(map)
    }

    /// Out-of-bounds positions count as walls.
    pub fn is_wall(&self, position: Position) -> bool {
        self.index(position)
            .map_or(true, |index| self.cells[index] == Cell::Wall)
    }

    /// Out-of-bounds positions read as blank.
    pub fn get(&self, position: Position) -> Cell {
        self.index(position)
            .map_or(Cell::Blank, |index| self.cells[index])
    }

    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn entrance(&self) -> Position {
        self.entrance
    }

    /// Pursuer markers found while parsing, in row-major order.
    pub fn spawns(&self) -> &[Position] {
        &self.spawns
    }

    /// The grid as text rows with the player drawn on top.
    pub fn render(&self, player: Position) -> Vec<String> {
        self.text_rows(Some(player))
    }

    /// The bare grid as text rows.
    pub fn rows(&self) -> Vec<String> {
        self.text_rows(None)
    }

    /// Draws the header lines and the map to the terminal.
    pub fn draw(&self, player: Position, header: &[String]) -> std::io::Result<()> {
        let mut stdout = stdout();

        queue!(stdout, Clear(ClearType::All), Hide, MoveTo(0, 0))?;

        // Raw mode does not return the carriage on a newline
        for line in header {
            queue!(stdout, Print(line), Print("\r\n"))?;
        }

        for row in 0..self.height {
            for col in 0..self.width {
                let position = Position::new(col as i32, row as i32);
                let (value, color) = if position == player {
                    (PLAYER_SYMBOL, Color::Cyan)
                } else {
                    let cell = self.get(position);
                    (cell.char(), cell.color())
                };

                queue!(
                    stdout,
                    SetForegroundColor(color),
                    Print(value),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            queue!(stdout, Print("\r\n"))?;
        }

        stdout.flush()
    }

    fn new(width: usize, height: usize) -> Map {
        Map {
            width,
            height,
            cells: vec![Cell::Blank; width * height],
            entrance: DEFAULT_ENTRANCE,
            spawns: Vec::new(),
        }
    }

    fn text_rows(&self, player: Option<Position>) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        let position = Position::new(col as i32, row as i32);
                        if Some(position) == player {
                            PLAYER_SYMBOL
                        } else {
                            self.get(position).char()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x < 0
            || position.y < 0
            || position.x as usize >= self.width
            || position.y as usize >= self.height
        {
            return None;
        }

        Some(position.y as usize * self.width + position.x as usize)
    }
}
