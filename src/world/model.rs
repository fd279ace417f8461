use std::collections::HashMap;
use std::fmt;

use crate::config::Settings;

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Runtime scenario type used by the game session.
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub settings: Settings,
    pub npcs: Vec<NpcData>,
    pub dialogue: Option<DialogueData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::White,
        Color::Black,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        Color::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Man,
    Woman,
}

impl Gender {
    pub fn key(self) -> &'static str {
        match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s.trim().to_lowercase().as_str() {
            "man" | "male" | "m" => Some(Gender::Man),
            "woman" | "female" | "f" | "w" => Some(Gender::Woman),
            _ => None,
        }
    }
}

/// Where an NPC stands relative to the plaza center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Option<Direction> {
        match s.trim().to_lowercase().as_str() {
            "up" | "north" => Some(Direction::Up),
            "down" | "south" => Some(Direction::Down),
            "left" | "west" => Some(Direction::Left),
            "right" | "east" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcAppearance {
    pub hat: Color,
    pub hair: Color,
    pub mask: Color,
    pub clothes: Color,
    pub shoe: Color,
    pub gender: Gender,
    pub position_from_center: Direction,
}

#[derive(Debug, Clone)]
pub struct NpcData {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub appearance: NpcAppearance,
    pub sprite: Option<String>, // asset path, unused by the text front end
}

/// One list per conversation stage.
#[derive(Debug, Clone, Default)]
pub struct LineSet {
    pub inquiry: Vec<String>,
    pub hinted: Vec<String>,
    pub accused: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RoleLines {
    pub man: LineSet,
    pub woman: LineSet,
}

impl RoleLines {
    pub fn for_gender(&self, gender: Gender) -> &LineSet {
        match gender {
            Gender::Man => &self.man,
            Gender::Woman => &self.woman,
        }
    }
}

/// Overrides for how appearance values read inside dialogue.
#[derive(Debug, Clone, Default)]
pub struct DisplayNames {
    pub colors: HashMap<Color, String>,
    pub genders: HashMap<Gender, String>,
    pub directions: HashMap<Direction, String>,
}

impl DisplayNames {
    pub fn color(&self, c: Color) -> &str {
        self.colors.get(&c).map(String::as_str).unwrap_or(c.key())
    }

    pub fn gender(&self, g: Gender) -> &str {
        self.genders.get(&g).map(String::as_str).unwrap_or(g.key())
    }

    pub fn direction(&self, d: Direction) -> &str {
        self.directions
            .get(&d)
            .map(String::as_str)
            .unwrap_or(d.key())
    }

    pub(crate) fn all_values(&self) -> impl Iterator<Item = &String> {
        self.colors
            .values()
            .chain(self.genders.values())
            .chain(self.directions.values())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DialogueData {
    pub opening_story: String,
    pub victory_story: String,
    pub defeat_story: String,
    pub criminal: RoleLines,
    pub innocent: RoleLines,
    pub names: DisplayNames,
}
