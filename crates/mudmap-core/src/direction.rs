use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight compass directions that map onto a unit grid step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinal {
    /// One step up the screen.
    North,
    /// One step down the screen.
    South,
    /// One step right.
    East,
    /// One step left.
    West,
    /// Up and right.
    Northeast,
    /// Up and left.
    Northwest,
    /// Down and right.
    Southeast,
    /// Down and left.
    Southwest,
}

impl Cardinal {
    /// The full vocabulary, in a fixed order.
    pub const ALL: [Cardinal; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
    ];

    /// Grid offset `(dx, dy)` of this direction. Positive y points down the screen.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::Northeast => (1, -1),
            Self::Northwest => (-1, -1),
            Self::Southeast => (1, 1),
            Self::Southwest => (-1, 1),
        }
    }

    /// Match an exact lowercase direction token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            "northeast" => Some(Self::Northeast),
            "northwest" => Some(Self::Northwest),
            "southeast" => Some(Self::Southeast),
            "southwest" => Some(Self::Southwest),
            _ => None,
        }
    }

    /// The token this direction is spelled as in game data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The label of an exit: either a grid direction or any other traversal verb
/// ("up", "enter portal", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// A compass direction that drives placement.
    Cardinal(Cardinal),
    /// Anything else. Never drives placement.
    Other(String),
}

impl Direction {
    /// Classify a raw token. Never fails: unknown tokens become [`Direction::Other`].
    pub fn parse(token: &str) -> Self {
        match Cardinal::parse(token) {
            Some(c) => Self::Cardinal(c),
            None => Self::Other(token.to_string()),
        }
    }

    /// The grid offset, if this is a cardinal direction.
    pub fn offset(&self) -> Option<(i32, i32)> {
        match self {
            Self::Cardinal(c) => Some(c.offset()),
            Self::Other(_) => None,
        }
    }

    /// Returns the cardinal direction, if any.
    pub fn cardinal(&self) -> Option<Cardinal> {
        match self {
            Self::Cardinal(c) => Some(*c),
            Self::Other(_) => None,
        }
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cardinal(c) => c.as_str(),
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
