use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a room, unique across the whole world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A room as recorded by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Short description, shown as the node label.
    #[serde(default)]
    pub shortdesc: String,
    /// Long description.
    #[serde(default)]
    pub longdesc: String,
    /// Whether the room is indoors.
    #[serde(default)]
    pub indoors: bool,
    /// Comma-separated exit directions as the game announced them.
    #[serde(default)]
    pub exits: Option<String>,
    /// The area this room belongs to.
    #[serde(default)]
    pub area: String,
}

impl Room {
    /// Creates a room with empty descriptions and no declared exits.
    pub fn new(id: impl Into<RoomId>, area: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shortdesc: String::new(),
            longdesc: String::new(),
            indoors: false,
            exits: None,
            area: area.into(),
        }
    }

    /// Sets the short description.
    pub fn with_shortdesc(mut self, shortdesc: impl Into<String>) -> Self {
        self.shortdesc = shortdesc.into();
        self
    }

    /// Sets the raw declared exit list.
    pub fn with_exits(mut self, exits: impl Into<String>) -> Self {
        self.exits = Some(exits.into());
        self
    }

    /// Declared exit directions, parsed from the raw comma-separated text.
    ///
    /// Tokens are trimmed, empty tokens dropped and duplicates removed while
    /// keeping first-seen order.
    pub fn declared_exits(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let Some(raw) = self.exits.as_deref() else {
            return out;
        };
        for token in raw.split(',').map(str::trim) {
            if !token.is_empty() && !out.iter().any(|t| t == token) {
                out.push(token.to_string());
            }
        }
        out
    }
}

/// A one-way exit between two rooms, as recorded by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Direction token, e.g. `"north"` or `"enter portal"`.
    pub direction: String,
    /// The room the exit leaves from.
    pub source: RoomId,
    /// The room the exit leads to.
    pub destination: RoomId,
}

impl Exit {
    /// Creates an exit from `source` to `destination`.
    pub fn new(
        source: impl Into<RoomId>,
        direction: impl Into<String>,
        destination: impl Into<RoomId>,
    ) -> Self {
        Self {
            direction: direction.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}
