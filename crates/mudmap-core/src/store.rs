use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MapResult;
use crate::room::{Exit, Room, RoomId};

/// Everything the data source returns for one area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaData {
    /// Rooms whose area matches the query.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Exits whose source room is in the area.
    #[serde(default)]
    pub exits: Vec<Exit>,
}

/// A source of room and exit records, queried one area at a time.
pub trait RoomStore {
    /// Distinct area identifiers, sorted.
    fn areas(&self) -> MapResult<Vec<String>>;

    /// Rooms of `area` and the exits leaving them. An unknown area yields
    /// empty data, not an error.
    fn load_area(&self, area: &str) -> MapResult<AreaData>;

    /// Number of rooms in `area` and of exits leaving them.
    ///
    /// The default loads the whole area; stores that can count cheaply
    /// should override it.
    fn count_area(&self, area: &str) -> MapResult<(usize, usize)> {
        let data = self.load_area(area)?;
        Ok((data.rooms.len(), data.exits.len()))
    }
}

/// An in-process store holding the whole world.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rooms: Vec<Room>,
    exits: Vec<Exit>,
}

impl MemoryStore {
    /// Creates a store from complete room and exit tables.
    pub fn new(rooms: Vec<Room>, exits: Vec<Exit>) -> Self {
        Self { rooms, exits }
    }

    /// Number of rooms across all areas.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of rooms in `area`.
    pub fn rooms_in(&self, area: &str) -> usize {
        self.rooms.iter().filter(|r| r.area == area).count()
    }
}

impl RoomStore for MemoryStore {
    fn areas(&self) -> MapResult<Vec<String>> {
        let areas: BTreeSet<&str> = self.rooms.iter().map(|r| r.area.as_str()).collect();
        Ok(areas.into_iter().map(str::to_string).collect())
    }

    fn load_area(&self, area: &str) -> MapResult<AreaData> {
        let rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.area == area)
            .cloned()
            .collect();
        // Same shape as the relational join: exits are selected by their source room.
        let ids: HashSet<&RoomId> = rooms.iter().map(|r| &r.id).collect();
        let exits = self
            .exits
            .iter()
            .filter(|e| ids.contains(&e.source))
            .cloned()
            .collect();
        Ok(AreaData { rooms, exits })
    }

    fn count_area(&self, area: &str) -> MapResult<(usize, usize)> {
        let ids: HashSet<&RoomId> = self
            .rooms
            .iter()
            .filter(|r| r.area == area)
            .map(|r| &r.id)
            .collect();
        let exits = self.exits.iter().filter(|e| ids.contains(&e.source)).count();
        Ok((ids.len(), exits))
    }
}

/// A world dump stored as a single JSON document `{"rooms": [...], "exits": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    inner: MemoryStore,
}

impl JsonStore {
    /// Read and parse a dump file.
    pub fn open(path: &Path) -> MapResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let store = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            rooms = store.inner.room_count(),
            "loaded world dump"
        );
        Ok(store)
    }

    /// Parse a dump from a string.
    pub fn parse(text: &str) -> MapResult<Self> {
        let dump: AreaData = serde_json::from_str(text)?;
        Ok(Self {
            inner: MemoryStore::new(dump.rooms, dump.exits),
        })
    }

    /// Number of rooms in `area`.
    pub fn rooms_in(&self, area: &str) -> usize {
        self.inner.rooms_in(area)
    }
}

impl RoomStore for JsonStore {
    fn areas(&self) -> MapResult<Vec<String>> {
        self.inner.areas()
    }

    fn load_area(&self, area: &str) -> MapResult<AreaData> {
        self.inner.load_area(area)
    }

    fn count_area(&self, area: &str) -> MapResult<(usize, usize)> {
        self.inner.count_area(area)
    }
}
