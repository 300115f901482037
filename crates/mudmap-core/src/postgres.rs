//! Relational data source backed by PostgreSQL.
//!
//! Expects the tables written by the game proxy:
//! `room(id, shortdesc, longdesc, area, indoors, exits)` and
//! `exit(direction, source, destination)`.

use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::MapResult;
use crate::room::{Exit, Room, RoomId};
use crate::store::AreaData;

const AREAS_QUERY: &str = r#"
    SELECT DISTINCT area FROM room
    WHERE area IS NOT NULL
    ORDER BY area
"#;

const ROOMS_QUERY: &str = r#"
    SELECT id, shortdesc, longdesc, indoors, exits, area
    FROM room
    WHERE area = $1
    ORDER BY id
"#;

// Out-edge order drives placement, so exit rows must come back in the same
// order on every run.
const EXITS_QUERY: &str = r#"
    SELECT exit.direction, exit.source, exit.destination
    FROM exit
    LEFT JOIN room ON room.id = exit.source
    WHERE room.area = $1
    ORDER BY exit.source, exit.direction, exit.destination
"#;

const COUNT_QUERY: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM room WHERE area = $1) AS rooms,
        (SELECT COUNT(*) FROM exit JOIN room ON room.id = exit.source
         WHERE room.area = $1) AS exits
"#;

/// Repository reading rooms and exits from PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database at `url`.
    pub async fn connect(url: &str) -> MapResult<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinct area identifiers, sorted.
    pub async fn areas(&self) -> MapResult<Vec<String>> {
        let areas: Vec<String> = sqlx::query_scalar(AREAS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(areas)
    }

    /// Number of rooms in `area` and of exits leaving them.
    pub async fn count_area(&self, area: &str) -> MapResult<(usize, usize)> {
        let row = sqlx::query(COUNT_QUERY)
            .bind(area)
            .fetch_one(&self.pool)
            .await?;
        let rooms: i64 = row.try_get("rooms")?;
        let exits: i64 = row.try_get("exits")?;
        Ok((
            usize::try_from(rooms).unwrap_or_default(),
            usize::try_from(exits).unwrap_or_default(),
        ))
    }

    /// Rooms of `area` and the exits whose source room is in it.
    pub async fn load_area(&self, area: &str) -> MapResult<AreaData> {
        let rows = sqlx::query(ROOMS_QUERY)
            .bind(area)
            .fetch_all(&self.pool)
            .await?;

        let mut rooms = Vec::with_capacity(rows.len());
        for row in rows {
            rooms.push(Room {
                id: RoomId(row.try_get("id")?),
                shortdesc: row.try_get::<Option<String>, _>("shortdesc")?.unwrap_or_default(),
                longdesc: row.try_get::<Option<String>, _>("longdesc")?.unwrap_or_default(),
                indoors: row.try_get::<Option<bool>, _>("indoors")?.unwrap_or_default(),
                exits: row.try_get("exits")?,
                area: row.try_get::<Option<String>, _>("area")?.unwrap_or_default(),
            });
        }

        let rows = sqlx::query(EXITS_QUERY)
            .bind(area)
            .fetch_all(&self.pool)
            .await?;

        let mut exits = Vec::with_capacity(rows.len());
        for row in rows {
            exits.push(Exit {
                direction: row.try_get("direction")?,
                source: RoomId(row.try_get("source")?),
                destination: RoomId(row.try_get("destination")?),
            });
        }

        debug!(area, rooms = rooms.len(), exits = exits.len(), "loaded area from database");
        Ok(AreaData { rooms, exits })
    }
}
