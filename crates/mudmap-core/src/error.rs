use crate::room::RoomId;

/// Alias for `Result<T, MapError>`.
pub type MapResult<T> = Result<T, MapError>;

/// Errors that can occur while loading an area or laying it out.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The data source could not be read.
    #[error("cannot read data source: {0}")]
    Io(#[from] std::io::Error),

    /// The data source contained malformed JSON.
    #[error("malformed data source: {0}")]
    Json(#[from] serde_json::Error),

    /// The relational store rejected a query or could not be reached.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An exit references a room that was not loaded for the area.
    #[error("exit \"{direction}\" from {source_room} to {destination} references a room outside the area")]
    OrphanExit {
        /// The exit's direction token.
        direction: String,
        /// The room the exit leaves from.
        source_room: RoomId,
        /// The room the exit leads to.
        destination: RoomId,
    },

    /// Two rooms of one subgraph were placed on the same grid cell.
    #[error("rooms {occupant} and {newcomer} collide at ({x}, {y}) in subgraph {subgraph}")]
    Collision {
        /// Index of the subgraph where the collision happened.
        subgraph: usize,
        /// Relative x coordinate of the shared cell.
        x: i32,
        /// Relative y coordinate of the shared cell.
        y: i32,
        /// The room placed on the cell first.
        occupant: RoomId,
        /// The room placed on the cell later.
        newcomer: RoomId,
    },

    /// The layout configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}
