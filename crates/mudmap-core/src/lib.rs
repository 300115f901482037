//! Grid layout for MUD area maps.
//!
//! Rooms and their exits are loaded per area from a [`store::RoomStore`],
//! turned into a direction-keyed multigraph, split into levels that can be
//! drawn on a grid, and serialized as a node/edge document for a graph
//! renderer. Compass exits become unit steps on the grid; every other exit is
//! drawn as a labelled edge.

/// Subgraph palette and other layout options.
pub mod config;
/// Compass directions and their grid offsets.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// The per-area room multigraph.
pub mod graph;
/// The partition, placement and stitching pipeline.
pub mod layout;
/// PostgreSQL data source.
#[cfg(feature = "postgres")]
pub mod postgres;
/// Output document and exit annotation.
pub mod render;
/// Room and exit records.
pub mod room;
/// Data source abstraction and file-backed stores.
pub mod store;

/// Re-export configuration types.
pub use config::{LayoutConfig, OrphanPolicy};
/// Re-export direction types.
pub use direction::{Cardinal, Direction};
/// Re-export error types.
pub use error::{MapError, MapResult};
/// Re-export the graph.
pub use graph::AreaGraph;
/// Re-export the pipeline entry points.
pub use layout::{Layout, LayoutReport, layout_area, render_area};
/// Re-export the PostgreSQL store.
#[cfg(feature = "postgres")]
pub use postgres::PgStore;
/// Re-export output types.
pub use render::{EdgeRecord, MapDocument, NodeRecord};
/// Re-export record types.
pub use room::{Exit, Room, RoomId};
/// Re-export stores.
pub use store::{AreaData, JsonStore, MemoryStore, RoomStore};
