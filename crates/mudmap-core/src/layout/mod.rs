//! The graph-to-grid pipeline: partition, place, stitch, annotate.

/// Cardinal partitioning and relative placement.
pub mod partition;
/// Edge classification, subgraph offsets and colours.
pub mod stitch;

use std::fmt;

use tracing::info;

use crate::config::LayoutConfig;
use crate::error::{MapError, MapResult};
use crate::graph::AreaGraph;
use crate::render::{MapDocument, annotate};
use crate::room::RoomId;
use crate::store::{AreaData, RoomStore};

pub use partition::{Collision, Partition, Subgraph, partition};
pub use stitch::{EdgeClass, Stitching, stitch};

/// The result of laying out one area.
#[derive(Debug, Clone)]
pub struct Layout {
    /// The drawing handed to the front-end.
    pub document: MapDocument,
    /// Summary of what the pipeline found.
    pub report: LayoutReport,
}

/// A placement collision, with room ids resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionReport {
    /// Subgraph index.
    pub subgraph: usize,
    /// Relative cell shared by both rooms.
    pub cell: (i32, i32),
    /// The room that got the cell first.
    pub occupant: RoomId,
    /// The room placed on top of it.
    pub newcomer: RoomId,
}

/// Statistics and data-quality findings for one layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// The area laid out.
    pub area: String,
    /// Number of rooms.
    pub rooms: usize,
    /// Number of edges.
    pub edges: usize,
    /// Number of edges drawn with a label.
    pub labelled_edges: usize,
    /// Number of subgraphs.
    pub subgraphs: usize,
    /// Distinct links between subgraphs.
    pub meta_edges: usize,
    /// Exits dropped because an endpoint was not loaded.
    pub orphan_exits: usize,
    /// Placement collisions.
    pub collisions: Vec<CollisionReport>,
    /// Rooms with unresolved exits and the exits in question.
    pub unresolved: Vec<(RoomId, Vec<String>)>,
}

impl LayoutReport {
    /// Whether the drawing overlaps rooms of one subgraph.
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "area {}", self.area)?;
        writeln!(f, "  rooms:      {}", self.rooms)?;
        writeln!(f, "  exits:      {} ({} labelled)", self.edges, self.labelled_edges)?;
        writeln!(f, "  subgraphs:  {} ({} links)", self.subgraphs, self.meta_edges)?;
        writeln!(f, "  orphans:    {}", self.orphan_exits)?;
        if self.collisions.is_empty() {
            writeln!(f, "  collisions: none")?;
        } else {
            writeln!(f, "  collisions: {}", self.collisions.len())?;
            for c in &self.collisions {
                writeln!(
                    f,
                    "    {} on {} at ({}, {}) in subgraph {}",
                    c.newcomer, c.occupant, c.cell.0, c.cell.1, c.subgraph
                )?;
            }
        }
        if self.unresolved.is_empty() {
            writeln!(f, "  unresolved: none")?;
        } else {
            writeln!(f, "  unresolved: {}", self.unresolved.len())?;
            for (room, exits) in &self.unresolved {
                writeln!(f, "    {room}: {}", exits.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Lay out `area` from already loaded records.
///
/// In strict mode the first placement collision is returned as an error
/// instead of being reported.
pub fn layout_area(area: &str, data: &AreaData, config: &LayoutConfig) -> MapResult<Layout> {
    config.validate()?;

    let graph = AreaGraph::build(area, data, config)?;
    let partition = partition(&graph);

    let collisions: Vec<CollisionReport> = partition
        .collisions()
        .iter()
        .map(|c| CollisionReport {
            subgraph: c.subgraph,
            cell: c.cell,
            occupant: graph.room(c.occupant).id.clone(),
            newcomer: graph.room(c.newcomer).id.clone(),
        })
        .collect();

    if config.strict {
        if let Some(c) = collisions.first() {
            return Err(MapError::Collision {
                subgraph: c.subgraph,
                x: c.cell.0,
                y: c.cell.1,
                occupant: c.occupant.clone(),
                newcomer: c.newcomer.clone(),
            });
        }
    }

    let stitching = stitch(&graph, &partition, config);
    let document = annotate(&graph, &partition, &stitching, config);

    let report = LayoutReport {
        area: area.to_string(),
        rooms: graph.node_count(),
        edges: graph.edge_count(),
        labelled_edges: document.edges.iter().filter(|e| e.label.is_some()).count(),
        subgraphs: partition.len(),
        meta_edges: stitching.meta_edges().len(),
        orphan_exits: graph.orphans(),
        collisions,
        unresolved: document
            .flagged()
            .map(|n| (n.id.clone(), n.unknown.clone()))
            .collect(),
    };

    info!(
        area,
        rooms = report.rooms,
        subgraphs = report.subgraphs,
        collisions = report.collisions.len(),
        unresolved = report.unresolved.len(),
        "laid out area"
    );

    Ok(Layout { document, report })
}

/// Load `area` from a store and lay it out.
pub fn render_area(store: &dyn RoomStore, area: &str, config: &LayoutConfig) -> MapResult<Layout> {
    let data = store.load_area(area)?;
    layout_area(area, &data, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Exit, Room};
    use crate::store::MemoryStore;

    fn square_with_overlap() -> AreaData {
        AreaData {
            rooms: ["a", "b", "c", "d", "e"]
                .iter()
                .map(|id| Room::new(*id, "town"))
                .collect(),
            exits: vec![
                Exit::new("a", "north", "b"),
                Exit::new("b", "east", "c"),
                Exit::new("c", "south", "d"),
                Exit::new("d", "west", "e"),
            ],
        }
    }

    #[test]
    fn corridor_example() {
        let data = AreaData {
            rooms: vec![
                Room::new("A", "town"),
                Room::new("B", "town"),
                Room::new("C", "town"),
            ],
            exits: vec![
                Exit::new("A", "north", "B"),
                Exit::new("B", "north", "C"),
                Exit::new("C", "up", "A"),
            ],
        };
        let layout = layout_area("town", &data, &LayoutConfig::default()).unwrap();
        let ys: Vec<f64> = layout.document.nodes.iter().map(|n| n.y).collect();
        assert_eq!(ys, vec![0.0, -1.0, -2.0]);
        assert!(layout.document.nodes.iter().all(|n| n.x == 0.0));
        let labels: Vec<Option<&str>> = layout
            .document
            .edges
            .iter()
            .map(|e| e.label.as_deref())
            .collect();
        assert_eq!(labels, vec![None, None, Some("up")]);
        assert_eq!(layout.report.subgraphs, 1);
        assert_eq!(layout.report.meta_edges, 0);
    }

    #[test]
    fn empty_area_is_not_an_error() {
        let layout = layout_area("void", &AreaData::default(), &LayoutConfig::default()).unwrap();
        assert!(layout.document.nodes.is_empty());
        assert!(layout.document.edges.is_empty());
    }

    #[test]
    fn collision_is_reported_by_default() {
        let layout = layout_area("town", &square_with_overlap(), &LayoutConfig::default()).unwrap();
        assert!(layout.report.has_collisions());
        assert_eq!(layout.report.collisions[0].occupant.as_str(), "a");
        assert_eq!(layout.report.collisions[0].newcomer.as_str(), "e");
        assert_eq!(layout.document.nodes.len(), 5);
    }

    #[test]
    fn collision_is_fatal_in_strict_mode() {
        let config = LayoutConfig::default().with_strict(true);
        let err = layout_area("town", &square_with_overlap(), &config).unwrap_err();
        assert!(matches!(err, MapError::Collision { x: 0, y: 0, .. }));
    }

    #[test]
    fn render_area_reads_from_store() {
        let store = MemoryStore::new(
            vec![
                Room::new("x", "town").with_exits("north,down"),
                Room::new("y", "town"),
            ],
            vec![Exit::new("x", "north", "y")],
        );
        let layout = render_area(&store, "town", &LayoutConfig::default()).unwrap();
        assert_eq!(
            layout.report.unresolved,
            vec![(RoomId::from("x"), vec!["down".to_string()])]
        );
    }

    #[test]
    fn layout_is_repeatable() {
        let config = LayoutConfig::default();
        let first = layout_area("town", &square_with_overlap(), &config).unwrap();
        let second = layout_area("town", &square_with_overlap(), &config).unwrap();
        assert_eq!(first.document, second.document);
    }

    #[test]
    fn report_snapshot() {
        let mut data = square_with_overlap();
        data.rooms[1] = Room::new("b", "town").with_exits("east,up");
        data.exits.push(Exit::new("e", "portal", "gone"));
        let layout = layout_area("town", &data, &LayoutConfig::default()).unwrap();
        insta::assert_snapshot!(layout.report.to_string().trim_end(), @r"
        area town
          rooms:      5
          exits:      4 (0 labelled)
          subgraphs:  1 (0 links)
          orphans:    1
          collisions: 1
            e on a at (0, 0) in subgraph 0
          unresolved: 1
            b: up
        ");
    }
}
