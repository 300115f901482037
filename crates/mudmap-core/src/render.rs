use std::collections::HashSet;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::MapResult;
use crate::graph::{AreaGraph, NodeIx};
use crate::layout::partition::Partition;
use crate::layout::stitch::{EdgeClass, Stitching};
use crate::room::RoomId;

/// A room as the front-end draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Room identifier.
    pub id: RoomId,
    /// Short description.
    pub label: String,
    /// Long description.
    pub longdesc: String,
    /// Whether the room is indoors.
    pub indoors: bool,
    /// Raw declared exit list.
    pub exits: Option<String>,
    /// Node size; always 1.
    pub size: u32,
    /// Canvas x coordinate.
    pub x: f64,
    /// Canvas y coordinate.
    pub y: f64,
    /// Colour of the room's subgraph.
    pub color: String,
    /// Border colour, set when the room has unresolved exits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Node shape, set when the room has unresolved exits.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    /// Declared exits with no matching edge, sorted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<String>,
}

impl NodeRecord {
    /// Whether the room declares exits the graph does not contain.
    pub fn is_flagged(&self) -> bool {
        !self.unknown.is_empty()
    }
}

/// An exit as the front-end draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    /// Sequential id, unique within the document.
    pub id: usize,
    /// Source room.
    pub source: RoomId,
    /// Target room.
    pub target: RoomId,
    /// Direction token, when the edge is not obvious from the grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Edge type, when labelled.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Edge colour, for edges between subgraphs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The complete drawing of one area.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapDocument {
    /// Rooms, in room id order.
    pub nodes: Vec<NodeRecord>,
    /// Exits, grouped by source room.
    pub edges: Vec<EdgeRecord>,
}

impl MapDocument {
    /// Serialize as JSON.
    pub fn to_json(&self, pretty: bool) -> MapResult<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Rooms with unresolved exits.
    pub fn flagged(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter().filter(|n| n.is_flagged())
    }
}

/// Declared exits of `node` that no outgoing edge accounts for, sorted.
pub fn unresolved_exits(graph: &AreaGraph, node: NodeIx) -> Vec<String> {
    let known: HashSet<&str> = graph
        .out_edges(node)
        .iter()
        .map(|&e| graph.edge(e).direction.as_str())
        .collect();
    let mut unknown: Vec<String> = graph
        .room(node)
        .declared_exits()
        .into_iter()
        .filter(|d| !known.contains(d.as_str()))
        .collect();
    unknown.sort();
    unknown
}

/// Combine graph, placement and stitching into the output document.
pub fn annotate(
    graph: &AreaGraph,
    partition: &Partition,
    stitching: &Stitching,
    config: &LayoutConfig,
) -> MapDocument {
    let nodes = graph
        .rooms()
        .iter()
        .enumerate()
        .map(|(ix, room)| {
            let sg = partition.subgraph_of(ix);
            let (rx, ry) = partition.relative(ix);
            let (ox, oy) = stitching.offset(sg);
            let unknown = unresolved_exits(graph, ix);
            let flagged = !unknown.is_empty();
            NodeRecord {
                id: room.id.clone(),
                label: room.shortdesc.clone(),
                longdesc: room.longdesc.clone(),
                indoors: room.indoors,
                exits: room.exits.clone(),
                size: 1,
                x: f64::from(rx) + ox,
                y: f64::from(ry) + oy,
                color: stitching.color(sg).to_string(),
                border_color: flagged.then(|| config.flag_border_color.clone()),
                shape: flagged.then(|| config.flag_shape.clone()),
                unknown,
            }
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .enumerate()
        .map(|(ix, edge)| {
            let class = stitching.class(ix);
            let labelled = class.needs_label();
            EdgeRecord {
                id: ix,
                source: graph.room(edge.source).id.clone(),
                target: graph.room(edge.target).id.clone(),
                label: labelled.then(|| edge.direction.to_string()),
                kind: labelled.then(|| config.label_edge_type.clone()),
                color: (class == EdgeClass::CrossLevel).then(|| config.cross_edge_color.clone()),
            }
        })
        .collect();

    MapDocument { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::partition::partition;
    use crate::layout::stitch::stitch;
    use crate::room::{Exit, Room};
    use crate::store::AreaData;

    fn document(data: &AreaData) -> MapDocument {
        let config = LayoutConfig::default();
        let g = AreaGraph::build("town", data, &config).unwrap();
        let p = partition(&g);
        let s = stitch(&g, &p, &config);
        annotate(&g, &p, &s, &config)
    }

    #[test]
    fn declared_exit_without_edge_flags_room() {
        let data = AreaData {
            rooms: vec![
                Room::new("x", "town").with_exits("north,down"),
                Room::new("y", "town"),
            ],
            exits: vec![Exit::new("x", "north", "y")],
        };
        let doc = document(&data);
        let x = &doc.nodes[0];
        assert_eq!(x.unknown, vec!["down"]);
        assert_eq!(x.border_color.as_deref(), Some("#ff0000"));
        assert_eq!(x.shape.as_deref(), Some("diamond"));
        assert!(!doc.nodes[1].is_flagged());
        assert_eq!(doc.flagged().count(), 1);
    }

    #[test]
    fn fully_resolved_room_is_not_flagged() {
        let data = AreaData {
            rooms: vec![
                Room::new("x", "town").with_exits("north,enter portal"),
                Room::new("y", "town"),
            ],
            exits: vec![
                Exit::new("x", "north", "y"),
                Exit::new("x", "enter portal", "y"),
            ],
        };
        let doc = document(&data);
        assert!(!doc.nodes[0].is_flagged());
        assert_eq!(doc.nodes[0].border_color, None);
    }

    #[test]
    fn aligned_edges_carry_no_label() {
        let data = AreaData {
            rooms: vec![Room::new("a", "town"), Room::new("b", "town")],
            exits: vec![Exit::new("a", "north", "b"), Exit::new("b", "up", "a")],
        };
        let doc = document(&data);
        assert_eq!(doc.edges[0].label, None);
        assert_eq!(doc.edges[1].label.as_deref(), Some("up"));
        assert_eq!(doc.edges[1].kind.as_deref(), Some("curvedArrow"));
        assert_eq!(doc.edges[1].color, None);
        assert_eq!(doc.nodes[1].y, -1.0);
    }

    #[test]
    fn cross_level_edges_are_coloured() {
        let data = AreaData {
            rooms: vec![Room::new("a", "town"), Room::new("b", "town")],
            exits: vec![Exit::new("a", "down", "b")],
        };
        let doc = document(&data);
        assert_eq!(doc.edges[0].color.as_deref(), Some("#99e"));
        assert_ne!(doc.nodes[0].color, doc.nodes[1].color);
        // b is anchored onto a's cell.
        assert_eq!((doc.nodes[1].x, doc.nodes[1].y), (0.0, 0.0));
    }

    #[test]
    fn json_uses_front_end_field_names() {
        let data = AreaData {
            rooms: vec![Room::new("x", "town").with_exits("down")],
            exits: vec![],
        };
        let json: serde_json::Value =
            serde_json::from_str(&document(&data).to_json(false).unwrap()).unwrap();
        let node = &json["nodes"][0];
        assert_eq!(node["borderColor"], "#ff0000");
        assert_eq!(node["type"], "diamond");
        assert_eq!(node["unknown"], serde_json::json!(["down"]));
        assert_eq!(node["size"], 1);
        assert!(node.get("border_color").is_none());
    }

    #[test]
    fn empty_document_serializes_to_empty_lists() {
        let doc = document(&AreaData::default());
        assert_eq!(doc.to_json(false).unwrap(), r#"{"nodes":[],"edges":[]}"#);
    }
}
