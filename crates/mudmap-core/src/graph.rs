use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::{LayoutConfig, OrphanPolicy};
use crate::direction::Direction;
use crate::error::{MapError, MapResult};
use crate::room::{Room, RoomId};
use crate::store::AreaData;

/// Index of a room within an [`AreaGraph`].
pub type NodeIx = usize;
/// Index of an edge within an [`AreaGraph`].
pub type EdgeIx = usize;

/// A directed, direction-keyed edge between two rooms of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEdge {
    /// The room the exit leaves from.
    pub source: NodeIx,
    /// The room the exit leads to.
    pub target: NodeIx,
    /// The exit's direction.
    pub direction: Direction,
}

/// The directed multigraph of one area: rooms as nodes, exits as edges keyed
/// by `(source, target, direction)`.
///
/// Nodes are ordered by room id, so every traversal over the graph is
/// deterministic. Edges are grouped by source node and keep the order the
/// data source reported them in.
#[derive(Debug, Clone, Default)]
pub struct AreaGraph {
    area: String,
    rooms: Vec<Room>,
    index: HashMap<RoomId, NodeIx>,
    edges: Vec<RoomEdge>,
    out: Vec<Vec<EdgeIx>>,
    orphans: usize,
}

impl AreaGraph {
    /// Build the graph of `area` from the data source's records.
    pub fn build(area: &str, data: &AreaData, config: &LayoutConfig) -> MapResult<Self> {
        let mut rooms: Vec<Room> = data
            .rooms
            .iter()
            .filter(|r| r.area == area)
            .cloned()
            .collect();
        // Stable: among duplicate ids the first reported record comes first.
        rooms.sort_by(|a, b| a.id.cmp(&b.id));

        let mut index = HashMap::with_capacity(rooms.len());
        let mut unique = Vec::with_capacity(rooms.len());
        for room in rooms {
            if index.contains_key(&room.id) {
                warn!(area, room = %room.id, "duplicate room id, keeping first record");
                continue;
            }
            index.insert(room.id.clone(), unique.len());
            unique.push(room);
        }
        let rooms = unique;

        let mut adjacency: Vec<Vec<(NodeIx, Direction)>> = vec![Vec::new(); rooms.len()];
        let mut seen: HashSet<(NodeIx, NodeIx, &str)> = HashSet::new();
        let mut orphans = 0;

        for exit in &data.exits {
            let (Some(&src), Some(&tgt)) = (index.get(&exit.source), index.get(&exit.destination))
            else {
                if config.orphans == OrphanPolicy::Reject {
                    return Err(MapError::OrphanExit {
                        direction: exit.direction.clone(),
                        source_room: exit.source.clone(),
                        destination: exit.destination.clone(),
                    });
                }
                debug!(
                    area,
                    direction = %exit.direction,
                    source = %exit.source,
                    destination = %exit.destination,
                    "dropping exit to a room outside the area"
                );
                orphans += 1;
                continue;
            };
            if seen.insert((src, tgt, exit.direction.as_str())) {
                adjacency[src].push((tgt, Direction::parse(&exit.direction)));
            }
        }

        let mut edges = Vec::new();
        let mut out = Vec::with_capacity(rooms.len());
        for (source, targets) in adjacency.into_iter().enumerate() {
            let mut ids = Vec::with_capacity(targets.len());
            for (target, direction) in targets {
                ids.push(edges.len());
                edges.push(RoomEdge {
                    source,
                    target,
                    direction,
                });
            }
            out.push(ids);
        }

        debug!(
            area,
            rooms = rooms.len(),
            edges = edges.len(),
            orphans,
            "built area graph"
        );

        Ok(Self {
            area: area.to_string(),
            rooms,
            index,
            edges,
            out,
            orphans,
        })
    }

    /// The area this graph was built for.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// All rooms, ordered by id. A room's position is its [`NodeIx`].
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The room at `ix`.
    pub fn room(&self, ix: NodeIx) -> &Room {
        &self.rooms[ix]
    }

    /// Look up a room's index by id.
    pub fn index_of(&self, id: &RoomId) -> Option<NodeIx> {
        self.index.get(id).copied()
    }

    /// All edges, grouped by source room in node order.
    pub fn edges(&self) -> &[RoomEdge] {
        &self.edges
    }

    /// The edge at `ix`.
    pub fn edge(&self, ix: EdgeIx) -> &RoomEdge {
        &self.edges[ix]
    }

    /// Outgoing edges of `node` in encounter order.
    pub fn out_edges(&self, node: NodeIx) -> &[EdgeIx] {
        &self.out[node]
    }

    /// Number of rooms.
    pub fn node_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of edges after deduplication.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the area has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Number of exits dropped because an endpoint was not loaded.
    pub fn orphans(&self) -> usize {
        self.orphans
    }
}
