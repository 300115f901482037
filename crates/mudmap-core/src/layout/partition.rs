use std::collections::HashMap;

use tracing::warn;

use crate::graph::{AreaGraph, EdgeIx, NodeIx};

/// A maximal set of rooms reachable from one seed over cardinal exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    /// The room placed at relative (0, 0).
    pub seed: NodeIx,
    /// Rooms in placement order, starting with the seed.
    pub members: Vec<NodeIx>,
    /// Cardinal edges followed or encountered inside this subgraph.
    pub edges: Vec<EdgeIx>,
}

/// Two rooms of one subgraph computed onto the same grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// The subgraph both rooms belong to.
    pub subgraph: usize,
    /// The shared relative cell.
    pub cell: (i32, i32),
    /// The room that got the cell first. It keeps it in the collision map.
    pub occupant: NodeIx,
    /// The room placed there later.
    pub newcomer: NodeIx,
}

/// Placement state for every room: subgraph membership and relative grid
/// coordinates, kept beside the graph rather than on the room records.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    membership: Vec<usize>,
    relative: Vec<(i32, i32)>,
    subgraphs: Vec<Subgraph>,
    collisions: Vec<Collision>,
}

impl Partition {
    /// Index of the subgraph containing `node`.
    pub fn subgraph_of(&self, node: NodeIx) -> usize {
        self.membership[node]
    }

    /// Relative coordinates of `node` within its subgraph.
    pub fn relative(&self, node: NodeIx) -> (i32, i32) {
        self.relative[node]
    }

    /// All subgraphs, in seed order.
    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }

    /// Placement collisions, in detection order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Number of subgraphs.
    pub fn len(&self) -> usize {
        self.subgraphs.len()
    }

    /// Whether there are no subgraphs (the graph was empty).
    pub fn is_empty(&self) -> bool {
        self.subgraphs.is_empty()
    }
}

/// Split the graph into cardinal-connected subgraphs and place every room.
///
/// Seeds are taken in node order; each unvisited node starts a new subgraph
/// at (0, 0).
pub fn partition(graph: &AreaGraph) -> Partition {
    let n = graph.node_count();
    let mut placer = Placer {
        graph,
        membership: vec![None; n],
        relative: vec![(0, 0); n],
        collisions: Vec::new(),
    };

    let mut subgraphs = Vec::new();
    for seed in 0..n {
        if placer.membership[seed].is_some() {
            continue;
        }
        let subgraph = placer.place_from(seed, subgraphs.len());
        subgraphs.push(subgraph);
    }

    Partition {
        // Every node is either a seed or placed from one.
        membership: placer
            .membership
            .into_iter()
            .map(|m| m.unwrap_or_default())
            .collect(),
        relative: placer.relative,
        subgraphs,
        collisions: placer.collisions,
    }
}

struct Placer<'g> {
    graph: &'g AreaGraph,
    membership: Vec<Option<usize>>,
    relative: Vec<(i32, i32)>,
    collisions: Vec<Collision>,
}

impl Placer<'_> {
    /// Depth-first walk over cardinal out-edges from `seed`.
    ///
    /// The stack holds (node, next out-edge) frames, which visits rooms in the
    /// same order as the recursive formulation: a newly placed neighbour is
    /// fully explored before its parent's next edge is looked at.
    fn place_from(&mut self, seed: NodeIx, sg: usize) -> Subgraph {
        let graph = self.graph;
        let mut subgraph = Subgraph {
            seed,
            members: vec![seed],
            edges: Vec::new(),
        };
        let mut grid: HashMap<(i32, i32), NodeIx> = HashMap::new();

        self.membership[seed] = Some(sg);
        self.relative[seed] = (0, 0);
        grid.insert((0, 0), seed);

        let mut stack: Vec<(NodeIx, usize)> = vec![(seed, 0)];
        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let out = graph.out_edges(node);
            if cursor >= out.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let eix = out[cursor];
            let edge = graph.edge(eix);
            let Some((dx, dy)) = edge.direction.offset() else {
                continue;
            };

            match self.membership[edge.target] {
                // Cycle or convergent path: first position wins.
                Some(owner) if owner == sg => subgraph.edges.push(eix),
                // Owned by an earlier subgraph; the stitcher links the two.
                Some(_) => {}
                None => {
                    let (x, y) = self.relative[node];
                    let cell = (x + dx, y + dy);
                    let target = edge.target;
                    subgraph.edges.push(eix);
                    subgraph.members.push(target);
                    self.membership[target] = Some(sg);
                    self.relative[target] = cell;

                    if let Some(&occupant) = grid.get(&cell) {
                        warn!(
                            area = graph.area(),
                            subgraph = sg,
                            x = cell.0,
                            y = cell.1,
                            occupant = %graph.room(occupant).id,
                            newcomer = %graph.room(target).id,
                            "placement collision"
                        );
                        self.collisions.push(Collision {
                            subgraph: sg,
                            cell,
                            occupant,
                            newcomer: target,
                        });
                    } else {
                        grid.insert(cell, target);
                    }

                    stack.push((target, 0));
                }
            }
        }

        subgraph
    }
}
