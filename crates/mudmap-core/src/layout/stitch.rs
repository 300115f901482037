use std::collections::BTreeSet;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::graph::{AreaGraph, EdgeIx};
use crate::layout::partition::Partition;

/// How an edge relates to the grid drawn for its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// Same subgraph, cardinal, and the endpoints sit exactly one step apart
    /// in that direction. Obvious from the grid; drawn without a label.
    Aligned,
    /// Same subgraph and cardinal, but the endpoints are not where the
    /// direction says they should be.
    Mismatched,
    /// Same subgraph, non-cardinal direction.
    NonCardinal,
    /// The endpoints are in different subgraphs.
    CrossLevel,
}

impl EdgeClass {
    /// Whether the edge must carry its direction as a visible label.
    pub fn needs_label(self) -> bool {
        !matches!(self, Self::Aligned)
    }
}

/// Per-edge classes and per-subgraph canvas offsets and colours.
#[derive(Debug, Clone, Default)]
pub struct Stitching {
    classes: Vec<EdgeClass>,
    offsets: Vec<(f64, f64)>,
    anchored: Vec<bool>,
    colors: Vec<String>,
    meta_edges: BTreeSet<(usize, usize)>,
}

impl Stitching {
    /// Class of the edge at `edge`.
    pub fn class(&self, edge: EdgeIx) -> EdgeClass {
        self.classes[edge]
    }

    /// Canvas offset of subgraph `sg`.
    pub fn offset(&self, sg: usize) -> (f64, f64) {
        self.offsets[sg]
    }

    /// Whether subgraph `sg` was positioned by a cross-subgraph edge.
    pub fn is_anchored(&self, sg: usize) -> bool {
        self.anchored[sg]
    }

    /// Display colour of subgraph `sg`.
    pub fn color(&self, sg: usize) -> &str {
        &self.colors[sg]
    }

    /// Meta-graph edges `(from subgraph, to subgraph)`, deduplicated.
    pub fn meta_edges(&self) -> &BTreeSet<(usize, usize)> {
        &self.meta_edges
    }
}

/// Classify every edge and position every subgraph on the shared canvas.
///
/// A cross-subgraph edge sets the target subgraph's offset so that its target
/// room lands on the source room's relative cell. The offset is taken in the
/// source subgraph's own frame and ignores that subgraph's offset, so chains
/// of levels drift; a later edge into the same subgraph overrides an earlier
/// one. Subgraphs never reached this way sit at the origin, staggered by
/// `i / n` to keep them from overlapping exactly.
pub fn stitch(graph: &AreaGraph, partition: &Partition, config: &LayoutConfig) -> Stitching {
    let n = partition.len();
    let mut offsets: Vec<Option<(i32, i32)>> = vec![None; n];
    let mut meta_edges = BTreeSet::new();
    let mut classes = Vec::with_capacity(graph.edge_count());

    for edge in graph.edges() {
        let src_sg = partition.subgraph_of(edge.source);
        let tgt_sg = partition.subgraph_of(edge.target);
        let (sx, sy) = partition.relative(edge.source);
        let (tx, ty) = partition.relative(edge.target);

        let class = if src_sg == tgt_sg {
            match edge.direction.offset() {
                Some(expected) if expected == (tx - sx, ty - sy) => EdgeClass::Aligned,
                Some(_) => EdgeClass::Mismatched,
                None => EdgeClass::NonCardinal,
            }
        } else {
            meta_edges.insert((src_sg, tgt_sg));
            offsets[tgt_sg] = Some((sx - tx, sy - ty));
            EdgeClass::CrossLevel
        };
        classes.push(class);
    }

    let mut canvas = Vec::with_capacity(n);
    let mut anchored = Vec::with_capacity(n);
    for (i, offset) in offsets.into_iter().enumerate() {
        match offset {
            Some((x, y)) => {
                canvas.push((f64::from(x), f64::from(y)));
                anchored.push(true);
            }
            None => {
                // 0.0 - nudge keeps the first subgraph at +0.0.
                let nudge = if config.stagger { i as f64 / n as f64 } else { 0.0 };
                canvas.push((nudge, 0.0 - nudge));
                anchored.push(false);
            }
        }
    }

    let colors = (0..n).map(|i| config.color_for(i).to_string()).collect();

    debug!(
        area = graph.area(),
        subgraphs = n,
        meta_edges = meta_edges.len(),
        "stitched subgraphs"
    );

    Stitching {
        classes,
        offsets: canvas,
        anchored,
        colors,
        meta_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::partition::partition;
    use crate::room::{Exit, Room};
    use crate::store::AreaData;

    fn graph(rooms: &[&str], exits: &[(&str, &str, &str)]) -> AreaGraph {
        let data = AreaData {
            rooms: rooms.iter().map(|id| Room::new(*id, "town")).collect(),
            exits: exits
                .iter()
                .map(|(s, d, t)| Exit::new(*s, *d, *t))
                .collect(),
        };
        AreaGraph::build("town", &data, &LayoutConfig::default()).unwrap()
    }

    fn run(g: &AreaGraph, config: &LayoutConfig) -> (Partition, Stitching) {
        let p = partition(g);
        let s = stitch(g, &p, config);
        (p, s)
    }

    fn classes(g: &AreaGraph, s: &Stitching) -> Vec<(String, EdgeClass)> {
        g.edges()
            .iter()
            .enumerate()
            .map(|(i, e)| (e.direction.to_string(), s.class(i)))
            .collect()
    }

    #[test]
    fn corridor_with_non_cardinal_return() {
        let g = graph(
            &["a", "b", "c"],
            &[("a", "north", "b"), ("b", "north", "c"), ("c", "up", "a")],
        );
        let (_, s) = run(&g, &LayoutConfig::default());
        assert_eq!(
            classes(&g, &s),
            vec![
                ("north".to_string(), EdgeClass::Aligned),
                ("north".to_string(), EdgeClass::Aligned),
                ("up".to_string(), EdgeClass::NonCardinal),
            ]
        );
        assert!(s.meta_edges().is_empty());
    }

    #[test]
    fn return_path_that_disagrees_with_the_grid() {
        // b -> a claims east, but a is south of b.
        let g = graph(&["a", "b"], &[("a", "north", "b"), ("b", "east", "a")]);
        let (_, s) = run(&g, &LayoutConfig::default());
        assert_eq!(s.class(0), EdgeClass::Aligned);
        assert_eq!(s.class(1), EdgeClass::Mismatched);
        assert!(s.class(1).needs_label());
    }

    #[test]
    fn cross_level_edge_anchors_target_subgraph() {
        // a is a singleton; b -north-> c is a second level; a -down-> c links them.
        let g = graph(&["a", "b", "c"], &[("a", "down", "c"), ("b", "north", "c")]);
        let (p, s) = run(&g, &LayoutConfig::default());
        assert_eq!(p.len(), 2);
        assert_eq!(s.class(0), EdgeClass::CrossLevel);
        assert_eq!(s.class(1), EdgeClass::Aligned);
        assert_eq!(s.meta_edges().iter().copied().collect::<Vec<_>>(), vec![(0, 1)]);
        // c sits at (0, -1) in its level and must land on a's cell.
        assert!(s.is_anchored(1));
        assert_eq!(s.offset(1), (0.0, 1.0));
    }

    #[test]
    fn offset_is_relative_to_source_frame() {
        // Level 0: a -east-> b. Level 1: c -north-> d. b -down-> d.
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "east", "b"), ("b", "down", "d"), ("c", "north", "d")],
        );
        let (p, s) = run(&g, &LayoutConfig::default());
        assert_eq!(p.len(), 2);
        assert_eq!(p.relative(3), (0, -1));
        // d lands on b's cell (1, 0): offset = (1 - 0, 0 - (-1)).
        assert_eq!(s.offset(1), (1.0, 1.0));
        assert!(!s.is_anchored(0));
        assert_eq!(s.offset(0), (0.0, 0.0));
    }

    #[test]
    fn later_cross_edge_into_a_level_wins() {
        // a and b are singletons; c -north-> d is a third level reached from both.
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "down", "c"), ("b", "down", "d"), ("c", "north", "d")],
        );
        let (p, s) = run(&g, &LayoutConfig::default());
        assert_eq!(p.len(), 3);
        assert_eq!(p.relative(3), (0, -1));
        assert_eq!(
            s.meta_edges().iter().copied().collect::<Vec<_>>(),
            vec![(0, 2), (1, 2)]
        );
        // a -down-> c alone would give (0, 0); b -down-> d comes later.
        assert!(s.is_anchored(2));
        assert_eq!(s.offset(2), (0.0, 1.0));
    }

    #[test]
    fn chained_levels_ignore_the_source_offset() {
        // Three levels: a-b, c-d and e, each linked to the next by "down".
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[
                ("a", "east", "b"),
                ("b", "down", "c"),
                ("c", "east", "d"),
                ("d", "down", "e"),
            ],
        );
        let (p, s) = run(&g, &LayoutConfig::default());
        assert_eq!(p.len(), 3);
        assert_eq!(s.offset(1), (1.0, 0.0));
        // e lands on d's cell in d's own frame, not shifted by level 1's offset.
        assert_eq!(s.offset(2), (1.0, 0.0));
        assert_ne!(s.offset(2), (2.0, 0.0));
    }

    #[test]
    fn unanchored_subgraphs_are_staggered() {
        let g = graph(&["a", "b", "c", "d"], &[]);
        let (_, s) = run(&g, &LayoutConfig::default());
        assert_eq!(s.offset(0), (0.0, 0.0));
        assert_eq!(s.offset(2), (0.5, -0.5));
        assert_eq!(s.offset(3), (0.75, -0.75));

        let (_, flat) = run(&g, &LayoutConfig::default().with_stagger(false));
        assert_eq!(flat.offset(3), (0.0, 0.0));
    }

    #[test]
    fn palette_cycles_by_subgraph_index() {
        let g = graph(&["a", "b", "c"], &[]);
        let config = LayoutConfig::default().with_palette(["#111", "#222"]);
        let (_, s) = run(&g, &config);
        assert_eq!(s.color(0), "#111");
        assert_eq!(s.color(1), "#222");
        assert_eq!(s.color(2), "#111");
    }
}
