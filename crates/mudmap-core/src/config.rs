use crate::error::{MapError, MapResult};

/// Default subgraph colours, cycled by subgraph index.
pub const DEFAULT_PALETTE: [&str; 12] = [
    "#b87a7a", "#7ab87a", "#b8b87a", "#7a7ab8", "#b87ab8", "#7ab8b8", "#262626", "#dbbdbd",
    "#bddbbd", "#dbdbbd", "#bdbddb", "#bddbdb",
];

/// What to do with an exit whose source or destination room was not loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Drop the exit from the graph and count it.
    #[default]
    Skip,
    /// Fail the whole build with [`MapError::OrphanExit`].
    Reject,
}

/// Configuration for a layout run.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Treat a placement collision as a fatal error.
    pub strict: bool,
    /// Handling of exits pointing outside the loaded rooms.
    pub orphans: OrphanPolicy,
    /// Nudge unanchored subgraphs apart by a fraction of a cell.
    pub stagger: bool,
    /// Subgraph colours. Must not be empty.
    pub palette: Vec<String>,
    /// Colour of edges that connect two subgraphs.
    pub cross_edge_color: String,
    /// Border colour of rooms with unresolved exits.
    pub flag_border_color: String,
    /// Node shape of rooms with unresolved exits.
    pub flag_shape: String,
    /// Edge type of every labelled edge.
    pub label_edge_type: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strict: false,
            orphans: OrphanPolicy::Skip,
            stagger: true,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            cross_edge_color: "#99e".to_string(),
            flag_border_color: "#ff0000".to_string(),
            flag_shape: "diamond".to_string(),
            label_edge_type: "curvedArrow".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Fail on the first placement collision instead of reporting it.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the orphan exit policy.
    pub fn with_orphans(mut self, policy: OrphanPolicy) -> Self {
        self.orphans = policy;
        self
    }

    /// Enable or disable the stagger of unanchored subgraphs.
    pub fn with_stagger(mut self, stagger: bool) -> Self {
        self.stagger = stagger;
        self
    }

    /// Replace the subgraph palette.
    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Colour for the subgraph at `index`. Wraps around the palette.
    pub fn color_for(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return "";
        }
        &self.palette[index % self.palette.len()]
    }

    /// Check that the configuration can produce a layout.
    pub fn validate(&self) -> MapResult<()> {
        if self.palette.is_empty() {
            return Err(MapError::Config("palette must contain at least one colour".into()));
        }
        Ok(())
    }
}
