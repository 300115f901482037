use std::path::Path;

use mudmap_core::{LayoutConfig, OrphanPolicy, render_area};

use super::{Source, SourceArgs};

/// Flags of the `layout` command.
pub struct Options {
    pub strict: bool,
    pub pretty: bool,
    pub stagger: bool,
    pub reject_orphans: bool,
}

impl Options {
    fn config(&self) -> LayoutConfig {
        let orphans = if self.reject_orphans {
            OrphanPolicy::Reject
        } else {
            OrphanPolicy::Skip
        };
        LayoutConfig::default()
            .with_strict(self.strict)
            .with_stagger(self.stagger)
            .with_orphans(orphans)
    }
}

pub fn run(
    source: &SourceArgs,
    area: &str,
    output: Option<&Path>,
    options: &Options,
) -> Result<(), String> {
    let store = Source::open(source)?;
    let layout = render_area(&store, area, &options.config()).map_err(|e| e.to_string())?;
    let json = layout
        .document
        .to_json(options.pretty)
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, format!("{json}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!(
            "  Wrote {} rooms and {} exits to {}",
            layout.report.rooms,
            layout.report.edges,
            path.display()
        );
    } else {
        println!("{json}");
    }

    Ok(())
}
