use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use mudmap_core::{LayoutConfig, render_area};

use super::{Source, SourceArgs};

pub fn run(source: &SourceArgs, area: &str, strict: bool) -> Result<(), String> {
    let store = Source::open(source)?;
    let layout = render_area(&store, area, &LayoutConfig::default()).map_err(|e| e.to_string())?;
    let report = &layout.report;

    if report.rooms == 0 {
        println!("  Area '{area}' has no rooms.");
        return Ok(());
    }

    println!("  {} {}", "Area".bold(), area.bold());
    println!(
        "  {} rooms, {} exits ({} labelled), {} levels, {} level links",
        report.rooms, report.edges, report.labelled_edges, report.subgraphs, report.meta_edges
    );
    if report.orphan_exits > 0 {
        println!(
            "  {}",
            format!("{} exits lead outside the area", report.orphan_exits).dimmed()
        );
    }
    println!();

    if report.has_collisions() {
        println!("  {}", "Collisions".red().bold());
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Room", "Overlaps", "Cell", "Level"]);
        for c in &report.collisions {
            table.add_row(vec![
                c.newcomer.to_string(),
                c.occupant.to_string(),
                format!("({}, {})", c.cell.0, c.cell.1),
                c.subgraph.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !report.unresolved.is_empty() {
        println!("  {}", "Unresolved exits".yellow().bold());
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Room", "Label", "Missing"]);
        for node in layout.document.flagged() {
            table.add_row(vec![
                node.id.to_string(),
                node.label.clone(),
                node.unknown.join(", "),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !report.has_collisions() && report.unresolved.is_empty() {
        println!("  {}", "No problems found.".green());
    }

    if strict && report.has_collisions() {
        return Err(format!(
            "{} placement collision{} in '{area}'",
            report.collisions.len(),
            if report.collisions.len() == 1 { "" } else { "s" }
        ));
    }

    Ok(())
}
