use comfy_table::{ContentArrangement, Table};
use mudmap_core::RoomStore;

use super::{Source, SourceArgs};

pub fn run(source: &SourceArgs) -> Result<(), String> {
    let store = Source::open(source)?;
    let areas = store.areas().map_err(|e| e.to_string())?;

    if areas.is_empty() {
        println!("  No areas found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Area", "Rooms", "Exits"]);

    for area in &areas {
        let (rooms, exits) = store.count_area(area).map_err(|e| e.to_string())?;
        table.add_row(vec![area.clone(), rooms.to_string(), exits.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} areas", areas.len());

    Ok(())
}
