use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::download::{catalog, s3, S3_BUCKET, S3_PREFIX};
use crate::utils::format::format_bytes;
use crate::utils::progress::create_spinner;

pub fn run() -> anyhow::Result<()> {
    let spinner = create_spinner("Listing alignment databases...");
    let listing = s3::list_objects(S3_BUCKET, S3_PREFIX)?;
    spinner.finish_and_clear();

    let entries = catalog::classify(&listing.contents);
    if entries.is_empty() {
        println!("No objects found in bucket.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Filename")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Size")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Type")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Known")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.filename),
            Cell::new(format_bytes(entry.size_bytes)),
            Cell::new(entry.molecule_type),
            Cell::new(if entry.known { "✓" } else { "" }),
        ]);
    }

    println!("{table}");
    Ok(())
}
