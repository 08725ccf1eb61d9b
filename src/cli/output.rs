use crate::report::PredictionRow;
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color as TableColor, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Standard progress bar style
pub fn create_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}

/// A bar over `len` files; hidden for a single file
pub fn file_progress(len: usize, message: &str) -> ProgressBar {
    let pb = if len > 1 {
        ProgressBar::new(len as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(create_progress_style());
    pb.set_message(message.to_string());
    pb
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn written(path: &Path, rows: usize) {
    println!("  {} {} ({} rows)", "→".cyan(), path.display(), rows);
}

/// Print the top of the organism ranking
pub fn print_ranking_table(key: &str, rows: &[PredictionRow], limit: usize) {
    if rows.is_empty() || limit == 0 {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Species").add_attribute(Attribute::Bold).fg(TableColor::Cyan),
        Cell::new(format!("{} score", key))
            .add_attribute(Attribute::Bold)
            .fg(TableColor::Cyan),
    ]);

    for (rank, row) in rows.iter().take(limit).enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&row.species),
            Cell::new(format!("{:.3}", row.score)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
    if rows.len() > limit {
        println!("{}", format!("  ... {} more in the prediction table", rows.len() - limit).dimmed());
    }
}
