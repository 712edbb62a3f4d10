//! Plain-text views: the sectioned word list and a single word's definitions.

use std::io::{self, Write};

use wordroom_core::{CellKind, TableDataSource, TableLocation};
use wordroom_define::Lookup;

const EMPTY_MESSAGE: &str = "Your vocabulary is empty. Look up a word to get started.";

fn marker(kind: CellKind) -> char {
    match kind {
        CellKind::Notes => '*',
        CellKind::History => '-',
        CellKind::Suggestion => '?',
    }
}

/// Print every section with its rows, prefixed by the `SECTION:ROW` that
/// `delete` and `share` accept.
pub fn render_table(source: &dyn TableDataSource, out: &mut impl Write) -> io::Result<()> {
    let sections = source.number_of_sections();
    let total: usize = (0..sections).map(|s| source.number_of_rows(s)).sum();
    if total == 0 {
        return writeln!(out, "{EMPTY_MESSAGE}");
    }

    for section in 0..sections {
        let rows = source.number_of_rows(section);
        let title = source.title_for_header(section);
        if !title.is_empty() {
            writeln!(out, "{title} ({rows})")?;
        }

        for row in 0..rows {
            let Some(cell) = source.cell_for_row(section, row) else {
                continue;
            };
            let location = TableLocation::new(section, row).to_string();
            let marker = marker(cell.kind);
            match cell.detail {
                Some(detail) => writeln!(out, "  {location:<5} {marker} {}  {detail}", cell.text)?,
                None => writeln!(out, "  {location:<5} {marker} {}", cell.text)?,
            }
        }
    }
    Ok(())
}

/// Print the word view: definitions, attribution, saved notes and notices.
pub fn render_lookup(lookup: &Lookup, notes: &str, out: &mut impl Write) -> io::Result<()> {
    if lookup.has_definitions() {
        writeln!(out, "{}", lookup.word)?;
        writeln!(out)?;
        for definition in &lookup.definitions {
            if definition.part_of_speech.is_empty() {
                writeln!(out, "  {}", definition.text)?;
            } else {
                writeln!(out, "  {}  {}", definition.part_of_speech, definition.text)?;
            }
        }
        if !lookup.attribution.is_empty() {
            writeln!(out)?;
            if lookup.attribution_url.is_empty() {
                writeln!(out, "{}", lookup.attribution)?;
            } else {
                writeln!(out, "{} <{}>", lookup.attribution, lookup.attribution_url)?;
            }
        }
    } else {
        writeln!(out, "No definitions found for '{}'", lookup.word)?;
    }

    if !lookup.suggestions.is_empty() {
        writeln!(out, "Did you mean: {}", lookup.suggestions.join(", "))?;
    }

    if !notes.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notes:")?;
        for line in notes.lines() {
            writeln!(out, "  {line}")?;
        }
    }

    for message in &lookup.messages {
        writeln!(out, "! {message}")?;
    }
    Ok(())
}
