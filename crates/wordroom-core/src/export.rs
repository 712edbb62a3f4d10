use crate::table::{TableDataSource, TableLocation};
use crate::vocabulary::Vocabulary;

pub const SHARE_SEPARATOR: &str = "\n\n----\n\n";

/// Plain-text rendering of one word and its notes.
pub fn notes_format(word: &str, notes: &str) -> String {
    format!("{word}\n\n{notes}")
}

/// Text for sharing the selected rows, in selection order.
pub fn share_text(vocab: &Vocabulary, locations: &[TableLocation]) -> String {
    locations
        .iter()
        .filter_map(|location| vocab.cell_for_row(location.section, location.row))
        .map(|cell| notes_format(&cell.text, vocab.get_notes(&cell.text)))
        .collect::<Vec<_>>()
        .join(SHARE_SEPARATOR)
}
