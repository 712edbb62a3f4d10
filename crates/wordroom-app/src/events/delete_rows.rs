use std::io::Write;

use wordroom_core::{TableLocation, Vocabulary};

pub fn handle_delete(
    vocab: &mut Vocabulary,
    locations: &[TableLocation],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let deleted = vocab.delete_multiple(locations)?;

    if deleted.is_empty() {
        writeln!(out, "Nothing to delete")?;
    } else {
        writeln!(out, "Deleted {}", deleted.join(", "))?;
    }
    Ok(())
}

pub fn handle_remove(vocab: &mut Vocabulary, word: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let word = word.trim();

    match vocab.words().section_of(word) {
        Some(section) => {
            vocab.delete_word(section, word)?;
            writeln!(out, "Deleted {word}")?;
        }
        None => writeln!(out, "'{word}' is not in your vocabulary")?,
    }
    Ok(())
}
