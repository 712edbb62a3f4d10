use std::io::Write;

use wordroom_core::export::notes_format;
use wordroom_core::{Section, VocabError, Vocabulary};

pub fn handle_note(
    vocab: &mut Vocabulary,
    word: &str,
    notes: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let word = word.trim();
    if word.is_empty() {
        writeln!(out, "Nothing to save, the word is blank")?;
        return Ok(());
    }

    let added = vocab.set_word(word, notes)?;
    let moved = vocab.del_dup_word(word, notes)?;
    tracing::debug!("'{}' added: {:?}, moved from: {:?}", word, added, moved);

    match Section::for_notes(notes) {
        Section::Notes => write!(out, "Saved notes for '{word}'")?,
        Section::History => write!(out, "'{word}' has no notes and is kept in history")?,
    }
    if let Some(location) = added {
        write!(out, ", new row {location}")?;
    }
    if let Some(location) = moved {
        write!(out, ", was {location}")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn handle_show(vocab: &Vocabulary, word: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let word = word.trim();
    let notes = vocab.get_notes(word);

    if notes.is_empty() {
        writeln!(out, "No notes for '{word}'")?;
    } else {
        writeln!(out, "{notes}")?;
    }
    Ok(())
}

pub fn handle_random(vocab: &Vocabulary, out: &mut impl Write) -> anyhow::Result<()> {
    match vocab.random_word() {
        Ok(word) => writeln!(out, "{}", notes_format(&word, vocab.get_notes(&word)))?,
        Err(VocabError::EmptyCollection) => writeln!(out, "No words with notes yet")?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
