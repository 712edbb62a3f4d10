use std::io::Write;
use std::path::Path;

use anyhow::Context;
use wordroom_core::export::share_text;
use wordroom_core::{TableLocation, Vocabulary};

pub fn handle_share(
    vocab: &Vocabulary,
    locations: &[TableLocation],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let text = share_text(vocab, locations);
    if text.is_empty() {
        writeln!(out, "Nothing to share")?;
    } else {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

pub fn handle_export(vocab: &Vocabulary, path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    vocab
        .export(path)
        .with_context(|| format!("Could not export to {}", path.display()))?;

    writeln!(
        out,
        "Exported {} words to {}",
        vocab.words().len(),
        path.display()
    )?;
    Ok(())
}

pub fn handle_import(
    vocab: &mut Vocabulary,
    path: &Path,
    confirmed: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if !confirmed {
        writeln!(
            out,
            "Importing replaces your current words. Run again with --yes to continue."
        )?;
        return Ok(());
    }

    vocab
        .import(path)
        .with_context(|| format!("Could not import {}", path.display()))?;

    writeln!(
        out,
        "Imported {} words from {}",
        vocab.words().len(),
        path.display()
    )?;
    Ok(())
}
