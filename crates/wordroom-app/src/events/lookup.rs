use std::io::Write;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use wordroom_core::{TableLocation, VocabError, Vocabulary};
use wordroom_define::Lookup;

use crate::controller::{ChannelSet, spawn_lookup};
use crate::events::AppEvent;
use crate::render::render_lookup;
use crate::state::AppState;

pub async fn handle_lookup(
    state: &mut AppState,
    word: &str,
    cancel: &CancellationToken,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let word = word.trim();
    if word.is_empty() {
        writeln!(out, "Nothing to look up")?;
        return Ok(());
    }

    let channels = ChannelSet::new();
    let (tx, rx) = channels.definitions;
    let worker = spawn_lookup(
        state.definer.clone(),
        word.to_string(),
        tx,
        cancel.child_token(),
    );

    let limit = Duration::from_secs(state.config.timeout_seconds);
    let event = match timeout(limit, rx.recv()).await {
        Ok(event) => event?,
        Err(_) => {
            worker.abort();
            anyhow::bail!(
                "Looking up '{}' took longer than {}s",
                word,
                limit.as_secs()
            );
        }
    };

    match event {
        AppEvent::DefinitionReady(lookup) => {
            if let Some(location) = save_to_history(&mut state.vocab, &lookup)? {
                tracing::info!("Added '{}' to history at {}", lookup.word, location);
            }
            render_lookup(&lookup, state.vocab.get_notes(&lookup.word), out)?;
        }
        AppEvent::LookupCancelled { word } => {
            tracing::info!("Lookup for '{}' cancelled", word);
        }
    }

    Ok(())
}

/// Record a successful lookup in history unless the word already has notes.
///
/// Returns the new row when the word was not in the vocabulary before.
pub fn save_to_history(
    vocab: &mut Vocabulary,
    lookup: &Lookup,
) -> Result<Option<TableLocation>, VocabError> {
    if !lookup.has_definitions() || !vocab.get_notes(&lookup.word).is_empty() {
        return Ok(None);
    }

    let added = vocab.set_word(&lookup.word, "")?;
    vocab.del_dup_word(&lookup.word, "")?;
    Ok(added)
}
