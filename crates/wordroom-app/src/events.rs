use std::io;

use tokio_util::sync::CancellationToken;
use wordroom_core::Vocabulary;
use wordroom_define::Lookup;

use crate::cli::{Command, SearchArgs};
use crate::render;
use crate::state::AppState;

pub mod delete_rows;
pub mod edit_notes;
pub mod lookup;
pub mod set_key;
pub mod transfer;

use delete_rows::{handle_delete, handle_remove};
use edit_notes::{handle_note, handle_random, handle_show};
use lookup::handle_lookup;
use set_key::handle_set_key;
use transfer::{handle_export, handle_import, handle_share};

/// Messages passed from worker tasks back to the main task
#[derive(Debug, Clone)]
pub enum AppEvent {
    DefinitionReady(Lookup),
    LookupCancelled { word: String },
}

/// Run one CLI command against the app state.
pub async fn handle_command(
    state: &mut AppState,
    command: Command,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("Handling {:?}", command);
    let mut out = io::stdout();

    match command {
        Command::Lookup { word } => handle_lookup(state, &word.join(" "), cancel, &mut out).await,
        Command::Note { word, notes } => handle_note(&mut state.vocab, &word, &notes, &mut out),
        Command::Show { word } => handle_show(&state.vocab, &word, &mut out),
        Command::List { search } => {
            apply_search(&mut state.vocab, &search);
            render::render_table(&state.vocab, &mut out)?;
            Ok(())
        }
        Command::Delete { search, locations } => {
            apply_search(&mut state.vocab, &search);
            handle_delete(&mut state.vocab, &locations, &mut out)
        }
        Command::Remove { word } => handle_remove(&mut state.vocab, &word, &mut out),
        Command::Random => handle_random(&state.vocab, &mut out),
        Command::Share { search, locations } => {
            apply_search(&mut state.vocab, &search);
            handle_share(&state.vocab, &locations, &mut out)
        }
        Command::Export { path } => handle_export(&state.vocab, &path, &mut out),
        Command::Import { path, yes } => handle_import(&mut state.vocab, &path, yes, &mut out),
        Command::SetKey { key } => handle_set_key(state, &key, &mut out),
    }
}

/// Set the query, switching to full-text search for hashtag queries.
pub fn apply_search(vocab: &mut Vocabulary, search: &SearchArgs) {
    vocab.set_query(&search.query);
    vocab.toggle_full_text(search.full_text || search.query.contains('#'));
    tracing::debug!(
        "Query '{}' (full text: {})",
        vocab.query(),
        vocab.full_text()
    );
}
