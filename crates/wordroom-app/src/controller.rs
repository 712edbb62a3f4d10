use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wordroom_define::Definer;

use crate::events::AppEvent;

/// Centralized channel management
pub struct ChannelSet {
    pub definitions: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            // One lookup in flight at a time
            definitions: kanal::bounded_async(1),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Define `word` on a worker task and report the result over `tx`.
///
/// The lookup never fails outright: the definer falls back to the offline
/// dictionary, so the worker always sends either `DefinitionReady` or,
/// when `cancel` fires first, `LookupCancelled`.
pub fn spawn_lookup(
    definer: Arc<Definer>,
    word: String,
    tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move {
        tracing::debug!("[LOOKUP] Defining '{}'", word);

        let event = tokio::select! {
            lookup = definer.define(&word) => {
                tracing::debug!(
                    "[LOOKUP] '{}': {} definitions",
                    lookup.word,
                    lookup.definitions.len()
                );
                AppEvent::DefinitionReady(lookup)
            }
            _ = cancel.cancelled() => AppEvent::LookupCancelled { word: word.clone() },
        };

        tx.send(event).await?;
        Ok(())
    })
}
