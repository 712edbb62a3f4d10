use std::io::Write;

use anyhow::Context;
use wordroom_config::key::KeyFile;

use crate::state::AppState;

pub fn handle_set_key(state: &mut AppState, key: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let path = state.config.config_file.clone();
    KeyFile::store(&path, key)
        .with_context(|| format!("Could not write {}", path.display()))?;

    state.set_api_key(key);

    if state.definer.is_online() {
        writeln!(out, "Saved the Wordnik API key to {}", path.display())?;
    } else {
        writeln!(out, "Cleared the Wordnik API key, using the offline dictionary")?;
    }
    Ok(())
}
