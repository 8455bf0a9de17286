//! Headless entry points behind the `generate` and `show` subcommands.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::card_store;
use crate::config::Config;
use crate::domains::card::{render_text, CardRecord};
use crate::error::{CardForgeError, Result};
use crate::interfaces::providers::TextGenerator;

/// One exchange against a fresh session, saved into the configured output
/// directory. A reply that is not a card carries the reply text in the error.
pub async fn generate(
    config: &Config,
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<(CardRecord, PathBuf)> {
    let mut session = crate::ui::session_for(config);
    let reply = session.exchange(generator, prompt).await?;
    let card = CardRecord::parse(&reply).map_err(|err| {
        error!(reply = %reply, "reply is not a card");
        match err {
            CardForgeError::MalformedReply(detail) => {
                CardForgeError::MalformedReply(format!("{detail}; reply was: {reply}"))
            }
            other => other,
        }
    })?;
    let path = card_store::save_to_dir(&card, Path::new(&config.output_dir()))?;
    info!(card = %card.name, path = %path.display(), "card generated");
    Ok((card, path))
}

pub fn show(path: &Path) -> Result<String> {
    let card = card_store::load_from_path(path)?;
    Ok(render_text(&card))
}
