pub mod config;
pub mod simulate;
pub mod view;

use std::path::Path;

use anyhow::{Context, Result};
use pagesnap_core::Deck;
use url::Url;

/// Read and parse a deck file
pub async fn load_deck(path: &Path) -> Result<Deck> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read deck {}", path.display()))?;
    Ok(Deck::parse(&text)?)
}

/// Location a deck is shown at, e.g. `pagesnap://deck/talk.txt#intro`
pub fn deck_location(path: &Path, fragment: Option<&str>) -> Result<Url> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    let mut url = Url::parse("pagesnap://deck/")?.join(&name)?;
    if let Some(fragment) = fragment {
        url.set_fragment(Some(fragment.trim_start_matches('#')));
    }
    Ok(url)
}
