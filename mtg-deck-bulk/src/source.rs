use std::fs;
use std::path::Path;

use mtg_deck_core::BulkCard;
use serde::Deserialize;

use crate::error::FetchError;

/// Metadata endpoint of the Scryfall "Default Cards" bulk file.
pub const DEFAULT_BULK_DATA_ENDPOINT: &str = "https://api.scryfall.com/bulk-data/default-cards";

const USER_AGENT: &str = concat!("mtg-deck-converter/", env!("CARGO_PKG_VERSION"));

/// The part of a bulk-data metadata object needed to find the download.
#[derive(Debug, Deserialize)]
struct BulkDataInfo {
    download_uri: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// Remote source of bulk card data.
#[derive(Debug, Clone)]
pub struct BulkDataSource {
    endpoint: String,
}

impl Default for BulkDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_BULK_DATA_ENDPOINT)
    }
}

impl BulkDataSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Download the full card list.
    ///
    /// The endpoint answers with a metadata object whose `download_uri`
    /// points at the actual JSON array. The whole response is buffered
    /// before parsing.
    pub fn fetch(&self) -> Result<Vec<BulkCard>, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        log::info!("Fetching bulk data information from {}", self.endpoint);
        let info: BulkDataInfo = serde_json::from_slice(&get_bytes(&client, &self.endpoint)?)?;
        log::info!(
            "Downloading bulk card data from {} (size: {}, updated: {})",
            info.download_uri,
            info.size.map_or_else(|| "unknown".to_string(), |s| s.to_string()),
            info.updated_at.as_deref().unwrap_or("unknown")
        );

        let bytes = get_bytes(&client, &info.download_uri)?;
        parse_card_data(&bytes)
    }
}

fn get_bytes(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("HTTP {status} for {url}");
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes()?.to_vec())
}

/// Parse a JSON array of bulk card records.
pub fn parse_card_data(bytes: &[u8]) -> Result<Vec<BulkCard>, FetchError> {
    let cards: Vec<BulkCard> = serde_json::from_slice(bytes)?;
    log::debug!("Parsed {} bulk card records", cards.len());
    Ok(cards)
}

/// Read bulk card records from a local JSON file.
pub fn read_card_data(path: &Path) -> Result<Vec<BulkCard>, FetchError> {
    log::info!("Reading bulk card data from {}", path.display());
    parse_card_data(&fs::read(path)?)
}

/// Card records from `path` if given, otherwise from the default remote
/// source.
pub fn load_card_data(path: Option<&Path>) -> Result<Vec<BulkCard>, FetchError> {
    match path {
        Some(path) => read_card_data(path),
        None => BulkDataSource::default().fetch(),
    }
}
