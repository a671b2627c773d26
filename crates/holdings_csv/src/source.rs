use std::path::PathBuf;

use async_trait::async_trait;
use models::NormalizedRecord;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{FetchError, Result};
use crate::parse_text;

/// Anything that can hand back the raw text of a dataset location.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, location: &str) -> Result<String>;
}

/// Fetches `location` once and runs the parse cascade over the body.
pub async fn fetch_csv<S>(source: &S, location: &str) -> Result<Vec<NormalizedRecord>>
where
    S: TextSource + ?Sized,
{
    let text = source.fetch_text(location).await?;
    let records = parse_text(&text);
    info!(location, records = records.len(), "Loaded CSV");
    Ok(records)
}

/// Lossy UTF-8 decode with the byte-order mark removed.
pub fn decode_document(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Location {
    Remote(Url),
    Local(PathBuf),
}

/// HTTP(S) source. Relative locations are joined onto `base_url`; without a
/// base URL they are read from the local filesystem.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
    base_url: Option<Url>,
}

impl HttpSource {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url
            .map(|raw| Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}"))))
            .transpose()?;
        let http = Client::builder().build()?;
        Ok(Self { http, base_url })
    }

    pub async fn fetch_csv(&self, location: &str) -> Result<Vec<NormalizedRecord>> {
        fetch_csv(self, location).await
    }

    fn resolve(&self, location: &str) -> Result<Location> {
        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Location::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Location::Local)
                    .map_err(|_| FetchError::InvalidUrl(location.to_string())),
                other => Err(FetchError::InvalidUrl(format!(
                    "{location}: unsupported scheme '{other}'"
                ))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base
                    .join(location)
                    .map(Location::Remote)
                    .map_err(|e| FetchError::InvalidUrl(format!("{location}: {e}"))),
                None => Ok(Location::Local(PathBuf::from(location))),
            },
            Err(e) => Err(FetchError::InvalidUrl(format!("{location}: {e}"))),
        }
    }

    async fn get(&self, url: Url) -> Result<String> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(decode_document(&body))
    }
}

#[async_trait]
impl TextSource for HttpSource {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        match self.resolve(location)? {
            Location::Remote(url) => self.get(url).await,
            Location::Local(path) => {
                debug!(path = %path.display(), "Reading local file");
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| FetchError::Io { path, source })?;
                Ok(decode_document(&bytes))
            }
        }
    }
}
