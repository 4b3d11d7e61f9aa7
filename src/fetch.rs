use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::urls;

/// Wikimedia throttles default library user agents; identify as a browser,
/// like the original deployment did.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

const PAGE_TIMEOUT: Duration = Duration::from_secs(30);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(PAGE_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch a page and return its raw HTML.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;
    Ok(html)
}

/// Download one image into `dest_dir`, deriving the filename from the URL's
/// last path segment. A file already on disk short-circuits the request, which
/// is what makes re-runs idempotent.
pub async fn download_image(client: &Client, url: &str, dest_dir: &Path) -> Result<PathBuf> {
    let filename = urls::sanitize_filename(urls::filename_from_url(url));
    let dest = dest_dir.join(filename);
    if dest.exists() {
        debug!("Already on disk: {}", dest.display());
        return Ok(dest);
    }

    let bytes = client
        .get(url)
        .timeout(IMAGE_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await
        .with_context(|| format!("Failed to download {}", url))?;
    std::fs::write(&dest, &bytes)
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(dest)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn existing_file_short_circuits_the_download() {
        let dir = std::env::temp_dir().join(format!("panneaux_fetch_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Stop.png"), b"cached").unwrap();

        // The URL is unreachable on purpose; the on-disk file must win before
        // any request is made.
        let client = client().unwrap();
        let dest = download_image(&client, "http://127.0.0.1:1/a/b/Stop.png", &dir)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"cached");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
