//! Asset sources - where manifests and icon markup are read from
//!
//! Providers never touch the filesystem or network directly; they ask an
//! [`AssetSource`] for a text resource by its path relative to the asset root
//! (`{base_path}/{file_name}`). This allows swapping between:
//! - A local asset tree (filesystem)
//! - A static file server (HTTP, `http` feature)
//! - In-memory fixtures (testing)

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Trait for readable text resources under an asset root
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the text resource at `path` (relative, `/`-separated)
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Source identifier for logging/debugging
    fn name(&self) -> &'static str;
}

/// Join a provider base path and a file name into a source path
pub fn join_path(base_path: &str, file_name: &str) -> String {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        file_name.to_string()
    } else {
        format!("{base}/{file_name}")
    }
}

/// Asset tree on the local filesystem
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path under the root, refusing to escape it
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => bail!("Asset path escapes the asset root: {path}"),
            }
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for FsSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path)?;
        tokio::fs::read_to_string(&full_path)
            .await
            .with_context(|| format!("Failed to read asset: {}", full_path.display()))
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

/// Asset tree served over HTTP
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("Asset base URL must start with http:// or https://");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("iconografix/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl AssetSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            bail!("Failed to fetch asset: HTTP {} from {}", response.status(), url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// In-memory source for testing, counts every fetch per path
#[cfg(test)]
#[derive(Default)]
pub struct MockSource {
    files: std::collections::HashMap<String, String>,
    fetches: std::sync::Mutex<std::collections::HashMap<String, usize>>,
}

#[cfg(test)]
impl MockSource {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[async_trait]
impl AssetSource for MockSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;
        // Yield so concurrent callers actually interleave
        tokio::task::yield_now().await;
        self.files
            .get(path)
            .cloned()
            .with_context(|| format!("No such asset: {path}"))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("feather", "bell.svg"), "feather/bell.svg");
        assert_eq!(join_path("feather/", "bell.svg"), "feather/bell.svg");
        assert_eq!(join_path("", "bell.svg"), "bell.svg");
    }

    #[tokio::test]
    async fn test_fs_source_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("feather")).unwrap();
        std::fs::write(temp_dir.path().join("feather/bell.svg"), "<svg/>").unwrap();

        let source = FsSource::new(temp_dir.path());
        let content = source.fetch_text("feather/bell.svg").await.unwrap();
        assert_eq!(content, "<svg/>");
    }

    #[tokio::test]
    async fn test_fs_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = FsSource::new(temp_dir.path());
        assert!(source.fetch_text("feather/missing.svg").await.is_err());
    }

    #[tokio::test]
    async fn test_fs_source_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let source = FsSource::new(temp_dir.path().join("icons"));

        let err = source.fetch_text("../secret.txt").await.unwrap_err();
        assert!(err.to_string().contains("escapes"));
        assert!(source.fetch_text("/etc/passwd").await.is_err());
    }
}
