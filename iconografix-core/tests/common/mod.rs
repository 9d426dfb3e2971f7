//! Test helper functions for integration tests
//!
//! Shared across test files using the tests/common/ pattern.

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Write an icon set with a full manifest and one `<svg>` per file
pub fn write_icon_set(root: &Path, dir: &str, provider: &str, files: &[&str]) -> Result<()> {
    let set_dir = root.join(dir);
    fs::create_dir_all(&set_dir)?;

    let manifest = serde_json::json!({
        "provider": provider,
        "displayName": provider,
        "count": files.len(),
        "lastUpdated": "2025-06-01T12:00:00.000Z",
        "files": files,
    });
    fs::write(
        set_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;

    for file in files {
        fs::write(
            set_dir.join(file),
            format!("<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <title>{file}</title>\n</svg>\n"),
        )?;
    }
    Ok(())
}

/// Write an icon set whose manifest is a bare list of file names
#[allow(dead_code)]
pub fn write_bare_icon_set(root: &Path, dir: &str, files: &[&str]) -> Result<()> {
    let set_dir = root.join(dir);
    fs::create_dir_all(&set_dir)?;
    fs::write(set_dir.join("manifest.json"), serde_json::to_string(files)?)?;
    Ok(())
}
