//! Host transports - how an envelope actually leaves the process
//!
//! Delivery is fire-and-forget: a transport reports whether it managed to
//! hand the message off, never whether the host accepted it.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

use super::HostMessage;

/// Trait for the boundary between this process and the embedding host
pub trait HostTransport: Send + Sync {
    /// Dispatch `message` to the host, restricted to `target_origin`
    fn post_message(&self, message: &HostMessage, target_origin: &str) -> Result<()>;

    /// Transport identifier for logging/debugging
    fn name(&self) -> &'static str;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostedFrame<'a> {
    target_origin: &'a str,
    message: &'a HostMessage,
}

/// Writes one JSON line `{"targetOrigin": ..., "message": ...}` per message
///
/// Used when the host reads the process's stdout or a pipe.
pub struct JsonLinesTransport<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| anyhow!("Host transport writer lock poisoned"))
    }
}

impl<W: Write + Send> HostTransport for JsonLinesTransport<W> {
    fn post_message(&self, message: &HostMessage, target_origin: &str) -> Result<()> {
        let frame = PostedFrame {
            target_origin,
            message,
        };
        let line = serde_json::to_string(&frame).context("Failed to serialize host message")?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("Host transport writer lock poisoned"))?;
        writeln!(writer, "{line}").context("Failed to write host message")?;
        writer.flush().context("Failed to flush host message")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-lines"
    }
}

/// Keeps every posted message in memory
#[derive(Debug, Default)]
pub struct MemoryTransport {
    posted: Mutex<Vec<(String, HostMessage)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(target_origin, message)` pairs in posting order
    pub fn posted(&self) -> Vec<(String, HostMessage)> {
        self.posted
            .lock()
            .map(|posted| posted.clone())
            .unwrap_or_default()
    }
}

impl HostTransport for MemoryTransport {
    fn post_message(&self, message: &HostMessage, target_origin: &str) -> Result<()> {
        self.posted
            .lock()
            .map_err(|_| anyhow!("Memory transport lock poisoned"))?
            .push((target_origin.to_string(), message.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
