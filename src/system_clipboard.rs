//! System clipboard transport backed by `arboard`.
//!
//! Desktop clipboards only carry text reliably, so non-text payloads are
//! stored with their mime type on the first line and the data below it.

use symkit_core::{Error, Result};
use symkit_editor::clipboard::{ClipboardPayload, ClipboardTransport, TEXT_MIME};

/// Prefix marking a mime header line
const MIME_HEADER: &str = "mime:";

/// Encode a payload as clipboard text
pub fn encode_payload(payload: &ClipboardPayload) -> String {
    if payload.mime_type == TEXT_MIME {
        payload.data.clone()
    } else {
        format!("{MIME_HEADER}{}\n{}", payload.mime_type, payload.data)
    }
}

/// Decode clipboard text; text without a mime header is plain text
pub fn decode_payload(text: &str) -> ClipboardPayload {
    if let Some(rest) = text.strip_prefix(MIME_HEADER) {
        let (mime, data) = rest.split_once('\n').unwrap_or((rest, ""));
        return ClipboardPayload::new(mime.trim(), data);
    }
    ClipboardPayload::text(text)
}

/// The desktop clipboard
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    /// Connect to the system clipboard
    pub fn new() -> anyhow::Result<Self> {
        let clipboard = arboard::Clipboard::new()?;
        Ok(Self { clipboard })
    }
}

impl ClipboardTransport for SystemClipboard {
    fn store(&mut self, payload: ClipboardPayload) -> Result<()> {
        self.clipboard
            .set_text(encode_payload(&payload))
            .map_err(|e| Error::other(format!("Failed to write clipboard: {e}")))
    }

    fn load(&mut self) -> Option<ClipboardPayload> {
        match self.clipboard.get_text() {
            Ok(text) => Some(decode_payload(&text)),
            Err(e) => {
                tracing::debug!(error = %e, "clipboard not readable");
                None
            }
        }
    }
}
