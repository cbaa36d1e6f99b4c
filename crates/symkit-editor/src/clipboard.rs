//! Clipboard data of the symbol editor.
//!
//! Copied elements are detached from the document and serialized as JSON
//! tagged with [`SYMBOL_CLIPBOARD_MIME`]. The actual clipboard is reached
//! through a [`ClipboardTransport`], so the editor core works the same with
//! the system clipboard or an in-memory one.

use crate::commands::SelectedItems;
use crate::model::{Circle, Pin, Polygon, Symbol, Text};
use serde::{Deserialize, Serialize};
use symkit_core::{Point, Result, Shared, ValidationError};
use uuid::Uuid;

/// Mime type of serialized symbol elements
pub const SYMBOL_CLIPBOARD_MIME: &str = "application/x-symkit-clipboard; version=1";

/// Mime type of plain text
pub const TEXT_MIME: &str = "text/plain";

/// Mime-tagged clipboard content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub mime_type: String,
    pub data: String,
}

impl ClipboardPayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Plain text payload
    pub fn text(data: impl Into<String>) -> Self {
        Self::new(TEXT_MIME, data)
    }
}

/// Access to a clipboard
pub trait ClipboardTransport {
    /// Replace the clipboard content
    fn store(&mut self, payload: ClipboardPayload) -> Result<()>;

    /// Current clipboard content, `None` if empty or unreadable
    fn load(&mut self) -> Option<ClipboardPayload>;

    /// Put plain text on the clipboard
    fn store_text(&mut self, text: &str) -> Result<()> {
        self.store(ClipboardPayload::text(text))
    }
}

impl<T: ClipboardTransport> ClipboardTransport for Shared<T> {
    fn store(&mut self, payload: ClipboardPayload) -> Result<()> {
        self.borrow_mut().store(payload)
    }

    fn load(&mut self) -> Option<ClipboardPayload> {
        self.borrow_mut().load()
    }
}

/// Process-local clipboard
#[derive(Debug, Clone, Default)]
pub struct InMemoryClipboard {
    content: Option<ClipboardPayload>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<&ClipboardPayload> {
        self.content.as_ref()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}

impl ClipboardTransport for InMemoryClipboard {
    fn store(&mut self, payload: ClipboardPayload) -> Result<()> {
        self.content = Some(payload);
        Ok(())
    }

    fn load(&mut self) -> Option<ClipboardPayload> {
        self.content.clone()
    }
}

/// Detached copies of symbol elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolClipboardData {
    /// Symbol the elements were copied from
    pub symbol_uuid: Uuid,
    /// Cursor position at copy time, used as paste anchor
    pub cursor_pos: Point,
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub circles: Vec<Circle>,
    #[serde(default)]
    pub polygons: Vec<Polygon>,
    #[serde(default)]
    pub texts: Vec<Text>,
}

impl SymbolClipboardData {
    pub fn new(symbol_uuid: Uuid, cursor_pos: Point) -> Self {
        Self {
            symbol_uuid,
            cursor_pos,
            pins: Vec::new(),
            circles: Vec::new(),
            polygons: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Copy the `selection` of `symbol`, anchored at `cursor_pos`
    ///
    /// Elements missing from the symbol are skipped.
    pub fn from_selection(symbol: &Symbol, selection: &SelectedItems, cursor_pos: Point) -> Self {
        let mut data = Self::new(symbol.uuid(), cursor_pos);
        data.pins = selection
            .pins
            .iter()
            .filter_map(|uuid| symbol.pins().get(uuid).cloned())
            .collect();
        data.circles = selection
            .circles
            .iter()
            .filter_map(|uuid| symbol.circles().get(uuid).cloned())
            .collect();
        data.polygons = selection
            .polygons
            .iter()
            .filter_map(|uuid| symbol.polygons().get(uuid).cloned())
            .collect();
        data.texts = selection
            .texts
            .iter()
            .filter_map(|uuid| symbol.texts().get(uuid).cloned())
            .collect();
        data
    }

    pub fn len(&self) -> usize {
        self.pins.len() + self.circles.len() + self.polygons.len() + self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize into a clipboard payload
    pub fn to_payload(&self) -> Result<ClipboardPayload> {
        Ok(ClipboardPayload::new(
            SYMBOL_CLIPBOARD_MIME,
            serde_json::to_string(self)?,
        ))
    }

    /// Decode a clipboard payload
    ///
    /// Returns `Ok(None)` if the payload holds something else than symbol
    /// elements and an error if it claims to but cannot be decoded.
    pub fn from_payload(payload: &ClipboardPayload) -> Result<Option<Self>> {
        if payload.mime_type != SYMBOL_CLIPBOARD_MIME {
            return Ok(None);
        }
        serde_json::from_str(&payload.data)
            .map(Some)
            .map_err(|e| ValidationError::InvalidClipboardData(e.to_string()).into())
    }
}
