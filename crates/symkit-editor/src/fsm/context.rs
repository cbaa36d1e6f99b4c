//! Everything the tool states operate on.

use crate::clipboard::{ClipboardTransport, SymbolClipboardData};
use crate::graphics::SymbolGraphicsItem;
use crate::model::{Circle, Pin, Polygon, Symbol, Text};
use crate::undo::UndoStack;
use serde::{Deserialize, Serialize};
use symkit_core::{
    Alignment, Angle, Error, HAlign, Layer, Length, LengthUnit, Point, PositiveLength, Result,
    Shared, UnsignedLength, VAlign,
};
use symkit_settings::{Config, EditorSettings, ToolSettings};

/// Entries of the select tool's context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMenuAction {
    Properties,
    RemoveVertex,
    AddVertex,
    Cut,
    Copy,
    Remove,
    RotateCcw,
    RotateCw,
    MirrorHorizontal,
    MirrorVertical,
    SnapToGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenuEntry {
    pub action: ContextMenuAction,
    pub enabled: bool,
}

/// A context menu to be shown by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenu {
    pub entries: Vec<ContextMenuEntry>,
}

impl ContextMenu {
    pub fn add(&mut self, action: ContextMenuAction, enabled: bool) {
        self.entries.push(ContextMenuEntry { action, enabled });
    }

    pub fn contains(&self, action: ContextMenuAction) -> bool {
        self.entries.iter().any(|e| e.action == action)
    }

    pub fn is_enabled(&self, action: ContextMenuAction) -> bool {
        self.entries.iter().any(|e| e.action == action && e.enabled)
    }
}

/// Element shown in a properties dialog
///
/// The host returns the edited copy; the UUID must be kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertiesRequest {
    Pin(Pin),
    Circle(Circle),
    Polygon(Polygon),
    Text(Text),
}

/// Dialogs, menus and message sinks of the host application
pub trait EditorUi {
    /// Show `menu` and return the chosen enabled entry
    fn exec_context_menu(&mut self, menu: &ContextMenu) -> Option<ContextMenuAction>;

    /// Show a properties dialog, `None` if cancelled
    fn edit_properties(
        &mut self,
        request: &PropertiesRequest,
        read_only: bool,
    ) -> Option<PropertiesRequest>;

    fn show_error(&mut self, message: &str);

    fn set_status_message(&mut self, message: &str);

    /// Overlay text next to the cursor (coordinates, lengths)
    fn set_info_text(&mut self, _text: &str) {}
}

impl<T: EditorUi> EditorUi for Shared<T> {
    fn exec_context_menu(&mut self, menu: &ContextMenu) -> Option<ContextMenuAction> {
        self.borrow_mut().exec_context_menu(menu)
    }

    fn edit_properties(
        &mut self,
        request: &PropertiesRequest,
        read_only: bool,
    ) -> Option<PropertiesRequest> {
        self.borrow_mut().edit_properties(request, read_only)
    }

    fn show_error(&mut self, message: &str) {
        self.borrow_mut().show_error(message)
    }

    fn set_status_message(&mut self, message: &str) {
        self.borrow_mut().set_status_message(message)
    }

    fn set_info_text(&mut self, text: &str) {
        self.borrow_mut().set_info_text(text)
    }
}

/// UI without any dialogs
///
/// Records messages and answers menus and dialogs with preset responses.
/// Used by the session replay and in tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    pub errors: Vec<String>,
    pub status_message: String,
    pub info_text: String,
    pub last_context_menu: Option<ContextMenu>,
    pub context_menu_response: Option<ContextMenuAction>,
    pub properties_response: Option<PropertiesRequest>,
    pub properties_requests: Vec<PropertiesRequest>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorUi for HeadlessUi {
    fn exec_context_menu(&mut self, menu: &ContextMenu) -> Option<ContextMenuAction> {
        self.last_context_menu = Some(menu.clone());
        self.context_menu_response
            .take()
            .filter(|action| menu.is_enabled(*action))
    }

    fn edit_properties(
        &mut self,
        request: &PropertiesRequest,
        _read_only: bool,
    ) -> Option<PropertiesRequest> {
        self.properties_requests.push(request.clone());
        self.properties_response.take()
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn set_status_message(&mut self, message: &str) {
        self.status_message = message.to_string();
    }

    fn set_info_text(&mut self, text: &str) {
        self.info_text = text.to_string();
    }
}

/// Line and fill settings of a drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefaults {
    pub layer: Layer,
    pub line_width: UnsignedLength,
    pub filled: bool,
    pub grab_area: bool,
}

/// Text settings of the text tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDefaults {
    pub layer: Layer,
    pub text: String,
    pub height: PositiveLength,
    pub rotation: Angle,
    pub align: Alignment,
}

/// Last used values of the drawing tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefaults {
    /// Open lines and arcs
    pub line: ShapeDefaults,
    /// Rectangles and polygons
    pub area: ShapeDefaults,
    pub circle: ShapeDefaults,
    /// Arc angle of new polygon segments
    pub segment_angle: Angle,
    pub text: TextDefaults,
    pub pin_length: UnsignedLength,
    pub pin_rotation: Angle,
}

impl ToolDefaults {
    pub fn from_settings(tools: &ToolSettings) -> Self {
        let area = ShapeDefaults {
            layer: tools.polygon_layer,
            line_width: tools.polygon_line_width,
            filled: tools.polygon_filled,
            grab_area: tools.polygon_grab_area,
        };
        Self {
            line: ShapeDefaults {
                filled: false,
                grab_area: false,
                ..area
            },
            area,
            circle: ShapeDefaults {
                layer: tools.circle_layer,
                line_width: tools.circle_line_width,
                filled: tools.circle_filled,
                grab_area: tools.circle_grab_area,
            },
            segment_angle: Angle::DEG_0,
            text: TextDefaults {
                layer: tools.text_layer,
                text: "Text".to_string(),
                height: tools.text_height,
                rotation: Angle::DEG_0,
                align: Alignment::new(HAlign::Left, VAlign::Bottom),
            },
            pin_length: tools.pin_length,
            pin_rotation: Angle::DEG_0,
        }
    }
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self::from_settings(&ToolSettings::default())
    }
}

/// State shared by all tools of one symbol editor
pub struct EditorContext {
    pub symbol: Shared<Symbol>,
    pub undo_stack: UndoStack,
    pub scene: SymbolGraphicsItem,
    pub settings: EditorSettings,
    pub tool_defaults: ToolDefaults,
    pub clipboard: Box<dyn ClipboardTransport>,
    pub ui: Box<dyn EditorUi>,
    pub read_only: bool,
    grid_interval: PositiveLength,
    cursor_pos: Point,
}

impl EditorContext {
    pub fn new(
        symbol: Shared<Symbol>,
        config: &Config,
        clipboard: Box<dyn ClipboardTransport>,
        ui: Box<dyn EditorUi>,
    ) -> Self {
        let scene = SymbolGraphicsItem::new(&symbol.borrow());
        // Events recorded before the scene existed are already reflected
        let _ = symbol.borrow_mut().take_events();
        Self {
            symbol,
            undo_stack: UndoStack::with_limit(config.editor.undo_limit),
            scene,
            settings: config.editor.clone(),
            tool_defaults: ToolDefaults::from_settings(&config.tools),
            clipboard,
            ui,
            read_only: config.editor.read_only,
            grid_interval: config.editor.grid_interval,
            cursor_pos: Point::ORIGIN,
        }
    }

    pub fn grid_interval(&self) -> PositiveLength {
        self.grid_interval
    }

    pub(crate) fn set_grid_interval(&mut self, interval: PositiveLength) {
        self.grid_interval = interval;
    }

    /// Last known cursor position
    pub fn cursor_pos(&self) -> Point {
        self.cursor_pos
    }

    pub fn set_cursor_pos(&mut self, pos: Point) {
        self.cursor_pos = pos;
    }

    pub fn length_unit(&self) -> LengthUnit {
        self.settings.length_unit
    }

    /// Hit test tolerances for small (pins, texts) and large items
    pub fn hit_tolerances(&self) -> (Length, Length) {
        (
            self.settings.select_tolerance.get(),
            self.settings.near_tolerance.get(),
        )
    }

    /// Apply pending document changes to the graphics items
    pub fn update_scene(&mut self) {
        let mut symbol = self.symbol.borrow_mut();
        self.scene.update(&mut symbol);
    }

    /// Report a failed operation to the user
    pub fn report_error(&mut self, err: &Error) {
        tracing::warn!(error = %err, "editor operation failed");
        self.ui.show_error(&err.to_string());
    }

    /// Symbol elements on the clipboard, if any
    pub fn clipboard_data(&mut self) -> Result<Option<SymbolClipboardData>> {
        match self.clipboard.load() {
            Some(payload) => SymbolClipboardData::from_payload(&payload),
            None => Ok(None),
        }
    }

    /// Whether the clipboard holds pasteable symbol elements
    pub fn has_clipboard_data(&mut self) -> bool {
        matches!(self.clipboard_data(), Ok(Some(data)) if !data.is_empty())
    }
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("undo_stack", &self.undo_stack)
            .field("read_only", &self.read_only)
            .field("grid_interval", &self.grid_interval)
            .field("cursor_pos", &self.cursor_pos)
            .finish_non_exhaustive()
    }
}
