//! Replay of recorded editor sessions.
//!
//! A session script is a JSON document holding an optional start symbol and
//! a list of input events. Replaying it drives [`SymbolEditorFsm`] with a
//! [`HeadlessUi`] exactly like an interactive host would.
//!
//! ```json
//! {
//!   "events": [
//!     { "event": "tool", "tool": "draw_circle" },
//!     { "event": "press", "pos": { "x": 0, "y": 0 } },
//!     { "event": "move", "pos": { "x": 10000000, "y": 0 } },
//!     { "event": "release", "pos": { "x": 10000000, "y": 0 } }
//!   ]
//! }
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use symkit_core::{shared, Angle, Orientation, Point, PositiveLength, Shared};
use symkit_editor::clipboard::{ClipboardTransport, InMemoryClipboard};
use symkit_editor::fsm::{
    ContextMenuAction, EditorContext, HeadlessUi, KeyEvent, Modifiers, MouseEvent,
    PropertiesRequest, SymbolEditorFsm, Tool, ToolProperty,
};
use symkit_editor::Symbol;
use symkit_settings::Config;

/// One recorded input event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Tool {
        tool: Tool,
    },
    Move {
        pos: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Press {
        pos: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Release {
        pos: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Move, press and release at one position
    Click {
        pos: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DoubleClick {
        pos: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    RightClick {
        pos: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyPress {
        key: KeyEvent,
    },
    KeyRelease {
        key: KeyEvent,
    },
    SelectAll,
    Cut,
    Copy,
    Paste,
    Translate {
        delta: Point,
    },
    Rotate {
        angle: Angle,
    },
    Mirror {
        orientation: Orientation,
    },
    SnapToGrid,
    Remove,
    EditProperties,
    Abort,
    Grid {
        interval: PositiveLength,
    },
    Property {
        property: ToolProperty,
    },
    Undo,
    Redo,
    /// Entry picked in the next context menu
    MenuChoice {
        action: ContextMenuAction,
    },
    /// Result of the next properties dialog
    DialogResult {
        element: PropertiesRequest,
    },
}

/// A recorded session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    /// Symbol the session starts from, empty if missing
    #[serde(default)]
    pub symbol: Option<Symbol>,
    pub events: Vec<SessionEvent>,
}

impl SessionScript {
    pub fn load(path: &FsPath) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session script {}", path.display()))?;
        let script: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid session script {}", path.display()))?;
        if let Some(symbol) = &script.symbol {
            symbol
                .validate()
                .with_context(|| format!("Invalid start symbol in {}", path.display()))?;
        }
        Ok(script)
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub symbol: Symbol,
    pub tool: Tool,
    pub undo_steps: usize,
    /// Events some tool reacted to
    pub handled: usize,
    /// Events nothing reacted to
    pub ignored: usize,
    pub errors: Vec<String>,
    pub status_message: String,
}

/// An editor driven by recorded events
pub struct Session {
    fsm: SymbolEditorFsm,
    ui: Shared<HeadlessUi>,
    handled: usize,
    ignored: usize,
}

impl Session {
    pub fn new(symbol: Symbol, config: &Config, clipboard: Box<dyn ClipboardTransport>) -> Self {
        let ui = shared(HeadlessUi::new());
        let ctx = EditorContext::new(shared(symbol), config, clipboard, Box::new(ui.clone()));
        Self {
            fsm: SymbolEditorFsm::new(ctx),
            ui,
            handled: 0,
            ignored: 0,
        }
    }

    /// Session with a process-local clipboard
    pub fn headless(symbol: Symbol, config: &Config) -> Self {
        Self::new(symbol, config, Box::new(InMemoryClipboard::new()))
    }

    pub fn fsm(&self) -> &SymbolEditorFsm {
        &self.fsm
    }

    /// Feed one event, returns whether anything reacted to it
    pub fn apply(&mut self, event: &SessionEvent) -> anyhow::Result<bool> {
        let fsm = &mut self.fsm;
        let mouse = |pos: &Point, modifiers: &Modifiers| MouseEvent::new(*pos).with_modifiers(*modifiers);
        let handled = match event {
            SessionEvent::Tool { tool } => fsm.request_tool(*tool),
            SessionEvent::Move { pos, modifiers } => fsm.process_mouse_moved(&mouse(pos, modifiers)),
            SessionEvent::Press { pos, modifiers } => {
                fsm.process_left_button_pressed(&mouse(pos, modifiers))
            }
            SessionEvent::Release { pos, modifiers } => {
                fsm.process_left_button_released(&mouse(pos, modifiers))
            }
            SessionEvent::Click { pos, modifiers } => {
                let e = mouse(pos, modifiers);
                let moved = fsm.process_mouse_moved(&e);
                let pressed = fsm.process_left_button_pressed(&e);
                let released = fsm.process_left_button_released(&e);
                moved || pressed || released
            }
            SessionEvent::DoubleClick { pos, modifiers } => {
                fsm.process_left_button_double_clicked(&mouse(pos, modifiers))
            }
            SessionEvent::RightClick { pos, modifiers } => {
                fsm.process_right_button_released(&mouse(pos, modifiers))
            }
            SessionEvent::KeyPress { key } => fsm.process_key_pressed(key),
            SessionEvent::KeyRelease { key } => fsm.process_key_released(key),
            SessionEvent::SelectAll => fsm.process_select_all(),
            SessionEvent::Cut => fsm.process_cut(),
            SessionEvent::Copy => fsm.process_copy(),
            SessionEvent::Paste => fsm.process_paste(),
            SessionEvent::Translate { delta } => fsm.process_move(*delta),
            SessionEvent::Rotate { angle } => fsm.process_rotate(*angle),
            SessionEvent::Mirror { orientation } => fsm.process_mirror(*orientation),
            SessionEvent::SnapToGrid => fsm.process_snap_to_grid(),
            SessionEvent::Remove => fsm.process_remove(),
            SessionEvent::EditProperties => fsm.process_edit_properties(),
            SessionEvent::Abort => fsm.process_abort_command(),
            SessionEvent::Grid { interval } => fsm.process_grid_interval_changed(*interval),
            SessionEvent::Property { property } => fsm.process_tool_property(property),
            SessionEvent::Undo => {
                fsm.undo().context("Undo failed")?;
                true
            }
            SessionEvent::Redo => {
                fsm.redo().context("Redo failed")?;
                true
            }
            SessionEvent::MenuChoice { action } => {
                self.ui.borrow_mut().context_menu_response = Some(*action);
                true
            }
            SessionEvent::DialogResult { element } => {
                self.ui.borrow_mut().properties_response = Some(element.clone());
                true
            }
        };

        tracing::debug!(?event, handled, tool = ?self.fsm.current_tool(), "replayed event");
        if handled {
            self.handled += 1;
        } else {
            self.ignored += 1;
        }
        Ok(handled)
    }

    /// Replay all `events` in order
    pub fn run(&mut self, events: &[SessionEvent]) -> anyhow::Result<()> {
        for (index, event) in events.iter().enumerate() {
            self.apply(event)
                .with_context(|| format!("Event #{index} ({event:?}) failed"))?;
        }
        Ok(())
    }

    pub fn report(&self) -> SessionReport {
        let ui = self.ui.borrow();
        SessionReport {
            symbol: self.fsm.symbol().borrow().clone(),
            tool: self.fsm.current_tool(),
            undo_steps: self.fsm.context().undo_stack.len(),
            handled: self.handled,
            ignored: self.ignored,
            errors: ui.errors.clone(),
            status_message: ui.status_message.clone(),
        }
    }
}
