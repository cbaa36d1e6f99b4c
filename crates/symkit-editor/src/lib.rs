//! # symkit Editor
//!
//! The interactive editing core of the symbol editor: a document model with
//! observable element lists, undoable commands, a graphics-item mirror of
//! the document and the tool state machine driving it all.
//!
//! ## Architecture
//!
//! ```text
//! SymbolEditorFsm (routes input events to the active tool)
//!   ├── Tool states (select, draw, add pins, texts, measure)
//!   └── EditorContext
//!         ├── Symbol (Rc<RefCell<_>>, element lists emit change events)
//!         ├── UndoStack (commands, command groups)
//!         ├── SymbolGraphicsItem (synced from the change events)
//!         └── Clipboard / EditorUi (host integration)
//! ```
//!
//! Commands mutate the document only through the [`model::HasElementList`]
//! seam. Every mutation emits events which [`graphics::SymbolGraphicsItem`]
//! consumes after each processed input event.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use symkit_editor::fsm::{EditorContext, HeadlessUi, MouseEvent, SymbolEditorFsm, Tool};
//!
//! let ctx = EditorContext::new(symbol, &config, Box::new(clipboard), Box::new(HeadlessUi::new()));
//! let mut fsm = SymbolEditorFsm::new(ctx);
//! fsm.request_tool(Tool::DrawCircle);
//! fsm.process_left_button_pressed(&MouseEvent::new(center));
//! fsm.process_left_button_released(&MouseEvent::new(edge));
//! ```

pub mod clipboard;
pub mod commands;
pub mod element_list;
pub mod fsm;
pub mod graphics;
pub mod model;
pub mod naming;
pub mod undo;

pub use clipboard::{
    ClipboardPayload, ClipboardTransport, InMemoryClipboard, SymbolClipboardData,
};
pub use commands::SelectedItems;
pub use element_list::{ElementList, ListEvent};
pub use fsm::{EditorContext, SymbolEditorFsm, Tool};
pub use graphics::SymbolGraphicsItem;
pub use model::{Circle, Entity, HasElementList, Pin, Polygon, Symbol, Text};
pub use undo::{UndoCommand, UndoStack};
