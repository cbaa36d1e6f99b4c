//! Undo commands operating on symbols.
//!
//! Generic commands ([`CmdEntityEdit`], [`CmdListElementInsert`],
//! [`CmdListElementRemove`], [`CmdListElementSwap`]) work on any document
//! implementing [`HasElementList`](crate::model::HasElementList). The
//! selection commands compose them for the symbol editor tools.

mod drag_selected;
mod edit;
mod list;
mod paste;
mod remove_selected;

pub use drag_selected::CmdDragSelectedSymbolItems;
pub use edit::{CmdCircleEdit, CmdEntityEdit, CmdPinEdit, CmdPolygonEdit, CmdTextEdit};
pub use list::{CmdListElementInsert, CmdListElementRemove, CmdListElementSwap};
pub use paste::CmdPasteSymbolItems;
pub use remove_selected::CmdRemoveSelectedSymbolItems;

use uuid::Uuid;

/// UUIDs of selected symbol elements, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedItems {
    pub pins: Vec<Uuid>,
    pub circles: Vec<Uuid>,
    pub polygons: Vec<Uuid>,
    pub texts: Vec<Uuid>,
}

impl SelectedItems {
    /// Total number of selected elements
    pub fn len(&self) -> usize {
        self.pins.len() + self.circles.len() + self.polygons.len() + self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
