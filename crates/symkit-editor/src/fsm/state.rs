//! Interface of the tool states.

use crate::clipboard::SymbolClipboardData;
use super::{EditorContext, Features, KeyEvent, MouseEvent, Tool, ToolProperty};
use symkit_core::{Angle, Orientation, Point, PositiveLength};

/// One tool of the symbol editor
///
/// Every handler returns whether the event was consumed. The default
/// implementations consume nothing, so a tool only implements what it
/// reacts to.
#[allow(unused_variables)]
pub trait EditorState {
    fn tool(&self) -> Tool;

    /// Activate the tool; `false` refuses the activation
    fn entry(&mut self, ctx: &mut EditorContext) -> bool {
        true
    }

    /// Deactivate the tool
    ///
    /// Must leave no command group open on the undo stack. `false` keeps
    /// the tool active.
    fn exit(&mut self, ctx: &mut EditorContext) -> bool {
        true
    }

    /// Whether an operation with uncommitted edits is running
    fn is_busy(&self) -> bool {
        false
    }

    fn available_features(&self, ctx: &mut EditorContext) -> Features {
        Features::empty()
    }

    fn process_key_pressed(&mut self, ctx: &mut EditorContext, e: &KeyEvent) -> bool {
        false
    }

    fn process_key_released(&mut self, ctx: &mut EditorContext, e: &KeyEvent) -> bool {
        false
    }

    fn process_mouse_moved(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        false
    }

    fn process_left_button_pressed(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        false
    }

    fn process_left_button_released(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        false
    }

    fn process_left_button_double_clicked(
        &mut self,
        ctx: &mut EditorContext,
        e: &MouseEvent,
    ) -> bool {
        false
    }

    fn process_right_button_released(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        false
    }

    fn process_select_all(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_cut(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_copy(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_paste(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    /// Paste `data` given by the host, at `position` if one is given
    fn process_paste_data(
        &mut self,
        ctx: &mut EditorContext,
        data: &SymbolClipboardData,
        position: Option<Point>,
    ) -> bool {
        false
    }

    fn process_move(&mut self, ctx: &mut EditorContext, delta: Point) -> bool {
        false
    }

    fn process_rotate(&mut self, ctx: &mut EditorContext, rotation: Angle) -> bool {
        false
    }

    fn process_mirror(&mut self, ctx: &mut EditorContext, orientation: Orientation) -> bool {
        false
    }

    fn process_snap_to_grid(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_remove(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_edit_properties(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_abort_command(&mut self, ctx: &mut EditorContext) -> bool {
        false
    }

    fn process_grid_interval_changed(
        &mut self,
        ctx: &mut EditorContext,
        interval: PositiveLength,
    ) -> bool {
        false
    }

    fn process_tool_property(&mut self, ctx: &mut EditorContext, property: &ToolProperty) -> bool {
        false
    }
}
