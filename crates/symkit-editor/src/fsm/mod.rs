//! Tool state machine of the symbol editor.
//!
//! The host feeds input events into [`SymbolEditorFsm`], which forwards them
//! to the active tool. Events a tool leaves unhandled get a fallback: right
//! click and abort leave drawing tools, paste switches to the select tool.
//! After every event the graphics items are synchronized with the document.

mod add_pins;
mod context;
mod draw_circle;
mod draw_polygon;
mod draw_text;
mod events;
mod features;
mod measure;
mod select;
mod state;

pub use add_pins::AddPinsState;
pub use context::{
    ContextMenu, ContextMenuAction, ContextMenuEntry, EditorContext, EditorUi, HeadlessUi,
    PropertiesRequest, ShapeDefaults, TextDefaults, ToolDefaults,
};
pub use draw_circle::DrawCircleState;
pub use draw_polygon::{DrawPolygonState, PolygonMode};
pub use draw_text::{DrawTextState, TextMode};
pub use events::{Key, KeyEvent, Modifiers, MouseEvent, ToolProperty};
pub use features::Features;
pub use measure::{measure_snap_candidates, MeasureState};
pub use select::{path_without_vertices, SelectState};
pub use state::EditorState;

use crate::clipboard::SymbolClipboardData;
use crate::model::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use symkit_core::{Angle, Orientation, Point, PositiveLength, Result, Shared};

/// Editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// No tool active
    None,
    Select,
    AddPins,
    AddNames,
    AddValues,
    DrawLine,
    DrawRect,
    DrawPolygon,
    DrawCircle,
    DrawArc,
    DrawText,
    Measure,
}

impl Tool {
    /// All tools with a state
    pub const ALL: [Tool; 11] = [
        Tool::Select,
        Tool::AddPins,
        Tool::AddNames,
        Tool::AddValues,
        Tool::DrawLine,
        Tool::DrawRect,
        Tool::DrawPolygon,
        Tool::DrawCircle,
        Tool::DrawArc,
        Tool::DrawText,
        Tool::Measure,
    ];

    fn create_state(self) -> Option<Box<dyn EditorState>> {
        let state: Box<dyn EditorState> = match self {
            Tool::None => return None,
            Tool::Select => Box::new(SelectState::new()),
            Tool::AddPins => Box::new(AddPinsState::new()),
            Tool::AddNames => Box::new(DrawTextState::new(TextMode::Name)),
            Tool::AddValues => Box::new(DrawTextState::new(TextMode::Value)),
            Tool::DrawLine => Box::new(DrawPolygonState::new(PolygonMode::Line)),
            Tool::DrawRect => Box::new(DrawPolygonState::new(PolygonMode::Rect)),
            Tool::DrawPolygon => Box::new(DrawPolygonState::new(PolygonMode::Polygon)),
            Tool::DrawCircle => Box::new(DrawCircleState::new()),
            Tool::DrawArc => Box::new(DrawPolygonState::new(PolygonMode::Arc)),
            Tool::DrawText => Box::new(DrawTextState::new(TextMode::Text)),
            Tool::Measure => Box::new(MeasureState::new()),
        };
        Some(state)
    }
}

/// The symbol editor's tool state machine
///
/// Owns the editor context and one state per tool. Exactly one tool is
/// active, or none if activating a tool failed.
pub struct SymbolEditorFsm {
    ctx: EditorContext,
    states: BTreeMap<Tool, Box<dyn EditorState>>,
    current: Tool,
    previous: Tool,
}

impl SymbolEditorFsm {
    /// Create the state machine and activate the select tool
    pub fn new(ctx: EditorContext) -> Self {
        let states = Tool::ALL
            .iter()
            .filter_map(|tool| tool.create_state().map(|state| (*tool, state)))
            .collect();
        let mut fsm = Self {
            ctx,
            states,
            current: Tool::None,
            previous: Tool::None,
        };
        fsm.set_next_state(Tool::Select);
        fsm
    }

    pub fn current_tool(&self) -> Tool {
        self.current
    }

    pub fn previous_tool(&self) -> Tool {
        self.previous
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.ctx
    }

    pub fn symbol(&self) -> &Shared<Symbol> {
        &self.ctx.symbol
    }

    /// Activate `tool`, returns whether it is active afterwards
    pub fn request_tool(&mut self, tool: Tool) -> bool {
        self.set_next_state(tool)
    }

    /// Return to the tool used before the select tool
    pub fn switch_to_previous_state(&mut self) -> bool {
        let target = if self.previous == self.current || self.previous == Tool::None {
            Tool::Select
        } else {
            self.previous
        };
        self.set_next_state(target)
    }

    fn set_next_state(&mut self, tool: Tool) -> bool {
        if tool == self.current {
            return true;
        }
        if !self.leave_state() {
            tracing::debug!(tool = ?self.current, "tool refused to exit");
            return false;
        }
        if self.current != Tool::Select {
            self.previous = self.current;
        }
        self.current = Tool::None;
        if tool != Tool::None && !self.enter_state(tool) {
            tracing::warn!(?tool, "tool refused to start, no tool active");
            self.ctx.update_scene();
            return false;
        }
        self.current = tool;
        self.ctx.update_scene();
        tracing::debug!(?tool, "tool activated");
        true
    }

    fn leave_state(&mut self) -> bool {
        match self.states.get_mut(&self.current) {
            Some(state) => state.exit(&mut self.ctx),
            None => true,
        }
    }

    fn enter_state(&mut self, tool: Tool) -> bool {
        match self.states.get_mut(&tool) {
            Some(state) => state.entry(&mut self.ctx),
            None => false,
        }
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut dyn EditorState, &mut EditorContext) -> bool) -> bool {
        let handled = match self.states.get_mut(&self.current) {
            Some(state) => f(state.as_mut(), &mut self.ctx),
            None => false,
        };
        self.ctx.update_scene();
        handled
    }

    /// Actions currently available to the user
    pub fn available_features(&mut self) -> Features {
        match self.states.get(&self.current) {
            Some(state) => state.available_features(&mut self.ctx),
            None => Features::empty(),
        }
    }

    pub fn process_key_pressed(&mut self, e: &KeyEvent) -> bool {
        self.dispatch(|s, ctx| s.process_key_pressed(ctx, e))
    }

    pub fn process_key_released(&mut self, e: &KeyEvent) -> bool {
        self.dispatch(|s, ctx| s.process_key_released(ctx, e))
    }

    pub fn process_mouse_moved(&mut self, e: &MouseEvent) -> bool {
        self.ctx.set_cursor_pos(e.pos);
        self.dispatch(|s, ctx| s.process_mouse_moved(ctx, e))
    }

    pub fn process_left_button_pressed(&mut self, e: &MouseEvent) -> bool {
        self.ctx.set_cursor_pos(e.pos);
        self.dispatch(|s, ctx| s.process_left_button_pressed(ctx, e))
    }

    pub fn process_left_button_released(&mut self, e: &MouseEvent) -> bool {
        self.ctx.set_cursor_pos(e.pos);
        self.dispatch(|s, ctx| s.process_left_button_released(ctx, e))
    }

    pub fn process_left_button_double_clicked(&mut self, e: &MouseEvent) -> bool {
        self.ctx.set_cursor_pos(e.pos);
        self.dispatch(|s, ctx| s.process_left_button_double_clicked(ctx, e))
    }

    /// Right click: unhandled, it aborts the active drawing tool or returns
    /// from the select tool to the previous tool
    pub fn process_right_button_released(&mut self, e: &MouseEvent) -> bool {
        self.ctx.set_cursor_pos(e.pos);
        if self.dispatch(|s, ctx| s.process_right_button_released(ctx, e)) {
            return true;
        }
        if self.current != Tool::Select {
            self.process_abort_command();
            true
        } else {
            self.switch_to_previous_state()
        }
    }

    pub fn process_select_all(&mut self) -> bool {
        self.dispatch(|s, ctx| s.process_select_all(ctx))
    }

    pub fn process_cut(&mut self) -> bool {
        self.dispatch(|s, ctx| s.process_cut(ctx))
    }

    pub fn process_copy(&mut self) -> bool {
        self.dispatch(|s, ctx| s.process_copy(ctx))
    }

    /// Paste; tools that cannot paste hand over to the select tool
    pub fn process_paste(&mut self) -> bool {
        if self.dispatch(|s, ctx| s.process_paste(ctx)) {
            return true;
        }
        if self.current != Tool::Select && self.set_next_state(Tool::Select) {
            return self.dispatch(|s, ctx| s.process_paste(ctx));
        }
        false
    }

    /// Paste elements handed over by the host, e.g. from an import
    ///
    /// Without a position the elements follow the cursor like a clipboard
    /// paste. With a position they are placed there and committed at once.
    pub fn process_paste_at(
        &mut self,
        data: &SymbolClipboardData,
        position: Option<Point>,
    ) -> bool {
        if self.dispatch(|s, ctx| s.process_paste_data(ctx, data, position)) {
            return true;
        }
        if self.current != Tool::Select && self.set_next_state(Tool::Select) {
            return self.dispatch(|s, ctx| s.process_paste_data(ctx, data, position));
        }
        false
    }

    pub fn process_move(&mut self, delta: Point) -> bool {
        self.dispatch(|s, ctx| s.process_move(ctx, delta))
    }

    pub fn process_rotate(&mut self, rotation: Angle) -> bool {
        self.dispatch(|s, ctx| s.process_rotate(ctx, rotation))
    }

    pub fn process_mirror(&mut self, orientation: Orientation) -> bool {
        self.dispatch(|s, ctx| s.process_mirror(ctx, orientation))
    }

    pub fn process_snap_to_grid(&mut self) -> bool {
        self.dispatch(|s, ctx| s.process_snap_to_grid(ctx))
    }

    pub fn process_remove(&mut self) -> bool {
        self.dispatch(|s, ctx| s.process_remove(ctx))
    }

    pub fn process_edit_properties(&mut self) -> bool {
        self.dispatch(|s, ctx| s.process_edit_properties(ctx))
    }

    /// Abort the running operation; if there is none, go to the select tool
    pub fn process_abort_command(&mut self) -> bool {
        if self.dispatch(|s, ctx| s.process_abort_command(ctx)) {
            return true;
        }
        self.set_next_state(Tool::Select)
    }

    pub fn process_grid_interval_changed(&mut self, interval: PositiveLength) -> bool {
        self.ctx.set_grid_interval(interval);
        self.dispatch(|s, ctx| s.process_grid_interval_changed(ctx, interval))
    }

    pub fn process_tool_property(&mut self, property: &ToolProperty) -> bool {
        self.dispatch(|s, ctx| s.process_tool_property(ctx, property))
    }

    /// Undo the last command, aborting a running operation first
    pub fn undo(&mut self) -> Result<()> {
        self.abort_running_operation();
        let result = self.ctx.undo_stack.undo();
        self.ctx.update_scene();
        result
    }

    /// Redo the last undone command, aborting a running operation first
    pub fn redo(&mut self) -> Result<()> {
        self.abort_running_operation();
        let result = self.ctx.undo_stack.redo();
        self.ctx.update_scene();
        result
    }

    fn abort_running_operation(&mut self) {
        let busy = self
            .states
            .get(&self.current)
            .is_some_and(|state| state.is_busy());
        if busy || self.ctx.undo_stack.is_group_active() {
            self.dispatch(|s, ctx| s.process_abort_command(ctx));
        }
    }
}

impl Drop for SymbolEditorFsm {
    fn drop(&mut self) {
        // Closes any open command group
        self.leave_state();
    }
}

impl std::fmt::Debug for SymbolEditorFsm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolEditorFsm")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("ctx", &self.ctx)
            .finish()
    }
}
