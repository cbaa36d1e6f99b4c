//! Placing pins with automatically numbered names.

use super::{EditorContext, EditorState, Features, MouseEvent, Tool, ToolProperty};
use crate::commands::{CmdListElementInsert, CmdPinEdit};
use crate::graphics::{ItemKind, ItemRef};
use crate::model::{Entity, Pin, Symbol};
use crate::naming::increment_number_in_string;
use symkit_core::{Angle, Point, Result, ValidationError};
use uuid::Uuid;

/// State of the pin tool
///
/// A pin follows the cursor; each click places it and attaches the next
/// one, named by incrementing the number in the previous name.
#[derive(Default)]
pub struct AddPinsState {
    edit_cmd: Option<CmdPinEdit>,
    current: Option<Uuid>,
    last_name: Option<String>,
}

impl AddPinsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.edit_cmd.is_some()
    }

    /// Name of the pin following the cursor
    pub fn current_name(&self) -> Option<&str> {
        self.edit_cmd.as_ref().map(|cmd| cmd.new_value().name())
    }

    fn next_free_name(&self, ctx: &EditorContext) -> Result<String> {
        let symbol = ctx.symbol.borrow();
        let mut name = match &self.last_name {
            Some(last) => increment_number_in_string(last),
            None => "1".to_string(),
        };
        for _ in 0..ctx.settings.paste_name_retry_limit {
            if !symbol.is_pin_name_used(&name, None) {
                return Ok(name);
            }
            name = increment_number_in_string(&name);
        }
        Err(ValidationError::NameInUse { name }.into())
    }

    fn start(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        let name = self.next_free_name(ctx)?;
        ctx.undo_stack.begin_group("Add symbol pin")?;
        let pin = Pin::new(
            Uuid::new_v4(),
            name,
            pos,
            ctx.tool_defaults.pin_rotation,
            ctx.tool_defaults.pin_length,
        );
        let uuid = pin.uuid();
        ctx.undo_stack
            .append_to_group(Box::new(CmdListElementInsert::<Symbol, Pin>::new(
                ctx.symbol.clone(),
                pin,
                None,
            )))?;
        self.edit_cmd = Some(CmdPinEdit::new(ctx.symbol.clone(), uuid)?);
        self.current = Some(uuid);
        ctx.update_scene();
        ctx.scene.set_selected(&ItemRef::new(ItemKind::Pin, uuid), true);
        Ok(())
    }

    fn start_or_report(&mut self, ctx: &mut EditorContext, pos: Point) -> bool {
        match self.start(ctx, pos) {
            Ok(()) => true,
            Err(e) => {
                ctx.report_error(&e);
                if let Err(e) = self.abort(ctx) {
                    tracing::error!(error = %e, "failed to abort operation");
                }
                false
            }
        }
    }

    fn finish(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        let Some(mut cmd) = self.edit_cmd.take() else {
            return Ok(());
        };
        cmd.set_position(pos, true);
        let name = cmd.new_value().name().to_string();
        self.deselect_current(ctx);
        ctx.undo_stack.append_to_group(Box::new(cmd))?;
        ctx.undo_stack.commit_group()?;
        tracing::debug!(%name, "placed pin");
        self.last_name = Some(name);
        Ok(())
    }

    fn deselect_current(&mut self, ctx: &mut EditorContext) {
        if let Some(uuid) = self.current.take() {
            ctx.scene.set_selected(&ItemRef::new(ItemKind::Pin, uuid), false);
        }
    }

    fn abort(&mut self, ctx: &mut EditorContext) -> Result<()> {
        self.deselect_current(ctx);
        self.edit_cmd = None;
        if ctx.undo_stack.is_group_active() {
            ctx.undo_stack.abort_group()?;
        }
        Ok(())
    }
}

impl EditorState for AddPinsState {
    fn tool(&self) -> Tool {
        Tool::AddPins
    }

    fn entry(&mut self, ctx: &mut EditorContext) -> bool {
        ctx.scene.clear_selection();
        let pos = ctx.cursor_pos().mapped_to_grid(ctx.grid_interval());
        self.start_or_report(ctx, pos)
    }

    fn is_busy(&self) -> bool {
        self.is_active()
    }

    fn exit(&mut self, ctx: &mut EditorContext) -> bool {
        if let Err(e) = self.abort(ctx) {
            ctx.report_error(&e);
            return false;
        }
        true
    }

    fn available_features(&self, _ctx: &mut EditorContext) -> Features {
        Features::ABORT | Features::ROTATE
    }

    fn process_mouse_moved(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return false;
        };
        cmd.set_position(e.pos.mapped_to_grid(ctx.grid_interval()), true);
        true
    }

    fn process_left_button_pressed(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        let pos = e.pos.mapped_to_grid(ctx.grid_interval());
        if let Err(err) = self.finish(ctx, pos) {
            ctx.report_error(&err);
            if let Err(e) = self.abort(ctx) {
                tracing::error!(error = %e, "failed to abort operation");
            }
        }
        self.start_or_report(ctx, pos)
    }

    fn process_right_button_released(&mut self, ctx: &mut EditorContext, _e: &MouseEvent) -> bool {
        self.process_rotate(ctx, Angle::DEG_90)
    }

    fn process_rotate(&mut self, ctx: &mut EditorContext, rotation: Angle) -> bool {
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return false;
        };
        let center = cmd.new_value().position();
        cmd.rotate(rotation, center, true);
        ctx.tool_defaults.pin_rotation = cmd.new_value().rotation();
        true
    }

    fn process_tool_property(&mut self, ctx: &mut EditorContext, property: &ToolProperty) -> bool {
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return false;
        };
        match property {
            ToolProperty::PinName(name) => {
                // Validated when the pin is placed
                cmd.set_name(name.trim(), true);
            }
            ToolProperty::PinLength(length) => {
                cmd.set_length(*length, true);
                cmd.set_name_position(Pin::default_name_position(*length), true);
                ctx.tool_defaults.pin_length = *length;
            }
            _ => return false,
        }
        true
    }
}
