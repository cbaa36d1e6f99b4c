//! Drawing circles by center and radius.

use super::{EditorContext, EditorState, Features, MouseEvent, Tool, ToolProperty};
use crate::commands::{CmdCircleEdit, CmdListElementInsert};
use crate::graphics::{ItemKind, ItemRef};
use crate::model::{Circle, Entity, Symbol};
use symkit_core::{Point, PositiveLength, Result};
use uuid::Uuid;

/// State of the circle tool
///
/// Pressing places the center, dragging sets the diameter and releasing
/// (or pressing again) finishes the circle.
#[derive(Default)]
pub struct DrawCircleState {
    edit_cmd: Option<CmdCircleEdit>,
    current: Option<Uuid>,
}

impl DrawCircleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.edit_cmd.is_some()
    }

    fn start(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        ctx.undo_stack.begin_group("Add symbol circle")?;
        let defaults = ctx.tool_defaults.circle;
        let circle = Circle::new(
            Uuid::new_v4(),
            defaults.layer,
            defaults.line_width,
            defaults.filled,
            defaults.grab_area,
            pos,
            PositiveLength::saturating(1),
        );
        let uuid = circle.uuid();
        ctx.undo_stack
            .append_to_group(Box::new(CmdListElementInsert::<Symbol, Circle>::new(
                ctx.symbol.clone(),
                circle,
                None,
            )))?;
        self.edit_cmd = Some(CmdCircleEdit::new(ctx.symbol.clone(), uuid)?);
        self.current = Some(uuid);
        ctx.update_scene();
        ctx.scene.set_selected(&ItemRef::new(ItemKind::Circle, uuid), true);
        Ok(())
    }

    fn update_diameter(&mut self, pos: Point) {
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return;
        };
        let center = cmd.new_value().center();
        let diameter = (pos - center).length().to_nm().saturating_mul(2);
        cmd.set_diameter(PositiveLength::saturating(diameter.max(1)), true);
    }

    fn finish(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        let Some(cmd) = self.edit_cmd.take() else {
            return Ok(());
        };
        if pos == cmd.new_value().center() {
            self.edit_cmd = Some(cmd);
            return self.abort(ctx);
        }
        ctx.undo_stack.append_to_group(Box::new(cmd))?;
        ctx.undo_stack.commit_group()?;
        self.deselect_current(ctx);
        Ok(())
    }

    fn deselect_current(&mut self, ctx: &mut EditorContext) {
        if let Some(uuid) = self.current.take() {
            ctx.scene.set_selected(&ItemRef::new(ItemKind::Circle, uuid), false);
        }
    }

    fn abort(&mut self, ctx: &mut EditorContext) -> Result<()> {
        self.edit_cmd = None;
        self.deselect_current(ctx);
        if ctx.undo_stack.is_group_active() {
            ctx.undo_stack.abort_group()?;
        }
        Ok(())
    }

    fn update_overlay_text(&self, ctx: &mut EditorContext) {
        let text = match self.edit_cmd.as_ref() {
            Some(cmd) => {
                let unit = ctx.length_unit();
                let circle = cmd.new_value();
                let diameter = circle.diameter().get();
                format!(
                    "X: {}\nY: {}\n⌀: {}",
                    unit.format(circle.center().x),
                    unit.format(circle.center().y),
                    unit.format(diameter)
                )
            }
            None => String::new(),
        };
        ctx.ui.set_info_text(&text);
    }

    fn finish_or_report(&mut self, ctx: &mut EditorContext, pos: Point) {
        if let Err(e) = self.finish(ctx, pos) {
            ctx.report_error(&e);
            if let Err(e) = self.abort(ctx) {
                tracing::error!(error = %e, "failed to abort operation");
            }
        }
        self.update_overlay_text(ctx);
    }
}

impl EditorState for DrawCircleState {
    fn tool(&self) -> Tool {
        Tool::DrawCircle
    }

    fn entry(&mut self, ctx: &mut EditorContext) -> bool {
        ctx.scene.clear_selection();
        true
    }

    fn is_busy(&self) -> bool {
        self.is_active()
    }

    fn exit(&mut self, ctx: &mut EditorContext) -> bool {
        if let Err(e) = self.abort(ctx) {
            ctx.report_error(&e);
            return false;
        }
        ctx.ui.set_info_text("");
        true
    }

    fn available_features(&self, _ctx: &mut EditorContext) -> Features {
        if self.is_active() {
            Features::ABORT
        } else {
            Features::empty()
        }
    }

    fn process_mouse_moved(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        self.update_diameter(e.pos.mapped_to_grid(ctx.grid_interval()));
        self.update_overlay_text(ctx);
        true
    }

    fn process_left_button_pressed(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        let pos = e.pos.mapped_to_grid(ctx.grid_interval());
        if self.is_active() {
            self.finish_or_report(ctx, pos);
        } else if let Err(err) = self.start(ctx, pos) {
            ctx.report_error(&err);
            if let Err(e) = self.abort(ctx) {
                tracing::error!(error = %e, "failed to abort operation");
            }
        }
        self.update_overlay_text(ctx);
        true
    }

    fn process_left_button_released(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        let pos = e.pos.mapped_to_grid(ctx.grid_interval());
        self.update_diameter(pos);
        self.finish_or_report(ctx, pos);
        true
    }

    fn process_left_button_double_clicked(
        &mut self,
        ctx: &mut EditorContext,
        e: &MouseEvent,
    ) -> bool {
        self.process_left_button_pressed(ctx, e)
    }

    fn process_abort_command(&mut self, ctx: &mut EditorContext) -> bool {
        if !self.is_active() {
            return false;
        }
        if let Err(e) = self.abort(ctx) {
            ctx.report_error(&e);
        }
        self.update_overlay_text(ctx);
        true
    }

    fn process_tool_property(&mut self, ctx: &mut EditorContext, property: &ToolProperty) -> bool {
        let defaults = &mut ctx.tool_defaults.circle;
        match property {
            ToolProperty::Layer(layer) => defaults.layer = *layer,
            ToolProperty::LineWidth(width) => defaults.line_width = *width,
            ToolProperty::Filled(filled) => defaults.filled = *filled,
            ToolProperty::GrabArea(grab_area) => defaults.grab_area = *grab_area,
            _ => return false,
        }
        if let Some(cmd) = self.edit_cmd.as_mut() {
            match property {
                ToolProperty::Layer(layer) => cmd.set_layer(*layer, true),
                ToolProperty::LineWidth(width) => cmd.set_line_width(*width, true),
                ToolProperty::Filled(filled) => cmd.set_filled(*filled, true),
                ToolProperty::GrabArea(grab_area) => cmd.set_grab_area(*grab_area, true),
                _ => {}
            }
        }
        true
    }
}
