//! Placing texts, including the name and value placeholders.

use super::{
    EditorContext, EditorState, Features, MouseEvent, TextDefaults, Tool, ToolDefaults,
    ToolProperty,
};
use crate::commands::{CmdListElementInsert, CmdTextEdit};
use crate::graphics::{ItemKind, ItemRef};
use crate::model::{Entity, Symbol, Text};
use symkit_core::{
    Alignment, Angle, HAlign, Layer, Orientation, Point, PositiveLength, Result, VAlign,
};
use uuid::Uuid;

/// Height of name and value placeholders
const PLACEHOLDER_HEIGHT: i64 = 2_500_000;

/// Kind of text placed by [`DrawTextState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextMode {
    /// `{{NAME}}` placeholder on the names layer
    Name,
    /// `{{VALUE}}` placeholder on the values layer
    Value,
    /// Free text
    Text,
}

impl TextMode {
    /// Conventional properties of placeholders
    fn placeholder_defaults(self) -> Option<TextDefaults> {
        let height = PositiveLength::saturating(PLACEHOLDER_HEIGHT);
        match self {
            TextMode::Name => Some(TextDefaults {
                layer: Layer::SymbolNames,
                text: "{{NAME}}".to_string(),
                height,
                rotation: Angle::DEG_0,
                align: Alignment::new(HAlign::Left, VAlign::Bottom),
            }),
            TextMode::Value => Some(TextDefaults {
                layer: Layer::SymbolValues,
                text: "{{VALUE}}".to_string(),
                height,
                rotation: Angle::DEG_0,
                align: Alignment::new(HAlign::Left, VAlign::Top),
            }),
            TextMode::Text => None,
        }
    }
}

/// State of the text tools
///
/// A text follows the cursor while the tool is active; each click places
/// it and attaches a new one.
pub struct DrawTextState {
    mode: TextMode,
    defaults: TextDefaults,
    edit_cmd: Option<CmdTextEdit>,
    current: Option<Uuid>,
    start_pos: Point,
}

impl DrawTextState {
    pub fn new(mode: TextMode) -> Self {
        let defaults = mode
            .placeholder_defaults()
            .unwrap_or_else(|| ToolDefaults::default().text);
        Self {
            mode,
            defaults,
            edit_cmd: None,
            current: None,
            start_pos: Point::ORIGIN,
        }
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.edit_cmd.is_some()
    }

    /// Properties the next text gets
    pub fn defaults(&self) -> &TextDefaults {
        &self.defaults
    }

    fn remember(&self, ctx: &mut EditorContext) {
        if self.mode == TextMode::Text {
            ctx.tool_defaults.text = self.defaults.clone();
        }
    }

    fn start(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        self.start_pos = pos;
        ctx.undo_stack.begin_group("Add symbol text")?;
        let text = Text::new(
            Uuid::new_v4(),
            self.defaults.layer,
            self.defaults.text.clone(),
            pos,
            self.defaults.rotation,
            self.defaults.height,
            self.defaults.align,
        );
        let uuid = text.uuid();
        ctx.undo_stack
            .append_to_group(Box::new(CmdListElementInsert::<Symbol, Text>::new(
                ctx.symbol.clone(),
                text,
                None,
            )))?;
        self.edit_cmd = Some(CmdTextEdit::new(ctx.symbol.clone(), uuid)?);
        self.current = Some(uuid);
        ctx.update_scene();
        ctx.scene.set_selected(&ItemRef::new(ItemKind::Text, uuid), true);
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
        if pos == self.start_pos {
            return self.abort(ctx);
        }
        let Some(mut cmd) = self.edit_cmd.take() else {
            return Ok(());
        };
        cmd.set_position(pos, true);
        self.deselect_current(ctx);
        ctx.undo_stack.append_to_group(Box::new(cmd))?;
        ctx.undo_stack.commit_group()?;
        Ok(())
    }

    fn deselect_current(&mut self, ctx: &mut EditorContext) {
        if let Some(uuid) = self.current.take() {
            ctx.scene.set_selected(&ItemRef::new(ItemKind::Text, uuid), false);
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

impl EditorState for DrawTextState {
    fn tool(&self) -> Tool {
        match self.mode {
            TextMode::Name => Tool::AddNames,
            TextMode::Value => Tool::AddValues,
            TextMode::Text => Tool::DrawText,
        }
    }

    fn entry(&mut self, ctx: &mut EditorContext) -> bool {
        self.defaults = match self.mode.placeholder_defaults() {
            Some(defaults) => defaults,
            None => ctx.tool_defaults.text.clone(),
        };
        ctx.scene.clear_selection();
        let pos = ctx.cursor_pos().mapped_to_grid(ctx.grid_interval());
        self.start_or_report(ctx, pos)
    }

    fn is_busy(&self) -> bool {
        self.is_active()
    }

    fn exit(&mut self, ctx: &mut EditorContext) -> bool {
        if self.current.is_some() {
            if let Err(e) = self.abort(ctx) {
                ctx.report_error(&e);
                return false;
            }
        }
        true
    }

    fn available_features(&self, _ctx: &mut EditorContext) -> Features {
        Features::ABORT | Features::ROTATE | Features::MIRROR
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
        if self.is_active() {
            if let Err(err) = self.finish(ctx, pos) {
                ctx.report_error(&err);
                if let Err(e) = self.abort(ctx) {
                    tracing::error!(error = %e, "failed to abort operation");
                }
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
        self.defaults.rotation = cmd.new_value().rotation();
        self.remember(ctx);
        true
    }

    fn process_mirror(&mut self, ctx: &mut EditorContext, orientation: Orientation) -> bool {
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return false;
        };
        let center = cmd.new_value().position();
        cmd.mirror(orientation, center, true);
        self.defaults.rotation = cmd.new_value().rotation();
        self.defaults.align = cmd.new_value().align();
        self.remember(ctx);
        true
    }

    fn process_tool_property(&mut self, ctx: &mut EditorContext, property: &ToolProperty) -> bool {
        match property {
            ToolProperty::Layer(layer) if self.mode == TextMode::Text => {
                self.defaults.layer = *layer;
                if let Some(cmd) = self.edit_cmd.as_mut() {
                    cmd.set_layer(*layer, true);
                }
            }
            ToolProperty::Text(text) if self.mode == TextMode::Text => {
                self.defaults.text = text.trim().to_string();
                if let Some(cmd) = self.edit_cmd.as_mut() {
                    cmd.set_text(self.defaults.text.clone(), true);
                }
            }
            ToolProperty::Height(height) => {
                self.defaults.height = *height;
                if let Some(cmd) = self.edit_cmd.as_mut() {
                    cmd.set_height(*height, true);
                }
            }
            ToolProperty::HAlign(h) => {
                self.defaults.align.h = *h;
                if let Some(cmd) = self.edit_cmd.as_mut() {
                    cmd.set_align(self.defaults.align, true);
                }
            }
            ToolProperty::VAlign(v) => {
                self.defaults.align.v = *v;
                if let Some(cmd) = self.edit_cmd.as_mut() {
                    cmd.set_align(self.defaults.align, true);
                }
            }
            _ => return false,
        }
        self.remember(ctx);
        true
    }
}
