//! Drawing lines, rectangles, polygons and arcs.

use super::{
    EditorContext, EditorState, Features, Key, KeyEvent, MouseEvent, ShapeDefaults, Tool,
    ToolProperty,
};
use crate::commands::{CmdListElementInsert, CmdPolygonEdit};
use crate::graphics::{ItemKind, ItemRef};
use crate::model::{Entity, Polygon, Symbol};
use symkit_core::{arc_angle, Angle, Length, LengthUnit, Path, Point, Result, Vertex};
use uuid::Uuid;

const GROUP_TEXT: &str = "Add symbol polygon";

/// Shape drawn by [`DrawPolygonState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonMode {
    /// Open polyline, finished by clicking twice at the same position
    Line,
    /// Axis aligned rectangle from two corners
    Rect,
    /// Polyline, finished when closed or by clicking twice
    Polygon,
    /// Arc from center, start and end point
    Arc,
}

/// State of the line, rectangle, polygon and arc tools
pub struct DrawPolygonState {
    mode: PolygonMode,
    edit_cmd: Option<CmdPolygonEdit>,
    current: Option<Uuid>,
    cursor_pos: Point,
    arc_center: Point,
    /// Arc start point placed, now choosing the end point
    arc_in_second_state: bool,
    /// Sweep of the arc preview, used to keep the direction stable
    arc_sweep: Angle,
}

impl DrawPolygonState {
    pub fn new(mode: PolygonMode) -> Self {
        Self {
            mode,
            edit_cmd: None,
            current: None,
            cursor_pos: Point::ORIGIN,
            arc_center: Point::ORIGIN,
            arc_in_second_state: false,
            arc_sweep: Angle::DEG_0,
        }
    }

    pub fn mode(&self) -> PolygonMode {
        self.mode
    }

    /// Whether a polygon is being drawn
    pub fn is_active(&self) -> bool {
        self.edit_cmd.is_some()
    }

    fn defaults<'a>(&self, ctx: &'a EditorContext) -> &'a ShapeDefaults {
        match self.mode {
            PolygonMode::Line | PolygonMode::Arc => &ctx.tool_defaults.line,
            PolygonMode::Rect | PolygonMode::Polygon => &ctx.tool_defaults.area,
        }
    }

    fn defaults_mut<'a>(&self, ctx: &'a mut EditorContext) -> &'a mut ShapeDefaults {
        match self.mode {
            PolygonMode::Line | PolygonMode::Arc => &mut ctx.tool_defaults.line,
            PolygonMode::Rect | PolygonMode::Polygon => &mut ctx.tool_defaults.area,
        }
    }

    fn snapped(ctx: &EditorContext, pos: Point, shift: bool) -> Point {
        if shift {
            pos
        } else {
            pos.mapped_to_grid(ctx.grid_interval())
        }
    }

    fn start(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        ctx.undo_stack.begin_group(GROUP_TEXT)?;
        self.arc_in_second_state = false;
        let vertices = match self.mode {
            PolygonMode::Arc => {
                self.arc_center = pos;
                self.arc_sweep = Angle::DEG_0;
                vec![Vertex::straight(pos); 3]
            }
            PolygonMode::Rect => vec![Vertex::straight(pos); 5],
            PolygonMode::Line | PolygonMode::Polygon => vec![
                Vertex::new(pos, ctx.tool_defaults.segment_angle),
                Vertex::straight(pos),
            ],
        };
        let defaults = *self.defaults(ctx);
        let polygon = Polygon::new(
            Uuid::new_v4(),
            defaults.layer,
            defaults.line_width,
            defaults.filled,
            defaults.grab_area,
            Path::from_vertices(vertices),
        );
        let uuid = polygon.uuid();
        ctx.undo_stack
            .append_to_group(Box::new(CmdListElementInsert::<Symbol, Polygon>::new(
                ctx.symbol.clone(),
                polygon,
                None,
            )))?;
        self.edit_cmd = Some(CmdPolygonEdit::new(ctx.symbol.clone(), uuid)?);
        self.current = Some(uuid);
        ctx.update_scene();
        ctx.scene
            .set_selected(&ItemRef::new(ItemKind::Polygon, uuid), true);
        tracing::debug!(mode = ?self.mode, %uuid, "started polygon");
        Ok(())
    }

    fn is_segment_empty(&self, path: &Path) -> bool {
        let v = path.vertices();
        let n = v.len();
        if n < 2 {
            return true;
        }
        match self.mode {
            PolygonMode::Rect => {
                let size = v[n.saturating_sub(3)].pos - v[0].pos;
                size.x == Length::ZERO || size.y == Length::ZERO
            }
            PolygonMode::Arc if !self.arc_in_second_state => v[n - 1].pos == self.arc_center,
            PolygonMode::Arc => v[n - 1].pos == v[0].pos,
            PolygonMode::Line | PolygonMode::Polygon => v[n - 1].pos == v[n - 2].pos,
        }
    }

    fn add_next_segment(&mut self, ctx: &mut EditorContext, pos: Point) -> Result<()> {
        let Some(cmd) = self.edit_cmd.as_ref() else {
            return Ok(());
        };
        let path = cmd.new_value().path().clone();
        if self.is_segment_empty(&path) {
            return self.abort(ctx);
        }
        if self.mode == PolygonMode::Arc && !self.arc_in_second_state {
            self.arc_in_second_state = true;
            self.update_path(pos);
            return Ok(());
        }

        if let Some(cmd) = self.edit_cmd.take() {
            ctx.undo_stack.append_to_group(Box::new(cmd))?;
        }
        ctx.undo_stack.commit_group()?;

        let finished = matches!(self.mode, PolygonMode::Rect | PolygonMode::Arc)
            || path.is_closed();
        let Some(uuid) = self.current else {
            return Ok(());
        };
        if finished {
            return self.abort(ctx);
        }

        ctx.undo_stack.begin_group(GROUP_TEXT)?;
        let mut cmd = CmdPolygonEdit::new(ctx.symbol.clone(), uuid)?;
        let mut path = path;
        if let Some(last) = path.vertices_mut().last_mut() {
            last.angle = ctx.tool_defaults.segment_angle;
        }
        path.add_vertex(pos, Angle::DEG_0);
        cmd.set_path(path, true);
        self.edit_cmd = Some(cmd);
        Ok(())
    }

    fn update_path(&mut self, pos: Point) {
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return;
        };
        let mut path = cmd.new_value().path().clone();
        let n = path.len();
        match self.mode {
            PolygonMode::Rect if n >= 5 => {
                let v = path.vertices_mut();
                let start = v[n - 5].pos;
                v[n - 4].pos = Point::new(pos.x, start.y);
                v[n - 3].pos = pos;
                v[n - 2].pos = Point::new(start.x, pos.y);
            }
            PolygonMode::Arc if !self.arc_in_second_state => {
                // Full circle preview through the cursor
                let opposite = pos.rotated(Angle::DEG_180, self.arc_center);
                path = Path::from_vertices(vec![
                    Vertex::new(pos, Angle::DEG_180),
                    Vertex::new(opposite, Angle::DEG_180),
                    Vertex::straight(pos),
                ]);
            }
            PolygonMode::Arc => {
                let Some(start) = path.vertices().first().map(|v| v.pos) else {
                    return;
                };
                let center = self.arc_center;
                let mut angle = arc_angle(start, pos, center).mapped_to_180deg();
                // Keep sweeping in the same direction past 180°
                if (self.arc_sweep > Angle::DEG_90 && angle < Angle::DEG_0)
                    || (self.arc_sweep < -Angle::DEG_90 && angle > Angle::DEG_0)
                {
                    angle = angle.inverted();
                }
                path.vertices_mut().truncate(1);
                if angle.abs() > Angle::DEG_270 {
                    let half = angle / 2;
                    path.vertices_mut()[0].angle = angle - half;
                    path.add_vertex(start.rotated(half, center), half);
                } else {
                    path.vertices_mut()[0].angle = angle;
                }
                path.add_vertex(start.rotated(angle, center), Angle::DEG_0);
                self.arc_sweep = angle;
            }
            _ => {
                if let Some(last) = path.vertices_mut().last_mut() {
                    last.pos = pos;
                }
            }
        }
        cmd.set_path(path, true);
    }

    fn abort(&mut self, ctx: &mut EditorContext) -> Result<()> {
        // Dropping the edit command reverts its immediate changes
        self.edit_cmd = None;
        if let Some(uuid) = self.current.take() {
            ctx.scene
                .set_selected(&ItemRef::new(ItemKind::Polygon, uuid), false);
        }
        self.arc_in_second_state = false;
        if ctx.undo_stack.is_group_active() {
            ctx.undo_stack.abort_group()?;
        }
        Ok(())
    }

    fn press(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        let pos = Self::snapped(ctx, e.pos, e.modifiers.shift());
        self.cursor_pos = pos;
        let result = if self.is_active() {
            self.add_next_segment(ctx, pos)
        } else {
            self.start(ctx, pos)
        };
        if let Err(err) = result {
            ctx.report_error(&err);
            if let Err(e) = self.abort(ctx) {
                tracing::error!(error = %e, "failed to abort operation");
            }
        }
        self.update_overlay_text(ctx);
        true
    }

    fn overlay_text(&self, unit: LengthUnit) -> Option<String> {
        let cmd = self.edit_cmd.as_ref()?;
        let vertices = cmd.new_value().path().vertices();
        let fmt_point = |label: &str, p: Point| {
            format!(
                "X{label}: {}\nY{label}: {}",
                unit.format(p.x),
                unit.format(p.y)
            )
        };
        let text = match self.mode {
            PolygonMode::Rect => {
                let p0 = vertices.first()?.pos;
                let p1 = vertices.get(2)?.pos;
                let size = p1 - p0;
                format!(
                    "{}\n{}\nΔX: {}\nΔY: {}",
                    fmt_point("0", p0),
                    fmt_point("1", p1),
                    unit.format(size.x),
                    unit.format(size.y)
                )
            }
            PolygonMode::Arc => {
                let start = vertices.first()?;
                let radius = (start.pos - self.arc_center).length();
                format!(
                    "{}\nr: {}\n⌀: {}\n∠: {}",
                    fmt_point("0", self.arc_center),
                    unit.format(radius),
                    unit.format(radius * 2),
                    if self.arc_in_second_state {
                        self.arc_sweep
                    } else {
                        Angle::DEG_0
                    }
                )
            }
            PolygonMode::Line | PolygonMode::Polygon => {
                let n = vertices.len();
                let p0 = vertices.get(n.checked_sub(2)?)?;
                let p1 = vertices.last()?.pos;
                format!(
                    "{}\n{}\nΔ: {}\n∠: {}",
                    fmt_point("0", p0.pos),
                    fmt_point("1", p1),
                    unit.format((p1 - p0.pos).length()),
                    p0.angle
                )
            }
        };
        Some(text)
    }

    fn update_overlay_text(&self, ctx: &mut EditorContext) {
        let text = self.overlay_text(ctx.length_unit()).unwrap_or_default();
        ctx.ui.set_info_text(&text);
    }
}

impl EditorState for DrawPolygonState {
    fn tool(&self) -> Tool {
        match self.mode {
            PolygonMode::Line => Tool::DrawLine,
            PolygonMode::Rect => Tool::DrawRect,
            PolygonMode::Polygon => Tool::DrawPolygon,
            PolygonMode::Arc => Tool::DrawArc,
        }
    }

    fn entry(&mut self, ctx: &mut EditorContext) -> bool {
        ctx.scene.clear_selection();
        self.update_overlay_text(ctx);
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

    fn process_key_pressed(&mut self, ctx: &mut EditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift || !self.is_active() {
            return false;
        }
        self.cursor_pos = ctx.cursor_pos();
        self.update_path(self.cursor_pos);
        self.update_overlay_text(ctx);
        true
    }

    fn process_key_released(&mut self, ctx: &mut EditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift || !self.is_active() {
            return false;
        }
        self.cursor_pos = ctx.cursor_pos().mapped_to_grid(ctx.grid_interval());
        self.update_path(self.cursor_pos);
        self.update_overlay_text(ctx);
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        self.cursor_pos = Self::snapped(ctx, e.pos, e.modifiers.shift());
        if !self.is_active() {
            return false;
        }
        self.update_path(self.cursor_pos);
        self.update_overlay_text(ctx);
        true
    }

    fn process_left_button_pressed(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        self.press(ctx, e)
    }

    fn process_left_button_double_clicked(
        &mut self,
        ctx: &mut EditorContext,
        e: &MouseEvent,
    ) -> bool {
        self.press(ctx, e)
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
        if let ToolProperty::Angle(angle) = property {
            ctx.tool_defaults.segment_angle = *angle;
        } else {
            let defaults = self.defaults_mut(ctx);
            match property {
                ToolProperty::Layer(layer) => defaults.layer = *layer,
                ToolProperty::LineWidth(width) => defaults.line_width = *width,
                ToolProperty::Filled(filled) => defaults.filled = *filled,
                ToolProperty::GrabArea(grab_area) => defaults.grab_area = *grab_area,
                _ => return false,
            }
        }
        let Some(cmd) = self.edit_cmd.as_mut() else {
            return true;
        };
        match property {
            ToolProperty::Layer(layer) => cmd.set_layer(*layer, true),
            ToolProperty::LineWidth(width) => cmd.set_line_width(*width, true),
            ToolProperty::Filled(filled) => cmd.set_filled(*filled, true),
            ToolProperty::GrabArea(grab_area) => cmd.set_grab_area(*grab_area, true),
            ToolProperty::Angle(angle) if self.mode != PolygonMode::Arc => {
                let mut path = cmd.new_value().path().clone();
                let n = path.len();
                if n >= 2 {
                    path.vertices_mut()[n - 2].angle = *angle;
                    cmd.set_path(path, true);
                }
            }
            _ => {}
        }
        self.update_overlay_text(ctx);
        true
    }
}
