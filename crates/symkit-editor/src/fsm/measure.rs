//! Measuring distances between points of the symbol.

use super::{EditorContext, EditorState, Features, Key, KeyEvent, MouseEvent, Tool};
use crate::model::Symbol;
use symkit_core::{Angle, Length, Point, PositiveLength};

/// Points the measure tool snaps to
///
/// Pin positions and ends, polygon vertices (plus the middle of half-circle
/// segments), circle centers and their extremes on both axes, and text
/// anchors.
pub fn measure_snap_candidates(symbol: &Symbol) -> Vec<Point> {
    let mut points = Vec::new();
    for pin in symbol.pins() {
        points.push(pin.position());
        points.push(pin.end_point());
    }
    for polygon in symbol.polygons() {
        let vertices = polygon.path().vertices();
        for (i, vertex) in vertices.iter().enumerate() {
            points.push(vertex.pos);
            let Some(next) = vertices.get(i + 1) else {
                continue;
            };
            if vertex.angle.abs() == Angle::DEG_180 {
                let center = Point::new(
                    (vertex.pos.x + next.pos.x) / 2,
                    (vertex.pos.y + next.pos.y) / 2,
                );
                points.push(vertex.pos.rotated(vertex.angle / 2, center));
            }
        }
    }
    for circle in symbol.circles() {
        let center = circle.center();
        let radius = circle.diameter().get() / 2;
        points.push(center);
        points.push(center + Point::new(radius, Length::ZERO));
        points.push(center - Point::new(radius, Length::ZERO));
        points.push(center + Point::new(Length::ZERO, radius));
        points.push(center - Point::new(Length::ZERO, radius));
    }
    for text in symbol.texts() {
        points.push(text.position());
    }
    points.sort_by_key(|p| (p.x, p.y));
    points.dedup();
    points
}

/// State of the measure tool
#[derive(Debug, Clone, Default)]
pub struct MeasureState {
    snap_candidates: Vec<Point>,
    cursor_pos: Point,
    start_pos: Option<Point>,
    end_pos: Option<Point>,
}

impl MeasureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_pos(&self) -> Option<Point> {
        self.start_pos
    }

    pub fn end_pos(&self) -> Option<Point> {
        self.end_pos
    }

    /// Distance between start and end point, once both are set
    pub fn distance(&self) -> Option<Length> {
        Some((self.end_pos? - self.start_pos?).length())
    }

    fn snapped(&self, ctx: &EditorContext, pos: Point, shift: bool) -> Point {
        if shift {
            return pos;
        }
        let on_grid = pos.mapped_to_grid(ctx.grid_interval());
        let grid_distance = pos.distance_squared(&on_grid);
        self.snap_candidates
            .iter()
            .map(|p| (pos.distance_squared(p), *p))
            .filter(|(d, _)| *d <= grid_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(on_grid, |(_, p)| p)
    }

    fn set_cursor(&mut self, ctx: &mut EditorContext, pos: Point, shift: bool) {
        self.cursor_pos = self.snapped(ctx, pos, shift);
        self.update_info_text(ctx);
    }

    fn update_info_text(&self, ctx: &mut EditorContext) {
        let unit = ctx.length_unit();
        let start = self.start_pos.unwrap_or(self.cursor_pos);
        let end = self.end_pos.unwrap_or(self.cursor_pos);
        let diff = end - start;
        let mut text = format!(
            "X0: {}\nY0: {}",
            unit.format(start.x),
            unit.format(start.y)
        );
        if self.start_pos.is_some() {
            let (dx, dy) = diff.to_f64();
            let angle = Angle::from_rad(dy.atan2(dx));
            text.push_str(&format!(
                "\nX1: {}\nY1: {}\nΔX: {}\nΔY: {}\nΔ: {}\n∠: {}",
                unit.format(end.x),
                unit.format(end.y),
                unit.format(diff.x),
                unit.format(diff.y),
                unit.format(diff.length()),
                angle
            ));
        }
        ctx.ui.set_info_text(&text);
    }
}

impl EditorState for MeasureState {
    fn tool(&self) -> Tool {
        Tool::Measure
    }

    fn entry(&mut self, ctx: &mut EditorContext) -> bool {
        self.snap_candidates = measure_snap_candidates(&ctx.symbol.borrow());
        ctx.scene.clear_selection();
        self.start_pos = None;
        self.end_pos = None;
        let pos = ctx.cursor_pos();
        self.set_cursor(ctx, pos, false);
        true
    }

    fn exit(&mut self, ctx: &mut EditorContext) -> bool {
        self.snap_candidates.clear();
        self.start_pos = None;
        self.end_pos = None;
        ctx.ui.set_info_text("");
        true
    }

    fn available_features(&self, _ctx: &mut EditorContext) -> Features {
        let mut features = Features::empty();
        if self.start_pos.is_some() {
            features |= Features::ABORT;
        }
        if self.distance().is_some() {
            features |= Features::COPY | Features::REMOVE;
        }
        features
    }

    fn process_key_pressed(&mut self, ctx: &mut EditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift {
            return false;
        }
        let pos = ctx.cursor_pos();
        self.set_cursor(ctx, pos, true);
        true
    }

    fn process_key_released(&mut self, ctx: &mut EditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift {
            return false;
        }
        let pos = ctx.cursor_pos();
        self.set_cursor(ctx, pos, false);
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        self.set_cursor(ctx, e.pos, e.modifiers.shift());
        true
    }

    fn process_left_button_pressed(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        self.cursor_pos = self.snapped(ctx, e.pos, e.modifiers.shift());
        if self.start_pos.is_none() || self.end_pos.is_some() {
            self.start_pos = Some(self.cursor_pos);
            self.end_pos = None;
        } else {
            self.end_pos = Some(self.cursor_pos);
        }
        self.update_info_text(ctx);
        true
    }

    fn process_copy(&mut self, ctx: &mut EditorContext) -> bool {
        let Some(distance) = self.distance() else {
            return false;
        };
        let unit = ctx.length_unit();
        let value = format!(
            "{:.*}",
            unit.reasonable_decimals(),
            unit.convert_to_unit(distance)
        );
        match ctx.clipboard.store_text(&value) {
            Ok(()) => {
                ctx.ui.set_status_message(&format!(
                    "Copied to clipboard: {} {}",
                    value,
                    unit.short_str()
                ));
            }
            Err(e) => ctx.report_error(&e),
        }
        true
    }

    fn process_remove(&mut self, ctx: &mut EditorContext) -> bool {
        if self.distance().is_none() {
            return false;
        }
        self.start_pos = None;
        self.end_pos = None;
        self.update_info_text(ctx);
        true
    }

    fn process_abort_command(&mut self, ctx: &mut EditorContext) -> bool {
        if self.start_pos.is_none() || self.end_pos.is_some() {
            return false;
        }
        self.start_pos = None;
        self.update_info_text(ctx);
        true
    }

    fn process_grid_interval_changed(
        &mut self,
        ctx: &mut EditorContext,
        _interval: PositiveLength,
    ) -> bool {
        let pos = ctx.cursor_pos();
        self.set_cursor(ctx, pos, false);
        true
    }
}
