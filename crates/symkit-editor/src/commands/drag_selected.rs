//! Moving, rotating and mirroring the selection.

use super::{CmdCircleEdit, CmdPinEdit, CmdPolygonEdit, CmdTextEdit, SelectedItems};
use crate::model::Symbol;
use crate::undo::{CommandState, UndoCommand, UndoCommandGroup};
use symkit_core::{Angle, Orientation, Point, PositiveLength, Result, Shared};

/// Transform all selected symbol elements as one undo step
///
/// One edit command per selected element is created up front. All
/// transforms are applied immediately for live feedback. Executing the
/// command moves the edit commands into a group; if nothing was changed the
/// command reports no change and the edits are discarded.
pub struct CmdDragSelectedSymbolItems {
    state: CommandState,
    pin_cmds: Vec<CmdPinEdit>,
    circle_cmds: Vec<CmdCircleEdit>,
    polygon_cmds: Vec<CmdPolygonEdit>,
    text_cmds: Vec<CmdTextEdit>,
    group: Option<UndoCommandGroup>,
    grid: PositiveLength,
    center: Point,
    delta_pos: Point,
    delta_rot: Angle,
    mirrored: bool,
    snapped_to_grid: bool,
    has_off_grid_elements: bool,
}

impl CmdDragSelectedSymbolItems {
    pub fn new(
        symbol: Shared<Symbol>,
        selection: &SelectedItems,
        grid: PositiveLength,
    ) -> Result<Self> {
        let mut sum = Point::ORIGIN;
        let mut count: i64 = 0;
        let mut off_grid = false;
        let mut add_position = |pos: Point| {
            sum += pos;
            count += 1;
            off_grid |= !pos.is_on_grid(grid);
        };

        let mut pin_cmds = Vec::with_capacity(selection.pins.len());
        for uuid in &selection.pins {
            let cmd = CmdPinEdit::new(symbol.clone(), *uuid)?;
            add_position(cmd.old_value().position());
            pin_cmds.push(cmd);
        }
        let mut circle_cmds = Vec::with_capacity(selection.circles.len());
        for uuid in &selection.circles {
            let cmd = CmdCircleEdit::new(symbol.clone(), *uuid)?;
            add_position(cmd.old_value().center());
            circle_cmds.push(cmd);
        }
        let mut polygon_cmds = Vec::with_capacity(selection.polygons.len());
        for uuid in &selection.polygons {
            let cmd = CmdPolygonEdit::new(symbol.clone(), *uuid)?;
            for vertex in cmd.old_value().path().vertices() {
                add_position(vertex.pos);
            }
            polygon_cmds.push(cmd);
        }
        let mut text_cmds = Vec::with_capacity(selection.texts.len());
        for uuid in &selection.texts {
            let cmd = CmdTextEdit::new(symbol.clone(), *uuid)?;
            add_position(cmd.old_value().position());
            text_cmds.push(cmd);
        }

        // A single element keeps its exact position as rotation center
        let center = if count > 1 {
            Point::new(sum.x / count, sum.y / count).mapped_to_grid(grid)
        } else {
            sum
        };

        Ok(Self {
            state: CommandState::new("Drag Symbol Elements"),
            pin_cmds,
            circle_cmds,
            polygon_cmds,
            text_cmds,
            group: None,
            grid,
            center,
            delta_pos: Point::ORIGIN,
            delta_rot: Angle::DEG_0,
            mirrored: false,
            snapped_to_grid: false,
            has_off_grid_elements: off_grid,
        })
    }

    pub fn selected_items_count(&self) -> usize {
        self.pin_cmds.len()
            + self.circle_cmds.len()
            + self.polygon_cmds.len()
            + self.text_cmds.len()
    }

    /// Whether any selected element was off the grid at construction
    pub fn has_off_grid_elements(&self) -> bool {
        self.has_off_grid_elements
    }

    /// Current rotation/mirror center
    pub fn center(&self) -> Point {
        self.center
    }

    /// Total translation applied so far
    pub fn delta_pos(&self) -> Point {
        self.delta_pos
    }

    /// Move the selection so that it is offset by `delta` from its start
    pub fn set_delta_to_start_pos(&mut self, delta: Point) {
        self.translate(delta - self.delta_pos);
    }

    pub fn translate(&mut self, delta: Point) {
        if delta.is_origin() {
            return;
        }
        for cmd in &mut self.pin_cmds {
            cmd.translate(delta, true);
        }
        for cmd in &mut self.circle_cmds {
            cmd.translate(delta, true);
        }
        for cmd in &mut self.polygon_cmds {
            cmd.translate(delta, true);
        }
        for cmd in &mut self.text_cmds {
            cmd.translate(delta, true);
        }
        self.delta_pos += delta;
        self.center += delta;
    }

    pub fn rotate(&mut self, angle: Angle) {
        let center = self.center;
        for cmd in &mut self.pin_cmds {
            cmd.rotate(angle, center, true);
        }
        for cmd in &mut self.circle_cmds {
            cmd.rotate(angle, center, true);
        }
        for cmd in &mut self.polygon_cmds {
            cmd.rotate(angle, center, true);
        }
        for cmd in &mut self.text_cmds {
            cmd.rotate(angle, center, true);
        }
        self.delta_rot += angle;
    }

    pub fn mirror(&mut self, orientation: Orientation) {
        let center = self.center;
        for cmd in &mut self.pin_cmds {
            cmd.mirror(orientation, center, true);
        }
        for cmd in &mut self.circle_cmds {
            cmd.mirror(orientation, center, true);
        }
        for cmd in &mut self.polygon_cmds {
            cmd.mirror(orientation, center, true);
        }
        for cmd in &mut self.text_cmds {
            cmd.mirror(orientation, center, true);
        }
        self.mirrored = !self.mirrored;
    }

    pub fn snap_to_grid(&mut self) {
        let grid = self.grid;
        for cmd in &mut self.pin_cmds {
            cmd.snap_to_grid(grid, true);
        }
        for cmd in &mut self.circle_cmds {
            cmd.snap_to_grid(grid, true);
        }
        for cmd in &mut self.polygon_cmds {
            cmd.snap_to_grid(grid, true);
        }
        for cmd in &mut self.text_cmds {
            cmd.snap_to_grid(grid, true);
        }
        self.snapped_to_grid = true;
    }

    fn is_unmodified(&self) -> bool {
        self.delta_pos.is_origin()
            && self.delta_rot == Angle::DEG_0
            && !self.mirrored
            && !self.snapped_to_grid
    }
}

impl UndoCommand for CmdDragSelectedSymbolItems {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        if self.is_unmodified() {
            self.pin_cmds.clear();
            self.circle_cmds.clear();
            self.polygon_cmds.clear();
            self.text_cmds.clear();
            return Ok(false);
        }

        let mut group = UndoCommandGroup::new(self.state.text());
        for cmd in self.pin_cmds.drain(..) {
            group.append_child(Box::new(cmd))?;
        }
        for cmd in self.circle_cmds.drain(..) {
            group.append_child(Box::new(cmd))?;
        }
        for cmd in self.polygon_cmds.drain(..) {
            group.append_child(Box::new(cmd))?;
        }
        for cmd in self.text_cmds.drain(..) {
            group.append_child(Box::new(cmd))?;
        }
        let changed = group.execute()?;
        self.group = Some(group);
        Ok(changed)
    }

    fn perform_undo(&mut self) -> Result<()> {
        match self.group.as_mut() {
            Some(group) => group.undo(),
            None => Ok(()),
        }
    }

    fn perform_redo(&mut self) -> Result<()> {
        match self.group.as_mut() {
            Some(group) => group.redo(),
            None => Ok(()),
        }
    }
}
