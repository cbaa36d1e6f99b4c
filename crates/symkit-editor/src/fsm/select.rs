//! The select tool: selection, direct manipulation and the clipboard.

use super::{
    ContextMenu, ContextMenuAction, EditorContext, EditorState, Features, MouseEvent,
    PropertiesRequest, Tool,
};
use crate::clipboard::SymbolClipboardData;
use crate::commands::{
    CmdCircleEdit, CmdDragSelectedSymbolItems, CmdPasteSymbolItems, CmdPinEdit, CmdPolygonEdit,
    CmdRemoveSelectedSymbolItems, CmdTextEdit, SelectedItems,
};
use crate::graphics::{ItemKind, ItemRef};
use crate::model::Entity;
use symkit_core::{Angle, Orientation, Path, Point, PositiveLength, Rect, Result, Vertex};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubState {
    Idle,
    /// Dragging a selection rectangle
    Selecting,
    /// Dragging the selected elements
    Moving,
    /// Placing pasted elements; a command group is open
    Pasting,
    MovingPolygonVertex,
}

/// State of the select tool
pub struct SelectState {
    sub_state: SubState,
    start_pos: Point,
    drag_cmd: Option<CmdDragSelectedSymbolItems>,
    polygon_cmd: Option<CmdPolygonEdit>,
    selected_polygon: Option<Uuid>,
    selected_vertices: Vec<usize>,
}

impl Default for SelectState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectState {
    pub fn new() -> Self {
        Self {
            sub_state: SubState::Idle,
            start_pos: Point::ORIGIN,
            drag_cmd: None,
            polygon_cmd: None,
            selected_polygon: None,
            selected_vertices: Vec::new(),
        }
    }

    /// Whether pasted elements are currently being placed
    pub fn is_pasting(&self) -> bool {
        self.sub_state == SubState::Pasting
    }

    /// Whether elements are currently being dragged
    pub fn is_moving(&self) -> bool {
        matches!(
            self.sub_state,
            SubState::Moving | SubState::MovingPolygonVertex
        )
    }

    /// Start placing `data`; with `fixed_position` the elements are placed
    /// at that offset without interaction
    pub fn start_paste(
        &mut self,
        ctx: &mut EditorContext,
        data: &SymbolClipboardData,
        fixed_position: Option<Point>,
    ) -> Result<bool> {
        ctx.scene.clear_selection();
        ctx.undo_stack.begin_group("Paste Symbol Elements")?;
        self.sub_state = SubState::Pasting;
        self.start_pos = ctx.cursor_pos();
        let offset = fixed_position.unwrap_or_else(|| {
            (self.start_pos - data.cursor_pos).mapped_to_grid(ctx.grid_interval())
        });

        let result = self.paste_into_group(ctx, data, offset, fixed_position.is_some());
        match result {
            Ok(true) => Ok(true),
            Ok(false) => {
                tracing::debug!("nothing pasted");
                ctx.undo_stack.abort_group()?;
                self.sub_state = SubState::Idle;
                Ok(false)
            }
            Err(e) => {
                self.drag_cmd = None;
                if ctx.undo_stack.is_group_active() {
                    ctx.undo_stack.abort_group()?;
                }
                self.sub_state = SubState::Idle;
                Err(e)
            }
        }
    }

    fn paste_into_group(
        &mut self,
        ctx: &mut EditorContext,
        data: &SymbolClipboardData,
        offset: Point,
        fixed: bool,
    ) -> Result<bool> {
        let cmd = CmdPasteSymbolItems::new(
            ctx.symbol.clone(),
            data,
            offset,
            ctx.settings.paste_name_retry_limit,
        )?;
        let pasted = cmd.pasted_items();
        if !ctx.undo_stack.append_to_group(Box::new(cmd))? {
            return Ok(false);
        }
        ctx.update_scene();
        ctx.scene.select_only(&pasted);
        if fixed {
            ctx.undo_stack.commit_group()?;
            self.sub_state = SubState::Idle;
            ctx.scene.clear_selection();
        } else {
            self.drag_cmd = Some(CmdDragSelectedSymbolItems::new(
                ctx.symbol.clone(),
                &pasted,
                ctx.grid_interval(),
            )?);
        }
        Ok(true)
    }

    fn pasted_or_report(&mut self, ctx: &mut EditorContext, result: Result<bool>) -> bool {
        match result {
            Ok(pasted) => pasted,
            Err(e) => {
                ctx.report_error(&e);
                self.process_abort_command(ctx);
                false
            }
        }
    }

    fn selection(ctx: &EditorContext) -> SelectedItems {
        ctx.scene.selected_items(&ctx.symbol.borrow())
    }

    fn find_items_at(ctx: &EditorContext, pos: Point) -> Vec<ItemRef> {
        let (small, large) = ctx.hit_tolerances();
        ctx.scene.find_items_at_pos(pos, small, large)
    }

    fn find_polygon_vertices_at(&mut self, ctx: &EditorContext, pos: Point) -> bool {
        let (tolerance, _) = ctx.hit_tolerances();
        let uuids = ctx.symbol.borrow().polygons().uuids();
        for uuid in uuids {
            let Some(item) = ctx.scene.polygon(&uuid) else {
                continue;
            };
            if !item.is_selected() {
                continue;
            }
            let vertices = item.vertex_indices_at(pos, tolerance);
            if !vertices.is_empty() {
                self.selected_polygon = Some(uuid);
                self.selected_vertices = vertices;
                return true;
            }
        }
        self.selected_polygon = None;
        self.selected_vertices.clear();
        false
    }

    fn press_idle(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        self.start_pos = e.pos;
        let items = Self::find_items_at(ctx, e.pos);
        if !ctx.read_only && self.find_polygon_vertices_at(ctx, e.pos) {
            self.sub_state = SubState::MovingPolygonVertex;
            return true;
        }
        let Some(top) = items.first().copied() else {
            ctx.scene.clear_selection();
            self.sub_state = SubState::Selecting;
            return true;
        };

        let selected = items.iter().find(|i| ctx.scene.is_selected(i)).copied();
        if e.modifiers.ctrl() {
            let item = selected.unwrap_or(top);
            let is_selected = ctx.scene.is_selected(&item);
            ctx.scene.set_selected(&item, !is_selected);
        } else if e.modifiers.shift() {
            let next = items
                .iter()
                .position(|i| ctx.scene.is_selected(i))
                .map(|i| (i + 1) % items.len())
                .unwrap_or(0);
            ctx.scene.clear_selection();
            ctx.scene.set_selected(&items[next], true);
        } else if selected.is_none() {
            ctx.scene.clear_selection();
            ctx.scene.set_selected(&top, true);
        }

        if !ctx.read_only {
            let selection = Self::selection(ctx);
            match CmdDragSelectedSymbolItems::new(ctx.symbol.clone(), &selection, ctx.grid_interval())
            {
                Ok(cmd) => {
                    self.drag_cmd = Some(cmd);
                    self.sub_state = SubState::Moving;
                }
                Err(e) => ctx.report_error(&e),
            }
        }
        true
    }

    fn finish_paste(&mut self, ctx: &mut EditorContext) -> Result<()> {
        if let Some(cmd) = self.drag_cmd.take() {
            ctx.undo_stack.append_to_group(Box::new(cmd))?;
        }
        ctx.undo_stack.commit_group()?;
        self.sub_state = SubState::Idle;
        ctx.update_scene();
        ctx.scene.clear_selection();
        Ok(())
    }

    fn move_polygon_vertices(&mut self, ctx: &mut EditorContext, pos: Point) -> bool {
        let Some(uuid) = self.selected_polygon else {
            return false;
        };
        if self.polygon_cmd.is_none() {
            match CmdPolygonEdit::new(ctx.symbol.clone(), uuid) {
                Ok(cmd) => self.polygon_cmd = Some(cmd),
                Err(e) => {
                    ctx.report_error(&e);
                    return false;
                }
            }
        }
        let Some(cmd) = self.polygon_cmd.as_mut() else {
            return false;
        };
        let mut path = cmd.new_value().path().clone();
        let snapped = pos.mapped_to_grid(ctx.grid_interval());
        for &i in &self.selected_vertices {
            if let Some(vertex) = path.vertices_mut().get_mut(i) {
                vertex.pos = snapped;
            }
        }
        cmd.set_path(path, true);
        true
    }

    fn copy_selected_items(&mut self, ctx: &mut EditorContext) -> Result<bool> {
        let selection = Self::selection(ctx);
        let data = SymbolClipboardData::from_selection(
            &ctx.symbol.borrow(),
            &selection,
            ctx.cursor_pos(),
        );
        if data.is_empty() {
            return Ok(false);
        }
        ctx.clipboard.store(data.to_payload()?)?;
        ctx.ui.set_status_message("Copied to clipboard!");
        Ok(true)
    }

    fn remove_selected_items(&mut self, ctx: &mut EditorContext) -> Result<bool> {
        let selection = Self::selection(ctx);
        if selection.is_empty() {
            return Ok(false);
        }
        let cmd = CmdRemoveSelectedSymbolItems::new(ctx.symbol.clone(), selection);
        ctx.undo_stack.execute(Box::new(cmd))
    }

    /// Transform the selection, live if a drag is in progress
    fn transform_selected_items(
        &mut self,
        ctx: &mut EditorContext,
        f: impl FnOnce(&mut CmdDragSelectedSymbolItems),
    ) -> Result<bool> {
        if let Some(cmd) = self.drag_cmd.as_mut() {
            f(cmd);
            return Ok(true);
        }
        let selection = Self::selection(ctx);
        if selection.is_empty() {
            return Ok(false);
        }
        let mut cmd =
            CmdDragSelectedSymbolItems::new(ctx.symbol.clone(), &selection, ctx.grid_interval())?;
        f(&mut cmd);
        ctx.undo_stack.execute(Box::new(cmd))?;
        Ok(true)
    }

    fn rotate_selected_items(&mut self, ctx: &mut EditorContext, angle: Angle) -> bool {
        self.transform_selected_items(ctx, |cmd| cmd.rotate(angle))
            .unwrap_or_else(|e| {
                ctx.report_error(&e);
                false
            })
    }

    fn mirror_selected_items(&mut self, ctx: &mut EditorContext, orientation: Orientation) -> bool {
        self.transform_selected_items(ctx, |cmd| cmd.mirror(orientation))
            .unwrap_or_else(|e| {
                ctx.report_error(&e);
                false
            })
    }

    fn snap_selected_items_to_grid(&mut self, ctx: &mut EditorContext) -> bool {
        let selection = Self::selection(ctx);
        if selection.is_empty() {
            return false;
        }
        let result = CmdDragSelectedSymbolItems::new(
            ctx.symbol.clone(),
            &selection,
            ctx.grid_interval(),
        )
        .and_then(|mut cmd| {
            cmd.snap_to_grid();
            ctx.undo_stack.execute(Box::new(cmd))
        });
        if let Err(e) = result {
            ctx.report_error(&e);
        }
        true
    }

    fn open_properties_dialog(&mut self, ctx: &mut EditorContext, item: ItemRef) -> bool {
        let request = {
            let symbol = ctx.symbol.borrow();
            match item.kind {
                ItemKind::Pin => symbol.pins().get(&item.uuid).cloned().map(PropertiesRequest::Pin),
                ItemKind::Circle => symbol
                    .circles()
                    .get(&item.uuid)
                    .cloned()
                    .map(PropertiesRequest::Circle),
                ItemKind::Polygon => symbol
                    .polygons()
                    .get(&item.uuid)
                    .cloned()
                    .map(PropertiesRequest::Polygon),
                ItemKind::Text => symbol
                    .texts()
                    .get(&item.uuid)
                    .cloned()
                    .map(PropertiesRequest::Text),
            }
        };
        let Some(request) = request else {
            return false;
        };
        let read_only = ctx.read_only;
        let Some(edited) = ctx.ui.edit_properties(&request, read_only) else {
            return true;
        };
        if !read_only {
            if let Err(e) = apply_properties(ctx, edited) {
                ctx.report_error(&e);
            }
        }
        true
    }

    fn open_properties_dialog_at(&mut self, ctx: &mut EditorContext, pos: Point) -> bool {
        let items = Self::find_items_at(ctx, pos);
        match items.into_iter().find(|i| ctx.scene.is_selected(i)) {
            Some(item) => self.open_properties_dialog(ctx, item),
            None => false,
        }
    }

    fn open_context_menu_at(&mut self, ctx: &mut EditorContext, pos: Point) -> bool {
        let items = Self::find_items_at(ctx, pos);
        if items.is_empty() {
            return false;
        }
        let item = match items.iter().rev().find(|i| ctx.scene.is_selected(i)) {
            Some(item) => *item,
            None => {
                ctx.scene.clear_selection();
                ctx.scene.set_selected(&items[0], true);
                items[0]
            }
        };
        let features = self.available_features(ctx);
        let read_only = ctx.read_only;

        let mut menu = ContextMenu::default();
        menu.add(ContextMenuAction::Properties, features.contains(Features::PROPERTIES));
        let mut vertices = Vec::new();
        let mut line_index = None;
        if item.kind == ItemKind::Polygon {
            if let Some(polygon) = ctx.scene.polygon(&item.uuid) {
                let (tolerance, _) = ctx.hit_tolerances();
                vertices = polygon.vertex_indices_at(pos, tolerance);
                line_index = polygon.line_index_at(pos, tolerance);
                if !vertices.is_empty() {
                    let remaining = polygon.path().len().saturating_sub(vertices.len());
                    menu.add(ContextMenuAction::RemoveVertex, remaining >= 2 && !read_only);
                }
                if line_index.is_some() {
                    menu.add(ContextMenuAction::AddVertex, !read_only);
                }
            }
        }
        menu.add(ContextMenuAction::Cut, features.contains(Features::CUT));
        menu.add(ContextMenuAction::Copy, features.contains(Features::COPY));
        menu.add(ContextMenuAction::Remove, features.contains(Features::REMOVE));
        menu.add(ContextMenuAction::RotateCcw, features.contains(Features::ROTATE));
        menu.add(ContextMenuAction::RotateCw, features.contains(Features::ROTATE));
        menu.add(ContextMenuAction::MirrorHorizontal, features.contains(Features::MIRROR));
        menu.add(ContextMenuAction::MirrorVertical, features.contains(Features::MIRROR));
        menu.add(ContextMenuAction::SnapToGrid, features.contains(Features::SNAP_TO_GRID));

        let Some(action) = ctx.ui.exec_context_menu(&menu) else {
            return true;
        };
        tracing::debug!(?action, "context menu action");
        match action {
            ContextMenuAction::Properties => {
                self.process_edit_properties(ctx);
            }
            ContextMenuAction::RemoveVertex => {
                if let Err(e) = remove_polygon_vertices(ctx, item.uuid, &vertices) {
                    ctx.report_error(&e);
                }
            }
            ContextMenuAction::AddVertex => {
                if let Some(line) = line_index {
                    if let Err(e) = self.start_adding_polygon_vertex(ctx, item.uuid, line + 1, pos) {
                        ctx.report_error(&e);
                    }
                }
            }
            ContextMenuAction::Cut => {
                self.process_cut(ctx);
            }
            ContextMenuAction::Copy => {
                self.process_copy(ctx);
            }
            ContextMenuAction::Remove => {
                self.process_remove(ctx);
            }
            ContextMenuAction::RotateCcw => {
                self.rotate_selected_items(ctx, Angle::DEG_90);
            }
            ContextMenuAction::RotateCw => {
                self.rotate_selected_items(ctx, -Angle::DEG_90);
            }
            ContextMenuAction::MirrorHorizontal => {
                self.mirror_selected_items(ctx, Orientation::Horizontal);
            }
            ContextMenuAction::MirrorVertical => {
                self.mirror_selected_items(ctx, Orientation::Vertical);
            }
            ContextMenuAction::SnapToGrid => {
                self.snap_selected_items_to_grid(ctx);
            }
        }
        true
    }

    /// Insert a vertex before `vertex` and start dragging it
    pub(crate) fn start_adding_polygon_vertex(
        &mut self,
        ctx: &mut EditorContext,
        polygon: Uuid,
        vertex: usize,
        pos: Point,
    ) -> Result<()> {
        let mut cmd = CmdPolygonEdit::new(ctx.symbol.clone(), polygon)?;
        let mut path = cmd.old_value().path().clone();
        let angle = vertex
            .checked_sub(1)
            .and_then(|i| path.vertices().get(i))
            .map(|v| v.angle)
            .unwrap_or_default();
        path.insert_vertex(vertex, Vertex::new(pos.mapped_to_grid(ctx.grid_interval()), angle));
        cmd.set_path(path, true);
        self.polygon_cmd = Some(cmd);
        self.selected_polygon = Some(polygon);
        self.selected_vertices = vec![vertex];
        self.start_pos = pos;
        self.sub_state = SubState::MovingPolygonVertex;
        Ok(())
    }
}

/// Path of a polygon after removing `vertices`, `None` if it would degenerate
///
/// A closed path stays closed as long as more than two vertices remain; a
/// closed path of three vertices would be a line drawn twice, so the closing
/// vertex is dropped.
pub fn path_without_vertices(path: &Path, vertices: &[usize]) -> Option<Path> {
    let mut result = Path::from_vertices(
        path.vertices()
            .iter()
            .enumerate()
            .filter(|(i, _)| !vertices.contains(i))
            .map(|(_, v)| *v)
            .collect(),
    );
    if path.is_closed() && result.len() > 2 {
        result.close();
    }
    if result.is_closed() && result.len() == 3 {
        result.vertices_mut().pop();
    }
    (result.len() >= 2).then_some(result)
}

fn remove_polygon_vertices(ctx: &mut EditorContext, polygon: Uuid, vertices: &[usize]) -> Result<()> {
    let mut cmd = CmdPolygonEdit::new(ctx.symbol.clone(), polygon)?;
    let Some(path) = path_without_vertices(cmd.old_value().path(), vertices) else {
        tracing::debug!("refusing to remove polygon vertices, too few would remain");
        return Ok(());
    };
    cmd.set_path(path, false);
    ctx.undo_stack.execute(Box::new(cmd))?;
    Ok(())
}

fn apply_properties(ctx: &mut EditorContext, edited: PropertiesRequest) -> Result<bool> {
    let symbol = ctx.symbol.clone();
    match edited {
        PropertiesRequest::Pin(value) => {
            let mut cmd = CmdPinEdit::new(symbol, value.uuid())?;
            cmd.update(false, |pin| {
                pin.assign(&value);
            });
            ctx.undo_stack.execute(Box::new(cmd))
        }
        PropertiesRequest::Circle(value) => {
            let mut cmd = CmdCircleEdit::new(symbol, value.uuid())?;
            cmd.update(false, |circle| {
                circle.assign(&value);
            });
            ctx.undo_stack.execute(Box::new(cmd))
        }
        PropertiesRequest::Polygon(value) => {
            let mut cmd = CmdPolygonEdit::new(symbol, value.uuid())?;
            cmd.update(false, |polygon| {
                polygon.assign(&value);
            });
            ctx.undo_stack.execute(Box::new(cmd))
        }
        PropertiesRequest::Text(value) => {
            let mut cmd = CmdTextEdit::new(symbol, value.uuid())?;
            cmd.update(false, |text| {
                text.assign(&value);
            });
            ctx.undo_stack.execute(Box::new(cmd))
        }
    }
}

impl EditorState for SelectState {
    fn tool(&self) -> Tool {
        Tool::Select
    }

    fn exit(&mut self, ctx: &mut EditorContext) -> bool {
        self.process_abort_command(ctx);
        // Other tools must not act on a stale selection
        ctx.scene.set_selection_rect(None);
        ctx.scene.clear_selection();
        true
    }

    fn is_busy(&self) -> bool {
        !matches!(self.sub_state, SubState::Idle | SubState::Selecting)
    }

    fn available_features(&self, ctx: &mut EditorContext) -> Features {
        let mut features = Features::empty();
        if self.sub_state != SubState::Pasting {
            features |= Features::SELECT;
            if !ctx.read_only && ctx.has_clipboard_data() {
                features |= Features::PASTE;
            }
        }
        let selection = Self::selection(ctx);
        if !selection.is_empty() {
            features |= Features::COPY | Features::PROPERTIES;
            if !ctx.read_only {
                features |= Features::CUT | Features::REMOVE | Features::ROTATE | Features::MIRROR;
                let off_grid = CmdDragSelectedSymbolItems::new(
                    ctx.symbol.clone(),
                    &selection,
                    ctx.grid_interval(),
                )
                .map(|cmd| cmd.has_off_grid_elements())
                .unwrap_or(false);
                if off_grid {
                    features |= Features::SNAP_TO_GRID;
                }
            }
        }
        features
    }

    fn process_mouse_moved(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        match self.sub_state {
            SubState::Selecting => {
                ctx.scene
                    .set_selection_rect(Some(Rect::from_points(self.start_pos, e.pos)));
                true
            }
            SubState::Moving | SubState::Pasting => {
                if self.drag_cmd.is_none() {
                    let selection = Self::selection(ctx);
                    match CmdDragSelectedSymbolItems::new(
                        ctx.symbol.clone(),
                        &selection,
                        ctx.grid_interval(),
                    ) {
                        Ok(cmd) => self.drag_cmd = Some(cmd),
                        Err(err) => {
                            ctx.report_error(&err);
                            return false;
                        }
                    }
                }
                let delta = (e.pos - self.start_pos).mapped_to_grid(ctx.grid_interval());
                if let Some(cmd) = self.drag_cmd.as_mut() {
                    cmd.set_delta_to_start_pos(delta);
                }
                true
            }
            SubState::MovingPolygonVertex => self.move_polygon_vertices(ctx, e.pos),
            SubState::Idle => false,
        }
    }

    fn process_left_button_pressed(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        match self.sub_state {
            SubState::Idle => self.press_idle(ctx, e),
            SubState::Pasting => {
                if let Err(err) = self.finish_paste(ctx) {
                    ctx.report_error(&err);
                }
                true
            }
            _ => false,
        }
    }

    fn process_left_button_released(&mut self, ctx: &mut EditorContext, _e: &MouseEvent) -> bool {
        match self.sub_state {
            SubState::Selecting => {
                ctx.scene.set_selection_rect(None);
                self.sub_state = SubState::Idle;
                true
            }
            SubState::Moving => {
                if let Some(cmd) = self.drag_cmd.take() {
                    if let Err(err) = ctx.undo_stack.execute(Box::new(cmd)) {
                        ctx.report_error(&err);
                    }
                }
                self.sub_state = SubState::Idle;
                true
            }
            SubState::MovingPolygonVertex => {
                if let Some(cmd) = self.polygon_cmd.take() {
                    if let Err(err) = ctx.undo_stack.execute(Box::new(cmd)) {
                        ctx.report_error(&err);
                    }
                }
                self.selected_polygon = None;
                self.selected_vertices.clear();
                self.sub_state = SubState::Idle;
                true
            }
            _ => false,
        }
    }

    fn process_left_button_double_clicked(
        &mut self,
        ctx: &mut EditorContext,
        e: &MouseEvent,
    ) -> bool {
        // With modifiers the user is still changing the selection
        if e.modifiers.shift() || e.modifiers.ctrl() {
            return self.process_left_button_pressed(ctx, e);
        }
        if self.sub_state == SubState::Idle {
            self.open_properties_dialog_at(ctx, e.pos)
        } else {
            false
        }
    }

    fn process_right_button_released(&mut self, ctx: &mut EditorContext, e: &MouseEvent) -> bool {
        match self.sub_state {
            SubState::Idle => self.open_context_menu_at(ctx, e.pos),
            SubState::Moving | SubState::Pasting => self.rotate_selected_items(ctx, Angle::DEG_90),
            _ => false,
        }
    }

    fn process_select_all(&mut self, ctx: &mut EditorContext) -> bool {
        if self.sub_state != SubState::Idle {
            return false;
        }
        ctx.scene.select_all();
        true
    }

    fn process_cut(&mut self, ctx: &mut EditorContext) -> bool {
        if self.sub_state != SubState::Idle {
            return false;
        }
        match self
            .copy_selected_items(ctx)
            .and_then(|copied| if copied { self.remove_selected_items(ctx) } else { Ok(false) })
        {
            Ok(done) => done,
            Err(e) => {
                ctx.report_error(&e);
                false
            }
        }
    }

    fn process_copy(&mut self, ctx: &mut EditorContext) -> bool {
        if self.sub_state != SubState::Idle {
            return false;
        }
        match self.copy_selected_items(ctx) {
            Ok(copied) => copied,
            Err(e) => {
                ctx.report_error(&e);
                false
            }
        }
    }

    fn process_paste(&mut self, ctx: &mut EditorContext) -> bool {
        if self.sub_state != SubState::Idle || ctx.read_only {
            return false;
        }
        let result = ctx.clipboard_data().and_then(|data| match data {
            Some(data) => self.start_paste(ctx, &data, None),
            None => Ok(false),
        });
        self.pasted_or_report(ctx, result)
    }

    fn process_paste_data(
        &mut self,
        ctx: &mut EditorContext,
        data: &SymbolClipboardData,
        position: Option<Point>,
    ) -> bool {
        if self.sub_state != SubState::Idle || ctx.read_only {
            return false;
        }
        let result = self.start_paste(ctx, data, position);
        self.pasted_or_report(ctx, result)
    }

    fn process_move(&mut self, ctx: &mut EditorContext, delta: Point) -> bool {
        if self.sub_state != SubState::Idle {
            return false;
        }
        let selection = Self::selection(ctx);
        if selection.is_empty() {
            return false;
        }
        let result =
            CmdDragSelectedSymbolItems::new(ctx.symbol.clone(), &selection, ctx.grid_interval())
                .and_then(|mut cmd| {
                    cmd.translate(delta);
                    ctx.undo_stack.execute(Box::new(cmd))
                });
        match result {
            Ok(_) => true,
            Err(e) => {
                ctx.report_error(&e);
                false
            }
        }
    }

    fn process_rotate(&mut self, ctx: &mut EditorContext, rotation: Angle) -> bool {
        match self.sub_state {
            SubState::Idle | SubState::Moving | SubState::Pasting => {
                self.rotate_selected_items(ctx, rotation)
            }
            _ => false,
        }
    }

    fn process_mirror(&mut self, ctx: &mut EditorContext, orientation: Orientation) -> bool {
        match self.sub_state {
            SubState::Idle | SubState::Moving | SubState::Pasting => {
                self.mirror_selected_items(ctx, orientation)
            }
            _ => false,
        }
    }

    fn process_snap_to_grid(&mut self, ctx: &mut EditorContext) -> bool {
        match self.sub_state {
            SubState::Idle => self.snap_selected_items_to_grid(ctx),
            SubState::Moving | SubState::Pasting => {
                if let Some(cmd) = self.drag_cmd.as_mut() {
                    cmd.snap_to_grid();
                    true
                } else {
                    self.snap_selected_items_to_grid(ctx)
                }
            }
            _ => false,
        }
    }

    fn process_remove(&mut self, ctx: &mut EditorContext) -> bool {
        if self.sub_state != SubState::Idle {
            return false;
        }
        match self.remove_selected_items(ctx) {
            Ok(removed) => removed,
            Err(e) => {
                ctx.report_error(&e);
                false
            }
        }
    }

    fn process_edit_properties(&mut self, ctx: &mut EditorContext) -> bool {
        if self.sub_state != SubState::Idle {
            return false;
        }
        let selection = Self::selection(ctx);
        let first = selection
            .pins
            .first()
            .map(|u| ItemRef::new(ItemKind::Pin, *u))
            .or_else(|| selection.circles.first().map(|u| ItemRef::new(ItemKind::Circle, *u)))
            .or_else(|| selection.polygons.first().map(|u| ItemRef::new(ItemKind::Polygon, *u)))
            .or_else(|| selection.texts.first().map(|u| ItemRef::new(ItemKind::Text, *u)));
        match first {
            Some(item) => self.open_properties_dialog(ctx, item),
            None => false,
        }
    }

    fn process_abort_command(&mut self, ctx: &mut EditorContext) -> bool {
        match self.sub_state {
            SubState::Moving => {
                self.drag_cmd = None;
                self.sub_state = SubState::Idle;
                true
            }
            SubState::MovingPolygonVertex => {
                self.polygon_cmd = None;
                self.selected_polygon = None;
                self.selected_vertices.clear();
                self.sub_state = SubState::Idle;
                true
            }
            SubState::Pasting => {
                self.drag_cmd = None;
                let result = ctx.undo_stack.abort_group();
                self.sub_state = SubState::Idle;
                match result {
                    Ok(()) => true,
                    Err(e) => {
                        ctx.report_error(&e);
                        false
                    }
                }
            }
            SubState::Idle | SubState::Selecting => {
                ctx.scene.set_selection_rect(None);
                ctx.scene.clear_selection();
                self.sub_state = SubState::Idle;
                true
            }
        }
    }

    fn process_grid_interval_changed(
        &mut self,
        _ctx: &mut EditorContext,
        _interval: PositiveLength,
    ) -> bool {
        true
    }
}
