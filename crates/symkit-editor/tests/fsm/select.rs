use super::common::*;
use symkit_core::{Angle, Orientation, Point};
use symkit_editor::clipboard::{SymbolClipboardData, SYMBOL_CLIPBOARD_MIME};
use symkit_editor::fsm::{
    ContextMenuAction, Features, Modifiers, MouseEvent, PropertiesRequest, Tool,
};
use symkit_editor::{Entity, Symbol};
use uuid::Uuid;

fn square_symbol() -> Symbol {
    let mut symbol = Symbol::new("Test");
    add_polygon(&mut symbol, square(mm(0.0, 0.0), 10.0));
    symbol
}

#[test]
fn test_rectangle_selection() {
    let mut symbol = symbol_with_pins(&[pin("1", mm(0.0, 0.0)), pin("2", mm(10.0, 0.0))]);
    add_circle(&mut symbol, circle(mm(20.0, 20.0), 2.0));
    let mut ed = editor_with(symbol);

    ed.fsm.process_left_button_pressed(&at(mm(-3.0, -3.0)));
    ed.fsm.process_mouse_moved(&at(mm(13.0, 1.0)));
    assert!(ed.fsm.context().scene.selection_rect().is_some());
    assert_eq!(ed.fsm.context().scene.selected_count(), 2);
    ed.fsm.process_left_button_released(&at(mm(13.0, 1.0)));

    let ctx = ed.fsm.context();
    assert!(ctx.scene.selection_rect().is_none());
    let selection = ctx.scene.selected_items(&ed.symbol.borrow());
    assert_eq!(selection.pins.len(), 2);
    assert!(selection.circles.is_empty());
}

#[test]
fn test_pressing_empty_space_clears_selection() {
    let mut ed = editor_with(symbol_with_pins(&[pin("1", mm(0.0, 0.0))]));
    ed.fsm.process_select_all();
    assert_eq!(ed.fsm.context().scene.selected_count(), 1);

    click(&mut ed.fsm, mm(50.0, 50.0));
    assert_eq!(ed.fsm.context().scene.selected_count(), 0);
}

#[test]
fn test_ctrl_click_toggles_selection() {
    let p1 = pin("1", mm(0.0, 0.0));
    let p2 = pin("2", mm(0.0, 10.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone(), p2.clone()]));
    let ctrl = |pos: Point| MouseEvent::new(pos).with_modifiers(Modifiers::CTRL);

    click(&mut ed.fsm, mm(0.0, 0.0));
    ed.fsm.process_left_button_pressed(&ctrl(mm(0.0, 10.0)));
    ed.fsm.process_left_button_released(&ctrl(mm(0.0, 10.0)));
    assert_eq!(ed.fsm.context().scene.selected_count(), 2);

    ed.fsm.process_left_button_pressed(&ctrl(mm(0.0, 0.0)));
    ed.fsm.process_left_button_released(&ctrl(mm(0.0, 0.0)));
    let selection = ed.fsm.context().scene.selected_items(&ed.symbol.borrow());
    assert_eq!(selection.pins, vec![p2.uuid()]);
}

#[test]
fn test_features_follow_selection() {
    let mut ed = editor_with(symbol_with_pins(&[pin("1", mm(0.0, 0.0))]));
    let features = ed.fsm.available_features();
    assert!(features.contains(Features::SELECT));
    assert!(!features.contains(Features::PASTE));
    assert!(!features.contains(Features::COPY));

    ed.fsm.process_select_all();
    let features = ed.fsm.available_features();
    assert!(features.contains(
        Features::COPY
            | Features::CUT
            | Features::REMOVE
            | Features::ROTATE
            | Features::MIRROR
            | Features::PROPERTIES
    ));
    assert!(!features.contains(Features::SNAP_TO_GRID));

    ed.fsm.process_copy();
    assert!(ed.fsm.available_features().contains(Features::PASTE));
}

#[test]
fn test_snap_to_grid_for_off_grid_pin() {
    let p1 = pin("1", Point::from_nm(60_000, 1_020_000));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    ed.fsm.process_select_all();
    assert!(ed.fsm.available_features().contains(Features::SNAP_TO_GRID));

    assert!(ed.fsm.process_snap_to_grid());
    let position = ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().position();
    assert_eq!(position, Point::from_nm(100_000, 1_000_000));
    assert!(!ed.fsm.available_features().contains(Features::SNAP_TO_GRID));
}

#[test]
fn test_move_and_mirror_selection() {
    let p1 = pin("1", mm(1.0, 1.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    ed.fsm.process_select_all();

    assert!(ed.fsm.process_move(mm(0.0, 2.5)));
    assert!(ed.fsm.process_mirror(Orientation::Horizontal));
    let symbol = ed.symbol.borrow();
    let moved = symbol.pins().get(&p1.uuid()).unwrap();
    assert_eq!(moved.position(), mm(1.0, 3.5));
    assert_eq!(moved.rotation(), Angle::DEG_180);
    assert_eq!(ed.fsm.context().undo_stack.len(), 2);
}

#[test]
fn test_remove_selection_and_undo() {
    let mut symbol = square_symbol();
    add_circle(&mut symbol, circle(mm(20.0, 20.0), 2.0));
    let mut ed = editor_with(symbol);
    ed.fsm.process_select_all();

    assert!(ed.fsm.process_remove());
    assert!(ed.symbol.borrow().is_empty());
    assert_eq!(ed.fsm.context().scene.item_count(), 0);

    ed.fsm.undo().unwrap();
    assert_eq!(ed.symbol.borrow().polygons().len(), 1);
    assert_eq!(ed.symbol.borrow().circles().len(), 1);
    assert_eq!(ed.fsm.context().scene.item_count(), 2);
}

#[test]
fn test_cut_stores_clipboard_and_removes() {
    let mut ed = editor_with(symbol_with_pins(&[pin("1", mm(0.0, 0.0))]));
    ed.fsm.process_select_all();

    assert!(ed.fsm.process_cut());
    assert!(ed.symbol.borrow().pins().is_empty());
    let clipboard = ed.clipboard.borrow();
    let payload = clipboard.content().unwrap();
    assert_eq!(payload.mime_type, SYMBOL_CLIPBOARD_MIME);
}

#[test]
fn test_paste_keeps_pin_names_unique() {
    let mut ed = editor_with(symbol_with_pins(&[pin("A1", mm(0.0, 0.0))]));
    ed.fsm.process_select_all();
    ed.fsm.process_copy();

    assert!(ed.fsm.process_paste());
    click(&mut ed.fsm, mm(5.0, 0.0));

    let symbol = ed.symbol.borrow();
    let names: Vec<_> = symbol.pins().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, vec!["A1", "A2"]);
}

#[test]
fn test_paste_from_drawing_tool_switches_to_select() {
    let mut ed = editor_with(square_symbol());
    click(&mut ed.fsm, mm(0.0, 5.0));
    ed.fsm.process_copy();

    ed.fsm.request_tool(Tool::DrawCircle);
    assert!(ed.fsm.process_paste());
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
    assert!(ed.fsm.context().undo_stack.is_group_active());

    assert!(ed.fsm.process_abort_command());
    assert!(!ed.fsm.context().undo_stack.is_group_active());
    assert_eq!(ed.symbol.borrow().polygons().len(), 1);
}

#[test]
fn test_paste_at_fixed_position_commits_at_once() {
    let mut data = SymbolClipboardData::new(Uuid::new_v4(), mm(50.0, 50.0));
    data.pins.push(pin("1", mm(0.0, 0.0)));
    data.circles.push(circle(mm(2.0, 0.0), 1.0));
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawCircle);

    assert!(ed.fsm.process_paste_at(&data, Some(mm(5.0, 0.0))));

    assert_eq!(ed.fsm.current_tool(), Tool::Select);
    let ctx = ed.fsm.context();
    assert_eq!(ctx.undo_stack.len(), 1);
    assert_eq!(ctx.undo_stack.undo_text(), Some("Paste Symbol Elements"));
    assert!(!ctx.undo_stack.is_group_active());
    assert_eq!(ctx.scene.selected_count(), 0);
    {
        let symbol = ed.symbol.borrow();
        assert_eq!(symbol.pins().at(0).unwrap().position(), mm(5.0, 0.0));
        assert_eq!(symbol.circles().at(0).unwrap().center(), mm(7.0, 0.0));
    }

    // Clicking afterwards places nothing more
    click(&mut ed.fsm, mm(20.0, 20.0));
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);
    assert_eq!(ed.symbol.borrow().pins().len(), 1);
}

#[test]
fn test_paste_at_without_position_follows_cursor() {
    let mut data = SymbolClipboardData::new(Uuid::new_v4(), mm(0.0, 0.0));
    data.pins.push(pin("1", mm(0.0, 0.0)));
    let mut ed = editor();
    ed.fsm.process_mouse_moved(&at(mm(3.0, 0.0)));

    assert!(ed.fsm.process_paste_at(&data, None));
    assert!(ed.fsm.context().undo_stack.is_group_active());
    click(&mut ed.fsm, mm(4.0, 1.0));

    assert!(!ed.fsm.context().undo_stack.is_group_active());
    assert_eq!(ed.symbol.borrow().pins().at(0).unwrap().position(), mm(4.0, 1.0));
}

#[test]
fn test_right_click_while_pasting_rotates() {
    let p1 = pin("1", mm(0.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    ed.fsm.process_select_all();
    ed.fsm.process_copy();
    ed.fsm.process_paste();

    ed.fsm.process_right_button_released(&at(mm(0.0, 0.0)));
    ed.fsm.process_left_button_pressed(&at(mm(0.0, 0.0)));

    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.pins().len(), 2);
    assert_eq!(symbol.pins().at(1).unwrap().rotation(), Angle::DEG_90);
    assert_eq!(symbol.pins().get(&p1.uuid()).unwrap().rotation(), Angle::DEG_0);
}

#[test]
fn test_context_menu_rotates_item() {
    let p1 = pin("1", mm(0.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    ed.ui.borrow_mut().context_menu_response = Some(ContextMenuAction::RotateCcw);

    assert!(ed.fsm.process_right_button_released(&at(mm(1.0, 0.0))));

    let menu = ed.ui.borrow().last_context_menu.clone().unwrap();
    assert!(menu.is_enabled(ContextMenuAction::Properties));
    assert!(menu.is_enabled(ContextMenuAction::Remove));
    assert!(!menu.contains(ContextMenuAction::RemoveVertex));
    assert!(!menu.is_enabled(ContextMenuAction::SnapToGrid));
    assert_eq!(
        ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().rotation(),
        Angle::DEG_90
    );
}

#[test]
fn test_right_click_on_empty_space_returns_to_previous_tool() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawCircle);
    ed.fsm.process_abort_command();
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
    assert_eq!(ed.fsm.previous_tool(), Tool::DrawCircle);

    assert!(ed.fsm.process_right_button_released(&at(mm(30.0, 30.0))));
    assert_eq!(ed.fsm.current_tool(), Tool::DrawCircle);
}

#[test]
fn test_drag_polygon_vertex() {
    let mut ed = editor_with(square_symbol());
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();
    click(&mut ed.fsm, mm(0.0, 5.0));

    drag(&mut ed.fsm, mm(10.0, 0.0), mm(12.0, 0.0));

    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().get(&uuid).unwrap().path().clone();
    assert_eq!(path.vertices()[1].pos, mm(12.0, 0.0));
    assert_eq!(path.len(), 5);
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);
    assert_eq!(ed.fsm.context().scene.polygon(&uuid).unwrap().path(), &path);
}

#[test]
fn test_abort_polygon_vertex_drag_restores_path() {
    let mut ed = editor_with(square_symbol());
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();
    let original = ed.symbol.borrow().polygons().at(0).unwrap().path().clone();
    click(&mut ed.fsm, mm(0.0, 5.0));

    ed.fsm.process_mouse_moved(&at(mm(10.0, 0.0)));
    ed.fsm.process_left_button_pressed(&at(mm(10.0, 0.0)));
    ed.fsm.process_mouse_moved(&at(mm(12.0, 0.0)));
    assert_eq!(
        ed.symbol.borrow().polygons().get(&uuid).unwrap().path().vertices()[1].pos,
        mm(12.0, 0.0)
    );

    assert!(ed.fsm.process_abort_command());
    ed.fsm.process_left_button_released(&at(mm(12.0, 0.0)));

    assert_eq!(ed.symbol.borrow().polygons().get(&uuid).unwrap().path(), &original);
    assert_eq!(ed.fsm.context().scene.polygon(&uuid).unwrap().path(), &original);
    assert!(ed.fsm.context().undo_stack.is_empty());
}

#[test]
fn test_drag_closing_vertex_keeps_path_closed() {
    let mut ed = editor_with(square_symbol());
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();
    click(&mut ed.fsm, mm(0.0, 5.0));

    drag(&mut ed.fsm, mm(0.0, 0.0), mm(-2.0, 0.0));

    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().get(&uuid).unwrap().path();
    assert!(path.is_closed());
    assert_eq!(path.vertices()[0].pos, mm(-2.0, 0.0));
}

#[test]
fn test_vertex_handles_need_selected_polygon() {
    let mut ed = editor_with(square_symbol());
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();

    // Not selected: the whole polygon is dragged
    drag(&mut ed.fsm, mm(10.0, 0.0), mm(12.0, 0.0));

    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().get(&uuid).unwrap().path();
    assert_eq!(path.vertices()[0].pos, mm(2.0, 0.0));
    assert_eq!(path.vertices()[1].pos, mm(12.0, 0.0));
}

#[test]
fn test_context_menu_removes_vertex() {
    let mut ed = editor_with(square_symbol());
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();
    ed.ui.borrow_mut().context_menu_response = Some(ContextMenuAction::RemoveVertex);

    ed.fsm.process_right_button_released(&at(mm(10.0, 0.0)));

    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().get(&uuid).unwrap().path();
    assert_eq!(path.len(), 4);
    assert!(path.is_closed());
    assert!(path.vertices().iter().all(|v| v.pos != mm(10.0, 0.0)));
}

#[test]
fn test_context_menu_adds_vertex() {
    let mut ed = editor_with(square_symbol());
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();
    ed.ui.borrow_mut().context_menu_response = Some(ContextMenuAction::AddVertex);

    ed.fsm.process_right_button_released(&at(mm(5.0, 0.0)));
    ed.fsm.process_mouse_moved(&at(mm(5.0, -2.0)));
    ed.fsm.process_left_button_pressed(&at(mm(5.0, -2.0)));
    ed.fsm.process_left_button_released(&at(mm(5.0, -2.0)));

    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().get(&uuid).unwrap().path();
    assert_eq!(path.len(), 6);
    assert_eq!(path.vertices()[1].pos, mm(5.0, -2.0));
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);
}

#[test]
fn test_double_click_edits_properties() {
    let p1 = pin("1", mm(0.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    click(&mut ed.fsm, mm(0.0, 0.0));
    let mut edited = p1.clone();
    edited.set_name("CLK");
    ed.ui.borrow_mut().properties_response = Some(PropertiesRequest::Pin(edited));

    assert!(ed.fsm.process_left_button_double_clicked(&at(mm(0.0, 0.0))));

    assert_eq!(ed.ui.borrow().properties_requests.len(), 1);
    assert_eq!(ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().name(), "CLK");
    let ctx = ed.fsm.context();
    assert_eq!(ctx.scene.pin(&p1.uuid()).unwrap().name(), "CLK");
    assert_eq!(ctx.undo_stack.len(), 1);
}

#[test]
fn test_cancelled_properties_dialog_changes_nothing() {
    let p1 = pin("1", mm(0.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    ed.fsm.process_select_all();

    assert!(ed.fsm.process_edit_properties());
    assert!(ed.fsm.context().undo_stack.is_empty());
    assert_eq!(ed.symbol.borrow().pins().get(&p1.uuid()).unwrap(), &p1);
}
