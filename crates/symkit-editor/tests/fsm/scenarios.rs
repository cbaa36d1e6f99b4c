use super::common::*;
use std::collections::HashSet;
use symkit_core::{Angle, Point};
use symkit_editor::fsm::Tool;
use symkit_editor::{Entity, Symbol};

#[test]
fn test_draw_circle_by_dragging() {
    let mut ed = editor();
    assert!(ed.fsm.request_tool(Tool::DrawCircle));

    ed.fsm.process_left_button_pressed(&at(mm(0.0, 0.0)));
    ed.fsm.process_mouse_moved(&at(mm(10.0, 0.0)));
    ed.fsm.process_left_button_released(&at(mm(10.0, 0.0)));

    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.circles().len(), 1);
    let circle = symbol.circles().at(0).unwrap();
    assert_eq!(circle.center(), Point::ORIGIN);
    assert_eq!(circle.diameter().get().to_nm(), 20_000_000);

    let ctx = ed.fsm.context();
    assert_eq!(ctx.undo_stack.len(), 1);
    assert_eq!(ctx.undo_stack.undo_text(), Some("Add symbol circle"));
    assert!(!ctx.undo_stack.is_group_active());
    let item = ctx.scene.circle(&circle.uuid()).unwrap();
    assert!(!item.is_selected());
}

#[test]
fn test_circle_of_zero_radius_is_discarded() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawCircle);

    ed.fsm.process_left_button_pressed(&at(mm(1.0, 1.0)));
    ed.fsm.process_left_button_released(&at(mm(1.0, 1.0)));

    assert!(ed.symbol.borrow().circles().is_empty());
    assert!(ed.fsm.context().undo_stack.is_empty());
    assert!(!ed.fsm.context().undo_stack.is_group_active());
    assert_eq!(ed.fsm.context().scene.item_count(), 0);
}

#[test]
fn test_abort_drag_restores_positions() {
    let p1 = pin("1", mm(0.0, 0.0));
    let p2 = pin("2", mm(10.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone(), p2.clone()]));

    assert!(ed.fsm.process_select_all());
    ed.fsm.process_mouse_moved(&at(mm(0.0, 0.0)));
    ed.fsm.process_left_button_pressed(&at(mm(0.0, 0.0)));
    ed.fsm.process_mouse_moved(&at(mm(5.0, 0.0)));
    {
        let symbol = ed.symbol.borrow();
        assert_eq!(symbol.pins().get(&p1.uuid()).unwrap().position(), mm(5.0, 0.0));
        assert_eq!(symbol.pins().get(&p2.uuid()).unwrap().position(), mm(15.0, 0.0));
    }

    assert!(ed.fsm.process_abort_command());

    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.pins().get(&p1.uuid()).unwrap().position(), mm(0.0, 0.0));
    assert_eq!(symbol.pins().get(&p2.uuid()).unwrap().position(), mm(10.0, 0.0));
    assert!(ed.fsm.context().undo_stack.is_empty());
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
}

#[test]
fn test_drag_records_one_command() {
    let p1 = pin("1", mm(0.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));

    drag(&mut ed.fsm, mm(0.0, 0.0), mm(2.0, 3.0));

    assert_eq!(
        ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().position(),
        mm(2.0, 3.0)
    );
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);
    ed.fsm.undo().unwrap();
    assert_eq!(
        ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().position(),
        mm(0.0, 0.0)
    );
}

#[test]
fn test_undo_during_drag_keeps_history() {
    let p1 = pin("1", mm(0.0, 0.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    drag(&mut ed.fsm, mm(0.0, 0.0), mm(10.0, 0.0));

    ed.fsm.process_mouse_moved(&at(mm(10.0, 0.0)));
    ed.fsm.process_left_button_pressed(&at(mm(10.0, 0.0)));
    ed.fsm.process_mouse_moved(&at(mm(15.0, 0.0)));
    ed.fsm.undo().unwrap();
    ed.fsm.process_left_button_released(&at(mm(15.0, 0.0)));

    let position = |ed: &Editor| ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().position();
    assert_eq!(position(&ed), mm(0.0, 0.0));
    assert!(!ed.fsm.context().undo_stack.can_undo());
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);

    ed.fsm.redo().unwrap();
    assert_eq!(position(&ed), mm(10.0, 0.0));
}

#[test]
fn test_undo_during_vertex_drag_keeps_history() {
    let mut symbol = Symbol::new("Test");
    add_polygon(&mut symbol, square(mm(0.0, 0.0), 10.0));
    let mut ed = editor_with(symbol);
    let uuid = ed.symbol.borrow().polygons().at(0).unwrap().uuid();
    let original = ed.symbol.borrow().polygons().at(0).unwrap().path().clone();
    click(&mut ed.fsm, mm(0.0, 5.0));
    drag(&mut ed.fsm, mm(10.0, 0.0), mm(12.0, 0.0));
    click(&mut ed.fsm, mm(0.0, 5.0));

    ed.fsm.process_mouse_moved(&at(mm(12.0, 0.0)));
    ed.fsm.process_left_button_pressed(&at(mm(12.0, 0.0)));
    ed.fsm.process_mouse_moved(&at(mm(14.0, 0.0)));
    ed.fsm.undo().unwrap();
    ed.fsm.process_left_button_released(&at(mm(14.0, 0.0)));

    assert_eq!(ed.symbol.borrow().polygons().get(&uuid).unwrap().path(), &original);
    assert!(!ed.fsm.context().undo_stack.can_undo());
    assert!(ed.fsm.context().undo_stack.can_redo());
}

#[test]
fn test_rotate_twice_then_undo_twice() {
    let p1 = pin("1", mm(1.0, 1.0));
    let mut ed = editor_with(symbol_with_pins(&[p1.clone()]));
    click(&mut ed.fsm, mm(1.0, 1.0));

    assert!(ed.fsm.process_rotate(Angle::DEG_90));
    assert!(ed.fsm.process_rotate(Angle::DEG_90));
    {
        let symbol = ed.symbol.borrow();
        let rotated = symbol.pins().get(&p1.uuid()).unwrap();
        assert_eq!(rotated.rotation(), Angle::DEG_180);
        assert_eq!(rotated.position(), mm(1.0, 1.0));
    }
    assert_eq!(ed.fsm.context().undo_stack.len(), 2);

    ed.fsm.undo().unwrap();
    ed.fsm.undo().unwrap();
    assert_eq!(
        ed.symbol.borrow().pins().get(&p1.uuid()).unwrap().rotation(),
        Angle::DEG_0
    );
    assert!(ed.fsm.context().undo_stack.can_redo());
}

#[test]
fn test_add_pins_numbers_pins_and_abort_drops_the_pending_pin() {
    let mut ed = editor();
    assert!(ed.fsm.request_tool(Tool::AddPins));
    assert_eq!(ed.symbol.borrow().pins().len(), 1);
    assert_eq!(ed.symbol.borrow().pins().at(0).unwrap().name(), "1");

    ed.fsm.process_mouse_moved(&at(mm(5.0, 0.0)));
    ed.fsm.process_left_button_pressed(&at(mm(5.0, 0.0)));
    {
        let symbol = ed.symbol.borrow();
        assert_eq!(symbol.pins().len(), 2);
        assert_eq!(symbol.pins().at(0).unwrap().position(), mm(5.0, 0.0));
        assert_eq!(symbol.pins().at(1).unwrap().name(), "2");
    }

    assert!(ed.fsm.process_abort_command());
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.pins().len(), 1);
    assert_eq!(symbol.pins().at(0).unwrap().name(), "1");
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);
    assert!(!ed.fsm.context().undo_stack.is_group_active());
}

#[test]
fn test_copy_paste_twice_creates_distinct_polygons() {
    let mut symbol = Symbol::new("Test");
    add_polygon(&mut symbol, square(mm(0.0, 0.0), 10.0));
    let original = symbol.polygons().at(0).unwrap().uuid();
    let mut ed = editor_with(symbol);

    click(&mut ed.fsm, mm(0.0, 5.0));
    assert!(ed.fsm.process_copy());
    assert_eq!(ed.ui.borrow().status_message, "Copied to clipboard!");

    for offset in [20.0, 40.0] {
        assert!(ed.fsm.process_paste());
        ed.fsm.process_mouse_moved(&at(mm(offset, 5.0)));
        ed.fsm.process_left_button_pressed(&at(mm(offset, 5.0)));
        ed.fsm.process_left_button_released(&at(mm(offset, 5.0)));
    }

    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.polygons().len(), 3);
    let uuids: HashSet<_> = symbol.polygons().uuids().into_iter().collect();
    assert_eq!(uuids.len(), 3);
    assert!(uuids.contains(&original));
    let first_vertices: Vec<_> = symbol
        .polygons()
        .iter()
        .map(|p| p.path().vertices()[0].pos)
        .collect();
    assert_eq!(
        first_vertices,
        vec![mm(0.0, 0.0), mm(20.0, 0.0), mm(40.0, 0.0)]
    );
    assert_eq!(ed.fsm.context().undo_stack.len(), 2);
    assert_eq!(
        ed.fsm.context().undo_stack.undo_text(),
        Some("Paste Symbol Elements")
    );
}

#[test]
fn test_undo_during_paste_aborts_it() {
    let mut symbol = Symbol::new("Test");
    add_polygon(&mut symbol, square(mm(0.0, 0.0), 10.0));
    let mut ed = editor_with(symbol);
    click(&mut ed.fsm, mm(0.0, 5.0));
    ed.fsm.process_copy();

    assert!(ed.fsm.process_paste());
    assert_eq!(ed.symbol.borrow().polygons().len(), 2);
    assert!(ed.fsm.context().undo_stack.is_group_active());

    ed.fsm.undo().unwrap();
    assert_eq!(ed.symbol.borrow().polygons().len(), 1);
    assert!(!ed.fsm.context().undo_stack.is_group_active());
}
