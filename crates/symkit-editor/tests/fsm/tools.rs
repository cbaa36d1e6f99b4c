use super::common::*;
use symkit_core::{Angle, Layer, Orientation, PositiveLength, UnsignedLength};
use symkit_editor::fsm::{Features, Key, KeyEvent, Modifiers, ToolProperty, Tool};
use symkit_editor::Symbol;

#[test]
fn test_every_tool_can_be_activated() {
    let mut ed = editor();
    for tool in Tool::ALL {
        assert!(ed.fsm.request_tool(tool), "{tool:?}");
        assert_eq!(ed.fsm.current_tool(), tool);
    }
    assert!(ed.fsm.request_tool(Tool::Select));
    // Pin and text tools leave nothing behind when they are left
    assert!(ed.symbol.borrow().is_empty());
    assert!(!ed.fsm.context().undo_stack.is_group_active());
}

#[test]
fn test_rect_tool_draws_closed_rectangle() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawRect);

    click(&mut ed.fsm, mm(0.0, 0.0));
    ed.fsm.process_mouse_moved(&at(mm(4.0, 3.0)));
    click(&mut ed.fsm, mm(4.0, 3.0));

    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.polygons().len(), 1);
    let polygon = symbol.polygons().at(0).unwrap();
    assert!(polygon.path().is_closed());
    let corners: Vec<_> = polygon.path().vertices().iter().map(|v| v.pos).collect();
    assert_eq!(
        corners,
        vec![mm(0.0, 0.0), mm(4.0, 0.0), mm(4.0, 3.0), mm(0.0, 3.0), mm(0.0, 0.0)]
    );
    assert_eq!(polygon.layer(), Layer::SymbolOutlines);
    assert_eq!(ed.fsm.context().undo_stack.len(), 1);
    assert_eq!(ed.fsm.context().undo_stack.undo_text(), Some("Add symbol polygon"));
    assert_eq!(ed.fsm.available_features(), Features::empty());
}

#[test]
fn test_line_tool_records_each_segment() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawLine);

    click(&mut ed.fsm, mm(0.0, 0.0));
    click(&mut ed.fsm, mm(5.0, 0.0));
    click(&mut ed.fsm, mm(5.0, 5.0));
    assert_eq!(ed.fsm.context().undo_stack.len(), 2);
    assert!(ed.fsm.available_features().contains(Features::ABORT));

    // Clicking the last point again ends the line
    click(&mut ed.fsm, mm(5.0, 5.0));
    assert!(!ed.fsm.context().undo_stack.is_group_active());
    let symbol = ed.symbol.borrow();
    let polygon = symbol.polygons().at(0).unwrap();
    let points: Vec<_> = polygon.path().vertices().iter().map(|v| v.pos).collect();
    assert_eq!(points, vec![mm(0.0, 0.0), mm(5.0, 0.0), mm(5.0, 5.0)]);
    assert!(!polygon.is_filled());
}

#[test]
fn test_polygon_tool_finishes_when_closed() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawPolygon);

    for pos in [mm(0.0, 0.0), mm(5.0, 0.0), mm(5.0, 5.0), mm(0.0, 0.0)] {
        click(&mut ed.fsm, pos);
    }

    assert!(!ed.fsm.context().undo_stack.is_group_active());
    assert_eq!(ed.fsm.available_features(), Features::empty());
    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.polygons().len(), 1);
    let path = symbol.polygons().at(0).unwrap().path();
    assert!(path.is_closed());
    assert_eq!(path.len(), 4);
}

#[test]
fn test_abort_keeps_committed_segments() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawLine);
    click(&mut ed.fsm, mm(0.0, 0.0));
    click(&mut ed.fsm, mm(5.0, 0.0));
    ed.fsm.process_mouse_moved(&at(mm(8.0, 2.0)));

    assert!(ed.fsm.process_abort_command());
    assert_eq!(ed.fsm.current_tool(), Tool::DrawLine);
    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.polygons().at(0).unwrap().path().len(), 2);

    drop(symbol);
    // Nothing running any more: the next abort leaves the tool
    assert!(ed.fsm.process_abort_command());
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
}

#[test]
fn test_right_click_aborts_drawing() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawRect);
    click(&mut ed.fsm, mm(0.0, 0.0));
    ed.fsm.process_mouse_moved(&at(mm(4.0, 3.0)));

    assert!(ed.fsm.process_right_button_released(&at(mm(4.0, 3.0))));
    assert!(ed.symbol.borrow().polygons().is_empty());
    assert_eq!(ed.fsm.current_tool(), Tool::DrawRect);
}

#[test]
fn test_polygon_segment_angle_property() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawLine);
    assert!(ed.fsm.process_tool_property(&ToolProperty::Angle(Angle::DEG_90)));

    click(&mut ed.fsm, mm(0.0, 0.0));
    click(&mut ed.fsm, mm(5.0, 0.0));
    ed.fsm.process_abort_command();

    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().at(0).unwrap().path();
    assert_eq!(path.vertices()[0].angle, Angle::DEG_90);
}

#[test]
fn test_line_width_property_applies_to_current_and_next_polygon() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawRect);
    click(&mut ed.fsm, mm(0.0, 0.0));
    let width = UnsignedLength::saturating(500_000);
    assert!(ed.fsm.process_tool_property(&ToolProperty::LineWidth(width)));
    ed.fsm.process_mouse_moved(&at(mm(2.0, 2.0)));
    click(&mut ed.fsm, mm(2.0, 2.0));

    assert_eq!(ed.symbol.borrow().polygons().at(0).unwrap().line_width(), width);
    assert_eq!(ed.fsm.context().tool_defaults.area.line_width, width);
}

#[test]
fn test_shift_disables_snapping() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawLine);
    click(&mut ed.fsm, mm(0.0, 0.0));
    let off_grid = mm(1.23, 0.04);
    ed.fsm
        .process_mouse_moved(&at(off_grid).with_modifiers(Modifiers::SHIFT));
    {
        let symbol = ed.symbol.borrow();
        let path = symbol.polygons().at(0).unwrap().path();
        assert_eq!(path.vertices()[1].pos, off_grid);
    }

    ed.fsm
        .process_key_released(&KeyEvent::new(Key::Shift, Modifiers::NONE));
    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().at(0).unwrap().path();
    assert_eq!(path.vertices()[1].pos, mm(1.2, 0.0));
}

#[test]
fn test_arc_tool_draws_quarter_arc() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawArc);

    click(&mut ed.fsm, mm(0.0, 0.0));
    click(&mut ed.fsm, mm(5.0, 0.0));
    ed.fsm.process_mouse_moved(&at(mm(0.0, 5.0)));
    click(&mut ed.fsm, mm(0.0, 5.0));

    assert!(!ed.fsm.context().undo_stack.is_group_active());
    let symbol = ed.symbol.borrow();
    let path = symbol.polygons().at(0).unwrap().path();
    assert_eq!(path.len(), 2);
    assert_eq!(path.vertices()[0].pos, mm(5.0, 0.0));
    assert_eq!(path.vertices()[0].angle, Angle::DEG_90);
    assert_eq!(path.vertices()[1].pos, mm(0.0, 5.0));
}

#[test]
fn test_circle_tool_properties() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawCircle);
    assert!(ed.fsm.process_tool_property(&ToolProperty::Filled(true)));
    assert!(!ed.fsm.process_tool_property(&ToolProperty::PinName("x".into())));

    drag(&mut ed.fsm, mm(0.0, 0.0), mm(0.0, 1.0));
    let symbol = ed.symbol.borrow();
    let circle = symbol.circles().at(0).unwrap();
    assert!(circle.is_filled());
    assert_eq!(circle.diameter(), PositiveLength::saturating(2_000_000));
}

#[test]
fn test_name_placeholder_tool() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::AddNames);
    ed.fsm.process_mouse_moved(&at(mm(0.0, 5.0)));
    ed.fsm.process_left_button_pressed(&at(mm(0.0, 5.0)));

    {
        let symbol = ed.symbol.borrow();
        assert_eq!(symbol.texts().len(), 2);
        let placed = symbol.texts().at(0).unwrap();
        assert_eq!(placed.text(), "{{NAME}}");
        assert_eq!(placed.layer(), Layer::SymbolNames);
        assert_eq!(placed.position(), mm(0.0, 5.0));
    }
    assert_eq!(ed.fsm.context().undo_stack.undo_text(), Some("Add symbol text"));

    ed.fsm.process_abort_command();
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
    assert_eq!(ed.symbol.borrow().texts().len(), 1);
}

#[test]
fn test_text_tool_remembers_rotation_and_text() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawText);
    assert!(ed.fsm.process_tool_property(&ToolProperty::Text(" Hello ".into())));
    assert!(ed.fsm.process_rotate(Angle::DEG_90));
    assert!(ed.fsm.process_mirror(Orientation::Horizontal));
    ed.fsm.process_mouse_moved(&at(mm(2.0, 2.0)));
    ed.fsm.process_left_button_pressed(&at(mm(2.0, 2.0)));

    let symbol = ed.symbol.borrow();
    let placed = symbol.texts().at(0).unwrap();
    let next = symbol.texts().at(1).unwrap();
    assert_eq!(placed.text(), "Hello");
    assert_eq!(next.text(), "Hello");
    assert_eq!(next.rotation(), placed.rotation());
    assert_eq!(next.align(), placed.align());
    assert_eq!(ed.fsm.context().tool_defaults.text.text, "Hello");
}

#[test]
fn test_text_clicked_at_its_start_is_discarded() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::DrawText);
    ed.fsm.process_left_button_pressed(&at(mm(0.0, 0.0)));

    let symbol = ed.symbol.borrow();
    assert_eq!(symbol.texts().len(), 1);
    assert!(ed.fsm.context().undo_stack.is_empty());
}

#[test]
fn test_add_pins_skips_used_names() {
    let mut ed = editor_with(symbol_with_pins(&[pin("1", mm(20.0, 0.0)), pin("2", mm(20.0, 5.0))]));
    ed.fsm.request_tool(Tool::AddPins);
    assert_eq!(ed.symbol.borrow().pins().at(2).unwrap().name(), "3");

    click(&mut ed.fsm, mm(0.0, 5.0));
    assert_eq!(ed.symbol.borrow().pins().at(3).unwrap().name(), "4");
}

#[test]
fn test_add_pins_rotation_and_length() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::AddPins);
    ed.fsm.process_right_button_released(&at(mm(0.0, 0.0)));
    let length = UnsignedLength::saturating(5_080_000);
    assert!(ed.fsm.process_tool_property(&ToolProperty::PinLength(length)));
    assert!(ed.fsm.process_tool_property(&ToolProperty::PinName("CLK".into())));
    click(&mut ed.fsm, mm(1.0, 1.0));

    let symbol = ed.symbol.borrow();
    let placed = symbol.pins().at(0).unwrap();
    assert_eq!(placed.name(), "CLK");
    assert_eq!(placed.rotation(), Angle::DEG_90);
    assert_eq!(placed.length(), length);
    let next = symbol.pins().at(1).unwrap();
    assert_eq!(next.name(), "CLK1");
    assert_eq!(next.rotation(), Angle::DEG_90);
    assert_eq!(next.length(), length);
}

#[test]
fn test_measure_snaps_to_pin_end() {
    let mut ed = editor_with(symbol_with_pins(&[pin("1", mm(0.0, 0.0))]));
    ed.fsm.request_tool(Tool::Measure);

    click(&mut ed.fsm, mm(0.02, 0.01));
    click(&mut ed.fsm, mm(2.53, 0.0));
    assert!(ed.fsm.available_features().contains(Features::COPY));
    assert!(ed.ui.borrow().info_text.contains("2.540000 mm"));

    assert!(ed.fsm.process_copy());
    let clipboard = ed.clipboard.borrow();
    assert_eq!(clipboard.content().unwrap().data, "2.540000");
    assert_eq!(
        ed.ui.borrow().status_message,
        "Copied to clipboard: 2.540000 mm"
    );
}

#[test]
fn test_measure_abort_and_remove() {
    let mut ed = editor();
    ed.fsm.request_tool(Tool::Measure);
    click(&mut ed.fsm, mm(0.0, 0.0));
    assert!(ed.fsm.process_abort_command());
    assert_eq!(ed.fsm.current_tool(), Tool::Measure);

    click(&mut ed.fsm, mm(0.0, 0.0));
    click(&mut ed.fsm, mm(3.0, 4.0));
    assert!(ed.fsm.process_remove());
    assert!(!ed.fsm.available_features().contains(Features::COPY));

    assert!(ed.fsm.process_abort_command());
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
}

#[test]
fn test_grid_change_applies_to_tools() {
    let mut ed = editor();
    ed.fsm.process_grid_interval_changed(PositiveLength::saturating(1_000_000));
    ed.fsm.request_tool(Tool::DrawCircle);
    drag(&mut ed.fsm, mm(0.2, 0.2), mm(2.4, 0.0));

    let symbol = ed.symbol.borrow();
    let circle = symbol.circles().at(0).unwrap();
    assert_eq!(circle.center(), mm(0.0, 0.0));
    assert_eq!(circle.diameter(), PositiveLength::saturating(4_000_000));
}

#[test]
fn test_undo_redo_through_fsm() {
    let mut ed = editor_with(Symbol::new("Test"));
    ed.fsm.request_tool(Tool::DrawCircle);
    drag(&mut ed.fsm, mm(0.0, 0.0), mm(1.0, 0.0));
    assert_eq!(ed.fsm.context().scene.item_count(), 1);

    ed.fsm.undo().unwrap();
    assert!(ed.symbol.borrow().circles().is_empty());
    assert_eq!(ed.fsm.context().scene.item_count(), 0);

    ed.fsm.redo().unwrap();
    assert_eq!(ed.symbol.borrow().circles().len(), 1);
    assert_eq!(ed.fsm.context().scene.item_count(), 1);
}

#[test]
fn test_refused_tool_leaves_no_tool_active() {
    let mut config = config();
    config.editor.paste_name_retry_limit = 0;
    let mut ed = editor_with_config(Symbol::new("Test"), &config);

    assert!(!ed.fsm.request_tool(Tool::AddPins));
    assert_eq!(ed.fsm.current_tool(), Tool::None);
    assert_eq!(ed.ui.borrow().errors.len(), 1);
    assert!(!ed.fsm.process_left_button_pressed(&at(mm(0.0, 0.0))));
    assert!(ed.symbol.borrow().pins().is_empty());
    assert!(!ed.fsm.context().undo_stack.is_group_active());

    assert!(ed.fsm.request_tool(Tool::Select));
    assert_eq!(ed.fsm.current_tool(), Tool::Select);
}
