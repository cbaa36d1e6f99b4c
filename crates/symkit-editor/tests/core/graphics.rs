use super::test_symbol;
use symkit_core::{shared, Length, Point, Rect};
use symkit_editor::commands::{CmdListElementInsert, CmdListElementRemove, CmdPinEdit};
use symkit_editor::graphics::{ItemKind, ItemRef};
use symkit_editor::{Circle, Entity, Pin, Symbol, SymbolGraphicsItem, UndoStack};
use uuid::Uuid;

#[test]
fn test_scene_builds_one_item_per_element() {
    let symbol = test_symbol();
    let scene = SymbolGraphicsItem::new(&symbol);
    assert_eq!(scene.item_count(), 5);
    assert_eq!(scene.selected_count(), 0);
    for pin in symbol.pins().iter() {
        assert_eq!(scene.pin(&pin.uuid()).unwrap().name(), pin.name());
    }
}

#[test]
fn test_scene_follows_commands() {
    let symbol = shared(test_symbol());
    symbol.borrow_mut().take_events();
    let mut scene = SymbolGraphicsItem::new(&symbol.borrow());
    let mut stack = UndoStack::new();

    let pin_uuid = symbol.borrow().pins().at(0).unwrap().uuid();
    let mut edit = CmdPinEdit::new(symbol.clone(), pin_uuid).unwrap();
    edit.set_name("A", false);
    stack.execute(Box::new(edit)).unwrap();
    scene.update(&mut symbol.borrow_mut());
    assert_eq!(scene.pin(&pin_uuid).unwrap().name(), "A");

    let circle_uuid = symbol.borrow().circles().at(0).unwrap().uuid();
    stack
        .execute(Box::new(CmdListElementRemove::<Symbol, Circle>::new(
            symbol.clone(),
            circle_uuid,
        )))
        .unwrap();
    let new_pin = Pin::new(Uuid::new_v4(), "3", Point::ORIGIN, Default::default(), Default::default());
    let new_uuid = new_pin.uuid();
    stack
        .execute(Box::new(CmdListElementInsert::<Symbol, Pin>::new(
            symbol.clone(),
            new_pin,
            None,
        )))
        .unwrap();
    scene.update(&mut symbol.borrow_mut());
    assert!(scene.circle(&circle_uuid).is_none());
    assert!(scene.pin(&new_uuid).is_some());
    assert_eq!(scene.item_count(), 5);

    stack.undo().unwrap();
    stack.undo().unwrap();
    stack.undo().unwrap();
    scene.update(&mut symbol.borrow_mut());
    assert!(scene.circle(&circle_uuid).is_some());
    assert!(scene.pin(&new_uuid).is_none());
    assert_eq!(scene.pin(&pin_uuid).unwrap().name(), "1");
}

#[test]
fn test_update_without_events_keeps_selection() {
    let mut symbol = test_symbol();
    symbol.take_events();
    let mut scene = SymbolGraphicsItem::new(&symbol);
    scene.select_all();
    scene.update(&mut symbol);
    assert_eq!(scene.selected_count(), 5);
}

#[test]
fn test_selected_items_in_document_order() {
    let symbol = test_symbol();
    let mut scene = SymbolGraphicsItem::new(&symbol);
    scene.select_all();
    let selected = scene.selected_items(&symbol);
    assert_eq!(selected.pins, symbol.pins().uuids());
    assert_eq!(selected.len(), 5);

    let second = symbol.pins().at(1).unwrap().uuid();
    scene.set_selected(&ItemRef::new(ItemKind::Pin, second), false);
    assert_eq!(scene.selected_items(&symbol).pins, vec![symbol.pins().at(0).unwrap().uuid()]);
}

#[test]
fn test_pins_win_over_polygons() {
    let symbol = test_symbol();
    let scene = SymbolGraphicsItem::new(&symbol);
    let pin = symbol.pins().at(0).unwrap().uuid();
    let polygon = symbol.polygons().at(0).unwrap().uuid();

    let hits = scene.find_items_at_pos(Point::from_mm(-2.54, 0.0), Length::new(0), Length::new(0));
    assert_eq!(
        hits,
        vec![
            ItemRef::new(ItemKind::Pin, pin),
            ItemRef::new(ItemKind::Polygon, polygon)
        ]
    );

    let inside = scene.find_items_at_pos(Point::from_mm(0.0, 0.0), Length::new(0), Length::new(0));
    assert_eq!(inside, vec![ItemRef::new(ItemKind::Polygon, polygon)]);
}

#[test]
fn test_nearby_items_rank_after_direct_hits() {
    let symbol = test_symbol();
    let scene = SymbolGraphicsItem::new(&symbol);
    let circle = symbol.circles().at(0).unwrap().uuid();

    let far = scene.find_items_at_pos(Point::from_mm(0.0, 6.0), Length::new(0), Length::new(0));
    assert!(far.is_empty());
    let near = scene.find_items_at_pos(
        Point::from_mm(0.0, 6.0),
        Length::new(0),
        Length::from_mm(1.0),
    );
    assert_eq!(near, vec![ItemRef::new(ItemKind::Circle, circle)]);
}

#[test]
fn test_selection_rect_selects_intersecting_items() {
    let symbol = test_symbol();
    let mut scene = SymbolGraphicsItem::new(&symbol);
    let rect = Rect::from_points(Point::from_mm(-6.0, -0.5), Point::from_mm(-4.0, 0.5));
    scene.set_selection_rect(Some(rect));
    assert_eq!(scene.selection_rect(), Some(rect));

    let selected = scene.selected_items(&symbol);
    assert_eq!(selected.pins, vec![symbol.pins().at(0).unwrap().uuid()]);
    assert_eq!(selected.len(), 1);

    scene.set_selection_rect(None);
    assert_eq!(scene.selected_count(), 1);
}
