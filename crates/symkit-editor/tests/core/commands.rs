use super::test_symbol;
use symkit_core::{shared, Angle, Orientation, Point, PositiveLength};
use symkit_editor::clipboard::SymbolClipboardData;
use symkit_editor::commands::{
    CmdDragSelectedSymbolItems, CmdListElementInsert, CmdPasteSymbolItems, CmdPinEdit,
    CmdRemoveSelectedSymbolItems,
};
use symkit_editor::{Entity, Pin, SelectedItems, Symbol, UndoStack};
use uuid::Uuid;

fn grid() -> PositiveLength {
    PositiveLength::saturating(100_000)
}

fn select_all(symbol: &Symbol) -> SelectedItems {
    SelectedItems {
        pins: symbol.pins().uuids(),
        circles: symbol.circles().uuids(),
        polygons: symbol.polygons().uuids(),
        texts: symbol.texts().uuids(),
    }
}

#[test]
fn test_drag_rotate_and_undo_restores_everything() {
    let symbol = shared(test_symbol());
    let before = symbol.borrow().clone();
    let selection = select_all(&symbol.borrow());
    let mut stack = UndoStack::new();

    let mut cmd = CmdDragSelectedSymbolItems::new(symbol.clone(), &selection, grid()).unwrap();
    assert_eq!(cmd.selected_items_count(), 5);
    cmd.translate(Point::from_mm(1.0, 0.0));
    cmd.rotate(Angle::DEG_90);
    cmd.mirror(Orientation::Vertical);
    assert!(stack.execute(Box::new(cmd)).unwrap());
    assert_ne!(*symbol.borrow(), before);

    stack.undo().unwrap();
    assert_eq!(*symbol.borrow(), before);
    stack.redo().unwrap();
    assert_ne!(*symbol.borrow(), before);
}

#[test]
fn test_unexecuted_drag_reverts_on_drop() {
    let symbol = shared(test_symbol());
    let before = symbol.borrow().clone();
    let selection = select_all(&symbol.borrow());

    {
        let mut cmd =
            CmdDragSelectedSymbolItems::new(symbol.clone(), &selection, grid()).unwrap();
        cmd.set_delta_to_start_pos(Point::from_mm(3.0, 3.0));
        cmd.set_delta_to_start_pos(Point::from_mm(1.0, 2.0));
        assert_eq!(cmd.delta_pos(), Point::from_mm(1.0, 2.0));
        assert_ne!(*symbol.borrow(), before);
    }
    assert_eq!(*symbol.borrow(), before);
}

#[test]
fn test_drag_center_of_single_element_is_exact() {
    let symbol = shared(test_symbol());
    let pin = symbol.borrow().pins().at(0).unwrap().clone();
    let selection = SelectedItems {
        pins: vec![pin.uuid()],
        ..Default::default()
    };
    let cmd = CmdDragSelectedSymbolItems::new(symbol, &selection, grid()).unwrap();
    assert_eq!(cmd.center(), pin.position());
}

#[test]
fn test_remove_selected_undo_restores_order() {
    let symbol = shared(test_symbol());
    let before = symbol.borrow().clone();
    let selection = SelectedItems {
        pins: vec![before.pins().at(0).unwrap().uuid()],
        texts: before.texts().uuids(),
        ..Default::default()
    };
    let mut stack = UndoStack::new();

    assert!(stack
        .execute(Box::new(CmdRemoveSelectedSymbolItems::new(symbol.clone(), selection)))
        .unwrap());
    assert_eq!(symbol.borrow().pins().len(), 1);
    assert!(symbol.borrow().texts().is_empty());
    assert_eq!(stack.undo_text(), Some("Remove Symbol Elements"));

    stack.undo().unwrap();
    assert_eq!(*symbol.borrow(), before);
}

#[test]
fn test_remove_nothing_is_not_recorded() {
    let symbol = shared(test_symbol());
    let mut stack = UndoStack::new();
    let cmd = CmdRemoveSelectedSymbolItems::new(symbol, SelectedItems::default());
    assert!(!stack.execute(Box::new(cmd)).unwrap());
    assert!(stack.is_empty());
}

#[test]
fn test_paste_into_same_symbol_keeps_free_uuids() {
    let source = test_symbol();
    let data = SymbolClipboardData::from_selection(&source, &select_all(&source), Point::ORIGIN);
    let target = shared(Symbol::with_uuid(source.uuid(), "R"));

    let cmd = CmdPasteSymbolItems::new(target.clone(), &data, Point::ORIGIN, 1000).unwrap();
    let pasted = cmd.pasted_items();
    assert_eq!(pasted, select_all(&source));

    let mut stack = UndoStack::new();
    assert!(stack.execute(Box::new(cmd)).unwrap());
    assert_eq!(select_all(&target.borrow()), select_all(&source));
}

#[test]
fn test_paste_into_other_symbol_gets_new_uuids() {
    let source = test_symbol();
    let data = SymbolClipboardData::from_selection(&source, &select_all(&source), Point::ORIGIN);
    let target = shared(Symbol::new("Other"));

    let cmd = CmdPasteSymbolItems::new(target.clone(), &data, Point::ORIGIN, 1000).unwrap();
    let pasted = cmd.pasted_items();
    assert_eq!(pasted.len(), 5);
    assert!(pasted
        .pins
        .iter()
        .all(|uuid| !source.pins().contains(uuid)));
    assert!(pasted
        .polygons
        .iter()
        .all(|uuid| !source.polygons().contains(uuid)));
}

#[test]
fn test_paste_applies_offset_and_unique_names() {
    let source = test_symbol();
    let selection = SelectedItems {
        pins: source.pins().uuids(),
        ..Default::default()
    };
    let data = SymbolClipboardData::from_selection(&source, &selection, Point::ORIGIN);
    let target = shared(source.clone());
    let offset = Point::from_mm(0.0, 10.0);

    let mut stack = UndoStack::new();
    let cmd = CmdPasteSymbolItems::new(target.clone(), &data, offset, 1000).unwrap();
    stack.execute(Box::new(cmd)).unwrap();

    let symbol = target.borrow();
    let names: Vec<_> = symbol.pins().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, vec!["1", "2", "3", "4"]);
    assert_eq!(
        symbol.pins().at(2).unwrap().position(),
        source.pins().at(0).unwrap().position() + offset
    );
    drop(symbol);

    stack.undo().unwrap();
    assert_eq!(*target.borrow(), source);
}

#[test]
fn test_paste_round_trips_through_payload() {
    let source = test_symbol();
    let data = SymbolClipboardData::from_selection(
        &source,
        &select_all(&source),
        Point::from_mm(1.0, 1.0),
    );
    let payload = data.to_payload().unwrap();
    let decoded = SymbolClipboardData::from_payload(&payload).unwrap().unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn test_edit_then_insert_in_one_group() {
    let symbol = shared(test_symbol());
    let before = symbol.borrow().clone();
    let mut stack = UndoStack::new();

    stack.begin_group("Add pin").unwrap();
    let pin = Pin::new(
        Uuid::new_v4(),
        "3",
        Point::ORIGIN,
        Angle::DEG_0,
        Default::default(),
    );
    let uuid = pin.uuid();
    assert!(stack
        .append_to_group(Box::new(CmdListElementInsert::<Symbol, Pin>::new(
            symbol.clone(),
            pin,
            None
        )))
        .unwrap());
    let mut edit = CmdPinEdit::new(symbol.clone(), uuid).unwrap();
    edit.set_position(Point::from_mm(2.54, 2.54), true);
    assert_eq!(
        symbol.borrow().pins().get(&uuid).unwrap().position(),
        Point::from_mm(2.54, 2.54)
    );
    assert!(stack.append_to_group(Box::new(edit)).unwrap());
    assert!(stack.commit_group().unwrap());
    assert_eq!(stack.len(), 1);

    stack.undo().unwrap();
    assert_eq!(*symbol.borrow(), before);
}

#[test]
fn test_group_guards() {
    let symbol = shared(test_symbol());
    let mut stack = UndoStack::new();
    stack.begin_group("outer").unwrap();
    assert!(stack.begin_group("inner").is_err());
    assert!(stack.undo().is_err());

    let uuid = symbol.borrow().pins().at(0).unwrap().uuid();
    let mut edit = CmdPinEdit::new(symbol, uuid).unwrap();
    edit.set_name("X", false);
    assert!(stack.execute(Box::new(edit)).is_err());

    stack.abort_group().unwrap();
    assert!(stack.commit_group().is_err());
    assert!(stack.abort_group().is_err());
}
