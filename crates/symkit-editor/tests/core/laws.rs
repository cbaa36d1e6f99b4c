use super::test_symbol;
use proptest::prelude::*;
use symkit_core::{shared, Angle, Orientation, Point, PositiveLength};
use symkit_editor::commands::{CmdDragSelectedSymbolItems, CmdPinEdit};
use symkit_editor::{Entity, SelectedItems, Symbol, UndoStack};

#[derive(Debug, Clone)]
enum DragOp {
    Translate(Point),
    Rotate(Angle),
    Mirror(Orientation),
    Snap,
}

fn drag_op() -> impl Strategy<Value = DragOp> {
    prop_oneof![
        (-20_000_000i64..20_000_000, -20_000_000i64..20_000_000)
            .prop_map(|(x, y)| DragOp::Translate(Point::from_nm(x, y))),
        prop_oneof![Just(Angle::DEG_90), Just(Angle::DEG_180), Just(Angle::DEG_270)]
            .prop_map(DragOp::Rotate),
        prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
            .prop_map(DragOp::Mirror),
        Just(DragOp::Snap),
    ]
}

fn select_all(symbol: &Symbol) -> SelectedItems {
    SelectedItems {
        pins: symbol.pins().uuids(),
        circles: symbol.circles().uuids(),
        polygons: symbol.polygons().uuids(),
        texts: symbol.texts().uuids(),
    }
}

proptest! {
    #[test]
    fn prop_undo_restores_dragged_symbol(ops in prop::collection::vec(drag_op(), 1..8)) {
        let symbol = shared(test_symbol());
        let before = symbol.borrow().clone();
        let selection = select_all(&symbol.borrow());
        let mut stack = UndoStack::new();

        let mut cmd = CmdDragSelectedSymbolItems::new(
            symbol.clone(),
            &selection,
            PositiveLength::saturating(100_000),
        )
        .unwrap();
        for op in &ops {
            match op {
                DragOp::Translate(delta) => cmd.translate(*delta),
                DragOp::Rotate(angle) => cmd.rotate(*angle),
                DragOp::Mirror(orientation) => cmd.mirror(*orientation),
                DragOp::Snap => cmd.snap_to_grid(),
            }
        }
        let recorded = stack.execute(Box::new(cmd)).unwrap();
        let after = symbol.borrow().clone();

        if recorded {
            stack.undo().unwrap();
            prop_assert_eq!(&*symbol.borrow(), &before);
            stack.redo().unwrap();
            prop_assert_eq!(&*symbol.borrow(), &after);
        } else {
            prop_assert_eq!(after, before);
        }
    }

    #[test]
    fn prop_undo_limit_bounds_history(limit in 1usize..5, edits in 1usize..12) {
        let symbol = shared(test_symbol());
        let uuid = symbol.borrow().pins().at(0).unwrap().uuid();
        let mut stack = UndoStack::with_limit(Some(limit));

        for i in 0..edits {
            let mut edit = CmdPinEdit::new(symbol.clone(), uuid).unwrap();
            edit.set_name(format!("P{i}"), false);
            prop_assert!(stack.execute(Box::new(edit)).unwrap());
            prop_assert!(stack.len() <= limit);
        }
        prop_assert_eq!(stack.len(), edits.min(limit));
        prop_assert_eq!(stack.undo_text(), Some("Edit pin"));
    }

    #[test]
    fn prop_undo_all_then_redo_all(names in prop::collection::vec("[A-Z]{1,3}", 1..6)) {
        let symbol = shared(test_symbol());
        let before = symbol.borrow().clone();
        let uuid = symbol.borrow().pins().at(1).unwrap().uuid();
        let mut stack = UndoStack::new();

        for name in &names {
            let mut edit = CmdPinEdit::new(symbol.clone(), uuid).unwrap();
            edit.set_name(name.clone(), false);
            stack.execute(Box::new(edit)).unwrap();
        }
        let after = symbol.borrow().clone();

        while stack.can_undo() {
            stack.undo().unwrap();
        }
        prop_assert_eq!(&*symbol.borrow(), &before);
        while stack.can_redo() {
            stack.redo().unwrap();
        }
        prop_assert_eq!(&*symbol.borrow(), &after);
    }
}
