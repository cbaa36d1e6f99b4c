use proptest::prelude::*;
use symkit_core::{Angle, Length, Orientation, Point, PositiveLength, Rect};

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1_000_000_000i64..1_000_000_000, -1_000_000_000i64..1_000_000_000)
        .prop_map(|(x, y)| Point::from_nm(x, y))
}

proptest! {
    #[test]
    fn prop_four_quarter_turns_are_identity(p in point_strategy(), c in point_strategy()) {
        let mut q = p;
        for _ in 0..4 {
            q = q.rotated(Angle::DEG_90, c);
        }
        prop_assert_eq!(q, p);
    }

    #[test]
    fn prop_mirror_twice_is_identity(p in point_strategy(), c in point_strategy()) {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let q = p.mirrored(orientation, c).mirrored(orientation, c);
            prop_assert_eq!(q, p);
        }
    }

    #[test]
    fn prop_map_to_grid_is_idempotent(p in point_strategy(), grid in 1i64..10_000_000) {
        let grid = PositiveLength::saturating(grid);
        let snapped = p.mapped_to_grid(grid);
        prop_assert!(snapped.is_on_grid(grid));
        prop_assert_eq!(snapped.mapped_to_grid(grid), snapped);
        prop_assert!((snapped.x - p.x).abs() <= grid.get() / 2);
    }
}

#[test]
fn test_rect_from_unordered_corners() {
    let rect = Rect::from_points(Point::from_nm(10, -5), Point::from_nm(-10, 5));
    assert_eq!(rect.min, Point::from_nm(-10, -5));
    assert_eq!(rect.max, Point::from_nm(10, 5));
    assert_eq!(rect.width(), Length::new(20));
    assert!(rect.contains(&Point::ORIGIN));
    assert_eq!(rect.center(), Point::ORIGIN);
}

#[test]
fn test_rect_intersection() {
    let a = Rect::from_points(Point::from_nm(0, 0), Point::from_nm(10, 10));
    let b = Rect::from_points(Point::from_nm(10, 10), Point::from_nm(20, 20));
    let c = Rect::from_points(Point::from_nm(11, 0), Point::from_nm(20, 5));
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert_eq!(a.united(&c).max, Point::from_nm(20, 10));
}

#[test]
fn test_bounding_rect() {
    assert!(Rect::bounding(Vec::<Point>::new()).is_none());
    let rect = Rect::bounding([Point::from_nm(3, 1), Point::from_nm(-2, 4)]).unwrap();
    assert_eq!(rect.min, Point::from_nm(-2, 1));
    assert_eq!(rect.max, Point::from_nm(3, 4));
}
