use symkit_core::{Angle, Orientation, Path, Point, PositiveLength, Vertex};

fn open_path() -> Path {
    Path::from_vertices(vec![
        Vertex::straight(Point::from_nm(0, 0)),
        Vertex::new(Point::from_nm(100, 0), Angle::DEG_90),
        Vertex::straight(Point::from_nm(100, 100)),
    ])
}

#[test]
fn test_path_transform_round_trip() {
    let path = open_path();
    let center = Point::from_nm(50, 50);
    let back = path
        .rotated(Angle::DEG_90, center)
        .rotated(-Angle::DEG_90, center);
    assert_eq!(back, path);

    let back = path
        .mirrored(Orientation::Vertical, center)
        .mirrored(Orientation::Vertical, center);
    assert_eq!(back, path);

    let moved = path.translated(Point::from_nm(5, -5));
    assert_eq!(moved.vertices()[2].pos, Point::from_nm(105, 95));
}

#[test]
fn test_path_vertex_insert_and_remove() {
    let mut path = open_path();
    path.insert_vertex(1, Vertex::straight(Point::from_nm(50, 0)));
    assert_eq!(path.len(), 4);
    assert_eq!(path.vertices()[1].pos, Point::from_nm(50, 0));
    let removed = path.remove_vertex(1).unwrap();
    assert_eq!(removed.pos, Point::from_nm(50, 0));
    assert!(path.remove_vertex(10).is_none());
    assert_eq!(path, open_path());
}

#[test]
fn test_path_grid() {
    let grid = PositiveLength::saturating(100);
    let path = Path::from_vertices(vec![
        Vertex::straight(Point::from_nm(49, 151)),
        Vertex::straight(Point::from_nm(-51, 0)),
    ]);
    assert!(!path.is_on_grid(grid));
    let snapped = path.mapped_to_grid(grid);
    assert!(snapped.is_on_grid(grid));
    assert_eq!(snapped.vertices()[0].pos, Point::from_nm(0, 200));
    assert_eq!(snapped.vertices()[1].pos, Point::from_nm(-100, 0));
}

#[test]
fn test_path_serializes_as_vertex_list() {
    let json = serde_json::to_value(open_path()).unwrap();
    assert!(json.is_array());
    assert_eq!(json.as_array().unwrap().len(), 3);
}
