//! Vertex paths with optional arc segments.

use super::{Angle, Orientation, Point, PositiveLength};
use serde::{Deserialize, Serialize};

/// Maximum sweep of one flattened arc step, in degrees
const ARC_FLATTEN_STEP_DEG: f64 = 15.0;

/// A path vertex
///
/// `angle` is the sweep of the segment from this vertex to the next one;
/// zero means a straight line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    /// Position of the vertex
    pub pos: Point,
    /// Arc sweep of the following segment
    #[serde(default)]
    pub angle: Angle,
}

impl Vertex {
    /// Create a vertex
    pub const fn new(pos: Point, angle: Angle) -> Self {
        Self { pos, angle }
    }

    /// Create a vertex followed by a straight segment
    pub const fn straight(pos: Point) -> Self {
        Self::new(pos, Angle::DEG_0)
    }
}

/// An ordered list of vertices
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from vertices
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Closed rectangular outline spanned by two corners (5 vertices)
    pub fn rect(p1: Point, p2: Point) -> Self {
        Self::from_vertices(vec![
            Vertex::straight(p1),
            Vertex::straight(Point::new(p2.x, p1.y)),
            Vertex::straight(p2),
            Vertex::straight(Point::new(p1.x, p2.y)),
            Vertex::straight(p1),
        ])
    }

    /// Vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable vertex access
    pub fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }

    /// Consume into the vertex list
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the path has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a vertex
    pub fn add_vertex(&mut self, pos: Point, angle: Angle) {
        self.vertices.push(Vertex::new(pos, angle));
    }

    /// Insert a vertex before `index` (or at the end if `index == len`)
    pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) {
        let index = index.min(self.vertices.len());
        self.vertices.insert(index, vertex);
    }

    /// Remove and return the vertex at `index`
    pub fn remove_vertex(&mut self, index: usize) -> Option<Vertex> {
        (index < self.vertices.len()).then(|| self.vertices.remove(index))
    }

    /// A path is closed if it has at least two vertices and the last one
    /// coincides with the first one
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => self.vertices.len() >= 2 && first.pos == last.pos,
            _ => false,
        }
    }

    /// Close the path by appending the first vertex, returns whether the path
    /// was modified
    pub fn close(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        match self.vertices.first() {
            Some(first) if self.vertices.len() >= 2 => {
                let pos = first.pos;
                self.vertices.push(Vertex::straight(pos));
                true
            }
            _ => false,
        }
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Point) {
        for v in &mut self.vertices {
            v.pos += offset;
        }
    }

    /// Rotate every vertex around `center`
    pub fn rotate(&mut self, angle: Angle, center: Point) {
        for v in &mut self.vertices {
            v.pos = v.pos.rotated(angle, center);
        }
    }

    /// Mirror every vertex; arc directions flip with the geometry
    pub fn mirror(&mut self, orientation: Orientation, center: Point) {
        for v in &mut self.vertices {
            v.pos = v.pos.mirrored(orientation, center);
            v.angle = -v.angle;
        }
    }

    /// Snap every vertex to `grid`
    pub fn map_to_grid(&mut self, grid: PositiveLength) {
        for v in &mut self.vertices {
            v.pos = v.pos.mapped_to_grid(grid);
        }
    }

    /// Translated copy
    pub fn translated(&self, offset: Point) -> Self {
        let mut path = self.clone();
        path.translate(offset);
        path
    }

    /// Rotated copy
    pub fn rotated(&self, angle: Angle, center: Point) -> Self {
        let mut path = self.clone();
        path.rotate(angle, center);
        path
    }

    /// Mirrored copy
    pub fn mirrored(&self, orientation: Orientation, center: Point) -> Self {
        let mut path = self.clone();
        path.mirror(orientation, center);
        path
    }

    /// Grid-snapped copy
    pub fn mapped_to_grid(&self, grid: PositiveLength) -> Self {
        let mut path = self.clone();
        path.map_to_grid(grid);
        path
    }

    /// Whether every vertex lies on `grid`
    pub fn is_on_grid(&self, grid: PositiveLength) -> bool {
        self.vertices.iter().all(|v| v.pos.is_on_grid(grid))
    }

    /// Approximate the path by straight segments
    ///
    /// Arc segments are split into steps of at most 15°.
    pub fn flattened(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.vertices.len());
        for (i, v) in self.vertices.iter().enumerate() {
            points.push(v.pos);
            let Some(next) = self.vertices.get(i + 1) else {
                break;
            };
            if v.angle == Angle::DEG_0 || v.pos == next.pos {
                continue;
            }
            let center = arc_center(v.pos, next.pos, v.angle);
            let steps = (v.angle.to_deg().abs() / ARC_FLATTEN_STEP_DEG).ceil().max(1.0) as i32;
            for step in 1..steps {
                let sweep = Angle::from_deg(v.angle.to_deg() * step as f64 / steps as f64);
                points.push(v.pos.rotated(sweep, center));
            }
        }
        points
    }
}

/// Center of the arc from `p1` to `p2` with the given sweep
pub fn arc_center(p1: Point, p2: Point, angle: Angle) -> Point {
    let (x1, y1) = p1.to_f64();
    let (x2, y2) = p2.to_f64();
    let (dx, dy) = (x2 - x1, y2 - y1);
    let chord = dx.hypot(dy);
    let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    let half = angle.to_rad() / 2.0;
    if chord == 0.0 || half.tan() == 0.0 {
        return Point::from_nm(mx.round() as i64, my.round() as i64);
    }
    // Distance from the chord midpoint to the center, positive to the left
    // of the travel direction for counter-clockwise arcs.
    let h = (chord / 2.0) / half.tan();
    let (nx, ny) = (-dy / chord, dx / chord);
    Point::from_nm((mx + nx * h).round() as i64, (my + ny * h).round() as i64)
}
