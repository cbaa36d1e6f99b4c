//! Grab areas for hit testing.
//!
//! Coordinates are converted to `f64` nanometers; results are only used for
//! hit decisions and priorities, never written back into the document.

use symkit_core::{Length, Point, Rect};

/// Area in which an item can be grabbed with the cursor
#[derive(Debug, Clone, PartialEq)]
pub enum GrabArea {
    /// A disc (`inner_radius == 0`) or a ring
    Circle {
        center: Point,
        outer_radius: f64,
        inner_radius: f64,
    },
    /// A thick polyline; `filled` adds the enclosed area
    Polyline {
        points: Vec<Point>,
        half_width: f64,
        filled: bool,
    },
    /// A convex quadrilateral, corners in order
    Quad { corners: [Point; 4] },
}

impl GrabArea {
    /// Distance from `p` to the area, zero if inside
    pub fn distance_to(&self, p: Point) -> f64 {
        let pf = p.to_f64();
        match self {
            GrabArea::Circle {
                center,
                outer_radius,
                inner_radius,
            } => {
                let d = distance(pf, center.to_f64());
                if d > *outer_radius {
                    d - outer_radius
                } else if d < *inner_radius {
                    inner_radius - d
                } else {
                    0.0
                }
            }
            GrabArea::Polyline {
                points,
                half_width,
                filled,
            } => {
                if *filled && point_in_polygon(pf, points) {
                    return 0.0;
                }
                let d = polyline_distance(pf, points);
                (d - half_width).max(0.0)
            }
            GrabArea::Quad { corners } => {
                if point_in_polygon(pf, corners) {
                    return 0.0;
                }
                let mut closed = corners.to_vec();
                closed.push(corners[0]);
                polyline_distance(pf, &closed)
            }
        }
    }

    /// Whether `p` lies within the area
    pub fn contains(&self, p: Point) -> bool {
        self.distance_to(p) <= 0.0
    }

    /// Axis-aligned bounds of the area
    pub fn bounding_rect(&self) -> Rect {
        match self {
            GrabArea::Circle {
                center,
                outer_radius,
                ..
            } => Rect::from_points(*center, *center).expanded(Length::new(outer_radius.ceil() as i64)),
            GrabArea::Polyline {
                points, half_width, ..
            } => Rect::bounding(points.iter().copied())
                .unwrap_or_default()
                .expanded(Length::new(half_width.ceil() as i64)),
            GrabArea::Quad { corners } => {
                Rect::bounding(corners.iter().copied()).unwrap_or_default()
            }
        }
    }

    /// Whether the area overlaps `rect`
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        match self {
            GrabArea::Circle {
                center,
                outer_radius,
                inner_radius,
            } => {
                let c = center.to_f64();
                let nearest = (
                    c.0.clamp(rect.min.x.to_nm() as f64, rect.max.x.to_nm() as f64),
                    c.1.clamp(rect.min.y.to_nm() as f64, rect.max.y.to_nm() as f64),
                );
                let farthest = rect
                    .corners()
                    .iter()
                    .map(|corner| distance(c, corner.to_f64()))
                    .fold(0.0, f64::max);
                distance(c, nearest) <= *outer_radius && farthest >= *inner_radius
            }
            GrabArea::Polyline {
                points,
                half_width,
                filled,
            } => {
                let grown = rect.expanded(Length::new(half_width.round() as i64));
                if polyline_intersects_rect(points, &grown) {
                    return true;
                }
                *filled && point_in_polygon(rect.center().to_f64(), points)
            }
            GrabArea::Quad { corners } => {
                let mut closed = corners.to_vec();
                closed.push(corners[0]);
                polyline_intersects_rect(&closed, rect)
                    || point_in_polygon(rect.center().to_f64(), corners)
            }
        }
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + t * dx, a.1 + t * dy))
}

/// Distance from `p` to the segment `a`-`b`, in nanometers
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    segment_distance(p.to_f64(), a.to_f64(), b.to_f64())
}

fn polyline_distance(p: (f64, f64), points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => distance(p, single.to_f64()),
        _ => points
            .windows(2)
            .map(|w| segment_distance(p, w[0].to_f64(), w[1].to_f64()))
            .fold(f64::INFINITY, f64::min),
    }
}

fn point_in_polygon(p: (f64, f64), points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i].to_f64();
        let (xj, yj) = points[j].to_f64();
        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn segments_intersect(a: (f64, f64), b: (f64, f64), c: (f64, f64), d: (f64, f64)) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    let on_segment = |p: (f64, f64), q: (f64, f64), r: (f64, f64)| {
        r.0 >= p.0.min(q.0) && r.0 <= p.0.max(q.0) && r.1 >= p.1.min(q.1) && r.1 <= p.1.max(q.1)
    };
    (d1 == 0.0 && on_segment(c, d, a))
        || (d2 == 0.0 && on_segment(c, d, b))
        || (d3 == 0.0 && on_segment(a, b, c))
        || (d4 == 0.0 && on_segment(a, b, d))
}

fn polyline_intersects_rect(points: &[Point], rect: &Rect) -> bool {
    if points.iter().any(|p| rect.contains(p)) {
        return true;
    }
    let corners = rect.corners();
    let edges = [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ];
    points.windows(2).any(|w| {
        edges.iter().any(|(c, d)| {
            segments_intersect(w[0].to_f64(), w[1].to_f64(), c.to_f64(), d.to_f64())
        })
    })
}
