use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Point;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon has {0} distinct vertices, at least 3 are required")]
    TooFewVertices(usize),
    #[error("polygon has a non-finite coordinate")]
    NonFinite,
    #[error("polygon area {0} is not positive")]
    NonPositiveArea(f64),
    #[error("polygon edges {0} and {1} intersect")]
    SelfIntersecting(usize, usize),
}

/// Closed boundary given as its vertex ring. Repeated consecutive vertices,
/// including a closing copy of the first one, are dropped.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(mut vertices: Vec<Point>) -> Self {
        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace sum relative to the first vertex, which keeps precision for
    /// small polygons far from the origin.
    fn signed_area(&self) -> f64 {
        let Some(origin) = self.vertices.first().copied() else {
            return 0.0;
        };
        let mut sum = 0.0;
        for (a, b) in self.edges() {
            let (ax, ay) = (a.x - origin.x, a.y - origin.y);
            let (bx, by) = (b.x - origin.x, b.y - origin.y);
            sum += ax * by - bx * ay;
        }
        sum / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn centroid(&self) -> Point {
        let Some(origin) = self.vertices.first().copied() else {
            return Point::default();
        };
        let a = self.signed_area();
        if a == 0.0 {
            // Degenerate ring: fall back to the vertex average.
            let n = self.vertices.len() as f64;
            let (sx, sy) = self
                .vertices
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            return Point::new(sx / n, sy / n);
        }

        let (mut cx, mut cy) = (0.0, 0.0);
        for (p, q) in self.edges() {
            let (px, py) = (p.x - origin.x, p.y - origin.y);
            let (qx, qy) = (q.x - origin.x, q.y - origin.y);
            let cross = px * qy - qx * py;
            cx += (px + qx) * cross;
            cy += (py + qy) * cross;
        }
        Point::new(origin.x + cx / (6.0 * a), origin.y + cy / (6.0 * a))
    }

    /// Checks that the polygon can carry a fire: finite, at least a triangle,
    /// positive area and no crossing edges.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.iter().any(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if self.vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(self.vertices.len()));
        }
        if let Some((i, j)) = self.first_crossing() {
            return Err(GeometryError::SelfIntersecting(i, j));
        }
        let area = self.area();
        if area <= 0.0 {
            return Err(GeometryError::NonPositiveArea(area));
        }
        Ok(())
    }

    fn first_crossing(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        let edges = self.edges().collect::<Vec<_>>();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                if segments_intersect(edges[i], edges[j]) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Even-odd ray casting.
    pub fn contains(&self, p: &Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Closest point of the polygon to `p`: `p` itself when inside, otherwise
    /// the closest point on the boundary. Point and segment rings are allowed.
    pub fn closest_point(&self, p: &Point) -> Option<Point> {
        match self.vertices.len() {
            0 => None,
            1 => Some(self.vertices[0]),
            _ => {
                if self.contains(p) {
                    return Some(*p);
                }
                self.edges()
                    .map(|(a, b)| closest_on_segment(p, a, b))
                    .min_by(|u, v| u.dist(p).total_cmp(&v.dist(p)))
            }
        }
    }
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect((p1, p2): (Point, Point), (q1, q2): (Point, Point)) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

pub fn closest_on_segment(p: &Point, a: Point, b: Point) -> Point {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy)
}
