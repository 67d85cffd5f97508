//! Polygon model — paths (contours) and polygons.
//!
//! Port of the original `pp_contour_t` / `pp_polygon_t`. The original
//! links contours via a pointer-splicing trick when assembling holes
//! (see `spec.md` §9); this port exposes explicit ownership-transferring
//! operations instead (`Polygon::add_path`, `Polygon::merge`), and
//! stores contours in a contiguous `Vec` rather than a linked list.

use crate::geom::{Point, Rect};

// ============================================================================
// Path
// ============================================================================

/// An ordered, implicitly-closed sequence of vertices.
///
/// Port of C `pp_contour_t`. The edge between the last and first point
/// exists implicitly — no explicit closing point is required or
/// permitted. A path with fewer than 3 points renders nothing
/// meaningful (`spec.md` §3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bound of this path's points. Returns `None` for an
    /// empty path. Port of `pp_contour_bounds`.
    pub fn bounds(&self) -> Option<Rect> {
        let mut it = self.points.iter();
        let first = it.next()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in it {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Rect::new(
            min_x as i32,
            min_y as i32,
            (max_x - min_x) as i32,
            (max_y - min_y) as i32,
        ))
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// An ordered sequence of paths interpreted under the even-odd fill
/// rule. Path winding direction is irrelevant to the fill result.
///
/// Port of C `pp_polygon_t`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    paths: Vec<Path>,
}

impl Polygon {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn from_paths(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Append a path (e.g. an interior hole contour) to this polygon.
    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// Move all of `other`'s paths into `self`, consuming `other`.
    ///
    /// Replaces the original's pointer-splicing hole assembly with an
    /// explicit ownership transfer (`spec.md` §9).
    pub fn merge(&mut self, mut other: Polygon) {
        self.paths.append(&mut other.paths);
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Union of the axis-aligned bounds of every path. Returns `None`
    /// if the polygon has no paths. Port of `pp_polygon_bounds`.
    pub fn bounds(&self) -> Option<Rect> {
        self.paths
            .iter()
            .filter_map(Path::bounds)
            .reduce(|a, b| a.merge(&b))
    }
}
