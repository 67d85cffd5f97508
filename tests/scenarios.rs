//! End-to-end scenarios from `spec.md` §8 exercising the full public
//! `Rasterizer` API, as opposed to the inline unit tests in
//! `src/raster.rs` which probe internals scenario-by-scenario (S1, S3,
//! S4, S6 live there since they double as the smallest useful
//! regression tests for the edge builder itself).

use pretty_poly::{AntialiasLevel, Path, Point, Polygon, Rasterizer, Rect, Tile};
use std::cell::RefCell;
use std::rc::Rc;

fn collect_tiles(ras: &mut Rasterizer, polygon: &Polygon) -> Vec<(Rect, usize, Vec<u8>)> {
    let collected: Rc<RefCell<Vec<(Rect, usize, Vec<u8>)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = collected.clone();
    ras.set_callback(move |tile: &Tile| {
        let mut bytes = Vec::with_capacity(tile.bounds.w as usize * tile.bounds.h as usize);
        for y in 0..tile.bounds.h as usize {
            for x in 0..tile.bounds.w as usize {
                bytes.push(tile.raw(x, y));
            }
        }
        sink.borrow_mut().push((tile.bounds, tile.stride, bytes));
    });
    ras.render(polygon);
    // `render` restores the callback into `ras` at the end, so `sink`
    // (captured inside it) keeps a second strong reference alive —
    // `try_unwrap` would panic here. Clone out through the borrow instead.
    collected.borrow().clone()
}

fn square(x: f32, y: f32, s: f32) -> Path {
    Path::from_points(vec![
        Point::new(x, y),
        Point::new(x + s, y),
        Point::new(x + s, y + s),
        Point::new(x, y + s),
    ])
}

/// S2: unit square with 4x antialiasing — interior bytes should read 4
/// (full coverage); the half-open scanline rule means the very last
/// supersampled row/column of an edge may read less than full.
#[test]
fn s2_unit_square_x4_antialias() {
    let mut ras = Rasterizer::new();
    ras.set_clip(Rect::new(0, 0, 4, 4));
    ras.set_antialias(AntialiasLevel::X4);

    let mut poly = Polygon::new();
    poly.add_path(square(0.0, 0.0, 4.0));

    let tiles = collect_tiles(&mut ras, &poly);
    assert_eq!(tiles.len(), 1);
    let (bounds, _, data) = &tiles[0];

    // Every fully-interior pixel (not on the bottom row or right
    // column) must read exactly 4 — full 4x4 supersample coverage.
    for y in 0..bounds.h as usize - 1 {
        for x in 0..bounds.w as usize - 1 {
            assert_eq!(data[x + y * bounds.w as usize], 4);
        }
    }
    // No byte may ever exceed the coverage max for this level.
    assert!(data.iter().all(|&b| b <= 4));
}

/// S5: the unit square from S1 rotated 45 degrees about its center at
/// 16x antialiasing — center pixel is fully covered, tips carry partial
/// coverage, and nothing outside the rotated bound is delivered.
#[test]
fn s5_rotated_square_x16_antialias() {
    let mut ras = Rasterizer::new();
    ras.set_clip(Rect::new(-4, -4, 12, 12));
    ras.set_antialias(AntialiasLevel::X16);

    let cx = 2.0_f32;
    let cy = 2.0_f32;
    let half_diag = std::f32::consts::SQRT_2 * 2.0;
    // Diamond vertices directly: rotating a unit square by 45 degrees
    // about its center produces a diamond with tips at the midpoints
    // of the original square's sides, offset by half the diagonal.
    let mut poly = Polygon::new();
    poly.add_path(Path::from_points(vec![
        Point::new(cx, cy - half_diag),
        Point::new(cx + half_diag, cy),
        Point::new(cx, cy + half_diag),
        Point::new(cx - half_diag, cy),
    ]));

    let tiles = collect_tiles(&mut ras, &poly);
    assert_eq!(tiles.len(), 1);
    let (bounds, _, data) = &tiles[0];

    // Center pixel (2,2) is fully inside the diamond at every
    // supersample row and column.
    let center_x = 2 - bounds.x;
    let center_y = 2 - bounds.y;
    assert_eq!(
        data[center_x as usize + center_y as usize * bounds.w as usize],
        16
    );

    // Every byte stays within [0, 16], the declared coverage range.
    assert!(data.iter().all(|&b| b <= 16));
}

/// S7: a self-intersecting bowtie contour. Even-odd fill must leave the
/// crossing region uncovered while the outer lobes remain filled.
#[test]
fn s7_self_intersecting_bowtie() {
    let mut ras = Rasterizer::new();
    ras.set_clip(Rect::new(0, 0, 12, 12));

    // Bowtie: (0,0) -> (10,10) -> (10,0) -> (0,10), implicitly closed.
    // The two diagonals cross at the center (5,5), producing two
    // triangular lobes under even-odd with nothing double-filled.
    let mut poly = Polygon::new();
    poly.add_path(Path::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ]));

    let tiles = collect_tiles(&mut ras, &poly);
    assert_eq!(tiles.len(), 1);
    let (_, _, data) = &tiles[0];

    // A self-intersecting contour must still only ever read 0 or 1 at
    // X1 — never 2 — since even-odd counts crossings, not windings.
    assert!(data.iter().all(|&b| b <= 1));
    // Some pixels are covered (the lobes are non-empty).
    assert!(data.iter().any(|&b| b == 1));
}

/// S8: two disjoint triangles in a single polygon both render, in the
/// same `render()` call, independent of tile boundaries.
#[test]
fn s8_disjoint_multi_contour_polygon() {
    let mut ras = Rasterizer::new();
    ras.set_clip(Rect::new(0, 0, 200, 200));

    let mut poly = Polygon::new();
    poly.add_path(Path::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ]));
    poly.add_path(Path::from_points(vec![
        Point::new(150.0, 150.0),
        Point::new(160.0, 150.0),
        Point::new(150.0, 160.0),
    ]));

    let tiles = collect_tiles(&mut ras, &poly);
    assert!(tiles.len() >= 2, "two distant triangles must span multiple tiles");

    let any_covered_near = |ox: i32, oy: i32| {
        tiles.iter().any(|(bounds, stride, data)| {
            (0..bounds.h as usize).any(|y| {
                (0..bounds.w as usize).any(|x| {
                    let ax = bounds.x + x as i32;
                    let ay = bounds.y + y as i32;
                    (ax - ox).abs() <= 3 && (ay - oy).abs() <= 3 && data[x + y * *stride] > 0
                })
            })
        })
    };
    assert!(any_covered_near(2, 2));
    assert!(any_covered_near(152, 152));
}

/// Parity: for an arbitrary concave, multi-contour polygon, every
/// delivered byte stays within the declared coverage range at every
/// antialias level (a corollary of the node-count parity invariant in
/// `spec.md` §8.1 — odd node counts would produce unmatched spans and
/// out-of-range coverage).
#[test]
fn coverage_range_holds_for_concave_polygon() {
    for level in [AntialiasLevel::None, AntialiasLevel::X4, AntialiasLevel::X16] {
        let mut ras = Rasterizer::new();
        ras.set_antialias(level);
        ras.set_clip(Rect::new(0, 0, 40, 40));

        let mut poly = Polygon::new();
        poly.add_path(Path::from_points(vec![
            Point::new(2.0, 2.0),
            Point::new(20.0, 4.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(2.0, 18.0),
            Point::new(8.0, 10.0),
        ]));

        let tiles = collect_tiles(&mut ras, &poly);
        let max = level.coverage_max();
        for (_, _, data) in &tiles {
            assert!(data.iter().all(|&b| b as u16 <= max));
        }
    }
}

/// Translation commutes with rasterization, within a one-pixel
/// tolerance: the set of covered output pixels for a translated
/// polygon matches the translated set of covered pixels for the
/// original.
#[test]
fn translation_commutes_with_raster() {
    let tri = |dx: f32, dy: f32| {
        Path::from_points(vec![
            Point::new(1.0 + dx, 1.0 + dy),
            Point::new(9.0 + dx, 1.0 + dy),
            Point::new(1.0 + dx, 9.0 + dy),
        ])
    };

    let mut base_poly = Polygon::new();
    base_poly.add_path(tri(0.0, 0.0));
    let mut ras = Rasterizer::new();
    ras.set_clip(Rect::new(0, 0, 40, 40));
    let base_tiles = collect_tiles(&mut ras, &base_poly);

    let mut shifted_poly = Polygon::new();
    shifted_poly.add_path(tri(20.0, 0.0));
    let mut ras2 = Rasterizer::new();
    ras2.set_clip(Rect::new(0, 0, 40, 40));
    let shifted_tiles = collect_tiles(&mut ras2, &shifted_poly);

    let covered = |tiles: &[(Rect, usize, Vec<u8>)], ox: i32, oy: i32| -> bool {
        tiles.iter().any(|(bounds, stride, data)| {
            let lx = ox - bounds.x;
            let ly = oy - bounds.y;
            lx >= 0
                && ly >= 0
                && (lx as usize) < bounds.w as usize
                && (ly as usize) < bounds.h as usize
                && data[lx as usize + ly as usize * *stride] > 0
        })
    };

    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(
                covered(&base_tiles, x, y),
                covered(&shifted_tiles, x + 20, y),
                "mismatch at base ({x},{y})"
            );
        }
    }
}
