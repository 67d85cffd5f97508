//! # pretty-poly
//!
//! A software polygon rasterizer for resource-constrained platforms —
//! a Rust port of [Pretty Poly](https://github.com/lowfatcode/pretty-poly)
//! by Jonathan Williamson.
//!
//! Converts arbitrary polygons (multiple contours, concavity,
//! self-intersection, interior holes) into antialiased coverage tiles
//! using the even-odd fill rule, delivered to the caller one small
//! rectangular tile at a time. The rasterizer never allocates a
//! full-frame coverage map and performs no allocation during `render()`
//! itself; it is pixel-format-agnostic — the caller blends each tile's
//! coverage bytes into its own framebuffer.
//!
//! - renders polygons: concave, self-intersecting, multi-contour, holes
//! - tile-based: bounded, compile-time-fixed memory footprint
//! - antialiasing modes: none, 4×, and 16× supersampling
//! - bounds clipping: all output clipped to a configured clip rectangle
//! - pixel-format agnostic: emits a coverage "tile", nothing more
//!
//! ## Architecture
//!
//! 1. **Geometry** ([`geom`]) — point, rectangle, and affine transform
//!    value types.
//! 2. **Polygon model** ([`polygon`]) — paths (contours) and polygons,
//!    interpreted under the even-odd fill rule.
//! 3. **Rasterizer** ([`raster`]) — the edge builder, scanline
//!    renderer, and tile driver, exposed through [`raster::Rasterizer`].
//! 4. **Tile** ([`tile`]) — the coverage buffer view handed to the
//!    caller's callback, and the antialias level enum.
//!
//! Out of scope (left to callers or external crates): shape
//! constructors, an SVG path parser, tile-blend/pixel-format code, and
//! PNG output.
//!
//! ## Example
//!
//! ```
//! use pretty_poly::{AntialiasLevel, Path, Point, Polygon, Rasterizer, Rect};
//!
//! let mut poly = Polygon::new();
//! poly.add_path(Path::from_points(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ]));
//!
//! let mut ras = Rasterizer::new();
//! ras.set_clip(Rect::new(0, 0, 4, 4));
//! ras.set_antialias(AntialiasLevel::X4);
//! ras.set_callback(|tile| {
//!     println!("tile at ({}, {}), {}x{}", tile.bounds.x, tile.bounds.y, tile.bounds.w, tile.bounds.h);
//! });
//! ras.render(&poly);
//! ```

pub mod geom;
pub mod polygon;
pub mod raster;
pub mod tile;

pub use geom::{Point, Rect, Transform};
pub use polygon::{Path, Polygon};
pub use raster::Rasterizer;
pub use tile::{AntialiasLevel, Tile};
