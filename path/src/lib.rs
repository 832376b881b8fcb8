#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Data structures and traits to work with paths (vector graphics).
//!
//! Paths are lazy, rewindable sequences of [`Vertex`] values pulled through
//! the [`VertexSource`] trait. Generators further down the pipeline (such as
//! the stroker in `trazo_stroke`) implement the same trait, so stages compose
//! transparently.
//!
//! This crate is reexported in `trazo`.
//!
//! # Examples
//!
//! ```
//! use trazo_path::Path;
//! use trazo_path::math::point;
//!
//! // Create a builder object to build the path.
//! let mut builder = Path::builder();
//!
//! // Build a simple path.
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 2.0));
//! builder.line_to(point(2.0, 0.0));
//! builder.close();
//!
//! // Generate the actual path object.
//! let path = builder.build();
//!
//! for vertex in path.iter() {
//!     println!("{:?}", vertex);
//! }
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod path;

#[doc(inline)]
pub use crate::path::{Builder, Path};

use crate::math::Point;
use std::fmt;

pub mod math {
    //! f64 version of the euclid types used everywhere in this crate.

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}

/// The two possible orientations for a closed outline loop.
///
/// Positive winding corresponds to the positive orientation in trigonometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Winding {
    Positive,
    Negative,
}

/// A path command tag attached to each vertex of a vertex source.
///
/// `Curve3` and `Curve4` exist so that upstream producers can tag control
/// vertices of quadratic and cubic curves. Consumers that only understand
/// polylines (the stroker among them) treat such vertices as `LineTo`,
/// relying on curves having been flattened upstream.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Command {
    /// Starts a new sub-path at the vertex position.
    MoveTo,
    /// A line segment from the previous vertex.
    LineTo,
    /// A quadratic curve vertex, consumed as `LineTo` by polyline consumers.
    Curve3,
    /// A cubic curve vertex, consumed as `LineTo` by polyline consumers.
    Curve4,
    /// Closes the current sub-path back to its first vertex.
    Close,
    /// Terminates a generated closed loop, carrying the loop orientation.
    ///
    /// Only emitted by generators; hand-built paths use `Close`.
    EndPoly { winding: Winding },
    /// The source is exhausted. A source keeps returning `Stop` until it is
    /// rewound.
    Stop,
}

impl Command {
    /// True for commands that carry a meaningful position.
    #[inline]
    pub fn is_vertex(self) -> bool {
        matches!(
            self,
            Command::MoveTo | Command::LineTo | Command::Curve3 | Command::Curve4
        )
    }

    #[inline]
    pub fn is_move_to(self) -> bool {
        self == Command::MoveTo
    }

    #[inline]
    pub fn is_stop(self) -> bool {
        self == Command::Stop
    }

    #[inline]
    pub fn is_end_poly(self) -> bool {
        matches!(self, Command::EndPoly { .. })
    }
}

/// A 2D point tagged with a path command.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Point,
    pub command: Command,
}

impl Vertex {
    #[inline]
    pub fn new(position: Point, command: Command) -> Self {
        Vertex { position, command }
    }

    /// A `Stop` vertex. The position is meaningless.
    #[inline]
    pub fn stop() -> Self {
        Vertex::new(Point::zero(), Command::Stop)
    }

    /// An `EndPoly` vertex terminating a loop with the given orientation.
    /// The position is meaningless.
    #[inline]
    pub fn end_poly(winding: Winding) -> Self {
        Vertex::new(Point::zero(), Command::EndPoly { winding })
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?}({}, {})",
            self.command, self.position.x, self.position.y
        )
    }
}

/// The pull-based vertex protocol.
///
/// A vertex source produces a finite, restartable sequence of vertices:
/// `rewind` resets the iteration state, after which `next_vertex` yields the
/// vertices one by one until it returns a `Stop` vertex. Once exhausted, a
/// source keeps returning `Stop` until the next `rewind`.
///
/// Rewinding and re-iterating an unchanged source must reproduce an
/// identical vertex sequence.
pub trait VertexSource {
    /// Resets the iteration state. `path_id` selects a sub-range of the
    /// source for multi-path containers; plain sources ignore it.
    fn rewind(&mut self, path_id: u32);

    /// Returns the next vertex, or a `Stop` vertex when exhausted.
    fn next_vertex(&mut self) -> Vertex;
}

impl<'l, S: VertexSource> VertexSource for &'l mut S {
    fn rewind(&mut self, path_id: u32) {
        (**self).rewind(path_id)
    }

    fn next_vertex(&mut self) -> Vertex {
        (**self).next_vertex()
    }
}

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke ends flat at the endpoint of the sub-path, with no
    /// extension.
    Butt,
    /// The stroke ends flat half a stroke width past the endpoint of the
    /// sub-path.
    Square,
    /// The stroke ends with a semicircle centered at the endpoint of the
    /// sub-path.
    Round,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Line join as defined by the SVG specification, on the convex side of a
/// bend.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// Both offset edges are extended to their intersection point. Joins
    /// whose spike would exceed the miter limit degrade to `Bevel`.
    Miter,
    /// As `Miter`, with the opposite handling of degenerate fold-backs:
    /// a hairpin bend is beveled instead of squared off at the limit.
    MiterRevert,
    /// A circular arc between the two offset points.
    Round,
    /// A straight segment between the two offset points.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

/// The join style used on the concave side of a bend, where a naive offset
/// self-intersects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum InnerJoin {
    /// A straight segment between the two offset points.
    Bevel,
    /// The offset edge intersection, limited by the inner miter limit.
    Miter,
    /// A zig-zag through the path vertex on sharp bends. Legacy mode kept
    /// for compatibility; produces visibly incorrect geometry and is not a
    /// model for correct inner joins.
    Jag,
    /// A zig-zag through the path vertex with a reversed arc on sharp bends.
    Round,
}

impl Default for InnerJoin {
    fn default() -> Self {
        InnerJoin::Miter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn command_predicates() {
        assert!(Command::MoveTo.is_vertex());
        assert!(Command::LineTo.is_vertex());
        assert!(Command::Curve3.is_vertex());
        assert!(Command::Curve4.is_vertex());
        assert!(!Command::Close.is_vertex());
        assert!(!Command::Stop.is_vertex());

        assert!(Command::Stop.is_stop());
        assert!(Command::MoveTo.is_move_to());
        assert!(Command::EndPoly {
            winding: Winding::Positive
        }
        .is_end_poly());
        assert!(!Command::Close.is_end_poly());
    }

    #[test]
    fn stop_vertex() {
        let v = Vertex::stop();
        assert!(v.command.is_stop());
        assert_eq!(v.position, point(0.0, 0.0));
    }
}
