//! Stroke outline generation for 2D vector paths.
//!
//! This crate turns flattened paths (poly-lines) into the closed outline of
//! their stroke. The stroke is described by a full width, cap and join
//! styles, miter limits and a flattening tolerance scale, and the outline
//! is produced incrementally through the pull-based
//! [`VertexSource`](trazo_path::VertexSource) protocol so that only one
//! sub-path is buffered at a time.
//!
//! ## Example
//!
//! ```
//! use trazo_path::math::point;
//! use trazo_path::{LineCap, LineJoin, Path, VertexSource};
//! use trazo_stroke::Stroke;
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(10.0, 10.0));
//! let mut path = builder.build();
//!
//! let mut stroke = Stroke::new(&mut path, 2.0);
//! stroke.set_line_cap(LineCap::Round);
//! stroke.set_line_join(LineJoin::Round);
//!
//! stroke.rewind(0);
//! loop {
//!     let vertex = stroke.next_vertex();
//!     if vertex.command.is_stop() {
//!         break;
//!     }
//!     println!("{}", vertex);
//! }
//! ```

pub mod error;
pub mod generator;
pub mod sequence;
pub mod stroke;
mod stroker;


pub use crate::error::{InvalidParameter, StrokeError, StrokeResult};
pub use crate::generator::StrokeGenerator;
pub use crate::stroke::Stroke;

pub use trazo_path::{InnerJoin, LineCap, LineJoin};
