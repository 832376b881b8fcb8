//! 2D vector path stroking.
//!
//! This is the facade crate, reexporting [`trazo_path`] and
//! [`trazo_stroke`].
//!
//! # Example
//!
//! ```
//! use trazo::math::point;
//! use trazo::path::Path;
//! use trazo::stroke::Stroke;
//! use trazo::{LineCap, LineJoin, VertexSource};
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(10.0, 10.0));
//! builder.close();
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

pub extern crate trazo_path;
pub extern crate trazo_stroke;

pub use trazo_path as path;
pub use trazo_stroke as stroke;

pub use trazo_path::math;
pub use trazo_path::{
    Command, InnerJoin, LineCap, LineJoin, Vertex, VertexSource, Winding,
};
pub use trazo_stroke::{Stroke, StrokeError, StrokeGenerator, StrokeResult};
