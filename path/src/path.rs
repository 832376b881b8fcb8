//! The default path data structure.

use crate::math::Point;
use crate::{Command, Vertex, VertexSource};

/// A simple path data structure.
///
/// Stores a flattened command stream and replays it through the
/// [`VertexSource`] protocol. The storage is append-only; iteration state
/// lives in an internal cursor reset by `rewind`.
///
/// ```
/// use trazo_path::Path;
/// use trazo_path::math::point;
///
/// let mut builder = Path::builder();
/// builder.move_to(point(0.0, 0.0));
/// builder.line_to(point(1.0, 0.0));
/// let mut path = builder.build();
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    vertices: Vec<Vertex>,
    #[cfg_attr(feature = "serialization", serde(skip))]
    cursor: usize,
}

impl Path {
    /// Creates a [`Builder`] object to build a path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Borrowed iteration over the stored vertices, without the terminating
    /// `Stop`.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }
}

impl VertexSource for Path {
    fn rewind(&mut self, _path_id: u32) {
        self.cursor = 0;
    }

    fn next_vertex(&mut self) -> Vertex {
        if self.cursor >= self.vertices.len() {
            return Vertex::stop();
        }
        let v = self.vertices[self.cursor];
        self.cursor += 1;
        v
    }
}

/// Builds path objects.
///
/// The builder is permissive: it records the command stream as given and
/// does not reject a `line_to` issued before any `move_to`. Malformed
/// streams are detected and reported by the consumers that care (the stroke
/// adapter reports them as `InvalidPathState`).
#[derive(Clone, Debug, Default)]
pub struct Builder {
    vertices: Vec<Vertex>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Builder {
            vertices: Vec::with_capacity(cap),
        }
    }

    /// Starts a new sub-path at `to`.
    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.vertices.push(Vertex::new(to, Command::MoveTo));
        self
    }

    /// Adds a line segment to the current sub-path.
    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.vertices.push(Vertex::new(to, Command::LineTo));
        self
    }

    /// Closes the current sub-path. The vertex position is meaningless.
    pub fn close(&mut self) -> &mut Self {
        self.vertices.push(Vertex::new(Point::zero(), Command::Close));
        self
    }

    pub fn build(self) -> Path {
        Path {
            vertices: self.vertices,
            cursor: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::{Command, VertexSource};

    fn pull_all(path: &mut Path) -> Vec<Vertex> {
        path.rewind(0);
        let mut out = Vec::new();
        loop {
            let v = path.next_vertex();
            if v.command.is_stop() {
                return out;
            }
            out.push(v);
        }
    }

    #[test]
    fn build_and_replay() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.line_to(point(1.0, 1.0));
        builder.close();
        let mut path = builder.build();

        let vertices = pull_all(&mut path);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].command, Command::MoveTo);
        assert_eq!(vertices[1].command, Command::LineTo);
        assert_eq!(vertices[1].position, point(1.0, 0.0));
        assert_eq!(vertices[3].command, Command::Close);

        // Exhausted sources keep returning Stop.
        assert!(path.next_vertex().command.is_stop());
        assert!(path.next_vertex().command.is_stop());
    }

    #[test]
    fn rewind_replays_identically() {
        let mut builder = Path::builder();
        builder.move_to(point(1.0, 2.0));
        builder.line_to(point(3.0, 4.0));
        let mut path = builder.build();

        let first = pull_all(&mut path);
        let second = pull_all(&mut path);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_path() {
        let mut path = Path::builder().build();
        assert!(path.is_empty());
        path.rewind(0);
        assert!(path.next_vertex().command.is_stop());
    }

    #[test]
    fn permissive_builder_keeps_malformed_streams() {
        // Consumers are in charge of reporting this as InvalidPathState.
        let mut builder = Path::builder();
        builder.line_to(point(1.0, 1.0));
        let mut path = builder.build();
        let vertices = pull_all(&mut path);
        assert_eq!(vertices[0].command, Command::LineTo);
    }
}
