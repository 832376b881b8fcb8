//! The stroke outline generator.

use crate::error::{InvalidParameter, StrokeResult};
use crate::sequence::VertexSequence;
use crate::stroker::Stroker;
use std::f64::consts::PI;
use trazo_path::math::Point;
use trazo_path::{Command, InnerJoin, LineCap, LineJoin, Vertex, VertexSource, Winding};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Status {
    Initial,
    Ready,
    Cap1,
    Cap2,
    Outline1,
    CloseFirst,
    Outline2,
    OutVertices,
    EndPoly1,
    EndPoly2,
    Done,
}

/// Generates the stroked outline of one sub-path at a time.
///
/// Vertices of a sub-path are accumulated with [`add_vertex`], then the
/// outline is pulled through the [`VertexSource`] protocol: for an open
/// sub-path a single loop tracing one offset side, the end cap, the other
/// side and the start cap; for a closed sub-path two independent loops, the
/// outer offset (`EndPoly` with positive winding) followed by the inner one
/// (negative winding). A sub-path with fewer than two distinct points emits
/// nothing; this is not an error.
///
/// The working buffers are owned by the generator and reused across
/// sub-paths. Parameters take effect on the next `rewind`; mutating them
/// mid-pass is not supported.
///
/// [`add_vertex`]: StrokeGenerator::add_vertex
pub struct StrokeGenerator {
    stroker: Stroker,
    src_vertices: VertexSequence,
    out_vertices: Vec<Point>,
    shorten: f64,
    closed: bool,
    status: Status,
    prev_status: Status,
    src_vertex: usize,
    out_vertex: usize,
}

impl Default for StrokeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeGenerator {
    pub fn new() -> Self {
        StrokeGenerator {
            stroker: Stroker::default(),
            src_vertices: VertexSequence::new(),
            out_vertices: Vec::new(),
            shorten: 0.0,
            closed: false,
            status: Status::Initial,
            prev_status: Status::Initial,
            src_vertex: 0,
            out_vertex: 0,
        }
    }

    /// Sets the full stroke width. The half-width drives all offset
    /// distances; the sign only selects which offset side is traversed
    /// first.
    pub fn set_width(&mut self, width: f64) -> StrokeResult {
        if !width.is_finite() {
            return Err(InvalidParameter::Width.into());
        }
        self.stroker.set_width(width);
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.stroker.width()
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.stroker.set_line_cap(cap);
    }

    pub fn line_cap(&self) -> LineCap {
        self.stroker.line_cap()
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.stroker.set_line_join(join);
    }

    pub fn line_join(&self) -> LineJoin {
        self.stroker.line_join()
    }

    pub fn set_inner_join(&mut self, join: InnerJoin) {
        self.stroker.set_inner_join(join);
    }

    pub fn inner_join(&self) -> InnerJoin {
        self.stroker.inner_join()
    }

    /// Sets the maximum ratio of a miter spike to the stroke half-width.
    pub fn set_miter_limit(&mut self, limit: f64) -> StrokeResult {
        if !limit.is_finite() || limit <= 1.0 {
            return Err(InvalidParameter::MiterLimit.into());
        }
        self.stroker.set_miter_limit(limit);
        Ok(())
    }

    pub fn miter_limit(&self) -> f64 {
        self.stroker.miter_limit()
    }

    /// Sets the miter limit from the smallest joint half-angle (in radians)
    /// that should still produce a sharp corner: `limit = 1 / sin(t / 2)`.
    pub fn set_miter_limit_theta(&mut self, theta: f64) -> StrokeResult {
        if !theta.is_finite() || theta <= 0.0 || theta >= PI {
            return Err(InvalidParameter::MiterLimitTheta.into());
        }
        self.stroker.set_miter_limit(1.0 / (theta * 0.5).sin());
        Ok(())
    }

    pub fn set_inner_miter_limit(&mut self, limit: f64) -> StrokeResult {
        if !limit.is_finite() || limit <= 1.0 {
            return Err(InvalidParameter::InnerMiterLimit.into());
        }
        self.stroker.set_inner_miter_limit(limit);
        Ok(())
    }

    pub fn inner_miter_limit(&self) -> f64 {
        self.stroker.inner_miter_limit()
    }

    /// Sets the tolerance scale used when round caps and joins are
    /// flattened: a higher scale produces more, shorter segments.
    pub fn set_approximation_scale(&mut self, scale: f64) -> StrokeResult {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(InvalidParameter::ApproximationScale.into());
        }
        self.stroker.set_approximation_scale(scale);
        Ok(())
    }

    pub fn approximation_scale(&self) -> f64 {
        self.stroker.approximation_scale()
    }

    /// Sets the arclength trimmed off each free end of an open sub-path
    /// before capping.
    pub fn set_shorten(&mut self, shorten: f64) -> StrokeResult {
        if !shorten.is_finite() || shorten < 0.0 {
            return Err(InvalidParameter::Shorten.into());
        }
        self.shorten = shorten;
        Ok(())
    }

    pub fn shorten(&self) -> f64 {
        self.shorten
    }

    /// Discards the accumulated sub-path.
    pub fn remove_all(&mut self) {
        self.src_vertices.clear();
        self.closed = false;
        self.status = Status::Initial;
    }

    /// Accumulates one vertex of the current sub-path. `MoveTo` replaces
    /// the pending start point, vertex commands append (curve tags are
    /// consumed as line vertices, the stroker expects flattened input) and
    /// `Close`/`EndPoly` mark the sub-path as closed.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.status = Status::Initial;
        match vertex.command {
            Command::MoveTo => self.src_vertices.modify_last(vertex.position),
            Command::LineTo | Command::Curve3 | Command::Curve4 => {
                self.src_vertices.add(vertex.position)
            }
            Command::Close | Command::EndPoly { .. } => self.closed = true,
            Command::Stop => {}
        }
    }
}

impl VertexSource for StrokeGenerator {
    fn rewind(&mut self, _path_id: u32) {
        if self.status == Status::Initial {
            self.src_vertices.close(self.closed);
            if !self.closed {
                self.src_vertices.shorten(self.shorten);
                if self.shorten > 0.0 && self.src_vertices.is_empty() {
                    log::debug!("sub-path fully consumed by shortening, emitting nothing");
                }
            }
            if self.src_vertices.len() < 3 {
                self.closed = false;
            }
        }
        self.status = Status::Ready;
        self.src_vertex = 0;
        self.out_vertex = 0;
    }

    fn next_vertex(&mut self) -> Vertex {
        let mut cmd = Command::LineTo;
        loop {
            match self.status {
                Status::Initial => {
                    self.rewind(0);
                }
                Status::Ready => {
                    if self.src_vertices.len() < 2 + usize::from(self.closed) {
                        return Vertex::stop();
                    }
                    self.status = if self.closed {
                        Status::Outline1
                    } else {
                        Status::Cap1
                    };
                    cmd = Command::MoveTo;
                    self.src_vertex = 0;
                    self.out_vertex = 0;
                }
                Status::Cap1 => {
                    let v0 = self.src_vertices.curr(0);
                    let v1 = self.src_vertices.curr(1);
                    self.stroker
                        .calc_cap(&mut self.out_vertices, v0, v1, v0.dist);
                    self.src_vertex = 1;
                    self.prev_status = Status::Outline1;
                    self.status = Status::OutVertices;
                    self.out_vertex = 0;
                }
                Status::Cap2 => {
                    let n = self.src_vertices.len();
                    let v0 = self.src_vertices.curr(n - 1);
                    let v1 = self.src_vertices.curr(n - 2);
                    self.stroker
                        .calc_cap(&mut self.out_vertices, v0, v1, v1.dist);
                    self.prev_status = Status::Outline2;
                    self.status = Status::OutVertices;
                    self.out_vertex = 0;
                }
                Status::Outline1 => {
                    if self.closed {
                        if self.src_vertex >= self.src_vertices.len() {
                            self.prev_status = Status::CloseFirst;
                            self.status = Status::EndPoly1;
                            continue;
                        }
                    } else if self.src_vertex >= self.src_vertices.len() - 1 {
                        self.status = Status::Cap2;
                        continue;
                    }
                    let i = self.src_vertex;
                    let prev = self.src_vertices.prev(i);
                    let curr = self.src_vertices.curr(i);
                    let next = self.src_vertices.next(i);
                    self.stroker.calc_join(
                        &mut self.out_vertices,
                        prev,
                        curr,
                        next,
                        prev.dist,
                        curr.dist,
                    );
                    self.src_vertex += 1;
                    self.prev_status = Status::Outline1;
                    self.status = Status::OutVertices;
                    self.out_vertex = 0;
                }
                Status::CloseFirst => {
                    self.status = Status::Outline2;
                    cmd = Command::MoveTo;
                }
                Status::Outline2 => {
                    if self.src_vertex <= usize::from(!self.closed) {
                        self.status = Status::EndPoly2;
                        self.prev_status = Status::Done;
                        continue;
                    }
                    self.src_vertex -= 1;
                    let i = self.src_vertex;
                    let prev = self.src_vertices.prev(i);
                    let curr = self.src_vertices.curr(i);
                    let next = self.src_vertices.next(i);
                    self.stroker.calc_join(
                        &mut self.out_vertices,
                        next,
                        curr,
                        prev,
                        curr.dist,
                        prev.dist,
                    );
                    self.prev_status = Status::Outline2;
                    self.status = Status::OutVertices;
                    self.out_vertex = 0;
                }
                Status::OutVertices => {
                    if self.out_vertex >= self.out_vertices.len() {
                        self.status = self.prev_status;
                    } else {
                        let p = self.out_vertices[self.out_vertex];
                        self.out_vertex += 1;
                        return Vertex::new(p, cmd);
                    }
                }
                Status::EndPoly1 => {
                    self.status = self.prev_status;
                    return Vertex::end_poly(Winding::Positive);
                }
                Status::EndPoly2 => {
                    self.status = self.prev_status;
                    return Vertex::end_poly(Winding::Negative);
                }
                Status::Done => {
                    return Vertex::stop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_path::math::point;

    #[test]
    fn reject_invalid_parameters() {
        use crate::error::{InvalidParameter, StrokeError};

        let mut gen = StrokeGenerator::new();
        assert_eq!(
            gen.set_miter_limit(1.0),
            Err(StrokeError::InvalidParameter(InvalidParameter::MiterLimit))
        );
        assert_eq!(
            gen.set_approximation_scale(0.0),
            Err(StrokeError::InvalidParameter(
                InvalidParameter::ApproximationScale
            ))
        );
        assert_eq!(
            gen.set_shorten(-1.0),
            Err(StrokeError::InvalidParameter(InvalidParameter::Shorten))
        );
        assert_eq!(
            gen.set_width(f64::NAN),
            Err(StrokeError::InvalidParameter(InvalidParameter::Width))
        );
        assert_eq!(
            gen.set_miter_limit_theta(0.0),
            Err(StrokeError::InvalidParameter(
                InvalidParameter::MiterLimitTheta
            ))
        );
        // Rejected values leave the previous configuration in place.
        assert_eq!(gen.miter_limit(), 4.0);
        assert_eq!(gen.approximation_scale(), 1.0);
        assert_eq!(gen.shorten(), 0.0);
    }

    #[test]
    fn miter_limit_theta() {
        let mut gen = StrokeGenerator::new();
        gen.set_miter_limit_theta(std::f64::consts::PI / 2.0).unwrap();
        let expected = 1.0 / (std::f64::consts::PI / 4.0).sin();
        assert!((gen.miter_limit() - expected).abs() < 1e-12);
    }

    #[test]
    fn single_vertex_emits_nothing() {
        let mut gen = StrokeGenerator::new();
        gen.remove_all();
        gen.add_vertex(Vertex::new(point(1.0, 1.0), Command::MoveTo));
        gen.rewind(0);
        assert!(gen.next_vertex().command.is_stop());
        assert!(gen.next_vertex().command.is_stop());
    }

    #[test]
    fn coincident_vertices_emit_nothing() {
        let mut gen = StrokeGenerator::new();
        gen.remove_all();
        gen.add_vertex(Vertex::new(point(1.0, 1.0), Command::MoveTo));
        gen.add_vertex(Vertex::new(point(1.0, 1.0), Command::LineTo));
        gen.add_vertex(Vertex::new(point(1.0, 1.0), Command::LineTo));
        gen.rewind(0);
        assert!(gen.next_vertex().command.is_stop());
    }
}
