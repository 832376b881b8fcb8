//! The stroking adapter.

use crate::error::{StrokeError, StrokeResult};
use crate::generator::StrokeGenerator;
use trazo_path::{Command, InnerJoin, LineCap, LineJoin, Vertex, VertexSource};

#[derive(Copy, Clone, Debug, PartialEq)]
enum AdaptorStatus {
    Initial,
    Accumulate,
    Generate,
}

/// Strokes any [`VertexSource`] on the fly.
///
/// The adapter pulls vertices from the underlying source one sub-path at a
/// time, feeds them to a [`StrokeGenerator`] and replays the generated
/// outline, so memory use is bounded by the largest sub-path rather than
/// the whole path. Since the output is itself a `VertexSource`, adapters
/// compose: the stroke of a stroke outlines the outline.
///
/// A sub-path that does not start with `MoveTo`, or that carries vertices
/// after its closing command, is skipped and recorded through [`error`];
/// well-formed sub-paths around it are stroked normally.
///
/// Parameters take effect on the next `rewind`; mutating them in the
/// middle of an iteration pass is not supported.
///
/// [`error`]: Stroke::error
pub struct Stroke<'l, Src: VertexSource> {
    source: &'l mut Src,
    generator: StrokeGenerator,
    status: AdaptorStatus,
    start: Vertex,
    last_cmd: Command,
    error: Option<StrokeError>,
}

impl<'l, Src: VertexSource> Stroke<'l, Src> {
    /// Creates a stroke adapter over `source` with the given full width.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not finite. Use [`set_width`] to change the
    /// width fallibly afterwards.
    ///
    /// [`set_width`]: Stroke::set_width
    pub fn new(source: &'l mut Src, width: f64) -> Self {
        assert!(width.is_finite(), "invalid stroke width");
        let mut generator = StrokeGenerator::new();
        generator.set_width(width).expect("finite width");
        Stroke {
            source,
            generator,
            status: AdaptorStatus::Initial,
            start: Vertex::stop(),
            last_cmd: Command::Stop,
            error: None,
        }
    }

    /// The first malformed-input error encountered since the last rewind,
    /// if any. Malformed sub-paths are skipped, not fatal.
    pub fn error(&self) -> Option<StrokeError> {
        self.error
    }

    pub fn set_width(&mut self, width: f64) -> StrokeResult {
        self.generator.set_width(width)
    }

    pub fn width(&self) -> f64 {
        self.generator.width()
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.generator.set_line_cap(cap);
    }

    pub fn line_cap(&self) -> LineCap {
        self.generator.line_cap()
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.generator.set_line_join(join);
    }

    pub fn line_join(&self) -> LineJoin {
        self.generator.line_join()
    }

    pub fn set_inner_join(&mut self, join: InnerJoin) {
        self.generator.set_inner_join(join);
    }

    pub fn inner_join(&self) -> InnerJoin {
        self.generator.inner_join()
    }

    pub fn set_miter_limit(&mut self, limit: f64) -> StrokeResult {
        self.generator.set_miter_limit(limit)
    }

    pub fn miter_limit(&self) -> f64 {
        self.generator.miter_limit()
    }

    /// See [`StrokeGenerator::set_miter_limit_theta`].
    pub fn set_miter_limit_theta(&mut self, theta: f64) -> StrokeResult {
        self.generator.set_miter_limit_theta(theta)
    }

    pub fn set_inner_miter_limit(&mut self, limit: f64) -> StrokeResult {
        self.generator.set_inner_miter_limit(limit)
    }

    pub fn inner_miter_limit(&self) -> f64 {
        self.generator.inner_miter_limit()
    }

    pub fn set_approximation_scale(&mut self, scale: f64) -> StrokeResult {
        self.generator.set_approximation_scale(scale)
    }

    pub fn approximation_scale(&self) -> f64 {
        self.generator.approximation_scale()
    }

    pub fn set_shorten(&mut self, shorten: f64) -> StrokeResult {
        self.generator.set_shorten(shorten)
    }

    pub fn shorten(&self) -> f64 {
        self.generator.shorten()
    }

    /// Skips source vertices until the next `MoveTo` or the end of the
    /// stream, leaving the found vertex as the start of the next cycle.
    fn skip_sub_path(&mut self) {
        loop {
            let v = self.source.next_vertex();
            match v.command {
                Command::MoveTo | Command::Stop => {
                    self.start = v;
                    self.last_cmd = v.command;
                    return;
                }
                _ => {}
            }
        }
    }
}

impl<'l, Src: VertexSource> VertexSource for Stroke<'l, Src> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
        self.status = AdaptorStatus::Initial;
        self.error = None;
    }

    fn next_vertex(&mut self) -> Vertex {
        loop {
            match self.status {
                AdaptorStatus::Initial => {
                    self.start = self.source.next_vertex();
                    self.last_cmd = self.start.command;
                    self.status = AdaptorStatus::Accumulate;
                }
                AdaptorStatus::Accumulate => {
                    if self.last_cmd.is_stop() {
                        return Vertex::stop();
                    }
                    if !self.last_cmd.is_move_to() {
                        if self.error.is_none() {
                            log::debug!(
                                "sub-path starts with {} instead of MoveTo, skipping",
                                self.start
                            );
                            self.error = Some(StrokeError::InvalidPathState);
                        }
                        self.skip_sub_path();
                        continue;
                    }

                    self.generator.remove_all();
                    self.generator.add_vertex(self.start);
                    let mut closed_seen = false;
                    loop {
                        let v = self.source.next_vertex();
                        match v.command {
                            Command::MoveTo | Command::Stop => {
                                self.start = v;
                                self.last_cmd = v.command;
                                break;
                            }
                            Command::Close | Command::EndPoly { .. } => {
                                self.generator.add_vertex(v);
                                closed_seen = true;
                            }
                            _ if closed_seen => {
                                // A vertex after the close belongs to no
                                // sub-path; the next cycle reports it.
                                self.start = v;
                                self.last_cmd = v.command;
                                break;
                            }
                            _ => self.generator.add_vertex(v),
                        }
                    }
                    self.generator.rewind(0);
                    self.status = AdaptorStatus::Generate;
                }
                AdaptorStatus::Generate => {
                    let v = self.generator.next_vertex();
                    if v.command.is_stop() {
                        self.status = AdaptorStatus::Accumulate;
                        continue;
                    }
                    return v;
                }
            }
        }
    }
}
