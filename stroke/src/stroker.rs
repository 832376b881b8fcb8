//! Cap and join geometry for one vertex at a time.
//!
//! All the computations work on unit tangents scaled to the stroke
//! half-width; segments degenerate enough to have no tangent never reach
//! this module (the vertex buffer collapses them).

use crate::sequence::VertexDist;
use std::f64::consts::PI;
use trazo_path::math::{point, Point};
use trazo_path::{InnerJoin, LineCap, LineJoin};

const INTERSECTION_EPSILON: f64 = 1.0e-30;

/// Resolved stroke parameter state plus the per-vertex geometry routines.
///
/// `width` is the signed half-width. The width sign only selects which
/// offset side is traversed first; the absolute value drives all distances.
#[derive(Clone, Debug)]
pub(crate) struct Stroker {
    width: f64,
    width_abs: f64,
    width_eps: f64,
    width_sign: f64,
    miter_limit: f64,
    inner_miter_limit: f64,
    approx_scale: f64,
    line_cap: LineCap,
    line_join: LineJoin,
    inner_join: InnerJoin,
}

impl Default for Stroker {
    fn default() -> Self {
        Stroker {
            width: 0.5,
            width_abs: 0.5,
            width_eps: 0.5 / 1024.0,
            width_sign: 1.0,
            miter_limit: 4.0,
            inner_miter_limit: 1.01,
            approx_scale: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            inner_join: InnerJoin::default(),
        }
    }
}

impl Stroker {
    pub fn set_width(&mut self, width: f64) {
        self.width = width * 0.5;
        if self.width < 0.0 {
            self.width_abs = -self.width;
            self.width_sign = -1.0;
        } else {
            self.width_abs = self.width;
            self.width_sign = 1.0;
        }
        self.width_eps = self.width_abs / 1024.0;
    }

    pub fn width(&self) -> f64 {
        self.width * 2.0
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.line_join = join;
    }

    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    pub fn set_inner_join(&mut self, join: InnerJoin) {
        self.inner_join = join;
    }

    pub fn inner_join(&self) -> InnerJoin {
        self.inner_join
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        self.miter_limit = limit;
    }

    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    pub fn set_inner_miter_limit(&mut self, limit: f64) {
        self.inner_miter_limit = limit;
    }

    pub fn inner_miter_limit(&self) -> f64 {
        self.inner_miter_limit
    }

    pub fn set_approximation_scale(&mut self, scale: f64) {
        self.approx_scale = scale;
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approx_scale
    }

    /// Appends the cap geometry for the free end at `v0`, where `v1` is the
    /// adjacent vertex and `len` the distance between the two.
    pub fn calc_cap(&self, out: &mut Vec<Point>, v0: VertexDist, v1: VertexDist, len: f64) {
        out.clear();

        let dx1 = (v1.pos.y - v0.pos.y) / len * self.width;
        let dy1 = (v1.pos.x - v0.pos.x) / len * self.width;

        if self.line_cap != LineCap::Round {
            let mut dx2 = 0.0;
            let mut dy2 = 0.0;
            if self.line_cap == LineCap::Square {
                dx2 = dy1 * self.width_sign;
                dy2 = dx1 * self.width_sign;
            }
            out.push(point(v0.pos.x - dx1 - dx2, v0.pos.y + dy1 - dy2));
            out.push(point(v0.pos.x + dx1 - dx2, v0.pos.y - dy1 - dy2));
        } else {
            // Semicircle split into n + 1 even steps.
            let n = (PI / self.arc_step()) as i32;
            let da = PI / (n + 1) as f64;
            out.push(point(v0.pos.x - dx1, v0.pos.y + dy1));
            if self.width_sign > 0.0 {
                let mut a1 = f64::atan2(dy1, -dx1) + da;
                for _ in 0..n {
                    out.push(point(
                        v0.pos.x + a1.cos() * self.width,
                        v0.pos.y + a1.sin() * self.width,
                    ));
                    a1 += da;
                }
            } else {
                let mut a1 = f64::atan2(-dy1, dx1) - da;
                for _ in 0..n {
                    out.push(point(
                        v0.pos.x + a1.cos() * self.width,
                        v0.pos.y + a1.sin() * self.width,
                    ));
                    a1 -= da;
                }
            }
            out.push(point(v0.pos.x + dx1, v0.pos.y - dy1));
        }
    }

    /// Appends the join geometry at `v1`, between the segments `v0 -> v1`
    /// (length `len1`) and `v1 -> v2` (length `len2`).
    pub fn calc_join(
        &self,
        out: &mut Vec<Point>,
        v0: VertexDist,
        v1: VertexDist,
        v2: VertexDist,
        len1: f64,
        len2: f64,
    ) {
        let dx1 = self.width * (v1.pos.y - v0.pos.y) / len1;
        let dy1 = self.width * (v1.pos.x - v0.pos.x) / len1;
        let dx2 = self.width * (v2.pos.y - v1.pos.y) / len2;
        let dy2 = self.width * (v2.pos.x - v1.pos.x) / len2;

        out.clear();

        let cp = cross(v0.pos, v1.pos, v2.pos);
        if cp != 0.0 && (cp > 0.0) == (self.width > 0.0) {
            // Concave side of the bend: a naive offset self-intersects, so
            // the inner join rule applies, with a limit that never reaches
            // past the shorter adjacent segment.
            let limit = (len1.min(len2) / self.width_abs).max(self.inner_miter_limit);
            match self.inner_join {
                InnerJoin::Bevel => {
                    out.push(point(v1.pos.x + dx1, v1.pos.y - dy1));
                    out.push(point(v1.pos.x + dx2, v1.pos.y - dy2));
                }
                InnerJoin::Miter => {
                    self.calc_miter(
                        out,
                        v0,
                        v1,
                        v2,
                        dx1,
                        dy1,
                        dx2,
                        dy2,
                        LineJoin::MiterRevert,
                        limit,
                    );
                }
                InnerJoin::Jag | InnerJoin::Round => {
                    let d = (dx1 - dx2) * (dx1 - dx2) + (dy1 - dy2) * (dy1 - dy2);
                    if d < len1 * len1 && d < len2 * len2 {
                        self.calc_miter(
                            out,
                            v0,
                            v1,
                            v2,
                            dx1,
                            dy1,
                            dx2,
                            dy2,
                            LineJoin::MiterRevert,
                            limit,
                        );
                    } else if self.inner_join == InnerJoin::Jag {
                        // Legacy zig-zag through the path vertex.
                        out.push(point(v1.pos.x + dx1, v1.pos.y - dy1));
                        out.push(point(v1.pos.x, v1.pos.y));
                        out.push(point(v1.pos.x + dx2, v1.pos.y - dy2));
                    } else {
                        out.push(point(v1.pos.x + dx1, v1.pos.y - dy1));
                        out.push(point(v1.pos.x, v1.pos.y));
                        self.calc_arc(out, v1.pos, dx2, -dy2, dx1, -dy1);
                        out.push(point(v1.pos.x, v1.pos.y));
                        out.push(point(v1.pos.x + dx2, v1.pos.y - dy2));
                    }
                }
            }
        } else {
            // Convex side.
            let dx = (dx1 + dx2) / 2.0;
            let dy = (dy1 + dy2) / 2.0;
            let dbevel = (dx * dx + dy * dy).sqrt();

            if self.line_join == LineJoin::Round || self.line_join == LineJoin::Bevel {
                // Almost collinear segments: a bevel or an arc would not be
                // visibly different from a miter, and the miter costs fewer
                // vertices.
                if self.approx_scale * (self.width_abs - dbevel) < self.width_eps {
                    if let Some(pt) = calc_intersection(
                        point(v0.pos.x + dx1, v0.pos.y - dy1),
                        point(v1.pos.x + dx1, v1.pos.y - dy1),
                        point(v1.pos.x + dx2, v1.pos.y - dy2),
                        point(v2.pos.x + dx2, v2.pos.y - dy2),
                    ) {
                        out.push(pt);
                    } else {
                        out.push(point(v1.pos.x + dx1, v1.pos.y - dy1));
                    }
                    return;
                }
            }

            match self.line_join {
                LineJoin::Miter | LineJoin::MiterRevert => {
                    self.calc_miter(
                        out,
                        v0,
                        v1,
                        v2,
                        dx1,
                        dy1,
                        dx2,
                        dy2,
                        self.line_join,
                        self.miter_limit,
                    );
                }
                LineJoin::Round => {
                    self.calc_arc(out, v1.pos, dx1, -dy1, dx2, -dy2);
                }
                LineJoin::Bevel => {
                    out.push(point(v1.pos.x + dx1, v1.pos.y - dy1));
                    out.push(point(v1.pos.x + dx2, v1.pos.y - dy2));
                }
            }
        }
    }

    /// Appends a miter join, degrading to a bevel when the spike would
    /// reach past `mlimit` half-widths from the path vertex.
    #[allow(clippy::too_many_arguments)]
    fn calc_miter(
        &self,
        out: &mut Vec<Point>,
        v0: VertexDist,
        v1: VertexDist,
        v2: VertexDist,
        dx1: f64,
        dy1: f64,
        dx2: f64,
        dy2: f64,
        lj: LineJoin,
        mlimit: f64,
    ) {
        let lim = self.width_abs * mlimit;
        let mut limit_exceeded = true;
        let mut intersection_failed = true;

        if let Some(pt) = calc_intersection(
            point(v0.pos.x + dx1, v0.pos.y - dy1),
            point(v1.pos.x + dx1, v1.pos.y - dy1),
            point(v1.pos.x + dx2, v1.pos.y - dy2),
            point(v2.pos.x + dx2, v2.pos.y - dy2),
        ) {
            let di = (pt - v1.pos).length();
            let within = if lj == LineJoin::MiterRevert {
                di < lim
            } else {
                di <= lim
            };
            if within {
                out.push(pt);
                limit_exceeded = false;
            }
            intersection_failed = false;
        } else {
            // The three points are most probably collinear. If v0 and v2
            // lie on the same side of the perpendicular through v1, the
            // second segment continues the first one and the shared offset
            // point is the whole join.
            let probe = point(v1.pos.x + dx1, v1.pos.y - dy1);
            if (cross(v0.pos, v1.pos, probe) < 0.0) == (cross(v1.pos, v2.pos, probe) < 0.0) {
                out.push(probe);
                limit_exceeded = false;
            }
        }

        if limit_exceeded {
            if lj == LineJoin::Miter && intersection_failed {
                // A hairpin fold-back has no usable intersection; square
                // the spike off at the limit so the stroke end keeps its
                // width.
                let ml = mlimit * self.width_sign;
                out.push(point(
                    v1.pos.x + dx1 + dy1 * ml,
                    v1.pos.y - dy1 + dx1 * ml,
                ));
                out.push(point(
                    v1.pos.x + dx2 - dy2 * ml,
                    v1.pos.y - dy2 - dx2 * ml,
                ));
            } else {
                // Degrade gracefully to a bevel, never past the limit.
                out.push(point(v1.pos.x + dx1, v1.pos.y - dy1));
                out.push(point(v1.pos.x + dx2, v1.pos.y - dy2));
            }
        }
    }

    /// Appends the arc between the offset directions `(dx1, dy1)` and
    /// `(dx2, dy2)` around `p`, flattened with the chord step derived from
    /// the approximation scale. The end points of the arc are included.
    fn calc_arc(&self, out: &mut Vec<Point>, p: Point, dx1: f64, dy1: f64, dx2: f64, dy2: f64) {
        let a1 = f64::atan2(dy1 * self.width_sign, dx1 * self.width_sign);
        let mut a2 = f64::atan2(dy2 * self.width_sign, dx2 * self.width_sign);
        let da = self.arc_step();

        out.push(point(p.x + dx1, p.y + dy1));
        if self.width_sign > 0.0 {
            if a1 > a2 {
                a2 += 2.0 * PI;
            }
            let n = ((a2 - a1) / da) as i32;
            let da = (a2 - a1) / (n + 1) as f64;
            let mut a = a1 + da;
            for _ in 0..n {
                out.push(point(p.x + a.cos() * self.width, p.y + a.sin() * self.width));
                a += da;
            }
        } else {
            if a1 < a2 {
                a2 -= 2.0 * PI;
            }
            let n = ((a1 - a2) / da) as i32;
            let da = (a1 - a2) / (n + 1) as f64;
            let mut a = a1 - da;
            for _ in 0..n {
                out.push(point(p.x + a.cos() * self.width, p.y + a.sin() * self.width));
                a -= da;
            }
        }
        out.push(point(p.x + dx2, p.y + dy2));
    }

    // Angular step under which the chord of a half-width circle deviates
    // less than 0.125 / approximation_scale from the arc.
    fn arc_step(&self) -> f64 {
        f64::acos(self.width_abs / (self.width_abs + 0.125 / self.approx_scale)) * 2.0
    }
}

/// Cross product of `(p2 - p1)` and `(p - p2)`, negated: positive when the
/// polyline `p1 -> p2 -> p` turns clockwise (in y-up coordinates).
#[inline]
fn cross(p1: Point, p2: Point, p: Point) -> f64 {
    (p.x - p2.x) * (p2.y - p1.y) - (p.y - p2.y) * (p2.x - p1.x)
}

/// Intersection of the infinite lines `(a, b)` and `(c, d)`, or `None` when
/// they are (nearly) parallel.
fn calc_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let num = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
    let den = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    if den.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let r = num / den;
    Some(point(a.x + r * (b.x - a.x), a.y + r * (b.y - a.y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_path::math::point;

    #[test]
    fn intersection() {
        let pt = calc_intersection(
            point(0.0, 0.0),
            point(2.0, 0.0),
            point(1.0, -1.0),
            point(1.0, 1.0),
        )
        .unwrap();
        assert!((pt.x - 1.0).abs() < 1e-12);
        assert!(pt.y.abs() < 1e-12);

        // Parallel lines have no intersection.
        assert!(calc_intersection(
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(0.0, 1.0),
            point(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn arc_step_shrinks_with_scale() {
        let mut stroker = Stroker::default();
        stroker.set_width(2.0);
        stroker.set_approximation_scale(1.0);
        let coarse = stroker.arc_step();
        stroker.set_approximation_scale(4.0);
        let fine = stroker.arc_step();
        assert!(fine < coarse);
    }

    #[test]
    fn butt_cap_offsets() {
        let mut stroker = Stroker::default();
        stroker.set_width(2.0);
        let mut out = Vec::new();
        stroker.calc_cap(
            &mut out,
            VertexDist {
                pos: point(0.0, 0.0),
                dist: 10.0,
            },
            VertexDist {
                pos: point(10.0, 0.0),
                dist: 0.0,
            },
            10.0,
        );
        assert_eq!(out, vec![point(0.0, 1.0), point(0.0, -1.0)]);
    }
}
