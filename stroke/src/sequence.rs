//! Per-subpath vertex buffer with coincident-point deduplication.

use trazo_path::math::Point;

/// Points closer than this are considered coincident and collapsed, since a
/// zero-length segment has no tangent direction.
pub const COINCIDENCE_EPSILON: f64 = 1e-14;

/// A buffered vertex together with the distance to the vertex that follows
/// it (for the last vertex of a closed loop, the distance back to the
/// first).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexDist {
    pub pos: Point,
    pub dist: f64,
}

impl VertexDist {
    #[inline]
    pub fn new(pos: Point) -> Self {
        VertexDist { pos, dist: 0.0 }
    }

    /// Measures the distance to `next`, storing it in `self.dist`. Returns
    /// false if the two points are coincident; the stored distance is then a
    /// large sentinel so that degenerate segments never win a "shortest
    /// segment" comparison.
    fn measure(&mut self, next: &VertexDist) -> bool {
        self.dist = (next.pos - self.pos).length();
        let distinct = self.dist > COINCIDENCE_EPSILON;
        if !distinct {
            self.dist = 1.0 / COINCIDENCE_EPSILON;
        }
        distinct
    }
}

/// An append-only buffer of deduplicated vertices for one sub-path.
///
/// The last appended vertex is provisional: appending another vertex first
/// checks the previous pair and drops the older vertex of a coincident pair,
/// so that the buffer never stores a degenerate interior segment. `close`
/// finalizes the buffer, including the wrap-around pair of a closed loop.
#[derive(Clone, Debug, Default)]
pub struct VertexSequence {
    verts: Vec<VertexDist>,
}

impl VertexSequence {
    pub fn new() -> Self {
        VertexSequence { verts: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn clear(&mut self) {
        self.verts.clear();
    }

    pub fn add(&mut self, pos: Point) {
        let n = self.verts.len();
        if n > 1 && !self.remeasure(n - 2) {
            self.verts.pop();
        }
        self.verts.push(VertexDist::new(pos));
    }

    /// Replaces the provisional last vertex.
    pub fn modify_last(&mut self, pos: Point) {
        self.verts.pop();
        self.add(pos);
    }

    /// Finalizes the buffer: collapses a coincident trailing pair and, for a
    /// closed loop, drops trailing vertices coincident with the first one so
    /// that the wrap-around segment is well defined.
    pub fn close(&mut self, closed: bool) {
        while self.verts.len() > 1 {
            let n = self.verts.len();
            if self.remeasure(n - 2) {
                break;
            }
            let last = self.verts[n - 1];
            self.verts.pop();
            self.modify_last(last.pos);
        }
        if closed {
            while self.verts.len() > 1 {
                let first = self.verts[0];
                let n = self.verts.len();
                if self.verts[n - 1].measure(&first) {
                    break;
                }
                self.verts.pop();
            }
        }
    }

    /// Trims `s` of arclength off each end of an open polyline. If less
    /// than one distinct segment survives, the buffer empties: a fully
    /// consumed sub-path emits nothing.
    pub fn shorten(&mut self, s: f64) {
        if s <= 0.0 || self.verts.len() < 2 {
            return;
        }
        self.trim_tail(s);
        if self.verts.len() >= 2 {
            self.trim_head(s);
        }
    }

    fn trim_tail(&mut self, mut s: f64) {
        while self.verts.len() > 1 {
            let d = self.verts[self.verts.len() - 2].dist;
            if d > s {
                break;
            }
            s -= d;
            self.verts.pop();
        }
        if self.verts.len() < 2 {
            self.verts.clear();
            return;
        }
        if s > 0.0 {
            let n = self.verts.len();
            let prev = self.verts[n - 2];
            let t = (prev.dist - s) / prev.dist;
            self.verts[n - 1].pos = prev.pos.lerp(self.verts[n - 1].pos, t);
            if !self.remeasure(n - 2) {
                self.verts.pop();
                if self.verts.len() < 2 {
                    self.verts.clear();
                }
            }
        }
    }

    fn trim_head(&mut self, mut s: f64) {
        while self.verts.len() > 1 {
            let d = self.verts[0].dist;
            if d > s {
                break;
            }
            s -= d;
            self.verts.remove(0);
        }
        if self.verts.len() < 2 {
            self.verts.clear();
            return;
        }
        if s > 0.0 {
            let next = self.verts[1].pos;
            let v0 = &mut self.verts[0];
            let t = s / v0.dist;
            v0.pos = v0.pos.lerp(next, t);
            v0.dist -= s;
            if v0.dist <= COINCIDENCE_EPSILON {
                self.verts.remove(0);
                if self.verts.len() < 2 {
                    self.verts.clear();
                }
            }
        }
    }

    /// The vertex before `i`, wrapping around for closed loops.
    #[inline]
    pub fn prev(&self, i: usize) -> VertexDist {
        self.verts[(i + self.verts.len() - 1) % self.verts.len()]
    }

    #[inline]
    pub fn curr(&self, i: usize) -> VertexDist {
        self.verts[i]
    }

    /// The vertex after `i`, wrapping around for closed loops.
    #[inline]
    pub fn next(&self, i: usize) -> VertexDist {
        self.verts[(i + 1) % self.verts.len()]
    }

    // Re-measures the segment between verts[i] and verts[i + 1].
    fn remeasure(&mut self, i: usize) -> bool {
        let next = self.verts[i + 1];
        self.verts[i].measure(&next)
    }
}

impl std::ops::Index<usize> for VertexSequence {
    type Output = VertexDist;
    fn index(&self, i: usize) -> &VertexDist {
        &self.verts[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_path::math::point;

    fn seq(points: &[(f64, f64)]) -> VertexSequence {
        let mut s = VertexSequence::new();
        for &(x, y) in points {
            s.add(point(x, y));
        }
        s
    }

    #[test]
    fn dedup_on_add() {
        let mut s = seq(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
        s.close(false);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].pos, point(0.0, 0.0));
        assert_eq!(s[1].pos, point(1.0, 0.0));
        assert_eq!(s[0].dist, 1.0);
    }

    #[test]
    fn close_collapses_trailing_duplicate() {
        let mut s = seq(&[(0.0, 0.0), (2.0, 0.0), (2.0, 0.0)]);
        s.close(false);
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].pos, point(2.0, 0.0));
    }

    #[test]
    fn close_wraps_closed_loops() {
        // The last vertex duplicates the first one of a closed loop.
        let mut s = seq(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        s.close(true);
        assert_eq!(s.len(), 3);
        // The wrap-around distance is measured.
        let wrap = (point(0.0, 0.0) - point(1.0, 1.0)).length();
        assert!((s[2].dist - wrap).abs() < 1e-12);
    }

    #[test]
    fn shorten_trims_both_ends() {
        let mut s = seq(&[(0.0, 0.0), (10.0, 0.0)]);
        s.close(false);
        s.shorten(2.0);
        assert_eq!(s.len(), 2);
        assert!((s[0].pos.x - 2.0).abs() < 1e-12);
        assert!((s[1].pos.x - 8.0).abs() < 1e-12);
        assert!((s[0].dist - 6.0).abs() < 1e-12);
    }

    #[test]
    fn shorten_removes_whole_segments() {
        let mut s = seq(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 0.0)]);
        s.close(false);
        s.shorten(3.0);
        assert_eq!(s.len(), 2);
        assert!((s[0].pos.x - 3.0).abs() < 1e-12);
        assert!((s[1].pos.x - 7.0).abs() < 1e-12);
    }

    #[test]
    fn shorten_consuming_everything_empties() {
        let mut s = seq(&[(0.0, 0.0), (10.0, 0.0)]);
        s.close(false);
        s.shorten(5.0);
        assert!(s.is_empty());

        let mut s = seq(&[(0.0, 0.0), (10.0, 0.0)]);
        s.close(false);
        s.shorten(7.0);
        assert!(s.is_empty());
    }
}
