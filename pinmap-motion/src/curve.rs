//! Quadratic Bézier curves with arc-length parameterisation

use pinmap_core::Point3f;

/// Number of chords used to approximate the arc length
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Control points closer than this (relative to their magnitude) count as one point
pub const COINCIDENT_EPSILON: f32 = 1.0e-5;

/// Whether `a` and `b` are the same point up to f32 rounding
pub fn coincident(a: &Point3f, b: &Point3f) -> bool {
    let scale = a.coords.norm().max(b.coords.norm()).max(1.0);
    (a - b).norm() <= COINCIDENT_EPSILON * scale
}

/// A quadratic Bézier curve in 3D.
///
/// The curve is immutable once built; its cumulative arc-length table is
/// computed up front so that [`point_at`](Self::point_at) samples at uniform
/// distance along the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticBezier3 {
    start: Point3f,
    control: Point3f,
    end: Point3f,
    arc_lengths: Vec<f32>,
}

impl QuadraticBezier3 {
    pub fn new(start: Point3f, control: Point3f, end: Point3f) -> Self {
        let mut curve = Self {
            start,
            control,
            end,
            arc_lengths: Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1),
        };
        curve.arc_lengths = curve.compute_arc_lengths(ARC_LENGTH_DIVISIONS);
        curve
    }

    pub fn start(&self) -> Point3f {
        self.start
    }

    pub fn control(&self) -> Point3f {
        self.control
    }

    pub fn end(&self) -> Point3f {
        self.end
    }

    /// Point at raw curve parameter `u` in [0, 1]
    pub fn point(&self, u: f32) -> Point3f {
        let u = u.clamp(0.0, 1.0);
        let k = 1.0 - u;
        Point3f::from(
            self.start.coords * (k * k) + self.control.coords * (2.0 * k * u) + self.end.coords * (u * u),
        )
    }

    /// All three control points are the same point
    pub fn is_degenerate(&self) -> bool {
        coincident(&self.start, &self.control) && coincident(&self.start, &self.end)
    }

    /// Approximate arc length
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at fraction `t` of the arc length
    pub fn point_at(&self, t: f32) -> Point3f {
        self.point(self.u_from_t(t))
    }

    /// `divisions + 1` points sampled at evenly spaced curve parameters
    pub fn points(&self, divisions: usize) -> Vec<Point3f> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point(d as f32 / divisions as f32))
            .collect()
    }

    /// Map an arc-length fraction to the curve parameter
    fn u_from_t(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let total = self.length();
        if total <= 0.0 || !total.is_finite() {
            return t;
        }

        let target = t * total;
        let last = self.arc_lengths.len() - 1;
        let i = self
            .arc_lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(last - 1);

        let before = self.arc_lengths[i];
        let after = self.arc_lengths[i + 1];
        let segment = after - before;
        let fraction = if segment > 0.0 { (target - before) / segment } else { 0.0 };

        ((i as f32 + fraction) / last as f32).clamp(0.0, 1.0)
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        // Rounding in `point` would otherwise add up to a small non-zero length
        if self.is_degenerate() {
            return vec![0.0; divisions + 1];
        }

        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut previous = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += (current - previous).norm();
            lengths.push(sum);
            previous = current;
        }
        lengths
    }
}
