//! Spherical coordinates around the world origin

use pinmap_core::Point3f;

/// Spherical coordinates with the polar angle measured from +Y
/// and the azimuth measured from +Z towards +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle in [0, π]
    pub phi: f32,
    /// Azimuth in (-π, π]
    pub theta: f32,
}

impl Spherical {
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a cartesian point. The origin maps to all zeros.
    pub fn from_point(point: &Point3f) -> Self {
        let radius = point.coords.norm();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            phi: (point.y / radius).clamp(-1.0, 1.0).acos(),
            theta: point.x.atan2(point.z),
        }
    }

    pub fn to_point(&self) -> Point3f {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Point3f::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Signed angle of the shortest rotation from `start` to `end`, in (-π, π]
pub fn shortest_angle(start: f32, end: f32) -> f32 {
    (end - start).sin().atan2((end - start).cos())
}

/// Point halfway between `a` and `b` in spherical coordinates, with the mean
/// radius scaled by `factor`. Both angles travel the short way round.
pub fn angular_midpoint(a: &Point3f, b: &Point3f, factor: f32) -> Point3f {
    let sa = Spherical::from_point(a);
    let sb = Spherical::from_point(b);

    let mid = Spherical {
        radius: (sa.radius + sb.radius) / 2.0 * factor,
        phi: sa.phi + shortest_angle(sa.phi, sb.phi) / 2.0,
        theta: sa.theta + shortest_angle(sa.theta, sb.theta) / 2.0,
    };
    mid.to_point()
}
