/// Point on the unit sphere stored as a Cartesian unit vector.
///
/// Coordinates are derived once from the polar angle `phi` and the azimuth
/// `theta`; the vector is never mutated afterwards, so it keeps unit norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPoint {
    x: f64,
    y: f64,
    z: f64,
}

impl SphericalPoint {
    /// Build a point from its polar angle and azimuth, both in radians.
    pub fn from_angles(phi: f64, theta: f64) -> Self {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Self {
            x: sin_phi * cos_theta,
            y: sin_phi * sin_theta,
            z: cos_phi,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Inner product with another point.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Great-circle (angular) distance to another point, in radians.
    ///
    /// Rounding can push the inner product of nearly coincident or antipodal
    /// points just outside `[-1, 1]`, so it is clamped before `acos`.
    pub fn angle_to(&self, other: &Self) -> f64 {
        self.dot(other).clamp(-1.0, 1.0).acos()
    }

    /// Angular distance scaled by `weight`. Coincident points are zero apart
    /// at any weight, including an infinite one.
    pub fn weighted_distance(&self, other: &Self, weight: f64) -> f64 {
        let angle = self.angle_to(other);
        if angle == 0.0 {
            0.0
        } else {
            weight * angle
        }
    }

    /// Polar angle reconstructed from the stored vector.
    pub fn phi(&self) -> f64 {
        self.z.clamp(-1.0, 1.0).acos()
    }

    /// Azimuth reconstructed from the stored vector, in `(-pi, pi]`.
    pub fn theta(&self) -> f64 {
        self.y.atan2(self.x)
    }
}
