//! Positions in the plane of a ring-shaped swarm.

use sk_core::SeededRandom;

/// One astronomical unit in km.
pub const AU_KM: f64 = 149_597_871.0;

/// A point in polar coordinates around the swarm centre.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolarPoint {
    pub radius_km: f64,
    /// Degrees in `[0, 360)`.
    pub angle_deg: f64,
}

impl PolarPoint {
    pub fn new(radius_km: f64, angle_deg: f64) -> Self {
        Self { radius_km, angle_deg }
    }

    /// `(x, y)` in km.
    pub fn to_cartesian(self) -> [f64; 2] {
        let theta = self.angle_deg.to_radians();
        [self.radius_km * theta.cos(), self.radius_km * theta.sin()]
    }

    /// Straight-line distance in km (law of cosines).
    pub fn distance_km(self, other: PolarPoint) -> f64 {
        let dtheta = (self.angle_deg - other.angle_deg).to_radians();
        let d2 = self.radius_km.powi(2) + other.radius_km.powi(2)
            - 2.0 * self.radius_km * other.radius_km * dtheta.cos();
        d2.max(0.0).sqrt()
    }
}

/// The region between two concentric circles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annulus {
    pub inner_km: f64,
    pub outer_km: f64,
}

impl Annulus {
    pub fn new(inner_km: f64, outer_km: f64) -> Self {
        Self { inner_km, outer_km }
    }

    /// The 0.95–1.05 AU band a solar swarm occupies.
    pub fn swarm_band() -> Self {
        Self::new(0.95 * AU_KM, 1.05 * AU_KM)
    }

    pub fn width_km(&self) -> f64 {
        self.outer_km - self.inner_km
    }

    pub fn mid_radius_km(&self) -> f64 {
        (self.inner_km + self.outer_km) / 2.0
    }

    /// A point uniformly distributed by *area*.
    ///
    /// Draw order: radius first (uniform in r², so density does not pile up
    /// at the inner edge), then the angle.
    pub fn sample(&self, rng: &mut SeededRandom) -> PolarPoint {
        let r2_inner = self.inner_km * self.inner_km;
        let r2_outer = self.outer_km * self.outer_km;
        let radius_km = (r2_inner + rng.next_f64() * (r2_outer - r2_inner)).sqrt();
        let angle_deg = rng.next_f64() * 360.0;
        PolarPoint { radius_km, angle_deg }
    }
}
