//! Core units, constants, and shared primitives for the IR signature workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// First radiation constant used by the exitance form of Planck's law (W·m²).
    pub const C1: f64 = 3.7415e-16;
    /// Second radiation constant (m·K).
    pub const C2: f64 = 1.438e-2;
    /// Stefan–Boltzmann constant (W/m²/K⁴).
    pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;
    /// Number of samples in a full angular sweep.
    pub const SWEEP_SAMPLES: usize = 360;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert micrometres to metres.
    #[inline]
    pub fn um_to_m(v: f64) -> f64 {
        v * 1.0e-6
    }

    /// Convert metres to micrometres.
    #[inline]
    pub fn m_to_um(v: f64) -> f64 {
        v * 1.0e6
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert millikelvin to kelvin.
    #[inline]
    pub fn mk_to_k(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kelvin to millikelvin.
    #[inline]
    pub fn k_to_mk(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert milliseconds to seconds.
    #[inline]
    pub fn ms_to_s(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert seconds to milliseconds.
    #[inline]
    pub fn s_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }
}

/// Angle helpers shared by the sweep and lookup code.
pub mod angle {
    use std::f64::consts::TAU;

    /// Wrap an angle in radians onto `[0, 2π)`.
    #[inline]
    pub fn wrap_radians(beta: f64) -> f64 {
        let wrapped = beta.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    /// Shortest separation between two angles on the circle, in radians.
    #[inline]
    pub fn circular_distance(a: f64, b: f64) -> f64 {
        let diff = wrap_radians(a - b);
        diff.min(TAU - diff)
    }

    /// Uniform grid of `samples` angles spanning `[0, 2π)`.
    pub fn uniform_sweep(samples: usize) -> Vec<f64> {
        (0..samples)
            .map(|i| TAU * i as f64 / samples as f64)
            .collect()
    }
}
