//! Globally adaptive Gauss–Kronrod (7/15) quadrature on a finite interval.

use thiserror::Error;

const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

// Gauss weights for the nodes XGK[1], XGK[3], XGK[5], XGK[7].
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Stopping rules for [`integrate`].
#[derive(Debug, Clone, Copy)]
pub struct QuadratureSettings {
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            abs_tolerance: 1.49e-8,
            rel_tolerance: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

/// Converged integral together with its error estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub error_estimate: f64,
    pub subdivisions: usize,
}

#[derive(Debug, Error, PartialEq)]
pub enum QuadratureError {
    #[error(
        "quadrature did not converge after {subdivisions} subdivisions \
         (estimate {estimate:e}, error {error_estimate:e})"
    )]
    NotConverged {
        estimate: f64,
        error_estimate: f64,
        subdivisions: usize,
    },
    #[error("integrand produced a non-finite value on [{a:e}, {b:e}]")]
    NonFinite { a: f64, b: f64 },
    #[error("integration bounds [{a}, {b}] are not an increasing finite interval")]
    InvalidInterval { a: f64, b: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Integrate `f` over `[a, b]`, bisecting the worst segment until the summed
/// error estimate is within `max(abs_tolerance, rel_tolerance·|I|)`.
pub fn integrate<F>(
    f: F,
    a: f64,
    b: f64,
    settings: &QuadratureSettings,
) -> Result<Quadrature, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(QuadratureError::InvalidInterval { a, b });
    }

    let mut segments = vec![kronrod_segment(&f, a, b)?];
    loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();
        let tolerance = settings.abs_tolerance.max(settings.rel_tolerance * value.abs());
        if error <= tolerance {
            return Ok(Quadrature {
                value,
                error_estimate: error,
                subdivisions: segments.len(),
            });
        }
        if segments.len() >= settings.max_subdivisions.max(1) {
            return Err(QuadratureError::NotConverged {
                estimate: value,
                error_estimate: error,
                subdivisions: segments.len(),
            });
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.a + segment.b);
        if mid <= segment.a || mid >= segment.b {
            // interval can no longer be split in floating point
            return Err(QuadratureError::NotConverged {
                estimate: value,
                error_estimate: error,
                subdivisions: segments.len() + 1,
            });
        }
        segments.push(kronrod_segment(&f, segment.a, mid)?);
        segments.push(kronrod_segment(&f, mid, segment.b)?);
    }
}

fn kronrod_segment<F>(f: &F, a: f64, b: f64) -> Result<Segment, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    let value = kronrod * half;
    let error = ((kronrod - gauss) * half).abs();
    if !(value.is_finite() && error.is_finite()) {
        return Err(QuadratureError::NonFinite { a, b });
    }
    Ok(Segment { a, b, value, error })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_polynomials_exactly() {
        let settings = QuadratureSettings::default();
        let q = integrate(|x| 3.0 * x * x + 2.0 * x + 1.0, 0.0, 2.0, &settings).unwrap();
        assert!((q.value - 14.0).abs() < 1e-12, "value = {}", q.value);
        assert_eq!(q.subdivisions, 1);
    }

    #[test]
    fn integrates_sharp_peak_by_subdividing() {
        let settings = QuadratureSettings::default();
        let q = integrate(|x| 1.0 / (1.0e-4 + x * x), -1.0, 1.0, &settings).unwrap();
        let expected = 2.0 * (1.0 / 1.0e-2) * (1.0_f64 / 1.0e-2).atan();
        assert!((q.value - expected).abs() / expected < 1e-8);
        assert!(q.subdivisions > 1);
    }

    #[test]
    fn reports_non_convergence() {
        let settings = QuadratureSettings {
            max_subdivisions: 2,
            ..QuadratureSettings::default()
        };
        let err = integrate(|x| (50.0 * x).sin().abs(), 0.0, 10.0, &settings).unwrap_err();
        assert!(matches!(err, QuadratureError::NotConverged { .. }));
    }

    #[test]
    fn rejects_reversed_bounds() {
        let err = integrate(|x| x, 1.0, 0.0, &QuadratureSettings::default()).unwrap_err();
        assert_eq!(err, QuadratureError::InvalidInterval { a: 1.0, b: 0.0 });
    }
}
