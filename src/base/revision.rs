use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluates the quadratic fit a·fc² + b·fc + c
#[inline]
pub fn poly(fc: f64, a: f64, b: f64, c: f64) -> f64 {
    a * fc * fc + b * fc + c
}

/// Defines the family of closed-form parameter fits
///
/// Each revision corresponds to a different calibration study of the same
/// physical quantities. The numbers 1, 2, and 3 are used in input files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Revision {
    /// Original fits of the FHWA report (polynomials in fc)
    Rev1,

    /// Exponential fits
    Rev2,

    /// Power-law fits (default)
    #[default]
    Rev3,
}

impl Revision {
    /// Returns all revisions
    pub fn all() -> [Revision; 3] {
        [Revision::Rev1, Revision::Rev2, Revision::Rev3]
    }

    /// Returns the number identifying this revision
    pub fn number(&self) -> u8 {
        match self {
            Revision::Rev1 => 1,
            Revision::Rev2 => 2,
            Revision::Rev3 => 3,
        }
    }

    /// Returns the fit functions of this revision
    pub fn fit(&self) -> &'static dyn RevisionFit {
        match self {
            Revision::Rev1 => &FitRev1,
            Revision::Rev2 => &FitRev2,
            Revision::Rev3 => &FitRev3,
        }
    }
}

impl TryFrom<u8> for Revision {
    type Error = StrError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Revision::Rev1),
            2 => Ok(Revision::Rev2),
            3 => Ok(Revision::Rev3),
            _ => Err("revision must be 1, 2, or 3"),
        }
    }
}

impl From<Revision> for u8 {
    fn from(revision: Revision) -> Self {
        revision.number()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rev{}", self.number())
    }
}

/// Defines the coefficients of the yield and cap surfaces as functions of fc (MPa)
///
/// TXC, TOR, and TXE denote the compressive, torsional (shear), and tensile meridians.
pub trait RevisionFit: Send + Sync {
    /// TXC constant term α
    fn alpha(&self, fc: f64) -> f64;

    /// TXC exponential amplitude λ
    fn lambda(&self, fc: f64) -> f64;

    /// TXC exponential decay β
    fn beta(&self, fc: f64) -> f64;

    /// TXC linear term θ
    fn theta(&self, fc: f64) -> f64;

    /// TOR constant term α₁
    fn alpha_1(&self, fc: f64) -> f64;

    /// TOR exponential amplitude λ₁
    fn lambda_1(&self, fc: f64) -> f64;

    /// TOR exponential decay β₁
    fn beta_1(&self, fc: f64) -> f64;

    /// TOR linear term θ₁
    fn theta_1(&self, fc: f64) -> f64;

    /// TXE constant term α₂
    fn alpha_2(&self, fc: f64) -> f64;

    /// TXE exponential amplitude λ₂
    fn lambda_2(&self, fc: f64) -> f64;

    /// TXE exponential decay β₂
    fn beta_2(&self, fc: f64) -> f64;

    /// TXE linear term θ₂
    fn theta_2(&self, fc: f64) -> f64;

    /// Initial cap intersection with the hydrostatic axis X₀ (κ₀)
    fn kappa_0(&self, fc: f64) -> f64;

    /// Cap ellipticity ratio R
    fn ellipticity(&self, fc: f64) -> f64;

    /// Maximum plastic volume strain W
    fn max_plastic_volume_strain(&self, fc: f64) -> f64;

    /// Linear hardening shape coefficient D₁
    fn d1(&self, fc: f64) -> f64;

    /// Quadratic hardening shape coefficient D₂
    fn d2(&self, fc: f64) -> f64;
}

/// Implements the fits of revision 1
pub struct FitRev1;

/// Implements the fits of revision 2
pub struct FitRev2;

/// Implements the fits of revision 3
pub struct FitRev3;

impl RevisionFit for FitRev1 {
    fn alpha(&self, fc: f64) -> f64 {
        poly(fc, -0.003, 0.3169747, 7.7047)
    }
    fn lambda(&self, _: f64) -> f64 {
        10.5
    }
    fn beta(&self, _: f64) -> f64 {
        1.929e-2
    }
    fn theta(&self, fc: f64) -> f64 {
        poly(fc, 1.3216e-5, 2.3548e-3, 0.2140058)
    }
    fn alpha_1(&self, _: f64) -> f64 {
        0.74735
    }
    fn lambda_1(&self, _: f64) -> f64 {
        0.17
    }
    fn beta_1(&self, fc: f64) -> f64 {
        poly(fc, -1.9972e-5, 2.2655e-4, 8.1748e-2)
    }
    fn theta_1(&self, fc: f64) -> f64 {
        poly(fc, -4.0856e-7, -1.2132e-6, 1.5593e-3)
    }
    fn alpha_2(&self, _: f64) -> f64 {
        0.66
    }
    fn lambda_2(&self, _: f64) -> f64 {
        0.16
    }
    fn beta_2(&self, fc: f64) -> f64 {
        poly(fc, -1.9972e-5, 2.2655e-4, 8.2748e-2)
    }
    fn theta_2(&self, fc: f64) -> f64 {
        poly(fc, -4.8697e-7, -1.8883e-6, 1.8822e-3)
    }
    fn kappa_0(&self, fc: f64) -> f64 {
        poly(fc, 8.769178e-3, -7.3302306e-2, 84.85)
    }
    fn ellipticity(&self, _: f64) -> f64 {
        5.0
    }
    fn max_plastic_volume_strain(&self, _: f64) -> f64 {
        0.05
    }
    fn d1(&self, _: f64) -> f64 {
        2.5e-4
    }
    fn d2(&self, _: f64) -> f64 {
        3.49e-7
    }
}

impl RevisionFit for FitRev2 {
    fn alpha(&self, fc: f64) -> f64 {
        13.9846 * f64::exp(fc / 68.8756) - 13.8981
    }
    fn lambda(&self, fc: f64) -> f64 {
        3.6657 * f64::exp(fc / 39.9363) - 4.7092
    }
    fn beta(&self, fc: f64) -> f64 {
        18.17791 * f64::powf(fc, -1.7163)
    }
    fn theta(&self, fc: f64) -> f64 {
        0.3533 - 3.3294e-4 * fc - 3.8182e-6 * fc * fc
    }
    fn alpha_1(&self, _: f64) -> f64 {
        0.82
    }
    fn lambda_1(&self, _: f64) -> f64 {
        0.2407
    }
    fn beta_1(&self, fc: f64) -> f64 {
        0.33565 * f64::powf(fc, -0.95383)
    }
    fn theta_1(&self, _: f64) -> f64 {
        0.0
    }
    fn alpha_2(&self, _: f64) -> f64 {
        0.76
    }
    fn lambda_2(&self, _: f64) -> f64 {
        0.26
    }
    fn beta_2(&self, fc: f64) -> f64 {
        0.285 * f64::powf(fc, -0.94843)
    }
    fn theta_2(&self, _: f64) -> f64 {
        0.0
    }
    fn kappa_0(&self, fc: f64) -> f64 {
        17.087 + 1.892 * fc
    }
    fn ellipticity(&self, fc: f64) -> f64 {
        4.45994 * f64::exp(-fc / 11.51679) + 1.95358
    }
    fn max_plastic_volume_strain(&self, _: f64) -> f64 {
        0.065
    }
    fn d1(&self, _: f64) -> f64 {
        6.11e-4
    }
    fn d2(&self, _: f64) -> f64 {
        2.225e-6
    }
}

impl RevisionFit for FitRev3 {
    fn alpha(&self, fc: f64) -> f64 {
        poly(fc, 2.5801e-3, 1.6405e-1, 4.3506e-1)
    }
    fn lambda(&self, fc: f64) -> f64 {
        3.0220e-3 * f64::powf(fc, 2.0231)
    }
    fn beta(&self, fc: f64) -> f64 {
        1.2317e1 * f64::powf(fc, -1.5974)
    }
    fn theta(&self, fc: f64) -> f64 {
        poly(fc, -3.4286e-6, -3.7971e-4, 3.5436e-1)
    }
    fn alpha_1(&self, fc: f64) -> f64 {
        1.0 / f64::sqrt(3.0) + self.lambda_1(fc)
    }
    fn lambda_1(&self, fc: f64) -> f64 {
        -2.0833e-7 * fc * fc * fc + poly(fc, 3.7571e-5, -2.3049e-3, 2.8860e-1)
    }
    fn beta_1(&self, fc: f64) -> f64 {
        3.4093e-1 * f64::powf(fc, -9.4944e-1)
    }
    fn theta_1(&self, _: f64) -> f64 {
        0.0
    }
    fn alpha_2(&self, fc: f64) -> f64 {
        // rounded to four decimal places as published
        f64::round((0.5 + self.lambda_2(fc)) * 1e4) / 1e4
    }
    fn lambda_2(&self, fc: f64) -> f64 {
        3.0029e-1 * f64::powf(fc, -4.2269e-2)
    }
    fn beta_2(&self, fc: f64) -> f64 {
        2.8898e-1 * f64::powf(fc, -9.4776e-1)
    }
    fn theta_2(&self, _: f64) -> f64 {
        0.0
    }
    fn kappa_0(&self, fc: f64) -> f64 {
        4.0224 * fc - 70.784
    }
    fn ellipticity(&self, fc: f64) -> f64 {
        poly(fc, 5.0e-4, -5.9e-2, 3.66)
    }
    fn max_plastic_volume_strain(&self, _: f64) -> f64 {
        0.065
    }
    fn d1(&self, _: f64) -> f64 {
        6.11e-4
    }
    fn d2(&self, _: f64) -> f64 {
        2.225e-6
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{poly, Revision};
    use russell_lab::approx_eq;

    #[test]
    fn derive_and_conversions_work() {
        let rev = Revision::Rev2.clone();
        assert_eq!(rev, Revision::Rev2);
        assert_eq!(format!("{:?}", rev), "Rev2");
        assert_eq!(format!("{}", rev), "rev2");
        assert_eq!(Revision::default(), Revision::Rev3);
        assert_eq!(Revision::try_from(1_u8), Ok(Revision::Rev1));
        assert_eq!(Revision::try_from(3_u8), Ok(Revision::Rev3));
        assert_eq!(u8::from(Revision::Rev2), 2);
    }

    #[test]
    fn invalid_revision_is_rejected() {
        assert_eq!(Revision::try_from(0_u8).err(), Some("revision must be 1, 2, or 3"));
        assert_eq!(Revision::try_from(4_u8).err(), Some("revision must be 1, 2, or 3"));
    }

    #[test]
    fn serde_uses_numbers() {
        let json = serde_json::to_string(&Revision::Rev1).unwrap();
        assert_eq!(json, "1");
        let rev: Revision = serde_json::from_str("2").unwrap();
        assert_eq!(rev, Revision::Rev2);
        assert!(serde_json::from_str::<Revision>("7").is_err());
    }

    #[test]
    fn poly_works() {
        assert_eq!(poly(2.0, 1.0, 2.0, 3.0), 11.0);
    }

    #[test]
    fn rev1_fits_work() {
        let fit = Revision::Rev1.fit();
        let fc = 35.0;
        approx_eq(fit.alpha(fc), 15.1238145, 1e-12);
        approx_eq(fit.lambda(fc), 10.5, 1e-15);
        approx_eq(fit.beta(fc), 0.01929, 1e-15);
        approx_eq(fit.theta(fc), 0.3126134, 1e-12);
        approx_eq(fit.kappa_0(fc), 93.02666234, 1e-10);
        approx_eq(fit.ellipticity(fc), 5.0, 1e-15);
        approx_eq(fit.max_plastic_volume_strain(fc), 0.05, 1e-15);
    }

    #[test]
    fn rev2_fits_work() {
        let fit = Revision::Rev2.fit();
        let fc = 35.0;
        approx_eq(fit.alpha(fc), 9.347579027779926, 1e-12);
        approx_eq(fit.lambda(fc), 4.096638550194105, 1e-12);
        approx_eq(fit.beta(fc), 0.04068740242024893, 1e-14);
        approx_eq(fit.theta(fc), 0.33696980499999996, 1e-14);
        approx_eq(fit.kappa_0(fc), 83.307, 1e-12);
        approx_eq(fit.ellipticity(fc), 2.1671253732955313, 1e-12);
        assert_eq!(fit.theta_1(fc), 0.0);
        assert_eq!(fit.theta_2(fc), 0.0);
    }

    #[test]
    fn rev3_fits_work() {
        let fit = Revision::Rev3.fit();
        let fc = 35.0;
        approx_eq(fit.alpha(fc), 9.3374325, 1e-12);
        approx_eq(fit.lambda(fc), 4.018819681966958, 1e-12);
        approx_eq(fit.beta(fc), 0.04207369432535729, 1e-14);
        approx_eq(fit.theta(fc), 0.336870115, 1e-14);
        approx_eq(fit.kappa_0(fc), 70.0, 1e-12);
        approx_eq(fit.ellipticity(fc), 2.2075, 1e-14);
        approx_eq(fit.lambda_1(fc), 0.24502082625000005, 1e-14);
        approx_eq(fit.alpha_1(fc), 0.8223710954396259, 1e-14);
        approx_eq(fit.beta_1(fc), 0.011659106099329162, 1e-14);
        approx_eq(fit.lambda_2(fc), 0.2583893787591575, 1e-14);
        approx_eq(fit.alpha_2(fc), 0.7584, 1e-15);
        approx_eq(fit.beta_2(fc), 0.009941727544573217, 1e-14);
        approx_eq(fit.d1(fc), 6.11e-4, 1e-15);
        approx_eq(fit.d2(fc), 2.225e-6, 1e-15);
    }
}
