use crate::base::MaterialConstants;
use crate::StrError;
use plotpy::linspace;
use russell_lab::math::PI;
use russell_lab::Vector;

/// Defines the shear-to-compression ratio Q1 of a triangular deviatoric section (1/√3)
pub const Q1_TRIANGULAR: f64 = 0.5773502691896258;

/// Defines the tension-to-compression ratio Q2 of a triangular deviatoric section
pub const Q2_TRIANGULAR: f64 = 0.5;

/// Implements the shear failure surface of the CSCM model
///
/// The compressive meridian (TXC) is
///
/// ```text
/// Ff(I1) = α - λ exp(-β I1) + θ I1
/// ```
///
/// and the torsional (TOR) and tensile (TXE) meridians are obtained by scaling TXC
/// with the ratios Q1(I1) and Q2(I1). For I1 ≤ 0 the ratios take the values of a
/// triangular deviatoric section (1/√3 and 1/2).
#[derive(Clone, Copy, Debug)]
pub struct YieldSurface {
    alpha: f64,
    lambda: f64,
    beta: f64,
    theta: f64,
    alpha_1: f64,
    lambda_1: f64,
    beta_1: f64,
    theta_1: f64,
    alpha_2: f64,
    lambda_2: f64,
    beta_2: f64,
    theta_2: f64,
}

impl YieldSurface {
    /// Allocates a new instance
    pub fn new(mat: &MaterialConstants) -> Self {
        YieldSurface {
            alpha: mat.alpha,
            lambda: mat.lambda,
            beta: mat.beta,
            theta: mat.theta,
            alpha_1: mat.alpha_1,
            lambda_1: mat.lambda_1,
            beta_1: mat.beta_1,
            theta_1: mat.theta_1,
            alpha_2: mat.alpha_2,
            lambda_2: mat.lambda_2,
            beta_2: mat.beta_2,
            theta_2: mat.theta_2,
        }
    }

    /// Calculates the shear failure function Ff(I1) (TXC meridian)
    pub fn shear_failure(&self, i1: f64) -> f64 {
        self.alpha - self.lambda * f64::exp(-self.beta * i1) + self.theta * i1
    }

    /// Calculates the torsional-to-compressive strength ratio Q1(I1)
    pub fn shear_ratio(&self, i1: f64) -> f64 {
        if i1 <= 0.0 {
            Q1_TRIANGULAR
        } else {
            self.alpha_1 - self.lambda_1 * f64::exp(-self.beta_1 * i1) + self.theta_1 * i1
        }
    }

    /// Calculates the tensile-to-compressive strength ratio Q2(I1)
    pub fn tensile_ratio(&self, i1: f64) -> f64 {
        if i1 <= 0.0 {
            Q2_TRIANGULAR
        } else {
            self.alpha_2 - self.lambda_2 * f64::exp(-self.beta_2 * i1) + self.theta_2 * i1
        }
    }

    /// Calculates the torsional meridian TOR(I1) = Q1(I1) Ff(I1)
    pub fn torsion_meridian(&self, i1: f64) -> f64 {
        self.shear_ratio(i1) * self.shear_failure(i1)
    }

    /// Calculates the tensile meridian TXE(I1) = Q2(I1) Ff(I1)
    pub fn tension_meridian(&self, i1: f64) -> f64 {
        self.tensile_ratio(i1) * self.shear_failure(i1)
    }

    /// Calculates Ff for each I1 value
    pub fn shear_failure_all(&self, i1: &[f64]) -> Vector {
        Vector::from(&i1.iter().map(|v| self.shear_failure(*v)).collect::<Vec<_>>())
    }

    /// Calculates Q1 for each I1 value
    pub fn shear_ratio_all(&self, i1: &[f64]) -> Vector {
        Vector::from(&i1.iter().map(|v| self.shear_ratio(*v)).collect::<Vec<_>>())
    }

    /// Calculates Q2 for each I1 value
    pub fn tensile_ratio_all(&self, i1: &[f64]) -> Vector {
        Vector::from(&i1.iter().map(|v| self.tensile_ratio(*v)).collect::<Vec<_>>())
    }

    /// Calculates TOR for each I1 value
    pub fn torsion_meridian_all(&self, i1: &[f64]) -> Vector {
        Vector::from(&i1.iter().map(|v| self.torsion_meridian(*v)).collect::<Vec<_>>())
    }

    /// Calculates TXE for each I1 value
    pub fn tension_meridian_all(&self, i1: &[f64]) -> Vector {
        Vector::from(&i1.iter().map(|v| self.tension_meridian(*v)).collect::<Vec<_>>())
    }

    /// Calculates the Rubin scaling function ℛ(β̂) of the deviatoric section at I1
    ///
    /// β̂ ∈ [-π/6, π/6] spans the section from the tensile (ℛ = Q2) to the
    /// compressive (ℛ = 1) meridian; β̂ = 0 gives the torsional meridian (ℛ = Q1).
    pub fn rubin_scale(&self, i1: f64, beta_hat: f64) -> Result<f64, StrError> {
        let q1 = self.shear_ratio(i1);
        let q2 = self.tensile_ratio(i1);
        let a_0 = 2.0 * q1 * q1 * (q2 - 1.0);
        let a_1 = f64::sqrt(3.0) * q2 + 2.0 * q1 * (q2 - 1.0);
        let a_2 = q2;
        let disc_a = a_1 * a_1 - 4.0 * a_2 * a_0;
        if disc_a < 0.0 || a_2 == 0.0 {
            return Err("cannot compute the Rubin scaling with the current Q1 and Q2");
        }
        let a = (-a_1 + f64::sqrt(disc_a)) / (2.0 * a_2);
        let b = f64::powi(2.0 * q1 + a, 2) - 3.0;
        let (sin, cos) = f64::sin_cos(beta_hat);
        let b_0 = -(3.0 + b - a * a) / 4.0;
        let b_1 = a * (cos - a * sin);
        let b_2 = f64::powi(cos - a * sin, 2) + b * sin * sin;
        let disc_b = b_1 * b_1 - 4.0 * b_2 * b_0;
        if disc_b < 0.0 || b_2 == 0.0 {
            return Err("cannot compute the Rubin scaling at the given angle");
        }
        Ok((-b_1 + f64::sqrt(disc_b)) / (2.0 * b_2))
    }

    /// Calculates the Rubin scaling function over β̂ ∈ [-π/6, π]
    ///
    /// Returns (β̂, ℛ)
    pub fn rubin_curve(&self, i1: f64, resolution: usize) -> Result<(Vector, Vector), StrError> {
        if resolution < 2 {
            return Err("the resolution of the Rubin curve must be ≥ 2");
        }
        let beta_hat = linspace(-PI / 6.0, PI, resolution);
        let mut scale = Vector::new(resolution);
        for i in 0..resolution {
            scale[i] = self.rubin_scale(i1, beta_hat[i])?;
        }
        Ok((Vector::from(&beta_hat), scale))
    }

    /// Calculates the Q1 ratio of a Mohr-Coulomb section with the same Q2
    pub fn mohr_coulomb_ratio(q2: f64) -> f64 {
        f64::sqrt(3.0) * q2 / (1.0 + q2)
    }

    /// Calculates the Q1 ratio of a Willam-Warnke section with the same Q2
    pub fn willam_warnke_ratio(q2: f64) -> Result<f64, StrError> {
        let q = 1.0 - q2 * q2;
        let disc = 3.0 * q + 5.0 * q2 * q2 - 4.0 * q2;
        if disc < 0.0 {
            return Err("Q2 is outside the domain of the Willam-Warnke section");
        }
        let den = 3.0 * q + f64::powi(1.0 - 2.0 * q2, 2);
        Ok((f64::sqrt(3.0) * q + (2.0 * q2 - 1.0) * f64::sqrt(disc)) / den)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
