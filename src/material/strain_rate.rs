use crate::base::MaterialConstants;
use crate::StrError;
use plotpy::linspace;
use russell_lab::Vector;

/// Defines the quasi-static strain rate in compression (1/s)
pub const STATIC_RATE_COMPRESSION: f64 = 30.0e-6;

/// Defines the quasi-static strain rate in tension (1/s)
pub const STATIC_RATE_TENSION: f64 = 3.0e-6;

/// Defines the strain rate separating the two segments of the CEB-FIP curves (1/s)
pub const RATE_CUTOFF: f64 = 30.0;

/// Defines the reference strength of the CEB-FIP rate relations (MPa)
const F_C0: f64 = 10.0;

/// Selects a dynamic increase factor curve
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DifKind {
    /// CEB-FIP two-segment curve in compression
    CebCompression,

    /// CEB-FIP two-segment curve in tension
    CebTension,

    /// CSCM fluidity model in compression
    CscmCompression,

    /// CSCM fluidity model in tension
    CscmTension,
}

impl DifKind {
    /// Returns the quasi-static strain rate where the curve starts
    pub fn static_rate(&self) -> f64 {
        match self {
            DifKind::CebTension => STATIC_RATE_TENSION,
            _ => STATIC_RATE_COMPRESSION,
        }
    }
}

/// Implements the dynamic increase factors (DIF) as functions of the strain rate
#[derive(Clone, Copy, Debug)]
pub struct StrainRateModel {
    young: f64,
    f_c: f64,
    f_t: f64,
    eta_0_c: f64,
    n_c: f64,
    eta_0_t: f64,
    n_t: f64,
    over_c: f64,
    over_t: f64,
    enabled: bool,
}

impl StrainRateModel {
    /// Allocates a new instance
    pub fn new(mat: &MaterialConstants) -> Self {
        StrainRateModel {
            young: mat.young,
            f_c: mat.f_c,
            f_t: mat.f_t,
            eta_0_c: mat.eta_0_c,
            n_c: mat.n_c,
            eta_0_t: mat.eta_0_t,
            n_t: mat.n_t,
            over_c: mat.over_c,
            over_t: mat.over_t,
            enabled: mat.rate_effects,
        }
    }

    /// Calculates the CEB-FIP DIF in compression
    ///
    /// ```text
    /// DIF = (ε̇/ε̇s)^αs          ε̇ ≤ 30/s
    /// DIF = βs (ε̇/ε̇s)^(1/3)    ε̇ > 30/s
    ///
    /// αs = 1 / (5 + 9 fc/fc0),   βs = 10^(6 αs - 2)
    /// ```
    pub fn ceb_compression(&self, rate: f64) -> Result<f64, StrError> {
        check_rate(rate)?;
        if rate <= STATIC_RATE_COMPRESSION {
            return Ok(1.0);
        }
        let alpha_s = 1.0 / (5.0 + 9.0 * self.f_c / F_C0);
        let ratio = rate / STATIC_RATE_COMPRESSION;
        if rate <= RATE_CUTOFF {
            Ok(f64::powf(ratio, alpha_s))
        } else {
            let beta_s = f64::powf(10.0, 6.0 * alpha_s - 2.0);
            Ok(beta_s * f64::powf(ratio, 1.0 / 3.0))
        }
    }

    /// Calculates the CEB-FIP DIF in tension
    ///
    /// ```text
    /// DIF = (ε̇/ε̇s)^(1.016 δs)   ε̇ ≤ 30/s
    /// DIF = βs (ε̇/ε̇s)^(1/3)     ε̇ > 30/s
    ///
    /// δs = 1 / (10 + 6 fc/fc0),   βs = 10^(7.11 δs - 2.33)
    /// ```
    pub fn ceb_tension(&self, rate: f64) -> Result<f64, StrError> {
        check_rate(rate)?;
        if rate <= STATIC_RATE_TENSION {
            return Ok(1.0);
        }
        let delta_s = 1.0 / (10.0 + 6.0 * self.f_c / F_C0);
        let ratio = rate / STATIC_RATE_TENSION;
        if rate <= RATE_CUTOFF {
            Ok(f64::powf(ratio, 1.016 * delta_s))
        } else {
            let beta_s = f64::powf(10.0, 7.11 * delta_s - 2.33);
            Ok(beta_s * f64::powf(ratio, 1.0 / 3.0))
        }
    }

    /// Calculates the CSCM DIF in compression
    ///
    /// The viscoplastic strength E ε̇ η(ε̇), with η = η₀/ε̇ⁿ, is capped at the over-stress limit.
    pub fn cscm_compression(&self, rate: f64) -> Result<f64, StrError> {
        check_rate(rate)?;
        if !self.enabled {
            return Ok(1.0);
        }
        let eta = self.eta_0_c / f64::powf(rate, self.n_c);
        let strength = f64::min(self.young * rate * eta, self.over_c);
        Ok(strength / self.f_c + 1.0)
    }

    /// Calculates the CSCM DIF in tension
    pub fn cscm_tension(&self, rate: f64) -> Result<f64, StrError> {
        check_rate(rate)?;
        if !self.enabled {
            return Ok(1.0);
        }
        let eta = self.eta_0_t / f64::powf(rate, self.n_t);
        let strength = f64::min(self.young * rate * eta, self.over_t);
        Ok(strength / self.f_t + 1.0)
    }

    /// Calculates the DIF of the selected curve
    pub fn dif(&self, kind: DifKind, rate: f64) -> Result<f64, StrError> {
        match kind {
            DifKind::CebCompression => self.ceb_compression(rate),
            DifKind::CebTension => self.ceb_tension(rate),
            DifKind::CscmCompression => self.cscm_compression(rate),
            DifKind::CscmTension => self.cscm_tension(rate),
        }
    }

    /// Calculates the DIF for each strain rate
    pub fn dif_all(&self, kind: DifKind, rates: &[f64]) -> Result<Vector, StrError> {
        let mut res = Vector::new(rates.len());
        for i in 0..rates.len() {
            res[i] = self.dif(kind, rates[i])?;
        }
        Ok(res)
    }

    /// Returns the (strain rate, DIF) curve from the static rate up to `rate_max`
    pub fn curve(&self, kind: DifKind, rate_max: f64, npoint: usize) -> Result<(Vector, Vector), StrError> {
        if npoint < 2 {
            return Err("the DIF curve requires at least two points");
        }
        if !(rate_max > kind.static_rate()) {
            return Err("the maximum strain rate must be greater than the static strain rate");
        }
        let rates = linspace(kind.static_rate(), rate_max, npoint);
        let dif = self.dif_all(kind, &rates)?;
        Ok((Vector::from(&rates), dif))
    }
}

fn check_rate(rate: f64) -> Result<(), StrError> {
    if !(rate > 0.0) || !rate.is_finite() {
        return Err("the strain rate must be positive and finite");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
