use crate::StrError;
use plotpy::linspace;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};

/// Defines the reference strength used to normalize fc in the CEB-FIP relations (MPa)
pub const CEB_FIP_F_CM0: f64 = 10.0;

/// Defines the default difference between mean and characteristic strength (MPa)
pub const CEB_FIP_DELTA_F: f64 = 8.0;

/// Defines the range of characteristic strengths covered by the Model Code relations (MPa)
pub const CEB_FIP_STRENGTH_RANGE: (f64, f64) = (12.0, 80.0);

/// Holds the base properties of concrete
///
/// Units: MPa for stresses and moduli, N·mm/mm² for fracture energies, and mm for lengths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConcreteProperties {
    /// Young's modulus E
    pub young: f64,

    /// Poisson's coefficient ν
    pub poisson: f64,

    /// Characteristic compressive strength fc
    pub f_c: f64,

    /// Mean compressive strength fcm
    pub f_cm: f64,

    /// Uniaxial tensile strength ft
    pub f_t: f64,

    /// Tensile fracture energy Gft
    pub g_ft: f64,

    /// Compressive fracture energy Gfc
    pub g_fc: f64,

    /// Shear fracture energy Gfs
    pub g_fs: f64,

    /// Shear modulus G
    pub gg: f64,

    /// Bulk modulus K
    pub kk: f64,

    /// Maximum aggregate size
    pub aggregate_size: f64,
}

impl ConcreteProperties {
    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        let positive = [
            ("young", self.young),
            ("f_c", self.f_c),
            ("f_t", self.f_t),
            ("g_ft", self.g_ft),
            ("g_fc", self.g_fc),
            ("g_fs", self.g_fs),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Some(format!("{} = {:?} is incorrect; it must be > 0.0", name, value));
            }
        }
        if !(self.poisson > 0.0 && self.poisson < 0.5) {
            return Some(format!(
                "poisson = {:?} is incorrect; it must be 0.0 < ν < 0.5",
                self.poisson
            ));
        }
        None // all good
    }
}

/// Defines the source of the base properties of concrete
pub trait PropertyProvider {
    /// Returns the properties for a characteristic compressive strength (MPa) and maximum aggregate size (mm)
    fn properties(&self, strength: f64, aggregate_size: f64) -> Result<ConcreteProperties, StrError>;
}

/// Implements the CEB-FIP Model Code 1990 relations for normal concrete
#[derive(Clone, Copy, Debug)]
pub struct CebFip {
    /// Difference Δf between the mean and the characteristic compressive strength
    pub delta_f: f64,

    /// Number of points of the reference curves
    pub npoint: usize,
}

impl CebFip {
    /// Allocates a new instance
    pub fn new() -> Self {
        CebFip {
            delta_f: CEB_FIP_DELTA_F,
            npoint: 100,
        }
    }

    /// Returns the strain εc1 at the peak compressive stress (negative)
    pub fn epsilon_c1(props: &ConcreteProperties) -> f64 {
        -f64::min(0.7 * f64::powf(props.f_cm, 0.31), 2.8) / 1000.0
    }

    /// Returns the plasticity number k = E / Ec1 and the strain εc,lim where the stress drops to fcm/2
    fn sargin(props: &ConcreteProperties) -> (f64, f64) {
        let eps_c1 = CebFip::epsilon_c1(props);
        let e_c1 = props.f_cm / f64::abs(eps_c1);
        let k = props.young / e_c1;
        let h = 0.5 * k + 1.0;
        let eps_lim = (0.5 * h + f64::sqrt(0.25 * h * h - 0.5)) * eps_c1;
        (k, eps_lim)
    }

    /// Calculates the compressive stress (negative) on the CEB-FIP curve for a compressive strain (negative)
    pub fn compression_stress(props: &ConcreteProperties, strain: f64) -> f64 {
        let eps_c1 = CebFip::epsilon_c1(props);
        let (k, eps_lim) = CebFip::sargin(props);
        if f64::abs(strain) <= f64::abs(eps_lim) {
            let eta = strain / eps_c1;
            return -props.f_cm * (k * eta - eta * eta) / (1.0 + (k - 2.0) * eta);
        }
        let eta_1 = strain / eps_c1;
        let eta_2 = eps_lim / eps_c1;
        let xi = 4.0 * (eta_2 * eta_2 * (k - 2.0) + 2.0 * eta_2 - k) / f64::powi(eta_2 * (k - 2.0) + 1.0, 2);
        let den = (xi / eta_2 - 2.0 / (eta_2 * eta_2)) * eta_1 * eta_1 + (4.0 / eta_2 - xi) * eta_1;
        -props.f_cm / den
    }

    /// Calculates the tensile stress on the bilinear CEB-FIP curve
    pub fn tension_stress(props: &ConcreteProperties, strain: f64) -> f64 {
        let linear = props.young * strain;
        if linear <= 0.9 * props.f_t {
            return linear;
        }
        let r = (0.00015 - strain) / (0.00015 - 0.9 * props.f_t / props.young);
        props.f_t * (1.0 - 0.1 * r)
    }

    /// Calculates the bridging stress for a crack opening w
    pub fn crack_opening_stress(props: &ConcreteProperties, w: f64) -> f64 {
        let w1 = props.g_ft / props.f_t;
        if w <= w1 {
            props.f_t * (1.0 - 0.8 * w / w1)
        } else {
            props.f_t * (0.25 - 0.05 * w / w1)
        }
    }

    /// Returns the compressive (strain, stress) curve from zero to 5·εc,lim
    pub fn compression_curve(&self, props: &ConcreteProperties) -> Result<(Vector, Vector), StrError> {
        let (_, eps_lim) = CebFip::sargin(props);
        let half = self.half()?;
        let mut strain = linspace(0.0, eps_lim, half);
        strain.extend(linspace(eps_lim, 5.0 * eps_lim, half));
        let stress: Vec<f64> = strain.iter().map(|e| CebFip::compression_stress(props, *e)).collect();
        Ok((Vector::from(&strain), Vector::from(&stress)))
    }

    /// Returns the tensile (strain, stress) curve up to 0.15‰
    pub fn tension_curve(&self, props: &ConcreteProperties) -> Result<(Vector, Vector), StrError> {
        self.half()?;
        let strain = linspace(0.0, 0.15 / 1000.0, self.npoint);
        let stress: Vec<f64> = strain.iter().map(|e| CebFip::tension_stress(props, *e)).collect();
        Ok((Vector::from(&strain), Vector::from(&stress)))
    }

    /// Returns the (crack opening, stress) curve from zero to wc = 5·Gf/ft
    pub fn crack_opening_curve(&self, props: &ConcreteProperties) -> Result<(Vector, Vector), StrError> {
        let w1 = props.g_ft / props.f_t;
        let half = self.half()?;
        let mut w = linspace(0.0, w1, half);
        w.extend(linspace(w1, 5.0 * w1, half));
        let stress: Vec<f64> = w.iter().map(|x| CebFip::crack_opening_stress(props, *x)).collect();
        Ok((Vector::from(&w), Vector::from(&stress)))
    }

    fn half(&self) -> Result<usize, StrError> {
        if self.npoint < 4 {
            return Err("the number of points of the reference curves must be ≥ 4");
        }
        Ok(self.npoint / 2)
    }
}

impl PropertyProvider for CebFip {
    fn properties(&self, strength: f64, aggregate_size: f64) -> Result<ConcreteProperties, StrError> {
        if !(strength > 0.0) || !strength.is_finite() {
            return Err("the compressive strength must be positive");
        }
        if !(aggregate_size > 0.0) || !aggregate_size.is_finite() {
            return Err("the maximum aggregate size must be positive");
        }
        let (min, max) = CEB_FIP_STRENGTH_RANGE;
        if strength < min || strength > max {
            tracing::warn!(strength, min, max, "compressive strength outside of the CEB-FIP range");
        }
        let f_cm = strength + self.delta_f;
        let f_t = if strength <= 50.0 {
            0.3 * f64::powf(strength, 2.0 / 3.0)
        } else {
            2.12 * f64::ln(1.0 + 0.1 * f_cm)
        };
        let g_f0 = 0.021 + 5.357e-4 * aggregate_size;
        let g_f = g_f0 * f64::powf(f_cm / CEB_FIP_F_CM0, 0.7);
        let young = 21.5e3 * f64::powf(f_cm / CEB_FIP_F_CM0, 1.0 / 3.0);
        let poisson = 0.2;
        Ok(ConcreteProperties {
            young,
            poisson,
            f_c: strength,
            f_cm,
            f_t,
            g_ft: g_f,
            g_fc: 100.0 * g_f,
            g_fs: g_f,
            gg: young / (2.0 * (1.0 + poisson)),
            kk: young / (3.0 * (1.0 - 2.0 * poisson)),
            aggregate_size,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
