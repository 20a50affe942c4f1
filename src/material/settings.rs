use super::YIELD_TOLERANCE;
use crate::base::ParamCscm;

/// Holds the options of the uniaxial integrator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Hardening initiation as a fraction of fc (NH)
    ///
    /// Values outside (0, 1) disable the pre-peak hardening and the effective yield equals fc.
    pub nh: f64,

    /// Hardening rate (CH)
    pub ch: f64,

    /// Multiplier of the accumulated plastic strain in the hardening exponent
    pub hardening_scale: f64,

    /// Tolerance of the yield function to trigger a plastic correction
    pub yield_tolerance: f64,

    /// Constant strain rate (1/s) used to scale fc by the compressive DIF
    pub strain_rate: Option<f64>,
}

impl Settings {
    /// Allocates a new instance
    pub fn new() -> Self {
        Settings {
            nh: 0.0,
            ch: 0.0,
            hardening_scale: 1000.0,
            yield_tolerance: YIELD_TOLERANCE,
            strain_rate: None,
        }
    }

    /// Allocates a new instance with NH and CH taken from the parameters
    pub fn from_param(param: &ParamCscm) -> Self {
        Settings {
            nh: param.nh,
            ch: param.ch,
            ..Settings::new()
        }
    }

    /// Indicates that the pre-peak hardening is active
    pub fn hardening_enabled(&self) -> bool {
        self.nh > 0.0 && self.nh < 1.0
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.nh < 0.0 || self.nh > 1.0 {
            return Some(format!("nh = {:?} is incorrect; it must be 0.0 ≤ nh ≤ 1.0", self.nh));
        }
        if self.ch < 0.0 {
            return Some(format!("ch = {:?} is incorrect; it must be ≥ 0.0", self.ch));
        }
        if !(self.hardening_scale > 0.0) {
            return Some(format!(
                "hardening_scale = {:?} is incorrect; it must be > 0.0",
                self.hardening_scale
            ));
        }
        if !(self.yield_tolerance > 0.0) {
            return Some(format!(
                "yield_tolerance = {:?} is incorrect; it must be > 0.0",
                self.yield_tolerance
            ));
        }
        if let Some(rate) = self.strain_rate {
            if !(rate > 0.0) || !rate.is_finite() {
                return Some(format!("strain_rate = {:?} is incorrect; it must be > 0.0", rate));
            }
        }
        None // all good
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
