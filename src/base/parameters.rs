use super::Revision;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Defines how the damage shape parameters B (ductile) and D (brittle) are obtained
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SofteningFit {
    /// Constant values B = 100 and D = 0.1
    Constant,

    /// Values fitted from the fracture energies and the element size
    Fitted,
}

/// Holds the input parameters of the CSCM concrete model
///
/// The fields named after the `*MAT_CSCM` keyword are passed through to the keyword
/// export. Missing fields in a JSON input take the default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamCscm {
    /// Characteristic compressive strength fc (MPa)
    pub strength: f64,

    /// Maximum aggregate size (mm)
    pub aggregate_size: f64,

    /// Family of parameter fits
    pub revision: Revision,

    /// Method to obtain the damage shape parameters
    pub softening_fit: SofteningFit,

    /// Characteristic length of the element (mm)
    pub element_size: f64,

    /// Material identification number (MID)
    pub material_id: usize,

    /// Mass density (RHO)
    pub density: f64,

    /// Plotting variable selector (NPLOT)
    pub nplot: usize,

    /// Maximum strain increment for subincrementation (INCRE)
    pub incre: f64,

    /// Rate effects switch (IRATE)
    pub rate_effects: bool,

    /// Erosion as the maximum principal strain minus one; None disables erosion (ERODE)
    pub erode: Option<f64>,

    /// Modulus recovery in compression in [0,1]; None means full recovery (RECOV)
    pub recov: Option<f64>,

    /// Cap retraction switch (ITRETRC)
    pub cap_retraction: bool,

    /// Pre-existing damage in [0,1); None disables it (PRED)
    pub pred: Option<f64>,

    /// Power that increases the fracture energy with rate effects (REPOW)
    pub repow: f64,

    /// Hardening initiation as a fraction of fc (NH)
    pub nh: f64,

    /// Hardening rate (CH)
    pub ch: f64,

    /// Shear-to-compression transition parameter (PWRC)
    pub pwrc: f64,

    /// Shear-to-tension transition parameter (PWRT)
    pub pwrt: f64,

    /// Moderate pressure softening parameter (PMOD)
    pub pmod: f64,
}

impl ParamCscm {
    /// Allocates a new instance with default values (C35 concrete with 19 mm aggregates)
    pub fn new() -> Self {
        ParamCscm {
            strength: 35.0,
            aggregate_size: 19.0,
            revision: Revision::Rev3,
            softening_fit: SofteningFit::Constant,
            element_size: 200.0,
            material_id: 159,
            density: 2.4e-9,
            nplot: 1,
            incre: 0.0,
            rate_effects: true,
            erode: None,
            recov: None,
            cap_retraction: false,
            pred: None,
            repow: 1.0,
            nh: 0.0,
            ch: 0.0,
            pwrc: 5.0,
            pwrt: 1.0,
            pmod: 0.0,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if !(self.strength > 0.0) || !self.strength.is_finite() {
            return Some(format!("strength = {:?} is incorrect; it must be > 0.0", self.strength));
        }
        if !(self.aggregate_size > 0.0) || !self.aggregate_size.is_finite() {
            return Some(format!(
                "aggregate_size = {:?} is incorrect; it must be > 0.0",
                self.aggregate_size
            ));
        }
        if !(self.element_size > 0.0) || !self.element_size.is_finite() {
            return Some(format!(
                "element_size = {:?} is incorrect; it must be > 0.0",
                self.element_size
            ));
        }
        if self.density < 0.0 {
            return Some(format!("density = {:?} is incorrect; it must be ≥ 0.0", self.density));
        }
        if self.nplot < 1 || self.nplot > 7 {
            return Some(format!("nplot = {:?} is incorrect; it must be 1 ≤ nplot ≤ 7", self.nplot));
        }
        if self.incre < 0.0 {
            return Some(format!("incre = {:?} is incorrect; it must be ≥ 0.0", self.incre));
        }
        if let Some(erode) = self.erode {
            if erode < 0.0 {
                return Some(format!("erode = {:?} is incorrect; it must be ≥ 0.0", erode));
            }
        }
        if let Some(recov) = self.recov {
            if recov < 0.0 || recov > 1.0 {
                return Some(format!("recov = {:?} is incorrect; it must be 0.0 ≤ recov ≤ 1.0", recov));
            }
        }
        if let Some(pred) = self.pred {
            if pred < 0.0 || pred >= 1.0 {
                return Some(format!("pred = {:?} is incorrect; it must be 0.0 ≤ pred < 1.0", pred));
            }
        }
        if self.nh < 0.0 || self.nh > 1.0 {
            return Some(format!("nh = {:?} is incorrect; it must be 0.0 ≤ nh ≤ 1.0", self.nh));
        }
        if self.ch < 0.0 {
            return Some(format!("ch = {:?} is incorrect; it must be ≥ 0.0", self.ch));
        }
        None // all good
    }

    /// Reads a JSON file containing the parameters
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "file not found")?;
        let reader = BufReader::new(file);
        let data = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        Ok(data)
    }

    /// Returns the ERODE value of the keyword (0.99 disables erosion)
    pub fn erode_value(&self) -> f64 {
        match self.erode {
            Some(v) => 1.0 + v,
            None => 0.99,
        }
    }

    /// Returns the RECOV value of the keyword (0 means full recovery)
    pub fn recov_value(&self) -> f64 {
        match self.recov {
            Some(v) => 1.0 - v,
            None => 0.0,
        }
    }

    /// Returns the PRED value of the keyword (0 means no pre-existing damage)
    pub fn pred_value(&self) -> f64 {
        self.pred.unwrap_or(0.0)
    }
}

impl Default for ParamCscm {
    fn default() -> Self {
        ParamCscm::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamCscm, SofteningFit};
    use crate::base::Revision;

    #[test]
    fn new_and_default_work() {
        let param = ParamCscm::new();
        assert_eq!(param, ParamCscm::default());
        assert_eq!(param.revision, Revision::Rev3);
        assert_eq!(param.softening_fit, SofteningFit::Constant);
        assert_eq!(param.validate(), None);
        assert_eq!(param.erode_value(), 0.99);
        assert_eq!(param.recov_value(), 0.0);
        assert_eq!(param.pred_value(), 0.0);
    }

    #[test]
    fn keyword_options_work() {
        let mut param = ParamCscm::new();
        param.erode = Some(0.05);
        param.recov = Some(0.25);
        param.pred = Some(0.1);
        assert_eq!(param.erode_value(), 1.05);
        assert_eq!(param.recov_value(), 0.75);
        assert_eq!(param.pred_value(), 0.1);
    }

    #[test]
    fn validate_captures_errors() {
        let mut param = ParamCscm::new();
        param.strength = -1.0;
        assert_eq!(
            param.validate(),
            Some("strength = -1.0 is incorrect; it must be > 0.0".to_string())
        );
        param.strength = 35.0;
        param.nplot = 0;
        assert_eq!(
            param.validate(),
            Some("nplot = 0 is incorrect; it must be 1 ≤ nplot ≤ 7".to_string())
        );
        param.nplot = 1;
        param.recov = Some(1.5);
        assert_eq!(
            param.validate(),
            Some("recov = 1.5 is incorrect; it must be 0.0 ≤ recov ≤ 1.0".to_string())
        );
        param.recov = None;
        param.nh = 2.0;
        assert_eq!(
            param.validate(),
            Some("nh = 2.0 is incorrect; it must be 0.0 ≤ nh ≤ 1.0".to_string())
        );
    }

    #[test]
    fn serde_uses_defaults() {
        let param: ParamCscm = serde_json::from_str(r#"{"strength": 50.0, "revision": 2}"#).unwrap();
        assert_eq!(param.strength, 50.0);
        assert_eq!(param.revision, Revision::Rev2);
        assert_eq!(param.aggregate_size, 19.0);
        let fit: ParamCscm = serde_json::from_str(r#"{"softening_fit": "fitted"}"#).unwrap();
        assert_eq!(fit.softening_fit, SofteningFit::Fitted);
        assert!(serde_json::from_str::<ParamCscm>(r#"{"revision": 4}"#).is_err());
    }

    #[test]
    fn read_json_captures_errors() {
        assert_eq!(ParamCscm::read_json("/tmp/cscm/__not_there__.json").err(), Some("file not found"));
    }
}
