use super::{poly, ConcreteProperties, Keyword, ParamCscm, PropertyProvider, Revision, SofteningFit};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Defines the maximum damage (complete stiffness loss is never reached)
pub const DAMAGE_MAX: f64 = 0.99;

/// Converts MPa into psi (the strain-rate fits were calibrated in psi)
pub const MPA_TO_PSI: f64 = 145.0377;

/// Holds the constants of the CSCM model for one material
///
/// All values are computed once from the base properties and the selected revision;
/// they are never modified during an integration run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConstants {
    /// Selected revision of the parameter fits
    pub revision: Revision,

    /// Young's modulus E
    pub young: f64,

    /// Poisson's coefficient ν
    pub poisson: f64,

    /// Uniaxial tensile strength ft
    pub f_t: f64,

    /// Compressive strength fc
    pub f_c: f64,

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

    /// TXC meridian: α
    pub alpha: f64,

    /// TXC meridian: λ
    pub lambda: f64,

    /// TXC meridian: β
    pub beta: f64,

    /// TXC meridian: θ
    pub theta: f64,

    /// TOR meridian: α₁
    pub alpha_1: f64,

    /// TOR meridian: λ₁
    pub lambda_1: f64,

    /// TOR meridian: β₁
    pub beta_1: f64,

    /// TOR meridian: θ₁
    pub theta_1: f64,

    /// TXE meridian: α₂
    pub alpha_2: f64,

    /// TXE meridian: λ₂
    pub lambda_2: f64,

    /// TXE meridian: β₂
    pub beta_2: f64,

    /// TXE meridian: θ₂
    pub theta_2: f64,

    /// Initial cap intersection κ₀ (X₀)
    pub kappa_0: f64,

    /// Cap ellipticity ratio R
    pub rr: f64,

    /// Maximum plastic volume strain W
    pub ww: f64,

    /// Linear hardening shape coefficient D₁
    pub d1: f64,

    /// Quadratic hardening shape coefficient D₂
    pub d2: f64,

    /// Ductile shape parameter B
    pub bb: f64,

    /// Brittle shape parameter D
    pub dd: f64,

    /// Characteristic length of the element
    pub element_size: f64,

    /// Maximum damage
    pub damage_max: f64,

    /// Fluidity coefficient in compression η₀c
    pub eta_0_c: f64,

    /// Fluidity power in compression Nc
    pub n_c: f64,

    /// Fluidity coefficient in tension η₀t
    pub eta_0_t: f64,

    /// Fluidity power in tension Nt
    pub n_t: f64,

    /// Over-stress limit in compression
    pub over_c: f64,

    /// Over-stress limit in tension
    pub over_t: f64,

    /// Ratio of shear to tensile fluidity
    pub s_rate: f64,

    /// Indicates that rate effects are enabled
    pub rate_effects: bool,
}

impl MaterialConstants {
    /// Allocates a new instance from base properties and parameters
    pub fn new(props: &ConcreteProperties, param: &ParamCscm) -> Result<Self, StrError> {
        let fit = param.revision.fit();
        let fc = props.f_c;
        let fc_psi = fc * MPA_TO_PSI;
        let young = props.young;
        let length = param.element_size;
        let (bb, dd) = match param.softening_fit {
            SofteningFit::Constant => (100.0, 0.1),
            SofteningFit::Fitted => {
                let g = props.g_fc / length;
                let bb = (f64::sqrt(2.0 * g + 2.0 * fc / young) + fc / f64::sqrt(young)) / g;
                let dd = length * props.f_t / (props.g_ft * f64::sqrt(young));
                (bb, dd)
            }
        };
        let over = poly(fc, 1.309663e-2, -0.3927659, 21.45);
        let constants = MaterialConstants {
            revision: param.revision,
            young,
            poisson: props.poisson,
            f_t: props.f_t,
            f_c: fc,
            g_ft: props.g_ft,
            g_fc: props.g_fc,
            g_fs: props.g_fs,
            gg: props.gg,
            kk: props.kk,
            alpha: fit.alpha(fc),
            lambda: fit.lambda(fc),
            beta: fit.beta(fc),
            theta: fit.theta(fc),
            alpha_1: fit.alpha_1(fc),
            lambda_1: fit.lambda_1(fc),
            beta_1: fit.beta_1(fc),
            theta_1: fit.theta_1(fc),
            alpha_2: fit.alpha_2(fc),
            lambda_2: fit.lambda_2(fc),
            beta_2: fit.beta_2(fc),
            theta_2: fit.theta_2(fc),
            kappa_0: fit.kappa_0(fc),
            rr: fit.ellipticity(fc),
            ww: fit.max_plastic_volume_strain(fc),
            d1: fit.d1(fc),
            d2: fit.d2(fc),
            bb,
            dd,
            element_size: length,
            damage_max: DAMAGE_MAX,
            eta_0_c: poly(fc_psi, 1.2772337e-11, -1.0613722e-7, 3.203497e-4),
            n_c: 0.78,
            eta_0_t: poly(fc_psi, 8.0614774e-13, -9.77736719e-10, 5.0752351e-5),
            n_t: 0.48,
            over_c: over,
            over_t: over,
            s_rate: 1.0,
            rate_effects: param.rate_effects,
        };
        constants.validate()?;
        Ok(constants)
    }

    /// Allocates a new instance using a property provider
    pub fn from_provider(provider: &dyn PropertyProvider, param: &ParamCscm) -> Result<Self, StrError> {
        let props = provider.properties(param.strength, param.aggregate_size)?;
        MaterialConstants::new(&props, param)
    }

    /// Checks the physical admissibility of the constants
    pub fn validate(&self) -> Result<(), StrError> {
        let values = [
            self.young,
            self.poisson,
            self.f_t,
            self.f_c,
            self.g_ft,
            self.g_fc,
            self.g_fs,
            self.gg,
            self.kk,
            self.alpha,
            self.lambda,
            self.beta,
            self.theta,
            self.alpha_1,
            self.lambda_1,
            self.beta_1,
            self.theta_1,
            self.alpha_2,
            self.lambda_2,
            self.beta_2,
            self.theta_2,
            self.kappa_0,
            self.rr,
            self.ww,
            self.d1,
            self.d2,
            self.bb,
            self.dd,
            self.element_size,
            self.damage_max,
            self.eta_0_c,
            self.n_c,
            self.eta_0_t,
            self.n_t,
            self.over_c,
            self.over_t,
            self.s_rate,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("all material constants must be finite");
        }
        if !(self.young > 0.0) {
            return Err("E (Young's modulus) must be positive");
        }
        if !(self.poisson > 0.0 && self.poisson < 0.5) {
            return Err("ν (Poisson's coefficient) must satisfy 0 < ν < 0.5");
        }
        if !(self.f_c > 0.0) {
            return Err("fc (compressive strength) must be positive");
        }
        if !(self.f_t > 0.0) {
            return Err("ft (tensile strength) must be positive");
        }
        if !(self.g_ft > 0.0) || !(self.g_fc > 0.0) || !(self.g_fs > 0.0) {
            return Err("fracture energies Gft, Gfc, and Gfs must be positive");
        }
        if !(self.kappa_0 > 0.0) {
            return Err("κ₀ (initial cap position) must be positive");
        }
        if !(self.rr > 0.0) {
            return Err("R (cap ellipticity) must be positive");
        }
        if !(self.ww > 0.0) {
            return Err("W (maximum plastic volume strain) must be positive");
        }
        if self.d1 < 0.0 || self.d2 < 0.0 {
            return Err("D1 and D2 (hardening shape coefficients) must be non-negative");
        }
        if !(self.bb > 0.0) {
            return Err("B (ductile shape parameter) must be positive");
        }
        if !(self.dd > 0.0) {
            return Err("D (brittle shape parameter) must be positive");
        }
        if !(self.element_size > 0.0) {
            return Err("the element size must be positive");
        }
        if !(self.damage_max > 0.0 && self.damage_max < 1.0) {
            return Err("the maximum damage must satisfy 0 < dmax < 1");
        }
        Ok(())
    }

    /// Returns the fields of the *MAT_CSCM keyword
    pub fn keyword(&self, param: &ParamCscm) -> Keyword {
        let mut kw = Keyword::new("*MAT_CSCM");
        kw.card()
            .text("MID", &format!("{}", param.material_id))
            .float("RHO", param.density)
            .integer("NPLOT", param.nplot as i64)
            .float("INCRE", param.incre)
            .integer("IRATE", if self.rate_effects { 1 } else { 0 })
            .float("ERODE", param.erode_value())
            .float("RECOV", param.recov_value())
            .integer("ITRETRC", if param.cap_retraction { 1 } else { 0 });
        kw.card().float("PRED", param.pred_value());
        kw.card()
            .float("G", self.gg)
            .float("K", self.kk)
            .float("ALPHA", self.alpha)
            .float("THETA", self.theta)
            .float("LAMBDA", self.lambda)
            .float("BETA", self.beta)
            .float("NH", param.nh)
            .float("CH", param.ch);
        kw.card()
            .float("ALPHA1", self.alpha_1)
            .float("THETA1", self.theta_1)
            .float("LAMBDA1", self.lambda_1)
            .float("BETA1", self.beta_1)
            .float("ALPHA2", self.alpha_2)
            .float("THETA2", self.theta_2)
            .float("LAMBDA2", self.lambda_2)
            .float("BETA2", self.beta_2);
        kw.card()
            .float("R", self.rr)
            .float("X0", self.kappa_0)
            .float("W", self.ww)
            .float("D1", self.d1)
            .float("D2", self.d2);
        kw.card()
            .float("B", self.bb)
            .float("GFC", self.g_fc)
            .float("D", self.dd)
            .float("GFT", self.g_ft)
            .float("GFS", self.g_fs)
            .float("PWRC", param.pwrc)
            .float("PWRT", param.pwrt)
            .float("PMOD", param.pmod);
        kw.card()
            .float("ETA0C", self.eta_0_c)
            .float("NC", self.n_c)
            .float("ETA0T", self.eta_0_t)
            .float("NT", self.n_t)
            .float("OVERC", self.over_c)
            .float("OVERT", self.over_t)
            .float("SRATE", self.s_rate)
            .float("REPOW", param.repow);
        kw
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::MaterialConstants;
    use crate::base::{CebFip, ParamCscm, Revision, SampleParams, SofteningFit};
    use russell_lab::approx_eq;

    #[test]
    fn new_works_rev3() {
        let mat = SampleParams::constants_c35().unwrap();
        approx_eq(mat.alpha, 9.3374325, 1e-12);
        approx_eq(mat.lambda, 4.018819681966958, 1e-12);
        approx_eq(mat.kappa_0, 70.0, 1e-12);
        approx_eq(mat.rr, 2.2075, 1e-14);
        assert_eq!(mat.ww, 0.065);
        assert_eq!(mat.bb, 100.0);
        assert_eq!(mat.dd, 0.1);
        assert_eq!(mat.damage_max, 0.99);
        approx_eq(mat.eta_0_c, 0.00011069386377301446, 1e-16);
        approx_eq(mat.eta_0_t, 6.656268399330043e-05, 1e-16);
        approx_eq(mat.over_c, 23.746565249999996, 1e-12);
        assert_eq!(mat.over_t, mat.over_c);
    }

    #[test]
    fn fitted_softening_works() {
        let mut param = ParamCscm::new();
        param.softening_fit = SofteningFit::Fitted;
        let mat = MaterialConstants::from_provider(&CebFip::new(), &param).unwrap();
        approx_eq(mat.bb, 11.201656364955396, 1e-10);
        approx_eq(mat.dd, 39.66909477768147, 1e-10);
    }

    #[test]
    fn other_revisions_work() {
        let mut param = ParamCscm::new();
        param.revision = Revision::Rev1;
        let mat = MaterialConstants::from_provider(&CebFip::new(), &param).unwrap();
        approx_eq(mat.kappa_0, 93.02666234, 1e-10);
        assert_eq!(mat.ww, 0.05);
        param.revision = Revision::Rev2;
        let mat = MaterialConstants::from_provider(&CebFip::new(), &param).unwrap();
        approx_eq(mat.kappa_0, 83.307, 1e-12);
    }

    #[test]
    fn new_captures_errors() {
        // the rev3 cap fit is negative for weak concrete
        let mut param = ParamCscm::new();
        param.strength = 15.0;
        assert_eq!(
            MaterialConstants::from_provider(&CebFip::new(), &param).err(),
            Some("κ₀ (initial cap position) must be positive")
        );
        let mut props = SampleParams::ceb_fip_c35().unwrap();
        props.poisson = 0.5;
        assert_eq!(
            MaterialConstants::new(&props, &ParamCscm::new()).err(),
            Some("ν (Poisson's coefficient) must satisfy 0 < ν < 0.5")
        );
        let mut props = SampleParams::ceb_fip_c35().unwrap();
        props.g_fs = 0.0;
        assert_eq!(
            MaterialConstants::new(&props, &ParamCscm::new()).err(),
            Some("fracture energies Gft, Gfc, and Gfs must be positive")
        );
    }

    #[test]
    fn validate_captures_errors() {
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.ww = 0.0;
        assert_eq!(mat.validate().err(), Some("W (maximum plastic volume strain) must be positive"));
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.bb = 0.0;
        assert_eq!(mat.validate().err(), Some("B (ductile shape parameter) must be positive"));
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.dd = -1.0;
        assert_eq!(mat.validate().err(), Some("D (brittle shape parameter) must be positive"));
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.young = f64::INFINITY;
        assert_eq!(mat.validate().err(), Some("all material constants must be finite"));
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.g_fc = f64::INFINITY;
        assert_eq!(mat.validate().err(), Some("all material constants must be finite"));
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.f_t = f64::NAN;
        assert_eq!(mat.validate().err(), Some("all material constants must be finite"));
    }

    #[test]
    fn keyword_works() {
        let param = ParamCscm::new();
        let mat = SampleParams::constants_c35().unwrap();
        let kw = mat.keyword(&param);
        assert_eq!(kw.title, "*MAT_CSCM");
        assert_eq!(kw.ncard(), 7);
        assert_eq!(kw.fields.len(), 8 + 1 + 8 + 8 + 5 + 8 + 8);
        let x0 = kw.get("X0").unwrap();
        assert_eq!((x0.card, x0.position), (5, 2));
        approx_eq(kw.number("X0").unwrap(), 70.0, 1e-12);
        approx_eq(kw.number("ALPHA").unwrap(), mat.alpha, 1e-15);
        approx_eq(kw.number("ERODE").unwrap(), 0.99, 1e-15);
        approx_eq(kw.number("IRATE").unwrap(), 1.0, 1e-15);
        let repow = kw.get("REPOW").unwrap();
        assert_eq!((repow.card, repow.position), (7, 8));
        let names: Vec<_> = kw.fields.iter().filter(|f| f.card == 6).map(|f| f.name.as_str()).collect();
        assert_eq!(names, &["B", "GFC", "D", "GFT", "GFS", "PWRC", "PWRT", "PMOD"]);
    }
}
