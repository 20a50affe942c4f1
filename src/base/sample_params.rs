use super::{CebFip, ConcreteProperties, MaterialConstants, ParamCscm, PropertyProvider};
use crate::StrError;

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns the CEB-FIP properties of C35 concrete with 19 mm aggregates
    pub fn ceb_fip_c35() -> Result<ConcreteProperties, StrError> {
        CebFip::new().properties(35.0, 19.0)
    }

    /// Returns the CSCM constants of C35 concrete (revision 3, constant softening)
    pub fn constants_c35() -> Result<MaterialConstants, StrError> {
        MaterialConstants::new(&SampleParams::ceb_fip_c35()?, &ParamCscm::new())
    }

    /// Returns constants with a small cap (κ₀ = 2 MPa, R = 0.5) such that the cap governs in tension
    ///
    /// Useful to exercise the plastic corrector of the uniaxial integrator.
    pub fn constants_small_cap() -> Result<MaterialConstants, StrError> {
        let mut mat = SampleParams::constants_c35()?;
        mat.kappa_0 = 2.0;
        mat.rr = 0.5;
        Ok(mat)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
