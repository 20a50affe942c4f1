use super::{uniaxial_invariants, CapSurface, YieldSurface};
use crate::base::MaterialConstants;
use crate::StrError;

/// Defines the default tolerance to consider a stress state on the yield surface
pub const YIELD_TOLERANCE: f64 = 1e-6;

/// Holds the arguments of the yield function
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YieldQuery {
    /// First stress invariant I1
    pub i1: f64,

    /// Second deviatoric stress invariant J2
    pub jj2: f64,

    /// Cap position κ
    pub kappa: f64,
}

impl YieldQuery {
    /// Allocates a new instance
    pub fn new(i1: f64, jj2: f64, kappa: f64) -> Self {
        YieldQuery { i1, jj2, kappa }
    }

    /// Allocates a new instance for a uniaxial stress state
    pub fn uniaxial(stress: f64, kappa: f64) -> Self {
        let (i1, jj2) = uniaxial_invariants(stress);
        YieldQuery { i1, jj2, kappa }
    }
}

/// Classifies a stress state with respect to the yield surface
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Admissibility {
    /// Strictly inside the surface (f < -tol)
    Elastic,

    /// On the surface within the tolerance (|f| ≤ tol)
    OnSurface,

    /// Outside the surface (f > tol); requires a plastic correction
    Inadmissible,
}

impl Admissibility {
    /// Classifies a yield function value
    pub fn from_yield_value(f: f64, tolerance: f64) -> Self {
        if f > tolerance {
            Admissibility::Inadmissible
        } else if f < -tolerance {
            Admissibility::Elastic
        } else {
            Admissibility::OnSurface
        }
    }

    /// Indicates that no plastic correction is needed
    pub fn admissible(&self) -> bool {
        *self != Admissibility::Inadmissible
    }
}

/// Implements the yield criterion combining the shear failure surface and the cap
///
/// ```text
/// f(I1, J2, κ) = Ff(I1) Fc(I1, J2, κ) - κ
/// ```
#[derive(Clone, Copy, Debug)]
pub struct YieldCriterion {
    yield_surface: YieldSurface,
    cap_surface: CapSurface,
    tolerance: f64,
}

impl YieldCriterion {
    /// Allocates a new instance
    pub fn new(mat: &MaterialConstants) -> Self {
        YieldCriterion {
            yield_surface: YieldSurface::new(mat),
            cap_surface: CapSurface::new(mat),
            tolerance: YIELD_TOLERANCE,
        }
    }

    /// Allocates a new instance with a given tolerance
    pub fn with_tolerance(mat: &MaterialConstants, tolerance: f64) -> Result<Self, StrError> {
        if !(tolerance > 0.0) {
            return Err("the yield tolerance must be positive");
        }
        let mut criterion = YieldCriterion::new(mat);
        criterion.tolerance = tolerance;
        Ok(criterion)
    }

    /// Returns the tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the shear failure surface
    pub fn yield_surface(&self) -> &YieldSurface {
        &self.yield_surface
    }

    /// Returns the cap surface
    pub fn cap_surface(&self) -> &CapSurface {
        &self.cap_surface
    }

    /// Calculates the yield function f(I1, J2, κ)
    pub fn yield_function(&self, query: &YieldQuery) -> Result<f64, StrError> {
        let ff = self.yield_surface.shear_failure(query.i1);
        let fc = self.cap_surface.cap_function(query.i1, query.jj2, query.kappa)?;
        Ok(ff * fc - query.kappa)
    }

    /// Classifies the stress state
    pub fn classify(&self, query: &YieldQuery) -> Result<Admissibility, StrError> {
        let f = self.yield_function(query)?;
        Ok(Admissibility::from_yield_value(f, self.tolerance))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Admissibility, YieldCriterion, YieldQuery, YIELD_TOLERANCE};
    use crate::base::SampleParams;
    use russell_lab::approx_eq;

    #[test]
    fn origin_is_elastic() {
        let mat = SampleParams::constants_c35().unwrap();
        let criterion = YieldCriterion::new(&mat);
        let query = YieldQuery::new(0.0, 0.0, mat.kappa_0);
        let f = criterion.yield_function(&query).unwrap();
        assert!(f < 0.0);
        approx_eq(f, -mat.kappa_0, 1e-12);
        assert_eq!(criterion.classify(&query), Ok(Admissibility::Elastic));
    }

    #[test]
    fn tension_violates_a_small_cap() {
        let mat = SampleParams::constants_small_cap().unwrap();
        let criterion = YieldCriterion::new(&mat);
        let query = YieldQuery::uniaxial(0.5, mat.kappa_0);
        approx_eq(query.jj2, 0.25 / 3.0, 1e-15);
        let ys = criterion.yield_surface();
        let fc = 1.0 - (1.5 * 1.5 + 0.25 * 0.25 / 3.0) / 4.0;
        let expected = ys.shear_failure(0.5) * fc - 2.0;
        approx_eq(criterion.yield_function(&query).unwrap(), expected, 1e-14);
        assert!(expected > 0.0);
        assert_eq!(criterion.classify(&query), Ok(Admissibility::Inadmissible));
        assert_eq!(criterion.classify(&YieldQuery::uniaxial(0.0, 2.0)), Ok(Admissibility::Elastic));
    }

    #[test]
    fn classification_uses_the_tolerance() {
        let tol = YIELD_TOLERANCE;
        assert_eq!(Admissibility::from_yield_value(-1.0, tol), Admissibility::Elastic);
        assert_eq!(Admissibility::from_yield_value(0.0, tol), Admissibility::OnSurface);
        assert_eq!(Admissibility::from_yield_value(5e-7, tol), Admissibility::OnSurface);
        assert_eq!(Admissibility::from_yield_value(-5e-7, tol), Admissibility::OnSurface);
        assert_eq!(Admissibility::from_yield_value(2e-6, tol), Admissibility::Inadmissible);
        assert!(Admissibility::OnSurface.admissible());
        assert!(!Admissibility::Inadmissible.admissible());
    }

    #[test]
    fn with_tolerance_works() {
        let mat = SampleParams::constants_c35().unwrap();
        let criterion = YieldCriterion::with_tolerance(&mat, 1e-3).unwrap();
        assert_eq!(criterion.tolerance(), 1e-3);
        assert_eq!(
            YieldCriterion::with_tolerance(&mat, 0.0).err(),
            Some("the yield tolerance must be positive")
        );
    }

    #[test]
    fn yield_function_captures_errors() {
        let mat = SampleParams::constants_c35().unwrap();
        let criterion = YieldCriterion::new(&mat);
        assert_eq!(
            criterion.yield_function(&YieldQuery::new(0.0, 0.0, 0.0)).err(),
            Some("κ must be finite and nonzero to evaluate the cap function")
        );
    }
}
