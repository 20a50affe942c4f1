use super::YieldSurface;
use crate::base::MaterialConstants;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the hardening state of the cap
///
/// One instance is owned by each integration run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HardeningState {
    /// Current cap intersection κ (≥ κ₀)
    pub kappa: f64,

    /// Accumulated plastic volumetric strain εv_p
    pub eps_v_p: f64,
}

impl HardeningState {
    /// Allocates a new instance at the initial cap position
    pub fn new(kappa_0: f64) -> Self {
        HardeningState {
            kappa: kappa_0,
            eps_v_p: 0.0,
        }
    }
}

/// Implements the elliptical cap and its hardening law
///
/// ```text
/// L(κ) = max(κ, κ₀)
///
///               (I1 - L(κ))² + R² J2
/// Fc = max(1 - ────────────────────, 0)
///                        κ²
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CapSurface {
    /// Shear failure surface (used to locate the outer edge of the cap)
    yield_surface: YieldSurface,

    /// Initial cap intersection κ₀
    kappa_0: f64,

    /// Ellipticity ratio R
    rr: f64,

    /// Maximum plastic volume strain W
    ww: f64,

    /// Linear hardening coefficient D₁
    d1: f64,

    /// Quadratic hardening coefficient D₂
    d2: f64,

    /// Poisson's coefficient (dilatancy factor 1 - 2ν)
    poisson: f64,
}

impl CapSurface {
    /// Allocates a new instance
    pub fn new(mat: &MaterialConstants) -> Self {
        CapSurface {
            yield_surface: YieldSurface::new(mat),
            kappa_0: mat.kappa_0,
            rr: mat.rr,
            ww: mat.ww,
            d1: mat.d1,
            d2: mat.d2,
            poisson: mat.poisson,
        }
    }

    /// Returns the initial cap intersection κ₀
    pub fn kappa_0(&self) -> f64 {
        self.kappa_0
    }

    /// Returns the position L(κ) where the cap intersects the shear failure surface
    pub fn cap_intersection(&self, kappa: f64) -> f64 {
        f64::max(kappa, self.kappa_0)
    }

    /// Calculates the cap function Fc(I1, J2, κ) ∈ [0, 1]
    pub fn cap_function(&self, i1: f64, jj2: f64, kappa: f64) -> Result<f64, StrError> {
        if kappa == 0.0 || !kappa.is_finite() {
            return Err("κ must be finite and nonzero to evaluate the cap function");
        }
        let ll = self.cap_intersection(kappa);
        let fc = 1.0 - ((i1 - ll) * (i1 - ll) + self.rr * self.rr * jj2) / (kappa * kappa);
        Ok(f64::max(fc, 0.0))
    }

    /// Calculates the new cap position from a plastic strain increment
    ///
    /// # Input
    ///
    /// * `delta_eps_p` -- axial plastic strain increment Δεp
    /// * `eps_v_p_old` -- previous accumulated plastic volumetric strain
    /// * `kappa_0` -- initial cap position used as the lower bound
    ///
    /// # Output
    ///
    /// Returns `(κ_new, εv_p_new)` with `κ_new ≥ κ₀`.
    pub fn hardening_update(
        &self,
        delta_eps_p: f64,
        eps_v_p_old: f64,
        kappa_0: f64,
    ) -> Result<(f64, f64), StrError> {
        if !(self.ww > 0.0) {
            return Err("W (maximum plastic volume strain) must be positive");
        }
        let delta_eps_v_p = delta_eps_p * (1.0 - 2.0 * self.poisson);
        let eps_v_p_new = eps_v_p_old + delta_eps_v_p;
        let n = f64::abs(eps_v_p_new) / self.ww;
        let xx = kappa_0 + n * (1.0 - f64::exp(-self.d1 * n - self.d2 * n * n));
        let r2 = self.rr * self.rr;
        let kappa = (xx + r2 * kappa_0) / (1.0 + r2);
        if !kappa.is_finite() || !eps_v_p_new.is_finite() {
            return Err("the hardening update produced a non-finite cap position");
        }
        if kappa < kappa_0 {
            tracing::trace!(kappa, kappa_0, "cap position clamped to its initial value");
        }
        Ok((f64::max(kappa, kappa_0), eps_v_p_new))
    }

    /// Advances the hardening state with a plastic strain increment
    pub fn advance(&self, state: &mut HardeningState, delta_eps_p: f64) -> Result<(), StrError> {
        let (kappa, eps_v_p) = self.hardening_update(delta_eps_p, state.eps_v_p, self.kappa_0)?;
        if kappa < self.kappa_0 {
            tracing::error!(kappa, kappa_0 = self.kappa_0, "cap retracted below its initial position");
            return Err("κ fell below κ₀ after the hardening update");
        }
        if f64::abs(eps_v_p) >= f64::abs(state.eps_v_p) && kappa < state.kappa {
            tracing::error!(kappa, kappa_old = state.kappa, "cap moved backwards under monotonic loading");
            return Err("κ decreased while the plastic volume strain increased");
        }
        state.kappa = kappa;
        state.eps_v_p = eps_v_p;
        Ok(())
    }

    /// Returns the position X(κ) where the outer edge of the cap meets the I1 axis
    pub fn outer_edge(&self, kappa: f64) -> f64 {
        let ll = self.cap_intersection(kappa);
        ll + self.rr * self.yield_surface.shear_failure(ll)
    }

    /// Returns the plastic volume strain εv_p(X) of the hydrostatic compression curve
    pub fn plastic_volume_strain(&self, xx: f64) -> f64 {
        let dx = xx - self.kappa_0;
        self.ww * (1.0 - f64::exp(-self.d1 * dx - self.d2 * dx * dx))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{CapSurface, HardeningState};
    use crate::base::SampleParams;
    use russell_lab::approx_eq;

    fn cap() -> CapSurface {
        CapSurface::new(&SampleParams::constants_c35().unwrap())
    }

    #[test]
    fn cap_intersection_works() {
        let cap = cap();
        assert_eq!(cap.kappa_0(), SampleParams::constants_c35().unwrap().kappa_0);
        approx_eq(cap.cap_intersection(0.0), 70.0, 1e-12);
        approx_eq(cap.cap_intersection(100.0), 100.0, 1e-15);
    }

    #[test]
    fn cap_function_works() {
        let cap = cap();
        // at L(κ) with J2 = 0 the cap function is one
        approx_eq(cap.cap_function(70.0, 0.0, 70.0).unwrap(), 1.0, 1e-15);
        // half way along the I1 axis
        approx_eq(cap.cap_function(35.0, 0.0, 70.0).unwrap(), 0.75, 1e-15);
        // far from the cap the function is clamped to zero
        assert_eq!(cap.cap_function(-100.0, 300.0, 70.0).unwrap(), 0.0);
        // the ellipse is scaled by κ
        let r2 = SampleParams::constants_c35().unwrap().rr * SampleParams::constants_c35().unwrap().rr;
        approx_eq(cap.cap_function(80.0, 3.0, 80.0).unwrap(), 1.0 - 3.0 * r2 / 6400.0, 1e-15);
    }

    #[test]
    fn cap_function_is_pure() {
        let cap = cap();
        let a = cap.cap_function(50.0, 20.0, 80.0).unwrap();
        let b = cap.cap_function(50.0, 20.0, 80.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cap_function_captures_errors() {
        let cap = cap();
        assert_eq!(
            cap.cap_function(0.0, 0.0, 0.0).err(),
            Some("κ must be finite and nonzero to evaluate the cap function")
        );
        assert_eq!(
            cap.cap_function(0.0, 0.0, f64::NAN).err(),
            Some("κ must be finite and nonzero to evaluate the cap function")
        );
    }

    #[test]
    fn hardening_update_works() {
        let cap = cap();
        let (kappa, eps_v_p) = cap.hardening_update(0.001, 0.0, 10.0).unwrap();
        approx_eq(kappa, 10.000000008864744, 1e-12);
        approx_eq(eps_v_p, 0.0006, 1e-15);
        let (kappa, eps_v_p) = cap.hardening_update(-0.01, 0.0, 10.0).unwrap();
        assert!(kappa >= 10.0);
        approx_eq(kappa, 10.000000886720088, 1e-12);
        approx_eq(eps_v_p, -0.006, 1e-15);
    }

    #[test]
    fn hardening_update_never_retracts() {
        let cap = cap();
        for delta in [-0.1, -0.01, -1e-6, 0.0, 1e-6, 0.01, 0.1] {
            for old in [-0.02, 0.0, 0.02] {
                let (kappa, _) = cap.hardening_update(delta, old, 10.0).unwrap();
                assert!(kappa >= 10.0);
            }
        }
    }

    #[test]
    fn hardening_update_captures_errors() {
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.ww = 0.0;
        let cap = CapSurface::new(&mat);
        assert_eq!(
            cap.hardening_update(0.001, 0.0, 10.0).err(),
            Some("W (maximum plastic volume strain) must be positive")
        );
        let cap = CapSurface::new(&SampleParams::constants_c35().unwrap());
        assert_eq!(
            cap.hardening_update(f64::INFINITY, 0.0, 10.0).err(),
            Some("the hardening update produced a non-finite cap position")
        );
    }

    #[test]
    fn advance_is_monotonic() {
        let cap = cap();
        let mut state = HardeningState::new(cap.kappa_0());
        let mut kappa_old = state.kappa;
        for _ in 0..20 {
            cap.advance(&mut state, -0.001).unwrap();
            assert!(state.kappa >= kappa_old);
            assert!(state.kappa >= cap.kappa_0());
            kappa_old = state.kappa;
        }
        approx_eq(state.eps_v_p, -0.012, 1e-15);
        assert!(state.kappa > cap.kappa_0());
    }

    #[test]
    fn outer_edge_and_hydrostatic_curve_work() {
        let mat = SampleParams::constants_c35().unwrap();
        let cap = CapSurface::new(&mat);
        let ff = mat.alpha - mat.lambda * f64::exp(-mat.beta * 70.0) + mat.theta * 70.0;
        approx_eq(cap.outer_edge(0.0), 70.0 + mat.rr * ff, 1e-12);
        assert_eq!(cap.plastic_volume_strain(70.0), 0.0);
        let large = cap.plastic_volume_strain(1e6);
        approx_eq(large, mat.ww, 1e-12);
    }
}
