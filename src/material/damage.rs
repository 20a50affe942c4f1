use crate::base::MaterialConstants;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the damage state of one integration run
///
/// Damage never decreases. The thresholds hold the largest energy-like measure
/// reached so far in compression (ductile) and tension (brittle).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageState {
    /// Scalar damage d ∈ [0, dmax]
    pub damage: f64,

    /// Ductile (compression) watermark
    pub threshold_ductile: f64,

    /// Brittle (tension) watermark
    pub threshold_brittle: f64,
}

impl DamageState {
    /// Allocates a new instance with thresholds seeded at the initiation values
    pub fn new(model: &DamageModel) -> Self {
        DamageState {
            damage: 0.0,
            threshold_ductile: model.r0_ductile,
            threshold_brittle: model.r0_brittle,
        }
    }
}

/// Implements the ductile and brittle softening laws
///
/// ```text
/// d = ((1 + S) / (1 + S exp(-r (τ - r₀))) - 1) dmax / S,   τ > r₀
/// d = 0,                                                   τ ≤ r₀
/// ```
///
/// with S = B, r = a for ductile damage and S = D, r = C for brittle damage.
#[derive(Clone, Copy, Debug)]
pub struct DamageModel {
    /// Ductile shape parameter B
    pub bb: f64,

    /// Brittle shape parameter D
    pub dd: f64,

    /// Ductile rate a
    pub rate_ductile: f64,

    /// Brittle rate C
    pub rate_brittle: f64,

    /// Maximum damage
    pub damage_max: f64,

    /// Ductile initiation threshold r₀ = fc²/2E
    pub r0_ductile: f64,

    /// Brittle initiation threshold r₀ = ft²/2E
    pub r0_brittle: f64,
}

impl DamageModel {
    /// Allocates a new instance
    ///
    /// The rates follow from the fracture energies and the element size L:
    ///
    /// ```text
    /// a = L (1 + B) ln(1 + B) / (Gfc B)
    /// C = L (1 + D) ln(1 + D) / (Gft D)
    /// ```
    pub fn new(mat: &MaterialConstants) -> Result<Self, StrError> {
        if !(mat.bb > 0.0) {
            return Err("B (ductile shape parameter) must be positive");
        }
        if !(mat.dd > 0.0) {
            return Err("D (brittle shape parameter) must be positive");
        }
        if !(mat.g_fc > 0.0) || !(mat.g_ft > 0.0) {
            return Err("fracture energies Gft and Gfc must be positive");
        }
        if !(mat.young > 0.0) {
            return Err("E (Young's modulus) must be positive");
        }
        let length = mat.element_size;
        let (bb, dd) = (mat.bb, mat.dd);
        Ok(DamageModel {
            bb,
            dd,
            rate_ductile: length * (1.0 + bb) * f64::ln(1.0 + bb) / (mat.g_fc * bb),
            rate_brittle: length * (1.0 + dd) * f64::ln(1.0 + dd) / (mat.g_ft * dd),
            damage_max: mat.damage_max,
            r0_ductile: mat.f_c * mat.f_c / (2.0 * mat.young),
            r0_brittle: mat.f_t * mat.f_t / (2.0 * mat.young),
        })
    }

    /// Evaluates the softening law
    ///
    /// # Input
    ///
    /// * `tau` -- energy-like measure τ
    /// * `shape` -- shape parameter S (B or D)
    /// * `rate` -- rate coefficient (a or C)
    /// * `damage_max` -- maximum damage
    /// * `r0` -- initiation threshold
    pub fn softening_law(tau: f64, shape: f64, rate: f64, damage_max: f64, r0: f64) -> Result<f64, StrError> {
        if shape == 0.0 {
            return Err("the softening shape parameter must be nonzero");
        }
        if tau <= r0 {
            return Ok(0.0);
        }
        let d = ((1.0 + shape) / (1.0 + shape * f64::exp(-rate * (tau - r0))) - 1.0) * damage_max / shape;
        Ok(d)
    }

    /// Calculates the ductile damage for τ
    pub fn ductile_damage(&self, tau: f64) -> Result<f64, StrError> {
        DamageModel::softening_law(tau, self.bb, self.rate_ductile, self.damage_max, self.r0_ductile)
    }

    /// Calculates the brittle damage for τ
    pub fn brittle_damage(&self, tau: f64) -> Result<f64, StrError> {
        DamageModel::softening_law(tau, self.dd, self.rate_brittle, self.damage_max, self.r0_brittle)
    }

    /// Updates the damage state
    ///
    /// The energy-like measure is τ = |σ ε| using the undamaged stress σ and the total
    /// strain ε. Compression (σ < 0) drives ductile damage and tension drives brittle damage.
    pub fn update(&self, state: &mut DamageState, stress: f64, strain: f64) -> Result<(), StrError> {
        let tau = f64::abs(stress * strain);
        let candidate = if stress < 0.0 {
            if tau <= state.threshold_ductile {
                return Ok(());
            }
            state.threshold_ductile = tau;
            self.ductile_damage(tau)?
        } else if stress > 0.0 {
            if tau <= state.threshold_brittle {
                return Ok(());
            }
            state.threshold_brittle = tau;
            self.brittle_damage(tau)?
        } else {
            return Ok(());
        };
        if candidate > state.damage {
            tracing::debug!(damage = candidate, tau, "damage increased");
            state.damage = candidate;
        }
        if !(state.damage >= 0.0 && state.damage <= self.damage_max) {
            tracing::error!(damage = state.damage, "damage outside of [0, dmax]");
            return Err("damage fell outside of [0, dmax]");
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DamageModel, DamageState};
    use crate::base::SampleParams;
    use plotpy::linspace;
    use russell_lab::approx_eq;

    const SAVE_FIGURE: bool = false;

    fn model() -> DamageModel {
        DamageModel::new(&SampleParams::constants_c35().unwrap()).unwrap()
    }

    #[test]
    fn new_works() {
        let model = model();
        approx_eq(model.rate_ductile, 107.70951378755173, 1e-10);
        approx_eq(model.rate_brittle, 2422.599477516006, 1e-9);
        approx_eq(model.r0_ductile, 0.017519087480733057, 1e-15);
        approx_eq(model.r0_brittle, 0.00014735853474035808, 1e-17);
        assert_eq!(model.damage_max, 0.99);
    }

    #[test]
    fn new_captures_errors() {
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.bb = 0.0;
        assert_eq!(
            DamageModel::new(&mat).err(),
            Some("B (ductile shape parameter) must be positive")
        );
        let mut mat = SampleParams::constants_c35().unwrap();
        mat.dd = 0.0;
        assert_eq!(
            DamageModel::new(&mat).err(),
            Some("D (brittle shape parameter) must be positive")
        );
    }

    #[test]
    fn softening_law_works() {
        let model = model();
        assert_eq!(model.ductile_damage(0.0).unwrap(), 0.0);
        assert_eq!(model.ductile_damage(model.r0_ductile).unwrap(), 0.0);
        approx_eq(model.ductile_damage(0.03).unwrap(), 0.02703501026171566, 1e-13);
        approx_eq(model.ductile_damage(0.05).unwrap(), 0.23856795586423687, 1e-13);
        approx_eq(
            model.brittle_damage(model.r0_brittle + 0.001).unwrap(),
            0.8942648362880562,
            1e-13,
        );
        approx_eq(model.ductile_damage(1e6).unwrap(), 0.99, 1e-14);
        assert_eq!(
            DamageModel::softening_law(1.0, 0.0, 1.0, 0.99, 0.0).err(),
            Some("the softening shape parameter must be nonzero")
        );
    }

    #[test]
    fn softening_law_is_monotonic_and_bounded() {
        let model = model();
        let taus = linspace(0.0, 0.5, 501);
        let mut d_old = 0.0;
        for tau in &taus {
            let d = model.ductile_damage(*tau).unwrap();
            let b = model.brittle_damage(*tau).unwrap();
            assert!(d >= d_old);
            assert!(d >= 0.0 && d <= model.damage_max);
            assert!(b >= 0.0 && b <= model.damage_max);
            d_old = d;
        }
    }

    #[test]
    fn update_keeps_the_maximum() {
        let model = model();
        let mut state = DamageState::new(&model);
        assert_eq!(state.threshold_ductile, model.r0_ductile);
        assert_eq!(state.threshold_brittle, model.r0_brittle);

        // below the threshold nothing happens
        model.update(&mut state, -10.0, 0.001).unwrap();
        assert_eq!(state.damage, 0.0);

        // compression beyond the threshold
        model.update(&mut state, -30.0, 0.001).unwrap(); // τ = 0.03
        approx_eq(state.damage, 0.02703501026171566, 1e-13);
        approx_eq(state.threshold_ductile, 0.03, 1e-15);

        // a smaller measure does not heal
        model.update(&mut state, -20.0, 0.001).unwrap();
        approx_eq(state.damage, 0.02703501026171566, 1e-13);
        approx_eq(state.threshold_ductile, 0.03, 1e-15);

        // tension uses its own watermark
        model.update(&mut state, 1.0, 1e-5).unwrap(); // τ = 1e-5 < r0
        approx_eq(state.damage, 0.02703501026171566, 1e-13);
        model.update(&mut state, 2.0, 0.0005737).unwrap(); // τ ≈ r0 + 0.001
        assert!(state.damage > 0.8);
        assert!(state.damage <= 0.99);
    }

    #[test]
    fn softening_figure() {
        if SAVE_FIGURE {
            use plotpy::{Curve, Plot};
            let model = model();
            let taus = linspace(0.0, 0.2, 201);
            let d: Vec<_> = taus.iter().map(|t| model.ductile_damage(*t).unwrap()).collect();
            let mut curve = Curve::new();
            curve.draw(&taus, &d);
            let mut plot = Plot::new();
            plot.add(&curve)
                .grid_and_labels("$\\tau$", "$d$")
                .save("/tmp/cscm/test_damage_softening.svg")
                .unwrap();
        }
    }
}
