use super::{
    DamageModel, DamageState, HardeningState, Settings, StrainRateModel, UniaxialCurve, UniaxialState, YieldCriterion,
    YieldQuery,
};
use crate::base::MaterialConstants;
use crate::StrError;
use std::fmt;

/// Holds the error of a failed uniaxial integration
///
/// The partial curve holds the states computed before the failing step.
#[derive(Clone, Debug)]
pub struct IntegrationError {
    /// Index of the failing step
    pub step: usize,

    /// Reason of the failure
    pub reason: StrError,

    /// States computed before the failure (marked incomplete)
    pub partial: UniaxialCurve,
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uniaxial integration failed at step {} after {} states: {}",
            self.step,
            self.partial.len(),
            self.reason
        )
    }
}

impl std::error::Error for IntegrationError {}

/// Integrates the CSCM model along a uniaxial strain history
///
/// Positive strains shorten the specimen and produce negative (compressive) stresses.
/// Each step performs:
///
/// 1. elastic trial σ_trial = -E εe
/// 2. uniaxial invariants I1 = σ and J2 = σ²/3
/// 3. yield check f(I1, J2, κ) > tol
/// 4. plastic correction towards the effective yield stress and cap hardening,
///    applied only when |σ_trial| exceeds the effective yield stress
/// 5. damage update with τ = |σ ε|
/// 6. reported stress σ = (1 - d) σ̄
pub struct UniaxialIntegrator {
    /// Young's modulus
    young: f64,

    /// Compressive strength
    f_c: f64,

    /// Initial cap position
    kappa_0: f64,

    /// Dynamic increase factor applied to fc
    dif: f64,

    /// Options
    settings: Settings,

    /// Yield criterion (shear surface and cap)
    criterion: YieldCriterion,

    /// Damage model
    damage: DamageModel,
}

impl UniaxialIntegrator {
    /// Allocates a new instance
    pub fn new(mat: &MaterialConstants, settings: Settings) -> Result<Self, StrError> {
        mat.validate()?;
        if let Some(msg) = settings.validate() {
            tracing::error!(%msg, "invalid integrator settings");
            return Err("cannot allocate the integrator because settings.validate() failed");
        }
        let dif = match settings.strain_rate {
            Some(rate) => StrainRateModel::new(mat).cscm_compression(rate)?,
            None => 1.0,
        };
        Ok(UniaxialIntegrator {
            young: mat.young,
            f_c: mat.f_c,
            kappa_0: mat.kappa_0,
            dif,
            settings,
            criterion: YieldCriterion::with_tolerance(mat, settings.yield_tolerance)?,
            damage: DamageModel::new(mat)?,
        })
    }

    /// Returns the dynamic increase factor applied to fc
    pub fn dif(&self) -> f64 {
        self.dif
    }

    /// Returns the yield criterion
    pub fn criterion(&self) -> &YieldCriterion {
        &self.criterion
    }

    /// Calculates the effective yield stress for an accumulated plastic strain
    ///
    /// ```text
    /// σy = fc DIF (NH + (1 - NH) (1 - exp(-CH |εp| scale)))   0 < NH < 1
    /// σy = fc DIF                                              otherwise
    /// ```
    pub fn effective_yield(&self, plastic_strain: f64) -> f64 {
        let strength = self.f_c * self.dif;
        if self.settings.hardening_enabled() {
            let (nh, ch) = (self.settings.nh, self.settings.ch);
            let growth = 1.0 - f64::exp(-ch * f64::abs(plastic_strain) * self.settings.hardening_scale);
            strength * (nh + (1.0 - nh) * growth)
        } else {
            strength
        }
    }

    /// Runs the integration over a monotonic strain history
    ///
    /// The history starts from the unstrained state; thus the first increment is `strains[0]`.
    /// Zero increments are allowed, but the strain cannot reverse direction.
    pub fn run(&self, strains: &[f64]) -> Result<UniaxialCurve, IntegrationError> {
        let mut curve = UniaxialCurve::with_capacity(strains.len());
        if strains.is_empty() {
            return Err(IntegrationError {
                step: 0,
                reason: "the strain history must have at least one value",
                partial: curve,
            });
        }

        // state owned by this run
        let cap = self.criterion.cap_surface();
        let mut hardening = HardeningState::new(self.kappa_0);
        let mut damage = DamageState::new(&self.damage);
        let mut elastic_strain = 0.0;
        let mut plastic_strain = 0.0;
        let mut strain_old = 0.0;
        let mut direction = 0.0;

        for (step, strain) in strains.iter().copied().enumerate() {
            // check the history
            if !strain.is_finite() {
                return Err(self.failure(step, "the strain history must contain finite values", curve));
            }
            let delta = strain - strain_old;
            if delta != 0.0 {
                let sign = f64::signum(delta);
                if direction == 0.0 {
                    direction = sign;
                } else if sign != direction {
                    return Err(self.failure(step, "the strain history must be monotonic", curve));
                }
            }
            strain_old = strain;

            // elastic trial
            elastic_strain += delta;
            let trial = -self.young * elastic_strain;
            let query = YieldQuery::uniaxial(trial, hardening.kappa);
            let yield_value = match self.criterion.yield_function(&query) {
                Ok(f) => f,
                Err(reason) => return Err(self.failure(step, reason, curve)),
            };

            // plastic correction (only when the trial exceeds the effective yield)
            let mut stress = trial;
            let mut elastic = true;
            let sigma_y = self.effective_yield(plastic_strain);
            let excess = f64::abs(trial) - sigma_y;
            if yield_value > self.criterion.tolerance() && excess > 0.0 {
                elastic = false;
                let delta_eps_p = f64::copysign(excess / self.young, elastic_strain);
                elastic_strain -= delta_eps_p;
                plastic_strain += delta_eps_p;
                if let Err(reason) = cap.advance(&mut hardening, delta_eps_p) {
                    return Err(self.failure(step, reason, curve));
                }
                stress = -self.young * elastic_strain;
                tracing::debug!(step, trial, sigma_y, delta_eps_p, kappa = hardening.kappa, "plastic correction");
            }

            // damage
            if let Err(reason) = self.damage.update(&mut damage, stress, strain) {
                return Err(self.failure(step, reason, curve));
            }

            curve.states.push(UniaxialState {
                strain,
                stress: stress * (1.0 - damage.damage),
                effective_stress: stress,
                elastic_strain,
                plastic_strain,
                kappa: hardening.kappa,
                eps_v_p: hardening.eps_v_p,
                damage: damage.damage,
                yield_value,
                elastic,
            });
        }
        curve.complete = true;
        Ok(curve)
    }

    /// Packs the partial results into an error
    fn failure(&self, step: usize, reason: StrError, partial: UniaxialCurve) -> IntegrationError {
        tracing::error!(step, reason, "uniaxial integration aborted");
        IntegrationError { step, reason, partial }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
