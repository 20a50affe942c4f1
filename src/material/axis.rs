use super::UniaxialState;

/// Defines the quantity to be plot along the x or y axis
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Total axial strain (percent)
    Strain(/*percent*/ bool),

    /// Reported stress (negative)
    Stress(/*negative*/ bool),

    /// Undamaged stress (negative)
    EffectiveStress(/*negative*/ bool),

    /// Scalar damage
    Damage,

    /// Cap position κ
    Kappa,

    /// Accumulated plastic strain (percent)
    PlasticStrain(/*percent*/ bool),

    /// Index (simulating a pseudo time)
    Index,

    /// Yield function value
    Yield,
}

impl Axis {
    /// Calculates the values for the axis
    pub(crate) fn calc(&self, states: &[UniaxialState]) -> Vec<f64> {
        match self {
            Self::Strain(percent) => {
                let p = if *percent { 100.0 } else { 1.0 };
                states.iter().map(|s| p * s.strain).collect()
            }
            Self::Stress(negative) => {
                let n = if *negative { -1.0 } else { 1.0 };
                states.iter().map(|s| n * s.stress).collect()
            }
            Self::EffectiveStress(negative) => {
                let n = if *negative { -1.0 } else { 1.0 };
                states.iter().map(|s| n * s.effective_stress).collect()
            }
            Self::Damage => states.iter().map(|s| s.damage).collect(),
            Self::Kappa => states.iter().map(|s| s.kappa).collect(),
            Self::PlasticStrain(percent) => {
                let p = if *percent { 100.0 } else { 1.0 };
                states.iter().map(|s| p * s.plastic_strain).collect()
            }
            Self::Index => states.iter().enumerate().map(|(i, _)| i as f64).collect(),
            Self::Yield => states.iter().map(|s| s.yield_value).collect(),
        }
    }

    /// Generates labels for the axis
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Strain(percent) => {
                let p = if *percent { "\\;[\\%]" } else { "" };
                format!("$\\varepsilon{}$", p)
            }
            Self::Stress(negative) => {
                let n = if *negative { "-" } else { "" };
                format!("${}\\sigma$", n)
            }
            Self::EffectiveStress(negative) => {
                let n = if *negative { "-" } else { "" };
                format!("${}\\bar{{\\sigma}}$", n)
            }
            Self::Damage => "$d$".to_string(),
            Self::Kappa => "$\\kappa$".to_string(),
            Self::PlasticStrain(percent) => {
                let p = if *percent { "\\;[\\%]" } else { "" };
                format!("$\\varepsilon_p{}$", p)
            }
            Self::Index => "index".to_string(),
            Self::Yield => "yield function".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Axis;
    use crate::material::uniaxial_state::tests::sample_curve;
    use russell_lab::array_approx_eq;
    use std::collections::HashSet;

    #[test]
    fn derive_works() {
        let axis = Axis::Strain(false).clone();
        let axes = HashSet::from([Axis::Strain(false), Axis::Stress(true)]);
        assert_eq!(axis, Axis::Strain(false));
        assert_eq!(format!("{:?}", axis), "Strain(false)");
        assert_eq!(axes.contains(&Axis::Strain(false)), true);
        assert_eq!(axes.contains(&Axis::Stress(false)), false);
        assert_eq!(axes.contains(&Axis::Stress(true)), true);
    }

    #[test]
    fn calc_and_label_work() {
        let curve = sample_curve();
        let data = &curve.states;

        let axis = Axis::Strain(false);
        array_approx_eq(&axis.calc(data), &[0.0, 0.001, 0.002, 0.003], 1e-15);
        assert_eq!(axis.label(), "$\\varepsilon$");

        let axis = Axis::Strain(true);
        array_approx_eq(&axis.calc(data), &[0.0, 0.1, 0.2, 0.3], 1e-14);
        assert_eq!(axis.label(), "$\\varepsilon\\;[\\%]$");

        let axis = Axis::Stress(false);
        array_approx_eq(&axis.calc(data), &[0.0, -10.0, -20.0, -5.0], 1e-15);
        assert_eq!(axis.label(), "$\\sigma$");

        let axis = Axis::Stress(true);
        array_approx_eq(&axis.calc(data), &[0.0, 10.0, 20.0, 5.0], 1e-15);
        assert_eq!(axis.label(), "$-\\sigma$");

        let axis = Axis::EffectiveStress(true);
        array_approx_eq(&axis.calc(data), &[0.0, 10.0, 20.0 / 0.9, 10.0], 1e-14);
        assert_eq!(axis.label(), "$-\\bar{\\sigma}$");

        let axis = Axis::Damage;
        assert_eq!(axis.calc(data), &[0.0, 0.0, 0.1, 0.5]);
        assert_eq!(axis.label(), "$d$");

        let axis = Axis::Kappa;
        assert_eq!(axis.calc(data), &[70.0, 70.0, 70.0, 70.0]);
        assert_eq!(axis.label(), "$\\kappa$");

        let axis = Axis::PlasticStrain(true);
        assert_eq!(axis.calc(data), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(axis.label(), "$\\varepsilon_p\\;[\\%]$");

        let axis = Axis::Index;
        assert_eq!(axis.calc(data), &[0.0, 1.0, 2.0, 3.0]);

        let axis = Axis::Yield;
        assert_eq!(axis.calc(data), &[-70.0, -70.0, -70.0, -70.0]);
    }
}
