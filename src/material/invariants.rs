use crate::StrError;
use russell_tensor::{Mandel, Tensor2};

/// Returns the invariants (I1, J2) of a uniaxial stress state σ
///
/// ```text
/// I1 = σ
/// J2 = σ² / 3
/// ```
#[inline]
pub fn uniaxial_invariants(stress: f64) -> (f64, f64) {
    (stress, stress * stress / 3.0)
}

/// Returns the invariants (I1, J2) of a stress state given by its principal values
pub fn principal_invariants(sigma_1: f64, sigma_2: f64, sigma_3: f64) -> Result<(f64, f64), StrError> {
    let sigma = Tensor2::from_matrix(
        &[[sigma_1, 0.0, 0.0], [0.0, sigma_2, 0.0], [0.0, 0.0, sigma_3]],
        Mandel::Symmetric,
    )?;
    Ok((sigma.invariant_ii1(), sigma.invariant_jj2()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
