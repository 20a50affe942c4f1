//! Continuous Surface Cap Model (CSCM) for concrete
//!
//! The crate computes the `*MAT_CSCM` material constants from the compressive strength and
//! the maximum aggregate size, evaluates the shear failure surface, the cap, the damage,
//! and the strain-rate laws, and integrates the model along uniaxial strain histories.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
