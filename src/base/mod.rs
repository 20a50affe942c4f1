//! Implements the base structures: parameters, property providers, and material constants

mod ceb_fip;
mod keyword;
mod material_constants;
mod parameters;
mod revision;
mod sample_params;
pub use crate::base::ceb_fip::*;
pub use crate::base::keyword::*;
pub use crate::base::material_constants::*;
pub use crate::base::parameters::*;
pub use crate::base::revision::*;
pub use crate::base::sample_params::*;
