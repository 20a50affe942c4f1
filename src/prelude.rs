//! Makes available common structures needed to evaluate the CSCM model
//!
//! You may write `use cscm::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{CebFip, ConcreteProperties, Keyword, MaterialConstants, ParamCscm, PropertyProvider, Revision};
pub use crate::material::{Axis, Plotter, Settings, UniaxialCurve, UniaxialIntegrator, UniaxialState};
pub use crate::StrError;
