//! Implements the CSCM concrete model: failure surfaces, damage, rate effects, and the uniaxial integrator

mod axis;
mod cap_surface;
mod damage;
mod integrator;
mod invariants;
mod plotter;
mod settings;
mod strain_rate;
mod uniaxial_state;
mod yield_criterion;
mod yield_surface;
pub use crate::material::axis::*;
pub use crate::material::cap_surface::*;
pub use crate::material::damage::*;
pub use crate::material::integrator::*;
pub use crate::material::invariants::*;
pub use crate::material::plotter::*;
pub use crate::material::settings::*;
pub use crate::material::strain_rate::*;
pub use crate::material::uniaxial_state::*;
pub use crate::material::yield_criterion::*;
pub use crate::material::yield_surface::*;
