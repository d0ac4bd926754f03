//! Registry-backed definitions and the composite node kinds.

mod composite;
mod reference;

pub use composite::*;
pub use reference::*;
