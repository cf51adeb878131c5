pub mod core;
pub mod sim;

pub use crate::core::{SchedCore, SchedEvent};
pub use crate::sim::{ProcessSpec, Sim};
