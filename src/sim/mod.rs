pub mod driver;
pub mod workload;

pub use driver::{ProcRecord, Sim};
pub use workload::{ParseError, ProcessSpec, parse_workload, random_workload};
