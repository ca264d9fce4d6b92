pub mod passes;
pub mod pipeline;

pub use pipeline::{DriverError, Pass, Pipeline, Session};
