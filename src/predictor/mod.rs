pub mod classifier;
pub mod engine;
pub mod features;
pub mod oracle;
pub mod presenter;

pub use engine::{evaluate, Evaluation};
pub use oracle::OracleHandle;
