mod executor;
mod default_executor;
pub mod builtin;
pub mod launcher;
pub mod path_resolver;
pub mod redirect;

pub use executor::{Executor, ExecStatus, ExecOutcome};
pub use default_executor::DefaultExecutor;
