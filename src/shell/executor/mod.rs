pub mod builtins;
#[allow(clippy::module_inception)]
mod executor;
pub mod process;

pub use builtins::Continuation;
pub use executor::Executor;
