//! Relaunching with the deployment context injected.
//!
//! - [`child_environment`] - `CLICKONCE_*` variables for a child process
//! - [`run_with_retries`] - the attempt/wait/give-up state machine
//! - [`ProcessLauncher`] - starts a [`LaunchSpec`] with retries

pub mod env;
pub mod process;
pub mod retry;

pub use env::child_environment;
pub use process::{LaunchSpec, Launched, ProcessLauncher, ProcessStarter, SystemStarter};
pub use retry::{
    run_with_retries, Delay, LaunchState, RetryPolicy, ThreadSleep, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_RETRY_DELAY,
};
