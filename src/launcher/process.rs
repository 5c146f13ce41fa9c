//! Starting a child process with an injected deployment context.

use std::collections::BTreeMap;
use std::process::{Child, Command, Stdio};

use super::env::child_environment;
use super::retry::{run_with_retries, Delay, RetryPolicy, ThreadSleep};
use crate::deployment::DeploymentContext;
use crate::error::LaunchError;

/// What to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Program name or path.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Variables added to the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: BTreeMap::new(),
        }
    }

    /// Add the variables describing `context`.
    pub fn with_context(mut self, context: &DeploymentContext) -> Self {
        self.env.extend(child_environment(context));
        self
    }

    /// The command line, for log messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Starts processes.
///
/// `Ok(None)` means the start call returned without a process handle; the
/// launcher treats that exactly like an error.
pub trait ProcessStarter {
    type Handle;

    fn start(&mut self, spec: &LaunchSpec) -> Result<Option<Self::Handle>, LaunchError>;
}

/// Spawns real processes with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStarter;

impl ProcessStarter for SystemStarter {
    type Handle = Child;

    fn start(&mut self, spec: &LaunchSpec) -> Result<Option<Child>, LaunchError> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        cmd.spawn().map(Some).map_err(|source| LaunchError::Spawn {
            program: spec.program.clone(),
            source,
        })
    }
}

/// A process that was started.
#[derive(Debug)]
pub struct Launched<H> {
    /// Handle to the started process. It is not waited on.
    pub handle: H,
    /// How many attempts it took.
    pub attempts: u32,
}

/// Starts a process, retrying on failure.
///
/// # Example
///
/// ```no_run
/// use deployinfo::deployment::DeploymentContext;
/// use deployinfo::launcher::{LaunchSpec, ProcessLauncher};
///
/// let context = DeploymentContext::from_env();
/// let spec = LaunchSpec::new("contoso", vec!["--restarted".to_string()]).with_context(&context);
/// let launched = ProcessLauncher::system().launch(&spec).unwrap();
/// println!("started after {} attempt(s)", launched.attempts);
/// ```
pub struct ProcessLauncher<S = SystemStarter, D = ThreadSleep> {
    policy: RetryPolicy,
    starter: S,
    delay: D,
}

impl ProcessLauncher {
    /// Real processes, blocking sleep, default policy.
    pub fn system() -> Self {
        Self::new(RetryPolicy::default(), SystemStarter, ThreadSleep)
    }
}

impl<S: ProcessStarter, D: Delay> ProcessLauncher<S, D> {
    pub fn new(policy: RetryPolicy, starter: S, delay: D) -> Self {
        Self {
            policy,
            starter,
            delay,
        }
    }

    /// Replace the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn starter(&self) -> &S {
        &self.starter
    }

    /// Start `spec`, retrying per the policy.
    ///
    /// Returns as soon as one attempt starts the process; the child is not
    /// supervised. After the last failed attempt its error is returned as-is.
    pub fn launch(&mut self, spec: &LaunchSpec) -> Result<Launched<S::Handle>, LaunchError> {
        tracing::info!("Launching: {}", spec.display());

        let starter = &mut self.starter;
        let result = run_with_retries(&self.policy, &mut self.delay, |_| {
            starter
                .start(spec)?
                .ok_or_else(|| LaunchError::NotStarted {
                    program: spec.program.clone(),
                })
        });

        match result {
            Ok((handle, attempts)) => {
                tracing::debug!("Started {} after {} attempt(s)", spec.program, attempts);
                Ok(Launched { handle, attempts })
            }
            Err(error) => {
                tracing::error!("Failed to launch {}", spec.display());
                Err(error)
            }
        }
    }
}
