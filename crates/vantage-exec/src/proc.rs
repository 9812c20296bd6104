//! One-shot subprocess execution under a hard deadline.
use std::time::Duration;

use tracing::{debug, trace};

use crate::{
    error::{ExecError, ExecResult},
    util::{cmd_program, kill_graceful},
};

/// A single program invocation.
#[derive(Clone, Debug)]
pub struct ProcConfig {
    pub program: String,
    pub args: Vec<String>,
    /// The child is killed once this elapses.
    pub deadline: Duration,
    /// Return an error if exit code != 0
    pub fail_on_non_zero: bool,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            deadline: Duration::from_secs(10),
            fail_on_non_zero: true,
        }
    }
}

impl ProcConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Spawn the program and wait for it to exit, killing it at the deadline.
///
/// Output is discarded; only the exit status matters.
pub async fn run_to_exit(cfg: &ProcConfig) -> ExecResult<()> {
    if cfg.program.is_empty() {
        return Err(ExecError::MissingProgram);
    }

    trace!(target: "vantage.exec.proc", program = %cfg.program, args = ?cfg.args, "spawn");

    let mut child = cmd_program(&cfg.program, &cfg.args)
        .spawn()
        .map_err(|e| ExecError::Spawn(e.to_string()))?;

    tokio::select! {
        status = child.wait() => {
            let status = status?;
            if !status.success() && cfg.fail_on_non_zero {
                return match status.code() {
                    Some(code) => Err(ExecError::NonZeroExit { code }),
                    None => Err(ExecError::KilledBySignal),
                };
            }
            debug!(target: "vantage.exec.proc", program = %cfg.program, "exit success");
            Ok(())
        }
        _ = tokio::time::sleep(cfg.deadline) => {
            debug!(target: "vantage.exec.proc", program = %cfg.program, "deadline hit; killing child");
            let _ = kill_graceful(&mut child).await;
            Err(ExecError::Timeout(cfg.deadline))
        }
    }
}
