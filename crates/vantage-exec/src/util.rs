use std::process::Stdio;

use tokio::process::{Child, Command};

/// Command for `program` with `args`, detached from our stdio.
pub(crate) fn cmd_program(program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(|s| s.as_str()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd
}

/// SIGTERM first, then SIGKILL and reap.
#[cfg(target_family = "unix")]
pub(crate) async fn kill_graceful(child: &mut Child) -> std::io::Result<()> {
    if let Some(id) = child.id() {
        // SAFETY: plain kill(2) on a pid we spawned and have not reaped yet.
        unsafe {
            libc::kill(id as libc::pid_t, libc::SIGTERM);
        }
    }
    let _ = child.kill().await;
    Ok(())
}

#[cfg(target_family = "windows")]
pub(crate) async fn kill_graceful(child: &mut Child) -> std::io::Result<()> {
    child.kill().await
}
