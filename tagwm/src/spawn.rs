use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::platform::{ProcessLineage, ProcessSpawner};

/// Placeholder in spawn arguments replaced with the selected monitor index.
pub const MONITOR_PLACEHOLDER: &str = "{monitor}";

/// Let the kernel reap spawned children; nothing ever waits on them.
pub fn ignore_children() -> Result<()> {
    let action = SigAction::new(
        SigHandler::SigIgn,
        SaFlags::SA_NOCLDSTOP | SaFlags::SA_NOCLDWAIT | SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: installs SIG_IGN, no handler code runs
    unsafe { sigaction(Signal::SIGCHLD, &action) }.context("Failed to ignore SIGCHLD")?;
    Ok(())
}

pub fn substitute_monitor(argv: &[String], monitor: usize) -> Vec<String> {
    argv.iter()
        .map(|arg| arg.replace(MONITOR_PLACEHOLDER, &monitor.to_string()))
        .collect()
}

/// Starts programs in their own session, detached from the daemon's terminal.
#[derive(Debug, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn(&self, argv: &[String]) -> Result<u32, String> {
        let Some((program, args)) = argv.split_first() else {
            return Err("empty command".to_string());
        };

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());
        // SAFETY: setsid is async-signal-safe
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }

        match cmd.spawn() {
            Ok(child) => {
                tracing::info!("Spawned: {} (pid={})", argv.join(" "), child.id());
                Ok(child.id())
            }
            Err(e) => Err(format!("Failed to spawn '{}': {}", program, e)),
        }
    }
}

/// Process ancestry read from `/proc/<pid>/stat`.
#[derive(Debug, Default)]
pub struct ProcLineage;

impl ProcLineage {
    fn parent_of(pid: u32) -> Option<u32> {
        let stat = std::fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
        parse_stat_ppid(&stat)
    }
}

impl ProcessLineage for ProcLineage {
    fn is_descendant(&self, pid: u32, ancestor: u32) -> bool {
        let mut current = pid;
        // pid 1 is the root of every chain
        while current > 1 {
            let Some(parent) = Self::parent_of(current) else {
                return false;
            };
            if parent == ancestor {
                return true;
            }
            if parent == current {
                return false;
            }
            current = parent;
        }
        false
    }
}

/// Parent pid from a stat line. The command name may itself contain spaces
/// and parentheses, so fields are counted after the last ')'.
fn parse_stat_ppid(stat: &str) -> Option<u32> {
    let rest = &stat[stat.rfind(')')? + 1..];
    let mut fields = rest.split_whitespace();
    let _state = fields.next()?;
    fields.next()?.parse().ok()
}
