//! Startup programs and the one-shot placement each of them claims.
//!
//! Every entry is spawned once at startup. The first window whose process is
//! the spawned process (or one of its descendants) receives the entry's tags
//! and monitor instead of the rule table's; after that the entry is consumed.
//! Entries that never produce a window expire after a timeout.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::platform::{ProcessLineage, ProcessSpawner};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configured startup program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutostartEntry {
    pub command: Vec<String>,
    pub tags: u32,
    #[serde(default = "default_monitor")]
    pub monitor: i32,
}

fn default_monitor() -> i32 {
    -1
}

impl AutostartEntry {
    pub fn new<I, S>(command: I, tags: u32, monitor: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            tags,
            monitor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutostartStatus {
    Pending,
    Spawned,
    Consumed,
    Expired,
}

impl fmt::Display for AutostartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AutostartStatus::Pending => "pending",
            AutostartStatus::Spawned => "spawned",
            AutostartStatus::Consumed => "consumed",
            AutostartStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct PendingAssignment {
    pub command: Vec<String>,
    pub pid: Option<u32>,
    pub tags: u32,
    pub monitor: i32,
    pub status: AutostartStatus,
    pub spawned_at: Option<Instant>,
}

/// Placement handed to the first window of a startup program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub tags: u32,
    pub monitor: i32,
}

#[derive(Debug, Clone)]
pub struct Autostart {
    entries: Vec<PendingAssignment>,
    timeout: Duration,
}

impl Default for Autostart {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_TIMEOUT)
    }
}

impl Autostart {
    pub fn new(entries: Vec<AutostartEntry>, timeout: Duration) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| PendingAssignment {
                command: entry.command,
                pid: None,
                tags: entry.tags,
                monitor: entry.monitor,
                status: AutostartStatus::Pending,
                spawned_at: None,
            })
            .collect();
        Self { entries, timeout }
    }

    pub fn entries(&self) -> &[PendingAssignment] {
        &self.entries
    }

    /// Spawn every pending entry in declaration order.
    pub fn start<S: ProcessSpawner + ?Sized>(&mut self, spawner: &S, now: Instant) {
        for entry in &mut self.entries {
            if entry.status != AutostartStatus::Pending {
                continue;
            }
            if entry.command.is_empty() {
                // Empty commands only terminate the list
                entry.status = AutostartStatus::Expired;
                continue;
            }
            match spawner.spawn(&entry.command) {
                Ok(pid) => {
                    tracing::info!(
                        "Autostart spawned: {} (pid={}, tags={}, monitor={})",
                        entry.command.join(" "),
                        pid,
                        entry.tags,
                        entry.monitor
                    );
                    entry.pid = Some(pid);
                    entry.spawned_at = Some(now);
                    entry.status = AutostartStatus::Spawned;
                }
                Err(e) => {
                    tracing::error!("Autostart failed: {}: {}", entry.command.join(" "), e);
                    entry.status = AutostartStatus::Expired;
                }
            }
        }
    }

    /// Find the entry a newly mapped window belongs to and consume it.
    pub fn claim<L: ProcessLineage + ?Sized>(
        &mut self,
        pid: Option<u32>,
        lineage: &L,
        now: Instant,
    ) -> Option<Claim> {
        self.expire(now);
        let pid = pid?;

        let entry = self.entries.iter_mut().find(|entry| {
            entry.status == AutostartStatus::Spawned
                && entry
                    .pid
                    .is_some_and(|ancestor| ancestor == pid || lineage.is_descendant(pid, ancestor))
        })?;

        tracing::info!(
            "Autostart claim: pid {} -> {} (tags={}, monitor={})",
            pid,
            entry.command.join(" "),
            entry.tags,
            entry.monitor
        );
        entry.status = AutostartStatus::Consumed;
        Some(Claim {
            tags: entry.tags,
            monitor: entry.monitor,
        })
    }

    /// Give up on spawned entries that have not produced a window in time.
    pub fn expire(&mut self, now: Instant) -> usize {
        let mut expired = 0;
        for entry in &mut self.entries {
            if entry.status != AutostartStatus::Spawned {
                continue;
            }
            let Some(spawned_at) = entry.spawned_at else {
                continue;
            };
            if now.saturating_duration_since(spawned_at) > self.timeout {
                tracing::warn!(
                    "Autostart expired without a window: {}",
                    entry.command.join(" ")
                );
                entry.status = AutostartStatus::Expired;
                expired += 1;
            }
        }
        expired
    }

    pub fn is_exhausted(&self) -> bool {
        self.entries.iter().all(|entry| {
            matches!(
                entry.status,
                AutostartStatus::Consumed | AutostartStatus::Expired
            )
        })
    }
}
