//! Audit log for setup runs

use crate::setup::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// When the routine finished
    pub timestamp: DateTime<Utc>,
    /// Routine name
    pub routine: String,
    /// Profile the routine belongs to
    pub profile: String,
    /// Result: "registered" or "skipped"
    pub outcome: String,
    /// ACLs registered by the routine
    pub acl_count: usize,
}

/// Audit logger for setup runs
#[derive(Debug)]
pub struct AuditLogger {
    sender: mpsc::UnboundedSender<AuditLogEntry>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AuditLogEntry>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Record one routine of a setup run
    pub fn log(&self, routine: &str, profile: Profile, acl_count: usize) {
        let entry = AuditLogEntry {
            timestamp: Utc::now(),
            routine: routine.to_string(),
            profile: profile.as_str().to_string(),
            outcome: if acl_count == 0 { "skipped" } else { "registered" }.to_string(),
            acl_count,
        };

        if let Err(e) = self.sender.send(entry.clone()) {
            error!("Failed to send audit log entry: {}", e);
        } else {
            debug!(
                "Audit: routine={} profile={} outcome={} acls={}",
                entry.routine, entry.profile, entry.outcome, entry.acl_count
            );
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        let (sender, _) = mpsc::unbounded_channel();
        Self { sender }
    }
}

/// Background task to process audit logs
pub async fn process_audit_logs(mut receiver: mpsc::UnboundedReceiver<AuditLogEntry>) {
    while let Some(entry) = receiver.recv().await {
        tracing::info!(
            "Setup audit: routine={} profile={} outcome={} acls={} at={}",
            entry.routine,
            entry.profile,
            entry.outcome,
            entry.acl_count,
            entry.timestamp.to_rfc3339()
        );
    }
}
