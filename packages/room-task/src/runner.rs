//! Invocation driver: resolve room, create if absent, add member, send
//! message, then reduce the step outcomes into a final verdict.
//!
//! Every step is attempted in order. A failed step is recorded and the run
//! keeps going; there are no retries and no early abort. Only the room
//! listing is exempt from the verdict: a failed listing just leaves the
//! room unresolved.

use hydra_client::{find_room_by_title, HydraClient, HydraError};
use serde::Serialize;
use serde_json::Value;

use crate::config::Params;

/// Outcome of one step of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The call returned 200 and modified the service.
    Changed,
    /// The person is already a participant (403 from the memberships
    /// endpoint). Neither a change nor a failure.
    AlreadyMember,
    /// The step's inputs were absent; nothing was attempted.
    Skipped,
    /// API or transport failure. `status` is absent when no HTTP response
    /// was received.
    Failed { status: Option<u16> },
}

/// Named record of one step, kept in invocation order.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: &'static str,
    pub outcome: StepOutcome,
}

/// Accumulated result of one invocation.
#[derive(Debug, Default)]
pub struct RunReport {
    pub changed: bool,
    pub failed: bool,
    /// Body of the last response observed, success or failure. This is
    /// the payload of the final report.
    pub last_body: Value,
    pub steps: Vec<StepRecord>,
}

impl RunReport {
    fn record(&mut self, step: &'static str, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Changed => self.changed = true,
            StepOutcome::Failed { .. } => self.failed = true,
            StepOutcome::AlreadyMember | StepOutcome::Skipped => {}
        }
        self.steps.push(StepRecord { step, outcome });
    }

    fn fail(&mut self, step: &'static str, err: &HydraError) {
        tracing::warn!(step, error = %err, "step failed, continuing");
        self.last_body = err.diagnostic();
        self.record(step, StepOutcome::Failed { status: err.status() });
    }
}

fn to_body<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Run the full sequence against `client` with the given parameters.
pub async fn run(client: &HydraClient, params: &Params) -> RunReport {
    let mut report = RunReport::default();

    // Resolve: one listing per invocation, substring match against titles.
    let rooms = match client.list_rooms().await {
        Ok(rooms) => rooms,
        Err(err) => {
            tracing::warn!(error = %err, "room listing failed, treating as empty");
            Vec::new()
        }
    };
    let mut room_id = find_room_by_title(&rooms, &params.room).map(|room| room.id.clone());

    if let Some(id) = room_id.as_deref() {
        tracing::debug!(room_id = %id, title = %params.room, "Resolved existing room");
        report.record("create_room", StepOutcome::Skipped);
    } else {
        match client.create_room(&params.room).await {
            Ok(room) => {
                tracing::info!(room_id = %room.id, title = %room.title, "Created room");
                report.last_body = to_body(&room);
                room_id = Some(room.id);
                report.record("create_room", StepOutcome::Changed);
            }
            Err(err) => report.fail("create_room", &err),
        }
    }

    // The id, once obtained, stays fixed for the rest of the run.
    match &params.members {
        Some(email) => match client.add_member(room_id.as_deref(), email).await {
            Ok(membership) => {
                tracing::info!(membership_id = %membership.id, email = %email, "Added member");
                report.last_body = to_body(&membership);
                report.record("add_member", StepOutcome::Changed);
            }
            Err(HydraError::Api { status: 403, body }) => {
                tracing::debug!(email = %email, "Member already present");
                report.last_body = body;
                report.record("add_member", StepOutcome::AlreadyMember);
            }
            Err(err) => report.fail("add_member", &err),
        },
        None => report.record("add_member", StepOutcome::Skipped),
    }

    if params.text.is_some() || params.file.is_some() {
        match client
            .send_message(
                room_id.as_deref(),
                params.text.as_deref(),
                params.file.as_deref(),
            )
            .await
        {
            Ok(message) => {
                tracing::info!(message_id = %message.id, "Posted message");
                report.last_body = to_body(&message);
                report.record("send_message", StepOutcome::Changed);
            }
            Err(err) => report.fail("send_message", &err),
        }
    } else {
        report.record("send_message", StepOutcome::Skipped);
    }

    tracing::debug!(
        changed = report.changed,
        failed = report.failed,
        steps = ?report.steps,
        "Run complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_reduction() {
        let mut report = RunReport::default();
        report.record("create_room", StepOutcome::Skipped);
        report.record("add_member", StepOutcome::AlreadyMember);
        report.record("send_message", StepOutcome::Skipped);
        assert!(!report.changed);
        assert!(!report.failed);

        report.record("send_message", StepOutcome::Changed);
        assert!(report.changed);
        assert!(!report.failed);

        report.record("add_member", StepOutcome::Failed { status: Some(500) });
        assert!(report.changed);
        assert!(report.failed);
    }

    #[test]
    fn test_fail_keeps_diagnostic_body() {
        let mut report = RunReport::default();
        let err = HydraError::Api {
            status: 500,
            body: json!({"message": "internal"}),
        };
        report.fail("create_room", &err);
        assert_eq!(report.last_body, json!({"message": "internal"}));
        assert_eq!(
            report.steps[0].outcome,
            StepOutcome::Failed { status: Some(500) }
        );
    }
}
