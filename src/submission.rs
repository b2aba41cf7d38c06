use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ApiError;
use crate::composer::ValidationError;
use crate::models::{GenerationRequest, GenerationResult};

/// Lifecycle of the single generation slot. `Submitting` is the lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting {
        id: Uuid,
        started_at: DateTime<Utc>,
    },
    Success {
        result: GenerationResult,
        settled_at: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a generation is already in flight")]
    AlreadySubmitting,
    #[error("reference data is still loading")]
    NotReady,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Claim on the in-flight slot, handed back to `settle`.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: Uuid,
    pub request: GenerationRequest,
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    /// Enters `Submitting`, dropping whatever result or error was showing.
    pub fn begin(&mut self, request: GenerationRequest) -> Result<Ticket, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }
        let id = Uuid::new_v4();
        *self = SubmissionState::Submitting { id, started_at: Utc::now() };
        Ok(Ticket { id, request })
    }

    /// Returns false (and changes nothing) when `ticket_id` is not the in-flight submission.
    pub fn settle(&mut self, ticket_id: Uuid, outcome: Result<GenerationResult, ApiError>) -> bool {
        match self {
            SubmissionState::Submitting { id, .. } if *id == ticket_id => {}
            _ => {
                warn!("⚠️ Ignoring settlement for stale submission {}", ticket_id);
                return false;
            }
        }
        *self = match outcome {
            Ok(result) => {
                info!("✅ Generation {} settled with {} prompts", ticket_id, result.prompts.len());
                SubmissionState::Success { result, settled_at: Utc::now() }
            }
            Err(e) => {
                let message = e.user_message();
                warn!("❌ Generation {} failed: {}", ticket_id, message);
                SubmissionState::Error { message }
            }
        };
        true
    }
}
