use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::api::{ApiError, PromptService};
use crate::composer::compose_request;
use crate::loader::{load_reference_data, LoadState, ReferenceData};
use crate::models::{GenerationResult, StyleRecord, TemplateRecord};
use crate::render::ResultPanel;
use crate::selection::{SelectionError, SelectionPatch, SelectionState};
use crate::submission::{SubmissionState, SubmitError, Ticket};

/// The prompt-assembly workflow: reference data, the form, and the result slot.
#[derive(Debug)]
pub struct Laboratory {
    load_state: LoadState,
    data: ReferenceData,
    selection: SelectionState,
    submission: SubmissionState,
}

#[derive(Debug, Serialize)]
pub struct LabSnapshot {
    pub load_state: LoadState,
    pub styles: Vec<StyleRecord>,
    pub templates: Vec<TemplateRecord>,
    pub selection: SelectionState,
    pub can_submit: bool,
    pub panel: ResultPanel,
}

pub type SharedLab = Arc<RwLock<Laboratory>>;

impl Default for Laboratory {
    fn default() -> Self {
        Self::new()
    }
}

impl Laboratory {
    pub fn new() -> Self {
        Self {
            load_state: LoadState::Loading,
            data: ReferenceData::default(),
            selection: SelectionState::default(),
            submission: SubmissionState::Idle,
        }
    }

    pub fn shared() -> SharedLab {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn mark_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Installs freshly loaded collections, re-picks defaults and flips to `Ready`.
    pub fn apply_loaded(&mut self, data: ReferenceData) {
        self.data = data;
        self.selection.style_id.clear();
        self.selection.template_id.clear();
        self.selection.apply_defaults(&self.data);
        self.load_state = LoadState::Ready;
    }

    pub fn update_selection(&mut self, patch: SelectionPatch) -> Result<(), SelectionError> {
        self.selection.apply_patch(patch, &self.data)
    }

    pub fn can_submit(&self) -> bool {
        self.load_state == LoadState::Ready && !self.submission.is_submitting()
    }

    /// Validates the form and claims the in-flight slot. No network happens here.
    pub fn begin_submission(&mut self) -> Result<Ticket, SubmitError> {
        if self.load_state != LoadState::Ready {
            return Err(SubmitError::NotReady);
        }
        if self.submission.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }
        let request = compose_request(&self.selection)?;
        self.submission.begin(request)
    }

    pub fn settle(&mut self, ticket: &Ticket, outcome: Result<GenerationResult, ApiError>) -> bool {
        self.submission.settle(ticket.id, outcome)
    }

    pub fn panel(&self) -> ResultPanel {
        ResultPanel::from(&self.submission)
    }

    /// Raw text of the `index`th variant of the current result.
    pub fn variant_text(&self, index: usize) -> Option<&str> {
        match &self.submission {
            SubmissionState::Success { result, .. } => result.prompts.get(index).map(|p| p.text.as_str()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> LabSnapshot {
        LabSnapshot {
            load_state: self.load_state,
            styles: self.data.styles.clone(),
            templates: self.data.templates.clone(),
            selection: self.selection.clone(),
            can_submit: self.can_submit(),
            panel: self.panel(),
        }
    }
}

/// Loads reference data into the lab. The lock is only taken around the state changes.
pub async fn load(lab: &SharedLab, service: &dyn PromptService) {
    lab.write().mark_loading();
    let data = load_reference_data(service).await;
    lab.write().apply_loaded(data);
}

/// Runs one generation end to end and returns the settled panel.
pub async fn submit(lab: &SharedLab, service: &dyn PromptService) -> Result<ResultPanel, SubmitError> {
    let ticket = lab.write().begin_submission()?;
    info!(
        "🚀 Submitting topic '{}' (style={}, template={}, mode={:?}, die_cut={})",
        preview(&ticket.request.topic),
        ticket.request.style_id,
        ticket.request.template_id,
        ticket.request.variation_mode,
        ticket.request.apply_die_cut
    );

    let outcome = service.generate(&ticket.request).await;

    let mut guard = lab.write();
    guard.settle(&ticket, outcome);
    Ok(guard.panel())
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(40).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
