//! Fixtures shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::api::{ApiError, PromptService};
use crate::models::{GenerationRequest, GenerationResult, PromptVariant, StyleRecord, TemplateRecord};

pub fn style(id: &str, name: &str) -> StyleRecord {
    StyleRecord {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        image: String::new(),
        tags: String::new(),
        style_dna: format!("--sref {id}"),
    }
}

pub fn template(id: &str, name: &str, die_cut_default: i64) -> TemplateRecord {
    TemplateRecord {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        image: String::new(),
        rules_positive: String::new(),
        rules_negative: String::new(),
        die_cut_default,
    }
}

pub fn prompts(texts: &[&str]) -> GenerationResult {
    GenerationResult {
        negative_base: None,
        prompts: texts.iter().map(|t| PromptVariant { label: "POSITIVE".into(), text: t.to_string() }).collect(),
    }
}

/// In-memory service. Queued outcomes are served in order; an empty queue answers with one prompt.
#[derive(Default)]
pub struct FakeService {
    pub styles: Vec<StyleRecord>,
    pub templates: Vec<TemplateRecord>,
    pub outcomes: Mutex<VecDeque<Result<GenerationResult, ApiError>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
    pub gate: Option<Notify>,
    pub templates_gate: Option<Notify>,
    pub styles_fetched: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeService {
    pub fn with_data(styles: Vec<StyleRecord>, templates: Vec<TemplateRecord>) -> Self {
        Self { styles, templates, ..Default::default() }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    /// Holds `fetch_templates` until `release_templates` is called.
    pub fn with_pending_templates(mut self) -> Self {
        self.templates_gate = Some(Notify::new());
        self
    }

    pub fn release_templates(&self) {
        if let Some(gate) = &self.templates_gate {
            gate.notify_one();
        }
    }

    pub fn queue(&self, outcome: Result<GenerationResult, ApiError>) {
        self.outcomes.lock().push_back(outcome);
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn generate_calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl PromptService for FakeService {
    async fn fetch_styles(&self) -> Vec<StyleRecord> {
        self.styles_fetched.fetch_add(1, Ordering::SeqCst);
        self.styles.clone()
    }

    async fn fetch_templates(&self) -> Vec<TemplateRecord> {
        if let Some(gate) = &self.templates_gate {
            gate.notified().await;
        }
        self.templates.clone()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError> {
        self.requests.lock().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.outcomes.lock().pop_front().unwrap_or_else(|| Ok(prompts(&["default prompt"])))
    }
}
