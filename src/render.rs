use arboard::Clipboard;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::GenerationResult;
use crate::submission::SubmissionState;

pub const SUCCESS_BANNER: &str = "Prompts built successfully. Paste them straight into Midjourney.";
pub const IDLE_HINT: &str = "Pick a topic, a style and a template, then build the prompts.";
pub const COPY_CONFIRMATION: &str = "Prompt copied to clipboard";

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VariantBlock {
    pub index: usize,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultView {
    pub banner: &'static str,
    pub warning: Option<String>,
    pub variants: Vec<VariantBlock>,
}

pub fn render_result(result: &GenerationResult) -> ResultView {
    ResultView {
        banner: SUCCESS_BANNER,
        warning: result.warning().map(str::to_string),
        variants: result
            .prompts
            .iter()
            .enumerate()
            .map(|(index, p)| VariantBlock { index, label: p.label.clone(), text: p.text.clone() })
            .collect(),
    }
}

/// Right-hand panel of the lab.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultPanel {
    Idle {
        hint: &'static str,
    },
    Submitting {
        started_at: DateTime<Utc>,
    },
    Error {
        message: String,
    },
    Success {
        settled_at: DateTime<Utc>,
        #[serde(flatten)]
        view: ResultView,
    },
}

impl From<&SubmissionState> for ResultPanel {
    fn from(state: &SubmissionState) -> Self {
        match state {
            SubmissionState::Idle => ResultPanel::Idle { hint: IDLE_HINT },
            SubmissionState::Submitting { started_at, .. } => ResultPanel::Submitting { started_at: *started_at },
            SubmissionState::Error { message } => ResultPanel::Error { message: message.clone() },
            SubmissionState::Success { result, settled_at } => {
                ResultPanel::Success { settled_at: *settled_at, view: render_result(result) }
            }
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ImageRef {
    Remote(String),
    Placeholder,
}

/// Absolute URLs pass through, relative paths are joined onto `asset_base`.
pub fn resolve_image(image: &str, asset_base: &str) -> ImageRef {
    let image = image.trim();
    if image.is_empty() {
        ImageRef::Placeholder
    } else if image.starts_with("http") {
        ImageRef::Remote(image.to_string())
    } else {
        ImageRef::Remote(format!("{}/{}", asset_base.trim_end_matches('/'), image.trim_start_matches('/')))
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardWriter: Send {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard. Opened per copy so a missing display only fails that copy.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ClipboardWriter for ArboardClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard.set_text(text).map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
