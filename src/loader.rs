use serde::Serialize;
use tracing::info;

use crate::api::PromptService;
use crate::models::{StyleRecord, TemplateRecord};

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReferenceData {
    pub styles: Vec<StyleRecord>,
    pub templates: Vec<TemplateRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
}

/// Fetches both collections concurrently. Returns once both have settled.
pub async fn load_reference_data(service: &dyn PromptService) -> ReferenceData {
    let (styles, templates) = tokio::join!(service.fetch_styles(), service.fetch_templates());
    info!("✅ Reference data ready: {} styles, {} templates", styles.len(), templates.len());
    ReferenceData { styles, templates }
}
