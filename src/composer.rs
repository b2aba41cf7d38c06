use thiserror::Error;

use crate::models::GenerationRequest;
use crate::selection::SelectionState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("topic is required")]
    MissingTopic,
    #[error("a style must be selected")]
    MissingStyle,
    #[error("a template must be selected")]
    MissingTemplate,
}

/// Snapshot the selection into the wire request. Whitespace-only topics count as empty.
pub fn compose_request(selection: &SelectionState) -> Result<GenerationRequest, ValidationError> {
    if selection.topic.trim().is_empty() {
        return Err(ValidationError::MissingTopic);
    }
    if selection.style_id.is_empty() {
        return Err(ValidationError::MissingStyle);
    }
    if selection.template_id.is_empty() {
        return Err(ValidationError::MissingTemplate);
    }
    Ok(GenerationRequest {
        topic: selection.topic.clone(),
        style_id: selection.style_id.clone(),
        template_id: selection.template_id.clone(),
        variation_mode: selection.variation_mode,
        apply_die_cut: u8::from(selection.apply_die_cut),
    })
}
