use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::ReferenceData;
use crate::models::{TemplateRecord, VariationMode};

/// What the user has picked so far. Survives submissions so it can be resubmitted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SelectionState {
    pub topic: String,
    pub style_id: String,
    pub template_id: String,
    pub variation_mode: VariationMode,
    pub apply_die_cut: bool,
}

/// Partial edit coming from the form. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionPatch {
    pub topic: Option<String>,
    pub style_id: Option<String>,
    pub template_id: Option<String>,
    pub variation_mode: Option<VariationMode>,
    pub apply_die_cut: Option<bool>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown style id: {0}")]
    UnknownStyle(String),
    #[error("unknown template id: {0}")]
    UnknownTemplate(String),
}

impl SelectionState {
    /// Picks the first style and template once the collections are in.
    pub fn apply_defaults(&mut self, data: &ReferenceData) {
        if let Some(style) = data.styles.first() {
            self.style_id = style.id.clone();
        }
        if let Some(template) = data.templates.first() {
            self.template_id = template.id.clone();
            self.derive_die_cut(&data.templates);
        }
    }

    /// Changes the template and re-derives the die-cut flag from it, discarding
    /// any manual override. Re-selecting the current template changes nothing.
    pub fn select_template(&mut self, template_id: String, templates: &[TemplateRecord]) {
        if template_id == self.template_id {
            return;
        }
        self.template_id = template_id;
        self.derive_die_cut(templates);
    }

    fn derive_die_cut(&mut self, templates: &[TemplateRecord]) {
        if let Some(t) = templates.iter().find(|t| t.id == self.template_id) {
            self.apply_die_cut = t.die_cut_by_default();
        }
    }

    /// Ids must name loaded records; a rejected patch leaves the selection untouched.
    /// The template change (and its derivation) lands before an explicit die-cut value.
    pub fn apply_patch(&mut self, patch: SelectionPatch, data: &ReferenceData) -> Result<(), SelectionError> {
        if let Some(id) = patch.style_id.as_ref().filter(|id| !data.styles.iter().any(|s| &s.id == *id)) {
            return Err(SelectionError::UnknownStyle(id.clone()));
        }
        if let Some(id) = patch.template_id.as_ref().filter(|id| !data.templates.iter().any(|t| &t.id == *id)) {
            return Err(SelectionError::UnknownTemplate(id.clone()));
        }

        if let Some(topic) = patch.topic {
            self.topic = topic;
        }
        if let Some(style_id) = patch.style_id {
            self.style_id = style_id;
        }
        if let Some(template_id) = patch.template_id {
            self.select_template(template_id, &data.templates);
        }
        if let Some(mode) = patch.variation_mode {
            self.variation_mode = mode;
        }
        if let Some(die_cut) = patch.apply_die_cut {
            self.apply_die_cut = die_cut;
        }
        Ok(())
    }
}
