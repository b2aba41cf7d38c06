use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

/// Ids come back from the service as either JSON strings or numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(i64),
    Text(String),
}

fn record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleRecord {
    #[serde(deserialize_with = "record_id")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub image: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub tags: String, // comma-joined
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub style_dna: String,
}

impl StyleRecord {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemplateRecord {
    #[serde(deserialize_with = "record_id")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub image: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub rules_positive: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub rules_negative: String,
    #[serde_as(as = "DefaultOnNull<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub die_cut_default: i64, // 1 = die-cut on
}

impl TemplateRecord {
    pub fn die_cut_by_default(&self) -> bool {
        self.die_cut_default == 1
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariationMode {
    #[default]
    #[serde(rename = "suave")]
    Soft,
    #[serde(rename = "creativa")]
    Creative,
}

/// Snapshot of the selection as sent to `generate.php`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationRequest {
    pub topic: String,
    pub style_id: String,
    pub template_id: String,
    pub variation_mode: VariationMode,
    pub apply_die_cut: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PromptVariant {
    #[serde(rename = "type")]
    pub label: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct GenerationResult {
    #[serde(default)]
    pub negative_base: Option<String>,
    #[serde(default)]
    pub prompts: Vec<PromptVariant>,
}

impl GenerationResult {
    /// Negative-filter summary, if the service flagged anything.
    pub fn warning(&self) -> Option<&str> {
        self.negative_base.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// `{ success, data?, error? }` wrapper every endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let s: StyleRecord = serde_json::from_value(json!({
            "id": 1, "name": "Neon", "description": null, "image": "", "tags": "neon, glow", "style_dna": "--sref 1"
        }))
        .unwrap();
        assert_eq!(s.id, "1");
        assert_eq!(s.description, "");
        assert_eq!(s.tag_list(), vec!["neon", "glow"]);

        let t: TemplateRecord =
            serde_json::from_value(json!({ "id": "7", "name": "Sticker", "die_cut_default": "1" })).unwrap();
        assert_eq!(t.id, "7");
        assert!(t.die_cut_by_default());
    }

    #[test]
    fn die_cut_default_missing_is_off() {
        let t: TemplateRecord = serde_json::from_value(json!({ "id": 2, "name": "Poster" })).unwrap();
        assert_eq!(t.die_cut_default, 0);
        assert!(!t.die_cut_by_default());
    }

    #[test]
    fn null_columns_do_not_sink_the_collection() {
        let envelope: Envelope<Vec<TemplateRecord>> = serde_json::from_value(json!({
            "success": true,
            "data": [
                { "id": 1, "name": "Sticker", "die_cut_default": 1 },
                { "id": 2, "name": null, "die_cut_default": null }
            ]
        }))
        .unwrap();
        let templates = envelope.data.unwrap();
        assert_eq!(templates.len(), 2);
        assert!(templates[0].die_cut_by_default());
        assert_eq!(templates[1].name, "");
        assert_eq!(templates[1].die_cut_default, 0);
    }

    #[test]
    fn envelope_without_data_or_error() {
        let envelope: Envelope<Vec<StyleRecord>> = serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_none());
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let req = GenerationRequest {
            topic: "A skull in neon".into(),
            style_id: "3".into(),
            template_id: "7".into(),
            variation_mode: VariationMode::Creative,
            apply_die_cut: 1,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "topic": "A skull in neon",
                "style_id": "3",
                "template_id": "7",
                "variation_mode": "creativa",
                "apply_die_cut": 1
            })
        );
    }

    #[test]
    fn blank_negative_base_is_no_warning() {
        let r: GenerationResult = serde_json::from_value(json!({
            "negative_base": "  ",
            "prompts": [{ "type": "POSITIVE", "text": "skull --v 6" }]
        }))
        .unwrap();
        assert_eq!(r.warning(), None);
        assert_eq!(r.prompts[0].label, "POSITIVE");
    }
}
