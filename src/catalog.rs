use serde::Serialize;

use crate::loader::ReferenceData;
use crate::models::StyleRecord;
use crate::render::{resolve_image, ImageRef};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StyleCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: ImageRef,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub styles: usize,
    pub templates: usize,
}

pub fn filter_styles<'a>(styles: &'a [StyleRecord], query: &str) -> Vec<&'a StyleRecord> {
    let needle = query.trim().to_lowercase();
    styles
        .iter()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle) || s.tags.to_lowercase().contains(&needle))
        .collect()
}

pub fn style_card(style: &StyleRecord, asset_base: &str) -> StyleCard {
    StyleCard {
        id: style.id.clone(),
        name: style.name.clone(),
        description: style.description.clone(),
        image: resolve_image(&style.image, asset_base),
        tags: style.tag_list().into_iter().take(3).map(str::to_string).collect(),
    }
}

pub fn stats(data: &ReferenceData) -> CatalogStats {
    CatalogStats { styles: data.styles.len(), templates: data.templates.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::style;

    #[test]
    fn filter_matches_name_or_tags_case_insensitive() {
        let mut ink = style("2", "Ink Wash");
        ink.tags = "Japanese, brush".into();
        let styles = vec![style("1", "Neon Glow"), ink];

        let names = |q: &str| filter_styles(&styles, q).iter().map(|s| s.name.clone()).collect::<Vec<_>>();
        assert_eq!(names("neon"), vec!["Neon Glow"]);
        assert_eq!(names("BRUSH"), vec!["Ink Wash"]);
        assert_eq!(names("  ").len(), 2);
        assert!(names("vaporwave").is_empty());
    }

    #[test]
    fn card_keeps_first_three_tags() {
        let mut s = style("1", "Neon");
        s.tags = "a, b,, c, d".into();
        s.image = "img/neon.png".into();
        let card = style_card(&s, "https://example.com/gen");
        assert_eq!(card.tags, vec!["a", "b", "c"]);
        assert_eq!(card.image, ImageRef::Remote("https://example.com/gen/img/neon.png".into()));
    }
}
