//! Resume preview rendering.
//!
//! The template is a closed set of variants selected by the identifier
//! stored on the resume — unknown identifiers fall back to `Classic`
//! rather than failing the preview. Each variant implements the same
//! contract: structured resume data in, presentation-ready section list
//! out. Text direction is data here, derived from the resume's language
//! tag; the presentation layer applies it.

pub mod templates;

use serde_json::Value;

use crate::models::Resume;
use templates::{ClassicTemplate, CompactTemplate, ModernTemplate};

/// Script direction for the preview, derived from the BCP 47 language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

const RTL_LANGUAGES: [&str; 4] = ["ar", "he", "fa", "ur"];

pub fn direction_for_language(tag: &str) -> TextDirection {
    let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
    if RTL_LANGUAGES.contains(&primary.as_str()) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub direction: TextDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub id: String,
    pub heading: String,
    pub items: Vec<String>,
}

/// Presentation-ready preview. Pure data; the page markup around it is out
/// of scope.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResume {
    pub template: &'static str,
    pub direction: TextDirection,
    pub name: String,
    pub email: String,
    pub headline: Option<String>,
    pub sections: Vec<RenderedSection>,
}

/// The rendering contract every template variant implements.
pub trait TemplateRenderer: Send + Sync {
    fn id(&self) -> &'static str;
    fn render(&self, resume: &Resume, options: &RenderOptions) -> RenderedResume;
}

/// The closed set of templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Classic,
    Modern,
    Compact,
}

impl TemplateKind {
    /// Looks a template up by its stored identifier. Unknown identifiers
    /// fall back to `Classic` so an old resume never loses its preview.
    pub fn from_id(id: &str) -> TemplateKind {
        match id {
            "modern" => TemplateKind::Modern,
            "compact" => TemplateKind::Compact,
            _ => TemplateKind::Classic,
        }
    }

    pub fn renderer(self) -> &'static dyn TemplateRenderer {
        match self {
            TemplateKind::Classic => &ClassicTemplate,
            TemplateKind::Modern => &ModernTemplate,
            TemplateKind::Compact => &CompactTemplate,
        }
    }
}

/// Renders the preview for a resume: template picked by the stored
/// identifier, direction picked by the language tag.
pub fn render_preview(resume: &Resume) -> RenderedResume {
    let options = RenderOptions {
        direction: direction_for_language(&resume.language),
    };
    TemplateKind::from_id(&resume.template_id)
        .renderer()
        .render(resume, &options)
}

/// Section ids in display order: the explicit ordering first, then any
/// section present in the data that the ordering does not mention.
pub(crate) fn ordered_section_ids(resume: &Resume) -> Vec<String> {
    let mut ids: Vec<String> = resume.section_order.clone();
    if let Some(map) = resume.sections.as_object() {
        for key in map.keys() {
            if !ids.iter().any(|id| id == key) {
                ids.push(key.clone());
            }
        }
    }
    ids
}

/// Flattens a freeform section value into display lines.
pub(crate) fn section_items(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(entry) => Some(
                    entry
                        .values()
                        .filter_map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(" · "),
                ),
                _ => None,
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| format!("{k}: {s}")))
            .collect(),
        _ => vec![],
    }
}

pub(crate) fn title_case(id: &str) -> String {
    id.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_template_ids_fall_back_to_classic() {
        assert_eq!(TemplateKind::from_id("classic"), TemplateKind::Classic);
        assert_eq!(TemplateKind::from_id("modern"), TemplateKind::Modern);
        assert_eq!(TemplateKind::from_id("compact"), TemplateKind::Compact);
        assert_eq!(TemplateKind::from_id("glitter-2019"), TemplateKind::Classic);
    }

    #[test]
    fn direction_follows_the_primary_language_subtag() {
        assert_eq!(direction_for_language("en"), TextDirection::Ltr);
        assert_eq!(direction_for_language("ar"), TextDirection::Rtl);
        assert_eq!(direction_for_language("ar-EG"), TextDirection::Rtl);
        assert_eq!(direction_for_language("he"), TextDirection::Rtl);
        assert_eq!(direction_for_language("pt-BR"), TextDirection::Ltr);
    }

    #[test]
    fn title_case_handles_separators() {
        assert_eq!(title_case("work_experience"), "Work Experience");
        assert_eq!(title_case("skills"), "Skills");
    }

    #[test]
    fn section_items_flatten_strings_arrays_and_objects() {
        use serde_json::json;
        assert_eq!(section_items(&json!("one line")), vec!["one line"]);
        assert_eq!(section_items(&json!(["a", "b"])), vec!["a", "b"]);
        assert_eq!(
            section_items(&json!({"role": "Engineer"})),
            vec!["role: Engineer"]
        );
        assert!(section_items(&json!(42)).is_empty());
    }
}
