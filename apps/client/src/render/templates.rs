//! The three template variants. They share the section pipeline from the
//! parent module and differ in ordering, heading treatment and density.

use crate::models::Resume;

use super::{
    ordered_section_ids, section_items, title_case, RenderOptions, RenderedResume,
    RenderedSection, TemplateRenderer,
};

const COMPACT_ITEMS_PER_SECTION: usize = 3;

fn collect_sections(resume: &Resume, heading: impl Fn(&str) -> String) -> Vec<RenderedSection> {
    ordered_section_ids(resume)
        .into_iter()
        .filter_map(|id| {
            let value = resume.sections.get(&id)?;
            Some(RenderedSection {
                heading: heading(&id),
                items: section_items(value),
                id,
            })
        })
        .collect()
}

fn headline(resume: &Resume) -> Option<String> {
    resume.profile.occupation.clone()
}

/// The default template: sections exactly in the stored order, title-cased
/// headings.
pub struct ClassicTemplate;

impl TemplateRenderer for ClassicTemplate {
    fn id(&self) -> &'static str {
        "classic"
    }

    fn render(&self, resume: &Resume, options: &RenderOptions) -> RenderedResume {
        RenderedResume {
            template: self.id(),
            direction: options.direction,
            name: resume.profile.name.clone(),
            email: resume.profile.email.clone(),
            headline: headline(resume),
            sections: collect_sections(resume, title_case),
        }
    }
}

/// Uppercased headings and skills pulled to the front, whatever the stored
/// order says.
pub struct ModernTemplate;

impl TemplateRenderer for ModernTemplate {
    fn id(&self) -> &'static str {
        "modern"
    }

    fn render(&self, resume: &Resume, options: &RenderOptions) -> RenderedResume {
        let mut sections = collect_sections(resume, |id| title_case(id).to_uppercase());
        if let Some(pos) = sections.iter().position(|s| s.id == "skills") {
            let skills = sections.remove(pos);
            sections.insert(0, skills);
        }
        RenderedResume {
            template: self.id(),
            direction: options.direction,
            name: resume.profile.name.clone(),
            email: resume.profile.email.clone(),
            headline: headline(resume),
            sections,
        }
    }
}

/// One-page style: at most a few items per section, empty sections dropped.
pub struct CompactTemplate;

impl TemplateRenderer for CompactTemplate {
    fn id(&self) -> &'static str {
        "compact"
    }

    fn render(&self, resume: &Resume, options: &RenderOptions) -> RenderedResume {
        let sections = collect_sections(resume, title_case)
            .into_iter()
            .filter(|s| !s.items.is_empty())
            .map(|mut s| {
                s.items.truncate(COMPACT_ITEMS_PER_SECTION);
                s
            })
            .collect();
        RenderedResume {
            template: self.id(),
            direction: options.direction,
            name: resume.profile.name.clone(),
            email: resume.profile.email.clone(),
            headline: headline(resume),
            sections,
        }
    }
}
