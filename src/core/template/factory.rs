use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{CommunityTemplate, OfficialCompatibleTemplate, SourceTemplate, TemplateKind};
use crate::core::error::{SourceError, SourceResult};

static OFFICIAL_COMPATIBLE: OfficialCompatibleTemplate = OfficialCompatibleTemplate;
static COMMUNITY: CommunityTemplate = CommunityTemplate;

static TEMPLATES: Lazy<HashMap<TemplateKind, &'static dyn SourceTemplate>> = Lazy::new(|| {
    let mut templates: HashMap<TemplateKind, &'static dyn SourceTemplate> = HashMap::new();
    templates.insert(TemplateKind::OfficialCompatible, &OFFICIAL_COMPATIBLE);
    templates.insert(TemplateKind::Community, &COMMUNITY);
    templates
});

/// Lookup of the template singletons.
pub struct TemplateFactory;

impl TemplateFactory {
    pub fn get(kind: TemplateKind) -> SourceResult<&'static dyn SourceTemplate> {
        TEMPLATES
            .get(&kind)
            .copied()
            .ok_or_else(|| SourceError::UnknownTemplate(kind.to_string()))
    }

    /// Resolve a template from its configuration name, e.g. `"official"`.
    pub fn by_name(name: &str) -> SourceResult<&'static dyn SourceTemplate> {
        Self::get(name.parse()?)
    }

    /// Every registered template, ordered by kind.
    pub fn all() -> Vec<&'static dyn SourceTemplate> {
        let mut kinds: Vec<_> = TEMPLATES.keys().copied().collect();
        kinds.sort();
        kinds.into_iter().filter_map(|k| TEMPLATES.get(&k).copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_is_registered() {
        for kind in [TemplateKind::OfficialCompatible, TemplateKind::Community] {
            assert_eq!(TemplateFactory::get(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn by_name_resolves_aliases() {
        assert_eq!(TemplateFactory::by_name("bmclapi").unwrap().template_name(), "Official");
        assert_eq!(TemplateFactory::by_name("MCIM").unwrap().template_name(), "MCIM");
        assert!(matches!(
            TemplateFactory::by_name("nope"),
            Err(SourceError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn all_is_ordered_by_kind() {
        let names: Vec<_> = TemplateFactory::all().iter().map(|t| t.template_name()).collect();
        assert_eq!(names, ["Official", "MCIM"]);
    }
}
