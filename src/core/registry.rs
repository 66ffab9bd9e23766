// ─── Source registry ───
// The pool of download sources available to the launcher, keyed by stable
// key, plus routing of a URL by resource kind.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::error::{SourceError, SourceResult};
use crate::core::source::{
    resource_types, BmclapiSource, CustomSource, DownloadSource, McimSource, OfficialSource,
    BMCLAPI_KEY, MCIM_KEY, OFFICIAL_KEY,
};

/// Order in which built-in sources are tried after the preferred one.
pub const FALLBACK_ORDER: [&str; 3] = [OFFICIAL_KEY, BMCLAPI_KEY, MCIM_KEY];

struct Entry {
    source: Arc<dyn DownloadSource>,
    /// Only custom sources carry a priority.
    priority: Option<i32>,
}

/// Registered sources. Built-ins are always present.
pub struct SourceRegistry {
    sources: HashMap<String, Entry>,
    default_key: String,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("keys", &self.keys())
            .field("default_key", &self.default_key)
            .finish()
    }
}

pub fn is_builtin(key: &str) -> bool {
    FALLBACK_ORDER.iter().any(|k| k.eq_ignore_ascii_case(key))
}

impl SourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            sources: HashMap::new(),
            default_key: OFFICIAL_KEY.to_string(),
        };
        registry.insert(Arc::new(OfficialSource::new()), None);
        registry.insert(Arc::new(BmclapiSource::new()), None);
        registry.insert(Arc::new(McimSource::new()), None);
        registry
    }

    fn insert(&mut self, source: Arc<dyn DownloadSource>, priority: Option<i32>) {
        let key = source.key().to_string();
        if self.sources.contains_key(&key) {
            info!("Replacing download source '{}'", key);
        } else {
            info!("Registered download source '{}' ({})", key, source.name());
        }
        self.sources.insert(key, Entry { source, priority });
    }

    /// Add or replace a source under its own key.
    pub fn register(&mut self, source: Arc<dyn DownloadSource>) {
        self.insert(source, None);
    }

    /// Add or replace a custom source, keeping its priority for ordering.
    /// A custom source may not take the key of a built-in or of a source
    /// added through [`register`](Self::register).
    pub fn register_custom(&mut self, source: CustomSource) -> SourceResult<()> {
        let key = source.key();
        let taken = self.sources.get(key).is_some_and(|e| e.priority.is_none());
        if is_builtin(key) || taken {
            warn!("Custom source '{}' collides with a built-in key", key);
            return Err(SourceError::BuiltinSource(key.to_string()));
        }
        let priority = source.priority();
        self.insert(Arc::new(source), Some(priority));
        Ok(())
    }

    /// Remove a non built-in source. The default falls back to the official
    /// source when it was the one removed.
    pub fn unregister(&mut self, key: &str) -> SourceResult<Arc<dyn DownloadSource>> {
        if is_builtin(key) {
            return Err(SourceError::BuiltinSource(key.to_string()));
        }
        let entry = self
            .sources
            .remove(key)
            .ok_or_else(|| SourceError::UnknownSource(key.to_string()))?;
        if self.default_key == key {
            self.default_key = OFFICIAL_KEY.to_string();
        }
        info!("Removed download source '{}'", key);
        Ok(entry.source)
    }

    /// Drop every custom source, e.g. before reloading the configuration.
    pub fn clear_custom(&mut self) {
        self.sources.retain(|_, e| e.priority.is_none());
        if !self.contains(&self.default_key) {
            self.default_key = OFFICIAL_KEY.to_string();
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sources.contains_key(key)
    }

    pub fn try_get(&self, key: &str) -> Option<Arc<dyn DownloadSource>> {
        self.sources.get(key).map(|e| Arc::clone(&e.source))
    }

    /// Source for `key`, or the default source when the key is unknown.
    pub fn get(&self, key: &str) -> Arc<dyn DownloadSource> {
        match self.try_get(key) {
            Some(source) => source,
            None => {
                debug!("Unknown download source '{}', using '{}'", key, self.default_key);
                self.default_source()
            }
        }
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn default_source(&self) -> Arc<dyn DownloadSource> {
        self.try_get(&self.default_key)
            .unwrap_or_else(|| Arc::new(OfficialSource::new()))
    }

    pub fn set_default(&mut self, key: &str) -> SourceResult<()> {
        if !self.contains(key) {
            return Err(SourceError::UnknownSource(key.to_string()));
        }
        self.default_key = key.to_string();
        info!("Default download source set to '{}'", key);
        Ok(())
    }

    /// Every registered key, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.sources.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Key of the source whose display name matches, ignoring case.
    pub fn key_by_name(&self, name: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|(_, e)| e.source.name().eq_ignore_ascii_case(name))
            .map(|(key, _)| key.as_str())
    }

    /// Custom sources, highest priority first. Equal priorities keep key order.
    pub fn custom_sources(&self) -> Vec<Arc<dyn DownloadSource>> {
        let mut custom: Vec<_> = self
            .sources
            .iter()
            .filter_map(|(key, e)| e.priority.map(|p| (p, key, &e.source)))
            .collect();
        custom.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        custom.into_iter().map(|(_, _, s)| Arc::clone(s)).collect()
    }

    /// Sources to try for one download: `primary` first, then the built-ins
    /// in [`FALLBACK_ORDER`].
    pub fn fallback_order(&self, primary: &str) -> Vec<Arc<dyn DownloadSource>> {
        let mut keys: Vec<&str> = Vec::with_capacity(FALLBACK_ORDER.len() + 1);
        if self.contains(primary) {
            keys.push(primary);
        } else {
            warn!("Unknown primary download source '{}'", primary);
        }
        for key in FALLBACK_ORDER {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys.into_iter().filter_map(|k| self.try_get(k)).collect()
    }
}

/// What a URL handed to [`resolve_url`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ModrinthApi,
    ModrinthCdn,
    CurseForgeApi,
    CurseForgeCdn,
    VersionManifest,
    Library,
    ClientJar,
    Asset,
}

impl ResourceKind {
    /// Parse a kind tag such as `"modrinth_cdn"`. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.trim().to_ascii_lowercase().as_str() {
            "modrinth_api" => ResourceKind::ModrinthApi,
            "modrinth_cdn" => ResourceKind::ModrinthCdn,
            "curseforge_api" => ResourceKind::CurseForgeApi,
            "curseforge_cdn" => ResourceKind::CurseForgeCdn,
            "version_manifest" => ResourceKind::VersionManifest,
            "library" => ResourceKind::Library,
            "client_jar" => ResourceKind::ClientJar,
            "asset" => ResourceKind::Asset,
            _ => return None,
        };
        Some(kind)
    }

    pub fn resolve(self, source: &dyn DownloadSource, url: &str) -> String {
        match self {
            ResourceKind::ModrinthApi => source.transform_modrinth_api_url(url),
            ResourceKind::ModrinthCdn => source.transform_modrinth_cdn_url(url),
            ResourceKind::CurseForgeApi => source.transform_curseforge_api_url(url),
            ResourceKind::CurseForgeCdn => source.transform_curseforge_cdn_url(url),
            ResourceKind::VersionManifest => source.version_manifest_url(),
            ResourceKind::Library => source.resource_url(resource_types::LIBRARY, url),
            ResourceKind::ClientJar => source.resource_url(resource_types::CLIENT, url),
            ResourceKind::Asset => source.resource_url(resource_types::ASSET, url),
        }
    }
}

/// Route `url` through `source` according to its kind tag. URLs of unknown
/// kinds are returned unchanged.
pub fn resolve_url(source: &dyn DownloadSource, kind: &str, url: &str) -> String {
    match ResourceKind::from_tag(kind) {
        Some(kind) => kind.resolve(source, url),
        None => {
            debug!("No routing for resource kind '{}', keeping {}", kind, url);
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::DEFAULT_PRIORITY;
    use crate::core::template::{TemplateFactory, TemplateKind};

    fn custom(key: &str, priority: i32) -> CustomSource {
        CustomSource::new(
            key,
            format!("Mirror {}", key),
            "https://m.example",
            TemplateFactory::get(TemplateKind::OfficialCompatible).unwrap(),
            HashMap::new(),
            priority,
        )
    }

    #[test]
    fn builtins_are_registered() {
        let registry = SourceRegistry::new();
        assert_eq!(registry.keys(), ["bmclapi", "mcim", "official"]);
        assert_eq!(registry.default_key(), "official");
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let mut registry = SourceRegistry::new();
        assert_eq!(registry.get("nope").key(), "official");
        registry.set_default("bmclapi").unwrap();
        assert_eq!(registry.get("nope").key(), "bmclapi");
    }

    #[test]
    fn set_default_rejects_unknown_key() {
        let mut registry = SourceRegistry::new();
        assert!(matches!(
            registry.set_default("nope"),
            Err(SourceError::UnknownSource(_))
        ));
        assert_eq!(registry.default_key(), "official");
    }

    #[test]
    fn key_by_name_ignores_case() {
        let registry = SourceRegistry::new();
        assert_eq!(registry.key_by_name("bmclapi"), Some("bmclapi"));
        assert_eq!(registry.key_by_name("Mcim"), Some("mcim"));
        assert_eq!(registry.key_by_name("Other"), None);
    }

    #[test]
    fn builtins_cannot_be_unregistered() {
        let mut registry = SourceRegistry::new();
        assert!(matches!(
            registry.unregister("mcim"),
            Err(SourceError::BuiltinSource(_))
        ));
        assert!(matches!(
            registry.unregister("custom-x"),
            Err(SourceError::UnknownSource(_))
        ));
    }

    #[test]
    fn removing_default_custom_source_restores_official() {
        let mut registry = SourceRegistry::new();
        registry.register_custom(custom("custom-a", DEFAULT_PRIORITY)).unwrap();
        registry.set_default("custom-a").unwrap();
        registry.unregister("custom-a").unwrap();
        assert_eq!(registry.default_key(), "official");
    }

    #[test]
    fn custom_sources_are_ordered_by_priority() {
        let mut registry = SourceRegistry::new();
        registry.register_custom(custom("custom-low", 10)).unwrap();
        registry.register_custom(custom("custom-b", 200)).unwrap();
        registry.register_custom(custom("custom-a", 200)).unwrap();
        let keys: Vec<_> = registry
            .custom_sources()
            .iter()
            .map(|s| s.key().to_string())
            .collect();
        assert_eq!(keys, ["custom-a", "custom-b", "custom-low"]);

        registry.clear_custom();
        assert!(registry.custom_sources().is_empty());
        assert!(registry.contains("official"));
    }

    #[test]
    fn custom_source_cannot_shadow_builtin() {
        let mut registry = SourceRegistry::new();
        assert!(matches!(
            registry.register_custom(custom("mcim", DEFAULT_PRIORITY)),
            Err(SourceError::BuiltinSource(_))
        ));
        let mcim = registry.get("mcim");
        assert_eq!(mcim.name(), "MCIM");
        assert!(!mcim.should_include_curseforge_api_key());
        assert!(registry.custom_sources().is_empty());
    }

    #[test]
    fn clear_custom_keeps_sources_registered_directly() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(custom("plugin", DEFAULT_PRIORITY)));
        registry.register_custom(custom("custom-a", DEFAULT_PRIORITY)).unwrap();
        assert!(registry.register_custom(custom("plugin", 5)).is_err());

        registry.clear_custom();
        assert!(registry.contains("plugin"));
        assert!(!registry.contains("custom-a"));
        assert_eq!(registry.keys(), ["bmclapi", "mcim", "official", "plugin"]);
    }

    #[test]
    fn fallback_order_puts_primary_first() {
        let registry = SourceRegistry::new();
        let keys = |primary| {
            registry
                .fallback_order(primary)
                .iter()
                .map(|s| s.key().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(keys("mcim"), ["mcim", "official", "bmclapi"]);
        assert_eq!(keys("official"), ["official", "bmclapi", "mcim"]);
        assert_eq!(keys("unknown"), ["official", "bmclapi", "mcim"]);
    }

    #[test]
    fn resolve_url_routes_by_kind() {
        let mcim = McimSource::new();
        assert_eq!(
            resolve_url(&mcim, "modrinth_cdn", "https://cdn.modrinth.com/data/x.jar"),
            "https://mod.mcimirror.top/data/x.jar"
        );
        let bmclapi = BmclapiSource::new();
        assert_eq!(
            resolve_url(&bmclapi, "asset", "https://resources.download.minecraft.net/ab/abcd"),
            "https://bmclapi2.bangbang93.com/assets/ab/abcd"
        );
        assert_eq!(
            resolve_url(&bmclapi, "version_manifest", "ignored"),
            bmclapi.version_manifest_url()
        );
    }

    #[test]
    fn unknown_kind_passes_through() {
        let url = "https://piston-data.mojang.com/v1/objects/x/client.jar";
        assert_eq!(resolve_url(&BmclapiSource::new(), "shader", url), url);
    }
}
