use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use super::{ConflictStrategy, CustomSourceConfig, CustomSourceEntry, CONFIG_VERSION};
use crate::core::error::{SourceError, SourceResult};
use crate::core::registry::{is_builtin, SourceRegistry};
use crate::core::template::TemplateKind;

pub const CONFIG_FILE_NAME: &str = "custom_sources.json";

const APP_DIR_NAME: &str = "download-sources";
const IMPORTED_SUFFIX: &str = " (imported)";

/// `<data dir>/download-sources/custom_sources.json`.
pub fn default_config_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

fn new_key() -> String {
    format!("custom-{}", Uuid::new_v4().simple())
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> SourceError + '_ {
    move |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_config(path: &Path, config: &CustomSourceConfig) -> SourceResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    }
    std::fs::write(path, config.to_json()?).map_err(io_err(path))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// The configuration document bound to its file. Every mutation is written
/// back immediately.
#[derive(Debug, Clone)]
pub struct CustomSourceStore {
    path: PathBuf,
    config: CustomSourceConfig,
}

impl CustomSourceStore {
    /// Load from `path`. A missing file is created with the default
    /// document; an unreadable document is replaced by it.
    pub fn load_from(path: impl Into<PathBuf>) -> SourceResult<Self> {
        let path = path.into();
        let config = match std::fs::read_to_string(&path) {
            Ok(raw) => match CustomSourceConfig::from_json(&raw) {
                Ok(config) => {
                    info!(
                        "Loaded {} custom download sources from {:?}",
                        config.sources.len(),
                        path
                    );
                    config
                }
                Err(e) => {
                    warn!("Invalid {:?}, resetting to defaults: {}", path, e);
                    Self::reset(&path)?
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No custom source config at {:?}, creating defaults", path);
                Self::reset(&path)?
            }
            Err(e) => return Err(io_err(&path)(e)),
        };
        Ok(Self { path, config })
    }

    pub fn load_default() -> SourceResult<Self> {
        Self::load_from(default_config_path())
    }

    fn reset(path: &Path) -> SourceResult<CustomSourceConfig> {
        let config = CustomSourceConfig::default();
        write_config(path, &config)?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &CustomSourceConfig {
        &self.config
    }

    pub fn sources(&self) -> &[CustomSourceEntry] {
        &self.config.sources
    }

    pub fn save(&self) -> SourceResult<()> {
        write_config(&self.path, &self.config)?;
        info!("Saved custom download sources to {:?}", self.path);
        Ok(())
    }

    /// Write `next` to disk and only then adopt it, so a failed write leaves
    /// the in-memory document as it was.
    fn commit(&mut self, next: CustomSourceConfig) -> SourceResult<()> {
        write_config(&self.path, &next)?;
        self.config = next;
        info!("Saved custom download sources to {:?}", self.path);
        Ok(())
    }

    /// Validate and append a new source under a generated key.
    pub fn add(
        &mut self,
        name: &str,
        base_url: &str,
        template: TemplateKind,
        enabled: bool,
        priority: i32,
    ) -> SourceResult<CustomSourceEntry> {
        self.config
            .validate(name, base_url, template.as_str(), priority, None)?;

        let entry = CustomSourceEntry {
            key: new_key(),
            name: name.trim().to_string(),
            enabled,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            template: template.as_str().to_string(),
            priority,
            overrides: None,
        };
        let mut next = self.config.clone();
        next.sources.push(entry.clone());
        self.commit(next)?;
        info!("Added custom download source '{}' ({})", entry.name, entry.key);
        Ok(entry)
    }

    pub fn update(
        &mut self,
        key: &str,
        name: &str,
        base_url: &str,
        template: TemplateKind,
        enabled: bool,
        priority: i32,
    ) -> SourceResult<()> {
        if self.config.find(key).is_none() {
            return Err(SourceError::UnknownSource(key.to_string()));
        }
        self.config
            .validate(name, base_url, template.as_str(), priority, Some(key))?;

        let mut next = self.config.clone();
        if let Some(entry) = next.find_mut(key) {
            entry.name = name.trim().to_string();
            entry.base_url = base_url.trim().trim_end_matches('/').to_string();
            entry.template = template.as_str().to_string();
            entry.enabled = enabled;
            entry.priority = priority;
        }
        self.commit(next)?;
        info!("Updated custom download source '{}' ({})", name, key);
        Ok(())
    }

    /// Replace the override map of one source. An empty map clears it.
    pub fn set_overrides(&mut self, key: &str, overrides: HashMap<String, String>) -> SourceResult<()> {
        let mut next = self.config.clone();
        let entry = next
            .find_mut(key)
            .ok_or_else(|| SourceError::UnknownSource(key.to_string()))?;
        entry.overrides = (!overrides.is_empty()).then_some(overrides);
        self.commit(next)
    }

    pub fn remove(&mut self, key: &str) -> SourceResult<CustomSourceEntry> {
        if is_builtin(key) {
            return Err(SourceError::BuiltinSource(key.to_string()));
        }
        let mut next = self.config.clone();
        let index = next
            .sources
            .iter()
            .position(|s| s.key == key)
            .ok_or_else(|| SourceError::UnknownSource(key.to_string()))?;
        let entry = next.sources.remove(index);
        self.commit(next)?;
        info!("Removed custom download source '{}' ({})", entry.name, key);
        Ok(entry)
    }

    /// Enable or disable a source. Setting the current state is a no-op.
    pub fn toggle(&mut self, key: &str, enabled: bool) -> SourceResult<()> {
        let mut next = self.config.clone();
        let entry = next
            .find_mut(key)
            .ok_or_else(|| SourceError::UnknownSource(key.to_string()))?;
        if entry.enabled == enabled {
            return Ok(());
        }
        entry.enabled = enabled;
        self.commit(next)?;
        info!("Custom download source '{}' enabled: {}", key, enabled);
        Ok(())
    }

    /// Merge the entries of `incoming`, resolving key collisions with
    /// `strategy`.
    pub fn merge(
        &mut self,
        incoming: CustomSourceConfig,
        strategy: ConflictStrategy,
    ) -> SourceResult<ImportSummary> {
        if incoming.version != CONFIG_VERSION {
            warn!(
                "Importing custom source config version {} into {}",
                incoming.version, CONFIG_VERSION
            );
        }

        let mut next = self.config.clone();
        let mut summary = ImportSummary::default();
        for mut entry in incoming.sources {
            if is_builtin(&entry.key) {
                warn!("Ignoring imported entry with built-in key '{}'", entry.key);
                summary.skipped += 1;
                continue;
            }
            match next.sources.iter().position(|s| s.key == entry.key) {
                None => next.sources.push(entry),
                Some(_) if strategy == ConflictStrategy::Skip => {
                    summary.skipped += 1;
                    continue;
                }
                Some(index) if strategy == ConflictStrategy::Overwrite => {
                    next.sources[index] = entry;
                }
                Some(_) => {
                    entry.key = new_key();
                    entry.name.push_str(IMPORTED_SUFFIX);
                    next.sources.push(entry);
                }
            }
            summary.imported += 1;
        }

        self.commit(next)?;
        info!(
            "Imported {} custom download sources, skipped {}",
            summary.imported, summary.skipped
        );
        Ok(summary)
    }

    /// Import a document exported by [`export`](Self::export).
    pub fn import(&mut self, from: &Path, strategy: ConflictStrategy) -> SourceResult<ImportSummary> {
        let raw = std::fs::read_to_string(from).map_err(io_err(from))?;
        let incoming = CustomSourceConfig::from_json(&raw)?;
        self.merge(incoming, strategy)
    }

    pub fn export(&self, to: &Path) -> SourceResult<()> {
        write_config(to, &self.config)?;
        info!("Exported custom download sources to {:?}", to);
        Ok(())
    }

    /// Replace the custom sources of `registry` with the enabled entries.
    pub fn apply_to(&self, registry: &mut SourceRegistry) {
        registry.clear_custom();
        for source in self.config.build_sources() {
            if let Err(e) = registry.register_custom(source) {
                warn!("Custom source not applied: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::DownloadSource;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join(CONFIG_FILE_NAME);
        let store = CustomSourceStore::load_from(&path).unwrap();
        assert_eq!(store.config(), &CustomSourceConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_reset() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        let store = CustomSourceStore::load_from(&path).unwrap();
        assert_eq!(store.sources().len(), 2);
    }

    #[test]
    fn add_update_toggle_remove_persist() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        let mut store = CustomSourceStore::load_from(&path).unwrap();

        let entry = store
            .add("Mine", "https://m.example/", TemplateKind::OfficialCompatible, true, 150)
            .unwrap();
        assert!(entry.key.starts_with("custom-"));
        assert_eq!(entry.base_url, "https://m.example");

        store
            .update(&entry.key, "Renamed", "https://n.example", TemplateKind::Community, true, 50)
            .unwrap();
        store.toggle(&entry.key, false).unwrap();

        let reloaded = CustomSourceStore::load_from(&path).unwrap();
        let saved = reloaded.config().find(&entry.key).unwrap();
        assert_eq!(saved.name, "Renamed");
        assert_eq!(saved.template, "community");
        assert_eq!(saved.priority, 50);
        assert!(!saved.enabled);

        store.remove(&entry.key).unwrap();
        assert!(CustomSourceStore::load_from(&path)
            .unwrap()
            .config()
            .find(&entry.key)
            .is_none());
    }

    #[test]
    fn invalid_input_is_not_stored() {
        let tmp = tempdir().unwrap();
        let mut store = CustomSourceStore::load_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        let before = store.sources().len();
        assert!(store
            .add("Bad", "mirror.example", TemplateKind::OfficialCompatible, true, 100)
            .is_err());
        assert_eq!(store.sources().len(), before);
        assert!(matches!(
            store.update("custom-missing", "X", "https://x", TemplateKind::Community, true, 1),
            Err(SourceError::UnknownSource(_))
        ));
    }

    #[test]
    fn builtin_keys_cannot_be_removed() {
        let tmp = tempdir().unwrap();
        let mut store = CustomSourceStore::load_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        for key in ["official", "bmclapi", "mcim"] {
            assert!(matches!(store.remove(key), Err(SourceError::BuiltinSource(_))));
        }
    }

    fn incoming(key: &str, name: &str) -> CustomSourceConfig {
        let mut config = CustomSourceConfig::empty();
        config.sources.push(CustomSourceEntry {
            key: key.into(),
            name: name.into(),
            enabled: true,
            base_url: "https://i.example".into(),
            template: "official".into(),
            priority: 100,
            overrides: None,
        });
        config
    }

    #[test]
    fn merge_conflict_strategies() {
        let tmp = tempdir().unwrap();
        let mut store = CustomSourceStore::load_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();

        let summary = store
            .merge(incoming("example-bmclapi", "Imported"), ConflictStrategy::Skip)
            .unwrap();
        assert_eq!(summary, ImportSummary { imported: 0, skipped: 1 });

        store
            .merge(incoming("example-bmclapi", "Imported"), ConflictStrategy::Overwrite)
            .unwrap();
        assert_eq!(store.config().find("example-bmclapi").unwrap().name, "Imported");
        assert_eq!(store.sources().len(), 2);

        store
            .merge(incoming("example-bmclapi", "Copy"), ConflictStrategy::Rename)
            .unwrap();
        assert_eq!(store.sources().len(), 3);
        let renamed = store.sources().last().unwrap();
        assert!(renamed.key.starts_with("custom-"));
        assert_eq!(renamed.name, "Copy (imported)");
    }

    #[test]
    fn export_then_import_round_trip() {
        let tmp = tempdir().unwrap();
        let mut source = CustomSourceStore::load_from(tmp.path().join("a.json")).unwrap();
        source
            .add("Mine", "https://m.example", TemplateKind::Community, true, 100)
            .unwrap();
        let exported = tmp.path().join("export").join("sources.json");
        source.export(&exported).unwrap();

        let mut target = CustomSourceStore::load_from(tmp.path().join("b.json")).unwrap();
        let summary = target.import(&exported, ConflictStrategy::Skip).unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, skipped: 2 });
    }

    #[test]
    fn apply_to_registers_enabled_sources() {
        let tmp = tempdir().unwrap();
        let mut store = CustomSourceStore::load_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        let entry = store
            .add("Mine", "https://m.example", TemplateKind::OfficialCompatible, true, 100)
            .unwrap();

        let mut registry = SourceRegistry::new();
        store.apply_to(&mut registry);
        assert!(registry.contains(&entry.key));
        assert!(!registry.contains("example-bmclapi"));
        assert_eq!(registry.custom_sources().len(), 1);

        store.toggle(&entry.key, false).unwrap();
        store.apply_to(&mut registry);
        assert!(!registry.contains(&entry.key));
    }

    #[test]
    fn failed_write_leaves_document_unchanged() {
        let tmp = tempdir().unwrap();
        let mut store = CustomSourceStore::load_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        let before = store.config().clone();

        // A regular file where the parent directory should be.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        store.path = blocker.join(CONFIG_FILE_NAME);

        assert!(matches!(
            store.add("Mine", "https://m.example", TemplateKind::Community, true, 100),
            Err(SourceError::Io { .. })
        ));
        assert!(store.toggle("example-bmclapi", true).is_err());
        assert!(store.remove("example-mcim").is_err());
        assert!(store
            .merge(incoming("custom-new", "New"), ConflictStrategy::Skip)
            .is_err());
        assert_eq!(store.config(), &before);
    }

    #[test]
    fn file_entry_with_builtin_key_does_not_replace_builtin() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{"version":"1.0","sources":[{"key":"mcim","name":"Evil","baseUrl":"https://evil.example","template":"official"}]}"#,
        )
        .unwrap();
        let store = CustomSourceStore::load_from(&path).unwrap();
        assert_eq!(store.sources().len(), 1);

        let mut registry = SourceRegistry::new();
        store.apply_to(&mut registry);
        let mcim = registry.get("mcim");
        assert_eq!(mcim.name(), "MCIM");
        assert!(!mcim.should_include_curseforge_api_key());
        assert!(registry.custom_sources().is_empty());

        registry.clear_custom();
        assert_eq!(registry.get("mcim").name(), "MCIM");
        assert_eq!(registry.keys(), ["bmclapi", "mcim", "official"]);
    }
}
