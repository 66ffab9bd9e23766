// ─── Custom source configuration ───
// The `custom_sources.json` document and the store that keeps it on disk.

mod store;

pub use store::{default_config_path, CustomSourceStore, ImportSummary, CONFIG_FILE_NAME};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{SourceError, SourceResult};
use crate::core::registry::is_builtin;
use crate::core::source::{CustomSource, BMCLAPI_KEY, DEFAULT_PRIORITY, MCIM_KEY};
use crate::core::template::{TemplateFactory, TemplateKind};
use crate::core::upstream::{BMCLAPI, MCIM};

pub const CONFIG_VERSION: &str = "1.0";

/// Characters a source name may not contain. The name doubles as a file name
/// in some frontends.
const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSourceConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub sources: Vec<CustomSourceEntry>,
}

/// One user-defined mirror as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSourceEntry {
    pub key: String,
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub overrides: Option<HashMap<String, String>>,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_template() -> String {
    TemplateKind::OfficialCompatible.as_str().to_string()
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// What to do when an imported entry has the key of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    Skip,
    Overwrite,
    /// Import under a fresh key with a marked name.
    Rename,
}

impl Default for CustomSourceConfig {
    /// Two disabled examples, one per template.
    fn default() -> Self {
        Self {
            version: default_version(),
            sources: vec![
                CustomSourceEntry {
                    key: format!("example-{}", BMCLAPI_KEY),
                    name: "Example: BMCLAPI mirror".to_string(),
                    enabled: false,
                    base_url: BMCLAPI.to_string(),
                    template: BMCLAPI_KEY.to_string(),
                    priority: DEFAULT_PRIORITY,
                    overrides: None,
                },
                CustomSourceEntry {
                    key: format!("example-{}", MCIM_KEY),
                    name: "Example: MCIM mirror".to_string(),
                    enabled: false,
                    base_url: MCIM.to_string(),
                    template: MCIM_KEY.to_string(),
                    priority: DEFAULT_PRIORITY,
                    overrides: None,
                },
            ],
        }
    }
}

impl CustomSourceConfig {
    pub fn empty() -> Self {
        Self {
            version: default_version(),
            sources: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> SourceResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> SourceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find(&self, key: &str) -> Option<&CustomSourceEntry> {
        self.sources.iter().find(|s| s.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut CustomSourceEntry> {
        self.sources.iter_mut().find(|s| s.key == key)
    }

    /// Check user input for a new or edited entry. `exclude_key` is the entry
    /// being edited, so its own name does not count as a duplicate.
    pub fn validate(
        &self,
        name: &str,
        base_url: &str,
        template: &str,
        priority: i32,
        exclude_key: Option<&str>,
    ) -> SourceResult<()> {
        let invalid = |msg: String| Err(SourceError::InvalidSource(msg));

        if name.trim().is_empty() {
            return invalid("name must not be empty".into());
        }
        if name
            .chars()
            .any(|c| c.is_control() || INVALID_NAME_CHARS.contains(&c))
        {
            return invalid(format!("name '{}' contains invalid characters", name));
        }
        let duplicate = self.sources.iter().any(|s| {
            s.name.eq_ignore_ascii_case(name) && Some(s.key.as_str()) != exclude_key
        });
        if duplicate {
            return invalid(format!("name '{}' is already in use", name));
        }

        let url = base_url.trim();
        if url.is_empty() {
            return invalid("base URL must not be empty".into());
        }
        let lower = url.to_ascii_lowercase();
        if !lower.starts_with("http://") && !lower.starts_with("https://") {
            return invalid(format!("base URL '{}' must start with http:// or https://", url));
        }
        if url.contains(['?', '#']) {
            return invalid(format!("base URL '{}' must not contain a query or fragment", url));
        }

        template.parse::<TemplateKind>()?;

        if priority <= 0 {
            return invalid(format!("priority must be positive, got {}", priority));
        }
        Ok(())
    }

    /// Sources for every enabled entry. Entries with an unknown template or a
    /// built-in key are skipped.
    pub fn build_sources(&self) -> Vec<CustomSource> {
        self.sources
            .iter()
            .filter(|entry| entry.enabled)
            .filter_map(|entry| match entry.to_source() {
                Ok(source) => Some(source),
                Err(e) => {
                    warn!("Skipping custom source '{}' ({}): {}", entry.name, entry.key, e);
                    None
                }
            })
            .collect()
    }
}

impl CustomSourceEntry {
    pub fn template_kind(&self) -> SourceResult<TemplateKind> {
        self.template.parse()
    }

    /// Fails with `BuiltinSource` when the entry claims the key of a built-in
    /// source.
    pub fn to_source(&self) -> SourceResult<CustomSource> {
        if is_builtin(&self.key) {
            return Err(SourceError::BuiltinSource(self.key.clone()));
        }
        let template = TemplateFactory::get(self.template_kind()?)?;
        Ok(CustomSource::new(
            self.key.clone(),
            self.name.clone(),
            &self.base_url,
            template,
            self.overrides.clone().unwrap_or_default(),
            self.priority,
        ))
    }
}
