// ─── URL templates ───
// Pattern producers shared by custom mirrors. A template returns strings
// holding `{baseUrl}` and call-scoped placeholders that a `CustomSource`
// fills in.

mod community;
mod factory;
mod official;

pub use community::CommunityTemplate;
pub use factory::TemplateFactory;
pub use official::OfficialCompatibleTemplate;

use std::fmt;
use std::str::FromStr;

use crate::core::error::SourceError;

/// Reserved placeholder for the mirror's base URL.
pub const BASE_URL: &str = "{baseUrl}";

/// Which upstream universe a template mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKind {
    /// Mojang resources, loader metadata and mavens, BMCLAPI path layout.
    OfficialCompatible,
    /// Modrinth and CurseForge APIs, MCIM path layout.
    Community,
}

impl TemplateKind {
    /// Name written to configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::OfficialCompatible => "official",
            TemplateKind::Community => "community",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = SourceError;

    /// Accepts the configuration names plus the names of the mirrors each
    /// template was modelled on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "official" | "officialcompatible" | "official_compatible" | "bmclapi" => {
                Ok(TemplateKind::OfficialCompatible)
            }
            "community" | "mcim" => Ok(TemplateKind::Community),
            _ => Err(SourceError::UnknownTemplate(s.to_string())),
        }
    }
}

/// Pattern producer with the operation surface of
/// [`DownloadSource`](crate::core::source::DownloadSource).
pub trait SourceTemplate: Send + Sync {
    fn template_name(&self) -> &'static str;
    fn kind(&self) -> TemplateKind;

    // ── Minecraft core ──────────────────────────────────
    fn version_manifest_url(&self) -> String;
    fn version_info_url(&self, version_id: &str, original_url: &str) -> String;
    fn resource_url(&self, resource_type: &str, original_url: &str) -> String;
    fn client_jar_url(&self, version_id: &str, original_url: &str) -> String;
    fn client_json_url(&self, version_id: &str, original_url: &str) -> String;
    /// Without an original URL the pattern uses `{path}`, the Maven path of
    /// the coordinate.
    fn library_url(&self, library_name: &str, original_url: Option<&str>) -> String;

    // ── Mod loaders ─────────────────────────────────────
    fn neoforge_versions_url(&self, minecraft_version: &str) -> String;
    fn neoforge_installer_url(&self, neoforge_version: &str) -> String;
    fn forge_versions_url(&self, minecraft_version: &str) -> String;
    fn forge_installer_url(&self, minecraft_version: &str, forge_version: &str) -> String;
    fn fabric_versions_url(&self, minecraft_version: &str) -> String;
    fn fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String;
    fn quilt_versions_url(&self, minecraft_version: &str) -> String;
    fn quilt_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String;
    fn legacy_fabric_versions_url(&self, minecraft_version: &str) -> String;
    fn legacy_fabric_profile_url(&self, minecraft_version: &str, loader_version: &str)
        -> String;
    fn liteloader_versions_url(&self) -> String;
    fn liteloader_jar_url(&self, relative_path: &str, original_base_url: Option<&str>)
        -> String;

    // ── Modrinth ────────────────────────────────────────
    fn modrinth_api_base_url(&self) -> String;
    fn modrinth_cdn_base_url(&self) -> String;
    fn transform_modrinth_api_url(&self, original_url: &str) -> String;
    fn transform_modrinth_cdn_url(&self, original_url: &str) -> String;
    fn modrinth_user_agent(&self) -> Option<String>;
    fn requires_modrinth_user_agent(&self) -> bool;

    // ── CurseForge ──────────────────────────────────────
    fn curseforge_api_base_url(&self) -> String;
    fn curseforge_cdn_base_url(&self) -> String;
    fn transform_curseforge_api_url(&self, original_url: &str) -> String;
    fn transform_curseforge_cdn_url(&self, original_url: &str) -> String;
    fn curseforge_user_agent(&self) -> Option<String>;
    fn requires_curseforge_user_agent(&self) -> bool;
    fn should_include_curseforge_api_key(&self) -> bool;
}

impl fmt::Debug for dyn SourceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTemplate")
            .field("name", &self.template_name())
            .field("kind", &self.kind())
            .finish()
    }
}
