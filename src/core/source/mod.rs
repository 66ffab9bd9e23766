// ─── Download sources ───
// Strategies that turn logical resource requests into final URLs.
// Every source answers every operation. Operations a mirror does not serve
// return the official upstream URL.

mod bmclapi;
mod custom;
mod detect;
mod mcim;
mod official;
mod substitution;

pub use bmclapi::BmclapiSource;
pub use custom::{CustomSource, DEFAULT_PRIORITY};
pub use detect::requires_bmclapi_user_agent;
pub use mcim::McimSource;
pub use official::OfficialSource;

use crate::core::error::SourceResult;

/// Keys of the built-in sources.
pub const OFFICIAL_KEY: &str = "official";
pub const BMCLAPI_KEY: &str = "bmclapi";
pub const MCIM_KEY: &str = "mcim";

/// Well-known resource type tags passed to [`DownloadSource::resource_url`].
/// The tag is an open string; these are the ones the launcher uses.
pub mod resource_types {
    pub const ASSET: &str = "asset";
    pub const ASSET_INDEX: &str = "asset_index";
    pub const LIBRARY: &str = "library";
    pub const CLIENT: &str = "client";
    pub const LOGGING: &str = "logging";
}

/// Capability contract shared by every download source.
///
/// Calls are pure: same input, same output, no network access.
pub trait DownloadSource: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;
    /// Stable identifier.
    fn key(&self) -> &str;

    // ── Minecraft core ──────────────────────────────────
    fn version_manifest_url(&self) -> String;
    /// `original_url` is the entry URL found in the version manifest.
    fn version_info_url(&self, version_id: &str, original_url: &str) -> String;
    fn resource_url(&self, resource_type: &str, original_url: &str) -> String;
    fn client_jar_url(&self, version_id: &str, original_url: &str) -> String;
    fn client_json_url(&self, version_id: &str, original_url: &str) -> String;
    /// Rewrites `original_url` when given, otherwise builds the URL from the
    /// Maven coordinate `library_name`, which must then be well formed.
    fn library_url(&self, library_name: &str, original_url: Option<&str>)
        -> SourceResult<String>;

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
    /// `relative_path` is the Maven path of the jar, `original_base_url` the
    /// repository announced by the version list, if any.
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
    /// Only the "edge" CDN may be rewritten; `mediafilez` URLs never are.
    fn transform_curseforge_cdn_url(&self, original_url: &str) -> String;
    fn curseforge_user_agent(&self) -> Option<String>;
    fn requires_curseforge_user_agent(&self) -> bool;
    /// Mirrors must never receive the CurseForge API key.
    fn should_include_curseforge_api_key(&self) -> bool;
}

impl std::fmt::Debug for dyn DownloadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadSource")
            .field("key", &self.key())
            .field("name", &self.name())
            .finish()
    }
}
