use tracing::debug;

use super::{DownloadSource, OfficialSource, MCIM_KEY};
use crate::core::error::SourceResult;
use crate::core::http::APP_USER_AGENT;
use crate::core::upstream::{
    rewrite_prefix, CURSEFORGE_API, CURSEFORGE_EDGE_CDN, CURSEFORGE_MEDIA_CDN_HOST, MCIM,
    MODRINTH_API, MODRINTH_CDN,
};

const MCIM_MODRINTH_API: &str = "https://mod.mcimirror.top/modrinth";
const MCIM_CURSEFORGE_API: &str = "https://mod.mcimirror.top/curseforge";

/// MCIM: a mirror of the Modrinth and CurseForge APIs.
///
/// URL mapping:
/// - `api.modrinth.com`   -> `mod.mcimirror.top/modrinth`
/// - `cdn.modrinth.com`   -> `mod.mcimirror.top`
/// - `api.curseforge.com` -> `mod.mcimirror.top/curseforge`
/// - `edge.forgecdn.net`  -> `mod.mcimirror.top`
///
/// `mediafilez.forgecdn.net` is never mapped. Requests must identify the
/// launcher and must not carry the CurseForge API key. Minecraft core and
/// mod-loader resources come from the official services.
#[derive(Debug, Clone, Copy, Default)]
pub struct McimSource {
    upstream: OfficialSource,
}

impl McimSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DownloadSource for McimSource {
    fn name(&self) -> &str {
        "MCIM"
    }

    fn key(&self) -> &str {
        MCIM_KEY
    }

    // ── Not mirrored: official endpoints ───────────────

    fn version_manifest_url(&self) -> String {
        self.upstream.version_manifest_url()
    }

    fn version_info_url(&self, version_id: &str, original_url: &str) -> String {
        self.upstream.version_info_url(version_id, original_url)
    }

    fn resource_url(&self, resource_type: &str, original_url: &str) -> String {
        debug!(source = self.name(), resource_type, url = original_url, "resource url");
        original_url.to_string()
    }

    fn client_jar_url(&self, version_id: &str, original_url: &str) -> String {
        self.upstream.client_jar_url(version_id, original_url)
    }

    fn client_json_url(&self, version_id: &str, original_url: &str) -> String {
        self.upstream.client_json_url(version_id, original_url)
    }

    fn library_url(
        &self,
        library_name: &str,
        original_url: Option<&str>,
    ) -> SourceResult<String> {
        self.upstream.library_url(library_name, original_url)
    }

    // Lists point at the authoritative maven metadata, not a filtered list.
    fn neoforge_versions_url(&self, minecraft_version: &str) -> String {
        self.upstream.neoforge_versions_url(minecraft_version)
    }

    fn neoforge_installer_url(&self, neoforge_version: &str) -> String {
        self.upstream.neoforge_installer_url(neoforge_version)
    }

    fn forge_versions_url(&self, minecraft_version: &str) -> String {
        self.upstream.forge_versions_url(minecraft_version)
    }

    fn forge_installer_url(&self, minecraft_version: &str, forge_version: &str) -> String {
        self.upstream
            .forge_installer_url(minecraft_version, forge_version)
    }

    fn fabric_versions_url(&self, minecraft_version: &str) -> String {
        self.upstream.fabric_versions_url(minecraft_version)
    }

    fn fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        self.upstream
            .fabric_profile_url(minecraft_version, loader_version)
    }

    fn quilt_versions_url(&self, minecraft_version: &str) -> String {
        self.upstream.quilt_versions_url(minecraft_version)
    }

    fn quilt_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        self.upstream
            .quilt_profile_url(minecraft_version, loader_version)
    }

    fn legacy_fabric_versions_url(&self, minecraft_version: &str) -> String {
        self.upstream.legacy_fabric_versions_url(minecraft_version)
    }

    fn legacy_fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        self.upstream
            .legacy_fabric_profile_url(minecraft_version, loader_version)
    }

    fn liteloader_versions_url(&self) -> String {
        self.upstream.liteloader_versions_url()
    }

    fn liteloader_jar_url(&self, relative_path: &str, original_base_url: Option<&str>) -> String {
        self.upstream
            .liteloader_jar_url(relative_path, original_base_url)
    }

    // ── Modrinth ────────────────────────────────────────

    fn modrinth_api_base_url(&self) -> String {
        MCIM_MODRINTH_API.to_string()
    }

    fn modrinth_cdn_base_url(&self) -> String {
        MCIM.to_string()
    }

    fn transform_modrinth_api_url(&self, original_url: &str) -> String {
        rewrite_prefix(original_url, &[(MODRINTH_API, MCIM_MODRINTH_API)])
    }

    fn transform_modrinth_cdn_url(&self, original_url: &str) -> String {
        rewrite_prefix(original_url, &[(MODRINTH_CDN, MCIM)])
    }

    fn modrinth_user_agent(&self) -> Option<String> {
        Some(APP_USER_AGENT.to_string())
    }

    fn requires_modrinth_user_agent(&self) -> bool {
        true
    }

    // ── CurseForge ──────────────────────────────────────

    fn curseforge_api_base_url(&self) -> String {
        MCIM_CURSEFORGE_API.to_string()
    }

    fn curseforge_cdn_base_url(&self) -> String {
        MCIM.to_string()
    }

    fn transform_curseforge_api_url(&self, original_url: &str) -> String {
        rewrite_prefix(original_url, &[(CURSEFORGE_API, MCIM_CURSEFORGE_API)])
    }

    fn transform_curseforge_cdn_url(&self, original_url: &str) -> String {
        if original_url.contains(CURSEFORGE_MEDIA_CDN_HOST) {
            return original_url.to_string();
        }
        rewrite_prefix(original_url, &[(CURSEFORGE_EDGE_CDN, MCIM)])
    }

    fn curseforge_user_agent(&self) -> Option<String> {
        Some(APP_USER_AGENT.to_string())
    }

    fn requires_curseforge_user_agent(&self) -> bool {
        true
    }

    fn should_include_curseforge_api_key(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::capture_events;

    #[test]
    fn minecraft_core_is_identity() {
        let src = McimSource::new();
        let url = "https://piston-data.mojang.com/v1/objects/abc/client.jar";
        assert_eq!(src.version_info_url("1.20.4", url), url);
        assert_eq!(src.resource_url("asset", url), url);
        assert_eq!(src.client_jar_url("1.20.4", url), url);
        assert_eq!(src.client_json_url("1.20.4", url), url);
        assert_eq!(src.library_url("a:b:1", Some(url)).unwrap(), url);
        assert_eq!(
            src.version_manifest_url(),
            OfficialSource.version_manifest_url()
        );
    }

    #[test]
    fn resource_url_logs_under_its_own_name() {
        let url = "https://resources.download.minecraft.net/ab/abcdef";
        let (resolved, events) = capture_events(|| McimSource::new().resource_url("asset", url));
        assert_eq!(resolved, url);
        assert!(events.iter().any(|e| e.fields.contains("source=\"MCIM\"")));
        assert!(events.iter().all(|e| !e.fields.contains("Official")));
    }

    #[test]
    fn library_without_url_falls_back_to_official_maven() {
        assert_eq!(
            McimSource::new().library_url("org.foo:bar:1.0", None).unwrap(),
            "https://repo1.maven.org/maven2/org/foo/bar/1.0/bar-1.0.jar"
        );
    }

    #[test]
    fn loader_lists_are_static_metadata() {
        let src = McimSource::new();
        assert_eq!(
            src.forge_versions_url("1.20.1"),
            "https://maven.minecraftforge.net/net/minecraftforge/forge/maven-metadata.xml"
        );
        assert_eq!(
            src.neoforge_versions_url("1.21.1"),
            "https://maven.neoforged.net/releases/net/neoforged/neoforge/maven-metadata.xml"
        );
    }

    #[test]
    fn modrinth_urls_are_rewritten() {
        let src = McimSource::new();
        assert_eq!(
            src.transform_modrinth_api_url("https://api.modrinth.com/v2/search?query=sodium"),
            "https://mod.mcimirror.top/modrinth/v2/search?query=sodium"
        );
        assert_eq!(
            src.transform_modrinth_cdn_url("https://cdn.modrinth.com/data/AANobbMI/x.jar"),
            "https://mod.mcimirror.top/data/AANobbMI/x.jar"
        );
    }

    #[test]
    fn edge_cdn_is_rewritten_but_mediafilez_never_is() {
        let src = McimSource::new();
        let tail = "/files/4567/890/jei-1.20.1.jar";
        assert_eq!(
            src.transform_curseforge_cdn_url(&format!("https://edge.forgecdn.net{}", tail)),
            format!("https://mod.mcimirror.top{}", tail)
        );
        let media = format!("https://mediafilez.forgecdn.net{}", tail);
        assert_eq!(src.transform_curseforge_cdn_url(&media), media);
    }

    #[test]
    fn curseforge_api_is_rewritten() {
        assert_eq!(
            McimSource::new().transform_curseforge_api_url("https://api.curseforge.com/v1/mods/238222"),
            "https://mod.mcimirror.top/curseforge/v1/mods/238222"
        );
    }

    #[test]
    fn never_sends_api_key() {
        let src = McimSource::new();
        assert!(!src.should_include_curseforge_api_key());
        assert!(src.requires_curseforge_user_agent());
        assert!(src.requires_modrinth_user_agent());
        assert_eq!(src.modrinth_user_agent().as_deref(), Some(APP_USER_AGENT));
    }
}
