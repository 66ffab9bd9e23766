use super::{SourceTemplate, TemplateKind};
use crate::core::http::APP_USER_AGENT;
use crate::core::maven::{FORGE_FILES_MAVEN, FORGE_MAVEN, LITELOADER_MAVEN, MAVEN_CENTRAL, NEOFORGE_MAVEN};
use crate::core::upstream::{
    rewrite_prefix, CURSEFORGE_API, CURSEFORGE_EDGE_CDN, CURSEFORGE_MEDIA_CDN_HOST, FABRIC_META,
    LEGACY_FABRIC_META, LITELOADER_VERSIONS, MODRINTH_API, MODRINTH_CDN, PISTON_META, QUILT_META,
    VERSION_MANIFEST_PATH,
};

/// Community layout: only Modrinth and CurseForge traffic goes to the
/// mirror. Minecraft core and loader patterns point at the upstream hosts
/// and carry no `{baseUrl}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityTemplate;

impl SourceTemplate for CommunityTemplate {
    fn template_name(&self) -> &'static str {
        "MCIM"
    }

    fn kind(&self) -> TemplateKind {
        TemplateKind::Community
    }

    // ── Minecraft core: upstream ───────────────────────

    fn version_manifest_url(&self) -> String {
        format!("{}{}", PISTON_META, VERSION_MANIFEST_PATH)
    }

    fn version_info_url(&self, _version_id: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn resource_url(&self, _resource_type: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn client_jar_url(&self, _version_id: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn client_json_url(&self, _version_id: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn library_url(&self, _library_name: &str, original_url: Option<&str>) -> String {
        match original_url.filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None => format!("{}/{{path}}", MAVEN_CENTRAL),
        }
    }

    // ── Mod loaders: upstream ──────────────────────────

    fn neoforge_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/net/neoforged/neoforge/maven-metadata.xml", NEOFORGE_MAVEN)
    }

    fn neoforge_installer_url(&self, _neoforge_version: &str) -> String {
        format!(
            "{}/net/neoforged/neoforge/{{version}}/neoforge-{{version}}-installer.jar",
            NEOFORGE_MAVEN
        )
    }

    fn forge_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/net/minecraftforge/forge/maven-metadata.xml", FORGE_MAVEN)
    }

    fn forge_installer_url(&self, _minecraft_version: &str, _forge_version: &str) -> String {
        format!(
            "{}/net/minecraftforge/forge/{{version}}/forge-{{version}}-installer.jar",
            FORGE_FILES_MAVEN
        )
    }

    fn fabric_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/versions/loader/{{version}}", FABRIC_META)
    }

    fn fabric_profile_url(&self, _minecraft_version: &str, _loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{{version}}/{{loaderVersion}}/profile/json",
            FABRIC_META
        )
    }

    fn quilt_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/versions/loader/{{version}}", QUILT_META)
    }

    fn quilt_profile_url(&self, _minecraft_version: &str, _loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{{version}}/{{loaderVersion}}/profile/json",
            QUILT_META
        )
    }

    fn legacy_fabric_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/versions/loader/{{version}}", LEGACY_FABRIC_META)
    }

    fn legacy_fabric_profile_url(&self, _minecraft_version: &str, _loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{{version}}/{{loaderVersion}}/profile/json",
            LEGACY_FABRIC_META
        )
    }

    fn liteloader_versions_url(&self) -> String {
        LITELOADER_VERSIONS.to_string()
    }

    fn liteloader_jar_url(&self, _relative_path: &str, original_base_url: Option<&str>) -> String {
        let base = original_base_url
            .filter(|b| !b.is_empty())
            .unwrap_or(LITELOADER_MAVEN);
        format!("{}/{{path}}", base.trim_end_matches('/'))
    }

    // ── Modrinth ────────────────────────────────────────

    fn modrinth_api_base_url(&self) -> String {
        "{baseUrl}/modrinth".to_string()
    }

    fn modrinth_cdn_base_url(&self) -> String {
        "{baseUrl}".to_string()
    }

    fn transform_modrinth_api_url(&self, original_url: &str) -> String {
        rewrite_prefix(original_url, &[(MODRINTH_API, "{baseUrl}/modrinth")])
    }

    fn transform_modrinth_cdn_url(&self, original_url: &str) -> String {
        rewrite_prefix(original_url, &[(MODRINTH_CDN, "{baseUrl}")])
    }

    fn modrinth_user_agent(&self) -> Option<String> {
        Some(APP_USER_AGENT.to_string())
    }

    fn requires_modrinth_user_agent(&self) -> bool {
        true
    }

    // ── CurseForge ──────────────────────────────────────

    fn curseforge_api_base_url(&self) -> String {
        "{baseUrl}/curseforge".to_string()
    }

    fn curseforge_cdn_base_url(&self) -> String {
        "{baseUrl}".to_string()
    }

    fn transform_curseforge_api_url(&self, original_url: &str) -> String {
        rewrite_prefix(original_url, &[(CURSEFORGE_API, "{baseUrl}/curseforge")])
    }

    fn transform_curseforge_cdn_url(&self, original_url: &str) -> String {
        if original_url.contains(CURSEFORGE_MEDIA_CDN_HOST) {
            return original_url.to_string();
        }
        rewrite_prefix(original_url, &[(CURSEFORGE_EDGE_CDN, "{baseUrl}")])
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
