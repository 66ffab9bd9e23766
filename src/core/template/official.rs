use super::{SourceTemplate, TemplateKind};
use crate::core::maven::{
    FABRIC_MAVEN, FORGE_MAVEN, MAVEN_CENTRAL, MOJANG_LIBRARIES, NEOFORGE_MAVEN,
    NEOFORGE_MAVEN_ROOT, QUILT_MAVEN,
};
use crate::core::upstream::{
    rewrite_prefix, CURSEFORGE_API, CURSEFORGE_EDGE_CDN, LAUNCHER_META, LEGACY_FABRIC_META,
    MODRINTH_API, MODRINTH_CDN, PISTON_DATA, PISTON_META, RESOURCES,
};

const METADATA_RULES: &[(&str, &str)] = &[
    (PISTON_META, "{baseUrl}"),
    (PISTON_DATA, "{baseUrl}"),
    (LAUNCHER_META, "{baseUrl}"),
];

const RESOURCE_RULES: &[(&str, &str)] = &[
    (PISTON_META, "{baseUrl}"),
    (PISTON_DATA, "{baseUrl}"),
    (LAUNCHER_META, "{baseUrl}"),
    (RESOURCES, "{baseUrl}/assets"),
];

const MAVEN_RULES: &[(&str, &str)] = &[
    (MAVEN_CENTRAL, "{baseUrl}/maven"),
    (NEOFORGE_MAVEN, "{baseUrl}/maven"),
    (NEOFORGE_MAVEN_ROOT, "{baseUrl}/maven"),
    (FORGE_MAVEN, "{baseUrl}/maven"),
    (MOJANG_LIBRARIES, "{baseUrl}/maven"),
    (QUILT_MAVEN, "{baseUrl}/maven"),
    (FABRIC_MAVEN, "{baseUrl}/maven"),
];

/// Official-compatible layout: Mojang paths 1:1 under `{baseUrl}`, a single
/// maven under `{baseUrl}/maven`, loader metadata under BMCLAPI-style paths.
/// Third-party APIs are left on their official hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficialCompatibleTemplate;

impl SourceTemplate for OfficialCompatibleTemplate {
    fn template_name(&self) -> &'static str {
        "Official"
    }

    fn kind(&self) -> TemplateKind {
        TemplateKind::OfficialCompatible
    }

    fn version_manifest_url(&self) -> String {
        "{baseUrl}/mc/game/version_manifest.json".to_string()
    }

    fn version_info_url(&self, _version_id: &str, original_url: &str) -> String {
        rewrite_prefix(original_url, METADATA_RULES)
    }

    fn resource_url(&self, _resource_type: &str, original_url: &str) -> String {
        rewrite_prefix(original_url, RESOURCE_RULES)
    }

    fn client_jar_url(&self, _version_id: &str, _original_url: &str) -> String {
        "{baseUrl}/version/{version}/client".to_string()
    }

    fn client_json_url(&self, _version_id: &str, _original_url: &str) -> String {
        "{baseUrl}/version/{version}/json".to_string()
    }

    fn library_url(&self, _library_name: &str, original_url: Option<&str>) -> String {
        match original_url.filter(|u| !u.is_empty()) {
            Some(url) => rewrite_prefix(url, MAVEN_RULES),
            None => "{baseUrl}/maven/{path}".to_string(),
        }
    }

    fn neoforge_versions_url(&self, _minecraft_version: &str) -> String {
        "{baseUrl}/neoforge/list/{version}".to_string()
    }

    fn neoforge_installer_url(&self, _neoforge_version: &str) -> String {
        "{baseUrl}/maven/net/neoforged/neoforge/{version}/neoforge-{version}-installer.jar"
            .to_string()
    }

    fn forge_versions_url(&self, _minecraft_version: &str) -> String {
        "{baseUrl}/forge/minecraft/{version}".to_string()
    }

    fn forge_installer_url(&self, _minecraft_version: &str, _forge_version: &str) -> String {
        "{baseUrl}/maven/net/minecraftforge/forge/{version}/forge-{version}-installer.jar"
            .to_string()
    }

    fn fabric_versions_url(&self, _minecraft_version: &str) -> String {
        "{baseUrl}/fabric-meta/v2/versions/loader/{version}".to_string()
    }

    fn fabric_profile_url(&self, _minecraft_version: &str, _loader_version: &str) -> String {
        "{baseUrl}/fabric-meta/v2/versions/loader/{version}/{loaderVersion}/profile/json"
            .to_string()
    }

    fn quilt_versions_url(&self, _minecraft_version: &str) -> String {
        "{baseUrl}/quilt-meta/v3/versions/loader/{version}".to_string()
    }

    fn quilt_profile_url(&self, _minecraft_version: &str, _loader_version: &str) -> String {
        "{baseUrl}/quilt-meta/v3/versions/loader/{version}/{loaderVersion}/profile/json"
            .to_string()
    }

    // No mirror layout for Legacy Fabric: upstream.
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
        "{baseUrl}/maven/com/mumfrey/liteloader/versions.json".to_string()
    }

    fn liteloader_jar_url(&self, _relative_path: &str, _original_base_url: Option<&str>) -> String {
        "{baseUrl}/maven/{path}".to_string()
    }

    fn modrinth_api_base_url(&self) -> String {
        MODRINTH_API.to_string()
    }

    fn modrinth_cdn_base_url(&self) -> String {
        MODRINTH_CDN.to_string()
    }

    fn transform_modrinth_api_url(&self, original_url: &str) -> String {
        original_url.to_string()
    }

    fn transform_modrinth_cdn_url(&self, original_url: &str) -> String {
        original_url.to_string()
    }

    fn modrinth_user_agent(&self) -> Option<String> {
        None
    }

    fn requires_modrinth_user_agent(&self) -> bool {
        false
    }

    fn curseforge_api_base_url(&self) -> String {
        CURSEFORGE_API.to_string()
    }

    fn curseforge_cdn_base_url(&self) -> String {
        CURSEFORGE_EDGE_CDN.to_string()
    }

    fn transform_curseforge_api_url(&self, original_url: &str) -> String {
        original_url.to_string()
    }

    fn transform_curseforge_cdn_url(&self, original_url: &str) -> String {
        original_url.to_string()
    }

    fn curseforge_user_agent(&self) -> Option<String> {
        None
    }

    fn requires_curseforge_user_agent(&self) -> bool {
        false
    }

    fn should_include_curseforge_api_key(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mojang_hosts_become_base_url() {
        let t = OfficialCompatibleTemplate;
        assert_eq!(
            t.version_info_url("1.20.4", "https://piston-meta.mojang.com/v1/packages/x/1.20.4.json"),
            "{baseUrl}/v1/packages/x/1.20.4.json"
        );
        assert_eq!(
            t.resource_url("asset", "https://resources.download.minecraft.net/ab/abcd"),
            "{baseUrl}/assets/ab/abcd"
        );
    }

    #[test]
    fn version_info_leaves_asset_host_alone() {
        let url = "https://resources.download.minecraft.net/ab/abcd";
        assert_eq!(OfficialCompatibleTemplate.version_info_url("x", url), url);
    }

    #[test]
    fn library_pattern_depends_on_original_url() {
        let t = OfficialCompatibleTemplate;
        assert_eq!(t.library_url("org.foo:bar:1.0", None), "{baseUrl}/maven/{path}");
        assert_eq!(
            t.library_url("x", Some("https://maven.fabricmc.net/net/fabricmc/a.jar")),
            "{baseUrl}/maven/net/fabricmc/a.jar"
        );
    }

    #[test]
    fn third_party_surface_is_pass_through() {
        let t = OfficialCompatibleTemplate;
        let url = "https://edge.forgecdn.net/files/1/2/a.jar";
        assert_eq!(t.transform_curseforge_cdn_url(url), url);
        assert!(!t.requires_modrinth_user_agent());
        assert!(t.should_include_curseforge_api_key());
    }
}
