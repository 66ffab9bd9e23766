use tracing::debug;

use super::{DownloadSource, BMCLAPI_KEY};
use crate::core::error::SourceResult;
use crate::core::maven::{
    MavenArtifact, FABRIC_MAVEN, FORGE_MAVEN, MAVEN_CENTRAL, MOJANG_LIBRARIES, NEOFORGE_MAVEN,
    NEOFORGE_MAVEN_ROOT, QUILT_MAVEN,
};
use crate::core::upstream::{
    rewrite_prefix, BMCLAPI, CURSEFORGE_API, CURSEFORGE_EDGE_CDN, LAUNCHER_META,
    LEGACY_FABRIC_META, MODRINTH_API, MODRINTH_CDN, PISTON_DATA, PISTON_META, RESOURCES,
    VERSION_MANIFEST_PATH,
};

const BMCLAPI_ASSETS: &str = "https://bmclapi2.bangbang93.com/assets";
const BMCLAPI_MAVEN: &str = "https://bmclapi2.bangbang93.com/maven";

/// Mojang hosts mirrored 1:1 by BMCLAPI.
const CORE_RULES: &[(&str, &str)] = &[
    (PISTON_META, BMCLAPI),
    (PISTON_DATA, BMCLAPI),
    (LAUNCHER_META, BMCLAPI),
    (RESOURCES, BMCLAPI_ASSETS),
];

/// Maven hosts served from the single BMCLAPI maven. Order matters: the
/// NeoForge `releases` repository must match before the bare host.
const MAVEN_RULES: &[(&str, &str)] = &[
    (MAVEN_CENTRAL, BMCLAPI_MAVEN),
    (NEOFORGE_MAVEN, BMCLAPI_MAVEN),
    (NEOFORGE_MAVEN_ROOT, BMCLAPI_MAVEN),
    (FORGE_MAVEN, BMCLAPI_MAVEN),
    (MOJANG_LIBRARIES, BMCLAPI_MAVEN),
    (QUILT_MAVEN, BMCLAPI_MAVEN),
    (FABRIC_MAVEN, BMCLAPI_MAVEN),
];

/// BMCLAPI: a community mirror of Mojang resources and loader metadata.
/// Third-party project APIs are not mirrored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmclapiSource;

impl BmclapiSource {
    pub fn new() -> Self {
        Self
    }
}

impl DownloadSource for BmclapiSource {
    fn name(&self) -> &str {
        "BMCLAPI"
    }

    fn key(&self) -> &str {
        BMCLAPI_KEY
    }

    fn version_manifest_url(&self) -> String {
        format!("{}{}", BMCLAPI, VERSION_MANIFEST_PATH)
    }

    fn version_info_url(&self, _version_id: &str, original_url: &str) -> String {
        rewrite_prefix(original_url, CORE_RULES)
    }

    fn resource_url(&self, resource_type: &str, original_url: &str) -> String {
        let url = rewrite_prefix(original_url, CORE_RULES);
        debug!(
            source = self.name(),
            resource_type,
            "resource url {} -> {}",
            original_url,
            url
        );
        url
    }

    fn client_jar_url(&self, version_id: &str, _original_url: &str) -> String {
        format!("{}/version/{}/client", BMCLAPI, version_id)
    }

    fn client_json_url(&self, version_id: &str, _original_url: &str) -> String {
        format!("{}/version/{}/json", BMCLAPI, version_id)
    }

    fn library_url(
        &self,
        library_name: &str,
        original_url: Option<&str>,
    ) -> SourceResult<String> {
        if let Some(original) = original_url.filter(|u| !u.is_empty()) {
            let url = rewrite_prefix(original, MAVEN_RULES);
            debug!("Library {} -> {}", original, url);
            return Ok(url);
        }

        let url = MavenArtifact::parse(library_name)?.url(BMCLAPI_MAVEN);
        debug!("Built BMCLAPI URL for library {}: {}", library_name, url);
        Ok(url)
    }

    fn neoforge_versions_url(&self, minecraft_version: &str) -> String {
        format!("{}/neoforge/list/{}", BMCLAPI, minecraft_version)
    }

    fn neoforge_installer_url(&self, neoforge_version: &str) -> String {
        format!(
            "{}/net/neoforged/neoforge/{v}/neoforge-{v}-installer.jar",
            BMCLAPI_MAVEN,
            v = neoforge_version
        )
    }

    fn forge_versions_url(&self, minecraft_version: &str) -> String {
        format!("{}/forge/minecraft/{}", BMCLAPI, minecraft_version)
    }

    fn forge_installer_url(&self, minecraft_version: &str, forge_version: &str) -> String {
        let forge_id = format!("{}-{}", minecraft_version, forge_version);
        format!(
            "{}/net/minecraftforge/forge/{id}/forge-{id}-installer.jar",
            BMCLAPI_MAVEN,
            id = forge_id
        )
    }

    fn fabric_versions_url(&self, minecraft_version: &str) -> String {
        format!(
            "{}/fabric-meta/v2/versions/loader/{}",
            BMCLAPI, minecraft_version
        )
    }

    fn fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        format!(
            "{}/fabric-meta/v2/versions/loader/{}/{}/profile/json",
            BMCLAPI, minecraft_version, loader_version
        )
    }

    fn quilt_versions_url(&self, minecraft_version: &str) -> String {
        format!(
            "{}/quilt-meta/v3/versions/loader/{}",
            BMCLAPI, minecraft_version
        )
    }

    fn quilt_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        format!(
            "{}/quilt-meta/v3/versions/loader/{}/{}/profile/json",
            BMCLAPI, minecraft_version, loader_version
        )
    }

    // Legacy Fabric is not mirrored.
    fn legacy_fabric_versions_url(&self, minecraft_version: &str) -> String {
        format!("{}/versions/loader/{}", LEGACY_FABRIC_META, minecraft_version)
    }

    fn legacy_fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{}/{}/profile/json",
            LEGACY_FABRIC_META, minecraft_version, loader_version
        )
    }

    fn liteloader_versions_url(&self) -> String {
        format!("{}/com/mumfrey/liteloader/versions.json", BMCLAPI_MAVEN)
    }

    fn liteloader_jar_url(&self, relative_path: &str, _original_base_url: Option<&str>) -> String {
        format!(
            "{}/{}",
            BMCLAPI_MAVEN,
            relative_path.trim_start_matches('/')
        )
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

    // CurseForge traffic goes to the official API, so the key is still needed.
    fn should_include_curseforge_api_key(&self) -> bool {
        true
    }
}
