use tracing::debug;

use super::{DownloadSource, OFFICIAL_KEY};
use crate::core::error::SourceResult;
use crate::core::maven::{
    MavenArtifact, FORGE_FILES_MAVEN, FORGE_MAVEN, LITELOADER_MAVEN, MAVEN_CENTRAL,
    NEOFORGE_MAVEN,
};
use crate::core::upstream::{
    CURSEFORGE_API, CURSEFORGE_EDGE_CDN, FABRIC_META, LEGACY_FABRIC_META, LITELOADER_VERSIONS,
    MODRINTH_API, MODRINTH_CDN, PISTON_META, QUILT_META, VERSION_MANIFEST_PATH,
};

/// The upstream services themselves. Every URL is returned as published.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficialSource;

impl OfficialSource {
    pub fn new() -> Self {
        Self
    }
}

impl DownloadSource for OfficialSource {
    fn name(&self) -> &str {
        "Official"
    }

    fn key(&self) -> &str {
        OFFICIAL_KEY
    }

    fn version_manifest_url(&self) -> String {
        format!("{}{}", PISTON_META, VERSION_MANIFEST_PATH)
    }

    fn version_info_url(&self, _version_id: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn resource_url(&self, resource_type: &str, original_url: &str) -> String {
        debug!(source = self.name(), resource_type, url = original_url, "resource url");
        original_url.to_string()
    }

    fn client_jar_url(&self, _version_id: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn client_json_url(&self, _version_id: &str, original_url: &str) -> String {
        original_url.to_string()
    }

    fn library_url(
        &self,
        library_name: &str,
        original_url: Option<&str>,
    ) -> SourceResult<String> {
        if let Some(url) = original_url.filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }

        let url = MavenArtifact::parse(library_name)?.url(MAVEN_CENTRAL);
        debug!("Built official URL for library {}: {}", library_name, url);
        Ok(url)
    }

    fn neoforge_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/net/neoforged/neoforge/maven-metadata.xml", NEOFORGE_MAVEN)
    }

    fn neoforge_installer_url(&self, neoforge_version: &str) -> String {
        format!(
            "{}/net/neoforged/neoforge/{v}/neoforge-{v}-installer.jar",
            NEOFORGE_MAVEN,
            v = neoforge_version
        )
    }

    fn forge_versions_url(&self, _minecraft_version: &str) -> String {
        format!("{}/net/minecraftforge/forge/maven-metadata.xml", FORGE_MAVEN)
    }

    fn forge_installer_url(&self, minecraft_version: &str, forge_version: &str) -> String {
        let forge_id = format!("{}-{}", minecraft_version, forge_version);
        format!(
            "{}/net/minecraftforge/forge/{id}/forge-{id}-installer.jar",
            FORGE_FILES_MAVEN,
            id = forge_id
        )
    }

    fn fabric_versions_url(&self, minecraft_version: &str) -> String {
        format!("{}/versions/loader/{}", FABRIC_META, minecraft_version)
    }

    fn fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{}/{}/profile/json",
            FABRIC_META, minecraft_version, loader_version
        )
    }

    fn quilt_versions_url(&self, minecraft_version: &str) -> String {
        format!("{}/versions/loader/{}", QUILT_META, minecraft_version)
    }

    fn quilt_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{}/{}/profile/json",
            QUILT_META, minecraft_version, loader_version
        )
    }

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
        LITELOADER_VERSIONS.to_string()
    }

    fn liteloader_jar_url(&self, relative_path: &str, original_base_url: Option<&str>) -> String {
        let base = original_base_url
            .filter(|b| !b.is_empty())
            .unwrap_or(LITELOADER_MAVEN);
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
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

    fn should_include_curseforge_api_key(&self) -> bool {
        true
    }
}
