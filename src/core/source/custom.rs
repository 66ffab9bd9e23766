use std::collections::HashMap;

use tracing::debug;

use super::substitution::substitute;
use super::DownloadSource;
use crate::core::error::SourceResult;
use crate::core::maven::MavenArtifact;
use crate::core::template::SourceTemplate;

/// Priority given to custom sources that do not set one.
pub const DEFAULT_PRIORITY: i32 = 100;

type Context = HashMap<&'static str, String>;

/// A user-defined mirror: a template filled with the mirror's base URL, with
/// optional per-operation pattern overrides.
#[derive(Debug, Clone)]
pub struct CustomSource {
    key: String,
    name: String,
    base_url: String,
    template: &'static dyn SourceTemplate,
    overrides: HashMap<String, String>,
    priority: i32,
}

impl CustomSource {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        base_url: &str,
        template: &'static dyn SourceTemplate,
        overrides: HashMap<String, String>,
        priority: i32,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            template,
            overrides,
            priority,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn template(&self) -> &'static dyn SourceTemplate {
        self.template
    }

    pub fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Resolve one operation: the override for `op_key` if any, else the
    /// template pattern, with the context substituted.
    fn apply(&self, op_key: &str, pattern: String, mut context: Context) -> String {
        let pattern = match self.overrides.get(op_key) {
            Some(custom) => {
                debug!(source = %self.key, operation = op_key, "using override pattern {}", custom);
                custom.clone()
            }
            None => pattern,
        };
        context.insert("baseUrl", self.base_url.clone());
        let url = substitute(&pattern, &context, op_key);
        debug!(source = %self.key, operation = op_key, "resolved {}", url);
        url
    }

    fn plain(&self, op_key: &str, pattern: String) -> String {
        self.apply(op_key, pattern, Context::new())
    }
}

fn version_ctx(version: &str) -> Context {
    Context::from([("version", version.to_string())])
}

fn profile_ctx(minecraft_version: &str, loader_version: &str) -> Context {
    Context::from([
        ("version", minecraft_version.to_string()),
        ("loaderVersion", loader_version.to_string()),
    ])
}

impl DownloadSource for CustomSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    // ── Minecraft core ──────────────────────────────────

    fn version_manifest_url(&self) -> String {
        self.plain("version_manifest", self.template.version_manifest_url())
    }

    fn version_info_url(&self, version_id: &str, original_url: &str) -> String {
        self.apply(
            "version_info",
            self.template.version_info_url(version_id, original_url),
            version_ctx(version_id),
        )
    }

    fn resource_url(&self, resource_type: &str, original_url: &str) -> String {
        self.plain(
            &format!("resource_{}", resource_type),
            self.template.resource_url(resource_type, original_url),
        )
    }

    fn client_jar_url(&self, version_id: &str, original_url: &str) -> String {
        self.apply(
            "client_jar",
            self.template.client_jar_url(version_id, original_url),
            version_ctx(version_id),
        )
    }

    fn client_json_url(&self, version_id: &str, original_url: &str) -> String {
        self.apply(
            "client_json",
            self.template.client_json_url(version_id, original_url),
            version_ctx(version_id),
        )
    }

    fn library_url(
        &self,
        library_name: &str,
        original_url: Option<&str>,
    ) -> SourceResult<String> {
        let original_url = original_url.filter(|u| !u.is_empty());
        // A coordinate is only needed when there is no URL to rewrite.
        let artifact = match original_url {
            Some(_) => MavenArtifact::parse(library_name).ok(),
            None => Some(MavenArtifact::parse(library_name)?),
        };

        let mut context = Context::new();
        if let Some(artifact) = artifact {
            context.insert("path", artifact.path());
            context.insert("name", library_name.to_string());
        }
        Ok(self.apply(
            "library",
            self.template.library_url(library_name, original_url),
            context,
        ))
    }

    // ── Mod loaders ─────────────────────────────────────

    fn neoforge_versions_url(&self, minecraft_version: &str) -> String {
        self.apply(
            "neoforge_versions",
            self.template.neoforge_versions_url(minecraft_version),
            version_ctx(minecraft_version),
        )
    }

    fn neoforge_installer_url(&self, neoforge_version: &str) -> String {
        self.apply(
            "neoforge_installer",
            self.template.neoforge_installer_url(neoforge_version),
            version_ctx(neoforge_version),
        )
    }

    fn forge_versions_url(&self, minecraft_version: &str) -> String {
        self.apply(
            "forge_versions",
            self.template.forge_versions_url(minecraft_version),
            version_ctx(minecraft_version),
        )
    }

    fn forge_installer_url(&self, minecraft_version: &str, forge_version: &str) -> String {
        let context = Context::from([
            ("version", format!("{}-{}", minecraft_version, forge_version)),
            ("mcVersion", minecraft_version.to_string()),
            ("forgeVersion", forge_version.to_string()),
        ]);
        self.apply(
            "forge_installer",
            self.template.forge_installer_url(minecraft_version, forge_version),
            context,
        )
    }

    fn fabric_versions_url(&self, minecraft_version: &str) -> String {
        self.apply(
            "fabric_versions",
            self.template.fabric_versions_url(minecraft_version),
            version_ctx(minecraft_version),
        )
    }

    fn fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        self.apply(
            "fabric_profile",
            self.template.fabric_profile_url(minecraft_version, loader_version),
            profile_ctx(minecraft_version, loader_version),
        )
    }

    fn quilt_versions_url(&self, minecraft_version: &str) -> String {
        self.apply(
            "quilt_versions",
            self.template.quilt_versions_url(minecraft_version),
            version_ctx(minecraft_version),
        )
    }

    fn quilt_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        self.apply(
            "quilt_profile",
            self.template.quilt_profile_url(minecraft_version, loader_version),
            profile_ctx(minecraft_version, loader_version),
        )
    }

    fn legacy_fabric_versions_url(&self, minecraft_version: &str) -> String {
        self.apply(
            "legacy_fabric_versions",
            self.template.legacy_fabric_versions_url(minecraft_version),
            version_ctx(minecraft_version),
        )
    }

    fn legacy_fabric_profile_url(&self, minecraft_version: &str, loader_version: &str) -> String {
        self.apply(
            "legacy_fabric_profile",
            self.template
                .legacy_fabric_profile_url(minecraft_version, loader_version),
            profile_ctx(minecraft_version, loader_version),
        )
    }

    fn liteloader_versions_url(&self) -> String {
        self.plain("liteloader_versions", self.template.liteloader_versions_url())
    }

    fn liteloader_jar_url(&self, relative_path: &str, original_base_url: Option<&str>) -> String {
        let context = Context::from([("path", relative_path.trim_start_matches('/').to_string())]);
        self.apply(
            "liteloader_jar",
            self.template.liteloader_jar_url(relative_path, original_base_url),
            context,
        )
    }

    // ── Modrinth ────────────────────────────────────────

    fn modrinth_api_base_url(&self) -> String {
        self.plain("modrinth_api_base", self.template.modrinth_api_base_url())
    }

    fn modrinth_cdn_base_url(&self) -> String {
        self.plain("modrinth_cdn_base", self.template.modrinth_cdn_base_url())
    }

    fn transform_modrinth_api_url(&self, original_url: &str) -> String {
        self.plain(
            "modrinth_api_transform",
            self.template.transform_modrinth_api_url(original_url),
        )
    }

    fn transform_modrinth_cdn_url(&self, original_url: &str) -> String {
        self.plain(
            "modrinth_cdn_transform",
            self.template.transform_modrinth_cdn_url(original_url),
        )
    }

    fn modrinth_user_agent(&self) -> Option<String> {
        self.template.modrinth_user_agent()
    }

    fn requires_modrinth_user_agent(&self) -> bool {
        self.template.requires_modrinth_user_agent()
    }

    // ── CurseForge ──────────────────────────────────────

    fn curseforge_api_base_url(&self) -> String {
        self.plain("curseforge_api_base", self.template.curseforge_api_base_url())
    }

    fn curseforge_cdn_base_url(&self) -> String {
        self.plain("curseforge_cdn_base", self.template.curseforge_cdn_base_url())
    }

    fn transform_curseforge_api_url(&self, original_url: &str) -> String {
        self.plain(
            "curseforge_api_transform",
            self.template.transform_curseforge_api_url(original_url),
        )
    }

    fn transform_curseforge_cdn_url(&self, original_url: &str) -> String {
        self.plain(
            "curseforge_cdn_transform",
            self.template.transform_curseforge_cdn_url(original_url),
        )
    }

    fn curseforge_user_agent(&self) -> Option<String> {
        self.template.curseforge_user_agent()
    }

    fn requires_curseforge_user_agent(&self) -> bool {
        self.template.requires_curseforge_user_agent()
    }

    fn should_include_curseforge_api_key(&self) -> bool {
        self.template.should_include_curseforge_api_key()
    }
}
