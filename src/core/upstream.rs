// ─── Upstream endpoints ───
// Hosts and fixed endpoints of the official services and the built-in
// mirrors. Strings are byte-for-byte what the services expect.

// ── Mojang ──────────────────────────────────────────────
pub const PISTON_META: &str = "https://piston-meta.mojang.com";
pub const PISTON_DATA: &str = "https://piston-data.mojang.com";
pub const LAUNCHER_META: &str = "https://launchermeta.mojang.com";
pub const RESOURCES: &str = "https://resources.download.minecraft.net";
pub const VERSION_MANIFEST_PATH: &str = "/mc/game/version_manifest.json";

// ── Loader meta APIs ────────────────────────────────────
pub const FABRIC_META: &str = "https://meta.fabricmc.net/v2";
pub const QUILT_META: &str = "https://meta.quiltmc.org/v3";
pub const LEGACY_FABRIC_META: &str = "https://meta.legacyfabric.net/v2";
pub const LITELOADER_VERSIONS: &str = "http://dl.liteloader.com/versions/versions.json";

// ── Third-party project APIs ────────────────────────────
pub const MODRINTH_API: &str = "https://api.modrinth.com";
pub const MODRINTH_CDN: &str = "https://cdn.modrinth.com";
pub const CURSEFORGE_API: &str = "https://api.curseforge.com";
/// CurseForge "edge" CDN. Mirrors may proxy it.
pub const CURSEFORGE_EDGE_CDN: &str = "https://edge.forgecdn.net";
/// CurseForge "media" CDN host fragment. Never rewritten by any mirror.
pub const CURSEFORGE_MEDIA_CDN_HOST: &str = "mediafilez.forgecdn.net";

// ── Mirrors ─────────────────────────────────────────────
pub const BMCLAPI: &str = "https://bmclapi2.bangbang93.com";
pub const MCIM: &str = "https://mod.mcimirror.top";

/// Replace the first rule whose `from` prefix matches `url` at a host or
/// path boundary. Unmatched URLs come back unchanged.
pub(crate) fn rewrite_prefix(url: &str, rules: &[(&str, &str)]) -> String {
    for (from, to) in rules {
        if let Some(rest) = url.strip_prefix(from) {
            if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
                return format!("{}{}", to, rest);
            }
        }
    }
    url.to_string()
}
