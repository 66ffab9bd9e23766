use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::debug;

use super::{DownloadSource, BMCLAPI_KEY};

const BMCLAPI_HOST_MARKERS: &[&str] = &["bmclapi", "bangbang93.com"];

fn points_at_bmclapi(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    BMCLAPI_HOST_MARKERS.iter().any(|m| url.contains(m))
}

/// Whether requests resolved through `source` must carry the launcher
/// User-Agent that BMCLAPI asks for.
///
/// Checks the key, then the display name, then `url`, then the source's own
/// manifest URL. A source that panics while being probed counts as `false`.
pub fn requires_bmclapi_user_agent(source: &dyn DownloadSource, url: Option<&str>) -> bool {
    if source.key().eq_ignore_ascii_case(BMCLAPI_KEY) {
        return true;
    }
    if source.name().eq_ignore_ascii_case("BMCLAPI") {
        return true;
    }
    if url.is_some_and(points_at_bmclapi) {
        return true;
    }

    match catch_unwind(AssertUnwindSafe(|| source.version_manifest_url())) {
        Ok(manifest) => points_at_bmclapi(&manifest),
        Err(_) => {
            debug!(source = source.key(), "manifest probe panicked, assuming no BMCLAPI");
            false
        }
    }
}
