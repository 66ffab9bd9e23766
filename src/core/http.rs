// ─── Request policy ───
// Which headers and credentials go with a URL resolved by a source.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::RequestBuilder;
use tracing::debug;

use crate::core::error::SourceResult;
use crate::core::source::{requires_bmclapi_user_agent, DownloadSource};

/// User-Agent sent to mirrors that require launchers to identify themselves.
pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const CURSEFORGE_API_KEY_HEADER: &str = "x-api-key";

/// The API family a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCategory {
    /// Minecraft core resources and mod-loader metadata.
    Minecraft,
    Modrinth,
    CurseForge,
}

/// Headers to attach to one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPolicy {
    pub user_agent: Option<String>,
    /// CurseForge API key, only ever set when the source allows it.
    pub api_key: Option<String>,
}

impl RequestPolicy {
    /// Decide the policy for `url`, already resolved through `source`.
    pub fn for_request(
        source: &dyn DownloadSource,
        category: ApiCategory,
        url: &str,
        curseforge_api_key: Option<&str>,
    ) -> Self {
        let user_agent = match category {
            ApiCategory::Modrinth if source.requires_modrinth_user_agent() => {
                source.modrinth_user_agent()
            }
            ApiCategory::CurseForge if source.requires_curseforge_user_agent() => {
                source.curseforge_user_agent()
            }
            _ => None,
        }
        .or_else(|| {
            requires_bmclapi_user_agent(source, Some(url)).then(|| APP_USER_AGENT.to_string())
        });

        let api_key = match category {
            ApiCategory::CurseForge if source.should_include_curseforge_api_key() => {
                curseforge_api_key
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
            }
            _ => None,
        };

        debug!(
            source = source.key(),
            ?category,
            user_agent = user_agent.as_deref().unwrap_or("-"),
            with_api_key = api_key.is_some(),
            "request policy for {}",
            url
        );

        Self {
            user_agent,
            api_key,
        }
    }

    pub fn headers(&self) -> SourceResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(ua) = &self.user_agent {
            headers.insert(USER_AGENT, HeaderValue::from_str(ua)?);
        }
        if let Some(key) = &self.api_key {
            let mut value = HeaderValue::from_str(key)?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(CURSEFORGE_API_KEY_HEADER), value);
        }
        Ok(headers)
    }

    /// Attach the policy headers to a request built by the HTTP layer.
    pub fn apply(&self, request: RequestBuilder) -> SourceResult<RequestBuilder> {
        Ok(request.headers(self.headers()?))
    }
}
