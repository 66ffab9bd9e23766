pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::config::{ConflictStrategy, CustomSourceConfig, CustomSourceStore};
pub use crate::core::error::{SourceError, SourceResult};
pub use crate::core::http::{ApiCategory, RequestPolicy};
pub use crate::core::registry::{resolve_url, ResourceKind, SourceRegistry};
pub use crate::core::source::{
    requires_bmclapi_user_agent, BmclapiSource, CustomSource, DownloadSource, McimSource,
    OfficialSource,
};
pub use crate::core::template::{SourceTemplate, TemplateFactory, TemplateKind};

/// Install the structured logging subscriber. `RUST_LOG` overrides the
/// default filter. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,download_sources=debug")),
        )
        .try_init();

    tracing::info!("download-sources {} ready", env!("CARGO_PKG_VERSION"));
}
