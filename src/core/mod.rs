// ─── Download source core ───
// Maps logical resource requests onto concrete URLs for the official
// services and their mirrors.
//
// Architecture:
//   core/
//     upstream     Official hosts and endpoints, prefix rewriting
//     maven/       Maven coordinate parsing + repository constants
//     template/    URL pattern templates + factory
//     source/      DownloadSource trait, built-in and custom sources
//     registry     Source pool, default source, fallback order, routing
//     http         Header policy for resolved URLs
//     config/      custom_sources.json model + on-disk store
//     error        Crate error type

pub mod config;
pub mod error;
pub mod http;
pub mod maven;
pub mod registry;
pub mod source;
pub mod template;
pub mod upstream;

#[cfg(test)]
pub(crate) mod testing;
