//! Construction of the process-wide services.
//!
//! The registry, cache, and coordinator are built once at startup and shared
//! by reference for the life of the process.

use crate::approval::{
    adapters::memory::InMemoryPendingRegistry, domain::TaskBuilder, ports::ApprovalNotifier,
    services::ApprovalCoordinator,
};
use crate::config::{ConfigError, Settings};
use crate::remote::{adapters::HttpProjectApi, ports::RemoteApiError, services::ProjectCache};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;

/// Coordinator wired to the production adapters.
pub type Coordinator<N> =
    ApprovalCoordinator<InMemoryPendingRegistry, HttpProjectApi, N, DefaultClock>;

/// Errors raised while wiring services.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be built.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
}

/// Validates `settings` and builds a coordinator around `notifier`.
///
/// # Errors
///
/// Returns [`BootstrapError::Config`] when the settings fail validation and
/// [`BootstrapError::Remote`] when the HTTP client cannot be built.
pub fn build_coordinator<N>(
    settings: &Settings,
    notifier: Arc<N>,
) -> Result<Coordinator<N>, BootstrapError>
where
    N: ApprovalNotifier,
{
    settings.validate()?;

    let clock = Arc::new(DefaultClock);
    let api = Arc::new(HttpProjectApi::new(&settings.remote)?);
    let cache = Arc::new(
        ProjectCache::new(api, Arc::clone(&clock), settings.cache.duration())
            .with_page_size(settings.ui.page_size),
    );
    let builder = TaskBuilder::new(
        settings.remote.type_href.as_str(),
        settings.remote.status_href.as_str(),
    );

    let coordinator = ApprovalCoordinator::new(
        Arc::new(InMemoryPendingRegistry::new()),
        cache,
        notifier,
        clock,
    )
    .with_builder(builder);

    tracing::info!(
        base_url = %settings.remote.base_url,
        cache_secs = settings.cache.duration_secs,
        page_size = settings.ui.page_size,
        "approval services ready"
    );

    Ok(match settings.notifications.broadcast_channel() {
        Some(channel) => coordinator.with_broadcast_channel(channel),
        None => coordinator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::adapters::TracingNotifier;
    use crate::config::RemoteSettings;
    use crate::remote::ports::ProjectApi;

    #[test]
    fn missing_api_key_stops_startup() {
        let settings = Settings {
            remote: RemoteSettings::new("https://pm.example.test", ""),
            ..Settings::default()
        };

        let result = build_coordinator(&settings, Arc::new(TracingNotifier));

        assert!(matches!(
            result,
            Err(BootstrapError::Config(ConfigError::NotConfigured {
                field: "remote.api_key"
            }))
        ));
    }

    #[test]
    fn configured_settings_wire_the_cache() {
        let mut settings = Settings {
            remote: RemoteSettings::new("https://pm.example.test/", "key"),
            ..Settings::default()
        };
        settings.ui.page_size = 5;

        let coordinator =
            build_coordinator(&settings, Arc::new(TracingNotifier)).expect("services build");

        assert_eq!(coordinator.cache().page_size(), 5);
        assert_eq!(coordinator.cache().api().base_url(), "https://pm.example.test");
    }
}
