//! Backend reachability tracking.
//!
//! [`Connectivity`] holds the last known answer to "is the backend database
//! reachable?". Consumers read it without waiting; only [`Connectivity::recheck`]
//! touches the network, with one probe and no retry.

use tokio::sync::watch;

use crate::api::ApiClient;

/// Observable connectivity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub connected: bool,
    /// True only while a probe is in flight.
    pub checking: bool,
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self {
            connected: false,
            checking: true,
        }
    }
}

#[derive(Debug)]
pub struct Connectivity {
    api: ApiClient,
    state: watch::Sender<ConnectivityState>,
}

impl Connectivity {
    /// Creates a tracker in the initial state (`connected=false, checking=true`)
    /// without probing.
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(ConnectivityState::default());
        Self { api, state }
    }

    /// Creates a tracker and runs the initial probe.
    pub async fn mount(api: ApiClient) -> Self {
        let connectivity = Self::new(api);
        connectivity.recheck().await;
        connectivity
    }

    /// A settled, disconnected tracker that never probed. Used for offline mode.
    pub fn offline(api: ApiClient) -> Self {
        let connectivity = Self::new(api);
        connectivity.state.send_replace(ConnectivityState {
            connected: false,
            checking: false,
        });
        connectivity
    }

    pub fn state(&self) -> ConnectivityState {
        *self.state.borrow()
    }

    pub fn connected(&self) -> bool {
        self.state.borrow().connected
    }

    pub fn checking(&self) -> bool {
        self.state.borrow().checking
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state.subscribe()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Issues one probe and publishes the outcome. Returns the new `connected` value.
    pub async fn recheck(&self) -> bool {
        self.state.send_modify(|state| state.checking = true);

        let connected = check_server(&self.api).await;

        self.state.send_replace(ConnectivityState {
            connected,
            checking: false,
        });
        connected
    }
}

/// Returns true only if the health probe answered with a truthy `connected` field.
pub async fn check_server(api: &ApiClient) -> bool {
    match api.health().await {
        Ok(health) => {
            if !health.connected {
                tracing::debug!(
                    "Backend reports database unavailable: {}",
                    health.error.as_deref().unwrap_or("no reason given")
                );
            }
            health.connected
        }
        Err(e) => {
            tracing::debug!("Health probe failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{health_router, spawn_api, unreachable_url};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_initial_state() {
        let connectivity = Connectivity::new(ApiClient::new(unreachable_url().await));
        assert_eq!(
            connectivity.state(),
            ConnectivityState {
                connected: false,
                checking: true
            }
        );
    }

    #[tokio::test]
    async fn test_mount_connected() {
        let url = spawn_api(health_router(true)).await;
        let connectivity = Connectivity::mount(ApiClient::new(url)).await;

        assert!(connectivity.connected());
        assert!(!connectivity.checking());
    }

    #[tokio::test]
    async fn test_falsy_connected_field() {
        let url = spawn_api(health_router(false)).await;
        let connectivity = Connectivity::mount(ApiClient::new(url)).await;

        assert!(!connectivity.connected());
        assert!(!connectivity.checking());
    }

    #[tokio::test]
    async fn test_missing_connected_field_is_falsy() {
        let router = Router::new().route(
            "/health/database",
            get(|| async { Json(json!({ "timestamp": "2025-01-01T00:00:00Z" })) }),
        );
        let url = spawn_api(router).await;
        assert!(!Connectivity::mount(ApiClient::new(url)).await.connected());
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let router = Router::new().route(
            "/health/database",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "connected": true }))) }),
        );
        let url = spawn_api(router).await;
        assert!(!Connectivity::mount(ApiClient::new(url)).await.connected());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let connectivity = Connectivity::mount(ApiClient::new(unreachable_url().await)).await;
        assert!(!connectivity.connected());
        assert!(!connectivity.checking());
    }

    #[tokio::test]
    async fn test_recheck_publishes_to_subscribers() {
        let url = spawn_api(health_router(true)).await;
        let connectivity = Connectivity::new(ApiClient::new(url));
        let mut receiver = connectivity.subscribe();

        assert!(connectivity.recheck().await);

        assert!(receiver.has_changed().unwrap());
        let state = *receiver.borrow_and_update();
        assert!(state.connected);
        assert!(!state.checking);
    }

    #[tokio::test]
    async fn test_offline_never_checks() {
        let connectivity = Connectivity::offline(ApiClient::new(unreachable_url().await));
        assert!(!connectivity.connected());
        assert!(!connectivity.checking());
    }
}
