use crate::core::markers::stop_markers;
use crate::domain::model::{LoadingState, Position, SelectedObject, Stop, StopMarker};
use crate::domain::ports::{ReverseGeocoder, StopsProvider};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Everything the map shows for the current selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapState {
    /// Bumped on every position change; responses carry the generation
    /// they were requested for.
    pub generation: u64,
    pub position: Option<Position>,
    pub address: Option<String>,
    pub stops: Vec<Stop>,
    pub loading: LoadingState,
    pub selected: Option<SelectedObject>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MapState {
    pub fn selected_stop(&self) -> Option<&Stop> {
        match &self.selected {
            Some(SelectedObject::Stop { id }) => self.stops.iter().find(|stop| &stop.id == id),
            None => None,
        }
    }

    pub fn sidebar_open(&self) -> bool {
        self.position.is_some() && self.selected_stop().is_some()
    }

    pub fn markers(&self) -> Vec<StopMarker> {
        stop_markers(&self.stops)
    }

    pub fn is_loading(&self) -> bool {
        self.loading == LoadingState::Loading
    }
}

struct Inflight {
    token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

/// Holds the map state and the requests of the current selection.
///
/// Selecting a new position cancels whatever is still running for the old
/// one. Dropping the session cancels everything. Must be used inside a
/// tokio runtime.
pub struct MapSession {
    stops_provider: Arc<dyn StopsProvider>,
    geocoder: Arc<dyn ReverseGeocoder>,
    state: Arc<watch::Sender<MapState>>,
    inflight: Mutex<Option<Inflight>>,
}

impl MapSession {
    pub fn new(stops_provider: Arc<dyn StopsProvider>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        let (state, _) = watch::channel(MapState::default());
        Self {
            stops_provider,
            geocoder,
            state: Arc::new(state),
            inflight: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MapState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MapState {
        self.state.borrow().clone()
    }

    /// Moves the position marker and starts one stops request and one
    /// geocoding request for it. Returns the new generation.
    pub fn select_position(&self, position: Position) -> u64 {
        let mut inflight = self.lock_inflight();
        if let Some(previous) = inflight.take() {
            tracing::debug!("Cancelling requests of the previous position");
            previous.token.cancel();
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.position = Some(position);
            state.selected = None;
            state.stops.clear();
            state.loading = LoadingState::Loading;
        });
        tracing::info!("📍 Position selected: {}", position);

        let token = CancellationToken::new();
        let handles = vec![
            self.spawn_stops_request(position, generation, token.clone()),
            self.spawn_geocoding_request(position, generation, token.clone()),
        ];
        *inflight = Some(Inflight { token, handles });

        generation
    }

    fn spawn_stops_request(
        &self,
        position: Position,
        generation: u64,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        let provider = Arc::clone(&self.stops_provider);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Stops request for {} cancelled", position);
                    return;
                }
                result = provider.nearby(position) => result,
            };

            let stops = match result {
                Ok(stops) => stops,
                Err(e) => {
                    tracing::warn!("⚠️ Could not load stops near {}: {}", position, e);
                    Vec::new()
                }
            };

            let applied = state.send_if_modified(|state| {
                if state.generation != generation {
                    return false;
                }
                state.stops = stops;
                state.loading = LoadingState::Loaded;
                state.updated_at = Some(Utc::now());
                true
            });
            if applied {
                tracing::info!("🚏 Loaded {} stops", state.borrow().stops.len());
            }
        })
    }

    fn spawn_geocoding_request(
        &self,
        position: Position,
        generation: u64,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        let geocoder = Arc::clone(&self.geocoder);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Geocoding request for {} cancelled", position);
                    return;
                }
                result = geocoder.reverse(position) => result,
            };

            let address = result.unwrap_or_else(|e| {
                tracing::warn!("⚠️ Could not resolve address of {}: {}", position, e);
                None
            });

            state.send_if_modified(|state| {
                if state.generation != generation {
                    return false;
                }
                state.address = address;
                true
            });
        })
    }

    /// Waits until the requests of the current selection have finished.
    pub async fn wait_idle(&self) {
        let handles = {
            let mut inflight = self.lock_inflight();
            inflight
                .as_mut()
                .map(|inflight| std::mem::take(&mut inflight.handles))
                .unwrap_or_default()
        };

        for handle in handles {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    tracing::error!("Request task panicked: {}", e);
                }
            }
        }
    }

    /// Opens the sidebar for a stop of the current list. Unknown ids are ignored.
    pub fn select_stop(&self, id: &str) -> bool {
        self.state.send_if_modified(|state| {
            if !state.stops.iter().any(|stop| stop.id == id) {
                return false;
            }
            state.selected = Some(SelectedObject::Stop { id: id.to_string() });
            true
        })
    }

    pub fn close_sidebar(&self) {
        self.state.send_if_modified(|state| state.selected.take().is_some());
    }

    /// Cancels outstanding requests; the state stays readable.
    pub fn shutdown(&self) {
        if let Some(inflight) = self.lock_inflight().take() {
            inflight.token.cancel();
        }
    }

    fn lock_inflight(&self) -> MutexGuard<'_, Option<Inflight>> {
        // 鎖內沒有可能 panic 的操作，poisoned 直接沿用
        self.inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
