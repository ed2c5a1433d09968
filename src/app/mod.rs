use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Rect, Vec2};
use tracing::{error, info, warn};

use crate::archive::{
    Artifact, ArtifactStore, JsonFileStore, MemoryStore, StoreError, UiPreferences,
};
use crate::graph::{
    FilterState, GraphSession, SimulationConfig, TimelineConfig, ViewTransform, Viewport,
};

mod graph;
mod render_utils;
mod ui;

pub struct AppConfig {
    pub artifacts_path: Option<PathBuf>,
    pub state_path: PathBuf,
    pub initial_viewport: Viewport,
}

pub struct ArchiveGraphApp {
    config: AppConfig,
    preferences: UiPreferences,
    state: AppState,
    reload_rx: Option<Receiver<Result<Vec<Artifact>, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<Artifact>, String>>,
    },
    Ready(Box<ArchiveView>),
    Error(String),
}

enum ReloadRequest {
    Store,
    SampleData,
}

struct ArchiveView {
    session: GraphSession,
    transform: ViewTransform,
    canvas_rect: Rect,
    search_input: String,
    tag_filter_input: String,
    hovered: Option<String>,
    selected: Option<String>,
    preferences: UiPreferences,
    preferences_dirty: bool,
}

impl ArchiveGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let preferences = UiPreferences::load(&config.state_path).unwrap_or_else(|error| {
            warn!("ignoring unreadable UI state: {error:#}");
            UiPreferences::default()
        });
        let state = AppState::Loading {
            rx: Self::spawn_load(Self::store_for(&config)),
        };

        Self {
            config,
            preferences,
            state,
            reload_rx: None,
        }
    }

    fn store_for(config: &AppConfig) -> Box<dyn ArtifactStore> {
        match &config.artifacts_path {
            Some(path) => {
                let store = JsonFileStore::new(path.clone());
                info!(path = %store.path().display(), "reading artifacts from file");
                Box::new(store)
            }
            None => {
                info!("no artifact file configured, starting with an empty archive");
                Box::new(MemoryStore::default())
            }
        }
    }

    fn spawn_load(store: Box<dyn ArtifactStore>) -> Receiver<Result<Vec<Artifact>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = store
                .list_accepted_artifacts()
                .map_err(describe_load_failure);
            let _ = tx.send(result);
        });

        rx
    }

    fn ready_state(&self, artifacts: Vec<Artifact>, previous: Option<&mut ArchiveView>) -> AppState {
        let (filter, transform, viewport) = match previous {
            Some(view) => {
                // Only one integrator may tick at a time.
                view.session.teardown();
                (
                    view.session.filter().clone(),
                    view.transform,
                    view.session.viewport(),
                )
            }
            None => (
                FilterState::with_persona(self.preferences.persona),
                ViewTransform::default(),
                self.config.initial_viewport,
            ),
        };

        AppState::Ready(Box::new(ArchiveView::new(
            artifacts,
            filter,
            transform,
            viewport,
            self.preferences,
        )))
    }

    fn persist_preferences(&mut self, preferences: UiPreferences) {
        self.preferences = preferences;
        match preferences.save(&self.config.state_path) {
            Ok(()) => info!(persona = ?preferences.persona, "saved UI state"),
            Err(error) => warn!("failed to save UI state: {error:#}"),
        }
    }
}

/// Error screen text for a failed load: the full error chain plus what to check.
fn describe_load_failure(error: StoreError) -> String {
    let hint = match &error {
        StoreError::Io { .. } => "Check that the artifact file exists and is readable.",
        StoreError::Parse { .. } => "The artifact file must hold a JSON array of artifacts.",
    };
    let error = anyhow::Error::new(error).context("failed to list accepted artifacts");
    format!("{error:#}\n\n{hint}")
}

impl eframe::App for ArchiveGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut reload = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading archive...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the archive");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        reload = Some(ReloadRequest::Store);
                    }
                });
            }
            AppState::Ready(view) => {
                let is_reloading = self.reload_rx.is_some();
                reload = view.show(ctx, is_reloading);

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let AppState::Ready(view) = &mut self.state
            && view.preferences_dirty
        {
            view.preferences_dirty = false;
            let preferences = view.preferences;
            self.persist_preferences(preferences);
        }

        if let Some(request) = reload
            && self.reload_rx.is_none()
        {
            let store: Box<dyn ArtifactStore> = match request {
                ReloadRequest::Store => Self::store_for(&self.config),
                ReloadRequest::SampleData => {
                    info!("loading sample archive");
                    Box::new(MemoryStore::new(crate::archive::sample_artifacts()))
                }
            };
            let rx = Self::spawn_load(store);
            if matches!(self.state, AppState::Ready(_)) {
                self.reload_rx = Some(rx);
            } else {
                self.state = AppState::Loading { rx };
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            let mut state = std::mem::replace(&mut self.state, AppState::Error(String::new()));
            self.state = match result {
                Ok(artifacts) => {
                    let previous = match &mut state {
                        AppState::Ready(view) => Some(view.as_mut()),
                        _ => None,
                    };
                    self.ready_state(artifacts, previous)
                }
                Err(message) => {
                    error!("archive load failed: {message}");
                    if let AppState::Ready(view) = &mut state {
                        view.session.teardown();
                    }
                    AppState::Error(message)
                }
            };
        }
    }
}

impl ArchiveView {
    fn new(
        artifacts: Vec<Artifact>,
        filter: FilterState,
        transform: ViewTransform,
        viewport: Viewport,
        preferences: UiPreferences,
    ) -> Self {
        let search_input = filter.search_term().to_owned();
        let tag_filter_input = filter.tag_filter().to_owned();
        let session = GraphSession::build(
            artifacts,
            filter,
            viewport,
            SimulationConfig::default(),
            TimelineConfig::default(),
        );

        Self {
            session,
            transform,
            canvas_rect: Rect::NOTHING,
            search_input,
            tag_filter_input,
            hovered: None,
            selected: None,
            preferences,
            preferences_dirty: false,
        }
    }

    fn canvas_viewport(size: Vec2) -> Viewport {
        Viewport {
            width: size.x.max(1.0),
            height: size.y.max(1.0),
        }
    }
}
