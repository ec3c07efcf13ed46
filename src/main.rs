mod api;
mod config;
mod error;
mod ops;
mod renderer;
mod store;
mod types;
mod ui;

use crate::api::{BackendClient, UploadRegistrar};
use crate::config::AppConfig;
use crate::renderer::gst_player::GstMediaElement;
use crate::store::JsonStore;
use crate::types::media::FileDescriptor;
use crate::ui::app::ReelcutApp;
use crate::ui::shell::ShellState;
use gstreamer as gst;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stands in for the backend when no client could be built.
struct OfflineRegistrar;

impl UploadRegistrar for OfflineRegistrar {
    fn register_upload(&self, file: &FileDescriptor) {
        tracing::warn!(file = %file.file_name, "Backend unavailable; upload not registered");
    }
}

fn main() -> eframe::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelcut=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = gst::init() {
        tracing::error!(error = %e, "GStreamer failed to initialise; previews will not load");
    }

    let config = AppConfig::from_env();
    tracing::info!(api = %config.api_base_url, data_dir = %config.data_dir.display(), "Starting Reelcut");

    let store = match JsonStore::open(&config.data_dir) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::error!(error = %e, "Local storage unavailable; nothing will be saved");
            None
        }
    };

    let client = match BackendClient::new(&config.api_base_url) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            None
        }
    };
    let registrar: Box<dyn UploadRegistrar> = match &client {
        Some(client) => Box::new(client.clone()),
        None => Box::new(OfflineRegistrar),
    };

    let (width, height) = (config.preview_width, config.preview_height);
    let opener = Box::new(move |file: &FileDescriptor| GstMediaElement::open(file, width, height));
    let state = ShellState::new(opener, registrar, store);
    let app = ReelcutApp::new(state, client);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Reelcut",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
