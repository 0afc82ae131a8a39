// Main entry point - wires a headless preview of the dashboard
use std::path::PathBuf;
use std::rc::Rc;

use city_vitals::application::host_ui::{LabelText, WidgetKind};
use city_vitals::application::dashboard_controller::DashboardController;
use city_vitals::domain::stat::StatId;
use city_vitals::infrastructure::config::{load_dashboard_config, load_dashboard_config_from};
use city_vitals::infrastructure::headless_ui::HeadlessUi;
use city_vitals::infrastructure::json_settings_store::JsonSettingsStore;
use city_vitals::infrastructure::snapshot_source::SnapshotDataSource;
use city_vitals::presentation::loader::{DashboardLoader, LoadMode};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration, from an explicit file if one is given
    let config = match std::env::args_os().nth(1) {
        Some(path) => load_dashboard_config_from(&PathBuf::from(path))?,
        None => load_dashboard_config()?,
    };

    // Persistence and simulation adapters (infrastructure layer)
    let store = Rc::new(JsonSettingsStore::new(
        config.settings_file.clone(),
        config.max_resolutions,
    ));
    let source = Rc::new(match &config.preview.snapshot {
        Some(path) => SnapshotDataSource::from_file(path)?,
        None => SnapshotDataSource::absent(),
    });
    let mut ui = HeadlessUi::new(config.preview.screen_width, config.preview.screen_height);

    tracing::info!(
        "Previewing dashboard at {}x{} with settings from {}",
        config.preview.screen_width,
        config.preview.screen_height,
        store.path().display()
    );

    // Controller (application layer) driven through the host hooks (presentation layer)
    let frames = config.preview.frames;
    let controller = DashboardController::new(store, source, config);
    let mut loader = DashboardLoader::new(controller);

    loader.on_level_loaded(LoadMode::LoadGame, &mut ui);
    run_frames(&mut loader, &mut ui, frames);

    // Alt+V twice leaves the panel as it was
    loader.on_toggle_shortcut(&mut ui);
    loader.on_toggle_shortcut(&mut ui);

    // Flip one stat through the settings panel and back, rebuilding each time
    for _ in 0..2 {
        toggle_stat_in_settings(&mut loader, &mut ui, StatId::FireHazard);
        if let Some(layout) = loader.controller().layout() {
            tracing::info!(
                rows = layout.rows.len(),
                height = layout.panel_height,
                "Dashboard rebuilt"
            );
        }
    }
    run_frames(&mut loader, &mut ui, 1);

    loader.on_level_unloading(&mut ui);

    Ok(())
}

fn run_frames(loader: &mut DashboardLoader, ui: &mut HeadlessUi, frames: u32) {
    for frame in 0..frames {
        let Some(dashboard) = loader.on_frame(ui) else {
            tracing::info!(frame, "Dashboard hidden");
            continue;
        };
        for reading in &dashboard.readings {
            tracing::info!(
                frame,
                stat = ?reading.stat,
                value = reading.value,
                tooltip = %reading.tooltip,
                "{}",
                dashboard.title
            );
        }
    }
}

/// Clicks the settings button, the stat's checkbox and the settings close
/// button, the way a player would.
fn toggle_stat_in_settings(loader: &mut DashboardLoader, ui: &mut HeadlessUi, stat: StatId) {
    let Some(settings_button) = ui.find("SettingsButton") else {
        tracing::warn!("No dashboard to open settings from");
        return;
    };
    loader.on_click(ui, settings_button);

    let Some(settings_root) = ui.find("CityVitalsWatchSettingsPanel") else {
        return;
    };
    let key = stat.definition().display_name_key;
    let checkbox = ui
        .descendants_where(settings_root, |kind| {
            matches!(kind, WidgetKind::CheckBox { text: LabelText::Localized(k), .. } if *k == key)
        })
        .first()
        .copied();
    if let Some(checkbox) = checkbox {
        loader.on_click(ui, checkbox);
    }
    if let Some(close) = ui.descendant_named(settings_root, "CloseButton") {
        loader.on_click(ui, close);
    }
}
