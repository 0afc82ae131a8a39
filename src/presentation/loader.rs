// Host lifecycle hooks - create the dashboard when a city loads, destroy it on unload
use crate::application::dashboard_controller::DashboardController;
use crate::application::host_ui::{HostUi, WidgetId};
use crate::domain::dashboard::Dashboard;

/// What the host is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    NewGame,
    LoadGame,
    NewMap,
    LoadMap,
    NewAsset,
    LoadAsset,
}

impl LoadMode {
    /// The dashboard only makes sense while a city simulation is running.
    pub fn is_gameplay(self) -> bool {
        matches!(self, LoadMode::NewGame | LoadMode::LoadGame)
    }
}

pub struct DashboardLoader {
    controller: DashboardController,
}

impl DashboardLoader {
    pub fn new(controller: DashboardController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    pub fn on_level_loaded(&mut self, mode: LoadMode, ui: &mut dyn HostUi) {
        if !mode.is_gameplay() {
            tracing::debug!("Skipping dashboard for {:?}", mode);
            return;
        }

        // Construction errors are logged by the controller; the level keeps running without a panel
        let _ = self.controller.construct(ui);
    }

    pub fn on_level_unloading(&mut self, ui: &mut dyn HostUi) {
        self.controller.teardown(ui);
    }

    pub fn on_frame(&mut self, ui: &mut dyn HostUi) -> Option<Dashboard> {
        self.controller.tick(ui)
    }

    /// Alt+V as delivered by the host's input layer.
    pub fn on_toggle_shortcut(&mut self, ui: &mut dyn HostUi) {
        self.controller.toggle_visibility(ui);
    }

    pub fn on_click(&mut self, ui: &mut dyn HostUi, widget: WidgetId) {
        if let Err(e) = self.controller.click(ui, widget) {
            tracing::error!("Click on {:?} failed: {}", widget, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::host_ui::{LabelText, WidgetKind};
    use crate::application::settings_store::testing::MemorySettingsStore;
    use crate::domain::stat::StatId;
    use crate::domain::settings::Settings;
    use crate::infrastructure::config::DashboardConfig;
    use crate::infrastructure::headless_ui::HeadlessUi;
    use crate::infrastructure::snapshot_source::SnapshotDataSource;
    use std::rc::Rc;

    fn loader(store: Rc<MemorySettingsStore>) -> DashboardLoader {
        let source = Rc::new(SnapshotDataSource::absent());
        DashboardLoader::new(DashboardController::new(store, source, DashboardConfig::default()))
    }

    #[test]
    fn test_only_gameplay_creates_panel() {
        let store = Rc::new(MemorySettingsStore::default());
        let mut ui = HeadlessUi::new(1920, 1080);

        let mut editor = loader(store.clone());
        editor.on_level_loaded(LoadMode::LoadMap, &mut ui);
        assert!(!editor.controller().is_constructed());

        let mut game = loader(store);
        game.on_level_loaded(LoadMode::NewGame, &mut ui);
        assert!(game.controller().is_constructed());
    }

    #[test]
    fn test_unload_persists_and_releases() {
        let store = Rc::new(MemorySettingsStore::with_settings(Settings::default()));
        let mut ui = HeadlessUi::new(1920, 1080);
        let mut loader = loader(store.clone());

        loader.on_level_loaded(LoadMode::LoadGame, &mut ui);
        assert!(loader.on_frame(&mut ui).is_some());
        loader.on_toggle_shortcut(&mut ui);
        assert!(loader.on_frame(&mut ui).is_none());

        loader.on_level_unloading(&mut ui);
        assert_eq!(ui.live_count(), 0);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_failed_construction_leaves_level_running() {
        let store = Rc::new(MemorySettingsStore::default());
        let mut ui = HeadlessUi::new(1920, 1080).without_template("WaterMeter");
        let mut loader = loader(store.clone());

        loader.on_level_loaded(LoadMode::LoadGame, &mut ui);
        assert!(!loader.controller().is_constructed());
        assert!(loader.on_frame(&mut ui).is_none());

        // Nothing was built, so there is nothing to persist
        loader.on_level_unloading(&mut ui);
        assert_eq!(store.saves(), 0);
    }

    fn toggle_in_settings(loader: &mut DashboardLoader, ui: &mut HeadlessUi, stat: StatId) {
        let settings_button = ui.find("SettingsButton").unwrap();
        loader.on_click(ui, settings_button);

        let settings_root = ui.find("CityVitalsWatchSettingsPanel").unwrap();
        let key = stat.definition().display_name_key;
        let checkbox = ui.descendants_where(settings_root, |kind| {
            matches!(kind, WidgetKind::CheckBox { text: LabelText::Localized(k), .. } if *k == key)
        })[0];
        loader.on_click(ui, checkbox);

        let close = ui.descendant_named(settings_root, "CloseButton").unwrap();
        loader.on_click(ui, close);
    }

    fn shows(loader: &DashboardLoader, stat: StatId) -> bool {
        loader
            .controller()
            .layout()
            .unwrap()
            .rows
            .iter()
            .any(|r| r.stat.id == stat)
    }

    #[test]
    fn test_settings_round_trip_through_clicks() {
        let store = Rc::new(MemorySettingsStore::with_settings(Settings::default()));
        let mut ui = HeadlessUi::new(1920, 1080);
        let mut loader = loader(store.clone());
        loader.on_level_loaded(LoadMode::LoadGame, &mut ui);
        assert!(!shows(&loader, StatId::FireHazard));

        toggle_in_settings(&mut loader, &mut ui, StatId::FireHazard);
        assert!(!loader.controller().is_settings_open());
        assert!(shows(&loader, StatId::FireHazard));
        assert_eq!(store.saves(), 1);

        toggle_in_settings(&mut loader, &mut ui, StatId::FireHazard);
        assert!(!shows(&loader, StatId::FireHazard));
        assert_eq!(store.saves(), 2);
        assert!(!store.stored().unwrap().is_enabled(StatId::FireHazard));
    }

    #[test]
    fn test_toggle_shortcut_twice_restores_visibility() {
        let store = Rc::new(MemorySettingsStore::default());
        let mut ui = HeadlessUi::new(1920, 1080);
        let mut loader = loader(store);
        loader.on_level_loaded(LoadMode::LoadGame, &mut ui);

        loader.on_toggle_shortcut(&mut ui);
        assert!(!loader.controller().is_panel_visible());
        loader.on_toggle_shortcut(&mut ui);
        assert!(loader.controller().is_panel_visible());
    }
}
