// Dashboard controller - builds, ticks, tears down and rebuilds the overlay
use crate::application::city_data_source::CityDataSource;
use crate::application::host_ui::{HostUi, HostUiError, WidgetId};
use crate::application::panel::{DashboardPanel, PanelControl, PANEL_TITLE};
use crate::application::settings_panel::{SettingTarget, SettingsPanel};
use crate::application::settings_store::SettingsStore;
use crate::domain::dashboard::{Dashboard, MeterReading};
use crate::domain::layout::{compute_layout, LayoutResult};
use crate::domain::metrics::compute_reading;
use crate::domain::settings::Settings;
use crate::domain::stat::StatId;
use crate::infrastructure::config::DashboardConfig;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to build dashboard panel: {0}")]
    Construction(#[source] HostUiError),

    #[error("failed to build settings panel: {0}")]
    SettingsPanel(#[source] HostUiError),
}

pub struct DashboardController {
    store: Rc<dyn SettingsStore>,
    source: Rc<dyn CityDataSource>,
    config: DashboardConfig,
    settings: Settings,
    panel: Option<DashboardPanel>,
    settings_panel: Option<SettingsPanel>,
}

impl DashboardController {
    /// Loads settings once; later constructions reuse the in-memory copy.
    pub fn new(
        store: Rc<dyn SettingsStore>,
        source: Rc<dyn CityDataSource>,
        config: DashboardConfig,
    ) -> Self {
        let settings = store.load();
        Self {
            store,
            source,
            config,
            settings,
            panel: None,
            settings_panel: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_constructed(&self) -> bool {
        self.panel.is_some()
    }

    pub fn layout(&self) -> Option<&LayoutResult> {
        self.panel.as_ref().map(|p| p.layout())
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel.as_ref().is_some_and(|p| p.is_visible())
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_panel.is_some()
    }

    /// Builds the panel for the host's current resolution. Does nothing if a
    /// panel already exists. On failure no widget of this instance survives.
    pub fn construct(&mut self, ui: &mut dyn HostUi) -> Result<(), DashboardError> {
        if self.panel.is_some() {
            return Ok(());
        }

        let (width, height) = ui.screen_size();
        let resolution = self.settings.get_or_create_resolution(width, height).clone();
        let layout = compute_layout(&self.settings.enabled_stats(), &self.config.layout);

        match DashboardPanel::build(
            ui,
            layout,
            &self.config.layout,
            &resolution,
            self.settings.default_panel_visibility,
        ) {
            Ok(panel) => {
                tracing::debug!(
                    "Dashboard constructed at {}x{} with {} rows",
                    width,
                    height,
                    panel.layout().rows.len()
                );
                self.panel = Some(panel);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Aborting dashboard construction: {}", e);
                Err(DashboardError::Construction(e))
            }
        }
    }

    /// Per-frame update. Returns what the panel shows, or `None` when there is
    /// no visible panel.
    pub fn tick(&mut self, ui: &mut dyn HostUi) -> Option<Dashboard> {
        let panel = self.panel.as_mut()?;
        if !panel.is_visible() {
            return None;
        }

        let opacity = panel.update_opacity(
            ui,
            self.settings.transparent_when_unhovered,
            self.config.unhovered_opacity,
        );

        let counters = self.source.district_counters().unwrap_or_default();
        let readings: Vec<MeterReading> = panel
            .stats()
            .map(|stat| compute_reading(stat, &counters))
            .collect();
        panel.apply_readings(ui, &readings);

        Some(Dashboard::new(PANEL_TITLE, opacity, readings))
    }

    /// Saves final control positions and settings, then destroys the panel and
    /// any open settings panel without applying it.
    pub fn teardown(&mut self, ui: &mut dyn HostUi) {
        if let Some(mut settings_panel) = self.settings_panel.take() {
            settings_panel.hide(ui);
        }

        let Some(panel) = self.panel.take() else {
            return;
        };

        let captured = panel.teardown(ui);
        let (width, height) = ui.screen_size();
        let resolution = self.settings.get_or_create_resolution(width, height);
        if let Some(position) = captured.panel {
            resolution.panel_position = position;
        }
        if let Some(position) = captured.toggle_button {
            resolution.toggle_button_position = position;
        }

        self.store.save(&self.settings);
        tracing::debug!("Dashboard torn down at {}x{}", width, height);
    }

    /// Full teardown followed by full construction.
    pub fn rebuild(&mut self, ui: &mut dyn HostUi) -> Result<(), DashboardError> {
        self.teardown(ui);
        self.construct(ui)
    }

    pub fn toggle_visibility(&mut self, ui: &mut dyn HostUi) {
        if let Some(panel) = self.panel.as_mut() {
            let visible = !panel.is_visible();
            panel.set_visible(ui, visible);
        }
    }

    pub fn open_settings(&mut self, ui: &mut dyn HostUi) -> Result<(), DashboardError> {
        if self.settings_panel.is_some() {
            return Ok(());
        }

        let mut settings_panel =
            SettingsPanel::new(&self.settings, self.config.settings_panel.clone());
        settings_panel
            .show(ui)
            .map_err(DashboardError::SettingsPanel)?;
        self.settings_panel = Some(settings_panel);
        Ok(())
    }

    /// Stages a checkbox change in the open settings panel.
    pub fn set_setting(&mut self, target: SettingTarget, checked: bool) {
        if let Some(settings_panel) = self.settings_panel.as_mut() {
            settings_panel.set_checked(target, checked);
        }
    }

    /// Closes the settings panel, applying staged changes. Any change triggers
    /// the rebuild protocol; returns whether a rebuild happened.
    pub fn close_settings(&mut self, ui: &mut dyn HostUi) -> Result<bool, DashboardError> {
        let Some(mut settings_panel) = self.settings_panel.take() else {
            return Ok(false);
        };

        settings_panel.hide(ui);
        if !settings_panel.apply(&mut self.settings) {
            return Ok(false);
        }

        tracing::debug!("Settings changed, rebuilding dashboard");
        self.rebuild(ui)?;
        Ok(true)
    }

    /// Dispatches a click on any dashboard or settings widget.
    pub fn click(&mut self, ui: &mut dyn HostUi, widget: WidgetId) -> Result<(), DashboardError> {
        if let Some(settings_panel) = self.settings_panel.as_mut() {
            if settings_panel.is_close_button(widget) {
                self.close_settings(ui)?;
                return Ok(());
            }
            if let Some(target) = settings_panel.target_for(widget) {
                let checked = settings_panel.is_checked(target).unwrap_or(false);
                settings_panel.set_checked(target, !checked);
                return Ok(());
            }
        }

        let Some(control) = self.panel.as_ref().and_then(|p| p.control_for(widget)) else {
            return Ok(());
        };

        match control {
            PanelControl::ToggleButton => self.toggle_visibility(ui),
            PanelControl::CloseButton => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.set_visible(ui, false);
                }
            }
            PanelControl::SettingsButton => self.open_settings(ui)?,
            PanelControl::Meter(stat) => self.open_info_view(ui, stat),
        }
        Ok(())
    }

    fn open_info_view(&self, ui: &mut dyn HostUi, stat: StatId) {
        if let Some(index) = stat.definition().target_menu_index {
            ui.open_info_view(index);
        }
    }
}
