// Settings panel - checkbox model for toggling the dashboard's stats
use crate::application::host_ui::{
    ButtonStyle, HostUi, HostUiError, LabelText, Placement, WidgetId, WidgetKind, WidgetSpec,
};
use crate::domain::layout::Padding;
use crate::domain::settings::{Position, Settings};
use crate::domain::stat::{catalog, StatId};
use serde::Deserialize;

pub const SETTINGS_TITLE: &str = "City Vitals Settings";
pub const DEFAULT_VISIBILITY_LABEL: &str = "Default Visibility";
pub const TRANSPARENT_UNHOVERED_LABEL: &str = "Transparent Unhovered";

const CLOSE_BUTTON_SIZE: f32 = 32.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsPanelMetrics {
    pub width: f32,
    pub title_bar_height: f32,
    /// Extra height below the last checkbox
    pub base_padding: f32,
    pub checkbox_height: f32,
    pub padding: Padding,
}

impl Default for SettingsPanelMetrics {
    fn default() -> Self {
        Self {
            width: 215.0,
            title_bar_height: 40.0,
            base_padding: 8.0,
            checkbox_height: 20.0,
            padding: Padding::new(0.0, 20.0),
        }
    }
}

/// What a checkbox row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingTarget {
    DefaultVisibility,
    TransparentUnhovered,
    Stat(StatId),
}

impl SettingTarget {
    fn label(self) -> LabelText {
        match self {
            SettingTarget::DefaultVisibility => LabelText::Literal(DEFAULT_VISIBILITY_LABEL),
            SettingTarget::TransparentUnhovered => LabelText::Literal(TRANSPARENT_UNHOVERED_LABEL),
            SettingTarget::Stat(stat) => LabelText::Localized(stat.definition().display_name_key),
        }
    }

    fn read(self, settings: &Settings) -> bool {
        match self {
            SettingTarget::DefaultVisibility => settings.default_panel_visibility,
            SettingTarget::TransparentUnhovered => settings.transparent_when_unhovered,
            SettingTarget::Stat(stat) => settings.is_enabled(stat),
        }
    }

    fn write(self, settings: &mut Settings, value: bool) {
        match self {
            SettingTarget::DefaultVisibility => settings.default_panel_visibility = value,
            SettingTarget::TransparentUnhovered => settings.transparent_when_unhovered = value,
            SettingTarget::Stat(stat) => settings.set_enabled(stat, value),
        }
    }
}

#[derive(Debug, Clone)]
struct SettingsRow {
    target: SettingTarget,
    checked: bool,
    widget: Option<WidgetId>,
}

/// Staged checkbox state for the settings UI. Nothing reaches [`Settings`]
/// until [`SettingsPanel::apply`] runs on close.
#[derive(Debug)]
pub struct SettingsPanel {
    rows: Vec<SettingsRow>,
    metrics: SettingsPanelMetrics,
    root: Option<WidgetId>,
    close_button: Option<WidgetId>,
    height: f32,
}

impl SettingsPanel {
    pub fn new(settings: &Settings, metrics: SettingsPanelMetrics) -> Self {
        let targets = [SettingTarget::DefaultVisibility, SettingTarget::TransparentUnhovered]
            .into_iter()
            .chain(catalog().iter().map(|d| SettingTarget::Stat(d.id)));

        let rows: Vec<SettingsRow> = targets
            .map(|target| SettingsRow {
                target,
                checked: target.read(settings),
                widget: None,
            })
            .collect();

        let row_height = metrics.checkbox_height + metrics.padding.vertical();
        let height =
            metrics.title_bar_height + metrics.base_padding + row_height * rows.len() as f32;

        Self {
            rows,
            metrics,
            root: None,
            close_button: None,
            height,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn targets(&self) -> impl Iterator<Item = SettingTarget> + '_ {
        self.rows.iter().map(|r| r.target)
    }

    pub fn is_checked(&self, target: SettingTarget) -> Option<bool> {
        self.rows.iter().find(|r| r.target == target).map(|r| r.checked)
    }

    pub fn set_checked(&mut self, target: SettingTarget, checked: bool) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.target == target) {
            row.checked = checked;
        }
    }

    pub fn is_close_button(&self, widget: WidgetId) -> bool {
        self.close_button == Some(widget)
    }

    /// Which setting a checkbox widget controls.
    pub fn target_for(&self, widget: WidgetId) -> Option<SettingTarget> {
        self.rows
            .iter()
            .find(|r| r.widget == Some(widget))
            .map(|r| r.target)
    }

    /// Creates the panel's widgets centred on screen. On failure nothing is
    /// left behind.
    pub fn show(&mut self, ui: &mut dyn HostUi) -> Result<(), HostUiError> {
        if self.root.is_some() {
            return Ok(());
        }

        let (screen_width, screen_height) = ui.screen_size();
        let width = self.metrics.width;
        let origin = Position::new(
            (screen_width as f32 - width) / 2.0,
            (screen_height as f32 - self.height) / 2.0,
        );

        let root = ui.create(
            None,
            WidgetSpec::new(
                "CityVitalsWatchSettingsPanel",
                WidgetKind::Panel,
                Placement::new(origin, width, self.height, 0),
            ),
        )?;

        if let Err(e) = self.build_children(ui, root) {
            ui.destroy(root);
            for row in &mut self.rows {
                row.widget = None;
            }
            self.close_button = None;
            return Err(e);
        }

        self.root = Some(root);
        Ok(())
    }

    fn build_children(&mut self, ui: &mut dyn HostUi, root: WidgetId) -> Result<(), HostUiError> {
        let metrics = &self.metrics;
        let width = metrics.width;

        ui.create(
            Some(root),
            WidgetSpec::new(
                "DragHandler",
                WidgetKind::DragHandle,
                Placement::new(Position::default(), width, metrics.title_bar_height, 0),
            ),
        )?;
        self.close_button = Some(ui.create(
            Some(root),
            WidgetSpec::new(
                "CloseButton",
                WidgetKind::Button {
                    style: ButtonStyle::Close,
                    tooltip: None,
                },
                Placement::new(
                    Position::new(width - CLOSE_BUTTON_SIZE, 2.0),
                    CLOSE_BUTTON_SIZE,
                    CLOSE_BUTTON_SIZE,
                    1,
                ),
            ),
        )?);
        ui.create(
            Some(root),
            WidgetSpec::new(
                "Title",
                WidgetKind::Label {
                    text: LabelText::Literal(SETTINGS_TITLE),
                    centered: true,
                },
                Placement::new(Position::new(0.0, 10.0), width, metrics.checkbox_height, 0),
            ),
        )?;

        let content_top = metrics.title_bar_height + 5.0;
        let row_height = metrics.checkbox_height + metrics.padding.vertical();
        let content = ui.create(
            Some(root),
            WidgetSpec::new(
                "ControlPanel",
                WidgetKind::Panel,
                Placement::new(
                    Position::new(0.0, content_top),
                    width,
                    row_height * self.rows.len() as f32,
                    0,
                ),
            ),
        )?;

        let mut cursor = 0.0;
        for (index, row) in self.rows.iter_mut().enumerate() {
            let placement = Placement::new(
                Position::new(8.0, cursor + metrics.padding.top),
                width - 24.0,
                metrics.checkbox_height,
                index as u32 + 1,
            );
            row.widget = Some(ui.create(
                Some(content),
                WidgetSpec::new(
                    "CheckBox",
                    WidgetKind::CheckBox {
                        text: row.target.label(),
                        checked: row.checked,
                    },
                    placement,
                ),
            )?);
            cursor += row_height;
        }

        Ok(())
    }

    /// Destroys the panel's widgets, keeping the staged checkbox state.
    pub fn hide(&mut self, ui: &mut dyn HostUi) {
        if let Some(root) = self.root.take() {
            ui.destroy(root);
        }
        self.close_button = None;
        for row in &mut self.rows {
            row.widget = None;
        }
    }

    /// Writes every checkbox that differs from `settings` back into it.
    /// Returns whether anything changed.
    pub fn apply(&self, settings: &mut Settings) -> bool {
        let mut changed = false;
        for row in &self.rows {
            if row.target.read(settings) != row.checked {
                row.target.write(settings, row.checked);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_mirror_settings_in_catalog_order() {
        let settings = Settings::default();
        let panel = SettingsPanel::new(&settings, SettingsPanelMetrics::default());

        let targets: Vec<SettingTarget> = panel.targets().collect();
        assert_eq!(targets.len(), 2 + catalog().len());
        assert_eq!(targets[0], SettingTarget::DefaultVisibility);
        assert_eq!(targets[1], SettingTarget::TransparentUnhovered);
        assert_eq!(targets[2], SettingTarget::Stat(StatId::ElectricityAvailability));
        assert_eq!(targets.last(), Some(&SettingTarget::Stat(StatId::JobAvailability)));

        assert_eq!(panel.is_checked(SettingTarget::Stat(StatId::WaterAvailability)), Some(true));
        assert_eq!(panel.is_checked(SettingTarget::Stat(StatId::FireHazard)), Some(false));
    }

    #[test]
    fn test_height_grows_per_checkbox() {
        let metrics = SettingsPanelMetrics::default();
        let panel = SettingsPanel::new(&Settings::default(), metrics.clone());

        let rows = (2 + catalog().len()) as f32;
        assert_eq!(
            panel.height(),
            metrics.title_bar_height + metrics.base_padding + rows * (20.0 + 0.0 + 20.0)
        );
    }

    #[test]
    fn test_apply_without_changes() {
        let mut settings = Settings::default();
        let panel = SettingsPanel::new(&settings, SettingsPanelMetrics::default());

        assert!(!panel.apply(&mut settings));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_apply_writes_back_changes() {
        let mut settings = Settings::default();
        let mut panel = SettingsPanel::new(&settings, SettingsPanelMetrics::default());

        panel.set_checked(SettingTarget::Stat(StatId::CrimeRate), true);
        panel.set_checked(SettingTarget::TransparentUnhovered, false);

        assert!(panel.apply(&mut settings));
        assert!(settings.is_enabled(StatId::CrimeRate));
        assert!(!settings.transparent_when_unhovered);
        assert!(settings.default_panel_visibility);
    }

    #[test]
    fn test_toggling_back_is_not_a_change() {
        let mut settings = Settings::default();
        let mut panel = SettingsPanel::new(&settings, SettingsPanelMetrics::default());

        panel.set_checked(SettingTarget::Stat(StatId::Employment), false);
        panel.set_checked(SettingTarget::Stat(StatId::Employment), true);

        assert!(!panel.apply(&mut settings));
    }
}
