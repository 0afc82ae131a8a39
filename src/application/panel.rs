// Dashboard panel - one built instance of the overlay and the widgets it owns
use crate::application::host_ui::{
    ButtonStyle, HostUi, HostUiError, LabelText, Placement, WidgetId, WidgetKind, WidgetSpec,
};
use crate::domain::dashboard::MeterReading;
use crate::domain::layout::{LayoutMetrics, LayoutResult, RowKind};
use crate::domain::settings::{Position, ResolutionLayout};
use crate::domain::stat::{StatDefinition, StatId};

pub const PANEL_TITLE: &str = "City Vitals";

const TOGGLE_BUTTON_SIZE: f32 = 40.0;
const HEADER_BUTTON_SIZE: f32 = 32.0;
const DRAG_HANDLE_Z_ORDER: u32 = 1000;

/// A clickable control on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelControl {
    ToggleButton,
    CloseButton,
    SettingsButton,
    Meter(StatId),
}

/// Positions read back from the host when the panel is torn down. `None`
/// when the host no longer knows the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturedPositions {
    pub panel: Option<Position>,
    pub toggle_button: Option<Position>,
}

#[derive(Debug, Clone, Copy)]
struct MeterBinding {
    stat: &'static StatDefinition,
    widget: WidgetId,
}

struct Widgets {
    root: WidgetId,
    toggle_button: WidgetId,
    close_button: WidgetId,
    settings_button: WidgetId,
    meters: Vec<MeterBinding>,
}

#[derive(Debug)]
pub struct DashboardPanel {
    root: WidgetId,
    toggle_button: WidgetId,
    close_button: WidgetId,
    settings_button: WidgetId,
    meters: Vec<MeterBinding>,
    layout: LayoutResult,
    visible: bool,
    opacity: f32,
}

fn create(
    ui: &mut dyn HostUi,
    created: &mut Vec<WidgetId>,
    parent: Option<WidgetId>,
    spec: WidgetSpec,
) -> Result<WidgetId, HostUiError> {
    let id = ui.create(parent, spec)?;
    created.push(id);
    Ok(id)
}

impl DashboardPanel {
    /// Creates every widget for `layout`. If the host rejects any of them, all
    /// widgets created so far are destroyed before the error is returned.
    pub fn build(
        ui: &mut dyn HostUi,
        layout: LayoutResult,
        metrics: &LayoutMetrics,
        resolution: &ResolutionLayout,
        visible: bool,
    ) -> Result<Self, HostUiError> {
        let mut created = Vec::new();
        let widgets = match Self::build_widgets(ui, &layout, metrics, resolution, &mut created) {
            Ok(widgets) => widgets,
            Err(e) => {
                for id in created.into_iter().rev() {
                    ui.destroy(id);
                }
                return Err(e);
            }
        };

        ui.set_visible(widgets.root, visible);

        Ok(Self {
            root: widgets.root,
            toggle_button: widgets.toggle_button,
            close_button: widgets.close_button,
            settings_button: widgets.settings_button,
            meters: widgets.meters,
            layout,
            visible,
            opacity: 1.0,
        })
    }

    fn build_widgets(
        ui: &mut dyn HostUi,
        layout: &LayoutResult,
        metrics: &LayoutMetrics,
        resolution: &ResolutionLayout,
        created: &mut Vec<WidgetId>,
    ) -> Result<Widgets, HostUiError> {
        let width = metrics.panel_width;

        // The toggle button lives at the root so it stays clickable while the panel is hidden
        let toggle_button = create(
            ui,
            created,
            None,
            WidgetSpec::new(
                "CityVitalsWatchButton",
                WidgetKind::Button {
                    style: ButtonStyle::Toggle,
                    tooltip: Some(PANEL_TITLE),
                },
                Placement::new(
                    resolution.toggle_button_position,
                    TOGGLE_BUTTON_SIZE,
                    TOGGLE_BUTTON_SIZE,
                    0,
                ),
            ),
        )?;
        create(
            ui,
            created,
            Some(toggle_button),
            WidgetSpec::new(
                "CityVitalsWatchButtonDragHandler",
                WidgetKind::DragHandle,
                Placement::new(Position::default(), TOGGLE_BUTTON_SIZE, TOGGLE_BUTTON_SIZE, 0),
            ),
        )?;

        let root = create(
            ui,
            created,
            None,
            WidgetSpec::new(
                "CityVitalsWatchPanel",
                WidgetKind::Panel,
                Placement::new(resolution.panel_position, width, layout.panel_height, 0),
            ),
        )?;
        create(
            ui,
            created,
            Some(root),
            WidgetSpec::new(
                "DragHandler",
                WidgetKind::DragHandle,
                Placement::new(
                    Position::default(),
                    width,
                    metrics.title_bar_height,
                    DRAG_HANDLE_Z_ORDER,
                ),
            ),
        )?;
        let close_button = create(
            ui,
            created,
            Some(root),
            WidgetSpec::new(
                "CloseButton",
                WidgetKind::Button {
                    style: ButtonStyle::Close,
                    tooltip: None,
                },
                Placement::new(
                    Position::new(width - HEADER_BUTTON_SIZE, 2.0),
                    HEADER_BUTTON_SIZE,
                    HEADER_BUTTON_SIZE,
                    DRAG_HANDLE_Z_ORDER + 1,
                ),
            ),
        )?;
        let settings_button = create(
            ui,
            created,
            Some(root),
            WidgetSpec::new(
                "SettingsButton",
                WidgetKind::Button {
                    style: ButtonStyle::Settings,
                    tooltip: None,
                },
                Placement::new(
                    Position::new(width - 2.0 * HEADER_BUTTON_SIZE, 2.0),
                    HEADER_BUTTON_SIZE,
                    HEADER_BUTTON_SIZE,
                    DRAG_HANDLE_Z_ORDER + 1,
                ),
            ),
        )?;
        create(
            ui,
            created,
            Some(root),
            WidgetSpec::new(
                "Title",
                WidgetKind::Label {
                    text: LabelText::Literal(PANEL_TITLE),
                    centered: true,
                },
                Placement::new(Position::new(0.0, 10.0), width, metrics.label_height, 0),
            ),
        )?;

        let content = create(
            ui,
            created,
            Some(root),
            WidgetSpec::new(
                "ControlPanel",
                WidgetKind::Panel,
                Placement::new(
                    Position::new(0.0, metrics.start_offset),
                    width,
                    layout.content_height,
                    0,
                ),
            ),
        )?;

        let row_width = width - 2.0 * metrics.row_inset;
        let mut meters = Vec::with_capacity(layout.rows.len() / 2);
        for row in &layout.rows {
            let position = Position::new(metrics.row_inset, row.vertical_offset - metrics.start_offset);
            let placement = Placement::new(position, row_width, row.height, row.z_order);
            match row.kind {
                RowKind::Label => {
                    create(
                        ui,
                        created,
                        Some(content),
                        WidgetSpec::new(
                            row.stat.display_name_key,
                            WidgetKind::Label {
                                text: LabelText::Localized(row.stat.display_name_key),
                                centered: false,
                            },
                            placement,
                        ),
                    )?;
                }
                RowKind::Meter => {
                    let widget = create(
                        ui,
                        created,
                        Some(content),
                        WidgetSpec::new(
                            row.stat.meter_template_key,
                            WidgetKind::Meter {
                                template: row.stat.meter_template_key,
                                gradient: row.stat.uses_gradient_style,
                            },
                            placement,
                        ),
                    )?;
                    meters.push(MeterBinding {
                        stat: row.stat,
                        widget,
                    });
                }
            }
        }

        tracing::debug!(
            "Built dashboard panel with {} meters, height {}",
            meters.len(),
            layout.panel_height
        );

        Ok(Widgets {
            root,
            toggle_button,
            close_button,
            settings_button,
            meters,
        })
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Stats shown on this panel, in render order.
    pub fn stats(&self) -> impl Iterator<Item = &'static StatDefinition> + '_ {
        self.meters.iter().map(|m| m.stat)
    }

    pub fn set_visible(&mut self, ui: &mut dyn HostUi, visible: bool) {
        self.visible = visible;
        ui.set_visible(self.root, visible);
    }

    pub fn control_for(&self, widget: WidgetId) -> Option<PanelControl> {
        if widget == self.toggle_button {
            Some(PanelControl::ToggleButton)
        } else if widget == self.close_button {
            Some(PanelControl::CloseButton)
        } else if widget == self.settings_button {
            Some(PanelControl::SettingsButton)
        } else {
            self.meters
                .iter()
                .find(|m| m.widget == widget)
                .map(|m| PanelControl::Meter(m.stat.id))
        }
    }

    /// Pushes readings onto the meter widgets. Readings are matched by stat;
    /// stats without a reading are left untouched.
    pub fn apply_readings(&self, ui: &mut dyn HostUi, readings: &[MeterReading]) {
        for meter in &self.meters {
            if let Some(reading) = readings.iter().find(|r| r.stat == meter.stat.id) {
                ui.set_meter(meter.widget, reading.value, &reading.tooltip);
            }
        }
    }

    /// Full opacity while hovered or when transparency is off; otherwise
    /// `unhovered_opacity`. The host is only told about changes.
    pub fn update_opacity(
        &mut self,
        ui: &mut dyn HostUi,
        transparent_when_unhovered: bool,
        unhovered_opacity: f32,
    ) -> f32 {
        let target = if !transparent_when_unhovered || ui.contains_pointer(self.root) {
            1.0
        } else {
            unhovered_opacity
        };

        if target != self.opacity {
            self.opacity = target;
            ui.set_opacity(self.root, target);
        }
        self.opacity
    }

    /// Reads final positions back from the host and destroys every widget.
    pub fn teardown(self, ui: &mut dyn HostUi) -> CapturedPositions {
        let captured = CapturedPositions {
            panel: ui.position(self.root),
            toggle_button: ui.position(self.toggle_button),
        };

        ui.set_visible(self.root, false);
        ui.destroy(self.root);
        ui.destroy(self.toggle_button);

        captured
    }
}
