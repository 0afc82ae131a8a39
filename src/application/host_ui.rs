// Host UI toolkit trait - the widgets the dashboard places but never draws
use crate::domain::settings::Position;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

/// Label content: a localization key resolved by the host, or fixed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelText {
    Localized(&'static str),
    Literal(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Square menu button showing the statistics icon
    Toggle,
    Close,
    Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Container whose children are positioned relative to it
    Panel,
    Label { text: LabelText, centered: bool },
    /// Slider cloned from one of the host's info view meters
    Meter { template: &'static str, gradient: bool },
    Button { style: ButtonStyle, tooltip: Option<&'static str> },
    /// Drags its parent when grabbed
    DragHandle,
    CheckBox { text: LabelText, checked: bool },
}

/// Position relative to the parent (absolute for root widgets), size and
/// stacking order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub z_order: u32,
}

impl Placement {
    pub fn new(position: Position, width: f32, height: f32, z_order: u32) -> Self {
        Self {
            position,
            width,
            height,
            z_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub name: &'static str,
    pub kind: WidgetKind,
    pub placement: Placement,
}

impl WidgetSpec {
    pub fn new(name: &'static str, kind: WidgetKind, placement: Placement) -> Self {
        Self {
            name,
            kind,
            placement,
        }
    }
}

#[derive(Debug, Error)]
pub enum HostUiError {
    #[error("host template `{0}` is missing")]
    MissingTemplate(String),

    #[error("parent widget {0:?} does not exist")]
    UnknownParent(WidgetId),
}

pub trait HostUi {
    /// Screen resolution the host is currently rendering at
    fn screen_size(&self) -> (u32, u32);

    fn create(&mut self, parent: Option<WidgetId>, spec: WidgetSpec) -> Result<WidgetId, HostUiError>;

    /// Destroys a widget and all of its children. Unknown ids are ignored.
    fn destroy(&mut self, id: WidgetId);

    fn set_meter(&mut self, id: WidgetId, value: f32, tooltip: &str);

    fn set_visible(&mut self, id: WidgetId, visible: bool);

    fn set_opacity(&mut self, id: WidgetId, opacity: f32);

    /// Current position in the same frame the widget was placed in
    fn position(&self, id: WidgetId) -> Option<Position>;

    fn contains_pointer(&self, id: WidgetId) -> bool;

    fn open_info_view(&mut self, menu_index: u8);
}
