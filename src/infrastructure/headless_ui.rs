// Headless host UI - an in-memory widget tree standing in for the game's toolkit
use crate::application::host_ui::{HostUi, HostUiError, Placement, WidgetId, WidgetKind, WidgetSpec};
use crate::domain::settings::Position;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWidget {
    pub name: &'static str,
    pub kind: WidgetKind,
    pub parent: Option<WidgetId>,
    pub placement: Placement,
    pub visible: bool,
    pub opacity: f32,
    pub value: f32,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Created(WidgetId, &'static str),
    Destroyed(WidgetId, &'static str),
    InfoViewOpened(u8),
}

/// Records every widget the dashboard creates. Meter templates are all
/// available unless removed with [`HeadlessUi::without_template`].
#[derive(Debug)]
pub struct HeadlessUi {
    screen: (u32, u32),
    next_id: u32,
    widgets: BTreeMap<WidgetId, HeadlessWidget>,
    missing_templates: HashSet<&'static str>,
    pointer: Option<Position>,
    events: Vec<UiEvent>,
}

impl HeadlessUi {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen: (screen_width, screen_height),
            next_id: 1,
            widgets: BTreeMap::new(),
            missing_templates: HashSet::new(),
            pointer: None,
            events: Vec::new(),
        }
    }

    pub fn without_template(mut self, template: &'static str) -> Self {
        self.missing_templates.insert(template);
        self
    }

    pub fn set_pointer(&mut self, pointer: Option<Position>) {
        self.pointer = pointer;
    }

    /// Simulates the user dragging a widget.
    pub fn move_widget(&mut self, id: WidgetId, position: Position) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.placement.position = position;
        }
    }

    pub fn widget(&self, id: WidgetId) -> Option<&HeadlessWidget> {
        self.widgets.get(&id)
    }

    /// First live widget with this name, in creation order.
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.widgets
            .iter()
            .find(|(_, w)| w.name == name)
            .map(|(id, _)| *id)
    }

    pub fn live_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    fn is_descendant(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = self.widgets.get(&id).and_then(|w| w.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.widgets.get(&parent).and_then(|w| w.parent);
        }
        false
    }

    /// Descendants of `ancestor` whose kind matches, in creation order.
    pub fn descendants_where(
        &self,
        ancestor: WidgetId,
        predicate: impl Fn(&WidgetKind) -> bool,
    ) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|(id, w)| predicate(&w.kind) && self.is_descendant(**id, ancestor))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn descendant_named(&self, ancestor: WidgetId, name: &str) -> Option<WidgetId> {
        self.widgets
            .iter()
            .find(|(id, w)| w.name == name && self.is_descendant(**id, ancestor))
            .map(|(id, _)| *id)
    }

    fn absolute_position(&self, id: WidgetId) -> Option<Position> {
        let widget = self.widgets.get(&id)?;
        let mut position = widget.placement.position;
        let mut current = widget.parent;
        while let Some(parent) = current {
            let parent = self.widgets.get(&parent)?;
            position.x += parent.placement.position.x;
            position.y += parent.placement.position.y;
            current = parent.parent;
        }
        Some(position)
    }
}

impl HostUi for HeadlessUi {
    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn create(&mut self, parent: Option<WidgetId>, spec: WidgetSpec) -> Result<WidgetId, HostUiError> {
        if let Some(parent) = parent {
            if !self.widgets.contains_key(&parent) {
                return Err(HostUiError::UnknownParent(parent));
            }
        }
        if let WidgetKind::Meter { template, .. } = &spec.kind {
            if self.missing_templates.contains(template) {
                return Err(HostUiError::MissingTemplate(template.to_string()));
            }
        }

        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.widgets.insert(
            id,
            HeadlessWidget {
                name: spec.name,
                kind: spec.kind,
                parent,
                placement: spec.placement,
                visible: true,
                opacity: 1.0,
                value: 0.0,
                tooltip: String::new(),
            },
        );
        self.events.push(UiEvent::Created(id, spec.name));
        Ok(id)
    }

    fn destroy(&mut self, id: WidgetId) {
        let children: Vec<WidgetId> = self
            .widgets
            .iter()
            .filter(|(_, w)| w.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.destroy(child);
        }

        if let Some(widget) = self.widgets.remove(&id) {
            self.events.push(UiEvent::Destroyed(id, widget.name));
        }
    }

    fn set_meter(&mut self, id: WidgetId, value: f32, tooltip: &str) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.value = value;
            widget.tooltip = tooltip.to_string();
        }
    }

    fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.visible = visible;
        }
    }

    fn set_opacity(&mut self, id: WidgetId, opacity: f32) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.opacity = opacity;
        }
    }

    fn position(&self, id: WidgetId) -> Option<Position> {
        self.widgets.get(&id).map(|w| w.placement.position)
    }

    fn contains_pointer(&self, id: WidgetId) -> bool {
        let (Some(pointer), Some(origin), Some(widget)) =
            (self.pointer, self.absolute_position(id), self.widgets.get(&id))
        else {
            return false;
        };

        pointer.x >= origin.x
            && pointer.x < origin.x + widget.placement.width
            && pointer.y >= origin.y
            && pointer.y < origin.y + widget.placement.height
    }

    fn open_info_view(&mut self, menu_index: u8) {
        self.events.push(UiEvent::InfoViewOpened(menu_index));
    }
}
