// Settings domain model - user toggles and per-resolution control positions
use super::stat::{catalog, definition, StatDefinition, StatId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

pub const DEFAULT_PANEL_POSITION: Position = Position::new(10.0, 65.0);
pub const DEFAULT_TOGGLE_BUTTON_POSITION: Position = Position::new(125.0, 12.0);

fn default_panel_position() -> Position {
    DEFAULT_PANEL_POSITION
}

fn default_toggle_button_position() -> Position {
    DEFAULT_TOGGLE_BUTTON_POSITION
}

/// Where the panel and its toggle button sit at one screen resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionLayout {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Relative to the host's root view
    #[serde(default = "default_panel_position")]
    pub panel_position: Position,
    /// Absolute screen position
    #[serde(default = "default_toggle_button_position")]
    pub toggle_button_position: Position,
    #[serde(default = "Utc::now")]
    pub last_used: DateTime<Utc>,
}

impl ResolutionLayout {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            panel_position: DEFAULT_PANEL_POSITION,
            toggle_button_position: DEFAULT_TOGGLE_BUTTON_POSITION,
            last_used: Utc::now(),
        }
    }

    pub fn matches(&self, screen_width: u32, screen_height: u32) -> bool {
        self.screen_width == screen_width && self.screen_height == screen_height
    }
}

fn default_enabled_stats() -> BTreeMap<StatId, bool> {
    catalog().iter().map(|d| (d.id, d.default_enabled)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_panel_visibility: bool,
    pub transparent_when_unhovered: bool,
    enabled_stats: BTreeMap<StatId, bool>,
    pub resolutions: Vec<ResolutionLayout>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_panel_visibility: true,
            transparent_when_unhovered: true,
            enabled_stats: default_enabled_stats(),
            resolutions: Vec::new(),
        }
    }
}

impl Settings {
    /// Fills in catalog defaults for stats missing from the map, e.g. after
    /// loading a file written before a stat existed, and collapses duplicate
    /// resolutions to their most recently used entry.
    pub fn normalize(&mut self) {
        for definition in catalog() {
            self.enabled_stats
                .entry(definition.id)
                .or_insert(definition.default_enabled);
        }

        let loaded = std::mem::take(&mut self.resolutions);
        let total = loaded.len();
        for layout in loaded {
            match self
                .resolutions
                .iter_mut()
                .find(|r| r.matches(layout.screen_width, layout.screen_height))
            {
                Some(existing) => {
                    if layout.last_used > existing.last_used {
                        *existing = layout;
                    }
                }
                None => self.resolutions.push(layout),
            }
        }

        if self.resolutions.len() < total {
            tracing::warn!(
                "Dropped {} duplicate resolution layouts",
                total - self.resolutions.len()
            );
        }
    }

    pub fn is_enabled(&self, stat: StatId) -> bool {
        self.enabled_stats
            .get(&stat)
            .copied()
            .unwrap_or_else(|| definition(stat).default_enabled)
    }

    pub fn set_enabled(&mut self, stat: StatId, enabled: bool) {
        self.enabled_stats.insert(stat, enabled);
    }

    /// Enabled stats in catalog order.
    pub fn enabled_stats(&self) -> Vec<&'static StatDefinition> {
        catalog().iter().filter(|d| self.is_enabled(d.id)).collect()
    }

    /// Returns the layout for a resolution, creating it with defaults on first
    /// sight. Repeated calls return the same entry.
    pub fn get_or_create_resolution(
        &mut self,
        screen_width: u32,
        screen_height: u32,
    ) -> &mut ResolutionLayout {
        let index = match self
            .resolutions
            .iter()
            .position(|r| r.matches(screen_width, screen_height))
        {
            Some(index) => index,
            None => {
                tracing::debug!(
                    "Creating layout for new resolution {}x{}",
                    screen_width,
                    screen_height
                );
                self.resolutions
                    .push(ResolutionLayout::new(screen_width, screen_height));
                self.resolutions.len() - 1
            }
        };

        let layout = &mut self.resolutions[index];
        layout.last_used = Utc::now();
        layout
    }

    /// Keeps the `max` most recently used resolutions, preserving their order.
    /// Returns how many entries were evicted; `max == 0` disables pruning.
    pub fn prune_resolutions(&mut self, max: usize) -> usize {
        if max == 0 || self.resolutions.len() <= max {
            return 0;
        }

        let mut by_recency: Vec<usize> = (0..self.resolutions.len()).collect();
        by_recency.sort_by(|&a, &b| {
            self.resolutions[b]
                .last_used
                .cmp(&self.resolutions[a].last_used)
        });
        let keep: HashSet<usize> = by_recency.into_iter().take(max).collect();

        let before = self.resolutions.len();
        let mut index = 0;
        self.resolutions.retain(|_| {
            let kept = keep.contains(&index);
            index += 1;
            kept
        });
        before - self.resolutions.len()
    }
}
