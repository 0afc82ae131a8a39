// Layout engine - stacks enabled stats into label and meter rows
use super::stat::StatDefinition;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Fixed dimensions the dashboard panel is laid out with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub panel_width: f32,
    pub title_bar_height: f32,
    /// Offset of the first row below the panel's top edge
    pub start_offset: f32,
    pub padding: Padding,
    /// Horizontal inset of rows inside the panel
    pub row_inset: f32,
    pub label_height: f32,
    pub meter_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            panel_width: 275.0,
            title_bar_height: 40.0,
            start_offset: 45.0,
            padding: Padding::new(0.0, 5.0),
            row_inset: 8.0,
            label_height: 18.0,
            meter_height: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Label,
    Meter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    pub stat: &'static StatDefinition,
    pub kind: RowKind,
    /// Top edge relative to the panel
    pub vertical_offset: f32,
    pub height: f32,
    pub z_order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub rows: Vec<LayoutRow>,
    /// Height of the row container
    pub content_height: f32,
    /// Title bar plus every row with its padding
    pub panel_height: f32,
}

/// Lays out the given stats top to bottom in catalog order.
///
/// Each stat gets a label row followed by a meter row. Rows are never reordered
/// or dropped, and the panel grows with every row; there is no maximum height.
pub fn compute_layout(enabled: &[&'static StatDefinition], metrics: &LayoutMetrics) -> LayoutResult {
    let mut ordered = enabled.to_vec();
    ordered.sort_by_key(|d| d.id);
    ordered.dedup_by_key(|d| d.id);

    let mut rows = Vec::with_capacity(ordered.len() * 2);
    let mut cursor = 0.0;
    let mut z_order = 1;

    for stat in ordered {
        for (kind, height) in [
            (RowKind::Label, metrics.label_height),
            (RowKind::Meter, metrics.meter_height),
        ] {
            rows.push(LayoutRow {
                stat,
                kind,
                vertical_offset: metrics.start_offset + cursor + metrics.padding.top,
                height,
                z_order,
            });
            cursor += height + metrics.padding.vertical();
            z_order += 1;
        }
    }

    LayoutResult {
        rows,
        content_height: cursor,
        panel_height: metrics.title_bar_height + cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stat::{catalog, definition, StatId};

    #[test]
    fn test_two_rows_per_stat() {
        let metrics = LayoutMetrics::default();
        let enabled = vec![
            definition(StatId::WaterAvailability),
            definition(StatId::CemeteryUsage),
            definition(StatId::Employment),
        ];

        let layout = compute_layout(&enabled, &metrics);

        assert_eq!(layout.rows.len(), 6);
        let expected = 3.0 * (metrics.label_height + metrics.meter_height + 2.0 * 5.0);
        assert_eq!(layout.content_height, expected);
        assert_eq!(layout.panel_height, metrics.title_bar_height + expected);
    }

    #[test]
    fn test_rows_follow_catalog_order_not_enable_order() {
        let metrics = LayoutMetrics::default();
        let enabled = vec![
            definition(StatId::Employment),
            definition(StatId::ElectricityAvailability),
            definition(StatId::CrimeRate),
        ];

        let layout = compute_layout(&enabled, &metrics);
        let order: Vec<(StatId, RowKind)> = layout.rows.iter().map(|r| (r.stat.id, r.kind)).collect();

        assert_eq!(
            order,
            vec![
                (StatId::ElectricityAvailability, RowKind::Label),
                (StatId::ElectricityAvailability, RowKind::Meter),
                (StatId::CrimeRate, RowKind::Label),
                (StatId::CrimeRate, RowKind::Meter),
                (StatId::Employment, RowKind::Label),
                (StatId::Employment, RowKind::Meter),
            ]
        );
    }

    #[test]
    fn test_offsets_and_z_order_accumulate() {
        let metrics = LayoutMetrics {
            padding: Padding::new(2.0, 3.0),
            ..LayoutMetrics::default()
        };
        let enabled = vec![
            definition(StatId::WaterAvailability),
            definition(StatId::SewageTreatment),
        ];

        let layout = compute_layout(&enabled, &metrics);
        let offsets: Vec<f32> = layout.rows.iter().map(|r| r.vertical_offset).collect();
        let z: Vec<u32> = layout.rows.iter().map(|r| r.z_order).collect();

        // label 18 + 5, meter 12 + 5
        assert_eq!(offsets, vec![47.0, 70.0, 87.0, 110.0]);
        assert_eq!(z, vec![1, 2, 3, 4]);
        assert_eq!(layout.rows.iter().filter(|r| r.kind == RowKind::Meter).count(), 2);
    }

    #[test]
    fn test_empty_selection_is_title_bar_only() {
        let metrics = LayoutMetrics::default();
        let layout = compute_layout(&[], &metrics);

        assert!(layout.rows.is_empty());
        assert_eq!(layout.content_height, 0.0);
        assert_eq!(layout.panel_height, metrics.title_bar_height);
    }

    #[test]
    fn test_layout_is_idempotent_and_grows_with_stats() {
        let metrics = LayoutMetrics::default();
        let all: Vec<&'static StatDefinition> = catalog().iter().collect();
        let some: Vec<&'static StatDefinition> = catalog().iter().take(4).collect();

        assert_eq!(compute_layout(&all, &metrics), compute_layout(&all, &metrics));
        assert!(compute_layout(&all, &metrics).panel_height > compute_layout(&some, &metrics).panel_height);
        assert_eq!(compute_layout(&all, &metrics).rows.len(), 2 * catalog().len());
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let metrics = LayoutMetrics::default();
        let water = definition(StatId::WaterAvailability);
        let layout = compute_layout(&[water, water], &metrics);
        assert_eq!(layout.rows.len(), 2);
    }
}
