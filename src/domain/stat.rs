// Stat catalog - the fixed, ordered set of vitals the dashboard can display
use serde::{Deserialize, Serialize};

/// Stable identity of a displayable stat.
///
/// Declaration order is catalog order; `Ord` is derived so ordered maps keyed by
/// `StatId` iterate the same way the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatId {
    ElectricityAvailability,
    WaterAvailability,
    SewageTreatment,
    LandfillUsage,
    IncinerationStatus,
    HealthcareAvailability,
    AverageHealth,
    CemeteryUsage,
    CrematoriumAvailability,
    FireHazard,
    CrimeRate,
    JailAvailability,
    ElementarySchoolAvailability,
    HighSchoolAvailability,
    UniversityAvailability,
    Employment,
    JobAvailability,
}

impl StatId {
    /// Position of this stat in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> &'static StatDefinition {
        definition(self)
    }
}

/// How raw simulation counters become the value shown on a meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationKind {
    /// capacity / consumption scaled by the host's midpoint convention
    AvailabilityRatio,
    /// amount / capacity as a plain percentage
    DirectCapacityRatio,
    /// complement of a rate, e.g. employment from unemployment
    InverseValue,
    /// a rate that is already a percentage, clamped to the meter range
    ClampedValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatDefinition {
    pub id: StatId,
    pub display_name_key: &'static str,
    pub meter_template_key: &'static str,
    pub computation_kind: ComputationKind,
    pub target_menu_index: Option<u8>,
    pub uses_gradient_style: bool,
    pub default_enabled: bool,
    pub usage_divisor: u32,
}

// Host info view indices opened when a meter is clicked
const INFO_ELECTRICITY: u8 = 0;
const INFO_WATER: u8 = 1;
const INFO_CRIME: u8 = 2;
const INFO_HEALTH: u8 = 3;
const INFO_GARBAGE: u8 = 15;
const INFO_FIRE_SAFETY: u8 = 17;
const INFO_EDUCATION: u8 = 18;

const fn stat(
    id: StatId,
    display_name_key: &'static str,
    meter_template_key: &'static str,
    computation_kind: ComputationKind,
    target_menu_index: Option<u8>,
    default_enabled: bool,
) -> StatDefinition {
    StatDefinition {
        id,
        display_name_key,
        meter_template_key,
        computation_kind,
        target_menu_index,
        uses_gradient_style: matches!(computation_kind, ComputationKind::AvailabilityRatio),
        default_enabled,
        usage_divisor: 1,
    }
}

static CATALOG: [StatDefinition; 17] = [
    // Electricity is reported in kW and shown in MW
    StatDefinition {
        usage_divisor: 1000,
        ..stat(
            StatId::ElectricityAvailability,
            "INFO_ELECTRICITY_AVAILABILITY",
            "ElectricityMeter",
            ComputationKind::AvailabilityRatio,
            Some(INFO_ELECTRICITY),
            true,
        )
    },
    stat(
        StatId::WaterAvailability,
        "INFO_WATER_WATERAVAILABILITY",
        "WaterMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_WATER),
        true,
    ),
    stat(
        StatId::SewageTreatment,
        "INFO_WATER_SEWAGEAVAILABILITY",
        "SewageMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_WATER),
        true,
    ),
    stat(
        StatId::LandfillUsage,
        "INFO_GARBAGE_LANDFILL",
        "LandfillMeter",
        ComputationKind::DirectCapacityRatio,
        Some(INFO_GARBAGE),
        true,
    ),
    stat(
        StatId::IncinerationStatus,
        "INFO_GARBAGE_INCINERATOR",
        "IncineratorMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_GARBAGE),
        true,
    ),
    stat(
        StatId::HealthcareAvailability,
        "INFO_HEALTH_HEALTHCARE_AVAILABILITY",
        "HealthcareMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_HEALTH),
        false,
    ),
    stat(
        StatId::AverageHealth,
        "INFO_HEALTH_AVERAGE",
        "AverageHealthMeter",
        ComputationKind::ClampedValue,
        Some(INFO_HEALTH),
        false,
    ),
    stat(
        StatId::CemeteryUsage,
        "INFO_HEALTH_CEMETARYUSAGE",
        "CemetaryMeter",
        ComputationKind::DirectCapacityRatio,
        Some(INFO_HEALTH),
        true,
    ),
    stat(
        StatId::CrematoriumAvailability,
        "INFO_HEALTH_CREMATORIUMAVAILABILITY",
        "DeathcareMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_HEALTH),
        true,
    ),
    stat(
        StatId::FireHazard,
        "INFO_FIRE_METER",
        "FireMeter",
        ComputationKind::ClampedValue,
        Some(INFO_FIRE_SAFETY),
        false,
    ),
    stat(
        StatId::CrimeRate,
        "INFO_CRIMERATE_METER",
        "CrimeMeter",
        ComputationKind::ClampedValue,
        Some(INFO_CRIME),
        false,
    ),
    stat(
        StatId::JailAvailability,
        "INFO_CRIME_JAIL_AVAILABILITY",
        "JailMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_CRIME),
        false,
    ),
    stat(
        StatId::ElementarySchoolAvailability,
        "INFO_EDUCATION_AVAILABILITY1",
        "ElementaryMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_EDUCATION),
        false,
    ),
    stat(
        StatId::HighSchoolAvailability,
        "INFO_EDUCATION_AVAILABILITY2",
        "HighSchoolMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_EDUCATION),
        false,
    ),
    stat(
        StatId::UniversityAvailability,
        "INFO_EDUCATION_AVAILABILITY3",
        "UniversityMeter",
        ComputationKind::AvailabilityRatio,
        Some(INFO_EDUCATION),
        false,
    ),
    // The host has no employment meter; both job stats reuse the cemetery template
    stat(
        StatId::Employment,
        "STATS_9",
        "CemetaryMeter",
        ComputationKind::InverseValue,
        None,
        true,
    ),
    stat(
        StatId::JobAvailability,
        "STATS_10",
        "CemetaryMeter",
        ComputationKind::AvailabilityRatio,
        None,
        false,
    ),
];

/// All stats in canonical render order.
pub fn catalog() -> &'static [StatDefinition] {
    &CATALOG
}

pub fn definition(id: StatId) -> &'static StatDefinition {
    &CATALOG[id.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_ids() {
        for (index, definition) in catalog().iter().enumerate() {
            assert_eq!(definition.id.index(), index);
            assert_eq!(StatId::definition(definition.id), definition);
        }
    }

    #[test]
    fn test_catalog_ids_are_strictly_ascending() {
        let ids: Vec<StatId> = catalog().iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 17);
    }

    #[test]
    fn test_default_enabled_stats() {
        let enabled: Vec<StatId> = catalog()
            .iter()
            .filter(|d| d.default_enabled)
            .map(|d| d.id)
            .collect();

        assert_eq!(
            enabled,
            vec![
                StatId::ElectricityAvailability,
                StatId::WaterAvailability,
                StatId::SewageTreatment,
                StatId::LandfillUsage,
                StatId::IncinerationStatus,
                StatId::CemeteryUsage,
                StatId::CrematoriumAvailability,
                StatId::Employment,
            ]
        );
    }

    #[test]
    fn test_only_availability_meters_use_gradient() {
        for definition in catalog() {
            assert_eq!(
                definition.uses_gradient_style,
                definition.computation_kind == ComputationKind::AvailabilityRatio,
                "{:?}",
                definition.id
            );
        }
        assert_eq!(definition(StatId::ElectricityAvailability).usage_divisor, 1000);
        assert_eq!(definition(StatId::WaterAvailability).usage_divisor, 1);
    }
}
