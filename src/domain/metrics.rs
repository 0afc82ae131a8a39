// Metric computation - pure conversions from raw counters to meter values
use super::dashboard::MeterReading;
use super::district::DistrictCounters;
use super::stat::{ComputationKind, StatDefinition, StatId};

/// Lower bound of the host's consumption range for availability meters.
pub const CONSUMPTION_MIN: i32 = 45;
/// Upper bound of the host's consumption range for availability meters.
pub const CONSUMPTION_MAX: i32 = 55;
/// Value a meter shows when it is full.
pub const METER_MAX: f32 = 100.0;

/// Percentage shown on an availability meter, using the default 45..55 range.
pub fn availability_ratio(capacity: i32, consumption: i32) -> f32 {
    availability_ratio_in(capacity, consumption, CONSUMPTION_MIN, CONSUMPTION_MAX)
}

/// Capacity over consumption scaled by the midpoint of `[min, max]`.
///
/// This follows the host's own info panels: the result is not bounded, and a
/// zero consumption with non-zero capacity yields infinity.
pub fn availability_ratio_in(capacity: i32, consumption: i32, min: i32, max: i32) -> f32 {
    if capacity == 0 {
        return 0.0;
    }

    let base_percent = capacity as f32 / consumption as f32;
    let percent_modifier = ((min + max) / 2) as f32;
    base_percent * percent_modifier
}

pub fn direct_capacity_ratio(amount: i32, capacity: i32) -> f32 {
    if capacity == 0 {
        return 0.0;
    }

    (amount as f32 / capacity as f32) * 100.0
}

pub fn inverse_value(x: f32) -> f32 {
    (100.0 - x).round()
}

pub fn clamped_value(x: f32, lo: f32, hi: f32) -> f32 {
    // max/min rather than clamp: NaN input lands on `lo` instead of propagating
    x.max(lo).min(hi)
}

/// Value to put on a meter widget for a computed percentage.
///
/// Finite values pass through unchanged. Infinities saturate to an empty or
/// full meter; NaN shows as empty.
pub fn display_value(percent: f32) -> f32 {
    if percent.is_finite() {
        percent
    } else if percent == f32::INFINITY {
        METER_MAX
    } else {
        0.0
    }
}

/// Usage tooltip: `"{consumption} / {capacity}"` with thousands separators.
pub fn format_usage(capacity: i64, consumption: i64) -> String {
    format!("{} / {}", format_count(consumption), format_count(capacity))
}

/// Formats an integer with comma thousands separators; zero is `"0"`.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        result.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Percentage tooltip with at most one decimal place.
pub fn format_percent(value: f32) -> String {
    let value = display_value(value);
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}

/// Counters a stat consumes, already picked out of a district snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StatInputs {
    Usage { capacity: i32, consumption: i32 },
    Fill { amount: i32, capacity: i32 },
    Rate(f32),
}

fn inputs(id: StatId, c: &DistrictCounters) -> StatInputs {
    use StatInputs::*;

    match id {
        StatId::ElectricityAvailability => Usage {
            capacity: c.electricity_capacity,
            consumption: c.electricity_consumption,
        },
        StatId::WaterAvailability => Usage {
            capacity: c.water_capacity,
            consumption: c.water_consumption,
        },
        StatId::SewageTreatment => Usage {
            capacity: c.sewage_capacity,
            consumption: c.sewage_accumulation,
        },
        StatId::LandfillUsage => Fill {
            amount: c.garbage_amount,
            capacity: c.garbage_capacity,
        },
        StatId::IncinerationStatus => Usage {
            capacity: c.incineration_capacity,
            consumption: c.garbage_accumulation,
        },
        StatId::HealthcareAvailability => Usage {
            capacity: c.healthcare_capacity,
            consumption: c.sick_count,
        },
        StatId::AverageHealth => Rate(c.average_health),
        StatId::CemeteryUsage => Fill {
            amount: c.dead_amount,
            capacity: c.dead_capacity,
        },
        StatId::CrematoriumAvailability => Usage {
            capacity: c.cremate_capacity,
            consumption: c.dead_count,
        },
        StatId::FireHazard => Rate(c.fire_hazard),
        StatId::CrimeRate => Rate(c.crime_rate),
        StatId::JailAvailability => Usage {
            capacity: c.jail_capacity,
            consumption: c.criminal_amount,
        },
        StatId::ElementarySchoolAvailability => Usage {
            capacity: c.elementary_capacity,
            consumption: c.elementary_need,
        },
        StatId::HighSchoolAvailability => Usage {
            capacity: c.high_school_capacity,
            consumption: c.high_school_need,
        },
        StatId::UniversityAvailability => Usage {
            capacity: c.university_capacity,
            consumption: c.university_need,
        },
        StatId::Employment => Rate(c.unemployment),
        StatId::JobAvailability => Usage {
            capacity: c.workplace_count,
            consumption: c.worker_count,
        },
    }
}

fn scale(value: i32, divisor: u32) -> i64 {
    if divisor <= 1 {
        i64::from(value)
    } else {
        (f64::from(value) / f64::from(divisor)).round() as i64
    }
}

/// Computes the meter value and tooltip for one stat from a counter snapshot.
pub fn compute_reading(definition: &StatDefinition, counters: &DistrictCounters) -> MeterReading {
    let (value, tooltip) = match (definition.computation_kind, inputs(definition.id, counters)) {
        (ComputationKind::AvailabilityRatio, StatInputs::Usage { capacity, consumption }) => (
            availability_ratio(capacity, consumption),
            format_usage(
                scale(capacity, definition.usage_divisor),
                scale(consumption, definition.usage_divisor),
            ),
        ),
        (ComputationKind::DirectCapacityRatio, StatInputs::Fill { amount, capacity }) => {
            let value = direct_capacity_ratio(amount, capacity);
            (value, format_percent(value))
        }
        (ComputationKind::InverseValue, StatInputs::Rate(rate)) => {
            let value = inverse_value(rate);
            (value, format_percent(value))
        }
        (ComputationKind::ClampedValue, StatInputs::Rate(rate)) => {
            let value = clamped_value(rate, 0.0, METER_MAX);
            (value, format_percent(value))
        }
        (kind, inputs) => {
            tracing::warn!(
                "Stat {:?} computes {:?} but supplies {:?}; showing zero",
                definition.id,
                kind,
                inputs
            );
            (0.0, format_percent(0.0))
        }
    };

    MeterReading::new(definition.id, display_value(value), tooltip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stat::{catalog, definition};

    #[test]
    fn test_availability_ratio() {
        assert_eq!(availability_ratio(1000, 500), 100.0);
        assert_eq!(availability_ratio_in(1000, 500, 45, 55), 100.0);
        assert_eq!(availability_ratio(300, 600), 25.0);
        // Over-supply is not clamped
        assert_eq!(availability_ratio(4000, 1000), 200.0);
    }

    #[test]
    fn test_availability_ratio_zero_capacity() {
        for consumption in [0, 1, 500, -3, i32::MAX] {
            assert_eq!(availability_ratio(0, consumption), 0.0);
        }
    }

    #[test]
    fn test_availability_ratio_zero_consumption_is_infinite() {
        let value = availability_ratio(250, 0);
        assert!(value.is_infinite() && value > 0.0);
        assert_eq!(display_value(value), METER_MAX);
    }

    #[test]
    fn test_availability_midpoint_uses_integer_division() {
        // (40 + 61) / 2 == 50 in integer arithmetic
        assert_eq!(availability_ratio_in(10, 10, 40, 61), 50.0);
    }

    #[test]
    fn test_direct_capacity_ratio() {
        assert_eq!(direct_capacity_ratio(50, 100), 50.0);
        assert_eq!(direct_capacity_ratio(150, 100), 150.0);
        for amount in [0, 7, 10_000] {
            assert_eq!(direct_capacity_ratio(amount, 0), 0.0);
        }
    }

    #[test]
    fn test_inverse_and_clamped_values() {
        assert_eq!(inverse_value(4.4), 96.0);
        assert_eq!(inverse_value(0.0), 100.0);
        assert_eq!(clamped_value(120.0, 0.0, 100.0), 100.0);
        assert_eq!(clamped_value(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamped_value(42.5, 0.0, 100.0), 42.5);
        assert_eq!(clamped_value(f32::NAN, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_format_usage() {
        assert_eq!(format_usage(0, 0), "0 / 0");
        assert_eq!(format_usage(1_500, 999), "999 / 1,500");
        assert_eq!(format_usage(12_345_678, 1_000), "1,000 / 12,345,678");
    }

    #[test]
    fn test_format_count_negative() {
        assert_eq!(format_count(-1_234), "-1,234");
        assert_eq!(format_count(-12), "-12");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0), "50%");
        assert_eq!(format_percent(33.333_332), "33.3%");
        assert_eq!(format_percent(f32::INFINITY), "100%");
    }

    #[test]
    fn test_compute_reading_electricity_in_megawatts() {
        let counters = DistrictCounters {
            electricity_capacity: 125_400,
            electricity_consumption: 62_700,
            ..Default::default()
        };

        let reading = compute_reading(definition(StatId::ElectricityAvailability), &counters);
        assert_eq!(reading.stat, StatId::ElectricityAvailability);
        assert_eq!(reading.value, 100.0);
        assert_eq!(reading.tooltip, "63 / 125");
    }

    #[test]
    fn test_compute_reading_per_kind() {
        let counters = DistrictCounters {
            water_capacity: 12_000,
            water_consumption: 6_000,
            garbage_capacity: 400,
            garbage_amount: 100,
            crime_rate: 140.0,
            unemployment: 7.6,
            ..Default::default()
        };

        let water = compute_reading(definition(StatId::WaterAvailability), &counters);
        assert_eq!(water.value, 100.0);
        assert_eq!(water.tooltip, "6,000 / 12,000");

        let landfill = compute_reading(definition(StatId::LandfillUsage), &counters);
        assert_eq!(landfill.value, 25.0);
        assert_eq!(landfill.tooltip, "25%");

        let crime = compute_reading(definition(StatId::CrimeRate), &counters);
        assert_eq!(crime.value, 100.0);

        let employment = compute_reading(definition(StatId::Employment), &counters);
        assert_eq!(employment.value, 92.0);
        assert_eq!(employment.tooltip, "92%");
    }

    #[test]
    fn test_compute_reading_saturates_zero_consumption() {
        let counters = DistrictCounters {
            cremate_capacity: 90,
            dead_count: 0,
            ..Default::default()
        };

        let reading = compute_reading(definition(StatId::CrematoriumAvailability), &counters);
        assert_eq!(reading.value, METER_MAX);
        assert_eq!(reading.tooltip, "0 / 90");
    }

    #[test]
    fn test_every_catalog_stat_has_matching_inputs() {
        let counters = DistrictCounters::default();
        for definition in catalog() {
            let shape = inputs(definition.id, &counters);
            let matches = match definition.computation_kind {
                ComputationKind::AvailabilityRatio => matches!(shape, StatInputs::Usage { .. }),
                ComputationKind::DirectCapacityRatio => matches!(shape, StatInputs::Fill { .. }),
                ComputationKind::InverseValue | ComputationKind::ClampedValue => {
                    matches!(shape, StatInputs::Rate(_))
                }
            };
            assert!(matches, "{:?} has inputs {:?}", definition.id, shape);
        }
    }

    #[test]
    fn test_absent_simulation_reads_as_zero() {
        let counters = DistrictCounters::default();
        let water = compute_reading(definition(StatId::WaterAvailability), &counters);
        assert_eq!(water.value, 0.0);
        assert_eq!(water.tooltip, "0 / 0");
    }
}
