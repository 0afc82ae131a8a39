// District counters - raw per-tick values pulled from the simulation
use serde::Deserialize;

/// City-wide counters as reported by the simulation for one tick.
///
/// Capacities and amounts are whole units in the simulation's own scale
/// (electricity in kW); rates are already percentages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DistrictCounters {
    pub electricity_capacity: i32,
    pub electricity_consumption: i32,
    pub water_capacity: i32,
    pub water_consumption: i32,
    pub sewage_capacity: i32,
    pub sewage_accumulation: i32,
    pub garbage_capacity: i32,
    pub garbage_amount: i32,
    pub incineration_capacity: i32,
    pub garbage_accumulation: i32,
    pub healthcare_capacity: i32,
    pub sick_count: i32,
    pub average_health: f32,
    pub dead_capacity: i32,
    pub dead_amount: i32,
    pub cremate_capacity: i32,
    pub dead_count: i32,
    pub fire_hazard: f32,
    pub crime_rate: f32,
    pub jail_capacity: i32,
    pub criminal_amount: i32,
    pub elementary_capacity: i32,
    pub elementary_need: i32,
    pub high_school_capacity: i32,
    pub high_school_need: i32,
    pub university_capacity: i32,
    pub university_need: i32,
    pub unemployment: f32,
    pub workplace_count: i32,
    pub worker_count: i32,
}
