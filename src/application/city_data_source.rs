// Data source trait for simulation counters
use crate::domain::district::DistrictCounters;

pub trait CityDataSource {
    /// Counters for the current tick, or `None` while the simulation's district
    /// manager does not exist. Callers treat `None` as all counters zero.
    fn district_counters(&self) -> Option<DistrictCounters>;
}
