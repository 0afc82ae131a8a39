// Snapshot data source - district counters held in memory or read from a JSON file
use crate::application::city_data_source::CityDataSource;
use crate::domain::district::DistrictCounters;
use anyhow::Context;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

#[derive(Debug, Default)]
pub struct SnapshotDataSource {
    counters: RefCell<Option<DistrictCounters>>,
}

impl SnapshotDataSource {
    pub fn new(counters: Option<DistrictCounters>) -> Self {
        Self {
            counters: RefCell::new(counters),
        }
    }

    /// A source with no running simulation.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let counters: DistrictCounters = serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        Ok(Self::new(Some(counters)))
    }

    pub fn set_counters(&self, counters: Option<DistrictCounters>) {
        *self.counters.borrow_mut() = counters;
    }
}

impl CityDataSource for SnapshotDataSource {
    fn district_counters(&self) -> Option<DistrictCounters> {
        self.counters.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, r#"{"electricity_capacity": 5000, "electricity_consumption": 2500}"#).unwrap();

        let source = SnapshotDataSource::from_file(&path).unwrap();
        let counters = source.district_counters().unwrap();

        assert_eq!(counters.electricity_capacity, 5000);
        assert_eq!(counters.electricity_consumption, 2500);
    }

    #[test]
    fn test_absent_and_bad_file() {
        assert!(SnapshotDataSource::absent().district_counters().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "not json").unwrap();
        assert!(SnapshotDataSource::from_file(&path).is_err());
    }
}
