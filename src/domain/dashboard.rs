// Dashboard domain model - what one tick of the panel shows
use super::stat::StatId;

#[derive(Debug, Clone, PartialEq)]
pub struct MeterReading {
    pub stat: StatId,
    pub value: f32,
    pub tooltip: String,
}

impl MeterReading {
    pub fn new(stat: StatId, value: f32, tooltip: String) -> Self {
        Self {
            stat,
            value,
            tooltip,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: &'static str,
    pub opacity: f32,
    pub readings: Vec<MeterReading>,
}

impl Dashboard {
    pub fn new(title: &'static str, opacity: f32, readings: Vec<MeterReading>) -> Self {
        Self {
            title,
            opacity,
            readings,
        }
    }

    pub fn reading(&self, stat: StatId) -> Option<&MeterReading> {
        self.readings.iter().find(|r| r.stat == stat)
    }
}
