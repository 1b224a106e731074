//! Alert conditions on ES-denominated levels
//!
//! Pure trigger logic only: a condition fires when the ES price comes within
//! a distance threshold of a monitored level, optionally gated on volume and
//! on the price moving toward (not away from) the level. Notification
//! delivery is an external collaborator's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LevelSet;

/// Default trigger distance in points
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.5;

/// One monitored level with its trigger state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertCondition {
    /// Level identifier ("put_wall", "call_wall", "gamma_flip")
    pub level_name: String,
    /// ES price level to monitor
    pub es_level: f64,
    /// Distance in points that arms the trigger
    pub distance_threshold: f64,
    /// Minimum volume for the trigger, if any
    pub volume_threshold: Option<f64>,
    /// Whether this condition has fired
    pub triggered: bool,
    /// When it fired
    pub trigger_time: Option<DateTime<Utc>>,
}

impl AlertCondition {
    pub fn new(level_name: impl Into<String>, es_level: f64) -> Self {
        Self {
            level_name: level_name.into(),
            es_level,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            volume_threshold: None,
            triggered: false,
            trigger_time: None,
        }
    }

    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    pub fn with_volume_threshold(mut self, threshold: f64) -> Self {
        self.volume_threshold = Some(threshold);
        self
    }

    /// Should this condition fire at the given ES price?
    ///
    /// `velocity` is price change per unit time; when provided, a price
    /// moving away from the level suppresses the trigger.
    pub fn check(
        &self,
        current_es_price: f64,
        current_volume: Option<f64>,
        velocity: Option<f64>,
    ) -> bool {
        let distance = (current_es_price - self.es_level).abs();
        if distance > self.distance_threshold {
            return false;
        }

        if let (Some(min_volume), Some(volume)) = (self.volume_threshold, current_volume) {
            if volume < min_volume {
                return false;
            }
        }

        if let Some(v) = velocity {
            // Below the level and falling, or above it and rising: moving away
            if current_es_price < self.es_level && v < 0.0 {
                return false;
            }
            if current_es_price > self.es_level && v > 0.0 {
                return false;
            }
        }

        true
    }

    /// Mark as fired
    pub fn trigger(&mut self) {
        self.triggered = true;
        self.trigger_time = Some(Utc::now());
    }
}

/// Build one condition per present level in an ES-denominated level set.
pub fn conditions_from_levels(levels_es: &LevelSet, distance_threshold: f64) -> Vec<AlertCondition> {
    let named = [
        ("put_wall", levels_es.put_wall),
        ("call_wall", levels_es.call_wall),
        ("gamma_flip", levels_es.gamma_flip),
    ];

    named
        .into_iter()
        .filter_map(|(name, level)| {
            level.map(|es_level| {
                AlertCondition::new(name, es_level).with_distance_threshold(distance_threshold)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_trigger() {
        let cond = AlertCondition::new("put_wall", 5802.5);

        assert!(cond.check(5802.7, None, None));
        assert!(cond.check(5802.0, None, None));
        assert!(!cond.check(5804.0, None, None));
    }

    #[test]
    fn test_volume_gate() {
        let cond = AlertCondition::new("call_wall", 6002.5).with_volume_threshold(1000.0);

        assert!(!cond.check(6002.5, Some(500.0), None));
        assert!(cond.check(6002.5, Some(1500.0), None));
        // No volume reading: gate does not apply
        assert!(cond.check(6002.5, None, None));
    }

    #[test]
    fn test_velocity_gate() {
        let cond = AlertCondition::new("gamma_flip", 5902.5);

        // Below the level, moving down: away, no trigger
        assert!(!cond.check(5902.2, None, Some(-1.0)));
        // Below the level, moving up: toward, trigger
        assert!(cond.check(5902.2, None, Some(1.0)));
        // Above the level, moving up: away, no trigger
        assert!(!cond.check(5902.8, None, Some(1.0)));
    }

    #[test]
    fn test_conditions_from_levels_skips_absent() {
        let levels = LevelSet {
            put_wall: Some(5802.5),
            call_wall: None,
            gamma_flip: Some(5902.5),
        };

        let conds = conditions_from_levels(&levels, 0.75);
        assert_eq!(conds.len(), 2);
        assert_eq!(conds[0].level_name, "put_wall");
        assert_eq!(conds[1].level_name, "gamma_flip");
        assert_eq!(conds[0].distance_threshold, 0.75);
    }
}
