//! Index-to-futures level conversion
//!
//! Translates index-denominated levels into their futures equivalents by
//! adding the session's fixed basis spread (`futures price - index price`).
//! The spread is held fixed for one trading session by the caller; this
//! module does not cache or persist it (see `data::cache::SpreadCache`).

use super::LevelSet;
use crate::core::{GexError, GexResult};

/// Shift every present level by `spread`. Absent levels stay absent and are
/// never materialized as the spread alone.
pub fn convert_levels(levels: &LevelSet, spread: f64) -> GexResult<LevelSet> {
    if !spread.is_finite() {
        return Err(GexError::invalid_input(format!(
            "spread must be finite, got {spread}"
        )));
    }

    Ok(LevelSet {
        put_wall: levels.put_wall.map(|v| v + spread),
        call_wall: levels.call_wall.map(|v| v + spread),
        gamma_flip: levels.gamma_flip.map(|v| v + spread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_spread_per_level() {
        let levels = LevelSet {
            put_wall: Some(5800.0),
            call_wall: Some(6000.0),
            gamma_flip: Some(5900.0),
        };

        let es = convert_levels(&levels, 2.5).unwrap();
        assert_eq!(es.put_wall, Some(5802.5));
        assert_eq!(es.call_wall, Some(6002.5));
        assert_eq!(es.gamma_flip, Some(5902.5));
    }

    #[test]
    fn test_absent_levels_stay_absent() {
        let levels = LevelSet {
            put_wall: Some(5800.0),
            call_wall: None,
            gamma_flip: None,
        };

        let es = convert_levels(&levels, 2.5).unwrap();
        assert_eq!(es.put_wall, Some(5802.5));
        assert!(es.call_wall.is_none());
        assert!(es.gamma_flip.is_none());
    }

    #[test]
    fn test_negative_spread() {
        let levels = LevelSet {
            put_wall: Some(5800.0),
            call_wall: None,
            gamma_flip: None,
        };

        let es = convert_levels(&levels, -1.25).unwrap();
        assert_eq!(es.put_wall, Some(5798.75));
    }

    #[test]
    fn test_non_finite_spread_rejected() {
        let levels = LevelSet::default();
        assert!(convert_levels(&levels, f64::NAN).is_err());
        assert!(convert_levels(&levels, f64::INFINITY).is_err());
    }
}
