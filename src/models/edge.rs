//! Typed road edge attributes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// Attributes carried by a directed road edge.
///
/// At least one of `travel_time` (seconds) or `length` (meters) must be set.
///
/// # Examples
///
/// ```
/// use u_waypoint::models::EdgeAttributes;
///
/// let timed = EdgeAttributes::with_travel_time(12.0);
/// assert_eq!(timed.weight(8.0), 12.0);
///
/// let measured = EdgeAttributes::with_length(80.0);
/// assert_eq!(measured.weight(8.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeAttributes {
    /// Travel time in seconds.
    pub travel_time: Option<f64>,
    /// Length in meters.
    pub length: Option<f64>,
}

impl EdgeAttributes {
    /// Edge annotated with a travel time.
    pub fn with_travel_time(seconds: f64) -> Self {
        Self {
            travel_time: Some(seconds),
            length: None,
        }
    }

    /// Edge annotated with a length only.
    pub fn with_length(meters: f64) -> Self {
        Self {
            travel_time: None,
            length: Some(meters),
        }
    }

    /// Edge annotated with both a travel time and a length.
    pub fn new(travel_time: f64, length: f64) -> Self {
        Self {
            travel_time: Some(travel_time),
            length: Some(length),
        }
    }

    /// Travel cost of the edge: `travel_time`, or `length / assumed_speed`.
    pub fn weight(&self, assumed_speed: f64) -> f64 {
        match (self.travel_time, self.length) {
            (Some(t), _) => t,
            (None, Some(l)) => l / assumed_speed,
            (None, None) => f64::INFINITY,
        }
    }

    /// Rejects edges without a usable cost.
    pub fn validate(&self) -> Result<()> {
        if self.travel_time.is_none() && self.length.is_none() {
            return Err(RoutingError::invalid(
                "edge",
                "needs a travel_time or a length",
            ));
        }
        for (name, value) in [("travel_time", self.travel_time), ("length", self.length)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(RoutingError::invalid(
                        name,
                        format!("must be finite and non-negative, got {v}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_prefers_travel_time() {
        let e = EdgeAttributes::new(5.0, 1000.0);
        assert_eq!(e.weight(10.0), 5.0);
    }

    #[test]
    fn test_weight_falls_back_to_length() {
        let e = EdgeAttributes::with_length(100.0);
        assert!((e.weight(25.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(EdgeAttributes::default().validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative() {
        assert!(EdgeAttributes::with_travel_time(-1.0).validate().is_err());
        assert!(EdgeAttributes::with_length(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_accepts_zero() {
        assert!(EdgeAttributes::with_travel_time(0.0).validate().is_ok());
    }
}
