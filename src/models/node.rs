//! Node identifiers and positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Stable identifier of a road network node (typically an OSM node id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// How node positions are interpreted when measuring straight-line distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    /// `x` = longitude, `y` = latitude, in degrees. Distances use haversine.
    #[default]
    Geographic,
    /// Projected coordinates in meters. Distances are Euclidean.
    Planar,
}

/// A 2-D position.
///
/// # Examples
///
/// ```
/// use u_waypoint::models::{CoordinateSystem, Position};
///
/// let a = Position::planar(0.0, 0.0);
/// let b = Position::planar(3.0, 4.0);
/// assert!((a.distance_to(&b, CoordinateSystem::Planar) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees, or projected easting.
    pub x: f64,
    /// Latitude in degrees, or projected northing.
    pub y: f64,
}

impl Position {
    /// Creates a geographic position from latitude and longitude in degrees.
    pub fn lat_lon(lat: f64, lon: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// Creates a projected position.
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in meters (or projected units).
    pub fn distance_to(&self, other: &Position, system: CoordinateSystem) -> f64 {
        match system {
            CoordinateSystem::Geographic => haversine_distance(self.y, self.x, other.y, other.x),
            CoordinateSystem::Planar => {
                let dx = self.x - other.x;
                let dy = self.y - other.y;
                (dx * dx + dy * dy).sqrt()
            }
        }
    }
}

/// Great-circle distance in meters between two lat/lon points in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// A road network node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier.
    pub id: NodeId,
    /// Position, needed only for A* search.
    pub position: Option<Position>,
}
