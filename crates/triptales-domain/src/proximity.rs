//! Proximity verification - advisory distance checks for proof locations
//!
//! The route text of a submission is matched against a gazetteer of known
//! places. The nearest matched place is compared with the proof coordinate
//! using the haversine great-circle distance. The result is metadata for
//! moderators and never blocks a submission.

use crate::proof::GeoPoint;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default radius for a proof to count as "near the route"
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Great-circle distance between two points in kilometres
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// A named reference place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Lowercase place name as it appears in route text
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl RoutePoint {
    /// Create a reference point; the name is lowercased for matching
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into().trim().to_lowercase(),
            latitude,
            longitude,
        }
    }

    fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Outcome of a proximity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofVerification {
    /// False when the route names no known place
    pub available: bool,
    /// Closest matched place
    pub matched_route_point: Option<String>,
    /// Distance to the closest matched place, rounded to metres
    pub distance_km: Option<f64>,
    /// Whether the distance is within `radius_km`
    pub within_radius: bool,
    /// Radius used for the check
    pub radius_km: f64,
}

/// Gazetteer of reference places plus the acceptance radius
#[derive(Debug, Clone)]
pub struct ProximityIndex {
    points: Vec<RoutePoint>,
    radius_km: f64,
}

impl ProximityIndex {
    /// Create an index over the given points
    pub fn new(points: Vec<RoutePoint>, radius_km: f64) -> Self {
        Self { points, radius_km }
    }

    /// Built-in Jammu & Kashmir gazetteer with the default 5 km radius
    pub fn jammu_kashmir() -> Self {
        let points = [
            ("srinagar", 34.0837, 74.7973),
            ("kashmir", 34.0837, 74.7973),
            ("gulmarg", 34.0484, 74.3805),
            ("pahalgam", 34.0159, 75.3162),
            ("sonamarg", 34.3039, 75.2938),
            ("jammu", 32.7266, 74.8570),
            ("jammu city", 32.7266, 74.8570),
            ("katra", 32.9916, 74.9319),
            ("vaishno devi", 33.0302, 74.9499),
            ("patnitop", 33.0843, 75.3260),
            ("anantnag", 33.7307, 75.1542),
            ("baramulla", 34.1980, 74.3636),
            ("kupwara", 34.5261, 74.2570),
            ("amarnath", 34.2145, 75.5025),
            ("kishtwar", 33.3136, 75.7673),
            ("bhaderwah", 32.9794, 75.7172),
            ("doda", 33.1456, 75.5482),
            ("udhampur", 32.9253, 75.1352),
            ("reasi", 33.0812, 74.8324),
            ("rajouri", 33.3783, 74.3155),
            ("poonch", 33.7703, 74.0921),
            ("bandipora", 34.4170, 74.6431),
            ("ganderbal", 34.2257, 74.7718),
            ("pulwama", 33.8741, 74.8996),
            ("shopian", 33.7171, 74.8349),
            ("kulgam", 33.6454, 75.0168),
            ("budgam", 34.0209, 74.7238),
            ("verinag", 33.5494, 75.2510),
            ("yusmarg", 33.8230, 74.6623),
            ("kokernag", 33.5846, 75.3344),
            ("dachigam", 34.0887, 74.9368),
            ("leh", 34.1526, 77.5770),
            ("dal lake", 34.1183, 74.8920),
        ]
        .into_iter()
        .map(|(name, lat, lon)| RoutePoint::new(name, lat, lon))
        .collect();

        Self::new(points, DEFAULT_RADIUS_KM)
    }

    /// Add extra reference points (e.g. from configuration)
    pub fn with_points(mut self, extra: impl IntoIterator<Item = RoutePoint>) -> Self {
        self.points.extend(extra);
        self
    }

    /// Override the acceptance radius
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Acceptance radius in kilometres
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Places mentioned in the route text
    ///
    /// Route separators (`-`, `/`, `,`) are treated as spaces before matching.
    pub fn route_points(&self, route: &str) -> Vec<&RoutePoint> {
        let normalized: String = route
            .to_lowercase()
            .chars()
            .map(|c| if matches!(c, '/' | '-' | ',') { ' ' } else { c })
            .collect();

        self.points
            .iter()
            .filter(|p| !p.name.is_empty() && normalized.contains(p.name.as_str()))
            .collect()
    }

    /// Check a proof coordinate against the places named in the route
    pub fn verify(&self, route: &str, location: GeoPoint) -> ProofVerification {
        let closest = self
            .route_points(route)
            .into_iter()
            .map(|p| (p, haversine_km(location, p.point())))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match closest {
            Some((point, distance)) => {
                let distance_km = (distance * 1000.0).round() / 1000.0;
                ProofVerification {
                    available: true,
                    matched_route_point: Some(point.name.clone()),
                    distance_km: Some(distance_km),
                    within_radius: distance_km <= self.radius_km,
                    radius_km: self.radius_km,
                }
            }
            None => ProofVerification {
                available: false,
                matched_route_point: None,
                distance_km: None,
                within_radius: false,
                radius_km: self.radius_km,
            },
        }
    }
}

impl Default for ProximityIndex {
    fn default() -> Self {
        Self::jammu_kashmir()
    }
}
