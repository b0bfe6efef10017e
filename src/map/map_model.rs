use serde::{Deserialize, Serialize};

use crate::map::error::MapError;

pub const MAX_ZOOM: u8 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
    #[serde(default)]
    pub title: String,
}

/// What the page asks the map widget to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub center: LatLng,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_map_id")]
    pub map_id: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

fn default_zoom() -> u8 { 12 }
fn default_map_id() -> String { "MAP_ID".to_string() }

impl Default for MapOptions {
    /// The contacts page: centred on the Medical University with one marker.
    fn default() -> Self {
        Self {
            center: LatLng::new(43.259116, 76.933178),
            zoom: default_zoom(),
            map_id: default_map_id(),
            markers: vec![Marker {
                position: LatLng::new(43.25911614460168, 76.9331789342499),
                title: "Medical University".to_string(),
            }],
        }
    }
}

impl MapOptions {
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.center.is_valid() {
            return Err(MapError::InvalidOptions(format!(
                "center {},{} is outside lat [-90, 90] / lng [-180, 180]",
                self.center.lat, self.center.lng
            )));
        }
        if self.zoom > MAX_ZOOM {
            return Err(MapError::InvalidOptions(format!(
                "zoom {} exceeds {}",
                self.zoom, MAX_ZOOM
            )));
        }
        if let Some(marker) = self.markers.iter().find(|m| !m.position.is_valid()) {
            return Err(MapError::InvalidOptions(format!(
                "marker '{}' at {},{} is out of range",
                marker.title, marker.position.lat, marker.position.lng
            )));
        }
        Ok(())
    }
}
