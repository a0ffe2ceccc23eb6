use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{LocationType, Status};
use crate::error::Result;
use crate::geometry::{BoundingBox, Coordinates};

/// Typed JSON geocoding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: Status,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn deserialize_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The result the rest of this crate works with
    pub fn first(&self) -> Option<&GeocodeResult> {
        self.results.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub formatted_address: String,
    pub geometry: Geometry,
    /// Raw type codes; see [`crate::domain::AddressType`] for the known ones
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub partial_match: bool,
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    #[serde(default)]
    pub location_type: Option<LocationType>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub bounds: Option<Viewport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(p: LatLng) -> Self {
        Coordinates::new(p.lat, p.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

impl From<Viewport> for BoundingBox {
    fn from(v: Viewport) -> Self {
        BoundingBox::new(v.southwest.lat, v.southwest.lng, v.northeast.lat, v.northeast.lng)
    }
}
