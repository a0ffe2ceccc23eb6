//! geocoder - Request builder and response parser for the Google Maps Geocoding API

pub mod address;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;

pub use address::{NormalizedAddress, normalize};
pub use api::{Fetch, GeocodeRequest, HttpFetcher, OutputMode, Response};
pub use domain::{AddressType, Format, LocationType, Status};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Coordinates, bounding_box};
