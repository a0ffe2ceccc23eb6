use tracing::debug;
use url::form_urlencoded;

use crate::api::fetch::Fetch;
use crate::api::response::{OutputMode, Response};
use crate::domain::Format;
use crate::error::Result;
use crate::geometry::{BoundingBox, Coordinates};

pub const URL_HTTP: &str = "http://maps.googleapis.com/maps/api/geocode/";
pub const URL_HTTPS: &str = "https://maps.googleapis.com/maps/api/geocode/";

/// Parameters of a single geocoding request
///
/// Built by value and chained, e.g.
/// `GeocodeRequest::new("Paris").with_region("fr").with_language("fr")`.
/// No combination is rejected locally; an empty request renders to a URL
/// the API will answer with `INVALID_REQUEST`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeRequest {
    format: Format,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    bounds_southwest: Option<Coordinates>,
    bounds_northeast: Option<Coordinates>,
    region: Option<String>,
    language: Option<String>,
    sensor: bool,
}

impl GeocodeRequest {
    /// Forward-geocoding request for `address` with JSON output and sensor off
    pub fn new(address: impl Into<String>) -> Self {
        Self::default().with_address(address)
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn with_latitude_longitude(self, latitude: f64, longitude: f64) -> Self {
        self.with_latitude(latitude).with_longitude(longitude)
    }

    pub fn with_bounds_southwest(mut self, latitude: f64, longitude: f64) -> Self {
        self.bounds_southwest = Some(Coordinates::new(latitude, longitude));
        self
    }

    pub fn with_bounds_northeast(mut self, latitude: f64, longitude: f64) -> Self {
        self.bounds_northeast = Some(Coordinates::new(latitude, longitude));
        self
    }

    pub fn with_bounds(self, bounds: BoundingBox) -> Self {
        self.with_bounds_southwest(bounds.south, bounds.west)
            .with_bounds_northeast(bounds.north, bounds.east)
    }

    /// Region bias as a ccTLD two-letter code
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn is_format_json(&self) -> bool {
        self.format == Format::Json
    }

    pub fn is_format_xml(&self) -> bool {
        self.format == Format::Xml
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// `"{lat},{lon}"` when both halves are set and finite
    pub fn latitude_longitude(&self) -> Option<String> {
        let point = Coordinates::new(self.latitude?, self.longitude?);
        point.is_finite().then(|| point.to_string())
    }

    pub fn bounds_southwest(&self) -> Option<Coordinates> {
        self.bounds_southwest
    }

    pub fn bounds_northeast(&self) -> Option<Coordinates> {
        self.bounds_northeast
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        let sw = self.bounds_southwest?;
        let ne = self.bounds_northeast?;
        Some(BoundingBox::new(
            sw.latitude,
            sw.longitude,
            ne.latitude,
            ne.longitude,
        ))
    }

    /// `"{sw_lat},{sw_lon}|{ne_lat},{ne_lon}"` when both corners are set and finite
    pub fn bounds_string(&self) -> Option<String> {
        let sw = self.bounds_southwest?;
        let ne = self.bounds_northeast?;
        (sw.is_finite() && ne.is_finite()).then(|| format!("{}|{}", sw, ne))
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn sensor(&self) -> bool {
        self.sensor
    }

    /// Query parameters in wire order, with unset and empty values dropped.
    ///
    /// An address takes precedence over coordinates when both are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let location = match (self.address.as_deref(), self.latitude_longitude()) {
            (Some(address), _) if !address.is_empty() => Some(("address", address.to_string())),
            (_, Some(latlng)) => Some(("latlng", latlng)),
            _ => None,
        };

        let sensor = if self.sensor { "true" } else { "false" };

        [
            location,
            self.bounds_string().map(|b| ("bounds", b)),
            self.region.clone().map(|r| ("region", r)),
            self.language.clone().map(|l| ("language", l)),
            Some(("sensor", sensor.to_string())),
        ]
        .into_iter()
        .flatten()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Form-urlencoded query string (spaces become `+`)
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Full request URL over HTTP or HTTPS
    pub fn url(&self, secure: bool) -> String {
        let base = if secure { URL_HTTPS } else { URL_HTTP };
        format!("{}{}?{}", base, self.format, self.query_string())
    }

    /// Fetch this request and parse the body according to `mode`
    ///
    /// No retry is attempted; wrap `fetcher` for timeouts or backoff.
    pub fn geocode<F: Fetch + ?Sized>(
        &self,
        fetcher: &F,
        secure: bool,
        mode: OutputMode,
    ) -> Result<Response> {
        let url = self.url(secure);
        debug!(%url, "geocoding");
        let body = fetcher.fetch(&url)?;
        debug!(bytes = body.len(), "received geocoding response");
        Response::parse(&body, self.format, mode)
    }
}
