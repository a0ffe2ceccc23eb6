pub mod fetch;
pub mod geocoder;
pub mod model;
pub mod response;
pub mod xml;

pub use fetch::{Fetch, HttpFetcher};
pub use geocoder::GeocodeRequest;
pub use model::GeocodeResponse;
pub use response::{OutputMode, Response};
pub use xml::XmlElement;
