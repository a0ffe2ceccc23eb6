use serde_json::Value;

use crate::api::model::GeocodeResponse;
use crate::api::xml::{XmlElement, parse_document};
use crate::domain::Format;
use crate::error::Result;

/// How a fetched body should be returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Body text exactly as received
    Raw,
    /// JSON value or XML tree, depending on the request format
    #[default]
    Parsed,
}

/// A fetched geocoding body
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Raw(String),
    Json(Value),
    Xml(XmlElement),
}

impl Response {
    pub fn parse(body: &str, format: Format, mode: OutputMode) -> Result<Self> {
        match (mode, format) {
            (OutputMode::Raw, _) => Ok(Response::Raw(body.to_string())),
            (OutputMode::Parsed, Format::Json) => Ok(Response::Json(serde_json::from_str(body)?)),
            (OutputMode::Parsed, Format::Xml) => Ok(Response::Xml(parse_document(body)?)),
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Response::Raw(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Response::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_xml(&self) -> Option<&XmlElement> {
        match self {
            Response::Xml(root) => Some(root),
            _ => None,
        }
    }

    /// Typed view of a JSON response, `None` for raw or XML bodies
    pub fn typed(&self) -> Option<Result<GeocodeResponse>> {
        self.as_json()
            .map(|value| GeocodeResponse::deserialize_value(value.clone()))
    }
}
