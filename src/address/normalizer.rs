use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::AddressType;
use crate::error::{Error, Result};

/// API type codes and the field each one fills
pub const COMPONENT_FIELDS: [(AddressType, &str); 9] = [
    (AddressType::Subpremise, "apt"),
    (AddressType::StreetNumber, "street_number"),
    (AddressType::Route, "street"),
    (AddressType::Neighborhood, "neighborhood"),
    (AddressType::Locality, "city"),
    (AddressType::AdministrativeAreaLevel1, "state"),
    (AddressType::AdministrativeAreaLevel2, "county"),
    (AddressType::Country, "country"),
    (AddressType::PostalCode, "postal_code"),
];

/// Flat US-style view of the first geocoding result
///
/// String fields hold the component's `short_name`. Unset fields are left
/// out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAddress {
    #[serde(rename = "apt", skip_serializing_if = "Option::is_none", default)]
    pub apartment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub street: Option<String>,
    #[serde(alias = "neighboorhood", skip_serializing_if = "Option::is_none", default)]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub longitude: Option<f64>,
    /// Set when the first result had no `address_components` list
    #[serde(skip)]
    pub missing_components: bool,
}

impl NormalizedAddress {
    fn slot(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "apt" => Some(&mut self.apartment),
            "street_number" => Some(&mut self.street_number),
            "street" => Some(&mut self.street),
            "neighborhood" => Some(&mut self.neighborhood),
            "city" => Some(&mut self.city),
            "state" => Some(&mut self.state),
            "county" => Some(&mut self.county),
            "country" => Some(&mut self.country),
            "postal_code" => Some(&mut self.postal_code),
            _ => None,
        }
    }

    /// Only the fields that are set, keyed by their serialized names
    pub fn to_map(&self) -> BTreeMap<&'static str, Value> {
        let strings = [
            ("apt", &self.apartment),
            ("street_number", &self.street_number),
            ("street", &self.street),
            ("neighborhood", &self.neighborhood),
            ("city", &self.city),
            ("state", &self.state),
            ("county", &self.county),
            ("country", &self.country),
            ("postal_code", &self.postal_code),
        ];
        let mut map: BTreeMap<&'static str, Value> = strings
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, Value::from(v))))
            .collect();

        if let Some(latitude) = self.latitude {
            map.insert("latitude", Value::from(latitude));
        }
        if let Some(longitude) = self.longitude {
            map.insert("longitude", Value::from(longitude));
        }
        map
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalized field name for an API type code, if it has one
pub fn field_for_type(type_code: &str) -> Option<&'static str> {
    let address_type: AddressType = type_code.parse().ok()?;
    COMPONENT_FIELDS
        .iter()
        .find(|(t, _)| *t == address_type)
        .map(|(_, field)| *field)
}

/// Flatten the first result of a JSON geocoding response
///
/// Each address component is classified by its *first* type code only;
/// components whose code has no field are skipped. Coordinates are taken
/// from `geometry.location` whether or not any component matched.
///
/// # Errors
/// * [`Error::InvalidInput`] if `response` is not an object or has no
///   `results` array
///
/// A first result without `address_components` does not fail the call:
/// it is logged as [`Error::NoComponents`] and flagged through
/// [`NormalizedAddress::missing_components`].
/// An empty `results` array yields an empty address.
pub fn normalize(response: &Value) -> Result<NormalizedAddress> {
    let object = response
        .as_object()
        .ok_or_else(|| Error::invalid_input("expected a JSON object"))?;
    let results = object
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::invalid_input("missing `results` array"))?;

    let mut out = NormalizedAddress::default();
    let Some(first) = results.first().and_then(Value::as_object) else {
        return Ok(out);
    };

    match first.get("address_components").and_then(Value::as_array) {
        Some(components) => {
            for component in components {
                apply_component(&mut out, component);
            }
        }
        None => {
            warn!("{}", Error::NoComponents);
            out.missing_components = true;
        }
    }

    if let Some(location) = location(first) {
        out.latitude = location.get("lat").and_then(Value::as_f64);
        out.longitude = location.get("lng").and_then(Value::as_f64);
    }

    Ok(out)
}

fn apply_component(out: &mut NormalizedAddress, component: &Value) {
    let type_code = component
        .get("types")
        .and_then(Value::as_array)
        .and_then(|types| types.first())
        .and_then(Value::as_str);
    let Some(field) = type_code.and_then(field_for_type) else {
        return;
    };
    let Some(short_name) = component.get("short_name").and_then(Value::as_str) else {
        return;
    };
    if let Some(slot) = out.slot(field) {
        *slot = Some(short_name.to_string());
    }
}

fn location(result: &Map<String, Value>) -> Option<&Map<String, Value>> {
    result
        .get("geometry")?
        .get("location")?
        .as_object()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(short: &str, types: &[&str]) -> Value {
        json!({"long_name": short, "short_name": short, "types": types})
    }

    fn sample() -> Value {
        json!({
            "status": "OK",
            "results": [{
                "address_components": [
                    component("1600", &["street_number"]),
                    component("Amphitheatre Pkwy", &["route"]),
                    component("Old Mountain View", &["sublocality", "political"]),
                    component("Mountain View", &["locality", "political"]),
                    component("CA", &["administrative_area_level_1", "political"]),
                    component("US", &["country", "political"]),
                    component("94043", &["postal_code"]),
                ],
                "geometry": {"location": {"lat": 37.4224764, "lng": -122.0842499}}
            }, {
                "address_components": [component("Elsewhere", &["locality"])],
                "geometry": {"location": {"lat": 1.0, "lng": 2.0}}
            }]
        })
    }

    #[test]
    fn test_standard_components() {
        let address = normalize(&sample()).unwrap();
        assert!(!address.missing_components);
        let map = address.to_map();

        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                "city",
                "country",
                "latitude",
                "longitude",
                "postal_code",
                "state",
                "street",
                "street_number"
            ]
        );
        assert_eq!(address.city.as_deref(), Some("Mountain View"));
        assert_eq!(address.street.as_deref(), Some("Amphitheatre Pkwy"));
        assert_eq!(address.state.as_deref(), Some("CA"));
        assert_eq!(address.latitude, Some(37.4224764));
        assert_eq!(address.longitude, Some(-122.0842499));
        assert!(!map.contains_key("sublocality"));
    }

    #[test]
    fn test_only_first_type_is_considered() {
        let response = json!({
            "results": [{
                "address_components": [component("X", &["political", "locality"])],
                "geometry": {"location": {"lat": 0.0, "lng": 0.0}}
            }]
        });
        let address = normalize(&response).unwrap();
        assert_eq!(address.city, None);
        assert_eq!(address.latitude, Some(0.0));
    }

    #[test]
    fn test_apartment_neighborhood_and_county() {
        let response = json!({
            "results": [{
                "address_components": [
                    component("4B", &["subpremise"]),
                    component("Soho", &["neighborhood", "political"]),
                    component("New York County", &["administrative_area_level_2", "political"]),
                ],
                "geometry": {"location": {"lat": 40.72, "lng": -74.0}}
            }]
        });
        let address = normalize(&response).unwrap();
        assert_eq!(address.apartment.as_deref(), Some("4B"));
        assert_eq!(address.neighborhood.as_deref(), Some("Soho"));
        assert_eq!(address.county.as_deref(), Some("New York County"));

        let map = address.to_map();
        assert_eq!(map["apt"], json!("4B"));
        assert!(map.contains_key("neighborhood"));
    }

    #[test]
    fn test_missing_components_still_extracts_location() {
        let response = json!({
            "results": [{"geometry": {"location": {"lat": 48.85, "lng": 2.35}}}]
        });
        let address = normalize(&response).unwrap();
        assert!(address.missing_components);
        assert_eq!(address.city, None);
        assert_eq!(address.latitude, Some(48.85));
        assert_eq!(address.longitude, Some(2.35));
        // The flag is not part of the flat mapping
        assert_eq!(address.to_map().len(), 2);
    }

    #[test]
    fn test_unknown_components_are_not_missing_components() {
        let response = json!({
            "results": [{
                "address_components": [component("Old Town", &["sublocality"])],
                "geometry": {"location": {"lat": 1.0, "lng": 2.0}}
            }]
        });
        let address = normalize(&response).unwrap();
        assert!(!address.missing_components);
        assert_eq!(address.to_map().len(), 2);
    }

    #[test]
    fn test_map_matches_serialized_keys() {
        let address = normalize(&sample()).unwrap();
        let value = serde_json::to_value(&address).unwrap();
        let mut serialized: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        serialized.sort_unstable();

        let map = address.to_map();
        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(keys, serialized);
        assert_eq!(map["street_number"], json!("1600"));
        assert_eq!(map["latitude"], json!(37.4224764));
    }

    #[test]
    fn test_empty_results() {
        let address = normalize(&json!({"status": "ZERO_RESULTS", "results": []})).unwrap();
        assert!(address.is_empty());
        assert!(address.to_map().is_empty());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            normalize(&json!("not a response")),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            normalize(&Value::Null),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            normalize(&json!({"status": "OK"})),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_legacy_neighborhood_key_is_accepted() {
        let address: NormalizedAddress =
            serde_json::from_value(json!({"neighboorhood": "Mission", "city": "SF"})).unwrap();
        assert_eq!(address.neighborhood.as_deref(), Some("Mission"));
    }

    #[test]
    fn test_field_for_type() {
        assert_eq!(field_for_type("route"), Some("street"));
        assert_eq!(field_for_type("administrative_area_level_2"), Some("county"));
        assert_eq!(field_for_type("sublocality"), None);
        assert_eq!(field_for_type("made_up"), None);
    }
}
