use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type codes attached to results and address components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    StreetAddress,
    /// A named route (such as "US 101")
    Route,
    /// A major intersection, usually of two major roads
    Intersection,
    Political,
    Country,
    /// States within the US
    #[serde(rename = "administrative_area_level_1")]
    AdministrativeAreaLevel1,
    /// Counties within the US
    #[serde(rename = "administrative_area_level_2")]
    AdministrativeAreaLevel2,
    #[serde(rename = "administrative_area_level_3")]
    AdministrativeAreaLevel3,
    ColloquialArea,
    /// An incorporated city or town
    Locality,
    Sublocality,
    Neighborhood,
    /// A named building or collection of buildings
    Premise,
    /// A single building within a premise, or an apartment
    Subpremise,
    PostalCode,
    NaturalFeature,
    Airport,
    Park,
    PointOfInterest,
    PostBox,
    StreetNumber,
    Floor,
    Room,
}

impl AddressType {
    pub const ALL: [AddressType; 23] = [
        AddressType::StreetAddress,
        AddressType::Route,
        AddressType::Intersection,
        AddressType::Political,
        AddressType::Country,
        AddressType::AdministrativeAreaLevel1,
        AddressType::AdministrativeAreaLevel2,
        AddressType::AdministrativeAreaLevel3,
        AddressType::ColloquialArea,
        AddressType::Locality,
        AddressType::Sublocality,
        AddressType::Neighborhood,
        AddressType::Premise,
        AddressType::Subpremise,
        AddressType::PostalCode,
        AddressType::NaturalFeature,
        AddressType::Airport,
        AddressType::Park,
        AddressType::PointOfInterest,
        AddressType::PostBox,
        AddressType::StreetNumber,
        AddressType::Floor,
        AddressType::Room,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::StreetAddress => "street_address",
            AddressType::Route => "route",
            AddressType::Intersection => "intersection",
            AddressType::Political => "political",
            AddressType::Country => "country",
            AddressType::AdministrativeAreaLevel1 => "administrative_area_level_1",
            AddressType::AdministrativeAreaLevel2 => "administrative_area_level_2",
            AddressType::AdministrativeAreaLevel3 => "administrative_area_level_3",
            AddressType::ColloquialArea => "colloquial_area",
            AddressType::Locality => "locality",
            AddressType::Sublocality => "sublocality",
            AddressType::Neighborhood => "neighborhood",
            AddressType::Premise => "premise",
            AddressType::Subpremise => "subpremise",
            AddressType::PostalCode => "postal_code",
            AddressType::NaturalFeature => "natural_feature",
            AddressType::Airport => "airport",
            AddressType::Park => "park",
            AddressType::PointOfInterest => "point_of_interest",
            AddressType::PostBox => "post_box",
            AddressType::StreetNumber => "street_number",
            AddressType::Floor => "floor",
            AddressType::Room => "room",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown address type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for t in AddressType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "administrative_area_level_1".parse::<AddressType>(),
            Ok(AddressType::AdministrativeAreaLevel1)
        );
        assert_eq!("locality".parse::<AddressType>(), Ok(AddressType::Locality));
        assert!("bus_station".parse::<AddressType>().is_err());
    }
}
