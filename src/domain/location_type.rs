use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precision of a result's `geometry.location`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// A precise street address
    Rooftop,
    /// Interpolated between two precise points, usually on a road
    RangeInterpolated,
    /// Geometric center of a polyline (street) or polygon (region)
    GeometricCenter,
    Approximate,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Rooftop => "ROOFTOP",
            LocationType::RangeInterpolated => "RANGE_INTERPOLATED",
            LocationType::GeometricCenter => "GEOMETRIC_CENTER",
            LocationType::Approximate => "APPROXIMATE",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROOFTOP" => Ok(LocationType::Rooftop),
            "RANGE_INTERPOLATED" => Ok(LocationType::RangeInterpolated),
            "GEOMETRIC_CENTER" => Ok(LocationType::GeometricCenter),
            "APPROXIMATE" => Ok(LocationType::Approximate),
            other => Err(format!("unknown location type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_type_round_trips_wire_literal() {
        for lt in [
            LocationType::Rooftop,
            LocationType::RangeInterpolated,
            LocationType::GeometricCenter,
            LocationType::Approximate,
        ] {
            assert_eq!(lt.as_str().parse::<LocationType>().unwrap(), lt);
        }
        assert!("ROOF".parse::<LocationType>().is_err());
    }
}
