pub mod bounds;

pub use bounds::{BoundingBox, Coordinates, EQUATOR_LAT_DEGREE_IN_MILES, bounding_box};
