pub mod address_type;
pub mod format;
pub mod location_type;
pub mod status;

pub use address_type::AddressType;
pub use format::Format;
pub use location_type::LocationType;
pub use status::Status;
