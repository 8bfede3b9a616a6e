// HTTP routes
pub mod health;
pub mod offices;
pub mod tags;

pub use health::*;
pub use offices::*;
pub use tags::*;
