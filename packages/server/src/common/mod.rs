pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod pagination;

pub use auth::{Capability, Caller};
pub use entity_ids::{ImageId, OfficeId, ReservationId, TagId, UserId};
pub use errors::{ApiError, ValidationErrors};
pub use id::Id;
pub use pagination::{Page, PageLinks, PageMeta, PageParams, PER_PAGE};
