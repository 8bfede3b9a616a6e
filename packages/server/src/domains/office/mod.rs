pub mod filter;
pub mod models;
pub mod service;
pub mod types;
pub mod validator;

pub use filter::OfficeFilter;
pub use models::{ApprovalStatus, Image, Office, Reservation, User};
pub use types::{ListParams, OfficePayload, OfficeResource};
