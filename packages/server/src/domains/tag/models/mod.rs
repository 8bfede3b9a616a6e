pub mod tag;

pub use tag::{Tag, TagWithOfficeId};
