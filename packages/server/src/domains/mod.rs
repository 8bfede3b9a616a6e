// Domain modules
pub mod auth;
pub mod office;
pub mod tag;
