pub mod image;
pub mod office;
pub mod reservation;
pub mod user;

pub use image::Image;
pub use office::{ApprovalStatus, Office};
pub use reservation::{Reservation, ReservationStatus};
pub use user::User;
