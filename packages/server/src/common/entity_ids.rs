//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{OfficeId, TagId, UserId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let office_id: OfficeId = OfficeId::from_i64(1);
//! let tag_id: TagId = TagId::from_i64(1);
//!
//! // This would be a compile error:
//! // let wrong: TagId = office_id;
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (hosts, visitors, admins).
pub struct User;

/// Marker type for Office entities (listings).
pub struct Office;

/// Marker type for Tag entities (amenities).
pub struct Tag;

/// Marker type for Image entities (office photos).
pub struct Image;

/// Marker type for Reservation entities.
pub struct Reservation;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Office entities.
pub type OfficeId = Id<Office>;

/// Typed ID for Tag entities.
pub type TagId = Id<Tag>;

/// Typed ID for Image entities.
pub type ImageId = Id<Image>;

/// Typed ID for Reservation entities.
pub type ReservationId = Id<Reservation>;
