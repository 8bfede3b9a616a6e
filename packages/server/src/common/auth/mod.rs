//! Authorization for the Deskmarket API.
//!
//! Authentication happens at the HTTP edge (bearer token middleware); the
//! engine operations receive an explicit [`Caller`] and check capability
//! scopes and ownership against it:
//!
//! ```rust,ignore
//! caller.require_scope(Capability::OfficeUpdate)?;
//! caller.require_owner(office.user_id)?;
//! ```

mod caller;
mod capability;

pub use caller::Caller;
pub use capability::Capability;
