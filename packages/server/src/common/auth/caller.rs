use super::Capability;
use crate::common::errors::ApiError;
use crate::common::UserId;

/// The authenticated caller of an engine operation.
///
/// There is no ambient "current user": handlers build a `Caller` from the
/// verified token and pass it into every operation that needs one. List and
/// detail reads accept `Option<&Caller>` since they serve anonymous traffic
/// too.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: UserId,
    pub is_admin: bool,
    scopes: Vec<Capability>,
}

impl Caller {
    pub fn new(user_id: UserId, is_admin: bool, scopes: Vec<Capability>) -> Self {
        Self {
            user_id,
            is_admin,
            scopes,
        }
    }

    /// Whether the token carries the given capability scope.
    pub fn has_scope(&self, capability: Capability) -> bool {
        self.scopes.contains(&capability)
    }

    /// Require a capability scope on the token.
    pub fn require_scope(&self, capability: Capability) -> Result<(), ApiError> {
        if self.has_scope(capability) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    /// Require that the caller owns the resource.
    pub fn require_owner(&self, owner_id: UserId) -> Result<(), ApiError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}
