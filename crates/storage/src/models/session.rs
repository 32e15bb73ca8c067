use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;
use crate::error::{Result, StorageError};

/// Caller identity for a single request.
///
/// Issued by the identity gateway at login and dropped at logout; the engine
/// only ever sees the value handed to it and never keeps one around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(StorageError::Forbidden(format!(
                "only {}s can perform this action",
                role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_role() {
        let session = Session::new(Uuid::new_v4(), Role::Athlete);
        assert!(session.require_role(Role::Athlete).is_ok());
        assert!(matches!(
            session.require_role(Role::Recruiter),
            Err(StorageError::Forbidden(_))
        ));
    }
}
