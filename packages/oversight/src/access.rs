// ABOUTME: Shared authorization gate for program-scoped operations
// ABOUTME: ADMIN sees everything; USER only what they are responsible for

use peduli_programs::{Program, Role};
use serde::{Deserialize, Serialize};

/// The authenticated identity an operation runs as.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requester {
    pub user_id: String,
    pub role: Role,
}

impl Requester {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Single source of truth for who may see or act on a program.
/// Every program-scoped read and write funnels through this check.
pub fn can_access_program(requester: &Requester, program: &Program) -> bool {
    requester.is_admin() || program.responsible_user_id == requester.user_id
}
