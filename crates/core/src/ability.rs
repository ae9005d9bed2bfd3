//! Ability checks consulted before validation and export operations.
//!
//! [`PermissionChecker`] is the seam; [`RoleAbility`] is the role-based
//! implementation the server ships with.

use uuid::Uuid;

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_DEVELOPER, ROLE_EDITOR, ROLE_VIEWER};

/// The signed-in user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_uuid: Uuid,
    pub organization_uuid: Uuid,
    /// Organization role name (see [`crate::roles`]).
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Manage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    ExportCsv,
    Validation,
}

/// A resource kind scoped to an organization and project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub kind: SubjectKind,
    pub organization_uuid: Uuid,
    pub project_uuid: Uuid,
}

impl Subject {
    pub fn new(kind: SubjectKind, organization_uuid: Uuid, project_uuid: Uuid) -> Self {
        Self {
            kind,
            organization_uuid,
            project_uuid,
        }
    }
}

/// Answers allow/deny for an action on a subject.
pub trait PermissionChecker: Send + Sync {
    fn can(&self, user: &SessionUser, action: Action, subject: &Subject) -> bool;

    fn cannot(&self, user: &SessionUser, action: Action, subject: &Subject) -> bool {
        !self.can(user, action, subject)
    }
}

/// Fail with [`CoreError::Forbidden`] unless `user` may perform `action`.
pub fn ensure_can(
    checker: &dyn PermissionChecker,
    user: &SessionUser,
    action: Action,
    subject: &Subject,
) -> Result<(), CoreError> {
    if checker.cannot(user, action, subject) {
        return Err(CoreError::Forbidden(format!(
            "Role '{}' cannot {action:?} {:?} in project {}",
            user.role, subject.kind, subject.project_uuid
        )));
    }
    Ok(())
}

/// Role-based abilities within the user's own organization.
///
/// | Role        | ExportCsv | Validation |
/// |-------------|-----------|------------|
/// | `admin`     | manage    | manage     |
/// | `developer` | manage    | manage     |
/// | `editor`    | manage    | view       |
/// | `viewer`    | --        | view       |
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAbility;

impl PermissionChecker for RoleAbility {
    fn can(&self, user: &SessionUser, action: Action, subject: &Subject) -> bool {
        if user.organization_uuid != subject.organization_uuid {
            return false;
        }
        let role = user.role.as_str();
        match (subject.kind, action) {
            (_, _) if role == ROLE_ADMIN || role == ROLE_DEVELOPER => true,
            (SubjectKind::ExportCsv, _) => role == ROLE_EDITOR,
            (SubjectKind::Validation, Action::View) => role == ROLE_EDITOR || role == ROLE_VIEWER,
            (SubjectKind::Validation, Action::Manage) => false,
        }
    }
}
