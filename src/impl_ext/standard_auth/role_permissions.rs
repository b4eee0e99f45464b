use crate::entities::{Action, AuthProvider, Role, User};

/// Whether `role` may perform `action`. Admins may do everything; every other
/// role gets a fixed whitelist.
pub fn role_allows(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::CommuneOfficer => matches!(
            action,
            Action::ReviewIdea
                | Action::ApprovePlan
                | Action::VerifyReceipt
                | Action::RecordDisbursement
        ),
        Role::CommunityCoordinator => matches!(
            action,
            Action::RegisterFunds
                | Action::SubmitIdea
                | Action::ManageMeetings
                | Action::CreatePlan
                | Action::UploadReceipt
                | Action::UpdateWorkflow
        ),
        Role::Member => matches!(action, Action::SubmitIdea),
    }
}

/// Permission checks from the user's role alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePermissionProvider;

impl RolePermissionProvider {
    pub fn new() -> Self {
        Self
    }
}

impl AuthProvider for RolePermissionProvider {
    fn has_permission(&self, user: &User, action: Action) -> bool {
        role_allows(user.role, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u".into(),
            name: "Test".into(),
            role,
        }
    }

    #[test]
    fn admin_may_do_everything() {
        let auth = RolePermissionProvider::new();
        assert!(auth.has_permission(&user(Role::Admin), Action::RecordDisbursement));
        assert!(auth.has_permission(&user(Role::Admin), Action::UpdateWorkflow));
    }

    #[test]
    fn officers_review_coordinators_enter_data() {
        assert!(role_allows(Role::CommuneOfficer, Action::ApprovePlan));
        assert!(!role_allows(Role::CommuneOfficer, Action::CreatePlan));
        assert!(role_allows(Role::CommunityCoordinator, Action::RegisterFunds));
        assert!(!role_allows(Role::CommunityCoordinator, Action::VerifyReceipt));
    }

    #[test]
    fn members_only_propose() {
        assert!(role_allows(Role::Member, Action::SubmitIdea));
        assert!(!role_allows(Role::Member, Action::ReviewIdea));
        assert!(!role_allows(Role::Member, Action::RegisterFunds));
        assert!(!role_allows(Role::Member, Action::UpdateWorkflow));
    }
}
