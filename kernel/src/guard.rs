use crate::model::{role::Role, user::UserProfile};

/// Current session profile as seen by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Loading,
    /// `None` when nobody is signed in or the profile document is absent.
    Resolved(Option<UserProfile>),
}

#[derive(Debug, PartialEq)]
pub enum Access<'a> {
    Loading,
    Granted(&'a UserProfile),
    Denied,
}

#[derive(Debug, Clone, Copy)]
pub struct RoleGuard {
    allowed: &'static [Role],
}

impl RoleGuard {
    pub const ADMIN: RoleGuard = RoleGuard::new(&[Role::Superadmin]);
    pub const FRONT_DESK: RoleGuard = RoleGuard::new(&[Role::Superadmin, Role::Receptionist]);
    pub const INVENTORY: RoleGuard = RoleGuard::new(&[Role::Superadmin, Role::StockManager]);

    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    // 判定結果はキャッシュしない。呼び出しごとに評価する
    pub fn check<'a>(&self, state: &'a ProfileState) -> Access<'a> {
        match state {
            ProfileState::Loading => Access::Loading,
            ProfileState::Resolved(Some(profile)) if self.permits(profile.role) => {
                Access::Granted(profile)
            }
            ProfileState::Resolved(_) => Access::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::UserId;

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            uid: UserId::from("u1"),
            display_name: "Fatou".into(),
            email: "fatou@example.com".into(),
            role,
            photo_url: None,
        }
    }

    #[test]
    fn receptionist_is_denied_admin_views() {
        let state = ProfileState::Resolved(Some(profile(Role::Receptionist)));
        assert_eq!(RoleGuard::ADMIN.check(&state), Access::Denied);
    }

    #[test]
    fn superadmin_is_granted_admin_views() {
        let state = ProfileState::Resolved(Some(profile(Role::Superadmin)));
        assert!(matches!(RoleGuard::ADMIN.check(&state), Access::Granted(p) if p.role == Role::Superadmin));
    }

    #[test]
    fn loading_profile_is_neither_granted_nor_denied() {
        assert_eq!(RoleGuard::ADMIN.check(&ProfileState::Loading), Access::Loading);
    }

    #[test]
    fn missing_profile_is_denied() {
        assert_eq!(RoleGuard::FRONT_DESK.check(&ProfileState::Resolved(None)), Access::Denied);
    }

    #[test]
    fn broader_guards_admit_their_roles() {
        let state = ProfileState::Resolved(Some(profile(Role::Receptionist)));
        assert!(matches!(RoleGuard::FRONT_DESK.check(&state), Access::Granted(_)));
        assert_eq!(RoleGuard::INVENTORY.check(&state), Access::Denied);
    }
}
