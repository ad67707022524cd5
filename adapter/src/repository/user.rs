use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        user::{
            event::{CreateUserProfile, DeleteUserProfile, UpdateUserRole},
            UserProfile,
        },
    },
    repository::user::UserRepository,
    store::{to_fields, Collection, DocumentPath, Principal, Query, ReportingStore},
};
use shared::error::{AppError, AppResult};

use crate::database::model::user::{RolePatch, UserProfileDocument};

#[derive(new)]
pub struct UserRepositoryImpl {
    store: ReportingStore,
}

fn user_path(uid: &UserId) -> DocumentPath {
    DocumentPath::new(Collection::Users, uid.as_str())
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, principal: &Principal, event: CreateUserProfile) -> AppResult<()> {
        let path = user_path(&event.uid);
        let fields = to_fields(&UserProfileDocument::from(event))?;
        self.store.create(principal, &path, fields).await?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        principal: &Principal,
        uid: &UserId,
    ) -> AppResult<Option<UserProfile>> {
        let doc = self.store.get(principal, &user_path(uid)).await?;
        Ok(doc.map(|d| d.decode::<UserProfile>()).transpose()?)
    }

    async fn find_all(&self, principal: &Principal) -> AppResult<Vec<UserProfile>> {
        let docs = self
            .store
            .list(principal, &Query::collection(Collection::Users))
            .await?;
        docs.iter()
            .map(|doc| doc.decode::<UserProfile>().map_err(AppError::from))
            .collect()
    }

    async fn update_role(&self, principal: &Principal, event: UpdateUserRole) -> AppResult<()> {
        let patch = to_fields(&RolePatch::from(&event))?;
        self.store
            .update(principal, &user_path(&event.uid), patch)
            .await?;
        Ok(())
    }

    async fn delete(&self, principal: &Principal, event: DeleteUserProfile) -> AppResult<()> {
        self.store.delete(principal, &user_path(&event.uid)).await?;
        tracing::warn!(
            uid = %event.uid,
            "profile deleted; the identity-provider account is left in place"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use kernel::{channel::ErrorChannel, model::role::Role};
    use std::sync::Arc;

    fn repository() -> UserRepositoryImpl {
        UserRepositoryImpl::new(ReportingStore::new(
            Arc::new(MemoryDocumentStore::new()),
            ErrorChannel::new(),
        ))
    }

    fn profile(uid: &str, role: Role) -> CreateUserProfile {
        CreateUserProfile::new(
            UserId::from(uid),
            "Moussa Ba".into(),
            format!("{uid}@example.com"),
            role,
            None,
        )
    }

    #[tokio::test]
    async fn self_registration_is_limited_to_guest_profiles() -> anyhow::Result<()> {
        let repo = repository();
        let me = Principal::identity(UserId::from("u1"));

        let res = repo.create(&me, profile("u1", Role::Superadmin)).await;
        assert!(matches!(res, Err(AppError::PermissionDenied(_))));
        let res = repo.create(&me, profile("u2", Role::Guest)).await;
        assert!(matches!(res, Err(AppError::PermissionDenied(_))));

        repo.create(&me, profile("u1", Role::Guest)).await?;
        let stored = repo.find_by_id(&me, &UserId::from("u1")).await?.unwrap();
        assert_eq!(stored.role, Role::Guest);
        assert_eq!(stored.email, "u1@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn superadmin_manages_roles() -> anyhow::Result<()> {
        let repo = repository();
        let admin = Principal::user(UserId::from("admin"), Role::Superadmin);
        repo.create(&admin, profile("u1", Role::Guest)).await?;

        repo.update_role(&admin, UpdateUserRole::new(UserId::from("u1"), Role::Receptionist))
            .await?;
        let all = repo.find_all(&admin).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role, Role::Receptionist);

        // 一般ユーザーは他人のプロフィールを読めない
        let other = Principal::user(UserId::from("u2"), Role::Guest);
        assert!(matches!(
            repo.find_by_id(&other, &UserId::from("u1")).await,
            Err(AppError::PermissionDenied(_))
        ));

        repo.delete(&admin, DeleteUserProfile::new(UserId::from("u1")))
            .await?;
        assert!(repo.find_by_id(&admin, &UserId::from("u1")).await?.is_none());
        Ok(())
    }
}
