//! Ownership policy shared by every per-user resource route.
//!
//! A resource that exists but belongs to somebody else is answered with the same
//! status and body shape as one that does not exist at all, so a non-owner cannot
//! learn whether an identifier is in use.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

use crate::auth::extractors::AuthenticatedUser;
use crate::error::AppError;

/// Records that belong to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// The kinds of owned resources, used to phrase rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Category,
    Task,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceKind::Category => write!(f, "category"),
            ResourceKind::Task => write!(f, "task"),
        }
    }
}

impl ResourceKind {
    pub fn not_found(self) -> AppError {
        AppError::NotFound(format!("The {} with the given ID was not found!", self))
    }

    pub fn not_owned(self) -> AppError {
        AppError::NotFound(format!("The {} does not belong to this user!", self))
    }
}

/// Fetches a resource and hands it back only if `requester` owns it.
///
/// `fetch` is any lookup that yields `Ok(None)` for a missing record; store errors
/// pass through untouched.
pub async fn authorize_owner<T, F, Fut>(
    requester: &AuthenticatedUser,
    kind: ResourceKind,
    fetch: F,
) -> Result<T, AppError>
where
    T: Owned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, AppError>>,
{
    match fetch().await? {
        None => Err(kind.not_found()),
        Some(resource) if resource.owner_id() != requester.id => {
            log::debug!(
                "User {} attempted to access a {} owned by {}",
                requester.id,
                kind,
                resource.owner_id()
            );
            Err(kind.not_owned())
        }
        Some(resource) => Ok(resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[derive(Debug)]
    struct Note {
        owner: Uuid,
    }

    impl Owned for Note {
        fn owner_id(&self) -> Uuid {
            self.owner
        }
    }

    #[actix_rt::test]
    async fn test_owner_is_authorized() {
        let owner = AuthenticatedUser { id: Uuid::new_v4() };
        let note = authorize_owner(&owner, ResourceKind::Task, || async {
            Ok(Some(Note { owner: owner.id }))
        })
        .await
        .unwrap();
        assert_eq!(note.owner, owner.id);
    }

    #[actix_rt::test]
    async fn test_missing_resource() {
        let requester = AuthenticatedUser { id: Uuid::new_v4() };
        let result =
            authorize_owner::<Note, _, _>(&requester, ResourceKind::Task, || async { Ok(None) })
                .await;

        match result {
            Err(AppError::NotFound(msg)) => {
                assert_eq!(msg, "The task with the given ID was not found!")
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_foreign_resource_looks_like_missing_one() {
        let requester = AuthenticatedUser { id: Uuid::new_v4() };
        let result = authorize_owner(&requester, ResourceKind::Category, || async {
            Ok(Some(Note {
                owner: Uuid::new_v4(),
            }))
        })
        .await;

        let err = match result {
            Err(err @ AppError::NotFound(_)) => err,
            other => panic!("Unexpected result: {:?}", other),
        };
        assert_eq!(err.to_string(), "Not Found: The category does not belong to this user!");
        assert_eq!(
            err.error_response().status(),
            ResourceKind::Category.not_found().error_response().status()
        );
    }

    #[actix_rt::test]
    async fn test_store_errors_pass_through() {
        let requester = AuthenticatedUser { id: Uuid::new_v4() };
        let result = authorize_owner::<Note, _, _>(&requester, ResourceKind::Task, || async {
            Err(AppError::DatabaseError("connection reset".into()))
        })
        .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
