//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role
//! does not meet the minimum requirement. Use these in route handlers
//! to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use salles_core::error::CoreError;
use salles_core::roles::RequesterRole;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `privileged` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn privileged_only(RequirePrivileged(user): RequirePrivileged) -> AppResult<Json<()>> {
///     // user is guaranteed to be privileged here
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePrivileged(pub AuthUser);

impl FromRequestParts<AppState> for RequirePrivileged {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != RequesterRole::Privileged {
            return Err(AppError::Core(CoreError::Forbidden(
                "Privileged role required".into(),
            )));
        }
        Ok(RequirePrivileged(user))
    }
}
