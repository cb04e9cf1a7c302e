use crate::error::AppError;
use crate::models::User;
use crate::session;
use crate::store;
use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

/// The logged-in user resolved from the signed session cookie.
pub struct CurrentUser(pub User);

/// The logged-in user, additionally required to hold the admin flag.
/// Anonymous requests and non-admin users are rejected with 403 before
/// the handler body runs.
pub struct AdminUser(pub User);

async fn resolve_user<S>(parts: &mut Parts, state: &S) -> Result<Option<User>, AppError>
where
    SqlitePool: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    let jar = match SignedCookieJar::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(never) => match never {},
    };

    let Some(user_id) = session::user_id(&jar) else {
        return Ok(None);
    };

    let pool = SqlitePool::from_ref(state);
    store::users::find_by_id(&pool, user_id).await
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    SqlitePool: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_user(parts, state).await?.map(CurrentUser))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    SqlitePool: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = resolve_user(parts, state)
            .await?
            .ok_or(AppError::Forbidden)?;

        if !user.is_admin {
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(user))
    }
}
