use crate::error::AppError;
use crate::routes::validated;
use crate::{password, session, store};
use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

pub async fn register_page(jar: SignedCookieJar) -> (SignedCookieJar, Json<Value>) {
    let (jar, flash) = session::take_flash(jar);
    (jar, Json(json!({ "page": "register", "flash": flash })))
}

pub async fn register(
    State(pool): State<SqlitePool>,
    jar: SignedCookieJar,
    Form(payload): Form<RegisterPayload>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    validated(&payload)?;

    let hash = password::hash(&payload.password)?;

    let user = match store::users::create(&pool, &payload.email, &payload.name, &hash).await {
        Ok(user) => user,
        Err(AppError::DuplicateEmail) => {
            let jar = session::flash(jar, "You've already signed up with this email, log in instead!");
            return Ok((jar, Redirect::to("/login")));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(user_id = user.id, "account registered");
    Ok((session::login(jar, user.id), Redirect::to("/")))
}

pub async fn login_page(jar: SignedCookieJar) -> (SignedCookieJar, Json<Value>) {
    let (jar, flash) = session::take_flash(jar);
    (jar, Json(json!({ "page": "login", "flash": flash })))
}

pub async fn login(
    State(pool): State<SqlitePool>,
    jar: SignedCookieJar,
    Form(payload): Form<LoginPayload>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    validated(&payload)?;

    // Unknown email and bad password get distinct messages.
    let Some(user) = store::users::find_by_email(&pool, &payload.email).await? else {
        let jar = session::flash(jar, "Email does not exist");
        return Ok((jar, Redirect::to("/login")));
    };

    if !password::verify(&user.password_hash, &payload.password) {
        let jar = session::flash(jar, "Invalid password!");
        return Ok((jar, Redirect::to("/login")));
    }

    Ok((session::login(jar, user.id), Redirect::to("/")))
}

pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (session::logout(jar), Redirect::to("/"))
}
