use crate::AppState;
use crate::error::AppError;
use crate::mail::ContactMessage;
use crate::routes::validated;
use crate::session;
use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

pub async fn about() -> Json<Value> {
    Json(json!({ "page": "about" }))
}

pub async fn contact_page(jar: SignedCookieJar) -> (SignedCookieJar, Json<Value>) {
    let (jar, flash) = session::take_flash(jar);
    (jar, Json(json!({ "page": "contact", "flash": flash })))
}

pub async fn contact(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(payload): Form<ContactPayload>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    validated(&payload)?;

    let mailer = state.mailer.as_ref().ok_or(AppError::MailNotConfigured)?;

    mailer
        .send_contact(&ContactMessage {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            message: payload.message,
        })
        .await?;

    let jar = session::flash(jar, "Message Sent!");
    Ok((jar, Redirect::to("/contact")))
}
