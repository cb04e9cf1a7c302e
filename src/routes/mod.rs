pub mod auth;
pub mod pages;
pub mod posts;

use crate::AppState;
use crate::error::AppError;
use axum::{
    Router,
    routing::get,
};
use validator::Validate;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::list_posts))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/post/{id}", get(posts::show_post).post(posts::add_comment))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact_page).post(pages::contact))
        .route("/new-post", get(posts::new_post_page).post(posts::create_post))
        .route(
            "/edit-post/{id}",
            get(posts::edit_post_page).post(posts::update_post),
        )
        .route("/delete/{id}", get(posts::delete_post))
        .with_state(state)
}

/// Surfaces form validation failures as a 422 with the field messages.
pub(crate) fn validated<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
