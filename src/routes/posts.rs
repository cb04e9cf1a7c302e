use crate::error::AppError;
use crate::extractors::{AdminUser, CurrentUser};
use crate::models::{CommentWithAuthor, PostWithAuthor};
use crate::routes::validated;
use crate::store::posts::{NewPost, PostFields};
use crate::{session, store};
use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use axum_extra::extract::SignedCookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Serialize)]
pub struct PostResponse {
    id: i64,
    title: String,
    subtitle: String,
    date: String,
    body: String,
    img_url: String,
    author: String,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(post: PostWithAuthor) -> Self {
        Self {
            id: post.id,
            title: post.title,
            subtitle: post.subtitle,
            date: post.date,
            body: post.body,
            img_url: post.img_url,
            author: post.author_name,
        }
    }
}

#[derive(Serialize)]
pub struct CommentResponse {
    id: i64,
    text: String,
    author: String,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author: comment.author_name,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct PostPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "subtitle is required"))]
    pub subtitle: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
    #[validate(url(message = "a valid image URL is required"))]
    pub img_url: String,
}

#[derive(Deserialize, Validate)]
pub struct CommentPayload {
    #[validate(length(min = 1, message = "comment text is required"))]
    pub text: String,
}

pub async fn list_posts(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = store::posts::list(&pool).await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

pub async fn show_post(
    State(pool): State<SqlitePool>,
    jar: SignedCookieJar,
    Path(id): Path<i64>,
) -> Result<(SignedCookieJar, Json<Value>), AppError> {
    let post = store::posts::get(&pool, id).await?.ok_or(AppError::NotFound)?;
    let comments = store::comments::for_post(&pool, id).await?;

    let (jar, flash) = session::take_flash(jar);
    let comments: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();

    Ok((
        jar,
        Json(json!({
            "post": PostResponse::from(post),
            "comments": comments,
            "flash": flash,
        })),
    ))
}

pub async fn add_comment(
    State(pool): State<SqlitePool>,
    user: Option<CurrentUser>,
    jar: SignedCookieJar,
    Path(id): Path<i64>,
    Form(payload): Form<CommentPayload>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let Some(CurrentUser(user)) = user else {
        let jar = session::flash(jar, "Please login to post comments!");
        return Ok((jar, Redirect::to("/login")));
    };

    validated(&payload)?;

    store::posts::get(&pool, id).await?.ok_or(AppError::NotFound)?;
    store::comments::create(&pool, id, user.id, &payload.text).await?;

    Ok((jar, Redirect::to(&format!("/post/{id}"))))
}

pub async fn new_post_page(_admin: AdminUser, jar: SignedCookieJar) -> (SignedCookieJar, Json<Value>) {
    let (jar, flash) = session::take_flash(jar);
    (jar, Json(json!({ "page": "new-post", "flash": flash })))
}

pub async fn create_post(
    State(pool): State<SqlitePool>,
    AdminUser(admin): AdminUser,
    Form(payload): Form<PostPayload>,
) -> Result<Redirect, AppError> {
    validated(&payload)?;

    let post = store::posts::create(
        &pool,
        NewPost {
            title: &payload.title,
            subtitle: &payload.subtitle,
            date: &Utc::now().format("%B %d, %Y").to_string(),
            body: &payload.body,
            img_url: &payload.img_url,
            author_id: admin.id,
        },
    )
    .await?;

    tracing::info!(post_id = post.id, "post created");
    Ok(Redirect::to("/"))
}

pub async fn edit_post_page(
    State(pool): State<SqlitePool>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = store::posts::get(&pool, id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(post.into()))
}

pub async fn update_post(
    State(pool): State<SqlitePool>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Form(payload): Form<PostPayload>,
) -> Result<Redirect, AppError> {
    validated(&payload)?;

    store::posts::update(
        &pool,
        id,
        PostFields {
            title: &payload.title,
            subtitle: &payload.subtitle,
            body: &payload.body,
            img_url: &payload.img_url,
        },
    )
    .await?;

    Ok(Redirect::to(&format!("/post/{id}")))
}

pub async fn delete_post(
    State(pool): State<SqlitePool>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    store::posts::delete(&pool, id).await?;

    tracing::info!(post_id = id, "post deleted");
    Ok(Redirect::to("/"))
}
