use crate::tests::{count, get, json_body, location, post_form, register, test_app};
use axum::Router;
use axum::http::StatusCode;

async fn create_post(app: &Router, cookie: &str, title: &str) {
    let response = post_form(
        app,
        "/new-post",
        &format!("title={title}&subtitle=S&body=B&img_url=https://example.com/cover.png"),
        Some(cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn index_lists_posts_with_author_names() {
    let (app, _state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    create_post(&app, &admin, "First").await;
    create_post(&app, &admin, "Second").await;

    let body = json_body(get(&app, "/", None).await).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "First");
    assert_eq!(posts[1]["title"], "Second");
    assert_eq!(posts[0]["author"], "Alice");
}

#[tokio::test]
async fn missing_post_is_a_404() {
    let (app, _state) = test_app().await;

    let response = get(&app, "/post/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_reject_anonymous_and_non_admin_users() {
    let (app, state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    let visitor = register(&app, "visitor@example.com", "Bob", "hunter22").await;
    create_post(&app, &admin, "Kept").await;

    let form = "title=X&subtitle=S&body=B&img_url=https://example.com/x.png";

    for cookie in [None, Some(visitor.as_str())] {
        let response = post_form(&app, "/new-post", form, cookie).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = post_form(&app, "/edit-post/1", form, cookie).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = get(&app, "/delete/1", cookie).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // Nothing was created, edited, or deleted.
    assert_eq!(count(&state, "blog_posts").await, 1);
    let title: String = sqlx::query_scalar("SELECT title FROM blog_posts WHERE id = 1")
        .fetch_one(&state.db)
        .await
        .unwrap();
    assert_eq!(title, "Kept");
}

#[tokio::test]
async fn duplicate_title_is_rejected() {
    let (app, state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    create_post(&app, &admin, "Unique").await;

    let response = post_form(
        &app,
        "/new-post",
        "title=Unique&subtitle=Other&body=Other&img_url=https://example.com/other.png",
        Some(&admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(count(&state, "blog_posts").await, 1);
}

#[tokio::test]
async fn edit_replaces_fields_but_keeps_author_and_date() {
    let (app, _state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    create_post(&app, &admin, "T").await;

    let before = json_body(get(&app, "/post/1", None).await).await;
    let original_date = before["post"]["date"].as_str().unwrap().to_string();

    let response = post_form(
        &app,
        "/edit-post/1",
        "title=T&subtitle=S2&body=B&img_url=https://example.com/cover.png",
        Some(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/post/1"));

    let after = json_body(get(&app, "/post/1", None).await).await;
    assert_eq!(after["post"]["title"], "T");
    assert_eq!(after["post"]["subtitle"], "S2");
    assert_eq!(after["post"]["body"], "B");
    assert_eq!(after["post"]["author"], "Alice");
    assert_eq!(after["post"]["date"], original_date.as_str());
}

#[tokio::test]
async fn editing_a_missing_post_is_a_404() {
    let (app, _state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;

    let response = post_form(
        &app,
        "/edit-post/42",
        "title=T&subtitle=S&body=B&img_url=https://example.com/cover.png",
        Some(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/edit-post/42", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_creation_validates_fields() {
    let (app, state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;

    let response = post_form(
        &app,
        "/new-post",
        "title=&subtitle=S&body=B&img_url=not-a-url",
        Some(&admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(count(&state, "blog_posts").await, 0);
}

#[tokio::test]
async fn anonymous_comment_is_redirected_to_login_and_not_persisted() {
    let (app, state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    create_post(&app, &admin, "T").await;

    let response = post_form(&app, "/post/1", "text=Hello", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert_eq!(count(&state, "comments").await, 0);
}

#[tokio::test]
async fn logged_in_comment_is_persisted_with_author() {
    let (app, state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    create_post(&app, &admin, "T").await;
    let visitor = register(&app, "visitor@example.com", "Bob", "hunter22").await;

    let response = post_form(&app, "/post/1", "text=Great-read", Some(&visitor)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/post/1"));
    assert_eq!(count(&state, "comments").await, 1);

    let body = json_body(get(&app, "/post/1", None).await).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "Great-read");
    assert_eq!(comments[0]["author"], "Bob");
}

#[tokio::test]
async fn commenting_on_a_missing_post_is_a_404() {
    let (app, state) = test_app().await;

    let visitor = register(&app, "visitor@example.com", "Bob", "hunter22").await;

    let response = post_form(&app, "/post/7", "text=Hello", Some(&visitor)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(count(&state, "comments").await, 0);
}

#[tokio::test]
async fn deleting_a_post_cascades_to_its_comments() {
    let (app, state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;
    create_post(&app, &admin, "Doomed").await;
    create_post(&app, &admin, "Kept").await;
    let visitor = register(&app, "visitor@example.com", "Bob", "hunter22").await;
    post_form(&app, "/post/1", "text=On-doomed", Some(&visitor)).await;
    post_form(&app, "/post/2", "text=On-kept", Some(&visitor)).await;

    let response = get(&app, "/delete/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    assert_eq!(count(&state, "blog_posts").await, 1);
    assert_eq!(count(&state, "comments").await, 1);

    let response = get(&app, "/post/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_missing_post_is_a_404() {
    let (app, _state) = test_app().await;

    let admin = register(&app, "admin@example.com", "Alice", "hunter22").await;

    let response = get(&app, "/delete/9", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
