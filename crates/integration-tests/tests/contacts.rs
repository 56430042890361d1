//! End-to-end tests for the contact pages.
//!
//! Run with: cargo test -p contactbook-integration-tests

use reqwest::StatusCode;
use contactbook_integration_tests::TestContext;

#[tokio::test]
async fn test_add_then_list() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/add", &[("name", "Alice"), ("phone", "555-1111")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let page = ctx.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Contact added successfully!"));
    assert!(page.body.contains("Alice"));
    assert!(page.body.contains("555-1111"));

    // Notice is shown exactly once
    let again = ctx.get("/").await;
    assert!(!again.body.contains("Contact added successfully!"));
    assert!(again.body.contains("Alice"));
}

#[tokio::test]
async fn test_add_with_empty_name_is_rejected() {
    let ctx = TestContext::new().await;

    let resp = ctx.post_form("/add", &[("name", ""), ("phone", "555")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/add"));

    let form = ctx.get("/add").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Name and phone are required!"));
    assert!(ctx.contacts().await.is_empty());
}

#[tokio::test]
async fn test_add_with_missing_phone_field_is_rejected() {
    let ctx = TestContext::new().await;

    let resp = ctx.post_form("/add", &[("name", "Alice")]).await;
    assert_eq!(resp.location.as_deref(), Some("/add"));
    assert!(ctx.contacts().await.is_empty());
}

#[tokio::test]
async fn test_edit_existing_contact() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "Alice"), ("phone", "555-1111")])
        .await;
    ctx.post_form("/add", &[("name", "Bob"), ("phone", "555-2222")])
        .await;

    let form = ctx.get("/edit/1").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"Alice\""));
    assert!(form.body.contains("value=\"555-1111\""));

    let resp = ctx
        .post_form("/edit/1", &[("name", "Alice B."), ("phone", "555-3333")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let page = ctx.get("/").await;
    assert!(page.body.contains("Contact updated successfully!"));

    let contacts = ctx.contacts().await;
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "Alice B.");
    assert_eq!(contacts[0].phone, "555-3333");
    assert_eq!(contacts[1].name, "Bob");
    assert_eq!(contacts[1].phone, "555-2222");
}

#[tokio::test]
async fn test_edit_with_empty_phone_keeps_row() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "Alice"), ("phone", "555-1111")])
        .await;

    let resp = ctx
        .post_form("/edit/1", &[("name", "Alice"), ("phone", "")])
        .await;
    assert_eq!(resp.location.as_deref(), Some("/edit/1"));

    let form = ctx.get("/edit/1").await;
    assert!(form.body.contains("Name and phone are required!"));
    assert_eq!(ctx.contacts().await[0].phone, "555-1111");
}

#[tokio::test]
async fn test_edit_unknown_contact_is_not_found() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.get("/edit/42").await.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.get("/edit/abc").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_contact_is_noop() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "Alice"), ("phone", "1")])
        .await;

    let resp = ctx
        .post_form("/edit/99", &[("name", "Ghost"), ("phone", "0")])
        .await;
    assert_eq!(resp.location.as_deref(), Some("/"));

    let contacts = ctx.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Alice");
}

#[tokio::test]
async fn test_delete_twice() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "Alice"), ("phone", "1")])
        .await;
    ctx.post_form("/add", &[("name", "Bob"), ("phone", "2")])
        .await;

    let first = ctx.post_form("/delete/1", &[]).await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    assert_eq!(first.location.as_deref(), Some("/"));
    let page = ctx.get("/").await;
    assert!(page.body.contains("Contact deleted successfully!"));
    assert!(!page.body.contains("Alice"));

    let second = ctx.get("/delete/1").await;
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_eq!(second.location.as_deref(), Some("/"));
    let page = ctx.get("/").await;
    assert!(page.body.contains("Contact deleted successfully!"));

    let contacts = ctx.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Bob");
}

#[tokio::test]
async fn test_delete_via_get_link() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "Alice"), ("phone", "555-1111")])
        .await;
    assert_eq!(ctx.contacts().await.len(), 1);

    let resp = ctx.get("/delete/1").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let page = ctx.get("/").await;
    assert!(page.body.contains("Contact deleted successfully!"));
    assert!(ctx.contacts().await.is_empty());
}

#[tokio::test]
async fn test_repeated_form_field_uses_first_value() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/add", &[("name", "A"), ("name", "B"), ("phone", "1")])
        .await;
    assert_eq!(resp.location.as_deref(), Some("/"));

    let contacts = ctx.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "A");
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "Alice"), ("phone", "1")])
        .await;
    ctx.post_form("/delete/1", &[]).await;
    ctx.post_form("/add", &[("name", "Bob"), ("phone", "2")])
        .await;

    let contacts = ctx.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id.as_i64(), 2);
}

#[tokio::test]
async fn test_values_are_stored_verbatim() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &[("name", "  O'Brien & <Sons>  "), ("phone", "+1 (555) 000")])
        .await;

    let contacts = ctx.contacts().await;
    assert_eq!(contacts[0].name, "  O'Brien & <Sons>  ");
    assert_eq!(contacts[0].phone, "+1 (555) 000");

    // Rendered escaped
    let page = ctx.get("/").await;
    assert!(page.body.contains("&#60;Sons&#62;"));
    assert!(!page.body.contains("<Sons>"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let health = ctx.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);

    let ready = ctx.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let ctx = TestContext::new().await;

    let css = ctx.get("/static/css/main.css").await;
    assert_eq!(css.status, StatusCode::OK);
}
