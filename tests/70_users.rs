mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn listing_users_is_administrator_only() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, _) = common::register_user(server, "usr_plain", "keuangan", "Dinas U").await?;

    let res = common::client()
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = common::admin_token(server).await?;
    let res = common::client()
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let users: Vec<Value> = res.json().await?;
    assert!(users.iter().any(|u| u["username"] == "admin"));
    assert!(users.iter().all(|u| u.get("password").is_none()));
    Ok(())
}

#[tokio::test]
async fn self_update_rehashes_password_and_audits() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, user_id) =
        common::register_user(server, "usr_self", "keuangan", "Dinas US").await?;

    let res = common::client()
        .patch(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Nama Baru", "password": "sandi-baru" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Nama Baru");
    assert!(body.get("password").is_none());

    // Old password no longer works, new one does
    let res = common::client()
        .post(format!("{}/api/login", server.base_url))
        .json(&json!({ "username": "usr_self", "password": "rahasia123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    common::login(server, "usr_self", "sandi-baru").await?;

    let rows = common::audit_rows_for(server, "user", user_id).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["action"], "update");
    assert_eq!(rows[0]["details"]["changes"]["name"], "Nama Baru");
    // Plaintext password stripped from the trail
    assert!(rows[0]["details"]["changes"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn editing_someone_else_needs_manage_users() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token_a, _) = common::register_user(server, "usr_a", "keuangan", "Dinas UA").await?;
    let (_, user_b) = common::register_user(server, "usr_b", "pimpinan", "Dinas UB").await?;

    let res = common::client()
        .patch(format!("{}/api/users/{}", server.base_url, user_b))
        .bearer_auth(&token_a)
        .json(&json!({ "department": "Dinas Lain" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = common::admin_token(server).await?;
    let res = common::client()
        .patch(format!("{}/api/users/{}", server.base_url, user_b))
        .bearer_auth(&admin)
        .json(&json!({ "department": "Dinas Lain" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["department"], "Dinas Lain");
    Ok(())
}

#[tokio::test]
async fn self_update_may_change_role() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, user_id) =
        common::register_user(server, "usr_promote", "keuangan", "Dinas UP").await?;

    // Role edits on one's own record are as open as registration, which
    // accepts any role
    let res = common::client()
        .patch(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "role": "administrator" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["role"], "administrator");

    // The new role takes effect on the next request
    let res = common::client()
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn updating_absent_user_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let admin = common::admin_token(server).await?;

    let res = common::client()
        .patch(format!("{}/api/users/909090", server.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Tidak Ada" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "User not found");
    Ok(())
}
