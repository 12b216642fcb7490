mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_report(
    server: &common::TestServer,
    token: &str,
    title: &str,
    kind: &str,
    department: &str,
) -> Result<Value> {
    let res = common::client()
        .post(format!("{}/api/reports", server.base_url))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "type": kind,
            "period": "quarterly",
            "periodValue": "Q1 2025",
            "department": department
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    Ok(res.json().await?)
}

#[tokio::test]
async fn create_sets_generator_from_session_and_audits() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, user_id) =
        common::register_user(server, "rep_maker", "keuangan", "Dinas Rep").await?;

    let report =
        create_report(server, &token, "LRA Triwulan I", "financial", "Dinas Rep").await?;
    assert_eq!(report["generatedBy"].as_i64().unwrap(), user_id);
    assert_eq!(report["period"], "quarterly");
    assert!(report["createdAt"].is_string());

    let rows = common::audit_rows_for(server, "report", report["id"].as_i64().unwrap()).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["action"], "create");
    assert_eq!(rows[0]["details"]["title"], "LRA Triwulan I");
    Ok(())
}

#[tokio::test]
async fn validation_lists_missing_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, _) = common::register_user(server, "rep_invalid", "keuangan", "Dinas RI").await?;

    let res = common::client()
        .post(format!("{}/api/reports", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": "Laporan Kosong", "type": "financial" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    let fields: Vec<&str> =
        body["errors"].as_array().unwrap().iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"period"));
    assert!(fields.contains(&"periodValue"));
    assert!(fields.contains(&"department"));
    Ok(())
}

#[tokio::test]
async fn list_filters_by_type_then_department() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, _) = common::register_user(server, "rep_filter", "keuangan", "Dinas RF").await?;
    create_report(server, &token, "LRA RF", "financial-rf", "Dinas RF").await?;
    create_report(server, &token, "Kinerja RF", "performance-rf", "Dinas RF").await?;

    let res = common::client()
        .get(format!("{}/api/reports?type=financial-rf", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let by_type: Vec<Value> = res.json().await?;
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0]["title"], "LRA RF");

    let res = common::client()
        .get(format!("{}/api/reports?department=Dinas%20RF", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let by_dept: Vec<Value> = res.json().await?;
    assert_eq!(by_dept.len(), 2);

    let res = common::client()
        .get(format!("{}/api/reports", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let unfiltered: Vec<Value> = res.json().await?;
    assert!(unfiltered.is_empty());
    Ok(())
}

#[tokio::test]
async fn get_by_id_and_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, _) = common::register_user(server, "rep_get", "pimpinan", "Dinas RG").await?;
    let report = create_report(server, &token, "DPA RG", "accountability", "Dinas RG").await?;

    let res = common::client()
        .get(format!("{}/api/reports/{}", server.base_url, report["id"].as_i64().unwrap()))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = common::client()
        .get(format!("{}/api/reports/888888", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Report not found");
    Ok(())
}

#[tokio::test]
async fn reports_expose_no_patch_route() -> Result<()> {
    let server = common::ensure_server().await?;
    let (token, _) = common::register_user(server, "rep_patch", "keuangan", "Dinas RP").await?;
    let report = create_report(server, &token, "Tetap", "financial", "Dinas RP").await?;

    let res = common::client()
        .patch(format!("{}/api/reports/{}", server.base_url, report["id"].as_i64().unwrap()))
        .bearer_auth(&token)
        .json(&json!({ "title": "Diubah" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
