//! HTTP-level integration tests for the `/projects/{project_uuid}/validate`
//! endpoints.
//!
//! Requests are sent straight to the router with `tower::ServiceExt`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json_auth, session_user,
    token_for,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;
use vantage_core::ability::SessionUser;
use vantage_core::roles::{ROLE_DEVELOPER, ROLE_EDITOR, ROLE_VIEWER};

fn report_uri(project_uuid: Uuid) -> String {
    format!("/api/v1/projects/{project_uuid}/validate")
}

fn results_uri(project_uuid: Uuid) -> String {
    format!("/api/v1/projects/{project_uuid}/validate/results")
}

fn mixed_batch(project_uuid: Uuid, chart_uuid: Uuid, dashboard_uuid: Uuid) -> Value {
    json!([
        {
            "source": "dashboard",
            "project_uuid": project_uuid,
            "error": "Filter field 'customers_region' no longer exists",
            "error_type": "filter",
            "dashboard_uuid": dashboard_uuid,
            "field_name": "customers_region",
            "name": "Sales overview"
        },
        {
            "source": "chart",
            "project_uuid": project_uuid,
            "error": "Dimension 'orders_status' no longer exists",
            "error_type": "dimension",
            "chart_uuid": chart_uuid,
            "field_name": "orders_status",
            "chart_name": "Orders by status"
        },
        {
            "source": "table",
            "project_uuid": project_uuid,
            "error": "Model 'payments' failed to compile",
            "error_type": "model",
            "model_name": "payments"
        }
    ])
}

/// A developer in a fresh organization, plus their token.
fn developer() -> (SessionUser, String) {
    let user = session_user(ROLE_DEVELOPER);
    let token = token_for(&user);
    (user, token)
}

async fn record(pool: &PgPool, token: &str, project_uuid: Uuid, body: Value) {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, &results_uri(project_uuid), body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn report(pool: &PgPool, token: &str, uri: &str) -> Vec<Value> {
    let app = build_test_app(pool.clone());
    let response = get_auth(app, uri, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]
        .as_array()
        .expect("data should be an array")
        .clone()
}

// ---------------------------------------------------------------------------
// Test: report requires a bearer token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_requires_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, &report_uri(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: a garbage token is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_rejects_invalid_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_auth(app, &report_uri(Uuid::new_v4()), "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: recorded results come back grouped table, chart, dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_groups_in_source_order(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    let body = json!({
        "validations": mixed_batch(project_uuid, Uuid::new_v4(), Uuid::new_v4())
    });
    record(&pool, &token, project_uuid, body).await;

    let entries = report(&pool, &token, &report_uri(project_uuid)).await;
    let sources: Vec<&str> = entries
        .iter()
        .map(|e| e["source"].as_str().unwrap())
        .collect();
    assert_eq!(sources, ["table", "chart", "dashboard"]);

    // Neither the chart nor the dashboard exists, so the snapshots are used.
    assert_eq!(entries[0]["name"], "payments");
    assert_eq!(entries[1]["name"], "Orders by status");
    assert_eq!(entries[1]["chart_type"], "vertical_bar");
    assert_eq!(entries[1]["chart_views"], 0);
    assert_eq!(entries[2]["name"], "Sales overview");
    assert_eq!(entries[2]["error_type"], "filter");
}

// ---------------------------------------------------------------------------
// Test: job_id query parameter selects that run's results only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_scoped_by_job_id(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    let chart_uuid = Uuid::new_v4();
    let dashboard_uuid = Uuid::new_v4();

    record(
        &pool,
        &token,
        project_uuid,
        json!({ "validations": mixed_batch(project_uuid, chart_uuid, dashboard_uuid) }),
    )
    .await;
    record(
        &pool,
        &token,
        project_uuid,
        json!({
            "job_id": "job-42",
            "validations": [{
                "source": "table",
                "project_uuid": project_uuid,
                "error": "Model 'refunds' failed to compile",
                "error_type": "model",
                "model_name": "refunds"
            }]
        }),
    )
    .await;

    let unscoped = report(&pool, &token, &report_uri(project_uuid)).await;
    assert_eq!(unscoped.len(), 3);

    let scoped = report(
        &pool,
        &token,
        &format!("{}?job_id=job-42", report_uri(project_uuid)),
    )
    .await;
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0]["name"], "refunds");
}

// ---------------------------------------------------------------------------
// Test: an empty job_id parameter reads the ad-hoc results
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_job_id_reads_ad_hoc_results(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    record(
        &pool,
        &token,
        project_uuid,
        json!({
            "validations": [{
                "source": "table",
                "project_uuid": project_uuid,
                "error": "Model 'payments' failed to compile",
                "error_type": "model",
                "model_name": "payments"
            }]
        }),
    )
    .await;

    let entries = report(
        &pool,
        &token,
        &format!("{}?job_id=", report_uri(project_uuid)),
    )
    .await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "payments");
}

// ---------------------------------------------------------------------------
// Test: a viewer may read the report but not record results
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_viewer_reads_but_cannot_record(pool: PgPool) {
    let viewer = session_user(ROLE_VIEWER);
    let token = token_for(&viewer);
    let project_uuid = Uuid::new_v4();

    let entries = report(&pool, &token, &report_uri(project_uuid)).await;
    assert!(entries.is_empty());

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        &results_uri(project_uuid),
        json!({ "validations": mixed_batch(project_uuid, Uuid::new_v4(), Uuid::new_v4()) }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: an editor cannot clear a project's results
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_cannot_clear_project(pool: PgPool) {
    let editor = session_user(ROLE_EDITOR);
    let app = build_test_app(pool);
    let response = delete_auth(app, &report_uri(Uuid::new_v4()), &token_for(&editor)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: results for another project in the batch are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_for_other_project_rejected(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    let other_project = Uuid::new_v4();

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &results_uri(project_uuid),
        json!({ "validations": mixed_batch(other_project, Uuid::new_v4(), Uuid::new_v4()) }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let entries = report(&pool, &token, &report_uri(other_project)).await;
    assert!(entries.is_empty(), "nothing should have been recorded");
}

// ---------------------------------------------------------------------------
// Test: unknown source discriminant is a client error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_source_rejected(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        &results_uri(project_uuid),
        json!({
            "validations": [{
                "source": "spreadsheet",
                "project_uuid": project_uuid,
                "error": "x",
                "error_type": "model"
            }]
        }),
        &token,
    )
    .await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Test: DELETE /validate clears the project's report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project_validations(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    record(
        &pool,
        &token,
        project_uuid,
        json!({ "validations": mixed_batch(project_uuid, Uuid::new_v4(), Uuid::new_v4()) }),
    )
    .await;

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &report_uri(project_uuid), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let entries = report(&pool, &token, &report_uri(project_uuid)).await;
    assert!(entries.is_empty());
}

// ---------------------------------------------------------------------------
// Test: DELETE /validate/{id} dismisses one result
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_single_validation(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    record(
        &pool,
        &token,
        project_uuid,
        json!({ "validations": mixed_batch(project_uuid, Uuid::new_v4(), Uuid::new_v4()) }),
    )
    .await;

    let entries = report(&pool, &token, &report_uri(project_uuid)).await;
    let chart_id = entries[1]["validation_id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("{}/{chart_id}", report_uri(project_uuid)),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = report(&pool, &token, &report_uri(project_uuid)).await;
    let sources: Vec<&str> = remaining
        .iter()
        .map(|e| e["source"].as_str().unwrap())
        .collect();
    assert_eq!(sources, ["table", "dashboard"]);
}

// ---------------------------------------------------------------------------
// Test: deleting through another project's path is 404 and keeps the row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_validation_from_other_project_is_not_found(pool: PgPool) {
    let (_, token) = developer();
    let project_uuid = Uuid::new_v4();
    record(
        &pool,
        &token,
        project_uuid,
        json!({ "validations": mixed_batch(project_uuid, Uuid::new_v4(), Uuid::new_v4()) }),
    )
    .await;
    let entries = report(&pool, &token, &report_uri(project_uuid)).await;
    let table_id = entries[0]["validation_id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("{}/{table_id}", report_uri(Uuid::new_v4())),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");

    let entries = report(&pool, &token, &report_uri(project_uuid)).await;
    assert_eq!(entries.len(), 3);
}

// ---------------------------------------------------------------------------
// Test: deleting an unknown validation id is 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unknown_validation_is_not_found(pool: PgPool) {
    let (_, token) = developer();
    let app = build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("{}/999999", report_uri(Uuid::new_v4())),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
