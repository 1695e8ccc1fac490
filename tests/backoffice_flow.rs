use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::{Value, json};

use storefront_client::{
    config::ClientConfig,
    error::MutationResult,
    gateway::ApiGateway,
    models::{DocumentStatus, VendorStatus},
    services::admin::VendorWorkflow,
};

#[derive(Clone)]
struct StubState {
    list_fetches: Arc<AtomicUsize>,
}

// The back-office pattern: filtered fetch with facets, moderate, re-fetch.
#[tokio::test]
async fn moderation_refetches_the_list() -> anyhow::Result<()> {
    let (base_url, state) = spawn_stub().await?;
    let gateway = gateway(&base_url)?;
    let mut workflow = VendorWorkflow::vendors();

    workflow.refresh(&gateway).await?;
    assert_eq!(workflow.records().len(), 2);
    assert_eq!(workflow.counts().get("pending"), Some(&1));
    assert_eq!(state.list_fetches.load(Ordering::SeqCst), 1);

    let result = workflow
        .moderate(&gateway, "v-1", "approved", Some("docs look fine".into()))
        .await;
    assert!(result.is_success());
    // correctness-over-responsiveness: a successful moderation re-fetches
    assert_eq!(state.list_fetches.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn facet_filter_is_applied_server_side() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_stub().await?;
    let gateway = gateway(&base_url)?;
    let mut workflow = VendorWorkflow::vendors();

    workflow.set_facet(Some("under_review".into()));
    workflow.refresh(&gateway).await?;
    assert_eq!(workflow.records().len(), 1);
    assert_eq!(workflow.records()[0].status, VendorStatus::UnderReview);

    Ok(())
}

#[tokio::test]
async fn failed_moderation_keeps_the_list_and_carries_the_message() -> anyhow::Result<()> {
    let (base_url, state) = spawn_stub().await?;
    let gateway = gateway(&base_url)?;
    let mut workflow = VendorWorkflow::vendors();

    workflow.refresh(&gateway).await?;
    let before = state.list_fetches.load(Ordering::SeqCst);

    let result = workflow
        .moderate(&gateway, "v-conflict", "approved", None)
        .await;
    match result {
        MutationResult::Failure { message } => {
            assert_eq!(message, "Vendor has unresolved compliance documents");
        }
        MutationResult::Success { .. } => panic!("expected failure"),
    }
    // no re-fetch on failure, the operator re-triggers manually
    assert_eq!(state.list_fetches.load(Ordering::SeqCst), before);

    Ok(())
}

#[tokio::test]
async fn document_review_is_independent_of_vendor_status() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_stub().await?;
    let gateway = gateway(&base_url)?;
    let mut workflow = VendorWorkflow::vendors();

    let result = workflow
        .review_document(&gateway, "v-1", "doc-9", DocumentStatus::Approved, None)
        .await;
    assert!(result.is_success());

    // the vendor itself is still pending after its document was approved
    let vendor = workflow
        .records()
        .iter()
        .find(|v| v.id == "v-1")
        .expect("vendor re-fetched");
    assert_eq!(vendor.status, VendorStatus::Pending);

    Ok(())
}

fn gateway(base_url: &str) -> anyhow::Result<ApiGateway> {
    let config = ClientConfig {
        api_base_url: base_url.to_string(),
        realtime_url: String::new(),
        token: Some("admin-token".into()),
        request_timeout: Duration::from_secs(5),
    };
    Ok(ApiGateway::new(&config)?)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_client=debug".into()),
        )
        .try_init();
}

async fn spawn_stub() -> anyhow::Result<(String, StubState)> {
    init_tracing();
    let state = StubState {
        list_fetches: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/admin/vendors", get(list_vendors))
        .route("/admin/vendors/{id}", put(moderate_vendor))
        .route(
            "/admin/vendors/{id}/documents/{doc_id}",
            put(review_document),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok((format!("http://{addr}"), state))
}

fn vendor_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "businessName": name,
        "status": status,
        "complianceDocuments": [
            { "id": "doc-9", "name": "GST certificate", "type": "gst", "status": "pending", "fileUrl": "https://files.example/doc-9" }
        ],
        "subscription": { "plan": "basic" },
        "commissionRate": 0.12
    })
}

async fn list_vendors(
    State(state): State<StubState>,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    state.list_fetches.fetch_add(1, Ordering::SeqCst);
    let all = vec![
        vendor_json("v-1", "Acme Traders", "pending"),
        vendor_json("v-2", "Bolt Supply", "under_review"),
    ];
    let items: Vec<Value> = match query.get("status") {
        Some(status) => all
            .into_iter()
            .filter(|v| v["status"] == status.as_str())
            .collect(),
        None => all,
    };
    Json(json!({
        "message": "Ok",
        "data": {
            "items": items,
            "counts": { "pending": 1, "under_review": 1 }
        },
        "meta": { "page": 1, "per_page": 20, "total": 2 }
    }))
}

async fn moderate_vendor(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    if id == "v-conflict" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Vendor has unresolved compliance documents" })),
        )
            .into_response();
    }
    Json(json!({
        "message": "Vendor updated",
        "data": { "id": id, "status": body["status"] },
        "meta": null
    }))
    .into_response()
}

async fn review_document(
    Path((vendor_id, doc_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    Json(json!({
        "message": "Document reviewed",
        "data": { "vendorId": vendor_id, "documentId": doc_id, "status": body["status"] },
        "meta": null
    }))
}
