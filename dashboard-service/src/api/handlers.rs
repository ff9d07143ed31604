use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use consumer_client::SearchItem;
use serde::Deserialize;

use super::error::ApiError;
use super::AppState;
use crate::engine::{compute_dashboard, DashboardMetrics};
use crate::store::PageRequest;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// `GET /consumers?page=N&per_page=M` → one page of search items.
pub async fn list_consumers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SearchItem>>, ApiError> {
    metrics::counter!("dashboard_requests_total", "route" => "consumers").increment(1);

    let page = PageRequest::new(query.page, query.per_page, &state.pagination)?;
    let records = state.store.list(page).await?;

    tracing::debug!(page = page.page(), per_page = page.per_page(), returned = records.len(), "listed consumers");
    Ok(Json(records.into_iter().map(SearchItem::from).collect()))
}

/// `GET /dashboard/{account_id}` → the account's search item.
pub async fn get_consumer(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<Json<SearchItem>, ApiError> {
    metrics::counter!("dashboard_requests_total", "route" => "dashboard").increment(1);

    let record = state
        .store
        .get(account_id)
        .await?
        .ok_or(ApiError::NotFound(account_id))?;

    Ok(Json(SearchItem::from(record)))
}

/// `GET /dashboard/{account_id}/metrics` → derived dashboard metrics.
///
/// A malformed consumption series answers 422 so the dashboard can show its
/// blocked state instead of a partial chart.
pub async fn get_dashboard_metrics(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<Json<DashboardMetrics>, ApiError> {
    metrics::counter!("dashboard_requests_total", "route" => "metrics").increment(1);

    let record = state
        .store
        .get(account_id)
        .await?
        .ok_or(ApiError::NotFound(account_id))?;

    match compute_dashboard(&record) {
        Ok(dashboard) => {
            metrics::counter!("dashboard_metrics_computed_total").increment(1);
            Ok(Json(dashboard))
        }
        Err(e) => {
            metrics::counter!("dashboard_invalid_series_total").increment(1);
            tracing::warn!(account_id, error = %e, "dashboard metrics blocked");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use consumer_client::AccountRecord;
    use tower::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::PaginationConfig;
    use crate::store::MemoryAccountStore;

    fn account(account_id: i64, prob: f64, months: usize) -> AccountRecord {
        AccountRecord {
            account_id,
            is_commercial: false,
            address: "Krasnodar Krai, Sochi, Nizhnyaya Shilovka, Svetogorskaya st, 12".to_string(),
            building_type: "Private".to_string(),
            rooms_count: 3,
            residents_count: 3,
            total_area: Some(125.6),
            consumption: (1..=months as u32).map(|m| (m, 100.0)).collect::<BTreeMap<_, _>>(),
            is_commercial_prob: prob,
        }
    }

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: Arc::new(MemoryAccountStore::new(vec![
                account(2557, 0.345643, 12),
                account(2558, 0.845643, 12),
                account(2559, 0.245643, 11),
            ])),
            pagination: PaginationConfig {
                default_per_page: 2,
                max_per_page: 5,
            },
        })
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn consumers_default_page_is_ordered_by_probability() {
        let (status, json) = get("/consumers").await;

        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], 2558);
        assert_eq!(items[1]["id"], 2557);
        assert_eq!(items[0]["title"], "Krasnodar Krai, Sochi, Nizhnyaya Shilovka");
        assert_eq!(items[0]["data"]["accountId"], 2558);
        assert_eq!(items[0]["data"]["consumption"]["1"], 100.0);
    }

    #[tokio::test]
    async fn consumers_second_page() {
        let (status, json) = get("/consumers/?page=2&per_page=2").await;

        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], 2559);
    }

    #[tokio::test]
    async fn oversized_page_returns_400() {
        let (status, json) = get("/consumers?per_page=6").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn dashboard_returns_search_item() {
        let (status, json) = get("/dashboard/2557").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], 2557);
        assert_eq!(json["avatar"], "K");
        assert_eq!(json["data"]["is_commercial_prob"], 0.345643);
    }

    #[tokio::test]
    async fn unknown_account_returns_404() {
        let (status, json) = get("/dashboard/1").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "NOT_FOUND");

        let (status, _) = get("/dashboard/1/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_for_valid_account() {
        let (status, json) = get("/dashboard/2558/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["accountId"], 2558);
        assert_eq!(json["statistics"]["total"], 1200.0);
        assert_eq!(json["statistics"]["mean"], 100.0);
        assert_eq!(json["classification"]["status"], "classified");
        assert_eq!(json["classification"]["band"], "high");
        assert_eq!(json["efficiency"]["perResident"]["value"], 33.0);
        assert_eq!(json["months"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn incomplete_series_returns_422() {
        let (status, json) = get("/dashboard/2559/metrics").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "INVALID_SERIES");
    }
}
