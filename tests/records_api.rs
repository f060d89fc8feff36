use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use advocate_directory::{
    api,
    state::State,
    store::{AdvocateStore, Page, SearchFilter},
    types::Advocate,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Filters in memory the way the SQL statement does.
#[derive(Clone, Default)]
struct MemoryStore {
    advocates: Vec<Advocate>,
    queries: Arc<AtomicUsize>,
}

#[async_trait]
impl AdvocateStore for MemoryStore {
    async fn search(&self, filter: &SearchFilter) -> Result<Page<Advocate>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let needle = filter.term.as_deref().map(str::to_lowercase);
        let matching: Vec<&Advocate> = self
            .advocates
            .iter()
            .filter(|advocate| match &needle {
                None => true,
                Some(needle) => {
                    let specialties = serde_json::to_string(&advocate.specialties).unwrap_or_default();
                    [
                        &advocate.first_name,
                        &advocate.last_name,
                        &advocate.city,
                        &advocate.degree,
                        &specialties,
                    ]
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle.as_str()))
                }
            })
            .collect();

        Ok(Page {
            total: matching.len() as i64,
            rows: matching
                .into_iter()
                .skip(filter.pagination.offset() as usize)
                .take(filter.pagination.limit() as usize)
                .cloned()
                .collect(),
        })
    }
}

struct FailingStore;

#[async_trait]
impl AdvocateStore for FailingStore {
    async fn search(&self, _filter: &SearchFilter) -> Result<Page<Advocate>> {
        Err(anyhow!("password authentication failed for user \"postgres\""))
    }
}

fn advocate(id: i32, city: &str, specialties: &[&str]) -> Advocate {
    Advocate {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        city: city.to_string(),
        degree: "MD".to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        years_of_experience: id % 20,
        phone_number: 5550000000 + i64::from(id),
        created_at: None,
    }
}

fn directory() -> MemoryStore {
    let mut advocates = Vec::new();
    for id in 1..=23 {
        advocates.push(advocate(id, "New York", &["Trauma & PTSD"]));
    }
    for id in 24..=30 {
        advocates.push(advocate(id, "Chicago", &["Eating disorders"]));
    }
    MemoryStore {
        advocates,
        ..Default::default()
    }
}

async fn get(store: impl AdvocateStore + 'static, uri: &str) -> (StatusCode, Value) {
    let app = api::app(State::with_store(store), false);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let (status, body) = get(MemoryStore::default(), "/records?page=1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [], "total": 0, "page": 1, "limit": 10 }));
}

#[tokio::test]
async fn defaults_apply_without_query() {
    let (status, body) = get(directory(), "/records").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["total"], 30);
    assert_eq!(ids(&body), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn total_counts_every_match_not_the_page() {
    let (status, body) = get(directory(), "/records?search=new&page=1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["total"], 23);

    let (_, last) = get(directory(), "/records?search=new&page=3&limit=10").await;
    assert_eq!(ids(&last), (21..=23).collect::<Vec<_>>());
    assert_eq!(last["total"], 23);
}

#[tokio::test]
async fn search_is_case_insensitive_across_fields() {
    let (_, by_city) = get(directory(), "/records?search=CHICAGO&limit=50").await;
    assert_eq!(ids(&by_city), (24..=30).collect::<Vec<_>>());

    let (_, by_specialty) = get(directory(), "/records?search=eating&limit=50").await;
    assert_eq!(by_specialty["total"], 7);

    let (_, by_name) = get(directory(), "/records?search=last25").await;
    assert_eq!(ids(&by_name), vec![25]);

    let (_, none) = get(directory(), "/records?search=denver").await;
    assert_eq!(none["total"], 0);
}

#[tokio::test]
async fn page_past_the_end_keeps_total() {
    let (status, body) = get(directory(), "/records?page=9&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 30);
}

#[tokio::test]
async fn invalid_pagination_is_rejected_before_querying() {
    let store = directory();
    let queries = store.queries.clone();
    for uri in [
        "/records?page=0",
        "/records?limit=-1",
        "/records?page=two",
        "/records?page=1&limit=2.5",
    ] {
        let (status, body) = get(store.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body,
            json!({ "error": "Invalid page or limit. Both must be positive integers." })
        );
    }
    assert_eq!(queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_hides_details() {
    let (status, body) = get(FailingStore, "/records?search=new").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
    assert!(!body.to_string().contains("postgres"));
}

#[tokio::test]
async fn records_are_camel_case() {
    let (_, body) = get(directory(), "/api/advocates?search=last1&limit=1").await;
    assert_eq!(
        body["data"][0],
        json!({
            "id": 1,
            "firstName": "First1",
            "lastName": "Last1",
            "city": "New York",
            "degree": "MD",
            "specialties": ["Trauma & PTSD"],
            "yearsOfExperience": 1,
            "phoneNumber": 5550000001i64,
            "createdAt": null,
        })
    );
}
