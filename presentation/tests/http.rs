//! HTTP API integration tests.
//!
//! Starts the axum router on an ephemeral port and exercises it with reqwest.

use catalog_application::{CatalogEngine, EngineParams, UsageAnalytics};
use catalog_infrastructure::usage::{PracticeTestRecord, UserProfile};
use catalog_infrastructure::{InMemoryDocumentStore, InMemoryUsageStats, UsageData};
use catalog_presentation::{AppState, router};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::sync::Arc;

fn usage_data() -> UsageData {
    UsageData {
        profiles: vec![
            UserProfile {
                last_quiz_date: Some(Utc::now() - Duration::days(3)),
            },
            UserProfile {
                last_quiz_date: Some(Utc::now() - Duration::days(400)),
            },
        ],
        practice_tests: vec![
            PracticeTestRecord {
                mode: Some("timed".into()),
                exam: Some("WAEC".into()),
            },
            PracticeTestRecord {
                mode: Some("untimed".into()),
                exam: Some("WAEC".into()),
            },
            PracticeTestRecord {
                mode: Some("timed".into()),
                exam: Some("JAMB".into()),
            },
        ],
    }
}

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let store = Arc::new(InMemoryDocumentStore::new());
    let engine = Arc::new(CatalogEngine::new(store, EngineParams::default()));
    let analytics = Arc::new(UsageAnalytics::new(Arc::new(InMemoryUsageStats::new(
        usage_data(),
    ))));
    let app = router(AppState::new(engine, analytics));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn question(text: &str, subject: &str, exam_type: &str, year: i64) -> Value {
    json!({
        "questionText": text,
        "options": ["A", "B", "C", "D"],
        "correctAnswer": "A",
        "subject": subject,
        "examType": exam_type,
        "examYear": year,
    })
}

async fn seed(client: &reqwest::Client, base: &str) -> Vec<Value> {
    let resp = client
        .post(format!("{base}/api/questions"))
        .json(&json!([
            question("Q1", "Maths", "WAEC", 2020),
            question("Q2", "Maths", "WAEC", 2021),
            question("Q3", "Physics", "NECO", 2020),
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json::<Vec<Value>>().await.unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_submit_single_question() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/questions"))
        .json(&question("What is 2 + 2?", "Maths", "WAEC", 2020))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"].as_str().unwrap().len(), 24);
    assert_eq!(body["questionText"], "What is 2 + 2?");
    assert_eq!(body["examYear"], 2020);
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn submit_invalid_single_question_is_400() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/questions"))
        .json(&json!({"subject": "Maths"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("questionText"));
}

#[tokio::test]
async fn submit_empty_array_is_400() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/questions"))
        .json(&json!([]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let listing: Value = reqwest::get(format!("{base}/api/questions"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn submit_malformed_json_is_400_with_error_body() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/questions"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_submit_batch_with_invalid_item_reports_partial_result() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/questions"))
        .json(&json!([
            question("Q1", "Maths", "WAEC", 2020),
            {"subject": "Maths", "examType": "WAEC", "examYear": 2020},
            question("Q3", "Maths", "WAEC", 2020),
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["created"].as_array().unwrap().len(), 2);
    assert_eq!(body["failed"][0]["index"], 1);
}

#[tokio::test]
async fn test_query_filters_by_attributes() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    seed(&client, &base).await;

    let body: Value = client
        .get(format!("{base}/api/questions?subject=Maths"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body: Value = client
        .get(format!("{base}/api/questions?subject=Maths&examYear=2021&examType="))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["questionText"], "Q2");

    let body: Value = client
        .get(format!("{base}/api/questions?examYear=recent&unknown=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_subjects_and_years_groups_catalog() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    seed(&client, &base).await;

    let groups: Vec<Value> = client
        .get(format!("{base}/api/questions/subjects-years"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["subject"], "Maths");
    assert_eq!(groups[0]["examType"], "WAEC");
    let mut years: Vec<i64> = groups[0]["years"]
        .as_array()
        .unwrap()
        .iter()
        .map(|y| y.as_i64().unwrap())
        .collect();
    years.sort();
    assert_eq!(years, vec![2020, 2021]);
    assert_eq!(groups[1]["subject"], "Physics");
}

#[tokio::test]
async fn test_bulk_update_counts_and_drops() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let created = seed(&client, &base).await;

    let resp = client
        .patch(format!("{base}/api/questions/bulk"))
        .json(&json!({
            "updates": [
                {"_id": created[0]["id"], "subject": "Further Maths"},
                {"id": created[1]["id"], "subject": "Maths"},
                {"subject": "Chemistry"},
                {"id": created[2]["id"], "examYear": 20},
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["matchedCount"], 2);
    assert_eq!(body["modifiedCount"], 1);
    assert_eq!(body["droppedCount"], 1);
    assert_eq!(body["rejected"][0]["index"], 3);
}

#[tokio::test]
async fn bulk_update_without_array_is_400() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({"updates": []}), json!({"updates": "x"})] {
        let resp = client
            .patch(format!("{base}/api/questions/bulk"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "body {body}");
    }
}

#[tokio::test]
async fn test_bulk_delete_ignores_unknown_ids() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let created = seed(&client, &base).await;

    let resp = client
        .delete(format!("{base}/api/questions/bulk"))
        .json(&json!({"ids": [created[0]["id"], "000000000000000000000000"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deletedCount"], 1);

    let resp = client
        .post(format!("{base}/api/questions/bulk-delete"))
        .json(&json!({"ids": [created[1]["id"], created[2]["id"]]}))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deletedCount"], 2);

    let resp = client
        .delete(format!("{base}/api/questions/bulk"))
        .json(&json!({"ids": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_analytics_counters() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let get = |path: &'static str| {
        let client = client.clone();
        let url = format!("{base}{path}");
        async move {
            client
                .get(url)
                .send()
                .await
                .unwrap()
                .json::<Value>()
                .await
                .unwrap()
        }
    };

    assert_eq!(get("/api/analytics/total-users").await["totalUsers"], 2);
    assert_eq!(get("/api/analytics/active-users").await["activeUsers"], 1);
    assert_eq!(
        get("/api/analytics/total-practice-tests").await["totalPracticeTests"],
        3
    );
    assert_eq!(
        get("/api/analytics/practice-tests-by-mode?mode=timed").await["totalPracticeTests"],
        2
    );
    assert_eq!(
        get("/api/analytics/practice-tests-by-exam?exam=WAEC").await["total"],
        2
    );
    assert_eq!(
        get("/api/analytics/practice-tests-by-exam").await["total"],
        3
    );
}
