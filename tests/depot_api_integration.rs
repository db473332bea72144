use depot_lifecycle_rust::api::routes::create_router;
use depot_lifecycle_rust::model::VALIDATION_USERNAME;
use depot_lifecycle_rust::store::{EstimateStore, MemoryStore, PartyStore, ReleaseStore};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn patch(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .patch(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn patch_as(
        &self,
        path: &str,
        username: &str,
        json: Value,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .patch(&format!("{}{}", self.base_url, path))
            .header("X-User-Id", username)
            .json(&json)
            .send()
            .await
    }
}

// Spawn the server on an ephemeral port, keeping a handle on the store so
// tests can verify persistence side effects directly.
async fn spawn_server() -> (TestClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = create_router().with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (TestClient::new(format!("http://{}", addr)), store)
}

#[tokio::test]
async fn test_health_check() {
    let (client, _store) = spawn_server().await;

    let resp = client.get("/health").await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_release_search_unknown_number_is_not_found() {
    let (client, _store) = spawn_server().await;

    let resp = client
        .get("/api/v2/release?releaseNumber=RHAMG999999")
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn test_release_list_is_not_found_on_empty_store() {
    let (client, _store) = spawn_server().await;

    let resp = client.get("/api/v2/release").await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_release_create_upserts_parties_and_persists() {
    let (client, store) = spawn_server().await;

    let resp = client
        .post(
            "/api/v2/release",
            json!({"releaseNumber": "RHAMG000000", "depot": {"code": "DEHAMCMRA"}}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "");

    // The depot party now exists independently in the party store.
    let depot_code = "DEHAMCMRA".to_string();
    assert!(store.get_party(&depot_code).await.unwrap().is_some());

    // And the release is findable over the API.
    let resp = client
        .get("/api/v2/release?releaseNumber=RHAMG000000")
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let releases: Value = resp.json().await.unwrap();
    assert_eq!(releases.as_array().unwrap().len(), 1);
    assert_eq!(releases[0]["releaseNumber"], "RHAMG000000");
    assert_eq!(releases[0]["depot"]["code"], "DEHAMCMRA");
}

#[tokio::test]
async fn test_duplicate_release_create_is_rejected() {
    let (client, store) = spawn_server().await;

    let payload = json!({
        "releaseNumber": "RHAMG000001",
        "comments": "first",
        "depot": {"code": "DEHAMCMRA"}
    });
    let resp = client.post("/api/v2/release", payload).await.unwrap();
    assert_eq!(resp.status(), 200);

    let duplicate = json!({"releaseNumber": "RHAMG000001", "comments": "second"});
    let resp = client.post("/api/v2/release", duplicate).await.unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "ERR000");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists; please update instead"));

    // The stored record is the original, not the rejected duplicate.
    let number = "RHAMG000001".to_string();
    let stored = store.find_release(&number).await.unwrap().unwrap();
    assert_eq!(stored.comments, Some("first".to_string()));
}

#[tokio::test]
async fn test_release_update_of_missing_record_has_no_side_effects() {
    let (client, store) = spawn_server().await;

    let resp = client
        .put(
            "/api/v2/release/RHAMG000002",
            json!({
                "releaseNumber": "RHAMG000002",
                "details": [{"customer": {"code": "SGSINONEA"}}]
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "ERR000");
    assert_eq!(body["message"], "Release does not exist.");

    // The failed update upserted nothing.
    let customer_code = "SGSINONEA".to_string();
    assert!(store.get_party(&customer_code).await.unwrap().is_none());
    let number = "RHAMG000002".to_string();
    assert!(store.find_release(&number).await.unwrap().is_none());
}

#[tokio::test]
async fn test_release_update_replaces_record_and_upserts_parties() {
    let (client, store) = spawn_server().await;

    let resp = client
        .post(
            "/api/v2/release",
            json!({"releaseNumber": "RHAMG000003", "depot": {"code": "DEHAMCMRA"}}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .put(
            "/api/v2/release/RHAMG000003",
            json!({
                "releaseNumber": "RHAMG000003",
                "comments": "updated",
                "recipient": {"code": "SGSINONEA"},
                "details": [{"customer": {"code": "USNYCCUST"}, "quantity": 2}]
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let number = "RHAMG000003".to_string();
    let stored = store.find_release(&number).await.unwrap().unwrap();
    assert_eq!(stored.comments, Some("updated".to_string()));
    assert_eq!(stored.recipient.as_ref().unwrap().code, "SGSINONEA");

    for code in ["SGSINONEA", "USNYCCUST"] {
        let code = code.to_string();
        assert!(store.get_party(&code).await.unwrap().is_some());
    }
}

#[tokio::test]
async fn test_release_create_rejects_overlong_release_number() {
    let (client, _store) = spawn_server().await;

    let resp = client
        .post(
            "/api/v2/release",
            json!({"releaseNumber": "RHAMG0000000000000000"}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_estimate_create_returns_demo_allocation() {
    let (client, store) = spawn_server().await;

    let resp = client
        .post(
            "/api/v2/estimate",
            json!({
                "estimateNumber": "DEHAMCE1856373",
                "revision": 1,
                "depot": {"code": "DEHAMCMRA"},
                "requester": {"code": "SGSINONEA"},
                "owner": {"code": "USNYCOWNA"},
                "total": 950.0,
                "comments": "left door panel",
                "lineItems": [
                    {"party": "O", "total": 600.0},
                    {"party": "I", "total": 250.0},
                    {"party": "U", "total": 100.0}
                ]
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let allocation: Value = resp.json().await.unwrap();
    assert_eq!(allocation["estimateNumber"], "DEHAMCE1856373");
    assert_eq!(allocation["revision"], 1);
    assert_eq!(allocation["total"], 950.0);
    assert_eq!(allocation["ownerTotal"], 600.0);
    assert_eq!(allocation["insuranceTotal"], 250.0);
    assert_eq!(allocation["customerTotal"], 100.0);
    assert_eq!(allocation["ctl"], false);
    assert_eq!(allocation["comments"], "left door panel");
    assert_eq!(allocation["preliminaryDecision"]["recommendation"], "FIX");

    // The estimate and its parties were persisted.
    let number = "DEHAMCE1856373".to_string();
    let stored = store.find_estimate(&number, Some(1)).await.unwrap().unwrap();
    assert_eq!(stored.total, 950.0);
    for code in ["DEHAMCMRA", "SGSINONEA", "USNYCOWNA"] {
        let code = code.to_string();
        assert!(store.get_party(&code).await.unwrap().is_some());
    }
}

#[tokio::test]
async fn test_estimate_allocate_requires_existing_estimate() {
    let (client, store) = spawn_server().await;

    let resp = client
        .patch(
            "/api/v2/estimate/DEHAMCE0000001",
            json!({"estimateNumber": "DEHAMCE0000001", "total": 100.0}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "ERR000");
    assert_eq!(body["message"], "Estimate does not exist to allocate.");
    assert_eq!(store.allocation_count().await, 0);
}

#[tokio::test]
async fn test_estimate_allocate_validation_user_bypasses_existence_check() {
    let (client, store) = spawn_server().await;

    let resp = client
        .patch_as(
            "/api/v2/estimate/DEHAMCE0000002",
            VALIDATION_USERNAME,
            json!({
                "estimateNumber": "DEHAMCE0000002",
                "depot": {"code": "DEHAMCMRA"},
                "total": 420.0
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(store.allocation_count().await, 1);
    let depot_code = "DEHAMCMRA".to_string();
    assert!(store.get_party(&depot_code).await.unwrap().is_some());
}

#[tokio::test]
async fn test_estimate_allocate_accepts_known_estimate_for_any_caller() {
    let (client, store) = spawn_server().await;

    let resp = client
        .post(
            "/api/v2/estimate",
            json!({"estimateNumber": "DEHAMCE0000003", "total": 10.0}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .patch(
            "/api/v2/estimate/DEHAMCE0000003",
            json!({"estimateNumber": "DEHAMCE0000003", "total": 10.0, "ownerTotal": 10.0}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(store.allocation_count().await, 1);
}

#[tokio::test]
async fn test_unimplemented_estimate_endpoints_respond_501() {
    let (client, _store) = spawn_server().await;

    let resp = client
        .get("/api/v2/estimate?estimateNumber=DEHAMCE1856373")
        .await
        .unwrap();
    assert_eq!(resp.status(), 501);

    let resp = client
        .get("/api/v2/estimate/DEHAMCE1856373?depot=DEHAMCMRA&revision=0")
        .await
        .unwrap();
    assert_eq!(resp.status(), 501);

    let resp = client
        .put(
            "/api/v2/estimate/DEHAMCE1856373?depot=DEHAMCMRA",
            json!({"approvedBy": "Jamie Doe", "comments": "approved as submitted"}),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 501);
}
