use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use rosterd::{api, roster::StudentStore};
use serde_json::{Value, json};
use tokio::net::TcpListener;

struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let app = api::create_router(Arc::new(StudentStore::new()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, body: Value) -> Value {
        let response = self
            .client
            .post(self.url("/students"))
            .json(&body)
            .send()
            .await
            .expect("create request");
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("create body")
    }

    async fn list_ids(&self) -> BTreeSet<i64> {
        let students: Vec<Value> = self
            .client
            .get(self.url("/students"))
            .send()
            .await
            .expect("list request")
            .json()
            .await
            .expect("list body");
        students
            .iter()
            .map(|s| s["id"].as_i64().expect("numeric id"))
            .collect()
    }
}

#[tokio::test]
async fn enrollment_scenario() {
    let server = TestServer::start().await;

    let ada = server
        .create(json!({ "name": "Ada", "age": 30, "email": "ada@example.com" }))
        .await;
    assert_eq!(ada["id"], 1);
    let lin = server
        .create(json!({ "name": "Lin", "age": 25, "email": "lin@example.com" }))
        .await;
    assert_eq!(lin["id"], 2);

    let profile: Value = server
        .client
        .get(server.url("/students/profile/1"))
        .send()
        .await
        .expect("profile request")
        .json()
        .await
        .expect("profile body");
    assert_eq!(
        profile,
        json!({ "profile": "Name: Ada, Age: 30, Contact: ada@example.com" })
    );

    let response = server
        .client
        .delete(server.url("/students/1"))
        .send()
        .await
        .expect("delete request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.expect("delete body").is_empty());

    let response = server
        .client
        .get(server.url("/students/1"))
        .send()
        .await
        .expect("get request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(server.list_ids().await, BTreeSet::from([2]));
}

#[tokio::test]
async fn ids_keep_increasing_after_deletes() {
    let server = TestServer::start().await;
    let mut last = 0;
    for round in 0..5 {
        let created = server
            .create(json!({ "name": format!("s{round}"), "age": 20, "email": "s@example.com" }))
            .await;
        let id = created["id"].as_i64().expect("numeric id");
        assert!(id > last, "id {id} must exceed {last}");
        last = id;

        let status = server
            .client
            .delete(server.url(&format!("/students/{id}")))
            .send()
            .await
            .expect("delete request")
            .status();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    assert!(server.list_ids().await.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_over_http_are_all_stored() {
    let server = Arc::new(TestServer::start().await);
    let count = 100;
    let tasks: Vec<_> = (0..count)
        .map(|n| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let created = server
                    .create(json!({ "name": format!("student-{n}"), "age": n, "email": "s@example.com" }))
                    .await;
                created["id"].as_i64().expect("numeric id")
            })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for task in tasks {
        assert!(ids.insert(task.await.expect("task")), "duplicate id");
    }
    assert_eq!(ids.len(), count);
    assert_eq!(server.list_ids().await, ids);
}

#[tokio::test]
async fn replace_then_profile_reflects_new_fields() {
    let server = TestServer::start().await;
    server
        .create(json!({ "name": "Ada", "age": 30, "email": "ada@example.com" }))
        .await;
    let warm = server
        .client
        .get(server.url("/students/profile/1"))
        .send()
        .await
        .expect("profile request");
    assert_eq!(warm.status(), StatusCode::OK);

    let updated: Value = server
        .client
        .put(server.url("/students/1"))
        .json(&json!({ "id": 42, "name": "Grace", "age": 45, "email": "grace@example.com" }))
        .send()
        .await
        .expect("replace request")
        .json()
        .await
        .expect("replace body");
    assert_eq!(updated["id"], 1);
    assert!(updated.get("profile").is_none());

    let profile: Value = server
        .client
        .get(server.url("/students/profile/1"))
        .send()
        .await
        .expect("profile request")
        .json()
        .await
        .expect("profile body");
    assert_eq!(
        profile["profile"],
        "Name: Grace, Age: 45, Contact: grace@example.com"
    );
}
