//! End-to-end ownership, cascade and pagination scenarios.
//!
//! These need a real PostgreSQL database behind DATABASE_URL; each test skips
//! itself when the spawned server reports degraded health.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct Session {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl Session {
    async fn register(base_url: &str, prefix: &str) -> Result<Self> {
        let client = reqwest::Client::new();
        let username = format!("{}-{}", prefix, uuid::Uuid::new_v4().simple());

        let res = client
            .post(format!("{}/users/register", base_url))
            .json(&json!({ "username": username, "password": "a-strong-password" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = res.json::<Value>().await?;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token,
        })
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await?)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?)
    }

    async fn create_project(&self, title: &str) -> Result<Value> {
        let res = self
            .post(
                "/projects/new",
                &json!({ "title": title, "description": "created by test" }),
            )
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        Ok(res.json::<Value>().await?["data"].clone())
    }

    async fn create_post(&self, project_id: &str, title: &str) -> Result<Value> {
        let res = self
            .post(
                &format!("/projects/{}/posts/new", project_id),
                &json!({ "title": title, "description": "post body" }),
            )
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        Ok(res.json::<Value>().await?["data"].clone())
    }
}

macro_rules! require_database {
    ($server:expr) => {
        if !common::database_available($server).await {
            eprintln!("skipping: no database behind DATABASE_URL");
            return Ok(());
        }
    };
}

#[tokio::test]
async fn post_owner_always_mirrors_project_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    let project = alice.create_project("Blog").await?;
    let project_id = project["id"].as_str().unwrap();

    let post = alice.create_post(project_id, "Hello").await?;
    assert_eq!(post["owner_id"], project["owner_id"]);

    // A client-supplied owner field is simply not part of the form; sending
    // one anyway must not change the outcome
    let res = alice
        .post(
            &format!("/projects/{}/posts/new", project_id),
            &json!({
                "title": "Sneaky",
                "description": "attempt",
                "owner_id": uuid::Uuid::new_v4().to_string()
            }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let sneaky = res.json::<Value>().await?["data"].clone();
    assert_eq!(sneaky["owner_id"], project["owner_id"]);

    // Same rule on update
    let post_id = post["id"].as_str().unwrap();
    let res = alice
        .post(
            &format!("/posts/{}/edit", post_id),
            &json!({ "title": "Hello again", "description": "edited" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let edited = res.json::<Value>().await?["data"].clone();
    assert_eq!(edited["owner_id"], project["owner_id"]);

    Ok(())
}

#[tokio::test]
async fn foreign_entities_read_as_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    let bob = Session::register(&server.base_url, "bob").await?;

    let project = alice.create_project("Private").await?;
    let project_id = project["id"].as_str().unwrap();
    let post = alice.create_post(project_id, "Secret").await?;
    let post_id = post["id"].as_str().unwrap();

    // Reads
    for path in [
        format!("/projects/{}", project_id),
        format!("/projects/{}/posts", project_id),
        format!("/posts/{}", post_id),
        format!("/posts/{}/edit", post_id),
        format!("/projects/delete/{}", project_id),
    ] {
        let res = bob.get(&path).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET {} as non-owner", path);
        let body = res.json::<Value>().await?;
        assert_eq!(body["code"], "NOT_FOUND");
        // No entity data leaks
        assert!(body.get("data").is_none());
    }

    // Writes
    let res = bob
        .post(
            &format!("/projects/{}/posts/new", project_id),
            &json!({ "title": "intrusion", "description": "x" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = bob
        .post(
            &format!("/posts/{}/edit", post_id),
            &json!({ "title": "tampered", "description": "x" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = bob.post(&format!("/posts/{}/delete", post_id), &json!({})).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Alice still sees her post untouched
    let res = alice.get(&format!("/posts/{}", post_id)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["title"], "Secret");

    Ok(())
}

#[tokio::test]
async fn project_owner_is_immutable_through_edit() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    let project = alice.create_project("Stable").await?;
    let project_id = project["id"].as_str().unwrap();

    let res = alice
        .post(
            "/projects/edit",
            &json!({
                "project_id": project_id,
                "title": "Renamed",
                "description": "still mine",
                "owner_id": uuid::Uuid::new_v4().to_string()
            }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?["data"].clone();
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["owner_id"], project["owner_id"]);
    assert_eq!(updated["created_at"], project["created_at"]);

    Ok(())
}

#[tokio::test]
async fn deleting_a_project_cascades_to_posts() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    let project = alice.create_project("Doomed").await?;
    let project_id = project["id"].as_str().unwrap().to_string();

    let mut post_ids = Vec::new();
    for i in 0..5 {
        let post = alice.create_post(&project_id, &format!("post {}", i)).await?;
        post_ids.push(post["id"].as_str().unwrap().to_string());
    }

    // Confirmation step is read-only
    let res = alice.get(&format!("/projects/delete/{}", project_id)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = alice.get(&format!("/projects/{}", project_id)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Execute
    let res = alice
        .post(&format!("/projects/delete/{}", project_id), &json!({}))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Project gone from detail and listing
    let res = alice.get(&format!("/projects/{}", project_id)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = alice.get("/projects").await?;
    let body = res.json::<Value>().await?;
    let listed = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"] == json!(project_id));
    assert!(!listed);

    // All posts went with it
    for post_id in post_ids {
        let res = alice.get(&format!("/posts/{}", post_id)).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    Ok(())
}

#[tokio::test]
async fn listings_paginate_at_their_declared_sizes() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    let project = alice.create_project("Paged").await?;
    let project_id = project["id"].as_str().unwrap().to_string();

    for i in 0..9 {
        alice.create_post(&project_id, &format!("post {}", i)).await?;
    }

    // Flat listing: 9 posts at 7 per page -> 2 pages
    let res = alice.get("/posts").await?;
    let body = res.json::<Value>().await?;
    let page = &body["data"];
    assert_eq!(page["per_page"], 7);
    assert_eq!(page["total_items"], 9);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 7);

    let res = alice.get("/posts?page=2").await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    // Project detail: 9 posts at 2 per page -> 5 pages
    let res = alice.get(&format!("/projects/{}", project_id)).await?;
    let body = res.json::<Value>().await?;
    let posts = &body["data"]["posts"];
    assert_eq!(posts["per_page"], 2);
    assert_eq!(posts["total_pages"], 5);
    assert_eq!(posts["items"].as_array().unwrap().len(), 2);

    // Out-of-range pages clamp to the last on both sides, garbage to the first
    let res = alice.get(&format!("/projects/{}?page=99", project_id)).await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["posts"]["page"], 5);
    assert_eq!(body["data"]["posts"]["items"].as_array().unwrap().len(), 1);

    let res = alice.get(&format!("/projects/{}?page=0", project_id)).await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["posts"]["page"], 5);

    let res = alice.get(&format!("/projects/{}?page=abc", project_id)).await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["posts"]["page"], 1);

    // Newest first in the detail view
    let res = alice.get(&format!("/projects/{}", project_id)).await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["posts"]["items"][0]["title"], "post 8");

    Ok(())
}

#[tokio::test]
async fn project_listing_orders_ascending_by_creation() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    alice.create_project("first").await?;
    alice.create_project("second").await?;
    alice.create_project("third").await?;

    let res = alice.get("/projects").await?;
    let body = res.json::<Value>().await?;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);

    Ok(())
}

#[tokio::test]
async fn select_then_delete_flow_redirects_to_confirmation() -> Result<()> {
    let server = common::ensure_server().await?;
    require_database!(server);

    let alice = Session::register(&server.base_url, "alice").await?;
    let project = alice.create_project("Selectable").await?;
    let project_id = project["id"].as_str().unwrap();

    // Selection screen lists the caller's projects
    let res = alice.get("/projects/delete").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["data"]["projects"].is_array());

    // Submitting a selection redirects to the confirmation step
    let client = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build()?;
    let res = client
        .get(format!(
            "{}/projects/delete?project_id={}",
            server.base_url, project_id
        ))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers()["location"].to_str()?;
    assert_eq!(location, format!("/projects/delete/{}", project_id));

    Ok(())
}
