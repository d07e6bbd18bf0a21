#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::{Notify, Semaphore};
use tower::ServiceExt;

use novel_character_analyzer::api::routes::create_router;
use novel_character_analyzer::config::Config;
use novel_character_analyzer::error::{AppError, Result};
use novel_character_analyzer::page::{PageView, SharedPage};
use novel_character_analyzer::store::{MemoryStore, NewNovel, Novel, NovelStore};
use novel_character_analyzer::AppState;

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        supabase: None,
        analysis_delay: Duration::ZERO,
    }
}

pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryStore::new()), Duration::ZERO)
}

pub fn build_test_app_with(store: Arc<dyn NovelStore>, analysis_delay: Duration) -> Router {
    let config = Config {
        analysis_delay,
        ..test_config()
    };
    create_router(AppState::new(config, store))
}

/// Records every insert together with the page as it looked at write time.
pub struct RecordingStore {
    page: SharedPage,
    calls: Mutex<Vec<(NewNovel, PageView)>>,
}

impl RecordingStore {
    pub fn new(page: SharedPage) -> Self {
        Self {
            page,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(NewNovel, PageView)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NovelStore for RecordingStore {
    async fn insert_novel(&self, novel: NewNovel) -> Result<Novel> {
        self.calls.lock().unwrap().push((novel.clone(), self.page.view()));
        Ok(Novel {
            id: format!("novel-{}", self.calls.lock().unwrap().len()),
            title: novel.title,
            url: novel.url,
            status: novel.status,
            created_at: None,
        })
    }
}

/// Rejects every insert.
#[derive(Default)]
pub struct FailingStore {
    calls: Mutex<usize>,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl NovelStore for FailingStore {
    async fn insert_novel(&self, _novel: NewNovel) -> Result<Novel> {
        *self.calls.lock().unwrap() += 1;
        Err(AppError::StoreError("connection refused".to_string()))
    }
}

/// Panics inside every insert.
pub struct PanickingStore;

#[async_trait]
impl NovelStore for PanickingStore {
    async fn insert_novel(&self, _novel: NewNovel) -> Result<Novel> {
        panic!("store blew up");
    }
}

/// Holds each insert until the test releases it.
pub struct GatedStore {
    pub entered: Notify,
    release: Semaphore,
    inserted: Mutex<usize>,
    inner: MemoryStore,
}

impl GatedStore {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
            inserted: Mutex::new(0),
            inner: MemoryStore::new(),
        }
    }

    pub fn release(&self) {
        self.release.add_permits(1);
    }

    pub fn inserted(&self) -> usize {
        *self.inserted.lock().unwrap()
    }
}

#[async_trait]
impl NovelStore for GatedStore {
    async fn insert_novel(&self, novel: NewNovel) -> Result<Novel> {
        self.entered.notify_one();
        let permit = self
            .release
            .acquire()
            .await
            .map_err(|e| AppError::StoreError(e.to_string()))?;
        permit.forget();
        let stored = self.inner.insert_novel(novel).await?;
        *self.inserted.lock().unwrap() += 1;
        Ok(stored)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
