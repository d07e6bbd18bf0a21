//! Page-level state shared by every handler.
//!
//! The page is a single logical view: one URL input, one in-flight flag, one
//! result list. Failures are not a phase of their own; they surface as
//! notifications that are dismissed once shown.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::characters::Character;
use crate::store::Novel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Validation,
    Started,
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn missing_url() -> Self {
        Self::new(
            NotificationKind::Validation,
            "請輸入網址",
            "請提供小說的網址以進行分析",
            NotificationVariant::Destructive,
        )
    }

    pub fn analysis_started() -> Self {
        Self::new(
            NotificationKind::Started,
            "開始分析",
            "正在分析小說內容，請稍候...",
            NotificationVariant::Default,
        )
    }

    pub fn analysis_failed() -> Self {
        Self::new(
            NotificationKind::Failure,
            "分析失敗",
            "無法分析該小說，請檢查網址是否正確",
            NotificationVariant::Destructive,
        )
    }

    fn new(kind: NotificationKind, title: &str, description: &str, variant: NotificationVariant) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            variant,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePhase {
    Idle,
    Analyzing,
    Results,
}

#[derive(Debug, Default)]
pub struct PageState {
    pub url: String,
    pub is_analyzing: bool,
    pub progress: u8,
    pub novel: Option<Novel>,
    pub characters: Vec<Character>,
    notifications: Vec<Notification>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PagePhase {
        if self.is_analyzing {
            PagePhase::Analyzing
        } else if self.characters.is_empty() {
            PagePhase::Idle
        } else {
            PagePhase::Results
        }
    }

    /// The submit control and URL input are disabled exactly while a request is in flight.
    pub fn trigger_disabled(&self) -> bool {
        self.is_analyzing
    }

    /// Queues a notification. At most one per kind is pending; a newer one
    /// replaces the older.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.retain(|pending| pending.kind != notification.kind);
        self.notifications.push(notification);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn view(&self) -> PageView {
        PageView {
            url: self.url.clone(),
            phase: self.phase(),
            is_analyzing: self.is_analyzing,
            trigger_disabled: self.trigger_disabled(),
            progress: self.is_analyzing.then_some(self.progress),
            novel: self.novel.clone(),
            characters: self.characters.clone(),
            notifications: self.notifications.clone(),
        }
    }
}

/// Snapshot of the page for rendering and the JSON API.
#[derive(Clone, Debug, Serialize)]
pub struct PageView {
    pub url: String,
    pub phase: PagePhase,
    pub is_analyzing: bool,
    pub trigger_disabled: bool,
    pub progress: Option<u8>,
    pub novel: Option<Novel>,
    pub characters: Vec<Character>,
    pub notifications: Vec<Notification>,
}

/// Cloneable handle to the page state.
#[derive(Clone, Debug, Default)]
pub struct SharedPage {
    inner: Arc<Mutex<PageState>>,
}

impl SharedPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with the state locked. Never hold the lock across an await.
    pub fn update<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> R {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn view(&self) -> PageView {
        self.update(|state| state.view())
    }

    /// Snapshot for a one-shot render: pending notifications are dismissed.
    pub fn view_and_dismiss(&self) -> PageView {
        self.update(|state| {
            let mut view = state.view();
            view.notifications = state.take_notifications();
            view
        })
    }

    pub fn dismiss_notifications(&self) -> Vec<Notification> {
        self.update(PageState::take_notifications)
    }
}
