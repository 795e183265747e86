//! In-memory `FormsSource` for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ProxyError, Result};
use crate::models::Form;
use crate::upstream::{FormsPage, FormsSource};

/// Builds a form named after its id.
pub(crate) fn form(id: &str, created_at: Option<&str>) -> Form {
    let form = Form::new(id, format!("Form {id}"));
    match created_at {
        Some(created_at) => form.with_created_at(created_at),
        None => form,
    }
}

#[derive(Debug, Default)]
struct Script {
    pages: Vec<Vec<Form>>,
    endless: bool,
    fail_all: Option<u16>,
    fail_on: Option<(usize, u16)>,
    cursors: Vec<Option<String>>,
}

/// Serves scripted pages chained with `page-N` cursors and counts calls.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    script: Mutex<Script>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedSource {
    pub(crate) fn new(pages: Vec<Vec<Form>>) -> Self {
        Self {
            script: Mutex::new(Script {
                pages,
                ..Script::default()
            }),
            ..Self::default()
        }
    }

    /// Always hands out a next cursor, repeating `page` forever.
    pub(crate) fn endless(page: Vec<Form>) -> Self {
        Self {
            script: Mutex::new(Script {
                pages: vec![page],
                endless: true,
                ..Script::default()
            }),
            ..Self::default()
        }
    }

    /// Delays each answer by `delay`.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set_pages(&self, pages: Vec<Vec<Form>>) {
        self.script.lock().unwrap().pages = pages;
    }

    pub(crate) fn fail_all(&self, status: u16) {
        self.script.lock().unwrap().fail_all = Some(status);
    }

    pub(crate) fn fail_on_page(&self, index: usize, status: u16) {
        self.script.lock().unwrap().fail_on = Some((index, status));
    }

    pub(crate) fn recover(&self) {
        let mut script = self.script.lock().unwrap();
        script.fail_all = None;
        script.fail_on = None;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn cursors_seen(&self) -> Vec<Option<String>> {
        self.script.lock().unwrap().cursors.clone()
    }

    fn answer(&self, after: Option<&str>) -> Result<FormsPage> {
        let mut script = self.script.lock().unwrap();
        script.cursors.push(after.map(str::to_owned));

        let index = after
            .and_then(|cursor| cursor.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        if let Some(status) = script.fail_all {
            return Err(ProxyError::Upstream { status });
        }
        if let Some((fail_index, status)) = script.fail_on {
            if fail_index == index {
                return Err(ProxyError::Upstream { status });
            }
        }

        if script.endless {
            let results = script.pages.first().cloned().unwrap_or_default();
            return Ok(FormsPage::new(results, Some(format!("page-{}", index + 1))));
        }

        let results = script.pages.get(index).cloned().unwrap_or_default();
        let after = (index + 1 < script.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(FormsPage::new(results, after))
    }
}

#[async_trait]
impl FormsSource for ScriptedSource {
    async fn fetch_page(&self, _credential: &str, after: Option<&str>) -> Result<FormsPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Answer from the script as it stood when the request went out
        let page = self.answer(after);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        page
    }
}
