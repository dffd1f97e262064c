//! Cursor pagination over Graph API collections
//!
//! Collections come back one page at a time:
//! `{"data": [...], "paging": {"cursors": {"after": "..."}, "next": "..."}}`.
//! `Paged` walks them lazily, fetching a page only once the previous one has
//! been handed out.

use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::decode;
use crate::domain::result::Result;
use crate::domain::{GraphRequest, Param, ParamValue};
use crate::ports::GraphApi;

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    cursors: Option<Cursors>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Cursors {
    #[serde(default)]
    after: Option<String>,
}

impl Paging {
    /// Cursor for the following page, if the platform says there is one
    fn next_cursor(&self) -> Option<&str> {
        self.next.as_ref()?;
        self.cursors.as_ref()?.after.as_deref()
    }
}

/// Lazy, forward-only sequence of entities spread over pages
///
/// Yields `Err` at most once: after a failed fetch the sequence ends.
pub struct Paged<T> {
    api: Arc<dyn GraphApi>,
    next: Option<GraphRequest>,
    buffer: VecDeque<T>,
    seen_cursors: HashSet<String>,
    pages_fetched: usize,
}

impl<T: DeserializeOwned> Paged<T> {
    pub fn new(api: Arc<dyn GraphApi>, first: GraphRequest) -> Self {
        Self {
            api,
            next: Some(first),
            buffer: VecDeque::new(),
            seen_cursors: HashSet::new(),
            pages_fetched: 0,
        }
    }

    /// Number of pages requested so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_next_page(&mut self) -> Result<()> {
        let Some(mut request) = self.next.take() else {
            return Ok(());
        };

        let body = self.api.execute(&request)?;
        let page: Page<T> = decode::entity(&body)?;
        self.pages_fetched += 1;

        debug!(
            path = %request.path,
            page = self.pages_fetched,
            items = page.data.len(),
            "fetched page"
        );

        if !page.data.is_empty() {
            if let Some(ParamValue::Text(current)) = request.param("after") {
                self.seen_cursors.insert(current.clone());
            }
            let cursor = page.paging.as_ref().and_then(Paging::next_cursor);
            // A cursor already followed means the platform is cycling
            match cursor {
                Some(after) if !self.seen_cursors.contains(after) => {
                    let after = after.to_string();
                    request.set_param(Param::text("after", after));
                    self.next = Some(request);
                }
                Some(after) => debug!(cursor = after, "cursor repeats, stopping"),
                None => {}
            }
        }

        self.buffer.extend(page.data);
        Ok(())
    }
}

impl<T: DeserializeOwned> Iterator for Paged<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            self.next.as_ref()?;
            if let Err(e) = self.fetch_next_page() {
                return Some(Err(e));
            }
        }
    }
}

impl<T: DeserializeOwned> FusedIterator for Paged<T> {}
