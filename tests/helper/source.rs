//! Release source test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use release_lines::release::error::SourceError;
use release_lines::release::source::ReleaseSource;
use release_lines::release::types::ReleasePage;

/// Scripted response for one page request
pub enum Step {
    Page(Vec<&'static str>),
    Fail,
}

/// Paged source serving fixed pages per repository and recording requests
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<String, Vec<Vec<&'static str>>>,
    failures: Mutex<HashMap<(String, u32), u32>>,
    requests: Mutex<Vec<(String, u32)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `pages` for `owner/name`, page 1 first
    pub fn with_pages(mut self, repository: &str, pages: Vec<Vec<&'static str>>) -> Self {
        self.pages.insert(repository.to_string(), pages);
        self
    }

    /// Makes the next `times` requests of `page` fail before it succeeds
    pub fn failing(self, repository: &str, page: u32, times: u32) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert((repository.to_string(), page), times);
        self
    }

    /// Page requests made so far, in order
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }

    fn step(&self, repository: &str, page: u32) -> Option<Step> {
        let mut failures = self.failures.lock().unwrap();
        if let Some(remaining) = failures.get_mut(&(repository.to_string(), page)) {
            if *remaining > 0 {
                *remaining -= 1;
                return Some(Step::Fail);
            }
        }
        let pages = self.pages.get(repository)?;
        pages.get(page as usize - 1).cloned().map(Step::Page)
    }
}

#[async_trait]
impl ReleaseSource for ScriptedSource {
    async fn list_page(
        &self,
        owner: &str,
        name: &str,
        page: u32,
    ) -> Result<ReleasePage, SourceError> {
        let repository = format!("{}/{}", owner, name);
        self.requests.lock().unwrap().push((repository.clone(), page));

        let total = self.pages.get(&repository).map_or(0, Vec::len) as u32;
        match self.step(&repository, page) {
            Some(Step::Page(tags)) => Ok(ReleasePage::new(
                tags.into_iter().map(String::from).collect(),
                (page < total).then_some(page + 1),
            )),
            Some(Step::Fail) => Err(SourceError::InvalidResponse(
                "Unexpected status: 502 Bad Gateway".to_string(),
            )),
            None if page == 1 && total == 0 && self.pages.contains_key(&repository) => {
                Ok(ReleasePage::default())
            }
            None => Err(SourceError::NotFound(repository)),
        }
    }
}
