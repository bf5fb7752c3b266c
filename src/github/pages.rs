use std::sync::LazyLock;

use octocrab::Octocrab;

use crate::diagnostics::{Diagnostics, Stage};
use crate::github::types::{Item, RepoId};

const LOG_TARGET: &str = "issue_tally::github";

/// Items requested per page (GitHub's maximum)
pub const PAGE_SIZE: u8 = 100;

/// Extracts the page cursor from a `next` link
static PAGE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"[?&]page=(\d+)").expect("invalid regex"));

/// One successfully decoded page of the issues listing
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Item>,
    /// Records that came back but could not be turned into an `Item`
    pub rejected: Vec<String>,
    /// Cursor of the following page; `None` (or 0) ends pagination
    pub next_page: Option<u32>,
}

/// A page request that failed.
///
/// A response may still have carried a continuation cursor even though its
/// body was unusable; a pure transport failure never does.
#[derive(Debug, Clone)]
pub struct PageError {
    pub message: String,
    pub next_page: Option<u32>,
}

/// Anything that can serve the issues listing one page at a time
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, page: u32) -> Result<Page, PageError>;
}

/// Pull the `page` query parameter out of a pagination link
pub fn page_number(uri: &http::Uri) -> Option<u32> {
    let query = uri.query()?;
    let with_sep = format!("?{}", query);
    PAGE_REGEX
        .captures(&with_sep)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Turn an octocrab error into something a user can act on
fn describe_error(error: &octocrab::Error) -> String {
    let error_str = format!("{:?}", error);
    if error_str.contains("Not Found") || error_str.contains("404") {
        "Repository not found or no access. Check the repository name and token permissions.".to_string()
    } else if error_str.contains("401") || error_str.contains("Bad credentials") {
        "Authentication failed. Your GitHub token may be invalid or expired.".to_string()
    } else if error_str.contains("rate limit") || error_str.contains("403") {
        "GitHub API rate limit exceeded.".to_string()
    } else {
        format!("GitHub API error: {}", error)
    }
}

/// Issues listing of one repository, all states, served by octocrab
pub struct GitHubPages<'a> {
    client: &'a Octocrab,
    repo: &'a RepoId,
}

impl<'a> GitHubPages<'a> {
    pub fn new(client: &'a Octocrab, repo: &'a RepoId) -> Self {
        Self { client, repo }
    }
}

impl PageSource for GitHubPages<'_> {
    async fn fetch_page(&self, page: u32) -> Result<Page, PageError> {
        let response = self
            .client
            .issues(&self.repo.owner, &self.repo.name)
            .list()
            .state(octocrab::params::State::All)
            .per_page(PAGE_SIZE)
            .page(page)
            .send()
            .await
            .map_err(|e| PageError {
                message: describe_error(&e),
                next_page: None,
            })?;

        let next_page = response.next.as_ref().and_then(page_number);

        let mut items = Vec::with_capacity(response.items.len());
        let mut rejected = Vec::new();
        for issue in response.items {
            match Item::from_issue(issue) {
                Ok(item) => items.push(item),
                Err(reason) => rejected.push(reason),
            }
        }

        Ok(Page {
            items,
            rejected,
            next_page,
        })
    }
}

/// Walk every page of the listing, starting at page 1.
///
/// A failed page is recorded and contributes nothing; pagination then
/// follows whatever cursor that response carried, so a failure without one
/// ends the walk. Nothing here is fatal.
pub async fn fetch_all_items<S: PageSource>(source: &S) -> (Vec<Item>, Diagnostics) {
    let mut all_items = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut cursor: u32 = 1;

    loop {
        let next_page = match source.fetch_page(cursor).await {
            Ok(page) => {
                log::info!(target: LOG_TARGET, "got {} items from page {}", page.items.len(), cursor);
                for reason in page.rejected {
                    diagnostics.push(Stage::Ingest, reason);
                }
                all_items.extend(page.items);
                page.next_page
            }
            Err(e) => {
                diagnostics.push(Stage::Fetch, format!("page {}: {}", cursor, e.message));
                e.next_page
            }
        };

        match next_page {
            Some(next) if next != 0 => cursor = next,
            _ => break,
        }
    }

    log::info!(target: LOG_TARGET, "got {} items", all_items.len());
    (all_items, diagnostics)
}
