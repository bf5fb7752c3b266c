pub mod client;
pub mod pages;
pub mod types;

pub use client::create_client;
pub use pages::{fetch_all_items, GitHubPages, Page, PageError, PageSource, PAGE_SIZE};
pub use types::{Item, ItemState, RepoId};
