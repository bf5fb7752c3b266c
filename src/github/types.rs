use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Open/closed state as reported by the issues API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Open => "open",
            ItemState::Closed => "closed",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issue or pull request of the tracked repository.
///
/// GitHub serves pull requests through the issues endpoint as well; they are
/// told apart by the `pull_request` link, which is kept here as the PR's
/// HTML URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub state: ItemState,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pull_request: Option<String>,
}

impl Item {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.state == ItemState::Closed
    }

    /// Check the state/closure invariant.
    ///
    /// A closed item must carry `closed_at`, an open one must not, and
    /// closure can never precede creation.
    pub fn validate(&self) -> Result<(), String> {
        match (self.state, self.closed_at) {
            (ItemState::Closed, None) => Err(format!("item {} is closed but has no closed_at", self.id)),
            (ItemState::Open, Some(_)) => Err(format!("item {} is open but has a closed_at", self.id)),
            (ItemState::Closed, Some(closed_at)) if closed_at < self.created_at => Err(format!(
                "item {} was closed at {} before it was created at {}",
                self.id, closed_at, self.created_at
            )),
            _ => Ok(()),
        }
    }

    /// Convert an octocrab issue, rejecting states this tool does not model
    pub fn from_issue(issue: octocrab::models::issues::Issue) -> Result<Self, String> {
        let state = match issue.state {
            octocrab::models::IssueState::Open => ItemState::Open,
            octocrab::models::IssueState::Closed => ItemState::Closed,
            other => return Err(format!("item {} has unsupported state {:?}", issue.id.0, other)),
        };

        let item = Item {
            id: issue.id.0,
            number: issue.number,
            title: issue.title,
            state,
            created_at: issue.created_at,
            closed_at: issue.closed_at,
            pull_request: issue.pull_request.map(|link| link.html_url.to_string()),
        };
        item.validate()?;
        Ok(item)
    }
}

/// Repository the report is built for ("owner/name")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl Default for RepoId {
    fn default() -> Self {
        Self {
            owner: "docker".to_string(),
            name: "machine".to_string(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn open_item(id: u64, created: DateTime<Utc>) -> Item {
        Item {
            id,
            number: id,
            title: format!("Item #{}", id),
            state: ItemState::Open,
            created_at: created,
            closed_at: None,
            pull_request: None,
        }
    }

    pub(crate) fn closed_item(id: u64, created: DateTime<Utc>, closed: DateTime<Utc>) -> Item {
        Item {
            state: ItemState::Closed,
            closed_at: Some(closed),
            ..open_item(id, created)
        }
    }

    pub(crate) fn as_pull_request(mut item: Item) -> Item {
        item.pull_request = Some(format!("https://github.com/docker/machine/pull/{}", item.number));
        item
    }

    #[test]
    fn test_closed_at_present_iff_closed() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let closed = Utc.with_ymd_and_hms(2024, 3, 7, 18, 0, 0).unwrap();

        let open = open_item(1, created);
        assert!(!open.is_closed());
        assert!(open.closed_at.is_none());
        assert!(open.validate().is_ok());

        let done = closed_item(2, created, closed);
        assert!(done.is_closed());
        assert!(done.closed_at.is_some());
        assert!(done.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_closed_without_closed_at() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let mut item = open_item(7, created);
        item.state = ItemState::Closed;
        let err = item.validate().unwrap_err();
        assert!(err.contains("no closed_at"), "got: {}", err);
    }

    #[test]
    fn test_validate_rejects_open_with_closed_at() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let mut item = open_item(8, created);
        item.closed_at = Some(created);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_closure_before_creation() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let closed = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        assert!(closed_item(9, created, closed).validate().is_err());
    }

    #[test]
    fn test_pull_request_marker() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let item = open_item(3, created);
        assert!(!item.is_pull_request());
        assert!(as_pull_request(item).is_pull_request());
    }

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "login": "octocat",
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "gravatar_id": "",
            "url": "https://api.github.com/users/octocat",
            "html_url": "https://github.com/octocat",
            "followers_url": "https://api.github.com/users/octocat/followers",
            "following_url": "https://api.github.com/users/octocat/following{/other_user}",
            "gists_url": "https://api.github.com/users/octocat/gists{/gist_id}",
            "starred_url": "https://api.github.com/users/octocat/starred{/owner}{/repo}",
            "subscriptions_url": "https://api.github.com/users/octocat/subscriptions",
            "organizations_url": "https://api.github.com/users/octocat/orgs",
            "repos_url": "https://api.github.com/users/octocat/repos",
            "events_url": "https://api.github.com/users/octocat/events{/privacy}",
            "received_events_url": "https://api.github.com/users/octocat/received_events",
            "type": "User",
            "site_admin": false
        })
    }

    /// An issues-listing record shaped like the GitHub REST response
    fn issue_json(state: &str, closed_at: Option<&str>, pull_request: bool) -> serde_json::Value {
        let base = "https://api.github.com/repos/docker/machine/issues/1347";
        let mut issue = serde_json::json!({
            "id": 1,
            "node_id": "MDU6SXNzdWUx",
            "url": base,
            "repository_url": "https://api.github.com/repos/docker/machine",
            "labels_url": format!("{}/labels{{/name}}", base),
            "comments_url": format!("{}/comments", base),
            "events_url": format!("{}/events", base),
            "html_url": "https://github.com/docker/machine/issues/1347",
            "number": 1347,
            "state": state,
            "title": "Found a bug",
            "body": "I'm having a problem with this.",
            "user": user_json(),
            "labels": [],
            "assignee": null,
            "assignees": [],
            "milestone": null,
            "locked": false,
            "active_lock_reason": null,
            "comments": 0,
            "closed_at": closed_at,
            "created_at": "2024-03-05T10:00:00Z",
            "updated_at": "2024-03-08T10:00:00Z",
            "closed_by": null,
            "author_association": "NONE"
        });
        if pull_request {
            issue["pull_request"] = serde_json::json!({
                "url": "https://api.github.com/repos/docker/machine/pulls/1347",
                "html_url": "https://github.com/docker/machine/pull/1347",
                "diff_url": "https://github.com/docker/machine/pull/1347.diff",
                "patch_url": "https://github.com/docker/machine/pull/1347.patch"
            });
        }
        issue
    }

    fn convert(value: serde_json::Value) -> Result<Item, String> {
        let issue: octocrab::models::issues::Issue =
            serde_json::from_value(value).expect("fixture should match the octocrab issue model");
        Item::from_issue(issue)
    }

    #[test]
    fn test_from_issue_open_issue() {
        let item = convert(issue_json("open", None, false)).unwrap();

        assert_eq!(item.id, 1);
        assert_eq!(item.number, 1347);
        assert_eq!(item.title, "Found a bug");
        assert_eq!(item.state, ItemState::Open);
        assert_eq!(item.created_at, Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap());
        assert!(item.closed_at.is_none());
        assert!(!item.is_pull_request());
    }

    #[test]
    fn test_from_issue_closed_pull_request() {
        let item = convert(issue_json("closed", Some("2024-03-07T18:00:00Z"), true)).unwrap();

        assert_eq!(item.state, ItemState::Closed);
        assert_eq!(item.closed_at, Some(Utc.with_ymd_and_hms(2024, 3, 7, 18, 0, 0).unwrap()));
        assert!(item.is_pull_request());
        assert_eq!(
            item.pull_request.as_deref(),
            Some("https://github.com/docker/machine/pull/1347")
        );
    }

    #[test]
    fn test_from_issue_rejects_closed_without_closed_at() {
        let err = convert(issue_json("closed", None, false)).unwrap_err();
        assert!(err.contains("no closed_at"), "got: {}", err);
    }

    #[test]
    fn test_from_issue_rejects_closure_before_creation() {
        let err = convert(issue_json("closed", Some("2024-03-01T00:00:00Z"), true)).unwrap_err();
        assert!(err.contains("before it was created"), "got: {}", err);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ItemState::Open).unwrap(), "\"open\"");
        assert_eq!(serde_json::to_string(&ItemState::Closed).unwrap(), "\"closed\"");
        assert_eq!(ItemState::Closed.to_string(), "closed");
    }

    #[test]
    fn test_repo_display() {
        assert_eq!(RepoId::default().to_string(), "docker/machine");
    }
}
