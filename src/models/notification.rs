use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub entity_title: String,
    pub actor_name: String,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Closed set of events the notification feed knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    IssueCreated,
    IssueUpdated,
    IssueAssigned,
    CommentAdded,
    PageCreated,
    PageUpdated,
    Mention,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::IssueCreated => "issue_created",
            NotificationType::IssueUpdated => "issue_updated",
            NotificationType::IssueAssigned => "issue_assigned",
            NotificationType::CommentAdded => "comment_added",
            NotificationType::PageCreated => "page_created",
            NotificationType::PageUpdated => "page_updated",
            NotificationType::Mention => "mention",
        }
    }

    /// Short human phrase used in email subjects.
    pub fn describe(&self) -> &'static str {
        match self {
            NotificationType::IssueCreated => "created an issue",
            NotificationType::IssueUpdated => "updated an issue",
            NotificationType::IssueAssigned => "assigned you an issue",
            NotificationType::CommentAdded => "commented on an issue",
            NotificationType::PageCreated => "created a wiki page",
            NotificationType::PageUpdated => "updated a wiki page",
            NotificationType::Mention => "mentioned you",
        }
    }
}

/// Kind of entity a notification points back at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Issue,
    Comment,
    Page,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Issue => "issue",
            EntityKind::Comment => "comment",
            EntityKind::Page => "page",
        }
    }
}
