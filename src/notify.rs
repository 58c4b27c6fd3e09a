use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::email::templates;
use crate::models::{EntityKind, NotificationType};
use crate::state::SharedState;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9][A-Za-z0-9_.-]*)").unwrap());

/// What a notification points back at.
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'a> {
    pub kind: EntityKind,
    pub id: i64,
    pub title: &'a str,
}

/// Outcome of one email delivery attempt. Logged, never surfaced: the
/// in-app notification is the record, email is best-effort on top.
#[derive(Debug)]
pub enum EmailOutcome {
    Delivered,
    Skipped(&'static str),
    Failed(String),
}

/// Record a notification for `recipient_id`. Never fails the caller: an
/// insert error is logged and swallowed, and the email attempt runs on a
/// detached task. Self-notifications are dropped.
pub async fn record(
    state: &SharedState,
    recipient_id: i64,
    kind: NotificationType,
    entity: EntityRef<'_>,
    actor: &AuthUser,
) {
    if recipient_id == actor.user_id {
        return;
    }

    let notification = match db::notifications::insert(
        &state.pool,
        recipient_id,
        kind.as_str(),
        entity.kind.as_str(),
        entity.id,
        entity.title,
        &actor.name,
    )
    .await
    {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("Failed to record notification for user {recipient_id}: {e}");
            return;
        }
    };

    // Fire-and-forget email; the request does not wait on SMTP.
    let state = state.clone();
    let title = entity.title.to_string();
    tokio::spawn(async move {
        let outcome = send_email(&state, recipient_id, kind, &title, &notification.actor_name).await;
        match outcome {
            EmailOutcome::Delivered => {
                tracing::debug!("Notification email delivered to user {recipient_id}");
            }
            EmailOutcome::Skipped(reason) => {
                tracing::debug!("Notification email skipped for user {recipient_id}: {reason}");
            }
            EmailOutcome::Failed(reason) => {
                tracing::warn!("Notification email failed for user {recipient_id}: {reason}");
            }
        }
    });
}

/// Record the same notification for several recipients, deduplicated. The
/// actor is filtered inside `record`.
pub async fn record_all(
    state: &SharedState,
    recipient_ids: impl IntoIterator<Item = i64>,
    kind: NotificationType,
    entity: EntityRef<'_>,
    actor: &AuthUser,
) {
    let unique: BTreeSet<i64> = recipient_ids.into_iter().collect();
    for recipient_id in unique {
        record(state, recipient_id, kind, entity, actor).await;
    }
}

async fn send_email(
    state: &SharedState,
    recipient_id: i64,
    kind: NotificationType,
    entity_title: &str,
    actor_name: &str,
) -> EmailOutcome {
    let Some(mailer) = &state.mailer else {
        return EmailOutcome::Skipped("SMTP not configured");
    };

    let recipient = match db::users::find_by_id(&state.pool, recipient_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return EmailOutcome::Skipped("recipient no longer exists"),
        Err(e) => return EmailOutcome::Failed(format!("recipient lookup: {e}")),
    };

    let subject = format!("{actor_name} {}: {entity_title}", kind.describe());
    let html = templates::render_notification(
        &recipient.name,
        actor_name,
        kind.describe(),
        entity_title,
        &state.config.base_url,
    );

    match mailer.send(&recipient.email, &subject, &html).await {
        Ok(()) => EmailOutcome::Delivered,
        Err(e) => EmailOutcome::Failed(e),
    }
}

/// Extract distinct @name tokens from a comment body, in order of first
/// appearance.
pub fn extract_mentions(body: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for caps in MENTION_RE.captures_iter(body) {
        let name = caps[1].to_string();
        if seen.insert(name.to_lowercase()) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_mentions_in_order() {
        let body = "ping @ana and @Luis.Gomez, then @ana again";
        assert_eq!(extract_mentions(body), vec!["ana", "Luis.Gomez"]);
    }

    #[test]
    fn ignores_bare_at_signs() {
        assert_eq!(extract_mentions("mail me at @ home"), Vec::<String>::new());
        assert_eq!(extract_mentions("no mentions here"), Vec::<String>::new());
    }

    #[test]
    fn dedup_is_case_insensitive() {
        assert_eq!(extract_mentions("@Ana @ana @ANA"), vec!["Ana"]);
    }
}
