use super::HandlerContext;
use crate::views::{NotificationListView, UnreadCountView};
use anyhow::Result;
use roomflow_runtime::Roomflow;
use serde_json::json;

pub async fn list(ctx: &HandlerContext, client: &Roomflow, unread_only: bool) -> Result<()> {
    let notifications = client.notifications();
    let items = if unread_only {
        notifications.unread().await?
    } else {
        notifications.list().await?
    };
    let now = chrono::Local::now().naive_local();
    ctx.render(&items, NotificationListView::new(&items, now))
}

/// Signed out reads as zero without asking the backend.
pub async fn count(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let notifications = client.notifications();
    let count = if notifications.session_active() {
        notifications.unread_count().await?
    } else {
        0
    };
    ctx.render(&json!({ "count": count }), UnreadCountView { count })
}

pub async fn mark_read(ctx: &HandlerContext, client: &Roomflow, notification_id: u64) -> Result<()> {
    let notification = client.notifications().mark_read(notification_id).await?;
    ctx.render(
        &notification,
        format_args!("Marked #{} as read.\n", notification.notification_id),
    )
}

pub async fn mark_all_read(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let message = client.notifications().mark_all_read().await?;
    ctx.message(
        message
            .as_deref()
            .unwrap_or("All notifications marked as read."),
    )
}

pub async fn delete(ctx: &HandlerContext, client: &Roomflow, notification_id: u64) -> Result<()> {
    let message = client.notifications().delete(notification_id).await?;
    let fallback = format!("Deleted notification #{}.", notification_id);
    ctx.message(message.as_deref().unwrap_or(&fallback))
}

pub async fn clear(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let message = client.notifications().delete_all().await?;
    ctx.message(message.as_deref().unwrap_or("All notifications deleted."))
}
