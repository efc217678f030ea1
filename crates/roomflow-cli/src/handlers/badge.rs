use super::HandlerContext;
use crate::types::OutputFormat;
use anyhow::Result;
use futures::StreamExt;
use roomflow_runtime::Roomflow;
use serde_json::json;

/// Print one line per applied badge update until `limit` updates or the
/// poller stops.
pub async fn watch(ctx: &HandlerContext, client: &Roomflow, limit: Option<usize>) -> Result<()> {
    let interval = client.config().badge.poll_interval();
    tracing::info!("Polling unread count every {}s", interval.as_secs());

    let (handle, stream) = client.badge_poller().start();
    let mut updates = match limit {
        Some(limit) => stream.take(limit).boxed(),
        None => stream.boxed(),
    };

    while let Some(update) = updates.next().await {
        match ctx.format {
            OutputFormat::Json => println!(
                "{}",
                json!({ "seq": update.seq, "count": update.count, "label": update.label() })
            ),
            OutputFormat::Plain => match update.label() {
                Some(label) => println!("Unread: {}", label),
                None => println!("Unread: 0"),
            },
        }
    }

    handle.stop();
    Ok(())
}
