use super::HandlerContext;
use crate::views::RoomView;
use anyhow::Result;
use roomflow_runtime::Roomflow;

pub async fn show(ctx: &HandlerContext, client: &Roomflow, room_id: u64) -> Result<()> {
    let room = client.rooms().get(room_id).await?;
    ctx.render(&room, RoomView::new(&room))
}
