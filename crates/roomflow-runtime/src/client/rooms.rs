use roomflow_types::RoomResponse;

use crate::Result;
use crate::http::ApiClient;

pub struct RoomOps {
    api: ApiClient,
}

impl RoomOps {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, room_id: u64) -> Result<RoomResponse> {
        self.api.get(&format!("rooms/{}", room_id)).await
    }
}
