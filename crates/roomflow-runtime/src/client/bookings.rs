use reqwest::Method;
use roomflow_engine::BookingDraft;
use roomflow_types::{BookingRequest, BookingResponse};

use crate::http::ApiClient;
use crate::{Error, Result};

pub struct BookingOps {
    api: ApiClient,
}

impl BookingOps {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upcoming(&self) -> Result<Vec<BookingResponse>> {
        self.api.get("bookings/upcoming").await
    }

    pub async fn past(&self) -> Result<Vec<BookingResponse>> {
        self.api.get("bookings/past").await
    }

    pub async fn get(&self, booking_id: u64) -> Result<BookingResponse> {
        self.api.get(&format!("bookings/{}", booking_id)).await
    }

    /// Cancel a pending or confirmed booking.
    pub async fn cancel(&self, booking_id: u64) -> Result<Option<String>> {
        self.api
            .ack::<()>(Method::PUT, &format!("bookings/{}/cancel", booking_id), None)
            .await
    }

    pub async fn create(&self, request: &BookingRequest) -> Result<BookingResponse> {
        self.api.post("bookings", request).await
    }

    /// Submit a fully threaded draft.
    pub async fn submit_draft(&self, draft: &BookingDraft) -> Result<BookingResponse> {
        let request = roomflow_engine::submit(draft)?;
        if !self.api.session().is_authenticated() {
            return Err(Error::Unauthorized);
        }
        tracing::info!(
            "Submitting booking for room {} ({} - {})",
            request.room_id,
            request.check_in,
            request.check_out
        );
        self.create(&request).await
    }
}
