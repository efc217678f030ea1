//! Unread-badge sequencing.
//!
//! Every fetch is issued a [`FetchTicket`] carrying a monotonically
//! increasing sequence number. A completion is applied only when its ticket
//! is newer than the last applied one, so a slow request that finishes after
//! a later one can never overwrite the fresher count.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Fetching,
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeState {
    next_seq: u64,
    last_applied: u64,
    in_flight: usize,
    count: u64,
}

impl BadgeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.next_seq += 1;
        self.in_flight += 1;
        FetchTicket(self.next_seq)
    }

    /// Record a completion. `None` is a failed fetch and resets the count
    /// to 0. Returns the new count when the completion was applied.
    pub fn finish(&mut self, ticket: FetchTicket, count: Option<u64>) -> Option<u64> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket.0 <= self.last_applied {
            return None;
        }
        self.last_applied = ticket.0;
        self.count = count.unwrap_or(0);
        Some(self.count)
    }

    /// Apply a count known without a fetch (no session).
    pub fn reset(&mut self) -> FetchTicket {
        let ticket = FetchTicket(self.next_seq + 1);
        self.next_seq = ticket.0;
        self.last_applied = ticket.0;
        self.count = 0;
        ticket
    }

    pub fn phase(&self) -> PollPhase {
        if self.in_flight > 0 {
            PollPhase::Fetching
        } else {
            PollPhase::Idle
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }
}
