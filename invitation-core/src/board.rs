use crate::messages::{self, FetchError, GuestMessage, MessageStats};

pub const LOAD_FAILED: &str = "Failed to load messages";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Handed out by [`MessageBoard::begin_refresh`]; only the newest one may
/// apply its response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

/// Guest messages as last fetched, plus where the latest refresh stands.
///
/// The board does no IO. Callers take a ticket, run the request with
/// whatever transport they have, and hand the outcome back.
#[derive(Clone, Debug)]
pub struct MessageBoard {
    messages: Vec<GuestMessage>,
    state: LoadState,
    issued: u64,
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBoard {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            state: LoadState::Idle,
            issued: 0,
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        RefreshTicket(self.issued)
    }

    pub fn complete(
        &mut self,
        ticket: RefreshTicket,
        outcome: Result<serde_json::Value, FetchError>,
    ) -> Completion {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                newest = self.issued,
                "discarding response from superseded refresh"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(body) => {
                self.messages = messages::decode_collection(body);
                self.state = LoadState::Loaded;
                tracing::debug!(count = self.messages.len(), "guest messages loaded");
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "guest message refresh failed");
                self.state = LoadState::Failed(e.to_string());
                Completion::Failed
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Banner text for the last failed refresh, if the latest one failed.
    pub fn error(&self) -> Option<String> {
        match &self.state {
            LoadState::Failed(reason) => Some(format!("{LOAD_FAILED}: {reason}")),
            _ => None,
        }
    }

    pub fn messages(&self) -> &[GuestMessage] {
        &self.messages
    }

    pub fn visible(&self, query: &str) -> Vec<&GuestMessage> {
        messages::filter(&self.messages, query)
    }

    pub fn stats(&self) -> MessageStats {
        messages::stats(&self.messages)
    }

    pub fn summary(&self, query: &str) -> String {
        format!(
            "{} of {} messages",
            self.visible(query).len(),
            self.messages.len()
        )
    }
}
