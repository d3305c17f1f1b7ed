//! Per-run session state, constructed once at startup and passed by
//! reference to every action handler. Nothing here is persisted.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::chat::ChatClient;
use crate::constants::TRANSCRIPT_CAP;
use crate::github::RepoClient;

/// One prompt/response pair, timestamped for display.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub prompt: String,
    pub response: String,
    pub at: DateTime<Local>,
}

/// Display-only chat history. Append-only from the caller's view, but
/// capped: once full, the oldest exchange is dropped.
#[derive(Debug, Default)]
pub struct Transcript {
    exchanges: VecDeque<ChatExchange>,
}

impl Transcript {
    pub fn push(&mut self, prompt: String, response: String) {
        if self.exchanges.len() >= TRANSCRIPT_CAP {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(ChatExchange { prompt, response, at: Local::now() });
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatExchange> {
        self.exchanges.iter()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

/// The active remote handles plus the transient UI-facing state: the
/// last-fetched listing with its staleness flag, the current selection,
/// the last viewed file, and the chat transcript.
pub struct Session {
    pub repo: Option<RepoClient>,
    pub chat: Option<ChatClient>,
    pub listing: Vec<String>,
    pub listing_stale: bool,
    pub selected: usize,
    /// Last viewed file: (path, content rendered lossy as UTF-8)
    pub viewed: Option<(String, String)>,
    pub transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self {
            repo: None,
            chat: None,
            listing: Vec::new(),
            listing_stale: true,
            selected: 0,
            viewed: None,
            transcript: Transcript::default(),
        }
    }

    pub fn connected(&self) -> bool {
        self.repo.is_some()
    }

    /// Replace the cached listing, clamping the selection.
    pub fn set_listing(&mut self, listing: Vec<String>) {
        self.listing = listing;
        self.listing_stale = false;
        if self.selected >= self.listing.len() {
            self.selected = self.listing.len().saturating_sub(1);
        }
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.listing.get(self.selected).map(|s| s.as_str())
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.listing.len() {
            self.selected += 1;
        }
    }
}
