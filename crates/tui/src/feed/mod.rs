//! The candidate list shown next to the roster.
//!
//! Every change of the filter input issues a query; nothing is cancelled,
//! so responses can arrive out of order. Each query carries a sequence
//! number and a response older than the last one applied is dropped.
//! Failed queries keep the previous list on screen.

pub mod fragment;

use chrono::{DateTime, Local};
use engine::PlayerRef;

/// Options of the position select control.
pub const PRESETS: [&str; 5] = ["All", "Goalkeeper", "Defender", "Midfielder", "Attacker"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTicket {
    pub seq: u64,
    pub argument: String,
}

#[derive(Debug, Default)]
pub struct CandidateFeed {
    input: String,
    candidates: Vec<PlayerRef>,
    cursor: usize,
    next_seq: u64,
    applied_seq: Option<u64>,
    preset: Option<usize>,
    pub error: Option<String>,
    pub last_update: Option<DateTime<Local>>,
}

impl CandidateFeed {
    pub fn new(initial_input: &str) -> Self {
        Self {
            input: initial_input.to_string(),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn candidates(&self) -> &[PlayerRef] {
        &self.candidates
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Candidate under the cursor in the list currently displayed.
    pub fn selected(&self) -> Option<&PlayerRef> {
        self.candidates.get(self.cursor)
    }

    /// Queries issued after the one whose response is on screen.
    pub fn in_flight(&self) -> u64 {
        let applied = self.applied_seq.map_or(0, |seq| seq + 1);
        self.next_seq.saturating_sub(applied)
    }

    pub fn select_next(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.candidates.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn push_char(&mut self, ch: char) -> FilterTicket {
        self.preset = None;
        self.input.push(ch);
        self.begin_query()
    }

    pub fn pop_char(&mut self) -> FilterTicket {
        self.preset = None;
        self.input.pop();
        self.begin_query()
    }

    /// Moves the position select to its next option and queries for it.
    pub fn cycle_preset(&mut self) -> FilterTicket {
        let next = self.preset.map_or(0, |idx| (idx + 1) % PRESETS.len());
        self.preset = Some(next);
        self.input = PRESETS[next].to_string();
        self.begin_query()
    }

    /// Issues a query for the current input value.
    pub fn begin_query(&mut self) -> FilterTicket {
        let ticket = FilterTicket {
            seq: self.next_seq,
            argument: self.input.clone(),
        };
        self.next_seq += 1;
        tracing::debug!(seq = ticket.seq, argument = %ticket.argument, "filter query issued");
        ticket
    }

    /// Applies the response to query `seq`. Returns `false` when the response
    /// was stale and ignored.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<PlayerRef>, String>) -> bool {
        if self.applied_seq.is_some_and(|applied| seq < applied) {
            tracing::debug!(seq, applied = ?self.applied_seq, "stale filter response dropped");
            return false;
        }
        self.applied_seq = Some(seq);

        match result {
            Ok(candidates) => {
                tracing::debug!(seq, count = candidates.len(), "candidates replaced");
                self.candidates = candidates;
                self.cursor = 0;
                self.error = None;
                self.last_update = Some(Local::now());
            }
            Err(message) => {
                tracing::warn!(seq, %message, "filter query failed, keeping previous candidates");
                self.error = Some(message);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Money, Position};

    fn candidates(ids: &[&str]) -> Vec<PlayerRef> {
        ids.iter()
            .map(|id| PlayerRef::new(*id, *id, Money::from_cents(100), Position::Defender, "A"))
            .collect()
    }

    fn ids(feed: &CandidateFeed) -> Vec<&str> {
        feed.candidates().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn every_keystroke_issues_a_new_query() {
        let mut feed = CandidateFeed::new("");
        let first = feed.push_char('l');
        let second = feed.push_char('u');
        let third = feed.pop_char();
        assert_eq!((first.seq, second.seq, third.seq), (0, 1, 2));
        assert_eq!(second.argument, "lu");
        assert_eq!(third.argument, "l");
        assert_eq!(feed.in_flight(), 3);
    }

    #[test]
    fn late_response_of_older_query_is_dropped() {
        let mut feed = CandidateFeed::new("");
        let old = feed.push_char('a');
        let new = feed.push_char('b');

        assert!(feed.apply(new.seq, Ok(candidates(&["ab"]))));
        assert!(!feed.apply(old.seq, Ok(candidates(&["a1", "a2"]))));
        assert_eq!(ids(&feed), ["ab"]);
        assert_eq!(feed.in_flight(), 0);
    }

    #[test]
    fn in_order_responses_replace_each_other() {
        let mut feed = CandidateFeed::new("");
        let old = feed.push_char('a');
        let new = feed.push_char('b');

        assert!(feed.apply(old.seq, Ok(candidates(&["a1"]))));
        assert!(feed.apply(new.seq, Ok(candidates(&["ab"]))));
        assert_eq!(ids(&feed), ["ab"]);
    }

    #[test]
    fn failure_keeps_previous_candidates() {
        let mut feed = CandidateFeed::new("All");
        let first = feed.begin_query();
        feed.apply(first.seq, Ok(candidates(&["1", "2"])));
        feed.select_next();

        let second = feed.push_char('x');
        assert!(feed.apply(second.seq, Err("Filter unavailable".to_string())));
        assert_eq!(ids(&feed), ["1", "2"]);
        assert_eq!(feed.cursor(), 1);
        assert_eq!(feed.error.as_deref(), Some("Filter unavailable"));
    }

    #[test]
    fn replacement_resets_cursor() {
        let mut feed = CandidateFeed::new("All");
        let first = feed.begin_query();
        feed.apply(first.seq, Ok(candidates(&["1", "2", "3"])));
        feed.select_next();
        feed.select_next();
        assert_eq!(feed.selected().map(|p| p.id.as_str()), Some("3"));

        let second = feed.begin_query();
        feed.apply(second.seq, Ok(candidates(&["9"])));
        assert_eq!(feed.selected().map(|p| p.id.as_str()), Some("9"));

        let third = feed.begin_query();
        feed.apply(third.seq, Ok(Vec::new()));
        assert!(feed.selected().is_none());
    }

    #[test]
    fn presets_cycle_through_positions() {
        let mut feed = CandidateFeed::new("");
        let args: Vec<String> = (0..6).map(|_| feed.cycle_preset().argument).collect();
        assert_eq!(
            args,
            ["All", "Goalkeeper", "Defender", "Midfielder", "Attacker", "All"]
        );
        assert_eq!(feed.push_char('x').argument, "Allx");
        assert_eq!(feed.cycle_preset().argument, "All");
    }
}
