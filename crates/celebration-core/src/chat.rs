//! Scripted chat bot.
//!
//! [`ScriptedResponder`] maps user text to a canned reply. [`ChatSession`]
//! keeps the transcript and enforces one outstanding reply at a time: `send`
//! appends the user message and hands out a [`PendingReply`] ticket; the
//! frontend waits `delay_ms` and then calls `deliver` with that ticket.

use crate::content::{FALLBACK_REPLIES, KEYWORD_REPLIES};
use crate::error::{ChatError, ContentError};
use crate::rng::{entropy_seed, seeded};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Simulated typing delay range for bot replies, in milliseconds
pub const REPLY_DELAY_MS: Range<u32> = 1000..2000;

/// Ordered `(trigger, reply)` pairs; triggers are lowercase
pub type KeywordTable = &'static [(&'static str, &'static str)];

/// A transcript entry. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub from_user: bool,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp_ms: f64,
}

/// Handle for the one reply a session may have outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTicket(u64);

impl ReplyTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What the frontend needs to schedule a bot reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: ReplyTicket,
    pub delay_ms: u32,
}

/// Keyword lookup with a random fallback
pub struct ScriptedResponder {
    table: KeywordTable,
    fallbacks: &'static [&'static str],
    rng: StdRng,
}

impl ScriptedResponder {
    /// The birthday bot's own tables
    pub fn birthday() -> Self {
        Self::birthday_with_seed(entropy_seed())
    }

    pub fn birthday_with_seed(seed: u64) -> Self {
        Self {
            table: KEYWORD_REPLIES,
            fallbacks: FALLBACK_REPLIES,
            rng: seeded(seed),
        }
    }

    pub fn new(table: KeywordTable, fallbacks: &'static [&'static str]) -> Result<Self, ContentError> {
        Self::with_seed(table, fallbacks, entropy_seed())
    }

    pub fn with_seed(
        table: KeywordTable,
        fallbacks: &'static [&'static str],
        seed: u64,
    ) -> Result<Self, ContentError> {
        if fallbacks.is_empty() {
            return Err(ContentError::EmptyPool { what: "fallback reply" });
        }
        Ok(Self {
            table,
            fallbacks,
            rng: seeded(seed),
        })
    }

    /// Reply for the first trigger contained in the lowercased input, or a
    /// random fallback
    pub fn reply(&mut self, text: &str) -> &'static str {
        let lower = text.to_lowercase();
        if let Some((_, reply)) = self.table.iter().find(|(trigger, _)| lower.contains(trigger)) {
            return *reply;
        }
        self.fallbacks[self.rng.gen_range(0..self.fallbacks.len())]
    }

    pub fn reply_delay_ms(&mut self) -> u32 {
        self.rng.gen_range(REPLY_DELAY_MS)
    }

    pub fn fallbacks(&self) -> &'static [&'static str] {
        self.fallbacks
    }
}

struct Outstanding {
    ticket: ReplyTicket,
    reply: &'static str,
}

/// Transcript plus the single outstanding reply
pub struct ChatSession {
    responder: ScriptedResponder,
    messages: Vec<ChatMessage>,
    pending: Option<Outstanding>,
    next_message_id: u64,
    next_ticket: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(ScriptedResponder::birthday())
    }
}

impl ChatSession {
    pub fn new(responder: ScriptedResponder) -> Self {
        Self {
            responder,
            messages: Vec::new(),
            pending: None,
            next_message_id: 1,
            next_ticket: 1,
        }
    }

    /// Append the user's message and reserve the bot reply.
    ///
    /// Rejected while another reply is outstanding so the transcript stays
    /// strictly user-then-bot.
    pub fn send(&mut self, text: &str, now_ms: f64) -> Result<PendingReply, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if let Some(outstanding) = &self.pending {
            return Err(ChatError::ReplyPending {
                ticket: outstanding.ticket.0,
            });
        }

        self.push(text.to_string(), true, now_ms);

        let reply = self.responder.reply(text);
        let delay_ms = self.responder.reply_delay_ms();
        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(Outstanding { ticket, reply });

        tracing::debug!(ticket = ticket.0, delay_ms, "chat reply scheduled");
        Ok(PendingReply { ticket, delay_ms })
    }

    /// Append the bot reply for `ticket`. Fails if the ticket was cancelled
    /// or already delivered.
    pub fn deliver(&mut self, ticket: ReplyTicket, now_ms: f64) -> Result<&ChatMessage, ChatError> {
        let outstanding = match self.pending.take() {
            Some(outstanding) if outstanding.ticket == ticket => outstanding,
            other => {
                self.pending = other;
                return Err(ChatError::StaleTicket { ticket: ticket.0 });
            }
        };

        tracing::debug!(ticket = ticket.0, "chat reply delivered");
        Ok(self.push(outstanding.reply.to_string(), false, now_ms))
    }

    /// Drop the outstanding reply, if any
    pub fn cancel_pending(&mut self) -> Option<ReplyTicket> {
        let cancelled = self.pending.take().map(|outstanding| outstanding.ticket);
        if let Some(ticket) = cancelled {
            tracing::debug!(ticket = ticket.0, "chat reply cancelled");
        }
        cancelled
    }

    fn push(&mut self, text: String, from_user: bool, now_ms: f64) -> &ChatMessage {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            from_user,
            timestamp_ms: now_ms,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a bot reply is outstanding
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<ReplyTicket> {
        self.pending.as_ref().map(|outstanding| outstanding.ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let mut responder = ScriptedResponder::birthday_with_seed(1);
        assert_eq!(
            responder.reply("Happy Birthday"),
            "Thank you! Ab cake ka piece le jao! 🎂"
        );
        assert_eq!(responder.reply("HELLO there"), "Hello! Birthday boy ko wish karo pehle! 🎂");
    }

    #[test]
    fn test_first_trigger_in_table_order_wins() {
        let mut responder = ScriptedResponder::birthday_with_seed(1);
        // "hello" precedes "cake" in the table
        assert_eq!(
            responder.reply("cake? hello?"),
            "Hello! Birthday boy ko wish karo pehle! 🎂"
        );
    }

    #[test]
    fn test_unmatched_input_uses_fallback() {
        let mut responder = ScriptedResponder::birthday_with_seed(2);
        for _ in 0..20 {
            let reply = responder.reply("xyz123");
            assert!(FALLBACK_REPLIES.contains(&reply));
        }
    }

    #[test]
    fn test_reply_delay_range() {
        let mut responder = ScriptedResponder::birthday_with_seed(3);
        for _ in 0..200 {
            let delay = responder.reply_delay_ms();
            assert!((1000..2000).contains(&delay));
        }
    }

    #[test]
    fn test_send_then_deliver() {
        let mut chat = ChatSession::new(ScriptedResponder::birthday_with_seed(4));
        let pending = chat.send("  Happy Birthday  ", 10.0).unwrap();
        assert!(chat.is_typing());
        assert_eq!(chat.messages().len(), 1);

        let reply = chat.deliver(pending.ticket, 1500.0).unwrap();
        assert!(!reply.from_user);
        assert_eq!(reply.timestamp_ms, 1500.0);

        let messages = chat.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].from_user);
        assert_eq!(messages[0].text, "Happy Birthday");
        assert!(!messages[1].from_user);
        assert!(messages[0].id < messages[1].id);
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_send_blocked_while_pending() {
        let mut chat = ChatSession::new(ScriptedResponder::birthday_with_seed(4));
        let pending = chat.send("hi", 0.0).unwrap();
        assert_eq!(
            chat.send("again", 1.0),
            Err(ChatError::ReplyPending {
                ticket: pending.ticket.id()
            })
        );
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut chat = ChatSession::default();
        assert_eq!(chat.send("   ", 0.0), Err(ChatError::EmptyMessage));
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn test_cancelled_ticket_is_stale() {
        let mut chat = ChatSession::new(ScriptedResponder::birthday_with_seed(4));
        let pending = chat.send("party", 0.0).unwrap();
        assert_eq!(chat.cancel_pending(), Some(pending.ticket));
        assert!(matches!(
            chat.deliver(pending.ticket, 5.0),
            Err(ChatError::StaleTicket { .. })
        ));
        assert_eq!(chat.messages().len(), 1);

        let next = chat.send("party", 6.0).unwrap();
        assert_ne!(next.ticket, pending.ticket);
        assert!(chat.deliver(pending.ticket, 7.0).is_err());
        assert!(chat.is_typing());
        assert!(chat.deliver(next.ticket, 8.0).is_ok());
    }

    #[test]
    fn test_empty_fallbacks_rejected() {
        assert!(ScriptedResponder::new(KEYWORD_REPLIES, &[]).is_err());
    }
}
