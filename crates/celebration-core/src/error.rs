//! Error types for the celebration engine
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A reply is still pending (ticket {ticket})")]
    ReplyPending { ticket: u64 },

    #[error("Reply ticket {ticket} is no longer outstanding")]
    StaleTicket { ticket: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("The {what} pool is empty")]
    EmptyPool { what: &'static str },
}
