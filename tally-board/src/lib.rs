//! Tally Board - terminal dashboard over the remote order store
//!
//! The controller ([`board::OrderBoard`]) owns all dashboard state; the
//! binary wraps it in a thin ratatui shell.

pub mod board;
pub mod notify;

pub use board::{DeleteGate, OrderBoard};
pub use notify::{Notice, NoticeLevel, NoticeQueue};
