// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rate-limited chat proxy for the brick.mov site.

pub mod proxy;
pub mod quota;

pub use proxy::{ChatProxy, ChatReply};
pub use quota::QuotaLedger;

/// Name of the anonymous visitor session cookie.
pub const CHAT_COOKIE: &str = "brick_chat";
