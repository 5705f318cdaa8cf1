// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini generateContent client for the brick.mov chat proxy.

pub mod client;
pub mod types;

pub use client::GeminiClient;
pub use types::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};
