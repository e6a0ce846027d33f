// SPDX-License-Identifier: GPL-3.0-only

//! Touchboard - the input core of an on-screen keyboard
//!
//! This crate decides what a virtual keyboard types. A UI host delivers one
//! raw key code per touch; the crate answers with a single action (commit
//! text, delete, send Enter or switch layout) and tracks language, layout
//! mode and shift state between presses.
//!
//! # Architecture
//!
//! The crate consists of two components:
//!
//! 1. **Layout Registry** (`layout`): Immutable lookup from a
//!    (language, mode) pair to the keys shown for it, loaded from JSON.
//!
//! 2. **Key Interpreter** (`interpreter`): The state machine that turns key
//!    codes into actions.
//!
//! The `host` module ties both to a text target.
//!
//! # Modules
//!
//! - `app_settings`: Centralized application constants
//! - `config`: Persisted preferences (default language, key preview)
//! - `host`: Text target trait and a reference keyboard session
//! - `input`: Key code resolution, code point decoding and shift state
//! - `interpreter`: Key interpreter and the actions it emits
//! - `layout`: Layout types, JSON parsing, validation and the registry
//! - `state`: Per-session interpreter state

pub mod app_settings;
pub mod config;
pub mod host;
pub mod input;
pub mod interpreter;
pub mod layout;
pub mod state;

// ============================================================================
// Integration Tests
// ============================================================================
