//! Client for the text-generation upstream.
//!
//! The upstream service is a black box: a prompt string goes in, text
//! (sometimes JSON, sometimes JSON wrapped in a Markdown code fence)
//! comes out. This crate provides the plumbing the workbench needs
//! around it: the [`Generator`] trait, an HTTP implementation, and
//! [`complete_json`] which re-requests under a retry policy when the
//! returned payload does not parse.
//!
//! Prompt construction is the caller's business; nothing here knows
//! what a strategy brief or a schedule looks like.

mod error;
mod generation;
mod mock;

pub use error::UpstreamError;
pub use generation::{Generator, HttpGenerator, complete_json, strip_code_fence};
pub use mock::MockGenerator;
