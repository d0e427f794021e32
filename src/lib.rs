//! `LyricFlow` - multi-source song lyrics resolution pipeline.
//!
//! Given a `(title, artist)` pair, queries heterogeneous lyric sources in a
//! fixed priority order - a direct lyrics API, a structured lyrics site, and
//! a generic web-search fallback - and produces a single cleaned block of
//! lyric text or a definitive not-found result. This crate is a library
//! called in-process; it exposes no server of its own.

pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod html;
pub mod providers;
pub mod resolver;
pub mod types;

pub use config::Config;
pub use resolver::LyricsResolver;
pub use types::{LyricsResult, ProviderKind, Query};
