//! Formflow - form definitions and the builder session that edits them
//!
//! The [`form`] module holds the document model and every mutation on it,
//! [`state`] the interactive builder session, and [`config`] user settings.

pub mod config;
pub mod form;
pub mod state;
