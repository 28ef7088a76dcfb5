//! Insert historical "on this day" events into a text document.
//!
//! The library exposes the pieces a host wires together: a [`sources::FeedClient`] that fetches
//! one day's events, the [`render`] functions that turn them into text, [`settings`] persistence,
//! and the [`insert`] operation working against any [`editor::Editor`].

pub mod editor;
pub mod insert;
pub mod render;
pub mod settings;
pub mod sources;
pub mod state;
