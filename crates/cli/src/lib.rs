//! Interactive front end for the video store.
//!
//! The binary parses credentials with `clap`, then reads one command per
//! line from stdin. [`command`] turns a line into a [`command::Command`];
//! [`render`] turns store results into text or JSON.

pub mod command;
pub mod render;
