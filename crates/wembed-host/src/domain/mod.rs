//! Construction-time configuration for the host-page embed.

pub mod config;
