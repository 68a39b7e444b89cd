//! Pure domain vocabulary shared by both sides of the embed.

pub mod route;
