//! Boundary services used by route handlers.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the two trust boundaries of the panel — the sealed
//! session cookie and the backend REST API — so route handlers stay focused
//! on request plumbing and HTML assembly.

pub mod api;
pub mod session;
