//! Domain services used by the page and JSON routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own store queries and record projection so route
//! handlers can stay focused on rendering and status mapping.

pub mod claim;
pub mod selection;
pub mod tables;
