//! State module for tracking traversal of a query's result pages
//!
//! # Components
//!
//! - `PaginationState`: where the controller is in the scan/advance cycle
//! - `DoneReason`: why a query's traversal ended

mod pagination_state;

// Re-export main types
pub use pagination_state::{DoneReason, PaginationState};
