// ============================================================================
// Request Gateway
// ============================================================================
//
// Single entry point for all outbound calls to the booking backend. Route
// handlers and the protection middleware never touch reqwest directly; they
// go through BackendClient so the header contract, timeout policy and the
// transport-failure shape stay identical across every resource.
//
// ============================================================================

pub mod client;
pub mod response;

pub use client::BackendClient;
pub use response::{BackendResponse, Envelope};
