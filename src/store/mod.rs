//! Append-only persistence of submissions to Supabase.
//!
//! The synchronous [`SupabaseClient`] speaks the REST API; the async
//! [`SubmissionGateway`] trait is the seam the orchestrator depends on, with
//! [`SupabaseGateway`] as the production implementation.

pub mod client;
pub mod gateway;

pub use client::SupabaseClient;
pub use gateway::{SubmissionGateway, SupabaseGateway};
