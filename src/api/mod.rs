//! API Layer
//!
//! The serverless HTTP surface: thin pass-throughs from `/api/orders`
//! to the remote store's `orders` table. Remote errors are relayed with
//! their status and message; these handlers never fall back to the
//! local cache.

mod error;
mod orders;


pub use error::ApiError;
pub use orders::{router, ApiState};
