//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{MockPredictionService, MockReply, LIST_PAYLOAD};
//!
//! #[tokio::test]
//! async fn test_predict() {
//!     let service = MockPredictionService::spawn(MockReply::json(LIST_PAYLOAD)).await;
//!     let endpoint = service.endpoint();
//!     // ... point a predictor at `endpoint`
//! }
//! ```

mod constants;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use server::{unreachable_endpoint, MockPredictionService, MockReply};
