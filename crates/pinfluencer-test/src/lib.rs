//! # Pinfluencer Test
//!
//! Test utilities for the Pinfluencer backend: in-memory implementations of
//! every collaborator trait, a builder for gateway events and assertion
//! helpers for dispatched responses. No database, object store or identity
//! provider is needed.
//!
//! ## Example
//!
//! ```
//! use pinfluencer_domain::{Brand, UserRepository};
//! use pinfluencer_test::{EventBuilder, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend
//!     .brands
//!     .write_new_for_auth_user("user-1", Brand::default())
//!     .unwrap();
//!
//! let event = EventBuilder::new("GET /brands/me").username("user-1").build();
//!
//! assert_eq!(event.username(), Some("user-1"));
//! assert_eq!(backend.brands.records().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod error;
mod repositories;
mod request;
mod response;

pub use backend::InMemoryBackend;
pub use error::TestError;
pub use repositories::{
    CallLog, InMemoryAudienceRepository, InMemoryAuthUserRepository, InMemoryCampaignRepository,
    InMemoryDataManager, InMemoryImageRepository, InMemoryNotificationRepository,
    InMemoryUserRepository,
};
pub use request::EventBuilder;
pub use response::TestResponse;
