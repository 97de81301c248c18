//! Hook library.
//!
//! A hook is a step with one narrow job: parse the body, read the auth user,
//! validate a payload or an id, canonicalize enum tags, upload an image,
//! reshape the response. Hooks are plain methods on shared hook groups and
//! can be called without a pipeline, which is how they are tested.
//!
//! - [`CommonBeforeHooks`] / [`CommonAfterHooks`] - resource-agnostic hooks
//! - [`ResourceHooks`] - common hooks bound to one resource's settings
//! - [`AccountHooks`] - ownership checks and identity claim updates

mod account;
mod common;
mod resource;

pub use account::AccountHooks;
pub use common::{
    normalize_image_field, resolve_tag, CommonAfterHooks, CommonBeforeHooks, DEFAULT_BUCKET_URL,
    IMAGE_FIELD_PARAMETER,
};
pub use resource::{EnumFields, ImageProfile, ResourceHooks};
