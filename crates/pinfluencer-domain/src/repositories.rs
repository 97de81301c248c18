//! Collaborator contracts.
//!
//! Persistence, object storage and the identity provider live outside this
//! workspace; the request pipeline only sees these traits. Implementations
//! are synchronous and signal expected outcomes through
//! [`PinfluencerError::NotFound`](pinfluencer_core::PinfluencerError) and
//! [`PinfluencerError::AlreadyExists`](pinfluencer_core::PinfluencerError).
//! Any other error is treated as unexpected.

use pinfluencer_core::PinfluencerResult;

use crate::models::{
    AudienceAgeSplit, AudienceGenderSplit, Brand, Campaign, Influencer, Notification, User,
};

/// Storage of an account resource owned by exactly one auth user.
pub trait UserRepository<M>: Send + Sync {
    /// Loads every record.
    fn load_collection(&self) -> PinfluencerResult<Vec<M>>;

    /// Loads a record by id.
    fn load_by_id(&self, id: &str) -> PinfluencerResult<M>;

    /// Loads the record owned by an auth user.
    fn load_for_auth_user(&self, auth_user_id: &str) -> PinfluencerResult<M>;

    /// Stores a new record for an auth user, assigning its id and timestamp.
    ///
    /// Fails with `AlreadyExists` when the auth user already owns one.
    fn write_new_for_auth_user(&self, auth_user_id: &str, payload: M) -> PinfluencerResult<M>;

    /// Replaces the record owned by an auth user.
    fn update_for_auth_user(&self, auth_user_id: &str, payload: M) -> PinfluencerResult<M>;

    /// Flushes pending writes of the current request.
    fn save(&self) -> PinfluencerResult<()>;
}

/// Brand storage.
pub type BrandRepository = dyn UserRepository<Brand>;

/// Influencer storage.
pub type InfluencerRepository = dyn UserRepository<Influencer>;

/// Campaign storage, scoped by the brand of the auth user.
pub trait CampaignRepository: Send + Sync {
    /// Loads every campaign.
    fn load_collection(&self) -> PinfluencerResult<Vec<Campaign>>;

    /// Loads a campaign by id.
    fn load_by_id(&self, id: &str) -> PinfluencerResult<Campaign>;

    /// Loads the campaigns of the auth user's brand.
    fn load_for_auth_brand(&self, auth_user_id: &str) -> PinfluencerResult<Vec<Campaign>>;

    /// Stores a new campaign under the auth user's brand.
    ///
    /// Fails with `NotFound` when the auth user owns no brand.
    fn write_new_for_brand(&self, auth_user_id: &str, payload: Campaign) -> PinfluencerResult<Campaign>;

    /// Replaces a campaign of the auth user's brand.
    ///
    /// Fails with `NotFound` when the campaign belongs to another brand.
    fn update_for_brand(&self, auth_user_id: &str, payload: Campaign) -> PinfluencerResult<Campaign>;

    /// Flushes pending writes of the current request.
    fn save(&self) -> PinfluencerResult<()>;
}

/// Notification storage.
pub trait NotificationRepository: Send + Sync {
    /// Loads every notification.
    fn load_collection(&self) -> PinfluencerResult<Vec<Notification>>;

    /// Loads a notification by id.
    fn load_by_id(&self, id: &str) -> PinfluencerResult<Notification>;

    /// Stores a new notification sent by an auth user.
    fn write_new_for_auth_user(
        &self,
        auth_user_id: &str,
        payload: Notification,
    ) -> PinfluencerResult<Notification>;

    /// Flushes pending writes of the current request.
    fn save(&self) -> PinfluencerResult<()>;
}

/// Storage of an influencer's audience demographics.
pub trait AudienceRepository<S>: Send + Sync {
    /// Stores the splits of the auth user's influencer.
    ///
    /// Fails with `AlreadyExists` when splits are already stored.
    fn write_new_for_influencer(&self, auth_user_id: &str, payload: S) -> PinfluencerResult<S>;

    /// Loads the splits of the auth user's influencer; empty when none are stored.
    fn load_for_influencer(&self, auth_user_id: &str) -> PinfluencerResult<S>;

    /// Replaces the splits of the auth user's influencer.
    fn update_for_influencer(&self, auth_user_id: &str, payload: S) -> PinfluencerResult<S>;

    /// Flushes pending writes of the current request.
    fn save(&self) -> PinfluencerResult<()>;
}

/// Audience age storage.
pub type AudienceAgeRepository = dyn AudienceRepository<AudienceAgeSplit>;

/// Audience gender storage.
pub type AudienceGenderRepository = dyn AudienceRepository<AudienceGenderSplit>;

/// Object storage for uploaded images.
pub trait ImageRepository: Send + Sync {
    /// Stores `image` under `path` and returns the storage key.
    fn upload(&self, path: &str, image: &[u8]) -> PinfluencerResult<String>;

    /// Removes the object stored under `path`.
    fn delete(&self, path: &str) -> PinfluencerResult<()>;
}

/// Identity provider profile attributes.
pub trait AuthUserRepository: Send + Sync {
    /// Loads the profile of an auth user.
    fn get_by_id(&self, auth_user_id: &str) -> PinfluencerResult<User>;

    /// Writes profile attributes and marks the user as a brand.
    fn update_brand_claims(&self, user: &User) -> PinfluencerResult<()>;

    /// Writes profile attributes and marks the user as an influencer.
    fn update_influencer_claims(&self, user: &User) -> PinfluencerResult<()>;
}

/// Per-request persistence session.
pub trait DataManager: Send + Sync {
    /// Commits pending writes.
    fn commit(&self) -> PinfluencerResult<()>;

    /// Discards pending writes.
    fn rollback(&self) -> PinfluencerResult<()>;

    /// Releases the session. Called once at the end of every request.
    fn cleanup(&self);
}
