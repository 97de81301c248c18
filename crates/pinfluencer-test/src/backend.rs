//! A full set of in-memory collaborators sharing one session.

use std::sync::Arc;

use pinfluencer_domain::{AudienceAgeSplit, AudienceGenderSplit, Brand, Influencer};

use crate::repositories::{
    InMemoryAudienceRepository, InMemoryAuthUserRepository, InMemoryCampaignRepository,
    InMemoryDataManager, InMemoryImageRepository, InMemoryNotificationRepository,
    InMemoryUserRepository,
};

/// Every collaborator of the backend, backed by memory.
///
/// Repositories commit the shared [`InMemoryDataManager`] on save, so a test
/// can check both the stored records and the unit-of-work calls.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    /// Brand accounts.
    pub brands: Arc<InMemoryUserRepository<Brand>>,
    /// Influencer accounts.
    pub influencers: Arc<InMemoryUserRepository<Influencer>>,
    /// Campaigns, scoped by [`Self::brands`].
    pub campaigns: Arc<InMemoryCampaignRepository>,
    /// Notifications.
    pub notifications: Arc<InMemoryNotificationRepository>,
    /// Audience age splits.
    pub audience_ages: Arc<InMemoryAudienceRepository<AudienceAgeSplit>>,
    /// Audience gender splits.
    pub audience_genders: Arc<InMemoryAudienceRepository<AudienceGenderSplit>>,
    /// Uploaded images.
    pub images: Arc<InMemoryImageRepository>,
    /// Identity provider profiles.
    pub auth_users: Arc<InMemoryAuthUserRepository>,
    /// The shared session.
    pub data_manager: Arc<InMemoryDataManager>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        let session = Arc::new(InMemoryDataManager::new());
        let brands = Arc::new(InMemoryUserRepository::new("brand").with_session(session.clone()));
        let campaigns = InMemoryCampaignRepository::new(brands.clone()).with_session(session.clone());

        Self {
            influencers: Arc::new(
                InMemoryUserRepository::new("influencer").with_session(session.clone()),
            ),
            campaigns: Arc::new(campaigns),
            notifications: Arc::new(InMemoryNotificationRepository::new().with_session(session.clone())),
            audience_ages: Arc::new(InMemoryAudienceRepository::new().with_session(session.clone())),
            audience_genders: Arc::new(InMemoryAudienceRepository::new().with_session(session.clone())),
            images: Arc::new(InMemoryImageRepository::new()),
            auth_users: Arc::new(InMemoryAuthUserRepository::new()),
            brands,
            data_manager: session,
        }
    }

    /// Total repository calls across every resource.
    #[must_use]
    pub fn repository_calls(&self) -> usize {
        self.brands.calls().total()
            + self.influencers.calls().total()
            + self.campaigns.calls().total()
            + self.notifications.calls().total()
            + self.audience_ages.calls().total()
            + self.audience_genders.calls().total()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}
