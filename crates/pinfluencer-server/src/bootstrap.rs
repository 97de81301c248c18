//! Registration of shared instances.
//!
//! Everything a sequence references is created here exactly once and stored
//! in a [`Container`]. Sequence builders resolve from it, so two routes that
//! name the same hook share one instance.

use std::sync::Arc;

use pinfluencer_core::{
    BodyDeserializer, BodySerializer, Container, JsonCamelToSnakeDeserializer,
    JsonSnakeToCamelSerializer, ObjectMapper,
};
use pinfluencer_domain::{
    rules, AudienceAgeRepository, AudienceGenderRepository, AuthUserRepository, BrandRepository,
    CampaignRepository, DataManager, ImageRepository, InfluencerRepository, NotificationRepository,
};
use pinfluencer_middleware::hooks::{AccountHooks, CommonAfterHooks, CommonBeforeHooks, ResourceHooks};
use pinfluencer_middleware::MiddlewarePipeline;
use tracing::debug;

use crate::controllers::{
    AudienceAgeController, AudienceGenderController, BrandController, CampaignController,
    InfluencerController, NotificationController,
};

/// The external collaborators of one deployment.
#[derive(Clone)]
pub struct Collaborators {
    /// Brand storage.
    pub brands: Arc<BrandRepository>,
    /// Influencer storage.
    pub influencers: Arc<InfluencerRepository>,
    /// Campaign storage.
    pub campaigns: Arc<dyn CampaignRepository>,
    /// Notification storage.
    pub notifications: Arc<dyn NotificationRepository>,
    /// Audience age storage.
    pub audience_ages: Arc<AudienceAgeRepository>,
    /// Audience gender storage.
    pub audience_genders: Arc<AudienceGenderRepository>,
    /// Object storage for images.
    pub images: Arc<dyn ImageRepository>,
    /// Identity provider.
    pub auth_users: Arc<dyn AuthUserRepository>,
    /// Persistence session of the current process.
    pub data_manager: Arc<dyn DataManager>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// The per-resource hook groups.
#[derive(Debug, Clone)]
pub struct ResourceHookGroups {
    /// Brand hooks.
    pub brand: Arc<ResourceHooks>,
    /// Influencer hooks.
    pub influencer: Arc<ResourceHooks>,
    /// Campaign hooks.
    pub campaign: Arc<ResourceHooks>,
}

/// Builds the registry for a set of collaborators.
///
/// `bucket_url` is the public URL prefixed to stored image keys.
pub fn bootstrap(collaborators: &Collaborators, bucket_url: &str) -> Container {
    let mut container = Container::new();

    container.register::<BrandRepository>(collaborators.brands.clone());
    container.register::<InfluencerRepository>(collaborators.influencers.clone());
    container.register::<dyn CampaignRepository>(collaborators.campaigns.clone());
    container.register::<dyn NotificationRepository>(collaborators.notifications.clone());
    container.register::<AudienceAgeRepository>(collaborators.audience_ages.clone());
    container.register::<AudienceGenderRepository>(collaborators.audience_genders.clone());
    container.register::<dyn ImageRepository>(collaborators.images.clone());
    container.register::<dyn AuthUserRepository>(collaborators.auth_users.clone());
    container.register::<dyn DataManager>(collaborators.data_manager.clone());

    let deserializer: Arc<dyn BodyDeserializer> = Arc::new(JsonCamelToSnakeDeserializer);
    let serializer: Arc<dyn BodySerializer> = Arc::new(JsonSnakeToCamelSerializer);
    container.register(deserializer.clone());
    container.register(serializer);

    let mapper = Arc::new(ObjectMapper::new(rules::mapping_rules()));
    container.register(mapper.clone());
    container.register(Arc::new(MiddlewarePipeline::new()));

    let before = Arc::new(CommonBeforeHooks::new(deserializer, collaborators.images.clone()));
    let after = Arc::new(CommonAfterHooks::new(bucket_url, collaborators.auth_users.clone()));
    container.register(Arc::new(ResourceHookGroups {
        brand: Arc::new(ResourceHooks::brand(before.clone(), after.clone())),
        influencer: Arc::new(ResourceHooks::influencer(before.clone(), after.clone())),
        campaign: Arc::new(ResourceHooks::campaign(before.clone(), after.clone())),
    }));
    container.register(before);
    container.register(after);
    container.register(Arc::new(AccountHooks::new(
        collaborators.brands.clone(),
        collaborators.influencers.clone(),
        collaborators.auth_users.clone(),
    )));

    container.register(Arc::new(BrandController::new(collaborators.brands.clone(), mapper.clone())));
    container.register(Arc::new(InfluencerController::new(
        collaborators.influencers.clone(),
        mapper.clone(),
    )));
    container.register(Arc::new(CampaignController::new(
        collaborators.campaigns.clone(),
        mapper.clone(),
    )));
    container.register(Arc::new(NotificationController::new(
        collaborators.notifications.clone(),
        mapper.clone(),
    )));
    container.register(Arc::new(AudienceAgeController::new(
        collaborators.audience_ages.clone(),
        mapper.clone(),
    )));
    container.register(Arc::new(AudienceGenderController::new(
        collaborators.audience_genders.clone(),
        mapper,
    )));

    debug!(entries = container.len(), "registry built");
    container
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pinfluencer_middleware::hooks::DEFAULT_BUCKET_URL;
    use pinfluencer_test::InMemoryBackend;

    pub(crate) fn collaborators(backend: &InMemoryBackend) -> Collaborators {
        Collaborators {
            brands: backend.brands.clone(),
            influencers: backend.influencers.clone(),
            campaigns: backend.campaigns.clone(),
            notifications: backend.notifications.clone(),
            audience_ages: backend.audience_ages.clone(),
            audience_genders: backend.audience_genders.clone(),
            images: backend.images.clone(),
            auth_users: backend.auth_users.clone(),
            data_manager: backend.data_manager.clone(),
        }
    }

    #[test]
    fn test_everything_registered_once() {
        let container = bootstrap(&collaborators(&InMemoryBackend::new()), DEFAULT_BUCKET_URL);

        assert!(container.contains::<BrandRepository>());
        assert!(container.contains::<dyn DataManager>());
        assert!(container.contains::<ObjectMapper>());
        assert!(container.contains::<ResourceHookGroups>());
        assert!(container.contains::<AudienceGenderController>());

        let first = container.resolve::<CommonBeforeHooks>().unwrap();
        let second = container.resolve::<CommonBeforeHooks>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_hook_groups_share_common_hooks() {
        let container = bootstrap(&collaborators(&InMemoryBackend::new()), "https://cdn.example.com/");
        let after = container.resolve::<CommonAfterHooks>().unwrap();
        assert_eq!(after.bucket_url(), "https://cdn.example.com");
    }
}
