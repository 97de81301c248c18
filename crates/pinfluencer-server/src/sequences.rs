//! Sequence builders, one per route behaviour.
//!
//! Shared subsequences (`pre_update_create`, the post-controller formatting)
//! are built once per route and nested; the dispatcher flattens every
//! sequence when the route table is loaded.

use std::sync::Arc;

use http::StatusCode;
use pinfluencer_core::{
    Container, InjectionError, PayloadValidator, PinfluencerContext, NOT_IMPLEMENTED_MESSAGE,
};
use pinfluencer_domain::validators;
use pinfluencer_middleware::hooks::{AccountHooks, CommonBeforeHooks, ResourceHooks};
use pinfluencer_middleware::{step, Sequence, Step};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::bootstrap::ResourceHookGroups;
use crate::controllers::{
    AudienceAgeController, AudienceGenderController, BrandController, CampaignController,
    InfluencerController, NotificationController,
};

/// Every route behaviour, named as in `routes.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SequenceKind {
    NotImplemented,

    GetAllBrands,
    GetBrandById,
    GetAuthBrand,
    CreateBrand,
    UpdateBrand,
    UpdateBrandImage,

    GetAllInfluencers,
    GetInfluencerById,
    GetAuthInfluencer,
    CreateInfluencer,
    UpdateInfluencer,
    UpdateInfluencerImage,

    CreateCampaign,
    GetCampaignById,
    GetCampaignsForBrand,
    UpdateCampaign,
    UpdateCampaignImage,

    CreateNotification,
    GetNotificationById,

    CreateAudienceAge,
    GetAudienceAge,
    UpdateAudienceAge,
    CreateAudienceGender,
    GetAudienceGender,
    UpdateAudienceGender,
}

/// The shared instances sequences are built from.
#[derive(Debug, Clone)]
pub struct SequenceParts {
    before: Arc<CommonBeforeHooks>,
    account: Arc<AccountHooks>,
    resources: Arc<ResourceHookGroups>,
    brands: Arc<BrandController>,
    influencers: Arc<InfluencerController>,
    campaigns: Arc<CampaignController>,
    notifications: Arc<NotificationController>,
    audience_ages: Arc<AudienceAgeController>,
    audience_genders: Arc<AudienceGenderController>,
}

impl SequenceParts {
    /// Resolves every part from the registry.
    pub fn resolve(container: &Container) -> Result<Self, InjectionError> {
        Ok(Self {
            before: container.resolve_required()?,
            account: container.resolve_required()?,
            resources: container.resolve_required()?,
            brands: container.resolve_required()?,
            influencers: container.resolve_required()?,
            campaigns: container.resolve_required()?,
            notifications: container.resolve_required()?,
            audience_ages: container.resolve_required()?,
            audience_genders: container.resolve_required()?,
        })
    }

    /// `set_body` then `set_auth_user_id`, shared by every mutating route.
    pub fn pre_update_create(&self) -> Sequence {
        Sequence::new("pre_update_create")
            .step(step!(self.before, CommonBeforeHooks::set_body))
            .step(step!(self.before, CommonBeforeHooks::set_auth_user_id))
    }

    fn post_user(hooks: Arc<ResourceHooks>) -> Sequence {
        Sequence::new("post_user")
            .step(step!(hooks, ResourceHooks::format_enums))
            .step(step!(hooks, ResourceHooks::tag_claims))
            .step(step!(hooks, ResourceHooks::tag_image_urls))
    }

    fn post_user_collection(hooks: Arc<ResourceHooks>) -> Sequence {
        Sequence::new("post_user_collection")
            .step(step!(hooks, ResourceHooks::format_enums_collection))
            .step(step!(hooks, ResourceHooks::tag_claims_collection))
            .step(step!(hooks, ResourceHooks::tag_image_urls_collection))
    }

    fn post_campaign(&self) -> Sequence {
        let hooks = Arc::clone(&self.resources.campaign);
        Sequence::new("post_campaign")
            .step(step!(hooks, ResourceHooks::format_enums))
            .step(step!(hooks, ResourceHooks::tag_image_urls))
    }

    fn post_campaign_collection(&self) -> Sequence {
        let hooks = Arc::clone(&self.resources.campaign);
        Sequence::new("post_campaign_collection")
            .step(step!(hooks, ResourceHooks::format_enums_collection))
            .step(step!(hooks, ResourceHooks::tag_image_urls_collection))
    }

    fn upload(hooks: Arc<ResourceHooks>) -> Sequence {
        Sequence::new("upload_image")
            .step(step!(hooks, ResourceHooks::validate_image_field))
            .step(step!(hooks, ResourceHooks::upload_image))
    }

    fn validate_payload(&self, name: &'static str, validator: PayloadValidator) -> Step {
        let before = Arc::clone(&self.before);
        Step::new(name, move |ctx: &mut PinfluencerContext| {
            before.validate_payload(ctx, &validator);
        })
    }
}

fn not_implemented(ctx: &mut PinfluencerContext) {
    ctx.respond(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "message": NOT_IMPLEMENTED_MESSAGE }),
    );
}

impl SequenceKind {
    /// Builds the sequence of this behaviour.
    pub fn build(self, parts: &SequenceParts) -> Sequence {
        let brand = Arc::clone(&parts.resources.brand);
        let influencer = Arc::clone(&parts.resources.influencer);
        let campaign = Arc::clone(&parts.resources.campaign);
        let name = self.name();

        match self {
            Self::NotImplemented => Sequence::new(name).step(Step::new("not_implemented", not_implemented)),

            Self::GetAllBrands => Sequence::new(name)
                .step(step!(parts.brands, BrandController::get_all))
                .then(SequenceParts::post_user_collection(brand.clone())),
            Self::GetBrandById => Sequence::new(name)
                .step(step!(brand, ResourceHooks::validate_id))
                .step(step!(parts.brands, BrandController::get_by_id))
                .then(SequenceParts::post_user(brand.clone())),
            Self::GetAuthBrand => Sequence::new(name)
                .step(step!(parts.before, CommonBeforeHooks::set_auth_user_id))
                .step(step!(parts.brands, BrandController::get_for_auth_user))
                .then(SequenceParts::post_user(brand.clone())),
            Self::CreateBrand => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(brand, ResourceHooks::map_enums))
                .step(step!(brand, ResourceHooks::validate_create))
                .step(step!(parts.brands, BrandController::create))
                .step(step!(parts.account, AccountHooks::set_brand_claims))
                .then(SequenceParts::post_user(brand.clone())),
            Self::UpdateBrand => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(brand, ResourceHooks::map_enums))
                .step(step!(brand, ResourceHooks::validate_update))
                .step(step!(parts.brands, BrandController::update))
                .step(step!(parts.account, AccountHooks::set_brand_claims))
                .then(SequenceParts::post_user(brand.clone())),
            Self::UpdateBrandImage => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(parts.account, AccountHooks::validate_auth_brand))
                .then(SequenceParts::upload(brand.clone()))
                .step(step!(parts.brands, BrandController::update_image_field))
                .then(SequenceParts::post_user(brand.clone())),

            Self::GetAllInfluencers => Sequence::new(name)
                .step(step!(parts.influencers, InfluencerController::get_all))
                .then(SequenceParts::post_user_collection(influencer.clone())),
            Self::GetInfluencerById => Sequence::new(name)
                .step(step!(influencer, ResourceHooks::validate_id))
                .step(step!(parts.influencers, InfluencerController::get_by_id))
                .then(SequenceParts::post_user(influencer.clone())),
            Self::GetAuthInfluencer => Sequence::new(name)
                .step(step!(parts.before, CommonBeforeHooks::set_auth_user_id))
                .step(step!(parts.influencers, InfluencerController::get_for_auth_user))
                .then(SequenceParts::post_user(influencer.clone())),
            Self::CreateInfluencer => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(influencer, ResourceHooks::map_enums))
                .step(step!(influencer, ResourceHooks::validate_create))
                .step(step!(parts.influencers, InfluencerController::create))
                .step(step!(parts.account, AccountHooks::set_influencer_claims))
                .then(SequenceParts::post_user(influencer.clone())),
            Self::UpdateInfluencer => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(influencer, ResourceHooks::map_enums))
                .step(step!(influencer, ResourceHooks::validate_update))
                .step(step!(parts.influencers, InfluencerController::update))
                .step(step!(parts.account, AccountHooks::set_influencer_claims))
                .then(SequenceParts::post_user(influencer.clone())),
            Self::UpdateInfluencerImage => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .then(SequenceParts::upload(influencer.clone()))
                .step(step!(parts.influencers, InfluencerController::update_image_field))
                .then(SequenceParts::post_user(influencer.clone())),

            Self::CreateCampaign => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(campaign, ResourceHooks::map_enums))
                .step(step!(campaign, ResourceHooks::validate_create))
                .step(step!(parts.account, AccountHooks::validate_auth_brand))
                .step(step!(parts.campaigns, CampaignController::create_for_brand))
                .then(parts.post_campaign()),
            Self::GetCampaignById => Sequence::new(name)
                .step(step!(campaign, ResourceHooks::validate_id))
                .step(step!(parts.campaigns, CampaignController::get_by_id))
                .then(parts.post_campaign()),
            Self::GetCampaignsForBrand => Sequence::new(name)
                .step(step!(parts.before, CommonBeforeHooks::set_auth_user_id))
                .step(step!(parts.campaigns, CampaignController::get_for_brand))
                .then(parts.post_campaign_collection()),
            Self::UpdateCampaign => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(campaign, ResourceHooks::validate_id))
                .step(step!(campaign, ResourceHooks::map_enums))
                .step(step!(campaign, ResourceHooks::validate_update))
                .step(step!(parts.account, AccountHooks::validate_auth_brand))
                .step(step!(parts.campaigns, CampaignController::update_campaign))
                .then(parts.post_campaign()),
            Self::UpdateCampaignImage => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(campaign, ResourceHooks::validate_id))
                .step(step!(parts.account, AccountHooks::validate_auth_brand))
                .then(SequenceParts::upload(campaign.clone()))
                .step(step!(parts.campaigns, CampaignController::update_campaign_image))
                .then(parts.post_campaign()),

            Self::CreateNotification => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(parts.validate_payload(
                    "validate_notification",
                    validators::notification_create_validator(),
                ))
                .step(step!(parts.notifications, NotificationController::create)),
            Self::GetNotificationById => Sequence::new(name)
                .step(step!(parts.before, CommonBeforeHooks::validate_id, "notification_id"))
                .step(step!(parts.notifications, NotificationController::get_by_id)),

            Self::CreateAudienceAge => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .step(parts.validate_payload("validate_audience_age", validators::audience_age_validator()))
                .step(step!(parts.audience_ages, AudienceAgeController::create_for_influencer)),
            Self::GetAudienceAge => Sequence::new(name)
                .step(step!(parts.before, CommonBeforeHooks::set_auth_user_id))
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .step(step!(parts.audience_ages, AudienceAgeController::get_for_influencer)),
            Self::UpdateAudienceAge => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .step(parts.validate_payload("validate_audience_age", validators::audience_age_validator()))
                .step(step!(parts.audience_ages, AudienceAgeController::update_for_influencer)),
            Self::CreateAudienceGender => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .step(parts.validate_payload(
                    "validate_audience_gender",
                    validators::audience_gender_validator(),
                ))
                .step(step!(parts.audience_genders, AudienceGenderController::create_for_influencer)),
            Self::GetAudienceGender => Sequence::new(name)
                .step(step!(parts.before, CommonBeforeHooks::set_auth_user_id))
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .step(step!(parts.audience_genders, AudienceGenderController::get_for_influencer)),
            Self::UpdateAudienceGender => Sequence::new(name)
                .then(parts.pre_update_create())
                .step(step!(parts.account, AccountHooks::validate_auth_influencer))
                .step(parts.validate_payload(
                    "validate_audience_gender",
                    validators::audience_gender_validator(),
                ))
                .step(step!(parts.audience_genders, AudienceGenderController::update_for_influencer)),
        }
    }

    /// Returns the snake_case name used in `routes.toml`.
    pub fn name(self) -> &'static str {
        match self {
            Self::NotImplemented => "not_implemented",
            Self::GetAllBrands => "get_all_brands",
            Self::GetBrandById => "get_brand_by_id",
            Self::GetAuthBrand => "get_auth_brand",
            Self::CreateBrand => "create_brand",
            Self::UpdateBrand => "update_brand",
            Self::UpdateBrandImage => "update_brand_image",
            Self::GetAllInfluencers => "get_all_influencers",
            Self::GetInfluencerById => "get_influencer_by_id",
            Self::GetAuthInfluencer => "get_auth_influencer",
            Self::CreateInfluencer => "create_influencer",
            Self::UpdateInfluencer => "update_influencer",
            Self::UpdateInfluencerImage => "update_influencer_image",
            Self::CreateCampaign => "create_campaign",
            Self::GetCampaignById => "get_campaign_by_id",
            Self::GetCampaignsForBrand => "get_campaigns_for_brand",
            Self::UpdateCampaign => "update_campaign",
            Self::UpdateCampaignImage => "update_campaign_image",
            Self::CreateNotification => "create_notification",
            Self::GetNotificationById => "get_notification_by_id",
            Self::CreateAudienceAge => "create_audience_age",
            Self::GetAudienceAge => "get_audience_age",
            Self::UpdateAudienceAge => "update_audience_age",
            Self::CreateAudienceGender => "create_audience_gender",
            Self::GetAudienceGender => "get_audience_gender",
            Self::UpdateAudienceGender => "update_audience_gender",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{bootstrap, tests::collaborators};
    use pinfluencer_middleware::hooks::DEFAULT_BUCKET_URL;
    use pinfluencer_test::InMemoryBackend;

    fn parts() -> SequenceParts {
        let container = bootstrap(&collaborators(&InMemoryBackend::new()), DEFAULT_BUCKET_URL);
        SequenceParts::resolve(&container).unwrap()
    }

    fn names(sequence: &Sequence) -> Vec<&'static str> {
        sequence.flatten().iter().map(Step::name).collect()
    }

    #[test]
    fn test_resolve_fails_on_empty_registry() {
        assert!(SequenceParts::resolve(&Container::new()).is_err());
    }

    #[test]
    fn test_pre_update_create() {
        assert_eq!(
            names(&parts().pre_update_create()),
            vec!["CommonBeforeHooks::set_body", "CommonBeforeHooks::set_auth_user_id"]
        );
    }

    #[test]
    fn test_create_campaign_order() {
        assert_eq!(
            names(&SequenceKind::CreateCampaign.build(&parts())),
            vec![
                "CommonBeforeHooks::set_body",
                "CommonBeforeHooks::set_auth_user_id",
                "ResourceHooks::map_enums",
                "ResourceHooks::validate_create",
                "AccountHooks::validate_auth_brand",
                "CampaignController::create_for_brand",
                "ResourceHooks::format_enums",
                "ResourceHooks::tag_image_urls",
            ]
        );
    }

    #[test]
    fn test_claims_written_only_after_controller() {
        let cases = [
            (SequenceKind::CreateBrand, "BrandController::create", "AccountHooks::set_brand_claims"),
            (SequenceKind::UpdateBrand, "BrandController::update", "AccountHooks::set_brand_claims"),
            (SequenceKind::CreateInfluencer, "InfluencerController::create", "AccountHooks::set_influencer_claims"),
            (SequenceKind::UpdateInfluencer, "InfluencerController::update", "AccountHooks::set_influencer_claims"),
        ];
        for (kind, controller, claims) in cases {
            let steps = names(&kind.build(&parts()));
            let at = |name: &str| steps.iter().position(|step| *step == name).unwrap();
            assert_eq!(at(claims), at(controller) + 1, "{}", kind.name());
        }
    }

    #[test]
    fn test_update_campaign_image_order() {
        assert_eq!(
            names(&SequenceKind::UpdateCampaignImage.build(&parts())),
            vec![
                "CommonBeforeHooks::set_body",
                "CommonBeforeHooks::set_auth_user_id",
                "ResourceHooks::validate_id",
                "AccountHooks::validate_auth_brand",
                "ResourceHooks::validate_image_field",
                "ResourceHooks::upload_image",
                "CampaignController::update_campaign_image",
                "ResourceHooks::format_enums",
                "ResourceHooks::tag_image_urls",
            ]
        );
    }

    #[test]
    fn test_get_all_brands_formats_collection() {
        assert_eq!(
            names(&SequenceKind::GetAllBrands.build(&parts())),
            vec![
                "BrandController::get_all",
                "ResourceHooks::format_enums_collection",
                "ResourceHooks::tag_claims_collection",
                "ResourceHooks::tag_image_urls_collection",
            ]
        );
    }

    #[test]
    fn test_get_by_id_validates_first() {
        let steps = SequenceKind::GetNotificationById.build(&parts()).flatten();
        assert_eq!(steps[0].name(), "CommonBeforeHooks::validate_id");
    }

    #[test]
    fn test_names_round_trip_through_serde() {
        for kind in [SequenceKind::NotImplemented, SequenceKind::UpdateAudienceGender, SequenceKind::GetCampaignsForBrand] {
            let encoded = serde_json::to_value(kind).unwrap();
            assert_eq!(encoded, kind.name());
        }
    }
}
