//! Per-resource hook groups.
//!
//! Brands, influencers and campaigns run the same hooks with different
//! field names, validators and image settings. A [`ResourceHooks`] binds the
//! common hooks to one resource so that every method takes only the context
//! and can be declared directly as a sequence step.

use std::sync::Arc;

use pinfluencer_core::{PayloadValidator, PinfluencerContext, PinfluencerResult};
use pinfluencer_domain::validators;
use pinfluencer_domain::{CampaignStateEnum, CategoryEnum, ValueEnum};

use super::common::{CommonAfterHooks, CommonBeforeHooks};

/// Image settings of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageProfile {
    /// Object storage prefix; uploads go to `<prefix>/<auth_user_id>`.
    pub upload_prefix: &'static str,
    /// Fields an upload route may target.
    pub image_fields: &'static [&'static str],
    /// Response fields holding storage keys.
    pub url_fields: &'static [&'static str],
}

impl ImageProfile {
    /// Brand logo and header image.
    pub const BRAND: Self = Self {
        upload_prefix: "brands",
        image_fields: &["logo", "header_image"],
        url_fields: &["header_image", "logo"],
    };

    /// Influencer profile image.
    pub const INFLUENCER: Self = Self {
        upload_prefix: "influencers",
        image_fields: &["image"],
        url_fields: &["image"],
    };

    /// Campaign product images.
    pub const CAMPAIGN: Self = Self {
        upload_prefix: "campaigns",
        image_fields: &["product_image1", "product_image2", "product_image3"],
        url_fields: &["product_image1", "product_image2", "product_image3"],
    };
}

/// Names of the enum-valued fields of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumFields {
    /// List of [`ValueEnum`] tags.
    pub values: &'static str,
    /// List of [`CategoryEnum`] tags.
    pub categories: &'static str,
    /// Single [`CampaignStateEnum`] tag, if the resource has one.
    pub state: Option<&'static str>,
}

impl EnumFields {
    /// Brand and influencer fields.
    pub const USER: Self = Self {
        values: "values",
        categories: "categories",
        state: None,
    };

    /// Campaign fields.
    pub const CAMPAIGN: Self = Self {
        values: "campaign_values",
        categories: "campaign_categories",
        state: Some("campaign_state"),
    };
}

/// The hooks of one resource.
#[derive(Debug)]
pub struct ResourceHooks {
    id_parameter: &'static str,
    images: ImageProfile,
    enums: EnumFields,
    create_validator: PayloadValidator,
    update_validator: PayloadValidator,
    before: Arc<CommonBeforeHooks>,
    after: Arc<CommonAfterHooks>,
}

impl ResourceHooks {
    /// Creates a hook group from its settings.
    pub fn new(
        id_parameter: &'static str,
        images: ImageProfile,
        enums: EnumFields,
        create_validator: PayloadValidator,
        update_validator: PayloadValidator,
        before: Arc<CommonBeforeHooks>,
        after: Arc<CommonAfterHooks>,
    ) -> Self {
        Self {
            id_parameter,
            images,
            enums,
            create_validator,
            update_validator,
            before,
            after,
        }
    }

    /// Brand hooks.
    pub fn brand(before: Arc<CommonBeforeHooks>, after: Arc<CommonAfterHooks>) -> Self {
        Self::new(
            "brand_id",
            ImageProfile::BRAND,
            EnumFields::USER,
            validators::brand_create_validator(),
            validators::brand_update_validator(),
            before,
            after,
        )
    }

    /// Influencer hooks.
    pub fn influencer(before: Arc<CommonBeforeHooks>, after: Arc<CommonAfterHooks>) -> Self {
        Self::new(
            "influencer_id",
            ImageProfile::INFLUENCER,
            EnumFields::USER,
            validators::influencer_create_validator(),
            validators::influencer_update_validator(),
            before,
            after,
        )
    }

    /// Campaign hooks.
    pub fn campaign(before: Arc<CommonBeforeHooks>, after: Arc<CommonAfterHooks>) -> Self {
        Self::new(
            "campaign_id",
            ImageProfile::CAMPAIGN,
            EnumFields::CAMPAIGN,
            validators::campaign_create_validator(),
            validators::campaign_update_validator(),
            before,
            after,
        )
    }

    /// Returns the path parameter holding the resource id.
    #[must_use]
    pub const fn id_parameter(&self) -> &'static str {
        self.id_parameter
    }

    /// Returns the image settings.
    #[must_use]
    pub const fn images(&self) -> &ImageProfile {
        &self.images
    }

    /// Reads the resource id from the path.
    pub fn validate_id(&self, ctx: &mut PinfluencerContext) {
        self.before.validate_id(ctx, self.id_parameter);
    }

    /// Checks a create payload.
    pub fn validate_create(&self, ctx: &mut PinfluencerContext) {
        self.before.validate_payload(ctx, &self.create_validator);
    }

    /// Checks an update payload.
    pub fn validate_update(&self, ctx: &mut PinfluencerContext) {
        self.before.validate_payload(ctx, &self.update_validator);
    }

    /// Canonicalizes the enum tags of the request body.
    pub fn map_enums(&self, ctx: &mut PinfluencerContext) {
        self.before.map_enums::<ValueEnum>(ctx, self.enums.values);
        if !ctx.short_circuit {
            self.before.map_enums::<CategoryEnum>(ctx, self.enums.categories);
        }
        if let (Some(state), false) = (self.enums.state, ctx.short_circuit) {
            self.before.map_enum::<CampaignStateEnum>(ctx, state);
        }
    }

    /// Formats the enum tags of a single response entity.
    pub fn format_enums(&self, ctx: &mut PinfluencerContext) {
        if let Some(state) = self.enums.state {
            self.after.map_enum::<CampaignStateEnum>(ctx, state);
        }
        self.after.map_enums::<ValueEnum>(ctx, self.enums.values);
        self.after.map_enums::<CategoryEnum>(ctx, self.enums.categories);
    }

    /// Formats the enum tags of a response collection.
    pub fn format_enums_collection(&self, ctx: &mut PinfluencerContext) {
        if let Some(state) = self.enums.state {
            self.after.map_enum_collection::<CampaignStateEnum>(ctx, state);
        }
        self.after.map_enums_collection::<ValueEnum>(ctx, self.enums.values);
        self.after.map_enums_collection::<CategoryEnum>(ctx, self.enums.categories);
    }

    /// Checks the targeted image field against the allow-list.
    pub fn validate_image_field(&self, ctx: &mut PinfluencerContext) {
        self.before.validate_image_path(ctx, self.images.image_fields);
    }

    /// Uploads the request image under this resource's prefix.
    pub fn upload_image(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        self.before.upload_image(ctx, self.images.upload_prefix)
    }

    /// Turns the image keys of a single response entity into URLs.
    pub fn tag_image_urls(&self, ctx: &mut PinfluencerContext) {
        self.after.set_image_url(ctx, self.images.url_fields, false);
    }

    /// Turns the image keys of a response collection into URLs.
    pub fn tag_image_urls_collection(&self, ctx: &mut PinfluencerContext) {
        self.after.set_image_url(ctx, self.images.url_fields, true);
    }

    /// Merges identity profile fields into a single response entity.
    pub fn tag_claims(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        self.after.tag_auth_user_claims(ctx)
    }

    /// Merges identity profile fields into a response collection.
    pub fn tag_claims_collection(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        self.after.tag_auth_user_claims_collection(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::DEFAULT_BUCKET_URL;
    use http::StatusCode;
    use pinfluencer_core::{ApiGatewayEvent, JsonCamelToSnakeDeserializer};
    use pinfluencer_test::{InMemoryAuthUserRepository, InMemoryImageRepository};
    use serde_json::json;

    fn common() -> (Arc<CommonBeforeHooks>, Arc<CommonAfterHooks>) {
        let before = CommonBeforeHooks::new(
            Arc::new(JsonCamelToSnakeDeserializer),
            Arc::new(InMemoryImageRepository::new()),
        );
        let after = CommonAfterHooks::new(DEFAULT_BUCKET_URL, Arc::new(InMemoryAuthUserRepository::new()));
        (Arc::new(before), Arc::new(after))
    }

    fn campaign() -> ResourceHooks {
        let (before, after) = common();
        ResourceHooks::campaign(before, after)
    }

    fn ctx(body: serde_json::Value) -> PinfluencerContext {
        let mut ctx = PinfluencerContext::new(ApiGatewayEvent::new("POST /brands/me/campaigns"));
        ctx.body = body;
        ctx
    }

    #[test]
    fn test_profiles() {
        let (before, after) = common();
        let brand = ResourceHooks::brand(before.clone(), after.clone());
        let influencer = ResourceHooks::influencer(before, after);

        assert_eq!(brand.id_parameter(), "brand_id");
        assert_eq!(brand.images().upload_prefix, "brands");
        assert_eq!(influencer.id_parameter(), "influencer_id");
        assert_eq!(influencer.images().image_fields, &["image"]);
        assert_eq!(campaign().id_parameter(), "campaign_id");
    }

    #[test]
    fn test_campaign_map_enums() {
        let hooks = campaign();
        let mut ctx = ctx(json!({
            "campaign_values": ["value1"],
            "campaign_categories": ["category4"],
            "campaign_state": "draft"
        }));

        hooks.map_enums(&mut ctx);

        assert!(!ctx.short_circuit);
        assert_eq!(ctx.body["campaign_values"], json!(["VALUE1"]));
        assert_eq!(ctx.body["campaign_categories"], json!(["CATEGORY4"]));
        assert_eq!(ctx.body["campaign_state"], "DRAFT");
    }

    #[test]
    fn test_map_enums_stops_at_first_failure() {
        let hooks = campaign();
        let mut ctx = ctx(json!({
            "campaign_values": ["NOPE"],
            "campaign_state": "draft"
        }));

        hooks.map_enums(&mut ctx);

        assert!(ctx.short_circuit);
        assert_eq!(ctx.response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(ctx.body["campaign_state"], "draft");
    }

    #[test]
    fn test_create_and_update_validators_differ() {
        let hooks = campaign();

        let mut partial = ctx(json!({"campaign_title": "summer"}));
        hooks.validate_update(&mut partial);
        assert!(!partial.short_circuit);

        let mut partial = ctx(json!({"campaign_title": "summer"}));
        hooks.validate_create(&mut partial);
        assert!(partial.short_circuit);
    }

    #[test]
    fn test_format_enums_collection() {
        let hooks = campaign();
        let mut ctx = ctx(json!({}));
        ctx.response.body = json!([
            {"campaign_state": "active", "campaign_values": ["value2"], "campaign_categories": []},
            {"campaign_state": "CLOSED", "campaign_values": [], "campaign_categories": ["category9"]}
        ]);

        hooks.format_enums_collection(&mut ctx);

        assert_eq!(ctx.response.body[0]["campaign_state"], "ACTIVE");
        assert_eq!(ctx.response.body[0]["campaign_values"], json!(["VALUE2"]));
        assert_eq!(ctx.response.body[1]["campaign_categories"], json!(["CATEGORY9"]));
    }

    #[test]
    fn test_tag_image_urls() {
        let hooks = campaign();
        let mut ctx = ctx(json!({}));
        ctx.response.body = json!({"product_image1": "campaigns/u/1.png", "product_image2": null});

        hooks.tag_image_urls(&mut ctx);

        assert_eq!(
            ctx.response.body["product_image1"],
            format!("{DEFAULT_BUCKET_URL}/campaigns/u/1.png")
        );
        assert!(ctx.response.body["product_image2"].is_null());
    }
}
