//! Campaigns of the auth user's brand.

use std::sync::Arc;

use http::StatusCode;
use pinfluencer_core::{ObjectMapper, PinfluencerContext, PinfluencerResult};
use pinfluencer_domain::{
    Campaign, CampaignRepository, CampaignRequestDto, CampaignResponseDto, ImageRequestDto,
};
use serde_json::Value;
use tracing::info;

use super::{flexi_update, found, respond, set_field};

/// Campaign controller. Ownership is resolved by the repository through the
/// auth user's brand.
pub struct CampaignController {
    repository: Arc<dyn CampaignRepository>,
    mapper: Arc<ObjectMapper>,
}

impl CampaignController {
    /// Creates a controller.
    pub fn new(repository: Arc<dyn CampaignRepository>, mapper: Arc<ObjectMapper>) -> Self {
        Self { repository, mapper }
    }

    /// 200 with the campaign named by `context.id`, or 404 `{}`.
    pub fn get_by_id(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_by_id(&ctx.id);
        if let Some(campaign) = found(ctx, result)? {
            self.respond_with(ctx, StatusCode::OK, &campaign)?;
        }
        Ok(())
    }

    /// 200 with the campaigns of the auth user's brand.
    pub fn get_for_brand(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_for_auth_brand(&ctx.auth_user_id);
        if let Some(campaigns) = found(ctx, result)? {
            let views: Vec<CampaignResponseDto> = self.mapper.map_all(&campaigns)?;
            respond(ctx, StatusCode::OK, &views)?;
        }
        Ok(())
    }

    /// Creates a campaign under the auth user's brand; 201, or 404 `{}`
    /// without a brand.
    pub fn create_for_brand(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let request: CampaignRequestDto = self.mapper.map_from_dict(&ctx.body)?;
        let payload: Campaign = self.mapper.map(&request)?;
        let result = self.repository.write_new_for_brand(&ctx.auth_user_id, payload);
        if let Some(created) = found(ctx, result)? {
            self.repository.save()?;
            info!(campaign_id = %created.id, brand_id = %created.brand_id, "campaign created");
            self.respond_with(ctx, StatusCode::CREATED, &created)?;
        }
        Ok(())
    }

    /// Applies the request fields to the campaign named by `context.id`.
    pub fn update_campaign(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_by_id(&ctx.id);
        let Some(current) = found(ctx, result)? else {
            return Ok(());
        };
        let payload = flexi_update::<Campaign, CampaignRequestDto>(&current, &ctx.body)?;
        self.store(ctx, payload)
    }

    /// Points a product image of the campaign named by `context.id` at the
    /// uploaded key.
    pub fn update_campaign_image(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let image: ImageRequestDto = self.mapper.map_from_dict(&ctx.body)?;
        let result = self.repository.load_by_id(&ctx.id);
        let Some(current) = found(ctx, result)? else {
            return Ok(());
        };
        let payload = set_field(&current, &image.image_field, Value::String(image.image_path))?;
        self.store(ctx, payload)
    }

    fn store(&self, ctx: &mut PinfluencerContext, payload: Campaign) -> PinfluencerResult<()> {
        let result = self.repository.update_for_brand(&ctx.auth_user_id, payload);
        if let Some(updated) = found(ctx, result)? {
            self.repository.save()?;
            self.respond_with(ctx, StatusCode::OK, &updated)?;
        }
        Ok(())
    }

    fn respond_with(
        &self,
        ctx: &mut PinfluencerContext,
        status: StatusCode,
        campaign: &Campaign,
    ) -> PinfluencerResult<()> {
        let view: CampaignResponseDto = self.mapper.map(campaign)?;
        respond(ctx, status, &view)
    }
}

impl std::fmt::Debug for CampaignController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignController").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinfluencer_core::ApiGatewayEvent;
    use pinfluencer_domain::{rules, Brand, CampaignStateEnum, UserRepository};
    use pinfluencer_test::InMemoryBackend;
    use serde_json::json;

    fn controller(backend: &InMemoryBackend) -> CampaignController {
        let mapper = Arc::new(ObjectMapper::new(rules::mapping_rules()));
        CampaignController::new(backend.campaigns.clone(), mapper)
    }

    fn ctx(auth_user_id: &str, body: Value) -> PinfluencerContext {
        let mut ctx = PinfluencerContext::new(ApiGatewayEvent::new("POST /brands/me/campaigns"));
        ctx.auth_user_id = auth_user_id.to_string();
        ctx.body = body;
        ctx
    }

    fn campaign_body() -> Value {
        json!({
            "objective": "awareness",
            "campaign_title": "summer",
            "campaign_description": "sun",
            "campaign_categories": ["CATEGORY1"],
            "campaign_values": ["VALUE2"],
            "product_title": "hat",
            "product_description": "wide brim",
            "campaign_state": "ACTIVE"
        })
    }

    fn with_brand(owner: &str) -> InMemoryBackend {
        let backend = InMemoryBackend::new();
        backend.brands.write_new_for_auth_user(owner, Brand::default()).unwrap();
        backend
    }

    #[test]
    fn test_create_for_brand() {
        let backend = with_brand("owner");
        let controller = controller(&backend);

        let mut ctx = ctx("owner", campaign_body());
        controller.create_for_brand(&mut ctx).unwrap();

        assert_eq!(ctx.response.status_code, StatusCode::CREATED);
        assert_eq!(ctx.response.body["campaign_state"], "ACTIVE");
        assert_eq!(backend.campaigns.records()[0].campaign_state, CampaignStateEnum::Active);
        assert_eq!(backend.data_manager.commits(), 1);
    }

    #[test]
    fn test_create_without_brand() {
        let backend = InMemoryBackend::new();
        let mut ctx = ctx("owner", campaign_body());
        controller(&backend).create_for_brand(&mut ctx).unwrap();
        assert_eq!(ctx.response.status_code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_get_for_brand_and_by_id() {
        let backend = with_brand("owner");
        let controller = controller(&backend);
        let mut create = ctx("owner", campaign_body());
        controller.create_for_brand(&mut create).unwrap();
        let id = create.response.body["id"].as_str().unwrap().to_string();

        let mut list = ctx("owner", json!({}));
        controller.get_for_brand(&mut list).unwrap();
        assert_eq!(list.response.body[0]["id"], id.as_str());

        let mut single = ctx("someone", json!({}));
        single.id = id;
        controller.get_by_id(&mut single).unwrap();
        assert_eq!(single.response.body["campaign_title"], "summer");
    }

    #[test]
    fn test_update_campaign_of_other_brand() {
        let backend = with_brand("owner");
        backend.brands.write_new_for_auth_user("rival", Brand::default()).unwrap();
        let controller = controller(&backend);
        let mut create = ctx("owner", campaign_body());
        controller.create_for_brand(&mut create).unwrap();

        let mut update = ctx("rival", json!({"campaign_title": "hijacked"}));
        update.id = create.response.body["id"].as_str().unwrap().to_string();
        controller.update_campaign(&mut update).unwrap();

        assert_eq!(update.response.status_code, StatusCode::NOT_FOUND);
        assert_eq!(backend.campaigns.records()[0].campaign_title, "summer");
    }

    #[test]
    fn test_update_campaign_image() {
        let backend = with_brand("owner");
        let controller = controller(&backend);
        let mut create = ctx("owner", campaign_body());
        controller.create_for_brand(&mut create).unwrap();

        let mut update = ctx(
            "owner",
            json!({"image_path": "campaigns/owner/1.png", "image_field": "product_image2"}),
        );
        update.id = create.response.body["id"].as_str().unwrap().to_string();
        controller.update_campaign_image(&mut update).unwrap();

        assert_eq!(update.response.status_code, StatusCode::OK);
        assert_eq!(update.response.body["product_image2"], "campaigns/owner/1.png");
        assert!(update.response.body["product_image1"].is_null());
    }
}
