//! Brand and influencer accounts.

use std::marker::PhantomData;
use std::sync::Arc;

use http::StatusCode;
use pinfluencer_core::{ObjectMapper, PinfluencerContext, PinfluencerResult, Record};
use pinfluencer_domain::{
    Brand, BrandRequestDto, BrandResponseDto, ImageRequestDto, Influencer, InfluencerRequestDto,
    InfluencerResponseDto, UserRepository,
};
use serde_json::Value;
use tracing::{info, warn};

use super::{flexi_update, found, respond, set_field};

/// Controller of an account resource owned by one auth user.
///
/// `M` is the domain record, `Req` the request view and `Res` the response
/// view.
pub struct UserController<M, Req, Res> {
    repository: Arc<dyn UserRepository<M>>,
    mapper: Arc<ObjectMapper>,
    _views: PhantomData<fn() -> (Req, Res)>,
}

/// Brand accounts.
pub type BrandController = UserController<Brand, BrandRequestDto, BrandResponseDto>;

/// Influencer accounts.
pub type InfluencerController =
    UserController<Influencer, InfluencerRequestDto, InfluencerResponseDto>;

impl<M, Req, Res> UserController<M, Req, Res>
where
    M: Record,
    Req: Record,
    Res: Record,
{
    /// Creates a controller.
    pub fn new(repository: Arc<dyn UserRepository<M>>, mapper: Arc<ObjectMapper>) -> Self {
        Self {
            repository,
            mapper,
            _views: PhantomData,
        }
    }

    /// 200 with every record.
    pub fn get_all(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let records = self.repository.load_collection()?;
        let views: Vec<Res> = self.mapper.map_all(&records)?;
        respond(ctx, StatusCode::OK, &views)
    }

    /// 200 with the record named by `context.id`, or 404 `{}`.
    pub fn get_by_id(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_by_id(&ctx.id);
        if let Some(record) = found(ctx, result)? {
            self.respond_with(ctx, StatusCode::OK, &record)?;
        }
        Ok(())
    }

    /// 200 with the auth user's record, or 404 `{}`.
    pub fn get_for_auth_user(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_for_auth_user(&ctx.auth_user_id);
        if let Some(record) = found(ctx, result)? {
            self.respond_with(ctx, StatusCode::OK, &record)?;
        }
        Ok(())
    }

    /// Creates the auth user's record; 201, or 400 `{}` when one exists.
    pub fn create(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let request: Req = self.mapper.map_from_dict(&ctx.body)?;
        let payload: M = self.mapper.map(&request)?;

        match self.repository.write_new_for_auth_user(&ctx.auth_user_id, payload) {
            Ok(created) => {
                self.repository.save()?;
                info!(resource = M::schema().name(), auth_user_id = %ctx.auth_user_id, "created");
                self.respond_with(ctx, StatusCode::CREATED, &created)
            }
            Err(err) if err.is_already_exists() => {
                warn!(error = %err, "create rejected");
                ctx.fail(StatusCode::BAD_REQUEST);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Applies the request fields to the auth user's record; 200, or 404 `{}`.
    pub fn update(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_for_auth_user(&ctx.auth_user_id);
        let Some(current) = found(ctx, result)? else {
            return Ok(());
        };
        let payload = flexi_update::<M, Req>(&current, &ctx.body)?;
        let result = self.repository.update_for_auth_user(&ctx.auth_user_id, payload);
        if let Some(updated) = found(ctx, result)? {
            self.repository.save()?;
            self.respond_with(ctx, StatusCode::OK, &updated)?;
        }
        Ok(())
    }

    /// Points an image field of the auth user's record at the uploaded key.
    pub fn update_image_field(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let image: ImageRequestDto = self.mapper.map_from_dict(&ctx.body)?;
        let result = self.repository.load_for_auth_user(&ctx.auth_user_id);
        let Some(current) = found(ctx, result)? else {
            return Ok(());
        };
        let payload = set_field(&current, &image.image_field, Value::String(image.image_path))?;
        let result = self.repository.update_for_auth_user(&ctx.auth_user_id, payload);
        if let Some(updated) = found(ctx, result)? {
            self.repository.save()?;
            self.respond_with(ctx, StatusCode::OK, &updated)?;
        }
        Ok(())
    }

    fn respond_with(&self, ctx: &mut PinfluencerContext, status: StatusCode, record: &M) -> PinfluencerResult<()> {
        let view: Res = self.mapper.map(record)?;
        respond(ctx, status, &view)
    }
}

impl<M, Req, Res> std::fmt::Debug for UserController<M, Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("record", &std::any::type_name::<M>())
            .finish_non_exhaustive()
    }
}
