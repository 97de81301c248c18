//! Audience demographics of the auth user's influencer profile.

use std::marker::PhantomData;
use std::sync::Arc;

use http::StatusCode;
use pinfluencer_core::{ErrorCapsule, ObjectMapper, PinfluencerContext, PinfluencerResult, Record};
use pinfluencer_domain::{
    AudienceAgeSplit, AudienceAgeView, AudienceGenderSplit, AudienceGenderView, AudienceRepository,
};
use tracing::{info, warn};

use super::{flexi_update, respond};

/// Message of the capsule raised when no splits are stored.
pub const AUDIENCE_NOT_FOUND_MESSAGE: &str = "audience data not found";

/// Controller of one kind of audience split.
///
/// `S` is the stored split list, `V` its flat view. Both directions are
/// mapped through the registered audience rules.
pub struct AudienceController<S, V> {
    repository: Arc<dyn AudienceRepository<S>>,
    mapper: Arc<ObjectMapper>,
    _view: PhantomData<fn() -> V>,
}

/// Audience age brackets.
pub type AudienceAgeController = AudienceController<AudienceAgeSplit, AudienceAgeView>;

/// Audience gender buckets.
pub type AudienceGenderController = AudienceController<AudienceGenderSplit, AudienceGenderView>;

impl<S, V> AudienceController<S, V>
where
    S: Record + PartialEq,
    V: Record,
{
    /// Creates a controller.
    pub fn new(repository: Arc<dyn AudienceRepository<S>>, mapper: Arc<ObjectMapper>) -> Self {
        Self {
            repository,
            mapper,
            _view: PhantomData,
        }
    }

    /// Stores the splits of the auth user; 201, or 400 `{}` when stored already.
    pub fn create_for_influencer(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let view: V = self.mapper.map_from_dict(&ctx.body)?;
        let splits: S = self.mapper.map(&view)?;

        match self.repository.write_new_for_influencer(&ctx.auth_user_id, splits) {
            Ok(created) => {
                self.repository.save()?;
                info!(auth_user_id = %ctx.auth_user_id, splits = S::schema().name(), "audience created");
                let view: V = self.mapper.map(&created)?;
                respond(ctx, StatusCode::CREATED, &view)
            }
            Err(err) if err.is_already_exists() => {
                warn!(error = %err, "audience create rejected");
                ctx.fail(StatusCode::BAD_REQUEST);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// 200 with the auth user's splits, or a 404 capsule when none are stored.
    pub fn get_for_influencer(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let Some(splits) = self.load(ctx)? else {
            return Ok(());
        };
        let view: V = self.mapper.map(&splits)?;
        respond(ctx, StatusCode::OK, &view)
    }

    /// Applies the request view to the stored splits; 200, or a 404 capsule.
    pub fn update_for_influencer(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let Some(current) = self.load(ctx)? else {
            return Ok(());
        };
        let view: V = self.mapper.map(&current)?;
        let view = flexi_update::<V, V>(&view, &ctx.body)?;
        let splits: S = self.mapper.map(&view)?;

        let updated = self.repository.update_for_influencer(&ctx.auth_user_id, splits)?;
        self.repository.save()?;
        let view: V = self.mapper.map(&updated)?;
        respond(ctx, StatusCode::OK, &view)
    }

    fn load(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<Option<S>> {
        let splits = self.repository.load_for_influencer(&ctx.auth_user_id)?;
        if splits == S::default() {
            ctx.push_error(ErrorCapsule::new(StatusCode::NOT_FOUND, AUDIENCE_NOT_FOUND_MESSAGE));
            return Ok(None);
        }
        Ok(Some(splits))
    }
}

impl<S, V> std::fmt::Debug for AudienceController<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudienceController")
            .field("splits", &std::any::type_name::<S>())
            .finish_non_exhaustive()
    }
}
