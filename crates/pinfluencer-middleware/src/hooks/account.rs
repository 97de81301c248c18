//! Hooks tied to the auth user's account.

use std::sync::Arc;

use http::StatusCode;
use pinfluencer_core::{PinfluencerContext, PinfluencerResult};
use pinfluencer_domain::{AuthUserRepository, BrandRepository, InfluencerRepository, User};
use serde_json::Value;
use tracing::{info, warn};

/// Ownership checks and identity-provider claim updates.
pub struct AccountHooks {
    brand_repository: Arc<BrandRepository>,
    influencer_repository: Arc<InfluencerRepository>,
    auth_user_repository: Arc<dyn AuthUserRepository>,
}

impl AccountHooks {
    /// Creates the hook group.
    pub fn new(
        brand_repository: Arc<BrandRepository>,
        influencer_repository: Arc<InfluencerRepository>,
        auth_user_repository: Arc<dyn AuthUserRepository>,
    ) -> Self {
        Self {
            brand_repository,
            influencer_repository,
            auth_user_repository,
        }
    }

    /// Answers 404 `{}` unless the auth user owns a brand.
    pub fn validate_auth_brand(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        match self.brand_repository.load_for_auth_user(&ctx.auth_user_id) {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                warn!(auth_user_id = %ctx.auth_user_id, "auth user owns no brand");
                ctx.fail(StatusCode::NOT_FOUND);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Answers 404 `{}` unless the auth user owns an influencer profile.
    pub fn validate_auth_influencer(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        match self.influencer_repository.load_for_auth_user(&ctx.auth_user_id) {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                warn!(auth_user_id = %ctx.auth_user_id, "auth user owns no influencer profile");
                ctx.fail(StatusCode::NOT_FOUND);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Writes the request's profile fields as brand claims.
    pub fn set_brand_claims(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let user = self.user_from_body(ctx)?;
        self.auth_user_repository.update_brand_claims(&user)?;
        info!(auth_user_id = %user.auth_user_id, "brand claims updated");
        Ok(())
    }

    /// Writes the request's profile fields as influencer claims.
    pub fn set_influencer_claims(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let user = self.user_from_body(ctx)?;
        self.auth_user_repository.update_influencer_claims(&user)?;
        info!(auth_user_id = %user.auth_user_id, "influencer claims updated");
        Ok(())
    }

    /// Builds the profile from `context.body`. Fields the body leaves out keep
    /// their current identity-provider values.
    fn user_from_body(&self, ctx: &PinfluencerContext) -> PinfluencerResult<User> {
        let field = |name: &str| ctx.body.get(name).and_then(Value::as_str).map(str::to_owned);
        let (first_name, last_name, email) = (field("first_name"), field("last_name"), field("email"));

        let current = if first_name.is_some() && last_name.is_some() && email.is_some() {
            User::default()
        } else {
            self.auth_user_repository.get_by_id(&ctx.auth_user_id)?
        };

        Ok(User {
            auth_user_id: ctx.auth_user_id.clone(),
            first_name: first_name.unwrap_or(current.first_name),
            last_name: last_name.unwrap_or(current.last_name),
            email: email.unwrap_or(current.email),
        })
    }
}

impl std::fmt::Debug for AccountHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountHooks").finish_non_exhaustive()
    }
}
