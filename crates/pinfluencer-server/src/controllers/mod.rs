//! Controllers.
//!
//! A controller is the last before-response step of a sequence. It maps the
//! prepared `context.body` into domain records, calls its repository and
//! writes `context.response`. Expected repository outcomes (`NotFound`,
//! `AlreadyExists`) become client responses; anything else is returned as an
//! error and answered with a 500 by the dispatcher.

mod audience;
mod campaign;
mod notification;
mod user;

pub use audience::{
    AudienceAgeController, AudienceController, AudienceGenderController, AUDIENCE_NOT_FOUND_MESSAGE,
};
pub use campaign::CampaignController;
pub use notification::NotificationController;
pub use user::{BrandController, InfluencerController, UserController};

use http::StatusCode;
use pinfluencer_core::{PinfluencerContext, PinfluencerResult, Record};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Copies every request-view field present and non-null in `body` onto
/// `entity`. Fields the entity does not have are ignored.
pub(crate) fn flexi_update<M, R>(entity: &M, body: &Value) -> PinfluencerResult<M>
where
    M: Record,
    R: Record,
{
    let mut value = serde_json::to_value(entity)?;
    if let (Value::Object(target), Value::Object(source)) = (&mut value, body) {
        for name in R::schema().field_names() {
            match source.get(name) {
                Some(update) if !update.is_null() && target.contains_key(name) => {
                    target.insert(name.to_string(), update.clone());
                }
                _ => {}
            }
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Sets a single field of `entity` by name.
pub(crate) fn set_field<M: Record>(entity: &M, field: &str, value: Value) -> PinfluencerResult<M> {
    let mut record = serde_json::to_value(entity)?;
    if let Value::Object(fields) = &mut record {
        fields.insert(field.to_string(), value);
    }
    Ok(serde_json::from_value(record)?)
}

/// Turns a `NotFound` outcome into a 404 `{}` response.
pub(crate) fn found<T>(
    ctx: &mut PinfluencerContext,
    result: PinfluencerResult<T>,
) -> PinfluencerResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => {
            warn!(route = %ctx.route_key(), error = %err, "resource not found");
            ctx.fail(StatusCode::NOT_FOUND);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub(crate) fn respond<T: Serialize>(
    ctx: &mut PinfluencerContext,
    status: StatusCode,
    view: &T,
) -> PinfluencerResult<()> {
    let body = serde_json::to_value(view)?;
    ctx.respond(status, body);
    Ok(())
}
