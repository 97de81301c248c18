//! Hooks shared by every resource.
//!
//! [`CommonBeforeHooks`] prepare `context.body` before a controller runs;
//! [`CommonAfterHooks`] reshape `context.response.body` afterwards. Expected
//! failures short-circuit the context with a 400; collaborator failures are
//! returned as errors.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::StatusCode;
use pinfluencer_core::{
    ids, BodyDeserializer, PayloadValidator, PinfluencerContext, PinfluencerError,
    PinfluencerResult, Tagged, CLIENT_ERROR_MESSAGE,
};
use pinfluencer_domain::{AuthUserRepository, ImageRepository};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Path parameter naming the image field of an upload route.
pub const IMAGE_FIELD_PARAMETER: &str = "image_field";

pub use pinfluencer_config::DEFAULT_BUCKET_URL;

/// Normalizes an image field path segment to its domain field name.
///
/// ```
/// use pinfluencer_middleware::hooks::normalize_image_field;
///
/// assert_eq!(normalize_image_field("header-image"), "header_image");
/// assert_eq!(normalize_image_field("logo"), "logo");
/// ```
#[must_use]
pub fn normalize_image_field(segment: &str) -> String {
    segment.replace('-', "_")
}

/// Resolves a wire tag against an enum's tag table, ignoring ASCII case.
#[must_use]
pub fn resolve_tag<E: Tagged>(raw: &str) -> Option<&'static str> {
    E::TAGS.iter().copied().find(|tag| tag.eq_ignore_ascii_case(raw))
}

fn client_error(ctx: &mut PinfluencerContext) {
    ctx.fail_with(
        StatusCode::BAD_REQUEST,
        json!({ "message": CLIENT_ERROR_MESSAGE }),
    );
}

/// Hooks that run before the controller.
pub struct CommonBeforeHooks {
    deserializer: Arc<dyn BodyDeserializer>,
    image_repository: Arc<dyn ImageRepository>,
}

impl CommonBeforeHooks {
    /// Creates the hook group.
    pub fn new(
        deserializer: Arc<dyn BodyDeserializer>,
        image_repository: Arc<dyn ImageRepository>,
    ) -> Self {
        Self {
            deserializer,
            image_repository,
        }
    }

    /// Parses `event.body` into `context.body`. An absent body parses as `{}`.
    pub fn set_body(&self, ctx: &mut PinfluencerContext) {
        let parsed = match ctx.event.body.as_deref() {
            Some(raw) if !raw.trim().is_empty() => self.deserializer.deserialize(raw),
            _ => Ok(Value::Object(Map::new())),
        };
        match parsed {
            Ok(body) => ctx.body = body,
            Err(err) => {
                warn!(route = %ctx.route_key(), error = %err, "request body is not valid JSON");
                client_error(ctx);
            }
        }
    }

    /// Copies the `username` claim into `context.auth_user_id`.
    pub fn set_auth_user_id(&self, ctx: &mut PinfluencerContext) {
        let username = ctx
            .event
            .username()
            .filter(|username| !username.is_empty())
            .map(str::to_owned);
        match username {
            Some(username) => {
                debug!(auth_user_id = %username, "auth user resolved");
                ctx.auth_user_id = username;
            }
            None => {
                warn!(route = %ctx.route_key(), "missing username claim");
                client_error(ctx);
            }
        }
    }

    /// Checks `context.body` against a validator; violations answer 400 `{}`.
    pub fn validate_payload(&self, ctx: &mut PinfluencerContext, validator: &PayloadValidator) {
        if let Err(violation) = validator.validate(&ctx.body) {
            warn!(
                route = %ctx.route_key(),
                path = %violation.path,
                reason = %violation.message,
                "payload rejected"
            );
            ctx.fail(StatusCode::BAD_REQUEST);
        }
    }

    /// Reads a path parameter holding a canonical id into `context.id`.
    pub fn validate_id(&self, ctx: &mut PinfluencerContext, parameter: &str) {
        let id = ctx
            .event
            .path_parameter(parameter)
            .filter(|id| ids::valid_uuid(id))
            .map(str::to_owned);
        match id {
            Some(id) => ctx.id = id,
            None => {
                warn!(
                    parameter,
                    value = ctx.event.path_parameter(parameter).unwrap_or_default(),
                    "path parameter is not a valid id"
                );
                ctx.fail(StatusCode::BAD_REQUEST);
            }
        }
    }

    /// Replaces the tag under `key` with its canonical form.
    ///
    /// Absent and null values are left alone. A non-string or unknown tag
    /// answers 400.
    pub fn map_enum<E: Tagged>(&self, ctx: &mut PinfluencerContext, key: &str) {
        let Some(value) = ctx.body.get_mut(key) else {
            return;
        };
        if value.is_null() {
            return;
        }
        match value.as_str().and_then(resolve_tag::<E>) {
            Some(tag) => *value = Value::String(tag.to_string()),
            None => {
                warn!(key, value = %value, "unknown enum tag");
                ctx.fail(StatusCode::BAD_REQUEST);
            }
        }
    }

    /// Replaces every tag of the list under `key` with its canonical form.
    pub fn map_enums<E: Tagged>(&self, ctx: &mut PinfluencerContext, key: &str) {
        let Some(value) = ctx.body.get_mut(key) else {
            return;
        };
        if value.is_null() {
            return;
        }
        let mapped: Option<Vec<Value>> = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_str()
                        .and_then(resolve_tag::<E>)
                        .map(|tag| Value::String(tag.to_string()))
                })
                .collect()
        });
        match mapped {
            Some(tags) => *value = Value::Array(tags),
            None => {
                warn!(key, value = %value, "unknown enum tag in list");
                ctx.fail(StatusCode::BAD_REQUEST);
            }
        }
    }

    /// Checks the `image_field` path parameter against an allow-list.
    pub fn validate_image_path(&self, ctx: &mut PinfluencerContext, allowed: &[&str]) {
        let field = ctx
            .event
            .path_parameter(IMAGE_FIELD_PARAMETER)
            .map(normalize_image_field);
        match field {
            Some(field) if allowed.contains(&field.as_str()) => {
                debug!(image_field = %field, "image field accepted");
            }
            field => {
                warn!(image_field = ?field, ?allowed, "not a valid image field");
                ctx.fail(StatusCode::BAD_REQUEST);
            }
        }
    }

    /// Uploads `body.image_bytes` under `<prefix>/<auth_user_id>`.
    ///
    /// On success `context.body` becomes `{"image_path": <key>, "image_field": <field>}`.
    pub fn upload_image(&self, ctx: &mut PinfluencerContext, prefix: &str) -> PinfluencerResult<()> {
        let Some(field) = ctx
            .event
            .path_parameter(IMAGE_FIELD_PARAMETER)
            .map(normalize_image_field)
        else {
            warn!("upload without image field");
            ctx.fail(StatusCode::BAD_REQUEST);
            return Ok(());
        };

        let decoded = ctx
            .body
            .get("image_bytes")
            .and_then(Value::as_str)
            .map(|encoded| STANDARD.decode(encoded));
        let image = match decoded {
            Some(Ok(image)) => image,
            Some(Err(err)) => {
                warn!(error = %err, "image bytes are not valid base64");
                ctx.fail(StatusCode::BAD_REQUEST);
                return Ok(());
            }
            None => {
                warn!("upload without image bytes");
                ctx.fail(StatusCode::BAD_REQUEST);
                return Ok(());
            }
        };

        let path = format!("{prefix}/{}", ctx.auth_user_id);
        let key = self.image_repository.upload(&path, &image)?;
        debug!(%path, %key, image_field = %field, bytes = image.len(), "image uploaded");

        ctx.body = json!({ "image_path": key, "image_field": field });
        Ok(())
    }
}

impl std::fmt::Debug for CommonBeforeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonBeforeHooks").finish_non_exhaustive()
    }
}

/// Hooks that run after the controller.
pub struct CommonAfterHooks {
    bucket_url: String,
    auth_user_repository: Arc<dyn AuthUserRepository>,
}

impl CommonAfterHooks {
    /// Creates the hook group. A trailing `/` on `bucket_url` is ignored.
    pub fn new(bucket_url: impl Into<String>, auth_user_repository: Arc<dyn AuthUserRepository>) -> Self {
        let bucket_url = bucket_url.into().trim_end_matches('/').to_string();
        Self {
            bucket_url,
            auth_user_repository,
        }
    }

    /// Returns the bucket URL prefixed to image keys.
    #[must_use]
    pub fn bucket_url(&self) -> &str {
        &self.bucket_url
    }

    /// Formats the tag under `key` of a single entity.
    pub fn map_enum<E: Tagged>(&self, ctx: &mut PinfluencerContext, key: &str) {
        if let Some(value) = ctx.response.body.get_mut(key) {
            format_tag::<E>(value);
        }
    }

    /// Formats the tag under `key` of every entity of a collection.
    pub fn map_enum_collection<E: Tagged>(&self, ctx: &mut PinfluencerContext, key: &str) {
        for entity in entities_mut(&mut ctx.response.body) {
            if let Some(value) = entity.get_mut(key) {
                format_tag::<E>(value);
            }
        }
    }

    /// Formats the tag list under `key` of a single entity.
    pub fn map_enums<E: Tagged>(&self, ctx: &mut PinfluencerContext, key: &str) {
        if let Some(value) = ctx.response.body.get_mut(key) {
            format_tags::<E>(value);
        }
    }

    /// Formats the tag list under `key` of every entity of a collection.
    pub fn map_enums_collection<E: Tagged>(&self, ctx: &mut PinfluencerContext, key: &str) {
        for entity in entities_mut(&mut ctx.response.body) {
            if let Some(value) = entity.get_mut(key) {
                format_tags::<E>(value);
            }
        }
    }

    /// Prefixes the bucket URL to the non-null image keys under `fields`.
    pub fn set_image_url(&self, ctx: &mut PinfluencerContext, fields: &[&str], collection: bool) {
        if collection {
            for entity in entities_mut(&mut ctx.response.body) {
                self.prefix_images(entity, fields);
            }
        } else {
            self.prefix_images(&mut ctx.response.body, fields);
        }
    }

    fn prefix_images(&self, entity: &mut Value, fields: &[&str]) {
        for field in fields {
            if let Some(Value::String(key)) = entity.get_mut(*field) {
                *key = format!("{}/{key}", self.bucket_url);
            }
        }
    }

    /// Merges the identity profile of the entity's `auth_user_id` into the response.
    pub fn tag_auth_user_claims(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        self.tag_claims(&mut ctx.response.body)
    }

    /// Merges identity profiles into every entity of a collection.
    pub fn tag_auth_user_claims_collection(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        entities_mut(&mut ctx.response.body).try_for_each(|entity| self.tag_claims(entity))
    }

    fn tag_claims(&self, entity: &mut Value) -> PinfluencerResult<()> {
        let auth_user_id = entity
            .get("auth_user_id")
            .and_then(Value::as_str)
            .ok_or_else(|| PinfluencerError::internal("response entity has no auth_user_id"))?;
        let user = self.auth_user_repository.get_by_id(auth_user_id)?;

        if let Some(fields) = entity.as_object_mut() {
            fields.insert("first_name".to_string(), Value::String(user.first_name));
            fields.insert("last_name".to_string(), Value::String(user.last_name));
            fields.insert("email".to_string(), Value::String(user.email));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CommonAfterHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonAfterHooks")
            .field("bucket_url", &self.bucket_url)
            .finish_non_exhaustive()
    }
}

fn entities_mut(body: &mut Value) -> impl Iterator<Item = &mut Value> {
    body.as_array_mut().into_iter().flatten()
}

fn format_tag<E: Tagged>(value: &mut Value) {
    if let Value::String(raw) = value {
        match resolve_tag::<E>(raw) {
            Some(tag) => *raw = tag.to_string(),
            None => warn!(value = %raw, "unknown enum tag left unchanged"),
        }
    }
}

fn format_tags<E: Tagged>(value: &mut Value) {
    if let Value::Array(items) = value {
        items.iter_mut().for_each(format_tag::<E>);
    }
}
