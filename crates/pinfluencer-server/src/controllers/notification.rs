//! Notifications between auth users.

use std::sync::Arc;

use http::StatusCode;
use pinfluencer_core::{ObjectMapper, PinfluencerContext, PinfluencerResult};
use pinfluencer_domain::{
    Notification, NotificationCreateRequestDto, NotificationRepository, NotificationResponseDto,
};
use tracing::info;

use super::{found, respond};

/// Notification controller.
pub struct NotificationController {
    repository: Arc<dyn NotificationRepository>,
    mapper: Arc<ObjectMapper>,
}

impl NotificationController {
    /// Creates a controller.
    pub fn new(repository: Arc<dyn NotificationRepository>, mapper: Arc<ObjectMapper>) -> Self {
        Self { repository, mapper }
    }

    /// Sends a notification from the auth user; 201.
    pub fn create(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let request: NotificationCreateRequestDto = self.mapper.map_from_dict(&ctx.body)?;
        let payload: Notification = self.mapper.map(&request)?;
        let created = self.repository.write_new_for_auth_user(&ctx.auth_user_id, payload)?;
        self.repository.save()?;
        info!(notification_id = %created.id, receiver_id = %created.receiver_id, "notification sent");

        let view: NotificationResponseDto = self.mapper.map(&created)?;
        respond(ctx, StatusCode::CREATED, &view)
    }

    /// 200 with the notification named by `context.id`, or 404 `{}`.
    pub fn get_by_id(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        let result = self.repository.load_by_id(&ctx.id);
        if let Some(notification) = found(ctx, result)? {
            let view: NotificationResponseDto = self.mapper.map(&notification)?;
            respond(ctx, StatusCode::OK, &view)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for NotificationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationController").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinfluencer_core::ApiGatewayEvent;
    use pinfluencer_test::InMemoryNotificationRepository;
    use serde_json::json;

    #[test]
    fn test_create_and_get() {
        let repository = Arc::new(InMemoryNotificationRepository::new());
        let controller = NotificationController::new(repository.clone(), Arc::new(ObjectMapper::default()));

        let mut create = PinfluencerContext::new(ApiGatewayEvent::new("POST /users/me/notifications"));
        create.auth_user_id = "sender".to_string();
        create.body = json!({"receiver_id": "receiver", "title": "hi", "message": "collab?"});
        controller.create(&mut create).unwrap();

        assert_eq!(create.response.status_code, StatusCode::CREATED);
        assert_eq!(create.response.body["sender_id"], "sender");
        assert_eq!(create.response.body["read"], false);

        let mut get = PinfluencerContext::new(ApiGatewayEvent::new("GET /notifications/{notification_id}"));
        get.id = repository.records()[0].id.clone();
        controller.get_by_id(&mut get).unwrap();
        assert_eq!(get.response.body["message"], "collab?");

        let mut missing = PinfluencerContext::new(ApiGatewayEvent::new("GET /notifications/{notification_id}"));
        missing.id = pinfluencer_core::ids::new_id();
        controller.get_by_id(&mut missing).unwrap();
        assert_eq!(missing.response.status_code, StatusCode::NOT_FOUND);
    }
}
