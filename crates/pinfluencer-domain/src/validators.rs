//! Payload validators per resource.
//!
//! Create routes require the full request view; update routes only check the
//! types of whatever fields are present.

use pinfluencer_core::PayloadValidator;

use crate::views::{
    AudienceAgeView, AudienceGenderView, BrandRequestDto, CampaignRequestDto, InfluencerRequestDto,
    NotificationCreateRequestDto,
};

/// Validator for `POST /brands/me`.
#[must_use]
pub fn brand_create_validator() -> PayloadValidator {
    PayloadValidator::for_record::<BrandRequestDto>().require_all()
}

/// Validator for `PATCH /brands/me`.
#[must_use]
pub fn brand_update_validator() -> PayloadValidator {
    PayloadValidator::for_record::<BrandRequestDto>()
}

/// Validator for `POST /influencers/me`.
#[must_use]
pub fn influencer_create_validator() -> PayloadValidator {
    PayloadValidator::for_record::<InfluencerRequestDto>().require_all()
}

/// Validator for `PATCH /influencers/me`.
#[must_use]
pub fn influencer_update_validator() -> PayloadValidator {
    PayloadValidator::for_record::<InfluencerRequestDto>()
}

/// Validator for `POST /brands/me/campaigns`.
#[must_use]
pub fn campaign_create_validator() -> PayloadValidator {
    PayloadValidator::for_record::<CampaignRequestDto>().require(&[
        "objective",
        "campaign_title",
        "campaign_description",
        "campaign_categories",
        "campaign_values",
        "product_title",
        "product_description",
    ])
}

/// Validator for `PATCH /brands/me/campaigns/{campaign_id}`.
#[must_use]
pub fn campaign_update_validator() -> PayloadValidator {
    PayloadValidator::for_record::<CampaignRequestDto>()
}

/// Validator for `POST /users/me/notifications`.
#[must_use]
pub fn notification_create_validator() -> PayloadValidator {
    PayloadValidator::for_record::<NotificationCreateRequestDto>().require_all()
}

/// Validator for audience age create and update routes.
#[must_use]
pub fn audience_age_validator() -> PayloadValidator {
    let validator = PayloadValidator::for_record::<AudienceAgeView>().require_all();
    split_ranges(validator)
}

/// Validator for audience gender create and update routes.
#[must_use]
pub fn audience_gender_validator() -> PayloadValidator {
    let validator = PayloadValidator::for_record::<AudienceGenderView>().require_all();
    split_ranges(validator)
}

fn split_ranges(validator: PayloadValidator) -> PayloadValidator {
    let fields = validator.schema().field_names();
    fields
        .into_iter()
        .fold(validator, |validator, field| validator.range(field, 0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brand_body() -> serde_json::Value {
        json!({
            "first_name": "ada",
            "last_name": "lovelace",
            "email": "ada@example.com",
            "brand_name": "acme",
            "brand_description": "anvils",
            "website": "https://acme.example.com",
            "insta_handle": "@acme",
            "values": ["VALUE1", "VALUE7"],
            "categories": ["CATEGORY2"]
        })
    }

    #[test]
    fn test_brand_create_requires_every_field() {
        assert!(brand_create_validator().validate(&brand_body()).is_ok());

        let mut body = brand_body();
        body.as_object_mut().unwrap().remove("email");
        let err = brand_create_validator().validate(&body).unwrap_err();
        assert_eq!(err.path, "$.email");
    }

    #[test]
    fn test_brand_enum_membership() {
        let mut body = brand_body();
        body["values"] = json!(["VALUE10"]);
        assert!(brand_create_validator().validate(&body).is_err());
    }

    #[test]
    fn test_update_accepts_partial_body() {
        assert!(brand_update_validator()
            .validate(&json!({"brand_name": "renamed"}))
            .is_ok());
        assert!(brand_update_validator()
            .validate(&json!({"brand_name": 5}))
            .is_err());
    }

    #[test]
    fn test_campaign_state_membership() {
        let body = json!({"campaign_state": "ARCHIVED"});
        assert!(campaign_update_validator().validate(&body).is_err());
        let body = json!({"campaign_state": "PAUSED"});
        assert!(campaign_update_validator().validate(&body).is_ok());
    }

    #[test]
    fn test_audience_split_ranges() {
        let valid = json!({"audience_male_split": 0.4, "audience_female_split": 0.6});
        assert!(audience_gender_validator().validate(&valid).is_ok());

        let out_of_range = json!({"audience_male_split": 1.4, "audience_female_split": 0.6});
        assert!(audience_gender_validator().validate(&out_of_range).is_err());

        let missing = json!({"audience_male_split": 0.4});
        assert!(audience_gender_validator().validate(&missing).is_err());
    }

    #[test]
    fn test_notification_requires_receiver() {
        let body = json!({"title": "hello", "message": "hi there"});
        assert!(notification_create_validator().validate(&body).is_err());
    }
}
