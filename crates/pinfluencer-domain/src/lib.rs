//! # Pinfluencer Domain
//!
//! The records, views and collaborator contracts of the brand/influencer
//! marketplace.
//!
//! - [`models`] - Domain records as stored by the repositories
//! - [`views`] - Request and response views per route
//! - [`enums`] - Value, category, campaign state and gender tags
//! - [`repositories`] - Traits implemented by persistence, storage and identity adapters
//! - [`validators`] - Payload validators per resource
//! - [`rules`] - Custom mapping rules for audience demographics

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod enums;
pub mod models;
pub mod repositories;
pub mod rules;
pub mod validators;
pub mod views;

pub use enums::{CampaignStateEnum, CategoryEnum, GenderEnum, ValueEnum};
pub use models::{
    AudienceAge, AudienceAgeSplit, AudienceGender, AudienceGenderSplit, Brand, Campaign,
    Influencer, Notification, User,
};
pub use repositories::{
    AudienceAgeRepository, AudienceGenderRepository, AudienceRepository, AuthUserRepository,
    BrandRepository, CampaignRepository, DataManager, ImageRepository, InfluencerRepository,
    NotificationRepository, UserRepository,
};
pub use views::{
    AudienceAgeView, AudienceGenderView, BrandRequestDto, BrandResponseDto, CampaignRequestDto,
    CampaignResponseDto, ImageRequestDto, InfluencerRequestDto, InfluencerResponseDto,
    NotificationCreateRequestDto, NotificationResponseDto, RawImageRequestDto,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pinfluencer_core::Record;

    #[test]
    fn test_views_exported_at_root() {
        let names: Vec<&str> = [
            BrandRequestDto::schema(),
            InfluencerResponseDto::schema(),
            CampaignRequestDto::schema(),
            NotificationCreateRequestDto::schema(),
            ImageRequestDto::schema(),
            AudienceAgeView::schema(),
            AudienceGenderView::schema(),
        ]
        .iter()
        .map(|schema| schema.name())
        .collect();
        assert!(names.contains(&"BrandRequestDto"));
        assert!(names.contains(&"AudienceGenderView"));
    }
}
