//! Request and response views.
//!
//! Views define the wire contract of each route. Request bodies are mapped
//! into a request view and then into the domain record; responses are the
//! domain record mapped into a response view.

use chrono::{DateTime, Utc};
use pinfluencer_core::schema::Describe;
use serde::{Deserialize, Serialize};

use crate::enums::{CampaignStateEnum, CategoryEnum, ValueEnum};

/// Body of `POST /brands/me` and `PATCH /brands/me`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct BrandRequestDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub brand_name: String,
    pub brand_description: String,
    pub website: String,
    pub insta_handle: String,
    pub values: Vec<ValueEnum>,
    pub categories: Vec<CategoryEnum>,
}

/// A brand as returned to clients.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct BrandResponseDto {
    pub id: String,
    pub created: DateTime<Utc>,
    pub brand_name: String,
    pub brand_description: String,
    pub website: String,
    pub logo: Option<String>,
    pub header_image: Option<String>,
    pub insta_handle: String,
    pub values: Vec<ValueEnum>,
    pub categories: Vec<CategoryEnum>,
    pub auth_user_id: String,
}

/// Body of `POST /influencers/me` and `PATCH /influencers/me`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct InfluencerRequestDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub website: String,
    pub bio: String,
    pub address: String,
    pub insta_handle: String,
    pub values: Vec<ValueEnum>,
    pub categories: Vec<CategoryEnum>,
}

/// An influencer as returned to clients.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct InfluencerResponseDto {
    pub id: String,
    pub created: DateTime<Utc>,
    pub website: String,
    pub bio: String,
    pub image: Option<String>,
    pub address: String,
    pub insta_handle: String,
    pub values: Vec<ValueEnum>,
    pub categories: Vec<CategoryEnum>,
    pub auth_user_id: String,
}

/// Body of campaign create and update routes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct CampaignRequestDto {
    pub objective: String,
    pub success_description: String,
    pub campaign_title: String,
    pub campaign_description: String,
    pub campaign_categories: Vec<CategoryEnum>,
    pub campaign_values: Vec<ValueEnum>,
    pub campaign_product_link: String,
    pub campaign_hashtag: String,
    pub campaign_discount_code: String,
    pub product_title: String,
    pub product_description: String,
    pub campaign_state: CampaignStateEnum,
}

/// A campaign as returned to clients.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct CampaignResponseDto {
    pub id: String,
    pub created: DateTime<Utc>,
    pub brand_id: String,
    pub objective: String,
    pub success_description: String,
    pub campaign_title: String,
    pub campaign_description: String,
    pub campaign_categories: Vec<CategoryEnum>,
    pub campaign_values: Vec<ValueEnum>,
    pub campaign_product_link: String,
    pub campaign_hashtag: String,
    pub campaign_discount_code: String,
    pub product_title: String,
    pub product_description: String,
    pub product_image1: Option<String>,
    pub product_image2: Option<String>,
    pub product_image3: Option<String>,
    pub campaign_state: CampaignStateEnum,
}

/// Body of `POST /users/me/notifications`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct NotificationCreateRequestDto {
    pub receiver_id: String,
    pub title: String,
    pub message: String,
}

/// A notification as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct NotificationResponseDto {
    pub id: String,
    pub created: DateTime<Utc>,
    pub sender_id: String,
    pub receiver_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
}

/// Body of image upload routes, before the upload hook runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Describe)]
pub struct RawImageRequestDto {
    /// Base64-encoded image.
    pub image_bytes: String,
}

/// Body of image upload routes, after the upload hook ran.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Describe)]
pub struct ImageRequestDto {
    /// Storage key of the uploaded image.
    pub image_path: String,
    /// Entity field the key is written to.
    pub image_field: String,
}

/// Flat view of an influencer's audience age brackets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct AudienceAgeView {
    pub audience_age_13_to_17_split: f64,
    pub audience_age_18_to_24_split: f64,
    pub audience_age_25_to_34_split: f64,
    pub audience_age_35_to_44_split: f64,
    pub audience_age_45_to_54_split: f64,
    pub audience_age_55_to_64_split: f64,
    pub audience_age_65_plus_split: f64,
}

/// Bracket bounds in the order of the [`AudienceAgeView`] fields.
pub const AGE_BRACKETS: [(i64, Option<i64>); 7] = [
    (13, Some(17)),
    (18, Some(24)),
    (25, Some(34)),
    (35, Some(44)),
    (45, Some(54)),
    (55, Some(64)),
    (65, None),
];

impl AudienceAgeView {
    /// Returns the split slot of a bracket, if the bracket is known.
    pub fn slot_mut(&mut self, min_age: i64, max_age: Option<i64>) -> Option<&mut f64> {
        match (min_age, max_age) {
            (13, Some(17)) => Some(&mut self.audience_age_13_to_17_split),
            (18, Some(24)) => Some(&mut self.audience_age_18_to_24_split),
            (25, Some(34)) => Some(&mut self.audience_age_25_to_34_split),
            (35, Some(44)) => Some(&mut self.audience_age_35_to_44_split),
            (45, Some(54)) => Some(&mut self.audience_age_45_to_54_split),
            (55, Some(64)) => Some(&mut self.audience_age_55_to_64_split),
            (65, None) => Some(&mut self.audience_age_65_plus_split),
            _ => None,
        }
    }

    /// Returns the splits in bracket order.
    #[must_use]
    pub fn splits(&self) -> [f64; 7] {
        [
            self.audience_age_13_to_17_split,
            self.audience_age_18_to_24_split,
            self.audience_age_25_to_34_split,
            self.audience_age_35_to_44_split,
            self.audience_age_45_to_54_split,
            self.audience_age_55_to_64_split,
            self.audience_age_65_plus_split,
        ]
    }
}

/// Flat view of an influencer's audience gender buckets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct AudienceGenderView {
    pub audience_male_split: f64,
    pub audience_female_split: f64,
}
