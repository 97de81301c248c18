//! Domain records as persisted by the repositories.

use chrono::{DateTime, Utc};
use pinfluencer_core::schema::Describe;
use serde::{Deserialize, Serialize};

use crate::enums::{CampaignStateEnum, CategoryEnum, GenderEnum, ValueEnum};

/// A brand account, one per auth user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
pub struct Brand {
    /// Resource id.
    pub id: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Display name.
    pub brand_name: String,
    /// Free text description.
    pub brand_description: String,
    /// Website URL.
    pub website: String,
    /// Storage key of the logo.
    pub logo: Option<String>,
    /// Storage key of the header image.
    pub header_image: Option<String>,
    /// Instagram handle.
    pub insta_handle: String,
    /// Values the brand identifies with.
    pub values: Vec<ValueEnum>,
    /// Product categories.
    pub categories: Vec<CategoryEnum>,
    /// Owning auth user.
    pub auth_user_id: String,
}

/// An influencer account, one per auth user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
pub struct Influencer {
    /// Resource id.
    pub id: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Website URL.
    pub website: String,
    /// Free text biography.
    pub bio: String,
    /// Storage key of the profile image.
    pub image: Option<String>,
    /// Postal address.
    pub address: String,
    /// Instagram handle.
    pub insta_handle: String,
    /// Values the influencer identifies with.
    pub values: Vec<ValueEnum>,
    /// Content categories.
    pub categories: Vec<CategoryEnum>,
    /// Owning auth user.
    pub auth_user_id: String,
}

/// A campaign run by a brand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct Campaign {
    pub id: String,
    pub created: DateTime<Utc>,
    /// Owning brand.
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

/// A message from one auth user to another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct Notification {
    pub id: String,
    pub created: DateTime<Utc>,
    pub sender_id: String,
    pub receiver_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
}

/// Share of an influencer's audience within an age bracket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
pub struct AudienceAge {
    /// Resource id.
    pub id: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Inclusive lower bound.
    pub min_age: i64,
    /// Inclusive upper bound, `None` for the open-ended bracket.
    pub max_age: Option<i64>,
    /// Share in `[0, 1]`.
    pub split: f64,
}

/// All age brackets of one influencer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
pub struct AudienceAgeSplit {
    /// The brackets.
    pub audience_ages: Vec<AudienceAge>,
}

/// Share of an influencer's audience of one gender.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
pub struct AudienceGender {
    /// Resource id.
    pub id: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// The gender bucket.
    pub gender: GenderEnum,
    /// Share in `[0, 1]`.
    pub split: f64,
}

/// All gender buckets of one influencer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Describe)]
pub struct AudienceGenderSplit {
    /// The buckets.
    pub audience_genders: Vec<AudienceGender>,
}

/// Profile attributes held by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Describe)]
#[allow(missing_docs)]
pub struct User {
    pub auth_user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
