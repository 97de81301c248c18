//! Enumerated tags carried by domain records.
//!
//! Every enum travels on the wire as its upper-case variant name, e.g.
//! `"VALUE1"` or `"ACTIVE"`.

use pinfluencer_core::schema::Describe;
use serde::{Deserialize, Serialize};

/// Brand and influencer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Describe)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum ValueEnum {
    #[default]
    Value1,
    Value2,
    Value3,
    Value4,
    Value5,
    Value6,
    Value7,
    Value8,
    Value9,
}

/// Brand, influencer and campaign categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Describe)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum CategoryEnum {
    #[default]
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
    Category6,
    Category7,
    Category8,
    Category9,
}

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Describe)]
#[serde(rename_all = "UPPERCASE")]
pub enum CampaignStateEnum {
    /// Not yet visible to influencers.
    #[default]
    Draft,
    /// Open for collaborations.
    Active,
    /// Temporarily closed.
    Paused,
    /// Finished.
    Closed,
}

/// Audience gender buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Describe)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum GenderEnum {
    #[default]
    Male,
    Female,
}
