//! Custom mapping rules between audience splits and their flat views.
//!
//! Splits are stored as one row per bracket; clients see one field per
//! bracket. Structural mapping cannot bridge the two shapes, so both
//! directions are registered as rules.

use pinfluencer_core::{MappingError, MappingRules, ObjectMapper};

use crate::enums::GenderEnum;
use crate::models::{AudienceAge, AudienceAgeSplit, AudienceGender, AudienceGenderSplit};
use crate::views::{AudienceAgeView, AudienceGenderView, AGE_BRACKETS};

/// Builds the rule set used by the process-wide mapper.
#[must_use]
pub fn mapping_rules() -> MappingRules {
    let mut rules = MappingRules::new();
    rules
        .add(age_split_to_view)
        .add(age_view_to_split)
        .add(gender_split_to_view)
        .add(gender_view_to_split);
    rules
}

fn age_split_to_view(
    split: AudienceAgeSplit,
    _: &ObjectMapper,
) -> Result<AudienceAgeView, MappingError> {
    let mut view = AudienceAgeView::default();
    for age in split.audience_ages {
        if let Some(slot) = view.slot_mut(age.min_age, age.max_age) {
            *slot = age.split;
        }
    }
    Ok(view)
}

fn age_view_to_split(
    view: AudienceAgeView,
    _: &ObjectMapper,
) -> Result<AudienceAgeSplit, MappingError> {
    let audience_ages = AGE_BRACKETS
        .iter()
        .zip(view.splits())
        .map(|(&(min_age, max_age), split)| AudienceAge {
            min_age,
            max_age,
            split,
            ..AudienceAge::default()
        })
        .collect();
    Ok(AudienceAgeSplit { audience_ages })
}

fn gender_split_to_view(
    split: AudienceGenderSplit,
    _: &ObjectMapper,
) -> Result<AudienceGenderView, MappingError> {
    let mut view = AudienceGenderView::default();
    for gender in split.audience_genders {
        match gender.gender {
            GenderEnum::Male => view.audience_male_split = gender.split,
            GenderEnum::Female => view.audience_female_split = gender.split,
        }
    }
    Ok(view)
}

fn gender_view_to_split(
    view: AudienceGenderView,
    _: &ObjectMapper,
) -> Result<AudienceGenderSplit, MappingError> {
    let audience_genders = [
        (GenderEnum::Male, view.audience_male_split),
        (GenderEnum::Female, view.audience_female_split),
    ]
    .into_iter()
    .map(|(gender, split)| AudienceGender {
        gender,
        split,
        ..AudienceGender::default()
    })
    .collect();
    Ok(AudienceGenderSplit { audience_genders })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn mapper() -> ObjectMapper {
        ObjectMapper::new(mapping_rules())
    }

    fn stored(age: AudienceAge) -> AudienceAge {
        AudienceAge {
            id: "test_id".to_string(),
            created: Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(),
            ..age
        }
    }

    fn age_split() -> AudienceAgeSplit {
        AudienceAgeSplit {
            audience_ages: AGE_BRACKETS
                .iter()
                .map(|&(min_age, max_age)| {
                    stored(AudienceAge {
                        min_age,
                        max_age,
                        split: 0.1,
                        ..AudienceAge::default()
                    })
                })
                .collect(),
        }
    }

    #[test]
    fn test_rules_registered() {
        let rules = mapping_rules();
        assert_eq!(rules.len(), 4);
        assert!(rules.contains::<AudienceAgeSplit, AudienceAgeView>());
        assert!(rules.contains::<AudienceGenderView, AudienceGenderSplit>());
    }

    #[test]
    fn test_age_split_to_view() {
        let view: AudienceAgeView = mapper().map(&age_split()).unwrap();
        assert_eq!(view.splits(), [0.1; 7]);
    }

    #[test]
    fn test_age_view_to_split() {
        let view = AudienceAgeView {
            audience_age_13_to_17_split: 0.5,
            audience_age_65_plus_split: 0.2,
            ..AudienceAgeView::default()
        };

        let split: AudienceAgeSplit = mapper().map(&view).unwrap();

        assert_eq!(split.audience_ages.len(), 7);
        assert_eq!(split.audience_ages[0].min_age, 13);
        assert_eq!(split.audience_ages[0].max_age, Some(17));
        assert!((split.audience_ages[0].split - 0.5).abs() < f64::EPSILON);
        assert_eq!(split.audience_ages[6].max_age, None);
        assert!((split.audience_ages[6].split - 0.2).abs() < f64::EPSILON);
        assert!(split.audience_ages.iter().all(|age| age.id.is_empty()));
    }

    #[test]
    fn test_unknown_bracket_ignored() {
        let split = AudienceAgeSplit {
            audience_ages: vec![AudienceAge {
                min_age: 30,
                max_age: Some(31),
                split: 0.9,
                ..AudienceAge::default()
            }],
        };
        let view: AudienceAgeView = mapper().map(&split).unwrap();
        assert_eq!(view, AudienceAgeView::default());
    }

    #[test]
    fn test_gender_round_trip() {
        let split = AudienceGenderSplit {
            audience_genders: vec![
                AudienceGender {
                    gender: GenderEnum::Male,
                    split: 0.3,
                    ..AudienceGender::default()
                },
                AudienceGender {
                    gender: GenderEnum::Female,
                    split: 0.7,
                    ..AudienceGender::default()
                },
            ],
        };

        let view: AudienceGenderView = mapper().map(&split).unwrap();
        assert!((view.audience_male_split - 0.3).abs() < f64::EPSILON);
        assert!((view.audience_female_split - 0.7).abs() < f64::EPSILON);

        let back: AudienceGenderSplit = mapper().map(&view).unwrap();
        assert_eq!(back, split);
    }

    #[test]
    fn test_view_from_request_body() {
        let body = serde_json::json!({
            "audience_male_split": 0.25,
            "audience_female_split": 0.75,
            "ignored": true
        });
        let view: AudienceGenderView = mapper().map_from_dict(&body).unwrap();
        let split: AudienceGenderSplit = mapper().map(&view).unwrap();
        assert_eq!(split.audience_genders[1].gender, GenderEnum::Female);
    }
}
