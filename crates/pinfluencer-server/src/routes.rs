//! The route table.
//!
//! Route keys are `"<METHOD> <path template>"`, the form the gateway reports
//! in `routeKey`. The deployed table is compiled in from `routes.toml`:
//!
//! ```toml
//! [routes]
//! "GET /brands" = "get_all_brands"
//! "GET /feed" = "not_implemented"
//! ```
//!
//! Keys are matched exactly; path parameters are already resolved by the
//! gateway and arrive in `pathParameters`.

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::sequences::SequenceKind;

const DEPLOYED_ROUTES: &str = include_str!("../routes.toml");

/// Errors raised while loading a route table.
#[derive(Debug, Error)]
pub enum RouteTableError {
    /// The document is not valid TOML or names an unknown sequence.
    #[error("invalid route table: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key is not of the form `<METHOD> /<path>`.
    #[error("invalid route key `{0}`: expected `<METHOD> /<path>`")]
    InvalidKey(String),
}

/// Route key to sequence, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTable {
    routes: IndexMap<String, SequenceKind>,
}

impl RouteTable {
    /// The table of the deployed API.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiled-in table is malformed.
    pub fn deployed() -> Result<Self, RouteTableError> {
        Self::parse(DEPLOYED_ROUTES)
    }

    /// Parses a table from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML, an unknown sequence name, or a
    /// malformed route key.
    pub fn parse(source: &str) -> Result<Self, RouteTableError> {
        let table: Self = toml::from_str(source)?;
        if let Some(key) = table.routes.keys().find(|key| !is_route_key(key)) {
            return Err(RouteTableError::InvalidKey(key.clone()));
        }
        Ok(table)
    }

    /// The sequence a route key is bound to.
    #[must_use]
    pub fn get(&self, route_key: &str) -> Option<SequenceKind> {
        self.routes.get(route_key).copied()
    }

    /// Iterates over `(route key, sequence)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SequenceKind)> {
        self.routes.iter().map(|(key, kind)| (key.as_str(), *kind))
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn is_route_key(key: &str) -> bool {
    key.split_once(' ').is_some_and(|(method, path)| {
        method.parse::<Method>().is_ok()
            && method.chars().all(|c| c.is_ascii_uppercase())
            && path.starts_with('/')
            && !path.contains(' ')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployed_table_loads() {
        let table = RouteTable::deployed().unwrap();

        assert!(!table.is_empty());
        assert_eq!(table.get("POST /brands/me"), Some(SequenceKind::CreateBrand));
        assert_eq!(
            table.get("PATCH /brands/me/campaigns/{campaign_id}"),
            Some(SequenceKind::UpdateCampaign)
        );
        assert_eq!(table.get("GET /feed"), Some(SequenceKind::NotImplemented));
        assert_eq!(table.get("GET /unknown"), None);
    }

    #[test]
    fn test_deployed_table_covers_every_sequence() {
        let table = RouteTable::deployed().unwrap();
        let bound: Vec<SequenceKind> = table.iter().map(|(_, kind)| kind).collect();

        for kind in [
            SequenceKind::GetAllInfluencers,
            SequenceKind::UpdateInfluencerImage,
            SequenceKind::GetCampaignsForBrand,
            SequenceKind::CreateNotification,
            SequenceKind::GetNotificationById,
            SequenceKind::UpdateAudienceAge,
            SequenceKind::GetAudienceGender,
        ] {
            assert!(bound.contains(&kind), "{kind:?} is not routed");
        }
    }

    #[test]
    fn test_declaration_order_kept() {
        let table = RouteTable::parse(
            r#"
            [routes]
            "GET /b" = "not_implemented"
            "GET /a" = "get_all_brands"
            "#,
        )
        .unwrap();

        let keys: Vec<&str> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["GET /b", "GET /a"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_sequence_rejected() {
        let result = RouteTable::parse("[routes]\n\"GET /a\" = \"get_everything\"\n");
        assert!(matches!(result, Err(RouteTableError::Parse(_))));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = RouteTable::parse("[routes]\n[extra]\nkey = 1\n");
        assert!(matches!(result, Err(RouteTableError::Parse(_))));
    }

    #[test]
    fn test_malformed_keys_rejected() {
        for key in ["/brands", "get /brands", "GET brands", "GET /a b"] {
            let source = format!("[routes]\n\"{key}\" = \"not_implemented\"\n");
            assert!(
                matches!(RouteTable::parse(&source), Err(RouteTableError::InvalidKey(_))),
                "{key} accepted"
            );
        }
    }
}
