use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Relational semantics applied when matching the two inputs.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    #[default]
    #[serde(alias = "EQUI_INNER")]
    Inner,
    #[serde(alias = "EQUI_LEFT")]
    LeftOuter,
    #[serde(alias = "EQUI_RIGHT")]
    RightOuter,
    #[serde(alias = "EQUI_FULL")]
    FullOuter,
    Semi,
    AntiSemi,
}

impl JoinType {
    /// The join type to use once the left and right inputs trade places. Semi and anti joins
    /// only emit rows of their left input, so they have none.
    pub fn commute(self) -> Option<JoinType> {
        match self {
            JoinType::Inner => Some(JoinType::Inner),
            JoinType::LeftOuter => Some(JoinType::RightOuter),
            JoinType::RightOuter => Some(JoinType::LeftOuter),
            JoinType::FullOuter => Some(JoinType::FullOuter),
            JoinType::Semi | JoinType::AntiSemi => None,
        }
    }

    /// Whether left rows without a match are emitted, null-padded on the right.
    pub fn preserves_left(self) -> bool {
        matches!(self, JoinType::LeftOuter | JoinType::FullOuter)
    }

    /// Whether right rows without a match are emitted, null-padded on the left.
    pub fn preserves_right(self) -> bool {
        matches!(self, JoinType::RightOuter | JoinType::FullOuter)
    }
}

impl Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Which input the executor materializes into its key-indexed table. The other input is
/// streamed against it. Also known as the join endian.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildSide {
    #[serde(alias = "SMALL_LEFT")]
    Left,
    #[default]
    #[serde(alias = "LARGE_LEFT")]
    Right,
}

impl BuildSide {
    pub fn other(self) -> BuildSide {
        match self {
            BuildSide::Left => BuildSide::Right,
            BuildSide::Right => BuildSide::Left,
        }
    }
}

impl Display for BuildSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commute_swaps_outer_sides() {
        assert_eq!(JoinType::LeftOuter.commute(), Some(JoinType::RightOuter));
        assert_eq!(JoinType::RightOuter.commute(), Some(JoinType::LeftOuter));
        assert_eq!(JoinType::FullOuter.commute(), Some(JoinType::FullOuter));
        assert_eq!(JoinType::Inner.commute(), Some(JoinType::Inner));
    }

    #[test]
    fn semi_joins_do_not_commute() {
        assert_eq!(JoinType::Semi.commute(), None);
        assert_eq!(JoinType::AntiSemi.commute(), None);
    }

    #[test]
    fn preserved_sides() {
        assert!(JoinType::LeftOuter.preserves_left());
        assert!(!JoinType::LeftOuter.preserves_right());
        assert!(JoinType::FullOuter.preserves_left() && JoinType::FullOuter.preserves_right());
        assert!(!JoinType::Inner.preserves_left() && !JoinType::Inner.preserves_right());
        assert!(!JoinType::AntiSemi.preserves_left());
    }

    #[test]
    fn wire_names() {
        assert_eq!(
            serde_json::to_string(&JoinType::LeftOuter).unwrap(),
            "\"LEFT_OUTER\""
        );
        assert_eq!(
            serde_json::to_string(&JoinType::AntiSemi).unwrap(),
            "\"ANTI_SEMI\""
        );
        assert_eq!(serde_json::to_string(&BuildSide::Right).unwrap(), "\"RIGHT\"");
    }

    #[test]
    fn legacy_names_are_accepted() {
        let join_type: JoinType = serde_json::from_str("\"EQUI_FULL\"").unwrap();
        assert_eq!(join_type, JoinType::FullOuter);
        let side: BuildSide = serde_json::from_str("\"SMALL_LEFT\"").unwrap();
        assert_eq!(side, BuildSide::Left);
        let side: BuildSide = serde_json::from_str("\"LARGE_LEFT\"").unwrap();
        assert_eq!(side, BuildSide::Right);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(serde_json::from_str::<JoinType>("\"SIDEWAYS\"").is_err());
        assert!(serde_json::from_str::<BuildSide>("\"MIDDLE\"").is_err());
    }
}
