use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// Elemental category tag carried by creatures and moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ElementType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome class of a move's element against a defender's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    Super,
    Weak,
    Normal,
    Immune,
}

impl Effectiveness {
    /// Damage multiplier applied by the damage formula.
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::Super => 2.0,
            Effectiveness::Weak => 0.5,
            Effectiveness::Normal => 1.0,
            Effectiveness::Immune => 0.0,
        }
    }

    pub fn deals_damage(self) -> bool {
        self != Effectiveness::Immune
    }
}

/// The complete effectiveness table. Pairings not listed here are normal.
///
/// Rules are checked in order and the last one that matches wins, so a
/// water move against a fire/grass defender is weak, not super.
pub const EFFECTIVENESS_RULES: &[(ElementType, ElementType, Effectiveness)] = &[
    (ElementType::Water, ElementType::Fire, Effectiveness::Super),
    (ElementType::Fire, ElementType::Grass, Effectiveness::Super),
    (ElementType::Grass, ElementType::Water, Effectiveness::Super),
    (ElementType::Electric, ElementType::Water, Effectiveness::Super),
    (ElementType::Water, ElementType::Grass, Effectiveness::Weak),
    (ElementType::Fire, ElementType::Water, Effectiveness::Weak),
    (ElementType::Grass, ElementType::Fire, Effectiveness::Weak),
    (ElementType::Electric, ElementType::Ground, Effectiveness::Immune),
];

impl ElementType {
    /// Look up how a move of this element fares against a defender with the given elements.
    pub fn effectiveness_against(self, defending: &[ElementType]) -> Effectiveness {
        EFFECTIVENESS_RULES
            .iter()
            .filter(|(attacking, defender_type, _)| {
                *attacking == self && defending.contains(defender_type)
            })
            .map(|(_, _, effectiveness)| *effectiveness)
            .last()
            .unwrap_or(Effectiveness::Normal)
    }

    pub fn is_immune(attacking: ElementType, defending: &[ElementType]) -> bool {
        attacking.effectiveness_against(defending) == Effectiveness::Immune
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use ElementType::*;

    #[test]
    fn test_listed_pairings() {
        assert_eq!(Water.effectiveness_against(&[Fire]), Effectiveness::Super);
        assert_eq!(Fire.effectiveness_against(&[Grass]), Effectiveness::Super);
        assert_eq!(Grass.effectiveness_against(&[Water]), Effectiveness::Super);
        assert_eq!(Electric.effectiveness_against(&[Water]), Effectiveness::Super);
        assert_eq!(Water.effectiveness_against(&[Grass]), Effectiveness::Weak);
        assert_eq!(Fire.effectiveness_against(&[Water]), Effectiveness::Weak);
        assert_eq!(Grass.effectiveness_against(&[Fire]), Effectiveness::Weak);
        assert_eq!(Electric.effectiveness_against(&[Ground]), Effectiveness::Immune);
    }

    #[test]
    fn test_unlisted_pairings_are_normal() {
        // Real-world matchups that the table deliberately leaves out.
        assert_eq!(Normal.effectiveness_against(&[Ghost]), Effectiveness::Normal);
        assert_eq!(Fire.effectiveness_against(&[Fire]), Effectiveness::Normal);
        assert_eq!(Electric.effectiveness_against(&[Grass]), Effectiveness::Normal);
        assert_eq!(Grass.effectiveness_against(&[]), Effectiveness::Normal);
    }

    #[test]
    fn test_last_matching_rule_wins() {
        assert_eq!(Water.effectiveness_against(&[Fire, Grass]), Effectiveness::Weak);
        assert_eq!(Water.effectiveness_against(&[Grass, Fire]), Effectiveness::Weak);
        assert_eq!(Electric.effectiveness_against(&[Water, Ground]), Effectiveness::Immune);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(Effectiveness::Super.multiplier(), 2.0);
        assert_eq!(Effectiveness::Weak.multiplier(), 0.5);
        assert_eq!(Effectiveness::Normal.multiplier(), 1.0);
        assert_eq!(Effectiveness::Immune.multiplier(), 0.0);
        assert!(!Effectiveness::Immune.deals_damage());
    }

    #[test]
    fn test_parse_tags_case_insensitive() {
        assert_eq!(ElementType::from_str("electric"), Ok(Electric));
        assert_eq!(ElementType::from_str("Fire"), Ok(Fire));
        assert_eq!(ElementType::from_str("GRASS"), Ok(Grass));
        assert!(ElementType::from_str("shadow").is_err());
    }
}
