use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr, VariantNames};

use crate::error::{Result, SwapError};

/// Selects which fidelity clause the jersey swap instruction carries.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
pub enum JerseyType {
    /// A one-off design that must be copied literally
    #[default]
    #[serde(alias = "custom")]
    #[strum(to_string = "Custom Design", serialize = "custom", serialize = "custom_design")]
    CustomDesign,
    /// A real kit; the supplied image is the authoritative version
    #[serde(alias = "official")]
    #[strum(to_string = "Official Jersey", serialize = "official", serialize = "official_jersey")]
    OfficialJersey,
}

/// Canonical list of unwanted artifacts a user can steer away from.
///
/// Declaration order is the display order and the order used when the
/// selection is joined into an instruction.
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, PartialOrd, Ord, Hash
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NegativeConstraint {
    #[serde(rename = "rectangular patch")]
    #[strum(serialize = "rectangular patch")]
    RectangularPatch,
    #[serde(rename = "pasted image")]
    #[strum(serialize = "pasted image")]
    PastedImage,
    #[serde(rename = "incorrect logos")]
    #[strum(serialize = "incorrect logos")]
    IncorrectLogos,
    Blurry,
    #[serde(rename = "unrealistic lighting")]
    #[strum(serialize = "unrealistic lighting")]
    UnrealisticLighting,
    #[serde(rename = "flat texture")]
    #[strum(serialize = "flat texture")]
    FlatTexture,
    #[serde(rename = "wrong colors")]
    #[strum(serialize = "wrong colors")]
    WrongColors,
    Cartoonish,
}

impl NegativeConstraint {
    /// Parse the display text of a constraint.
    pub fn parse(text: &str) -> Result<Self> {
        text.trim()
            .to_lowercase()
            .parse()
            .map_err(|_| SwapError::UnknownConstraint(text.to_string()))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// The user's current selection of negative constraints.
///
/// Always a subset of [`NegativeConstraint`]'s variants, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct NegativeConstraintSet(BTreeSet<NegativeConstraint>);

impl NegativeConstraintSet {
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Toggle a constraint; returns whether it is selected afterwards.
    pub fn toggle(&mut self, constraint: NegativeConstraint) -> bool {
        if !self.0.remove(&constraint) {
            self.0.insert(constraint);
            true
        } else {
            false
        }
    }

    pub fn insert(&mut self, constraint: NegativeConstraint) -> bool {
        self.0.insert(constraint)
    }

    pub fn remove(&mut self, constraint: NegativeConstraint) -> bool {
        self.0.remove(&constraint)
    }

    pub fn contains(&self, constraint: NegativeConstraint) -> bool {
        self.0.contains(&constraint)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = NegativeConstraint> + '_ {
        self.0.iter().copied()
    }

    /// Comma-separated clause in canonical order.
    pub fn joined(&self) -> String {
        self.iter()
            .map(|c| <&'static str>::from(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for NegativeConstraintSet {
    fn default() -> Self {
        [
            NegativeConstraint::RectangularPatch,
            NegativeConstraint::PastedImage,
            NegativeConstraint::IncorrectLogos,
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<NegativeConstraint> for NegativeConstraintSet {
    fn from_iter<I: IntoIterator<Item = NegativeConstraint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
