//! Instruction text for the generation service.
//!
//! Each operation maps to one deterministic instruction: the same operation
//! and parameters always produce byte-identical text.

mod background;
mod jersey;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::types::{JerseyType, NegativeConstraintSet};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PromptOperation {
    /// Dress the player (first image) in the jersey (second image)
    JerseySwap {
        jersey_type: JerseyType,
        #[serde(default)]
        negative_constraints: NegativeConstraintSet,
    },
    /// Composite the player (first image) into a new scene (second image)
    BackgroundReplace,
}

impl PromptOperation {
    /// Get the JSON schema for all operations
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PromptOperation)
    }

    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::JerseySwap { .. } => "Replace the jersey worn by the player with the supplied design",
            Self::BackgroundReplace => "Extract the player and composite them into a new background scene",
        }
    }

    /// Roles of the images that must accompany the instruction, in order.
    pub fn image_roles(&self) -> [&'static str; 2] {
        match self {
            Self::JerseySwap { .. } => ["player", "jersey"],
            Self::BackgroundReplace => ["player", "background"],
        }
    }

    /// Build the instruction text.
    pub fn build(&self) -> String {
        match self {
            Self::JerseySwap {
                jersey_type,
                negative_constraints,
            } => jersey::build(*jersey_type, negative_constraints),
            Self::BackgroundReplace => background::build(),
        }
    }
}
