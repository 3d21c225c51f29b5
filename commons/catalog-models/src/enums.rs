use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing sort key understood by `GET /products`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortBy {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "ingredient")]
    Ingredient,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "therapeutic_area")]
    TherapeuticArea,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ingredient => "ingredient",
            Self::Date => "date",
            Self::TherapeuticArea => "therapeutic_area",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
