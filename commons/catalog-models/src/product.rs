use crate::user::User;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TherapeuticArea {
    pub id: i64,
    pub name: String,
}

/// Product as projected by the catalog service. The client never mutates
/// these directly; changes go through [`ProductPayload`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub ingredient: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therapeutic_area_id: Option<i64>,
    pub therapeutic_area: TherapeuticArea,
    #[serde(default)]
    pub regions: Vec<Region>,
    pub creation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<i64>,
    pub creator: User,
}

impl Product {
    pub fn region_ids(&self) -> Vec<i64> {
        self.regions.iter().map(|r| r.id).collect()
    }

    /// Creator id, falling back to the embedded creator record.
    pub fn owner_id(&self) -> i64 {
        self.creator_id.unwrap_or(self.creator.id)
    }

    /// The fields an owner can change, in request form.
    pub fn editable_fields(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            ingredient: self.ingredient.clone(),
            therapeutic_area_id: Some(
                self.therapeutic_area_id
                    .unwrap_or(self.therapeutic_area.id),
            ),
            description: self.description.clone(),
            region_ids: self.region_ids(),
        }
    }

    /// `creation_date` rendered as `dd.mm.yyyy HH:MM:SS`. Unparseable values
    /// are returned untouched.
    pub fn created_label(&self) -> String {
        let raw = self.creation_date.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return ts.format("%d.%m.%Y %H:%M:%S").to_string();
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        {
            return ts.format("%d.%m.%Y %H:%M:%S").to_string();
        }
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return day.format("%d.%m.%Y 00:00:00").to_string();
        }
        raw.to_string()
    }
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPayload {
    pub name: String,
    pub ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therapeutic_area_id: Option<i64>,
    pub description: String,
    pub region_ids: Vec<i64>,
}
