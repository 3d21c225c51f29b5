use catalog_models::{SortBy, SortOrder};

/// Active filter parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub therapeutic_area_id: Option<i64>,
    pub region_id: Option<i64>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
    pub creator_id: Option<i64>,
}

impl FilterSet {
    /// Builds the set from the filter inputs. Search text is trimmed and
    /// dropped when blank.
    pub fn from_form(form: &FilterForm) -> Self {
        let search = form.search.trim();
        Self {
            therapeutic_area_id: form.therapeutic_area_id,
            region_id: form.region_id,
            sort_by: form.sort_by,
            sort_order: form.sort_order,
            search: (!search.is_empty()).then(|| search.to_string()),
            creator_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query pairs for the set keys that carry a value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.therapeutic_area_id {
            pairs.push(("therapeutic_area_id", id.to_string()));
        }
        if let Some(id) = self.region_id {
            pairs.push(("region_id", id.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order", order.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty())
        {
            pairs.push(("search", search.to_string()));
        }
        if let Some(id) = self.creator_id {
            pairs.push(("creator_id", id.to_string()));
        }
        pairs
    }
}

/// Raw values of the filter inputs, as the user last left them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search: String,
    pub therapeutic_area_id: Option<i64>,
    pub region_id: Option<i64>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl FilterForm {
    /// Blanks the search, area and region inputs. Sorting is kept.
    pub fn clear_scope_inputs(&mut self) {
        self.search.clear();
        self.therapeutic_area_id = None;
        self.region_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_not_sent() {
        let form = FilterForm {
            search: "   ".into(),
            ..Default::default()
        };
        let filters = FilterSet::from_form(&form);
        assert!(filters.is_empty());
        assert!(filters.query_pairs().is_empty());
    }

    #[test]
    fn pairs_follow_fixed_key_order() {
        let filters = FilterSet {
            therapeutic_area_id: Some(2),
            region_id: Some(5),
            sort_by: Some(SortBy::TherapeuticArea),
            sort_order: Some(SortOrder::Desc),
            search: Some("aspirin".into()),
            creator_id: Some(9),
        };
        let keys: Vec<_> =
            filters.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "therapeutic_area_id",
                "region_id",
                "sort_by",
                "sort_order",
                "search",
                "creator_id"
            ]
        );
        assert!(
            filters
                .query_pairs()
                .contains(&("sort_by", "therapeutic_area".to_string()))
        );
    }

    #[test]
    fn search_is_trimmed() {
        let form = FilterForm {
            search: "  aspirin  ".into(),
            ..Default::default()
        };
        assert_eq!(
            FilterSet::from_form(&form).search.as_deref(),
            Some("aspirin")
        );
    }
}
