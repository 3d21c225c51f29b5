//! Create/edit/delete flow for the signed-in user's products.

use crate::client::CatalogApi;
use crate::listing::{Listing, ListingView};
use catalog_models::{Product, ProductPayload, Region, TherapeuticArea};
use tracing::error;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";
pub const SAVE_FAILED: &str = "Failed to save product. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load product. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete product. Please try again.";

/// Interactive yes/no gate.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt with the same value.
pub struct AssumeAnswer(pub bool);

impl Confirm for AssumeAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionChoice {
    pub region: Region,
    pub checked: bool,
}

/// Values of the product form, including the region checkboxes offered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub product_id: Option<i64>,
    pub name: String,
    pub ingredient: String,
    pub therapeutic_area_id: Option<i64>,
    pub description: String,
    pub regions: Vec<RegionChoice>,
    pub mode: FormMode,
    pub visible: bool,
}

impl ProductForm {
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            regions: regions
                .into_iter()
                .map(|region| RegionChoice {
                    region,
                    checked: false,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Product",
            FormMode::Edit => "Edit Product",
        }
    }

    /// Clears every field and shows the form for a new product.
    pub fn open_blank(&mut self) {
        let regions = std::mem::take(&mut self.regions);
        *self = Self {
            regions,
            visible: true,
            ..Default::default()
        };
        self.check_regions(&[]);
    }

    pub fn populate(&mut self, product: &Product) {
        self.product_id = Some(product.id);
        self.name = product.name.clone();
        self.ingredient = product.ingredient.clone();
        self.therapeutic_area_id = Some(
            product
                .therapeutic_area_id
                .unwrap_or(product.therapeutic_area.id),
        );
        self.description = product.description.clone();
        self.check_regions(&product.region_ids());
    }

    /// Checks exactly the offered regions whose id is listed.
    pub fn check_regions(&mut self, ids: &[i64]) {
        for choice in &mut self.regions {
            choice.checked = ids.contains(&choice.region.id);
        }
    }

    pub fn checked_region_ids(&self) -> Vec<i64> {
        self.regions
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.region.id)
            .collect()
    }

    pub fn payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            ingredient: self.ingredient.clone(),
            therapeutic_area_id: self.therapeutic_area_id,
            description: self.description.clone(),
            region_ids: self.checked_region_ids(),
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// The write succeeded; carries the reloaded owner listing.
    Reloaded(ListingView),
    /// The form is showing a product for editing.
    Editing,
    Declined,
    /// Blocking message for the user.
    Alert(String),
}

/// Creates or updates depending on whether the form holds a product id,
/// then reloads the owner listing at its current page.
pub async fn save_product(
    api: &dyn CatalogApi,
    form: &mut ProductForm,
    listing: &mut Listing,
) -> FormOutcome {
    let payload = form.payload();
    let result = match form.product_id {
        Some(id) => api.update_product(id, &payload).await,
        None => api.create_product(&payload).await,
    };

    match result {
        Ok(_) => {
            form.hide();
            FormOutcome::Reloaded(listing.load(api).await)
        }
        Err(e) => {
            error!("Error saving product: {e}");
            FormOutcome::Alert(SAVE_FAILED.to_string())
        }
    }
}

pub async fn edit_product(
    api: &dyn CatalogApi,
    form: &mut ProductForm,
    id: i64,
) -> FormOutcome {
    match api.get_product(id).await {
        Ok(product) => {
            form.populate(&product);
            form.mode = FormMode::Edit;
            form.visible = true;
            FormOutcome::Editing
        }
        Err(e) => {
            error!("Error loading product for edit: {e}");
            FormOutcome::Alert(LOAD_FAILED.to_string())
        }
    }
}

pub async fn delete_product(
    api: &dyn CatalogApi,
    id: i64,
    confirm: &dyn Confirm,
    listing: &mut Listing,
) -> FormOutcome {
    if !confirm.confirm(DELETE_PROMPT) {
        return FormOutcome::Declined;
    }

    match api.delete_product(id).await {
        Ok(()) => FormOutcome::Reloaded(listing.load(api).await),
        Err(e) => {
            error!("Error deleting product: {e}");
            FormOutcome::Alert(DELETE_FAILED.to_string())
        }
    }
}

/// Choices for the area and region inputs. A failed lookup leaves that
/// list empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormOptions {
    pub areas: Vec<TherapeuticArea>,
    pub regions: Vec<Region>,
}

impl FormOptions {
    pub async fn load(api: &dyn CatalogApi) -> Self {
        let areas = api.therapeutic_areas().await.unwrap_or_else(|e| {
            error!("Error loading therapeutic areas: {e}");
            Vec::new()
        });
        let regions = api.regions().await.unwrap_or_else(|e| {
            error!("Error loading regions: {e}");
            Vec::new()
        });
        Self { areas, regions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, product};
    use std::cell::Cell;

    struct Recorder {
        answer: bool,
        asked: Cell<usize>,
    }

    impl Confirm for Recorder {
        fn confirm(&self, prompt: &str) -> bool {
            assert_eq!(prompt, DELETE_PROMPT);
            self.asked.set(self.asked.get() + 1);
            self.answer
        }
    }

    fn regions() -> Vec<Region> {
        [(2, "EU"), (3, "US"), (5, "APAC")]
            .into_iter()
            .map(|(id, name)| Region {
                id,
                name: name.into(),
            })
            .collect()
    }

    fn owner_api() -> FakeApi {
        let mut existing = product(5, 4);
        existing.regions = vec![regions()[0].clone(), regions()[2].clone()];
        FakeApi {
            products: vec![existing],
            ..FakeApi::with_user(4)
        }
    }

    #[tokio::test]
    async fn edit_then_save_round_trips_fields() {
        let api = owner_api();
        let mut form = ProductForm::new(regions());
        let mut listing = Listing::owned();

        assert_eq!(edit_product(&api, &mut form, 5).await, FormOutcome::Editing);
        assert!(form.visible);
        assert_eq!(form.title(), "Edit Product");
        assert_eq!(form.checked_region_ids(), vec![2, 5]);

        let outcome = save_product(&api, &mut form, &mut listing).await;
        assert!(matches!(outcome, FormOutcome::Reloaded(ListingView::Page { .. })));
        assert!(!form.visible);

        let expected = api.products[0].editable_fields();
        assert!(api.calls().contains(&Call::Update(5, expected)));
    }

    #[tokio::test]
    async fn save_without_id_creates() {
        let api = FakeApi::with_user(4);
        let mut form = ProductForm::new(regions());
        form.open_blank();
        form.name = "New".into();
        form.therapeutic_area_id = Some(1);
        form.check_regions(&[3]);
        let mut listing = Listing::owned();
        listing.seek(2);

        save_product(&api, &mut form, &mut listing).await;

        let calls = api.calls();
        let Call::Create(payload) = &calls[0] else {
            panic!("expected create, got {calls:?}");
        };
        assert_eq!(payload.region_ids, vec![3]);
        assert_eq!(listing.cursor().page_index, 2);
    }

    #[tokio::test]
    async fn save_failure_alerts_and_keeps_form() {
        let api = FakeApi {
            write_error: Some((403, "Not authorized".into())),
            ..FakeApi::with_user(4)
        };
        let mut form = ProductForm::new(regions());
        form.open_blank();
        let mut listing = Listing::owned();

        let outcome = save_product(&api, &mut form, &mut listing).await;
        assert_eq!(outcome, FormOutcome::Alert(SAVE_FAILED.into()));
        assert!(form.visible);
        assert!(api.list_queries().is_empty());
    }

    #[tokio::test]
    async fn edit_failure_leaves_form_hidden() {
        let api = owner_api();
        let mut form = ProductForm::new(regions());

        let outcome = edit_product(&api, &mut form, 404).await;
        assert_eq!(outcome, FormOutcome::Alert(LOAD_FAILED.into()));
        assert!(!form.visible);
    }

    #[tokio::test]
    async fn declined_delete_issues_nothing() {
        let api = owner_api();
        let mut listing = Listing::owned();
        listing.seek(1);
        let before = *listing.cursor();
        let confirm = Recorder {
            answer: false,
            asked: Cell::new(0),
        };

        let outcome = delete_product(&api, 5, &confirm, &mut listing).await;
        assert_eq!(outcome, FormOutcome::Declined);
        assert_eq!(confirm.asked.get(), 1);
        assert!(api.calls().is_empty());
        assert_eq!(*listing.cursor(), before);
    }

    #[tokio::test]
    async fn confirmed_delete_reloads_owner_listing() {
        let api = owner_api();
        let mut listing = Listing::owned();

        let outcome =
            delete_product(&api, 5, &AssumeAnswer(true), &mut listing).await;
        assert!(matches!(outcome, FormOutcome::Reloaded(_)));
        let calls = api.calls();
        assert_eq!(calls[0], Call::Delete(5));
        assert_eq!(calls[1], Call::CurrentUser);
    }

    #[tokio::test]
    async fn failed_delete_alerts() {
        let api = FakeApi {
            write_error: Some((404, "Product not found".into())),
            ..owner_api()
        };
        let mut listing = Listing::owned();
        let outcome =
            delete_product(&api, 5, &AssumeAnswer(true), &mut listing).await;
        assert_eq!(outcome, FormOutcome::Alert(DELETE_FAILED.into()));
    }

    #[tokio::test]
    async fn option_lookup_failures_leave_lists_empty() {
        let api = FakeApi {
            areas: vec![TherapeuticArea {
                id: 1,
                name: "Analgesics".into(),
            }],
            regions: regions(),
            reference_error: Some((500, "boom".into())),
            ..Default::default()
        };

        let options = FormOptions::load(&api).await;
        assert_eq!(options, FormOptions::default());
        assert_eq!(api.calls(), vec![Call::Areas, Call::Regions]);
    }

    #[tokio::test]
    async fn option_lookup_returns_both_lists() {
        let api = FakeApi {
            regions: regions(),
            ..Default::default()
        };

        let options = FormOptions::load(&api).await;
        assert!(options.areas.is_empty());
        assert_eq!(options.regions, regions());
    }

    #[test]
    fn open_blank_resets_previous_edit() {
        let mut form = ProductForm::new(regions());
        form.populate(&product(5, 4));
        form.mode = FormMode::Edit;

        form.open_blank();
        assert_eq!(form.product_id, None);
        assert_eq!(form.title(), "Add Product");
        assert_eq!(form.regions.len(), 3);
        assert!(form.checked_region_ids().is_empty());
    }
}
