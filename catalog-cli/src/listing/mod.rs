//! Product listings: the public catalog and the signed-in user's own
//! products. Each listing owns its cursor and filters; the two never share
//! state.

mod cursor;
mod filter;

pub use cursor::*;
pub use filter::*;

use crate::client::{CatalogApi, ClientError, QueryParams};
use catalog_models::Product;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    /// All products, narrowed by the user's filters.
    Catalog,
    /// Products created by the current user.
    Owned,
}

impl ListingKind {
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Catalog => "No products found matching your criteria.",
            Self::Owned => "You haven't added any products yet.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Catalog => {
                "Failed to load products. Please try again later."
            }
            Self::Owned => {
                "Failed to load your products. Please try again later."
            }
        }
    }
}

/// What a load produced for the list area.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    Page { products: Vec<Product>, nav: PageNav },
    /// The service answered with something other than a list; the previous
    /// view stays as it was.
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Listing {
    kind: ListingKind,
    cursor: PageCursor,
    filters: FilterSet,
    form: FilterForm,
}

impl Listing {
    pub fn new(kind: ListingKind) -> Self {
        Self {
            kind,
            cursor: PageCursor::default(),
            filters: FilterSet::default(),
            form: FilterForm::default(),
        }
    }

    pub fn catalog() -> Self {
        Self::new(ListingKind::Catalog)
    }

    pub fn owned() -> Self {
        Self::new(ListingKind::Owned)
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Filter inputs as they should currently be displayed.
    pub fn filter_form(&self) -> &FilterForm {
        &self.form
    }

    /// Jumps to a page without reloading.
    pub fn seek(&mut self, page_index: usize) {
        self.cursor.page_index = page_index;
    }

    pub fn step(&mut self, direction: PageDirection) {
        self.cursor.step(direction);
    }

    /// Replaces the whole filter set and rewinds to the first page.
    pub fn set_filters(&mut self, form: FilterForm) {
        self.cursor.reset();
        self.filters = FilterSet::from_form(&form);
        self.form = form;
    }

    /// Narrows to one creator, leaving the other filters in place while
    /// blanking their inputs.
    pub fn set_creator(&mut self, creator_id: i64) {
        self.cursor.reset();
        self.filters.creator_id = Some(creator_id);
        self.form.clear_scope_inputs();
    }

    /// Query for the current page.
    pub fn query(&self) -> QueryParams {
        let mut params: QueryParams = vec![
            ("skip", self.cursor.skip().to_string()),
            ("limit", self.cursor.page_size.to_string()),
        ];
        params.extend(self.filters.query_pairs());
        params
    }

    pub async fn load(&mut self, api: &dyn CatalogApi) -> ListingView {
        match self.fetch(api).await {
            Ok(Some(products)) => {
                self.cursor.record_batch(products.len());
                ListingView::Page {
                    products,
                    nav: self.cursor.nav(),
                }
            }
            Ok(None) => {
                debug!("listing response was not an array; ignoring");
                ListingView::Unchanged
            }
            Err(e) => {
                error!("Error loading products: {e}");
                ListingView::Failed(self.kind.failure_message().to_string())
            }
        }
    }

    async fn fetch(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<Option<Vec<Product>>, ClientError> {
        if self.kind == ListingKind::Owned {
            let user = api.current_user().await?;
            self.filters = FilterSet {
                creator_id: Some(user.id),
                ..Default::default()
            };
        }
        api.list_products(&self.query()).await
    }

    pub async fn change_page(
        &mut self,
        api: &dyn CatalogApi,
        direction: PageDirection,
    ) -> ListingView {
        self.step(direction);
        self.load(api).await
    }

    pub async fn apply_filters(
        &mut self,
        api: &dyn CatalogApi,
        form: FilterForm,
    ) -> ListingView {
        self.set_filters(form);
        self.load(api).await
    }

    pub async fn filter_by_creator(
        &mut self,
        api: &dyn CatalogApi,
        creator_id: i64,
    ) -> ListingView {
        self.set_creator(creator_id);
        self.load(api).await
    }
}
