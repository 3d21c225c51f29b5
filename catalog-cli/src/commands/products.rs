use crate::client::CatalogApi;
use crate::listing::{Listing, ListingKind, ListingView};
use crate::output::{OutputFormat, get_formatter, render_listing, render_value};
use crate::types::{FilterArgs, ProductOperation};
use anyhow::Result;

pub async fn handle_product_command(
    api: &dyn CatalogApi,
    operation: &ProductOperation,
) -> Result<()> {
    match operation {
        ProductOperation::List {
            filters,
            page,
            output,
        } => {
            handle_product_list(api, filters, *page as usize, output.output)
                .await
        }
        ProductOperation::Browse { filters } => {
            let listing = catalog_listing(filters, 1);
            super::browse_stdin(api, listing).await
        }
        ProductOperation::Show { id, output } => {
            handle_product_show(api, *id, output.output).await
        }
    }
}

/// Catalog listing positioned on a 1-based page with the given filters.
pub fn catalog_listing(filters: &FilterArgs, page: usize) -> Listing {
    let mut listing = Listing::catalog();
    listing.set_filters(filters.form());
    if let Some(creator) = filters.creator {
        listing.set_creator(creator);
    }
    listing.seek(page.saturating_sub(1));
    listing
}

async fn handle_product_list(
    api: &dyn CatalogApi,
    filters: &FilterArgs,
    page: usize,
    format: OutputFormat,
) -> Result<()> {
    let mut listing = catalog_listing(filters, page);
    let view = listing.load(api).await;
    print_view(&view, ListingKind::Catalog, format)
}

async fn handle_product_show(
    api: &dyn CatalogApi,
    id: i64,
    format: OutputFormat,
) -> Result<()> {
    let product = api.get_product(id).await?;
    let text = match format {
        OutputFormat::Text | OutputFormat::Table => {
            get_formatter(format, ListingKind::Catalog).format(&[product])?
        }
        _ => render_value(&product, format)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

/// Prints a listing view; a failed load becomes the command's error.
pub(crate) fn print_view(
    view: &ListingView,
    kind: ListingKind,
    format: OutputFormat,
) -> Result<()> {
    if let ListingView::Failed(message) = view {
        return Err(anyhow::anyhow!(message.clone()));
    }
    if let Some(text) = render_listing(view, kind, format)? {
        println!("{text}");
    }
    Ok(())
}
