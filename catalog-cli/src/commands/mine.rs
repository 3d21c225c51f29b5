use super::{print_view, read_answer};
use crate::client::CatalogApi;
use crate::form::{
    AssumeAnswer, DELETE_PROMPT, FormOptions, FormOutcome, ProductForm,
    delete_product, edit_product, save_product,
};
use crate::listing::{Listing, ListingKind};
use crate::output::OutputFormat;
use crate::types::{MineOperation, ProductFieldOverrides, ProductFields};
use anyhow::Result;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::warn;

/// Asks the delete question; anything but `y`/`yes` declines.
pub(crate) async fn ask_delete<R>(input: &mut R) -> Result<AssumeAnswer>
where
    R: AsyncBufRead + Unpin,
{
    let answer = read_answer(&format!("{DELETE_PROMPT} [y/N] "), input).await?;
    Ok(AssumeAnswer(is_yes(&answer)))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub async fn handle_mine_command(
    api: &dyn CatalogApi,
    operation: &MineOperation,
) -> Result<()> {
    match operation {
        MineOperation::List { page, output } => {
            let mut listing = Listing::owned();
            listing.seek(page.saturating_sub(1) as usize);
            let view = listing.load(api).await;
            print_view(&view, ListingKind::Owned, output.output)
        }
        MineOperation::Browse => {
            super::browse_stdin(api, Listing::owned()).await
        }
        MineOperation::Create { fields } => {
            handle_mine_create(api, fields).await
        }
        MineOperation::Edit { id, fields } => {
            handle_mine_edit(api, *id, fields).await
        }
        MineOperation::Delete { id, yes } => {
            let confirm = if *yes {
                AssumeAnswer(true)
            } else {
                ask_delete(&mut BufReader::new(tokio::io::stdin())).await?
            };
            let mut listing = Listing::owned();
            let outcome =
                delete_product(api, *id, &confirm, &mut listing).await;
            report(outcome)
        }
    }
}

pub async fn handle_mine_create(
    api: &dyn CatalogApi,
    fields: &ProductFields,
) -> Result<()> {
    let options = FormOptions::load(api).await;
    let mut form = ProductForm::new(options.regions);
    form.open_blank();
    form.name = fields.name.clone();
    form.ingredient = fields.ingredient.clone();
    form.therapeutic_area_id = fields.area;
    form.description = fields.description.clone();
    select_regions(&mut form, &fields.regions);

    let mut listing = Listing::owned();
    report(save_product(api, &mut form, &mut listing).await)
}

pub async fn handle_mine_edit(
    api: &dyn CatalogApi,
    id: i64,
    fields: &ProductFieldOverrides,
) -> Result<()> {
    let options = FormOptions::load(api).await;
    if options.regions.is_empty() {
        warn!("no regions available; saving will clear the product's regions");
    }
    let mut form = ProductForm::new(options.regions);
    if let FormOutcome::Alert(message) = edit_product(api, &mut form, id).await
    {
        return Err(anyhow::anyhow!(message));
    }

    if let Some(name) = &fields.name {
        form.name = name.clone();
    }
    if let Some(ingredient) = &fields.ingredient {
        form.ingredient = ingredient.clone();
    }
    if let Some(area) = fields.area {
        form.therapeutic_area_id = Some(area);
    }
    if let Some(description) = &fields.description {
        form.description = description.clone();
    }
    if !fields.regions.is_empty() {
        select_regions(&mut form, &fields.regions);
    }

    let mut listing = Listing::owned();
    report(save_product(api, &mut form, &mut listing).await)
}

fn select_regions(form: &mut ProductForm, ids: &[i64]) {
    form.check_regions(ids);
    let checked = form.checked_region_ids();
    for id in ids.iter().filter(|id| !checked.contains(id)) {
        warn!("region {id} is not offered by the service; ignoring");
    }
}

fn report(outcome: FormOutcome) -> Result<()> {
    match outcome {
        FormOutcome::Reloaded(view) => {
            print_view(&view, ListingKind::Owned, OutputFormat::Text)
        }
        FormOutcome::Editing => Ok(()),
        FormOutcome::Declined => {
            println!("Cancelled.");
            Ok(())
        }
        FormOutcome::Alert(message) => Err(anyhow::anyhow!(message)),
    }
}
