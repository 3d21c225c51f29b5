use crate::client::CatalogApi;
use crate::output::{OutputFormat, render_value};
use anyhow::Result;
use serde::Serialize;

pub async fn handle_areas_command(
    api: &dyn CatalogApi,
    format: OutputFormat,
) -> Result<()> {
    let areas = api.therapeutic_areas().await?;
    let rows: Vec<_> = areas.iter().map(|a| (a.id, a.name.as_str())).collect();
    print_reference(&areas, &rows, format)
}

pub async fn handle_regions_command(
    api: &dyn CatalogApi,
    format: OutputFormat,
) -> Result<()> {
    let regions = api.regions().await?;
    let rows: Vec<_> =
        regions.iter().map(|r| (r.id, r.name.as_str())).collect();
    print_reference(&regions, &rows, format)
}

fn print_reference<T: Serialize>(
    items: &[T],
    rows: &[(i64, &str)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", render_value(&items, format)?.trim_end());
        }
        OutputFormat::Text | OutputFormat::Table => {
            print!("{}", reference_lines(rows));
        }
    }
    Ok(())
}

/// `id  name` lines with the ids right-aligned.
pub(crate) fn reference_lines(rows: &[(i64, &str)]) -> String {
    if rows.is_empty() {
        return "No data available\n".to_string();
    }
    let width = rows
        .iter()
        .map(|(id, _)| id.to_string().len())
        .max()
        .unwrap_or(1);
    rows.iter()
        .map(|(id, name)| format!("{id:>width$}  {name}\n"))
        .collect()
}
