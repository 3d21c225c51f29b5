use crate::listing::{ListingKind, ListingView, PageNav};
use catalog_models::Product;
use serde::Serialize;
use std::fmt::Write;

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Product cards
    #[default]
    Text,
    Json,
    Yaml,
    Table,
}

/// Global output arguments that can be added to any command
#[derive(clap::Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output formatting interface
pub trait Formatter {
    fn format(&self, products: &[Product]) -> anyhow::Result<String>;
}

pub struct CardFormatter {
    pub kind: ListingKind,
}
pub struct JsonFormatter;
pub struct YamlFormatter;
pub struct TableFormatter;

impl Formatter for CardFormatter {
    fn format(&self, products: &[Product]) -> anyhow::Result<String> {
        if products.is_empty() {
            return Ok(self.kind.empty_message().to_string());
        }
        let cards: Vec<String> = products
            .iter()
            .map(|p| product_card(p, self.kind))
            .collect();
        Ok(cards.join("\n"))
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, products: &[Product]) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(products)?)
    }
}

impl Formatter for YamlFormatter {
    fn format(&self, products: &[Product]) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(products)?)
    }
}

impl Formatter for TableFormatter {
    fn format(&self, products: &[Product]) -> anyhow::Result<String> {
        if products.is_empty() {
            return Ok("No data available".to_string());
        }

        let headers = ["id", "name", "ingredient", "area", "regions", "added", "creator"];
        let rows: Vec<[String; 7]> = products
            .iter()
            .map(|p| {
                [
                    p.id.to_string(),
                    p.name.clone(),
                    p.ingredient.clone(),
                    p.therapeutic_area.name.clone(),
                    region_names(p),
                    p.created_label(),
                    p.creator.display_name().to_string(),
                ]
            })
            .collect();

        let mut widths = headers.map(str::len);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let header_cells = headers.map(String::from);
        let mut table = String::new();
        let header = line(&header_cells);
        writeln!(table, "{header}")?;
        writeln!(table, "{}", "-".repeat(header.len()))?;
        for row in &rows {
            writeln!(table, "{}", line(row))?;
        }
        Ok(table)
    }
}

fn region_names(product: &Product) -> String {
    product
        .regions
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn product_card(product: &Product, kind: ListingKind) -> String {
    let mut card = format!("[#{}] {}\n", product.id, product.name);
    card.push_str(&format!("  Ingredient: {}\n", product.ingredient));
    card.push_str(&format!(
        "  Therapeutic Area: {}\n",
        product.therapeutic_area.name
    ));
    if !product.description.is_empty() {
        card.push_str(&format!("  {}\n", product.description));
    }
    card.push_str(&format!("  Available in: {}\n", region_names(product)));
    match kind {
        ListingKind::Catalog => card.push_str(&format!(
            "  Added on: {}  By: {} (creator {})\n",
            product.created_label(),
            product.creator.display_name(),
            product.owner_id()
        )),
        ListingKind::Owned => card.push_str(&format!(
            "  Added on: {}\n",
            product.created_label()
        )),
    }
    card
}

/// Get formatter for the specified output format
pub fn get_formatter(
    format: OutputFormat,
    kind: ListingKind,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(CardFormatter { kind }),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

pub fn render_nav(nav: &PageNav) -> String {
    let prev = if nav.prev_enabled { "< prev" } else { "      " };
    let next = if nav.next_enabled { "next >" } else { "" };
    format!("{prev}  {}  {next}", nav.label()).trim_end().to_string()
}

/// Text for the list area, or `None` when the view should stay as it was.
pub fn render_listing(
    view: &ListingView,
    kind: ListingKind,
    format: OutputFormat,
) -> anyhow::Result<Option<String>> {
    match view {
        ListingView::Page { products, nav } => {
            let body = get_formatter(format, kind).format(products)?;
            if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
                Ok(Some(body))
            } else {
                Ok(Some(format!("{}\n{}", body.trim_end(), render_nav(nav))))
            }
        }
        ListingView::Unchanged => Ok(None),
        ListingView::Failed(message) => Ok(Some(message.clone())),
    }
}

/// Format a single value in a machine format; text falls back to JSON.
pub fn render_value<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        _ => Ok(serde_json::to_string_pretty(value)?),
    }
}
