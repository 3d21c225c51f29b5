use super::is_yes;
use crate::client::CatalogApi;
use crate::form::{AssumeAnswer, DELETE_PROMPT, FormOutcome, delete_product};
use crate::listing::{
    FilterForm, Listing, ListingKind, ListingView, PageDirection,
};
use crate::output::{OutputFormat, render_listing};
use anyhow::Result;
use catalog_models::{SortBy, SortOrder};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const BROWSE_HELP: &str = "\
commands:
  n                 next page
  p                 previous page
  r                 reload the current page
  f [key=value..]   apply filters (search, area, region, sort, order)
  c <user id>       show products by one creator
  d <product id>    delete one of your products
  q                 quit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Reload,
    Filter(FilterForm),
    Creator(i64),
    Delete(i64),
    Help,
    Quit,
}

/// Parses one line typed at the browse prompt. An empty line means next.
pub fn parse_browse_command(line: &str) -> Result<BrowseCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(BrowseCommand::Next);
    };
    let command = match head {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" | "previous" => BrowseCommand::Previous,
        "r" | "reload" => BrowseCommand::Reload,
        "f" | "filter" => BrowseCommand::Filter(parse_filter_form(words)?),
        "c" | "creator" => BrowseCommand::Creator(parse_id(words.next())?),
        "d" | "delete" => BrowseCommand::Delete(parse_id(words.next())?),
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'h'")),
    };
    Ok(command)
}

fn parse_id(word: Option<&str>) -> Result<i64, String> {
    let word = word.ok_or_else(|| "missing id".to_string())?;
    word.parse().map_err(|_| format!("'{word}' is not an id"))
}

fn parse_filter_form<'a>(
    words: impl Iterator<Item = &'a str>,
) -> Result<FilterForm, String> {
    let mut form = FilterForm::default();
    for word in words {
        let (key, value) = word
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{word}'"))?;
        match key {
            "search" | "s" => form.search = value.to_string(),
            "area" => form.therapeutic_area_id = Some(parse_id(Some(value))?),
            "region" => form.region_id = Some(parse_id(Some(value))?),
            "sort" => form.sort_by = Some(parse_sort_by(value)?),
            "order" => form.sort_order = Some(parse_sort_order(value)?),
            other => return Err(format!("unknown filter '{other}'")),
        }
    }
    Ok(form)
}

fn parse_sort_by(value: &str) -> Result<SortBy, String> {
    [
        SortBy::Name,
        SortBy::Ingredient,
        SortBy::Date,
        SortBy::TherapeuticArea,
    ]
    .into_iter()
    .find(|s| s.as_str() == value)
    .ok_or_else(|| format!("unknown sort key '{value}'"))
}

fn parse_sort_order(value: &str) -> Result<SortOrder, String> {
    match value {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(format!("unknown sort order '{other}'")),
    }
}

/// Interactive paging over a listing, driven line by line from `input`.
pub async fn run_browse<R>(
    api: &dyn CatalogApi,
    mut listing: Listing,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let kind = listing.kind();
    let mut lines = input.lines();
    show(&listing.load(api).await, kind)?;
    eprintln!("(h for help)");

    while let Some(line) = lines.next_line().await? {
        let command = match parse_browse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let nav = listing.cursor().nav();
        let view = match command {
            BrowseCommand::Next if !nav.next_enabled => {
                eprintln!("Already on the last page.");
                continue;
            }
            BrowseCommand::Previous if !nav.prev_enabled => {
                eprintln!("Already on the first page.");
                continue;
            }
            BrowseCommand::Next => {
                listing.change_page(api, PageDirection::Next).await
            }
            BrowseCommand::Previous => {
                listing.change_page(api, PageDirection::Previous).await
            }
            BrowseCommand::Reload => listing.load(api).await,
            BrowseCommand::Filter(_) | BrowseCommand::Creator(_)
                if kind == ListingKind::Owned =>
            {
                eprintln!("Filters apply to the catalog only.");
                continue;
            }
            BrowseCommand::Filter(form) => {
                listing.apply_filters(api, form).await
            }
            BrowseCommand::Creator(id) => {
                listing.filter_by_creator(api, id).await
            }
            BrowseCommand::Delete(_) if kind == ListingKind::Catalog => {
                eprintln!("Use `catalog mine browse` to delete products.");
                continue;
            }
            BrowseCommand::Delete(id) => {
                eprint!("{DELETE_PROMPT} [y/N] ");
                let answer = lines.next_line().await?.unwrap_or_default();
                let confirm = AssumeAnswer(is_yes(&answer));
                match delete_product(api, id, &confirm, &mut listing).await {
                    FormOutcome::Reloaded(view) => view,
                    FormOutcome::Alert(message) => {
                        eprintln!("{message}");
                        continue;
                    }
                    FormOutcome::Declined | FormOutcome::Editing => continue,
                }
            }
            BrowseCommand::Help => {
                eprintln!("{BROWSE_HELP}");
                continue;
            }
            BrowseCommand::Quit => break,
        };
        show(&view, kind)?;
    }
    Ok(())
}

pub async fn browse_stdin(api: &dyn CatalogApi, listing: Listing) -> Result<()> {
    run_browse(api, listing, BufReader::new(tokio::io::stdin())).await
}

fn show(view: &ListingView, kind: ListingKind) -> Result<()> {
    match view {
        ListingView::Failed(message) => eprintln!("{message}"),
        _ => {
            if let Some(text) = render_listing(view, kind, OutputFormat::Text)? {
                println!("{text}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::QueryParams;
    use crate::testing::{Call, FakeApi, ListReply};

    fn skips(queries: &[QueryParams]) -> Vec<String> {
        queries
            .iter()
            .filter_map(|q| q.iter().find(|(k, _)| *k == "skip"))
            .map(|(_, v)| v.clone())
            .collect()
    }

    #[test]
    fn parses_paging_commands() {
        assert_eq!(parse_browse_command(""), Ok(BrowseCommand::Next));
        assert_eq!(parse_browse_command(" p "), Ok(BrowseCommand::Previous));
        assert_eq!(parse_browse_command("q"), Ok(BrowseCommand::Quit));
        assert_eq!(parse_browse_command("c 7"), Ok(BrowseCommand::Creator(7)));
        assert!(parse_browse_command("d").is_err());
        assert!(parse_browse_command("d x").is_err());
        assert!(parse_browse_command("jump").is_err());
    }

    #[test]
    fn parses_filter_pairs() {
        let parsed =
            parse_browse_command("f search=aspirin region=3 sort=date order=desc")
                .unwrap();
        assert_eq!(
            parsed,
            BrowseCommand::Filter(FilterForm {
                search: "aspirin".into(),
                region_id: Some(3),
                sort_by: Some(SortBy::Date),
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            })
        );
        assert_eq!(
            parse_browse_command("f"),
            Ok(BrowseCommand::Filter(FilterForm::default()))
        );
        assert!(parse_browse_command("f colour=red").is_err());
        assert!(parse_browse_command("f sort=price").is_err());
    }

    #[tokio::test]
    async fn pages_forward_and_stops_at_the_end() {
        let api = FakeApi::listing(vec![
            ListReply::items(1..=10),
            ListReply::items(11..=12),
        ]);
        let input: &[u8] = b"n\nn\np\nq\n";

        run_browse(&api, Listing::catalog(), input).await.unwrap();
        assert_eq!(skips(&api.list_queries()), vec!["0", "10", "0"]);
    }

    #[tokio::test]
    async fn previous_is_ignored_on_first_page() {
        let api = FakeApi::listing(vec![ListReply::items(1..=3)]);
        let input: &[u8] = b"p\n";

        run_browse(&api, Listing::catalog(), input).await.unwrap();
        assert_eq!(api.list_queries().len(), 1);
    }

    #[tokio::test]
    async fn owned_browse_deletes_after_yes() {
        let api = FakeApi::with_user(4);
        let input: &[u8] = b"d 5\ny\nd 6\nn\nq\n";

        run_browse(&api, Listing::owned(), input).await.unwrap();
        let deletes: Vec<_> = api
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Delete(_)))
            .collect();
        assert_eq!(deletes, vec![Call::Delete(5)]);
    }

    #[tokio::test]
    async fn catalog_browse_refuses_delete() {
        let api = FakeApi::default();
        let input: &[u8] = b"d 5\ny\n";

        run_browse(&api, Listing::catalog(), input).await.unwrap();
        assert!(!api.calls().contains(&Call::Delete(5)));
    }
}
