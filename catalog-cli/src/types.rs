use crate::listing::FilterForm;
use crate::output::OutputArgs;
use catalog_models::{SortBy, SortOrder};

/// Main CLI structure
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CatalogCli {
    #[command(subcommand)]
    pub command: CatalogCommands,
    #[clap(flatten)]
    pub conn: ConnectionArgs,
}

/// Available CLI commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum CatalogCommands {
    /// Sign in and keep the session token
    Login {
        username: String,
        /// Password; read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Drop the stored session token
    Logout,
    /// Create an account
    Register {
        username: String,
        #[arg(short, long)]
        email: String,
        /// Password; read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
        /// Display name (defaults to the username)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the signed-in user
    #[clap(aliases = &["me"])]
    Whoami,
    /// Show session state and available actions
    Status,
    /// Browse the product catalog
    #[clap(aliases = &["p"])]
    Products {
        #[command(subcommand)]
        opt: ProductOperation,
    },
    /// Manage your own products
    #[clap(aliases = &["m"])]
    Mine {
        #[command(subcommand)]
        opt: MineOperation,
    },
    /// List therapeutic areas
    Areas {
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// List regions
    Regions {
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Context management operations
    #[clap(aliases = &["ctx"])]
    Context {
        #[command(subcommand)]
        opt: ContextOperation,
    },
}

/// Catalog listing commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum ProductOperation {
    /// Print one page of products
    #[clap(aliases = &["l"])]
    List {
        #[clap(flatten)]
        filters: FilterArgs,
        /// Page number, starting at 1
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        page: u32,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Page through products interactively
    #[clap(aliases = &["b"])]
    Browse {
        #[clap(flatten)]
        filters: FilterArgs,
    },
    /// Show a single product
    #[clap(aliases = &["g", "get"])]
    Show {
        id: i64,
        #[clap(flatten)]
        output: OutputArgs,
    },
}

/// Owner commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum MineOperation {
    /// Print one page of your products
    #[clap(aliases = &["l"])]
    List {
        /// Page number, starting at 1
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        page: u32,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Page through your products interactively
    #[clap(aliases = &["b"])]
    Browse,
    /// Add a product
    #[clap(aliases = &["c", "add"])]
    Create {
        #[clap(flatten)]
        fields: ProductFields,
    },
    /// Change a product; omitted fields keep their current value
    #[clap(aliases = &["e", "update"])]
    Edit {
        id: i64,
        #[clap(flatten)]
        fields: ProductFieldOverrides,
    },
    /// Remove a product
    #[clap(aliases = &["d", "rm"])]
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Listing filters
#[derive(clap::Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Full-text search
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Therapeutic area id
    #[arg(long)]
    pub area: Option<i64>,
    /// Region id
    #[arg(long)]
    pub region: Option<i64>,
    #[arg(long, value_enum)]
    pub sort_by: Option<SortBy>,
    #[arg(long, value_enum)]
    pub sort_order: Option<SortOrder>,
    /// Only products created by this user id
    #[arg(long)]
    pub creator: Option<i64>,
}

impl FilterArgs {
    pub fn form(&self) -> FilterForm {
        FilterForm {
            search: self.search.clone(),
            therapeutic_area_id: self.area,
            region_id: self.region,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}

/// Product form fields for a new product
#[derive(clap::Args, Clone, Debug)]
pub struct ProductFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub ingredient: String,
    /// Therapeutic area id
    #[arg(long)]
    pub area: Option<i64>,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Region id, repeatable. Example: `--region 1 --region 3`
    #[arg(long = "region")]
    pub regions: Vec<i64>,
}

/// Product form fields to change on an existing product
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ProductFieldOverrides {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub ingredient: Option<String>,
    /// Therapeutic area id
    #[arg(long)]
    pub area: Option<i64>,
    #[arg(long)]
    pub description: Option<String>,
    /// Region id, repeatable; replaces the current regions when given
    #[arg(long = "region")]
    pub regions: Vec<i64>,
}

/// Context operation commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum ContextOperation {
    /// Configure connection settings
    #[clap(aliases = &["s", "update"])]
    Set {
        /// Context name (defaults to current)
        name: Option<String>,
        /// Catalog service URL
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Display current configuration
    #[clap(aliases = &["g"])]
    Get,
    /// Switch between contexts
    Select {
        /// Context name to switch to
        name: String,
    },
}

/// Connection configuration
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Catalog service URL; overrides the current context
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}
