pub mod client;
mod commands;
pub mod config;
pub mod form;
pub mod listing;
pub mod output;
pub mod session;
mod types;

#[cfg(test)]
mod testing;

use std::process;

pub use commands::App;
pub use output::{OutputArgs, OutputFormat};
pub use types::{
    CatalogCli, CatalogCommands, ConnectionArgs, ContextOperation,
    FilterArgs, MineOperation, ProductOperation,
};

pub async fn run(cli: CatalogCli) {
    if let CatalogCommands::Context { opt } = &cli.command {
        if let Err(e) = commands::handle_context_command(opt).await {
            eprintln!("Context command failed: {}", e);
            process::exit(1);
        }
        return;
    }

    let app = match App::connect(&cli.conn).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };
    let api = &app.api;
    let session = &app.session;

    let (label, result) = match &cli.command {
        CatalogCommands::Login { username, password } => (
            "Login",
            commands::handle_login(api, session, username, password.clone())
                .await,
        ),
        CatalogCommands::Logout => {
            ("Logout", commands::handle_logout(session))
        }
        CatalogCommands::Register {
            username,
            email,
            password,
            name,
        } => (
            "Register",
            commands::handle_register(
                api,
                session,
                username,
                email,
                password.clone(),
                name.clone(),
            )
            .await,
        ),
        CatalogCommands::Whoami => {
            ("Whoami", commands::handle_whoami(api, session).await)
        }
        CatalogCommands::Status => {
            ("Status", commands::handle_status(session, api.base_url()))
        }
        CatalogCommands::Products { opt } => (
            "Products",
            commands::handle_product_command(api, opt).await,
        ),
        CatalogCommands::Mine { opt } => {
            ("Mine", commands::handle_mine_command(api, opt).await)
        }
        CatalogCommands::Areas { output } => (
            "Areas",
            commands::handle_areas_command(api, output.output).await,
        ),
        CatalogCommands::Regions { output } => (
            "Regions",
            commands::handle_regions_command(api, output.output).await,
        ),
        CatalogCommands::Context { .. } => return,
    };

    if let Err(e) = result {
        eprintln!("{} command failed: {}", label, e);
        process::exit(1);
    }
}
