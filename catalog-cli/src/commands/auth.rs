use crate::client::CatalogApi;
use crate::session::{AuthOutcome, Navigation, Session, UserInfo};
use anyhow::Result;
use catalog_models::RegisterRequest;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn handle_login(
    api: &dyn CatalogApi,
    session: &Session,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_line("Password: ").await?,
    };

    match session.login(api, username, &password).await {
        AuthOutcome::Navigate(nav) => {
            print_navigation(&nav);
            Ok(())
        }
        AuthOutcome::Error(message) => Err(anyhow::anyhow!(message)),
    }
}

pub fn handle_logout(session: &Session) -> Result<()> {
    let nav = session.logout()?;
    print_navigation(&nav);
    Ok(())
}

pub async fn handle_register(
    api: &dyn CatalogApi,
    session: &Session,
    username: &str,
    email: &str,
    password: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_line("Password: ").await?,
    };
    let request = RegisterRequest {
        username: username.to_string(),
        name: name.unwrap_or_else(|| username.to_string()),
        email: email.to_string(),
        password,
    };

    match session.register(api, &request).await {
        AuthOutcome::Navigate(nav) => {
            print_navigation(&nav);
            Ok(())
        }
        AuthOutcome::Error(message) => Err(anyhow::anyhow!(message)),
    }
}

pub async fn handle_whoami(
    api: &dyn CatalogApi,
    session: &Session,
) -> Result<()> {
    if !session.is_logged_in() {
        return Err(anyhow::anyhow!("Not logged in"));
    }
    match session.load_user_info(api).await {
        UserInfo::User(user) => {
            println!("{} (id {})", user.display_name(), user.id);
            if let Some(email) = &user.email {
                println!("  email: {email}");
            }
            Ok(())
        }
        UserInfo::LoggedOut => {
            print_navigation(&Navigation::Landing);
            Err(anyhow::anyhow!("Session is no longer valid"))
        }
        UserInfo::Unavailable(message) => Err(anyhow::anyhow!(message)),
    }
}

pub fn handle_status(session: &Session, api_url: &str) -> Result<()> {
    let controls = session.check_auth_status();
    println!("Service: {api_url}");
    println!(
        "Session: {}",
        if session.is_logged_in() {
            "logged in"
        } else {
            "logged out"
        }
    );

    let mut actions = Vec::new();
    if controls.login {
        actions.push("login");
    }
    if controls.register {
        actions.push("register");
    }
    if controls.dashboard {
        actions.push("mine");
    }
    if controls.logout {
        actions.push("logout");
    }
    println!("Available: {}", actions.join(", "));
    Ok(())
}

fn print_navigation(nav: &Navigation) {
    match nav {
        Navigation::Dashboard => {
            println!("Logged in. Use `catalog mine list` to see your products.")
        }
        Navigation::Landing => println!("Logged out."),
        Navigation::Login { registered: true } => {
            println!("Registration successful. Please log in.")
        }
        Navigation::Login { registered: false } => println!("Please log in."),
    }
}

pub(crate) async fn prompt_line(prompt: &str) -> Result<String> {
    read_answer(prompt, &mut BufReader::new(tokio::io::stdin())).await
}

/// Writes `prompt` to stderr and reads one line from `input`, without the
/// line ending. End of input reads as an empty answer.
pub(crate) async fn read_answer<R>(prompt: &str, input: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut stderr = tokio::io::stderr();
    stderr.write_all(prompt.as_bytes()).await?;
    stderr.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
