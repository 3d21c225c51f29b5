use crate::config::ContextManager;
use crate::types::ContextOperation;
use anyhow::Result;

/// Handle context management commands
pub async fn handle_context_command(
    operation: &ContextOperation,
) -> Result<()> {
    let mut manager = ContextManager::new().await?;
    handle_context_command_with_manager(operation, &mut manager).await
}

/// Same as [`handle_context_command`] against an already loaded manager.
pub async fn handle_context_command_with_manager(
    operation: &ContextOperation,
    manager: &mut ContextManager,
) -> Result<()> {
    match operation {
        ContextOperation::Set { name, api_url } => {
            handle_context_set(name.clone(), api_url.clone(), manager).await
        }
        ContextOperation::Get => handle_context_get(manager),
        ContextOperation::Select { name } => {
            manager.select_context(name.clone()).await?;
            println!("Switched to context '{name}'");
            Ok(())
        }
    }
}

async fn handle_context_set(
    name: Option<String>,
    api_url: Option<String>,
    manager: &mut ContextManager,
) -> Result<()> {
    manager.set_context(name.clone(), api_url).await?;

    let context_name =
        name.unwrap_or_else(|| manager.config().current_context.clone());
    println!("ctx:'{context_name}' updated successfully");

    if let Some(context) = manager.config().get_context(&context_name) {
        println!("Configuration:");
        if let Some(url) = &context.api_url {
            println!("  apiUrl: '{url}'");
        }
    }
    Ok(())
}

fn handle_context_get(manager: &ContextManager) -> Result<()> {
    let config = manager.config();
    for name in config.list_contexts() {
        let marker = if *name == config.current_context { "*" } else { " " };
        let url = config
            .get_context(name)
            .and_then(|c| c.api_url.as_deref())
            .unwrap_or("-");
        println!("{marker} {name}  {url}");
    }
    Ok(())
}
