use anyhow::Result;
use planetary::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = start()?;

    // Handle the action
    match action {
        Action::Server(_) => actions::server::handle(action).await?,
        Action::Db(_) => actions::db::handle(action).await?,
    }

    Ok(())
}
