//! Auth command implementation.

use anyhow::Result;
use console::style;

use eir_hal::CredentialStore;

use crate::ui::{print_info, print_success};

/// Save the cloud API token.
pub fn set_token(token: &str) -> Result<()> {
    let store = CredentialStore::default_path()?;
    store.save(token)?;

    print_success("Cloud credential saved");
    print_info(&format!("stored at {}", store.path().display()));
    Ok(())
}

/// Show credential status.
pub fn status() -> Result<()> {
    let store = CredentialStore::default_path()?;

    if !store.exists() {
        println!("  {}: {}", style("credential").bold(), style("not set").red());
        println!(
            "  Run {} to authenticate.",
            style("eir auth set-token <TOKEN>").dim()
        );
        return Ok(());
    }

    let creds = store.load()?;
    let masked = if creds.token.len() > 4 {
        format!("{}…", &creds.token[..4])
    } else {
        "…".to_string()
    };
    println!("  {}: {}", style("credential").bold(), style("saved").green());
    println!("  {}: {}", style("token").bold(), masked);
    println!(
        "  {}: {}",
        style("saved at").bold(),
        creds.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

/// Delete the saved credential.
pub fn clear() -> Result<()> {
    let store = CredentialStore::default_path()?;
    store.delete()?;
    print_success("Cloud credential removed");
    Ok(())
}
