use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run_new(app: &App, name: &str, format: OutputFormat) -> Result<()> {
    app.store
        .create(name)
        .with_context(|| format!("Failed to create deck '{}'", name))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "created": name });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Created deck \"{}\"", name),
    }
    Ok(())
}

pub fn run_del(app: &App, name: &str, format: OutputFormat) -> Result<()> {
    app.store
        .delete(name)
        .with_context(|| format!("Failed to delete deck '{}'", name))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "deleted": name });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Deleted deck \"{}\"", name),
    }
    Ok(())
}
