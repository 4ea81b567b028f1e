//! CLI command implementations.

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::display;
use crate::error::{DossierError, Result};
use crate::sources::{CrunchBaseClient, GitHubClient, ProfileSource};

/// Look up a company: dispatch both sources in parallel, wait for both to
/// settle, render the merged card (or the raw snapshot as JSON).
pub async fn cmd_lookup(name: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let profile_source = CrunchBaseClient::from_config(&config)?;
    let repo_source = GitHubClient::from_config(&config)?;

    let aggregator = Aggregator::new(profile_source, repo_source);
    aggregator.submit_query(name).settled().await;

    let snapshot = aggregator.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", display::render(&snapshot));
    }

    Ok(())
}

/// One-shot suggestion lookup for a partial name (first five matches).
pub async fn cmd_suggest(prefix: &str) -> Result<()> {
    let config = Config::load()?;
    let client = CrunchBaseClient::from_config(&config)?;

    let suggestions = client.fetch_suggestions(prefix).await?;
    if suggestions.is_empty() {
        println!("No matches for '{prefix}'");
        return Ok(());
    }

    for suggestion in suggestions {
        println!("{}", suggestion.title);
    }
    Ok(())
}

/// Show which credentials are configured, with values redacted.
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    let crunchbase = if config.crunchbase_api_key().is_some() {
        "(set)"
    } else {
        "(unset)"
    };
    let github = if config.github_token().is_some() {
        "(set)"
    } else {
        "(unset)"
    };

    println!("crunchbase.api_key: {crunchbase}");
    println!("github.token: {github}");
    Ok(())
}

/// Print one configured value (env overrides included).
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;

    let value = match key {
        "crunchbase.api_key" => config.crunchbase_api_key(),
        "github.token" => config.github_token(),
        _ => {
            return Err(DossierError::Config(format!(
                "unknown config key '{key}', expected 'crunchbase.api_key' or 'github.token'"
            )));
        }
    };

    match value {
        Some(value) => println!("{value}"),
        None => println!("(unset)"),
    }
    Ok(())
}

/// Set one configured value and save the config file.
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "crunchbase.api_key" => config.set_crunchbase_api_key(value.to_string()),
        "github.token" => config.set_github_token(value.to_string()),
        _ => {
            return Err(DossierError::Config(format!(
                "unknown config key '{key}', expected 'crunchbase.api_key' or 'github.token'"
            )));
        }
    }

    config.save()?;
    println!("Set {key}");
    Ok(())
}
