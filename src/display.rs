//! Terminal rendering of an aggregator snapshot.
//!
//! Pure string builders over `Snapshot` — no I/O here, the CLI decides
//! where the output goes.

use owo_colors::OwoColorize;

use crate::aggregator::Snapshot;
use crate::types::RepoSummary;

const NO_REPOS_MESSAGE: &str = "This company has no GitHub repositories associated with it.";

/// Render a snapshot: the fallback panel on error or empty query,
/// otherwise the company card.
pub fn render(snapshot: &Snapshot) -> String {
    if snapshot.shows_fallback() {
        render_fallback(snapshot)
    } else {
        render_card(snapshot)
    }
}

fn render_fallback(snapshot: &Snapshot) -> String {
    match &snapshot.error {
        Some(message) => format!("{}\n", message.red()),
        None => "Search for a company to see its dossier.\n".to_string(),
    }
}

fn render_card(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    if snapshot.profile_loading {
        out.push_str(&format!("{}\n", "loading company profile...".dimmed()));
    } else if let Some(company) = &snapshot.company {
        let name = company.name.as_deref().unwrap_or("");
        match &company.stock_symbol {
            Some(symbol) => {
                out.push_str(&format!("{} {}\n", name.bold(), format!("[{symbol}]").yellow()));
            }
            None => out.push_str(&format!("{}\n", name.bold())),
        }

        let location = match (&company.city, &company.country) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(city), None) => city.clone(),
            (None, Some(country)) => country.clone(),
            (None, None) => String::new(),
        };
        if !location.is_empty() {
            out.push_str(&format!("{}\n", location.dimmed()));
        }

        if let Some(description) = &company.description
            && !description.is_empty()
        {
            out.push_str(&format!("{description}\n"));
        }
    }

    out.push('\n');

    if snapshot.repos_loading {
        out.push_str(&format!("{}\n", "loading repositories...".dimmed()));
        return out;
    }

    let company = snapshot.company.as_ref();
    if let Some(total) = company.and_then(|c| c.total_stars) {
        out.push_str(&format!("{} total stars\n", format!("* {total}").yellow()));
    }

    match company.and_then(|c| c.repos.as_ref()) {
        Some(repos) if repos.is_empty() => {
            out.push_str(&format!("{}\n", NO_REPOS_MESSAGE.dimmed().italic()));
        }
        Some(repos) => {
            for repo in repos {
                out.push_str(&render_repo_line(repo));
            }
        }
        None => {}
    }

    out
}

fn render_repo_line(repo: &RepoSummary) -> String {
    let language = repo.language.as_deref().unwrap_or("-");
    let mut line = format!(
        "  {}  {}  {}",
        repo.name.cyan(),
        format!("({language})").dimmed(),
        format!("* {}", repo.stars).yellow(),
    );
    if !repo.description.is_empty() {
        line.push_str(&format!("  {}", repo.description));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Company;

    fn snapshot_with(company: Option<Company>, error: Option<String>, query: &str) -> Snapshot {
        Snapshot {
            query: query.to_string(),
            company,
            error,
            profile_loading: false,
            repos_loading: false,
        }
    }

    fn merged_company() -> Company {
        Company {
            name: Some("Acme".to_string()),
            city: Some("Springfield".to_string()),
            country: Some("US".to_string()),
            stock_symbol: Some("ACME".to_string()),
            description: Some("Makes everything".to_string()),
            image_url: Some("https://img.example/acme.png".to_string()),
            total_stars: Some(42),
            repos: Some(vec![RepoSummary {
                name: "anvil".to_string(),
                language: Some("Rust".to_string()),
                description: "Heavy".to_string(),
                stars: 42,
            }]),
        }
    }

    #[test]
    fn test_error_renders_fallback_panel() {
        let snapshot = snapshot_with(None, Some("boom".to_string()), "acme");
        let out = render(&snapshot);
        assert!(out.contains("boom"));
        assert!(!out.contains("Acme"));
    }

    #[test]
    fn test_empty_query_renders_search_prompt() {
        let snapshot = snapshot_with(None, None, "");
        let out = render(&snapshot);
        assert!(out.contains("Search for a company"));
    }

    #[test]
    fn test_card_shows_profile_and_repos() {
        let snapshot = snapshot_with(Some(merged_company()), None, "acme");
        let out = render(&snapshot);
        assert!(out.contains("Acme"));
        assert!(out.contains("ACME"));
        assert!(out.contains("Springfield, US"));
        assert!(out.contains("* 42"));
        assert!(out.contains("total stars"));
        assert!(out.contains("anvil"));
    }

    #[test]
    fn test_empty_repo_list_renders_no_repos_line() {
        let mut company = merged_company();
        company.repos = Some(Vec::new());
        company.total_stars = Some(0);
        let out = render(&snapshot_with(Some(company), None, "acme"));
        assert!(out.contains(NO_REPOS_MESSAGE));
    }

    #[test]
    fn test_loading_flags_render_placeholders() {
        let mut snapshot = snapshot_with(Some(merged_company()), None, "acme");
        snapshot.profile_loading = true;
        snapshot.repos_loading = true;
        let out = render(&snapshot);
        assert!(out.contains("loading company profile"));
        assert!(out.contains("loading repositories"));
        assert!(!out.contains("Springfield"));
    }
}
