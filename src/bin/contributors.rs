//! Contributor report generator
//!
//! Fetches contributor statistics for the loam repository from the GitHub
//! REST API and writes them out as a static markup fragment, one card per
//! contributor, ordered by descending commit count. Meant to be run from CI
//! to refresh the contributors page.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;

const REPO_OWNER: &str = "loam-site";
const REPO_NAME: &str = "loam";

/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("loam-contributors/", env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(name = "contributors", about = "Generate the contributors page")]
struct Cli {
    /// File the markup fragment is written to
    output: PathBuf,
}

/// One record of the /contributors response. Only the fields the report
/// needs; the rest of the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
struct Contributor {
    login: String,
    html_url: String,
    avatar_url: String,
    contributions: u64,
    #[serde(rename = "type")]
    account_type: String,
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    // Missing filename is a usage error, reported with exit 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            print!("{}", e.render());
            return 0;
        }
        Err(e) => {
            eprint!("{}", e.render());
            return 1;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return 1;
        }
    };

    match rt.block_on(generate(&cli)) {
        Ok(()) => {
            println!("{} has been generated!", cli.output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn generate(cli: &Cli) -> anyhow::Result<()> {
    let contributors = fetch_contributors().await?;
    let report = render(&ranked(contributors));
    std::fs::write(&cli.output, report)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    Ok(())
}

/// One unauthenticated request; the endpoint is public.
async fn fetch_contributors() -> anyhow::Result<Vec<Contributor>> {
    let url = format!(
        "https://api.github.com/repos/{}/{}/contributors",
        REPO_OWNER, REPO_NAME
    );
    tracing::debug!(%url, "fetching contributors");

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let resp = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .await
        .context("request to the GitHub API failed")?;

    if !resp.status().is_success() {
        bail!("Failed to fetch contributors: {}", resp.status());
    }

    resp.json().await.context("failed to parse contributors response")
}

/// Human accounts only, most commits first. The sort is stable, so equal
/// counts keep the API's ordering.
fn ranked(contributors: Vec<Contributor>) -> Vec<Contributor> {
    let mut users: Vec<Contributor> = contributors
        .into_iter()
        .filter(|c| c.account_type == "User")
        .collect();
    users.sort_by(|a, b| b.contributions.cmp(&a.contributions));
    users
}

/// Render the markup fragment consumed by the site.
fn render(contributors: &[Contributor]) -> String {
    let mut out = String::new();
    out.push_str("# Contributors\n\n");
    out.push_str("<div class=\"grid\" style=\"display: flex;flex-flow:wrap;\">\n");
    for c in contributors {
        out.push_str("    <article style=\"width: 250px;text-align: center;\">\n");
        out.push_str(&format!(
            "       <header style=\"text-align: center;\"><a href=\"{}\" target=\"_blank\">{}</a></header>\n",
            c.html_url, c.login
        ));
        out.push_str(&format!(
            "       <a href=\"{}\" target=\"_blank\"><img src=\"{}\" style=\"width: 100px;\"></a>\n",
            c.html_url, c.avatar_url
        ));
        out.push_str(&format!(
            "       <footer style=\"text-align: center;\">{} commits</footer>\n",
            c.contributions
        ));
        out.push_str("    </article>\n");
    }
    out.push_str("</div>\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(login: &str, contributions: u64, account_type: &str) -> Contributor {
        Contributor {
            login: login.to_string(),
            html_url: format!("https://github.com/{login}"),
            avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
            contributions,
            account_type: account_type.to_string(),
        }
    }

    #[test]
    fn ranked_filters_bots_and_sorts_descending() {
        let input = vec![
            contributor("casual", 3, "User"),
            contributor("dependabot[bot]", 90, "Bot"),
            contributor("maintainer", 812, "User"),
            contributor("drive-by", 1, "User"),
        ];

        let ranked = ranked(input);
        let logins: Vec<&str> = ranked.iter().map(|c| c.login.as_str()).collect();
        assert_eq!(logins, ["maintainer", "casual", "drive-by"]);
    }

    #[test]
    fn render_contains_one_card_per_contributor() {
        let report = render(&[
            contributor("maintainer", 812, "User"),
            contributor("casual", 3, "User"),
        ]);

        assert!(report.starts_with("# Contributors\n\n"));
        assert_eq!(report.matches("<article").count(), 2);
        assert!(report.contains("812 commits"));
        // Descending order shows up in the fragment itself.
        let first = report.find("maintainer").unwrap();
        let second = report.find("casual").unwrap();
        assert!(first < second);
    }

    #[test]
    fn render_of_empty_list_is_just_the_shell() {
        let report = render(&[]);
        assert!(report.contains("# Contributors"));
        assert!(report.contains("<div class=\"grid\""));
        assert!(!report.contains("<article"));
        assert!(report.ends_with("</div>\n\n"));
    }

    #[test]
    fn contributor_record_parses_from_api_shape() {
        let json = r#"{
            "login": "maintainer",
            "html_url": "https://github.com/maintainer",
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "contributions": 812,
            "type": "User",
            "id": 1,
            "site_admin": false
        }"#;
        let c: Contributor = serde_json::from_str(json).unwrap();
        assert_eq!(c.login, "maintainer");
        assert_eq!(c.contributions, 812);
        assert_eq!(c.account_type, "User");
    }

    #[test]
    fn report_is_written_to_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributors.md");
        let report = render(&[contributor("maintainer", 5, "User")]);
        std::fs::write(&path, &report).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report);
    }
}
