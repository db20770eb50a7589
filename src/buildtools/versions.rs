use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::ShellResult;

pub const SPIGOT_VERSIONS_URL: &str = "https://hub.spigotmc.org/versions/";

/// Download the Spigot versions index and return the revisions it lists, newest first.
pub async fn fetch_versions() -> ShellResult<Vec<String>> {
    log::info!("fetching versions from {SPIGOT_VERSIONS_URL}");
    let body = reqwest::get(SPIGOT_VERSIONS_URL)
        .await?
        .error_for_status()?
        .text()
        .await?;
    let versions = parse_versions(&body);
    log::info!("found {} versions", versions.len());
    Ok(versions)
}

/// Extract `X.Y` / `X.Y.Z` revisions from the index listing.
///
/// Only entries of the form `<rev>.json` count; build numbers and other files are skipped.
pub fn parse_versions(index: &str) -> Vec<String> {
    static VERSION_LINK: OnceLock<Regex> = OnceLock::new();
    let pattern = VERSION_LINK.get_or_init(|| {
        Regex::new(r#"href="(\d+\.\d+(?:\.\d+)?)\.json""#).expect("version link pattern is valid")
    });
    let mut seen = HashSet::new();
    let mut versions: Vec<String> = pattern
        .captures_iter(index)
        .map(|caps| caps[1].to_string())
        .filter(|version| seen.insert(version.clone()))
        .collect();
    sort_versions_newest_first(&mut versions);
    versions
}

/// Sort by numeric components, e.g. 1.20.4 > 1.20 > 1.9.4.
fn sort_versions_newest_first(versions: &mut [String]) {
    let parse_version = |v: &str| -> (u32, u32, u32) {
        let nums: Vec<u32> = v.split('.').filter_map(|s| s.parse().ok()).collect();
        (
            nums.first().copied().unwrap_or(0),
            nums.get(1).copied().unwrap_or(0),
            nums.get(2).copied().unwrap_or(0),
        )
    };
    versions.sort_by(|a, b| parse_version(b).cmp(&parse_version(a)));
}
