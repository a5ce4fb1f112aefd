//! Season and episode matching for series results.
//!
//! Providers do not reliably honor the season/episode hints in query
//! strings, so the filter is re-applied here against each candidate's
//! release name. The policy is precision over recall: an ambiguous name is
//! dropped rather than risk serving the wrong episode.

use std::sync::LazyLock;

use regex::Regex;

static COMBINED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bs(\d{1,2})e(\d{1,2})\b").expect("combined episode pattern is valid")
});

static SEASON_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bs(\d{1,2})\b").expect("season pattern is valid"));

static EPISODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\be(\d{1,2})\b").expect("episode pattern is valid"));

/// Decides whether a release name refers to exactly the requested episode.
///
/// A combined `SxxExx` token is the single source of truth when present:
/// both numbers must equal the request. Otherwise the name must carry
/// exactly one standalone season token and exactly one standalone episode
/// token, each matching. Names with zero or multiple tokens (season packs,
/// multi-episode releases) never match.
pub fn matches_episode(text: &str, season: u32, episode: u32) -> bool {
    if let Some(caps) = COMBINED_TOKEN.captures(text) {
        let s: u32 = caps[1].parse().unwrap_or(0);
        let e: u32 = caps[2].parse().unwrap_or(0);
        return s == season && e == episode;
    }

    let seasons: Vec<u32> = SEASON_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    let episodes: Vec<u32> = EPISODE_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();

    seasons.len() == 1 && episodes.len() == 1 && seasons[0] == season && episodes[0] == episode
}
