use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};

use crate::{
    error::{Error, Res},
    types::{PlaylistLink, PlaylistSource, PlaylistSummary},
};

/// Extracts the host to bind the callback listener on from a redirect base
/// such as `http://localhost` or `http://127.0.0.1/`.
pub fn listener_host(redirect_base: &str) -> String {
    let without_scheme = redirect_base
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(redirect_base);

    let authority = without_scheme.split('/').next().unwrap_or_default();

    // a bracketed IPv6 literal keeps its colons
    if let Some(v6) = authority.strip_prefix('[') {
        return v6.split(']').next().unwrap_or_default().to_string();
    }

    authority
        .split(':')
        .next()
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost")
        .to_string()
}

/// Name of the remixed playlist, e.g.
/// `Road Trip BUT MIXED!! :) — (10/18/2026 14:03:59)`.
pub fn playlist_name<Tz>(original: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} BUT MIXED!! :) — ({})",
        original,
        now.format("%m/%d/%Y %H:%M:%S")
    )
}

/// Picks one of the user's own playlists by exact, case-sensitive name.
pub fn select_owned(playlists: &[PlaylistSummary], name: &str) -> Res<PlaylistSource> {
    playlists
        .iter()
        .find(|p| p.name == name)
        .map(|p| PlaylistSource {
            name: p.name.clone(),
            link: PlaylistLink::Tracks(p.tracks_href.clone()),
        })
        .ok_or_else(|| Error::not_found("playlist", name))
}

/// Picks a category id by exact, case-sensitive name.
pub fn select_category<'a>(categories: &'a BTreeMap<String, String>, name: &str) -> Res<&'a str> {
    categories
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::not_found("category", name))
}

/// Picks a playlist of a category listing by exact, case-sensitive name.
pub fn select_in_category(playlists: &BTreeMap<String, String>, name: &str) -> Res<PlaylistSource> {
    playlists
        .get(name)
        .map(|href| PlaylistSource {
            name: name.to_string(),
            link: PlaylistLink::Playlist(href.clone()),
        })
        .ok_or_else(|| Error::not_found("playlist in category", name))
}
