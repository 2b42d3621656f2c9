//! Detail response -> [`GameRecord`].
//!
//! Pure and deterministic: the same tree always produces the same record.
//! Required elements that are missing are reported as
//! [`CatalogError::MalformedResponse`]; they point at an API change, not a
//! transient failure, so callers should not retry.

use bgg_notes_core::{Comment, GameRecord, MAX_COMMENTS};

use crate::error::CatalogError;
use crate::xml::XmlElement;

const PLAYER_COUNT_POLL: &str = "suggested_numplayers";
const DESIGNER_LINK: &str = "boardgamedesigner";
const ARTIST_LINK: &str = "boardgameartist";

/// Build a [`GameRecord`] from the `item` element of a detail response.
///
/// Free text is left untouched here; translation and markdown escaping are
/// later passes.
pub fn normalize(item: &XmlElement) -> Result<GameRecord, CatalogError> {
    let title = value_of(item, "name")?;

    let image = item
        .find("image")
        .map(|e| e.text.trim().to_string())
        .ok_or_else(|| CatalogError::malformed("image"))?;

    let score = match item.find("average").and_then(|e| e.attr("value")) {
        Some(v) => v.to_string(),
        None => {
            log::warn!("No average rating for '{}', leaving score empty", title);
            String::new()
        }
    };

    let record = GameRecord {
        year_published: value_of(item, "yearpublished")?,
        image,
        min_players: value_of(item, "minplayers")?,
        max_players: value_of(item, "maxplayers")?,
        min_play_time: value_of(item, "minplaytime")?,
        max_play_time: value_of(item, "maxplaytime")?,
        playing_time: value_of(item, "playingtime")?,
        rank: value_of(item, "rank")?,
        weight: value_of(item, "averageweight")?,
        score,
        best_player_count: best_player_count(item),
        designers: link_values(item, DESIGNER_LINK),
        artists: link_values(item, ARTIST_LINK),
        description: item
            .find("description")
            .map(|e| e.text.clone())
            .unwrap_or_default(),
        comments: comments(item),
        title,
    };

    log::debug!(
        "Normalized '{}': {} designers, {} artists, {} comments",
        record.title,
        record.designers.len(),
        record.artists.len(),
        record.comments.len()
    );

    Ok(record)
}

/// The player count with the most "Best" votes in the `suggested_numplayers`
/// poll.
///
/// Returns an empty string when the poll is missing or nobody voted. The
/// "Best" tally is always the first `result` of a bucket. The running maximum
/// starts at zero and only a strictly greater tally replaces it, so ties keep
/// the earlier bucket.
pub fn best_player_count(item: &XmlElement) -> String {
    let Some(poll) = item
        .find_all("poll")
        .into_iter()
        .find(|p| p.attr("name") == Some(PLAYER_COUNT_POLL))
    else {
        return String::new();
    };

    match poll.attr("totalvotes").map(str::trim) {
        None | Some("0") => return String::new(),
        Some(_) => {}
    }

    let mut best_label = "";
    let mut best_votes: u64 = 0;
    for bucket in poll.children_named("results") {
        let votes = bucket
            .children_named("result")
            .next()
            .and_then(|r| r.attr("numvotes"))
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);
        if votes > best_votes {
            best_votes = votes;
            best_label = bucket.attr("numplayers").unwrap_or("");
        }
    }

    best_label.to_string()
}

/// `value` attribute of the first `tag` element.
fn value_of(item: &XmlElement, tag: &str) -> Result<String, CatalogError> {
    item.find(tag)
        .ok_or_else(|| CatalogError::malformed(tag))?
        .attr("value")
        .map(str::to_string)
        .ok_or_else(|| CatalogError::malformed(format!("{tag} value")))
}

fn link_values(item: &XmlElement, link_type: &str) -> Vec<String> {
    item.find_all("link")
        .into_iter()
        .filter(|l| l.attr("type") == Some(link_type))
        .filter_map(|l| l.attr("value"))
        .map(str::to_string)
        .collect()
}

fn comments(item: &XmlElement) -> Vec<Comment> {
    item.find_all("comment")
        .into_iter()
        .take(MAX_COMMENTS)
        .map(|c| Comment {
            rating: c.attr("rating").unwrap_or("N/A").to_string(),
            value: c.attr("value").unwrap_or_default().to_string(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
