use serde::{Deserialize, Serialize};

use crate::text::escape_emphasis;

/// Maximum number of user comments kept on a record.
pub const MAX_COMMENTS: usize = 50;

/// Year shown for search hits that carry no `yearpublished` element.
pub const UNKNOWN_YEAR: &str = "N/A";

/// A single hit from a catalog name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    /// Publication year, or `"N/A"` when the catalog has none.
    pub year_published: String,
}

impl SearchResult {
    /// One-line label for pick lists, e.g. `Catan (1995)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.year_published)
    }
}

/// A user comment attached to a game, paired with the rating it was left with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Rating as reported by the catalog (`"N/A"` for unrated comments).
    pub rating: String,
    pub value: String,
}

/// Normalized projection of one game detail response.
///
/// Scalar fields are kept as the strings the catalog returned; nothing is
/// re-formatted so the rendered note shows exactly what the catalog says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    pub year_published: String,
    /// Cover image URL (element text, not an attribute).
    pub image: String,
    pub min_players: String,
    pub max_players: String,
    pub min_play_time: String,
    pub max_play_time: String,
    pub playing_time: String,
    pub rank: String,
    /// Average complexity weight (`averageweight`).
    pub weight: String,
    /// Average user rating (`average`).
    pub score: String,
    /// Player count with the most "Best" votes, empty when nobody voted.
    pub best_player_count: String,
    pub designers: Vec<String>,
    pub artists: Vec<String>,
    pub description: String,
    pub comments: Vec<Comment>,
}

impl GameRecord {
    /// Escape markdown emphasis in every free-text field.
    ///
    /// Must run after translation: translated text would otherwise come back
    /// with the escapes mangled or dropped.
    pub fn escape_markdown(mut self) -> Self {
        self.description = escape_emphasis(&self.description);
        for comment in &mut self.comments {
            comment.value = escape_emphasis(&comment.value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_label() {
        let result = SearchResult {
            id: "13".to_string(),
            name: "Catan".to_string(),
            year_published: "1995".to_string(),
        };
        assert_eq!(result.label(), "Catan (1995)");
    }

    #[test]
    fn test_escape_markdown_touches_description_and_comments() {
        let record = GameRecord {
            title: "A*B".to_string(),
            description: "A * B".to_string(),
            comments: vec![
                Comment {
                    rating: "8".to_string(),
                    value: "**great**".to_string(),
                },
                Comment {
                    rating: "5".to_string(),
                    value: "Meh".to_string(),
                },
            ],
            ..Default::default()
        };

        let escaped = record.escape_markdown();
        assert_eq!(escaped.description, "A \\* B");
        assert_eq!(escaped.comments[0].value, "\\*\\*great\\*\\*");
        assert_eq!(escaped.comments[0].rating, "8");
        assert_eq!(escaped.comments[1].value, "Meh");
        // Titles end up in filenames and front matter, not callout text
        assert_eq!(escaped.title, "A*B");
    }
}
