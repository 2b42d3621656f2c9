//! Obsidian note layout: YAML front matter followed by nested callouts.
//!
//! The body never repeats scalar values; its "Data" callout uses Dataview
//! inline fields (`` `= this.key` ``) that resolve against the front matter,
//! so editing the front matter updates the rendered note.

use bgg_notes_core::{GameRecord, ListStyle, Settings};

pub const BOARDGAME_URL: &str = "https://boardgamegeek.com/boardgame";

/// Display width of the cover image, in pixels.
const COVER_WIDTH: u32 = 250;
const CSS_CLASS: &str = "bgg-note";

/// Characters that are not allowed in note filenames on common filesystems.
const UNSAFE_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '"', '<', '>', ':', '|', '?'];

/// A fully rendered note, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    /// Vault-relative path, `{note_path}/{title}.md`.
    pub path: String,
    pub content: String,
}

/// Renders game records into Obsidian notes.
#[derive(Debug, Clone)]
pub struct ObsidianNote {
    note_path: String,
    list_style: ListStyle,
}

impl ObsidianNote {
    pub fn new(note_path: impl Into<String>, list_style: ListStyle) -> Self {
        Self {
            note_path: note_path.into(),
            list_style,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.note_path.clone(), settings.list_style)
    }

    /// Render `record` (already translated and escaped) as the note for
    /// catalog id `id`. Output depends only on the inputs.
    pub fn render(&self, record: &GameRecord, id: &str) -> RenderedNote {
        let mut content = self.render_front_matter(record, id);
        content.push_str(&self.render_body(record, id));
        RenderedNote {
            path: self.note_file(&record.title, id),
            content,
        }
    }

    /// Path of the note for a game titled `title`. Falls back to the catalog
    /// id when nothing of the title survives sanitizing.
    pub fn note_file(&self, title: &str, id: &str) -> String {
        let name = sanitize_filename(title);
        let file = if name.trim().is_empty() {
            format!("{id}.md")
        } else {
            format!("{name}.md")
        };
        let dir = self.note_path.trim_end_matches('/');
        if dir.is_empty() {
            file
        } else {
            format!("{dir}/{file}")
        }
    }

    pub fn render_front_matter(&self, record: &GameRecord, id: &str) -> String {
        let mut fm = String::from("---\n");
        fm.push_str(&format!("title: {}\n", yaml_quote(&record.title)));
        push_field(&mut fm, "id", id);
        push_field(&mut fm, "image", &record.image);
        push_field(&mut fm, "yearPublished", &record.year_published);
        push_field(&mut fm, "minPlayers", &record.min_players);
        push_field(&mut fm, "maxPlayers", &record.max_players);
        push_field(&mut fm, "bestPlayerCount", &record.best_player_count);
        push_field(&mut fm, "minPlayTime", &record.min_play_time);
        push_field(&mut fm, "maxPlayTime", &record.max_play_time);
        push_field(&mut fm, "playingTime", &record.playing_time);
        push_field(&mut fm, "rank", &record.rank);
        push_field(&mut fm, "weight", &record.weight);
        push_field(&mut fm, "score", &record.score);
        self.push_list(&mut fm, "designers", &record.designers);
        self.push_list(&mut fm, "artists", &record.artists);
        fm.push_str("watching: yes\n");
        fm.push_str("obsidianUIMode: preview\n");
        fm.push_str(&format!("cssclasses:\n  - {CSS_CLASS}\n"));
        fm.push_str("---\n");
        fm
    }

    pub fn render_body(&self, record: &GameRecord, id: &str) -> String {
        let mut body = String::from("\n");

        body.push_str(&format!(
            "> [!bgg]+ [{}]({}/{})\n",
            record.title, BOARDGAME_URL, id
        ));
        body.push_str("> > [!multi-column]\n");
        body.push_str("> >\n");
        body.push_str(&format!("> > > ![cover|{COVER_WIDTH}]({})\n", record.image));
        body.push_str("> >\n");
        body.push_str("> > > [!data]+ Data\n");
        for (label, value) in DATA_ROWS {
            body.push_str(&format!("> > > - **{label}**: {value}\n"));
        }

        body.push('\n');
        body.push_str("> [!description]- Description\n");
        body.push_str(&quote_lines(&record.description));
        body.push('\n');

        for comment in &record.comments {
            body.push('\n');
            body.push_str(&format!("> [!score]+ ( {} )\n", comment.rating));
            body.push_str(&quote_lines(&comment.value));
            body.push('\n');
        }

        body
    }

    fn push_list(&self, fm: &mut String, key: &str, values: &[String]) {
        if values.is_empty() {
            fm.push_str(&format!("{key}: []\n"));
            return;
        }
        match self.list_style {
            ListStyle::Bulleted => {
                fm.push_str(&format!("{key}:\n"));
                for v in values {
                    fm.push_str(&format!("  - {}\n", yaml_quote(v)));
                }
            }
            ListStyle::Inline => {
                let joined: Vec<String> = values.iter().map(|v| yaml_quote(v)).collect();
                fm.push_str(&format!("{key}: [{}]\n", joined.join(", ")));
            }
        }
    }
}

/// Rows of the "Data" callout: label and the front-matter reference it shows.
const DATA_ROWS: [(&str, &str); 10] = [
    ("Year", "`= this.yearPublished`"),
    ("Players", "`= this.minPlayers` - `= this.maxPlayers`"),
    ("Best with", "`= this.bestPlayerCount`"),
    ("Play time", "`= this.minPlayTime` - `= this.maxPlayTime` min"),
    ("Average time", "`= this.playingTime` min"),
    ("Rank", "`= this.rank`"),
    ("Weight", "`= this.weight`"),
    ("Score", "`= this.score`"),
    ("Designers", "`= this.designers`"),
    ("Artists", "`= this.artists`"),
];

/// Remove filesystem-unsafe characters from a note title.
///
/// Only `\ / * " < > : | ?` are removed; spacing and every other character
/// are kept as-is.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .collect()
}

/// Prefix every line with a callout quote marker so multi-line text stays
/// inside its callout. Blank lines get a bare `>`.
fn quote_lines(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|l| {
            if l.is_empty() {
                ">".to_string()
            } else {
                format!("> {l}")
            }
        })
        .collect();
    if lines.is_empty() {
        ">".to_string()
    } else {
        lines.join("\n")
    }
}

fn push_field(fm: &mut String, key: &str, value: &str) {
    if value.is_empty() {
        fm.push_str(&format!("{key}:\n"));
    } else {
        fm.push_str(&format!("{key}: {value}\n"));
    }
}

fn yaml_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
#[path = "tests/obsidian_tests.rs"]
mod tests;
