use super::*;
use bgg_notes_core::Comment;

fn catan() -> GameRecord {
    GameRecord {
        title: "Catan".to_string(),
        year_published: "1995".to_string(),
        image: "https://cf.geekdo-images.com/catan.jpg".to_string(),
        min_players: "3".to_string(),
        max_players: "4".to_string(),
        min_play_time: "60".to_string(),
        max_play_time: "120".to_string(),
        playing_time: "120".to_string(),
        rank: "521".to_string(),
        weight: "2.2967".to_string(),
        score: "7.10112".to_string(),
        best_player_count: "4".to_string(),
        designers: vec!["Klaus Teuber".to_string()],
        artists: vec!["Volkan Baga".to_string(), "Tanja Donner".to_string()],
        description: "Trade \\*wisely\\*.\n\nBuild roads.".to_string(),
        comments: vec![
            Comment {
                rating: "8".to_string(),
                value: "Great".to_string(),
            },
            Comment {
                rating: "N/A".to_string(),
                value: "Meh".to_string(),
            },
        ],
    }
}

#[test]
fn test_render_full_note() {
    let renderer = ObsidianNote::new("Games/Board", ListStyle::Bulleted);
    let note = renderer.render(&catan(), "13");

    assert_eq!(note.path, "Games/Board/Catan.md");
    let expected = "\
---
title: \"Catan\"
id: 13
image: https://cf.geekdo-images.com/catan.jpg
yearPublished: 1995
minPlayers: 3
maxPlayers: 4
bestPlayerCount: 4
minPlayTime: 60
maxPlayTime: 120
playingTime: 120
rank: 521
weight: 2.2967
score: 7.10112
designers:
  - \"Klaus Teuber\"
artists:
  - \"Volkan Baga\"
  - \"Tanja Donner\"
watching: yes
obsidianUIMode: preview
cssclasses:
  - bgg-note
---

> [!bgg]+ [Catan](https://boardgamegeek.com/boardgame/13)
> > [!multi-column]
> >
> > > ![cover|250](https://cf.geekdo-images.com/catan.jpg)
> >
> > > [!data]+ Data
> > > - **Year**: `= this.yearPublished`
> > > - **Players**: `= this.minPlayers` - `= this.maxPlayers`
> > > - **Best with**: `= this.bestPlayerCount`
> > > - **Play time**: `= this.minPlayTime` - `= this.maxPlayTime` min
> > > - **Average time**: `= this.playingTime` min
> > > - **Rank**: `= this.rank`
> > > - **Weight**: `= this.weight`
> > > - **Score**: `= this.score`
> > > - **Designers**: `= this.designers`
> > > - **Artists**: `= this.artists`

> [!description]- Description
> Trade \\*wisely\\*.
>
> Build roads.

> [!score]+ ( 8 )
> Great

> [!score]+ ( N/A )
> Meh
";
    assert_eq!(note.content, expected);
}

#[test]
fn test_render_is_deterministic() {
    let renderer = ObsidianNote::new("boardgames", ListStyle::Bulleted);
    assert_eq!(renderer.render(&catan(), "13"), renderer.render(&catan(), "13"));
}

#[test]
fn test_inline_list_style() {
    let renderer = ObsidianNote::new("boardgames", ListStyle::Inline);
    let fm = renderer.render_front_matter(&catan(), "13");
    assert!(fm.contains("designers: [\"Klaus Teuber\"]\n"));
    assert!(fm.contains("artists: [\"Volkan Baga\", \"Tanja Donner\"]\n"));
}

#[test]
fn test_empty_fields_and_lists() {
    let mut record = catan();
    record.best_player_count = String::new();
    record.designers.clear();
    record.artists.clear();
    record.comments.clear();
    record.description = String::new();

    let renderer = ObsidianNote::new("boardgames", ListStyle::Bulleted);
    let note = renderer.render(&record, "13");
    assert!(note.content.contains("\nbestPlayerCount:\n"));
    assert!(note.content.contains("\ndesigners: []\nartists: []\n"));
    assert!(note.content.ends_with("> [!description]- Description\n>\n"));
    assert!(!note.content.contains("[!score]"));
}

#[test]
fn test_title_quoting_in_front_matter() {
    let mut record = catan();
    record.title = "Say \"Cheese\": The Game".to_string();

    let renderer = ObsidianNote::new("boardgames", ListStyle::Bulleted);
    let note = renderer.render(&record, "1");
    assert!(note.content.starts_with("---\ntitle: \"Say \\\"Cheese\\\": The Game\"\nid: 1\n"));
    assert_eq!(note.path, "boardgames/Say Cheese The Game.md");
}

#[test]
fn test_multiline_comment_stays_in_callout() {
    let mut record = catan();
    record.comments = vec![Comment {
        rating: "9".to_string(),
        value: "Line one\nLine two".to_string(),
    }];

    let body = ObsidianNote::new("x", ListStyle::Bulleted).render_body(&record, "13");
    assert!(body.ends_with("> [!score]+ ( 9 )\n> Line one\n> Line two\n"));
}

#[test]
fn test_note_file_handles_trailing_slash_and_root() {
    assert_eq!(
        ObsidianNote::new("games/", ListStyle::Bulleted).note_file("Catan", "13"),
        "games/Catan.md"
    );
    assert_eq!(
        ObsidianNote::new("", ListStyle::Bulleted).note_file("Catan", "13"),
        "Catan.md"
    );
}

#[test]
fn test_sanitize_removes_exactly_unsafe_chars() {
    assert_eq!(sanitize_filename(r#"a\b/c*d"e<f>g:h|i?j"#), "abcdefghij");
    assert_eq!(sanitize_filename("Ticket to Ride: Europe"), "Ticket to Ride Europe");
    assert_eq!(
        sanitize_filename("  Spaces  kept & (other) chars! #1 'ok' é  "),
        "  Spaces  kept & (other) chars! #1 'ok' é  "
    );
    assert_eq!(sanitize_filename("???"), "");
}

#[test]
fn test_sanitize_is_idempotent() {
    for title in ["7 Wonders: Duel", "Who? What/Where*", "Plain", "<>|\"\\"] {
        let once = sanitize_filename(title);
        assert_eq!(sanitize_filename(&once), once);
    }
}

#[test]
fn test_title_without_safe_characters_uses_id() {
    let mut record = catan();
    record.title = "???".to_string();

    let note = ObsidianNote::new("boardgames", ListStyle::Bulleted).render(&record, "13");
    assert_eq!(note.path, "boardgames/13.md");
    assert!(note.content.starts_with("---\ntitle: \"???\"\n"));
}
