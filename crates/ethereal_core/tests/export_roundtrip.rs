use ethereal_core::{render_journal_text, thoughts_from_json, thoughts_to_json, Thought};

#[test]
fn backup_round_trips_without_loss() {
    let mut enriched = Thought::with_timestamp("a full entry", 1_700_000_000_000);
    enriched.tags = vec!["tag-a".to_string(), "tag-b".to_string()];
    enriched.mood = Some("Inspired".to_string());
    enriched.summary = Some("short".to_string());
    enriched.ai_insight = Some("a question".to_string());
    enriched.is_favorite = true;
    let plain = Thought::with_timestamp("a plain entry", 1_700_000_100_000);

    let thoughts = vec![enriched, plain];
    let json = thoughts_to_json(&thoughts).unwrap();
    let restored = thoughts_from_json(&json).unwrap();

    assert_eq!(restored, thoughts);
}

#[test]
fn backup_is_pretty_printed_camel_case() {
    let thoughts = vec![Thought::with_timestamp("entry", 1_700_000_000_000)];
    let json = thoughts_to_json(&thoughts).unwrap();

    assert!(json.contains('\n'));
    assert!(json.contains("\"createdAt\""));
    assert!(json.contains("\"isFavorite\""));
}

#[test]
fn backup_written_by_an_older_build_still_parses() {
    // No tags/isFavorite keys, as older records look.
    let raw = r#"[{"id":"1700000000000","content":"legacy","createdAt":1700000000000}]"#;
    let restored = thoughts_from_json(raw).unwrap();

    assert_eq!(restored.len(), 1);
    assert!(restored[0].tags.is_empty());
    assert!(!restored[0].is_favorite);
    assert!(restored[0].mood.is_none());
}

#[test]
fn invalid_backup_is_rejected() {
    assert!(thoughts_from_json("{\"not\":\"a list\"}").is_err());
    assert!(thoughts_from_json("").is_err());
}

#[test]
fn journal_text_has_title_numbering_and_mood() {
    let mut with_mood = Thought::with_timestamp("felt the sun", 1_700_000_000_000);
    with_mood.mood = Some("Happy".to_string());
    let without_mood = Thought::with_timestamp("a gray morning", 1_700_000_100_000);

    let text = render_journal_text(&[with_mood, without_mood]);
    assert!(text.starts_with("Ethereal Thoughts Journal\n"));
    assert!(text.contains("[Mood: Happy]"));
    assert!(text.contains("[Mood: N/A]"));
    assert!(text.contains("\n1. ["));
    assert!(text.contains("\n2. ["));
    assert!(text.contains("felt the sun"));
    assert!(text.contains("a gray morning"));
}

#[test]
fn journal_of_empty_collection_is_just_the_title() {
    assert_eq!(render_journal_text(&[]), "Ethereal Thoughts Journal\n");
}
