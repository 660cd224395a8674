use deck_buyer::config::BASIC_LANDS;
use deck_buyer::{read_deck, Error};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn basics() -> Vec<String> {
    BASIC_LANDS.iter().map(|s| s.to_string()).collect()
}

fn write_deck(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{content}").unwrap();
    temp_file
}

#[test]
fn test_read_deck_valid_file() {
    let temp_file = write_deck(
        r#"4 Lightning Bolt
1 Sol Ring
2 Counterspell

Deck
2 Lightning Bolt
12 Mountain
8 Island"#,
    );

    let deck = read_deck(temp_file.path(), &basics()).unwrap();

    assert_eq!(deck.len(), 3);
    assert_eq!(deck.quantity("Lightning Bolt"), Some(6));
    assert_eq!(deck.quantity("Sol Ring"), Some(1));
    assert_eq!(deck.quantity("Counterspell"), Some(2));
    assert!(!deck.contains("Mountain"));
    assert!(!deck.contains("Island"));
}

#[test]
fn test_read_deck_keeps_basics_when_not_excluded() {
    let temp_file = write_deck("12 Mountain\n4 Lightning Bolt\n");

    let deck = read_deck(temp_file.path(), &[]).unwrap();

    assert_eq!(deck.quantity("Mountain"), Some(12));
    assert_eq!(deck.total_cards(), 16);
}

#[test]
fn test_read_deck_skips_malformed_lines() {
    let temp_file = write_deck(
        r#"invalid_format_line
not_a_number Force of Will
abc Lightning Bolt
0 Black Lotus
3 Brainstorm"#,
    );

    let deck = read_deck(temp_file.path(), &basics()).unwrap();

    assert_eq!(deck.len(), 1);
    assert_eq!(deck.quantity("Brainstorm"), Some(3));
}

#[test]
fn test_read_deck_missing_file() {
    let result = read_deck(Path::new("/nonexistent/path/deck.txt"), &basics());

    match result {
        Err(Error::DeckRead { path, .. }) => {
            assert_eq!(path, Path::new("/nonexistent/path/deck.txt"));
        }
        other => panic!("Expected Error::DeckRead, got: {other:?}"),
    }
}

#[test]
fn test_read_deck_without_cards() {
    let temp_file = write_deck("Deck\n\n20 Forest\n");

    match read_deck(temp_file.path(), &basics()) {
        Err(Error::EmptyDeck(_)) => {}
        other => panic!("Expected Error::EmptyDeck, got: {other:?}"),
    }
}

#[test]
fn test_read_deck_error_message_names_file() {
    let temp_file = write_deck("");
    let err = read_deck(temp_file.path(), &basics()).unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Error loading deck"));
    assert!(message.contains(&temp_file.path().display().to_string()));
}
