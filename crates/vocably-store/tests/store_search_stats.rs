use vocably_store::VocabularyStore;
use vocably_types::EntryFields;

fn seeded_store() -> VocabularyStore {
    let store = VocabularyStore::open_in_memory().unwrap();

    let mut apple = EntryFields::new("apple", "a fruit");
    apple.example = "An apple a day.".to_string();
    apple.synonyms = "pome".to_string();
    store.add(&apple);

    let car = EntryFields::new("car", "a vehicle");
    store.add(&car);

    store
}

#[test]
fn search_matches_only_entries_containing_term() {
    let store = seeded_store();

    let hits = store.search("fruit");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].word, "apple");
}

#[test]
fn search_is_case_insensitive() {
    let store = seeded_store();

    let hits = store.search("FRUIT");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].word, "apple");
}

#[test]
fn search_covers_all_text_fields() {
    let store = seeded_store();

    // example
    assert_eq!(store.search("a day").len(), 1);
    // synonyms
    assert_eq!(store.search("pome").len(), 1);
    // word itself
    assert_eq!(store.search("car").len(), 1);

    let mut sea = EntryFields::new("sea", "a large body of water");
    sea.context_sentences = "The sea was calm.\nWe sailed the sea.".to_string();
    sea.antonyms = "land".to_string();
    store.add(&sea);

    assert_eq!(store.search("sailed").len(), 1);
    assert_eq!(store.search("land").len(), 1);
}

#[test]
fn search_trims_the_term() {
    let store = seeded_store();
    assert_eq!(store.search("  fruit  ").len(), 1);
}

#[test]
fn search_excludes_non_matching_entries() {
    let store = seeded_store();
    assert!(store.search("zeppelin").is_empty());
}

#[test]
fn fresh_store_has_zeroed_stats() {
    let store = VocabularyStore::open_in_memory().unwrap();
    let stats = store.stats();

    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.reviewed_words, 0);
    assert_eq!(stats.unreviewed_words, 0);
    assert_eq!(stats.today_words, 0);
}

#[test]
fn stats_counts_stay_consistent() {
    let store = seeded_store();
    let id = store.search("apple")[0].id;
    store.mark_reviewed(id);

    let stats = store.stats();
    assert_eq!(stats.total_words, 2);
    assert_eq!(stats.reviewed_words, 1);
    assert_eq!(stats.unreviewed_words, 1);
    assert_eq!(stats.total_words, stats.reviewed_words + stats.unreviewed_words);
    // Both rows were inserted just now.
    assert_eq!(stats.today_words, 2);
}
