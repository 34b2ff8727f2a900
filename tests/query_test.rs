/// Query and aggregation integration tests through the history facade
mod common;

use common::{RecordBuilder, at_millis, choice, ids, temp_history, temp_store};
use question_history::models::RecordMetadata;
use question_history::query::{compute_stats, parse_query};
use question_history::{FileHistory, RecordFilter, StoreConfig};

fn seeded_history() -> (tempfile::TempDir, FileHistory<question_history::storage::FileMedium>) {
    let (dir, mut store) = temp_store(StoreConfig::default());
    let records = [
        RecordBuilder::new("r1")
            .question(choice("Thủ đô của Pháp là gì?", &["Paris", "Lyon"]))
            .subject("dia")
            .difficulty("de"),
        RecordBuilder::new("r2").text("Tính đạo hàm của x^2").subject("toan").topic("Đạo hàm").difficulty("kho"),
        RecordBuilder::new("r3").text("Định luật Newton thứ hai").subject("ly").difficulty("de"),
        RecordBuilder::new("r4").text("Không phân loại"),
    ];
    for record in records {
        store.insert(record.build()).unwrap();
    }
    (dir, FileHistory::new(store))
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let (_dir, history) = seeded_history();
    assert_eq!(ids(&history.search("paris")), vec!["r1"]);
    assert_eq!(ids(&history.search("ĐẠO HÀM")), vec!["r2"]);
    assert_eq!(ids(&history.search("TOAN")), vec!["r2"]);
}

#[test]
fn test_search_matches_exactly_the_searchable_text() {
    let (_dir, history) = seeded_history();
    for query in ["de", "o", "newton", "a", "zzz"] {
        let expected: Vec<String> = history
            .get_index()
            .into_iter()
            .filter(|r| r.searchable_text().to_lowercase().contains(query))
            .map(|r| r.id)
            .collect();
        let actual: Vec<String> = history.search(query).into_iter().map(|r| r.id).collect();
        assert_eq!(actual, expected, "query {:?}", query);
    }
}

#[test]
fn test_blank_query_returns_everything() {
    let (_dir, history) = seeded_history();
    assert_eq!(history.search("").len(), 4);
    assert_eq!(history.search("   ").len(), 4);
}

#[test]
fn test_field_filters_are_exact() {
    let (_dir, history) = seeded_history();
    assert_eq!(ids(&history.filter_by_subject("toan")), vec!["r2"]);
    assert!(history.filter_by_subject("Toan").is_empty());
    assert!(history.filter_by_subject("to").is_empty());
    assert_eq!(ids(&history.filter_by_difficulty("de")), vec!["r3", "r1"]);
}

#[test]
fn test_combined_filter_is_conjunction() {
    let (_dir, history) = seeded_history();
    let filter = RecordFilter::new().query("newton").difficulty("de");
    assert_eq!(ids(&history.filter(&filter)), vec!["r3"]);

    let filter = RecordFilter::new().query("newton").subject("dia");
    assert!(history.filter(&filter).is_empty());
}

#[test]
fn test_parsed_query_drives_filter() {
    let (_dir, history) = seeded_history();
    let filter = parse_query("difficulty:de subject:\"ly\"").unwrap();
    assert_eq!(ids(&history.filter(&filter)), vec!["r3"]);

    let filter = parse_query("subject:dia subject:all difficulty:de").unwrap();
    assert_eq!(ids(&history.filter(&filter)), vec!["r3", "r1"]);
}

#[test]
fn test_stats_consistency() {
    let (_dir, history) = seeded_history();
    let stats = history.stats();

    let index = history.get_index();
    let with_subject = index.iter().filter(|r| r.subject.is_some()).count();
    let with_difficulty = index.iter().filter(|r| r.difficulty.is_some()).count();

    assert_eq!(stats.total_files, index.len());
    assert_eq!(stats.subjects.values().sum::<usize>(), with_subject);
    assert_eq!(stats.difficulties.values().sum::<usize>(), with_difficulty);
    assert_eq!(with_subject, 3);
    assert_eq!(with_difficulty, 3);
    assert_eq!(stats.subjects.get("toan"), Some(&1));
    assert_eq!(stats.difficulties.get("de"), Some(&2));
    assert!(!stats.subjects.contains_key(""));
    assert_eq!(ids(&stats.recent_files), vec!["r4", "r3", "r2", "r1"]);
}

#[test]
fn test_recent_files_are_a_prefix() {
    let (_dir, mut store) = temp_store(StoreConfig::default().with_recent_limit(5));
    for i in 0..12 {
        store.insert(RecordBuilder::new(&format!("r{}", i)).build()).unwrap();
    }
    let history = FileHistory::new(store);

    let index = history.get_index();
    let stats = history.stats();
    assert_eq!(stats.recent_files.len(), 5);
    assert_eq!(stats.recent_files[..], index[..5]);
    assert_eq!(stats.total_files, 12);

    assert_eq!(compute_stats(index, 100).recent_files.len(), 12);
}

#[test]
fn test_math_math_physics_scenario() {
    let (_dir, mut history) = temp_history();
    let base = 1_700_000_000_000;

    let saves = [("Câu 1", "math", "easy"), ("Câu 2", "math", "hard"), ("Câu 3", "physics", "easy")];
    for (i, (text, subject, difficulty)) in saves.into_iter().enumerate() {
        let metadata = RecordMetadata::new().subject(subject).difficulty(difficulty);
        let question = choice(text, &["x", "y"]);
        history
            .save_question_at(question, metadata, None, at_millis(base + i as i64 * 1000))
            .unwrap();
    }

    let stats = history.stats();
    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.subjects.get("math"), Some(&2));
    assert_eq!(stats.subjects.get("physics"), Some(&1));
    assert_eq!(stats.difficulties.get("easy"), Some(&2));
    assert_eq!(stats.difficulties.get("hard"), Some(&1));

    let newest = &stats.recent_files[0];
    assert_eq!(newest.subject.as_deref(), Some("physics"));
    assert_eq!(newest.question.question, "Câu 3");

    assert_eq!(history.filter_by_subject("math").len(), 2);
    assert_eq!(history.search("physics").len(), 1);
}

#[test]
fn test_clear_empties_stats() {
    let (_dir, mut history) = seeded_history();
    assert_eq!(history.stats().total_files, 4);

    assert!(history.clear());
    let stats = history.stats();
    assert_eq!(stats.total_files, 0);
    assert!(stats.subjects.is_empty());
    assert!(stats.difficulties.is_empty());
    assert!(stats.recent_files.is_empty());
    assert!(history.get_index().is_empty());
}

#[test]
fn test_empty_classification_is_unset() {
    let (_dir, mut history) = temp_history();
    let metadata = RecordMetadata::new().subject("").topic("").difficulty("");
    let id = history.save_question(choice("Câu hỏi", &["x"]), &metadata).unwrap();

    let stats = history.stats();
    assert_eq!(stats.total_files, 1);
    assert!(stats.subjects.is_empty());
    assert!(stats.difficulties.is_empty());

    let text = question_history::format::format_record_as_text(&history.get(&id).unwrap());
    assert!(!text.contains("Môn học"));
    assert!(!text.contains("Chủ đề"));
    assert!(!text.contains("Độ khó"));
}
