//! Plain-text rendering of a saved question.
//!
//! The layout follows the documents the web client downloads: a metadata header,
//! the question body, a section chosen by question type, then the explanation.
//! Section titles are Vietnamese, as in the client.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Local, TimeZone};

use crate::models::{
    Answer, ChoiceBody, ChoiceQuestion, EssayQuestion, FillInBlankQuestion, GeneratedQuestion,
    HistoryRecord, MatchingQuestion, OrderingQuestion, QuestionKind, RecordMetadata,
    TrueFalseQuestion,
};
use crate::models::question::truth_label;

const CREATED_AT_FORMAT: &str = "%H:%M:%S %d/%m/%Y";
const NO_SUGGESTION: &str = "Không có gợi ý";

/// Render `question` as a standalone text document.
///
/// Pure: identical inputs (including the time zone of `created_at`) give identical output.
pub fn format_question_as_text<Tz>(
    question: &GeneratedQuestion,
    metadata: &RecordMetadata,
    created_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    QuestionDocument {
        question,
        metadata,
        created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
    }
    .to_string()
}

/// Render a stored record, with its creation time in the local time zone
pub fn format_record_as_text(record: &HistoryRecord) -> String {
    format_question_as_text(
        &record.question,
        &record.metadata(),
        &record.created_at.with_timezone(&Local),
    )
}

/// Option letter for a zero-based position: A..Z, then AA, AB, ...
pub fn option_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

struct QuestionDocument<'a> {
    question: &'a GeneratedQuestion,
    metadata: &'a RecordMetadata,
    created_at: String,
}

impl Display for QuestionDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== THÔNG TIN CÂU HỎI ===")?;
        writeln!(f, "Thời gian tạo: {}", self.created_at)?;
        if let Some(subject) = present(&self.metadata.subject) {
            writeln!(f, "Môn học: {}", subject)?;
        }
        if let Some(topic) = present(&self.metadata.topic) {
            writeln!(f, "Chủ đề: {}", topic)?;
        }
        if let Some(difficulty) = present(&self.metadata.difficulty) {
            writeln!(f, "Độ khó: {}", difficulty)?;
        }
        writeln!(f)?;
        writeln!(f, "=== NỘI DUNG CÂU HỎI ===")?;
        writeln!(f, "{}", self.question.question)?;
        writeln!(f)?;

        match &self.question.kind {
            QuestionKind::MultipleChoice(choice)
            | QuestionKind::MultipleChoiceReading1(choice)
            | QuestionKind::MultipleChoiceReading2(choice) => write_choice(f, choice)?,
            QuestionKind::TrueFalse(true_false) => write_true_false(f, true_false)?,
            QuestionKind::Essay(essay)
            | QuestionKind::EssayReading(essay)
            | QuestionKind::EssayWriting(essay) => write_essay(f, essay)?,
            QuestionKind::FillInBlank(fill) => write_fill_in_blank(f, fill)?,
            QuestionKind::Matching(matching) => write_matching(f, matching)?,
            QuestionKind::Ordering(ordering) => write_ordering(f, ordering)?,
            QuestionKind::Other { correct_answer, .. } => {
                if let Some(answer) = correct_answer.as_ref().filter(|a| !a.is_blank()) {
                    writeln!(f, "=== ĐÁP ÁN ===")?;
                    writeln!(f, "{}", answer)?;
                }
            }
        }

        if let Some(explanation) = self.question.explanation.as_deref().filter(|e| !e.is_empty()) {
            writeln!(f)?;
            writeln!(f, "=== GIẢI THÍCH ===")?;
            writeln!(f, "{}", explanation)?;
        }

        Ok(())
    }
}

/// Empty strings count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn write_options(f: &mut Formatter<'_>, options: &[String], indent: &str) -> fmt::Result {
    for (index, option) in options.iter().enumerate() {
        writeln!(f, "{}{}. {}", indent, option_letter(index), option)?;
    }
    Ok(())
}

fn write_answer(f: &mut Formatter<'_>, answer: Option<&Answer>) -> fmt::Result {
    match answer {
        Some(answer) => writeln!(f, "{}", answer),
        None => writeln!(f),
    }
}

fn write_choice(f: &mut Formatter<'_>, choice: &ChoiceQuestion) -> fmt::Result {
    if let Some(passage) = present(&choice.passage) {
        writeln!(f, "=== ĐOẠN VĂN ===")?;
        writeln!(f, "{}", passage)?;
        writeln!(f)?;
    }

    match &choice.body {
        ChoiceBody::Cloze(blanks) => {
            writeln!(f, "=== CÁC CHỖ TRỐNG ===")?;
            for blank in blanks {
                writeln!(f, "Chỗ trống {}:", blank.number)?;
                write_options(f, &blank.options, "  ")?;
                writeln!(f, "  Đáp án: {}", blank.correct_answer)?;
                writeln!(f)?;
            }
        }
        ChoiceBody::Reading(questions) => {
            writeln!(f, "=== CÁC CÂU HỎI ===")?;
            for sub in questions {
                writeln!(f, "Câu {}: {}", sub.number, sub.question)?;
                write_options(f, &sub.options, "  ")?;
                writeln!(f, "  Đáp án: {}", sub.correct_answer)?;
                writeln!(f)?;
            }
        }
        ChoiceBody::Options { options, correct_answer } => {
            writeln!(f, "=== CÁC LỰA CHỌN ===")?;
            write_options(f, options, "")?;
            writeln!(f)?;
            writeln!(f, "=== ĐÁP ÁN ĐÚNG ===")?;
            write_answer(f, correct_answer.as_ref())?;
        }
        ChoiceBody::AnswerOnly(_) => {}
    }

    Ok(())
}

fn write_true_false(f: &mut Formatter<'_>, true_false: &TrueFalseQuestion) -> fmt::Result {
    match true_false {
        TrueFalseQuestion::Statements(statements) => {
            writeln!(f, "=== CÁC PHÁT BIỂU ===")?;
            for (index, statement) in statements.iter().enumerate() {
                writeln!(f, "{}. {}", index + 1, statement.text)?;
                writeln!(f, "   Đáp án: {}", truth_label(statement.answer))?;
                if let Some(explanation) = &statement.explanation {
                    writeln!(f, "   Giải thích: {}", explanation)?;
                }
                writeln!(f)?;
            }
        }
        TrueFalseQuestion::Single(answer) => {
            writeln!(f, "=== ĐÁP ÁN ===")?;
            write_answer(f, answer.as_ref())?;
        }
    }
    Ok(())
}

fn write_essay(f: &mut Formatter<'_>, essay: &EssayQuestion) -> fmt::Result {
    if let Some(passage) = present(&essay.passage) {
        writeln!(f, "=== ĐOẠN VĂN THAM KHẢO ===")?;
        writeln!(f, "{}", passage)?;
        writeln!(f)?;
    }

    writeln!(f, "=== GỢI Ý TRẢ LỜI ===")?;
    match essay.suggested_answer.as_ref().filter(|a| !a.is_blank()) {
        Some(answer) => writeln!(f, "{}", answer),
        None => writeln!(f, "{}", NO_SUGGESTION),
    }
}

fn write_fill_in_blank(f: &mut Formatter<'_>, fill: &FillInBlankQuestion) -> fmt::Result {
    writeln!(f, "=== ĐÁP ÁN ===")?;
    match fill {
        FillInBlankQuestion::Blanks(answers) | FillInBlankQuestion::AnswerList(answers) => {
            for (index, answer) in answers.iter().enumerate() {
                writeln!(f, "Chỗ trống {}: {}", index + 1, answer)?;
            }
            Ok(())
        }
        FillInBlankQuestion::Single(answer) => write_answer(f, answer.as_ref()),
    }
}

fn write_matching(f: &mut Formatter<'_>, matching: &MatchingQuestion) -> fmt::Result {
    writeln!(f, "=== CẶP GHÉP ĐÚNG ===")?;
    match matching {
        MatchingQuestion::Pairs(pairs) => {
            for (index, pair) in pairs.iter().enumerate() {
                writeln!(f, "{}. {} → {}", index + 1, pair.left, pair.right)?;
            }
        }
        MatchingQuestion::Columns { left, right } => {
            writeln!(f, "Cột trái: {}", left.join(", "))?;
            writeln!(f, "Cột phải: {}", right.join(", "))?;
        }
        MatchingQuestion::Unmatched => {}
    }
    Ok(())
}

fn write_ordering(f: &mut Formatter<'_>, ordering: &OrderingQuestion) -> fmt::Result {
    writeln!(f, "=== THỨ TỰ ĐÚNG ===")?;
    match ordering {
        OrderingQuestion::Permutation { items, order } => {
            for (position, &item_index) in order.iter().enumerate() {
                // Out-of-range indices render as an empty item
                let item = items.get(item_index).map_or("", String::as_str);
                writeln!(f, "{}. {}", position + 1, item)?;
            }
        }
        OrderingQuestion::Sequence(sequence) => {
            for (index, item) in sequence.iter().enumerate() {
                writeln!(f, "{}. {}", index + 1, item)?;
            }
        }
        OrderingQuestion::Unordered => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{ClozeBlank, MatchPair, ReadingQuestion, Statement};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    fn render(question: &GeneratedQuestion) -> String {
        format_question_as_text(question, &RecordMetadata::default(), &created_at())
    }

    fn question(kind: QuestionKind) -> GeneratedQuestion {
        GeneratedQuestion::new("Câu hỏi mẫu", kind)
    }

    #[test]
    fn test_option_letter() {
        assert_eq!(option_letter(0), "A");
        assert_eq!(option_letter(3), "D");
        assert_eq!(option_letter(25), "Z");
        assert_eq!(option_letter(26), "AA");
        assert_eq!(option_letter(27), "AB");
    }

    #[test]
    fn test_header_with_metadata() {
        let metadata = RecordMetadata::new().subject("toan").topic("Đạo hàm").difficulty("easy");
        let text = format_question_as_text(
            &question(QuestionKind::Other { type_name: "x".to_string(), correct_answer: None }),
            &metadata,
            &created_at(),
        );

        assert_eq!(
            text,
            "=== THÔNG TIN CÂU HỎI ===\n\
             Thời gian tạo: 14:07:09 05/03/2024\n\
             Môn học: toan\n\
             Chủ đề: Đạo hàm\n\
             Độ khó: easy\n\
             \n\
             === NỘI DUNG CÂU HỎI ===\n\
             Câu hỏi mẫu\n\
             \n"
        );
    }

    #[test]
    fn test_flat_multiple_choice() {
        let q = GeneratedQuestion::multiple_choice(
            "2 + 2 = ?",
            vec!["3".to_string(), "4".to_string(), "5".to_string(), "6".to_string()],
            "B",
        )
        .with_explanation("Phép cộng cơ bản");
        let text = render(&q);

        assert!(text.ends_with(
            "=== CÁC LỰA CHỌN ===\nA. 3\nB. 4\nC. 5\nD. 6\n\n=== ĐÁP ÁN ĐÚNG ===\nB\n\n\
             === GIẢI THÍCH ===\nPhép cộng cơ bản\n"
        ));
    }

    #[test]
    fn test_cloze_with_passage() {
        let q = question(QuestionKind::MultipleChoiceReading1(ChoiceQuestion {
            passage: Some("I ___ to school.".to_string()),
            body: ChoiceBody::Cloze(vec![ClozeBlank {
                number: 1,
                options: vec!["go".to_string(), "goes".to_string()],
                correct_answer: Answer::from("A"),
            }]),
        }));

        assert!(render(&q).ends_with(
            "=== ĐOẠN VĂN ===\nI ___ to school.\n\n\
             === CÁC CHỖ TRỐNG ===\nChỗ trống 1:\n  A. go\n  B. goes\n  Đáp án: A\n\n"
        ));
    }

    #[test]
    fn test_reading_sub_questions() {
        let q = question(QuestionKind::MultipleChoiceReading2(ChoiceQuestion {
            passage: None,
            body: ChoiceBody::Reading(vec![ReadingQuestion {
                number: 2,
                question: "Main idea?".to_string(),
                options: vec!["x".to_string(), "y".to_string()],
                correct_answer: Answer::from("B"),
            }]),
        }));

        assert!(render(&q).ends_with(
            "=== CÁC CÂU HỎI ===\nCâu 2: Main idea?\n  A. x\n  B. y\n  Đáp án: B\n\n"
        ));
    }

    #[test]
    fn test_true_false_statements() {
        let q = question(QuestionKind::TrueFalse(TrueFalseQuestion::Statements(vec![
            Statement {
                text: "Nước sôi ở 100°C".to_string(),
                answer: true,
                explanation: Some("Ở áp suất chuẩn".to_string()),
            },
            Statement { text: "Trái Đất phẳng".to_string(), answer: false, explanation: None },
        ])));

        assert!(render(&q).ends_with(
            "=== CÁC PHÁT BIỂU ===\n\
             1. Nước sôi ở 100°C\n   Đáp án: Đúng\n   Giải thích: Ở áp suất chuẩn\n\n\
             2. Trái Đất phẳng\n   Đáp án: Sai\n\n"
        ));
    }

    #[test]
    fn test_true_false_single_answer() {
        let q = question(QuestionKind::TrueFalse(TrueFalseQuestion::Single(Some(
            Answer::from("Đúng"),
        ))));
        assert!(render(&q).ends_with("=== ĐÁP ÁN ===\nĐúng\n"));
    }

    #[test]
    fn test_essay_placeholder_and_passage() {
        let q = question(QuestionKind::EssayReading(EssayQuestion {
            passage: Some("Đoạn trích".to_string()),
            suggested_answer: None,
        }));
        assert!(render(&q).ends_with(
            "=== ĐOẠN VĂN THAM KHẢO ===\nĐoạn trích\n\n=== GỢI Ý TRẢ LỜI ===\nKhông có gợi ý\n"
        ));

        let q = question(QuestionKind::Essay(EssayQuestion {
            passage: None,
            suggested_answer: Some(Answer::from("")),
        }));
        assert!(render(&q).ends_with("=== GỢI Ý TRẢ LỜI ===\nKhông có gợi ý\n"));
    }

    #[test]
    fn test_fill_in_blank_variants() {
        let q = question(QuestionKind::FillInBlank(FillInBlankQuestion::Blanks(vec![
            "một".to_string(),
            "hai".to_string(),
        ])));
        assert!(render(&q).ends_with("=== ĐÁP ÁN ===\nChỗ trống 1: một\nChỗ trống 2: hai\n"));

        let q = question(QuestionKind::FillInBlank(FillInBlankQuestion::Single(Some(
            Answer::from("ba"),
        ))));
        assert!(render(&q).ends_with("=== ĐÁP ÁN ===\nba\n"));
    }

    #[test]
    fn test_matching_pairs_and_columns() {
        let q = question(QuestionKind::Matching(MatchingQuestion::Pairs(vec![
            MatchPair { left: "H2O".to_string(), right: "Nước".to_string() },
            MatchPair { left: "NaCl".to_string(), right: "Muối".to_string() },
        ])));
        assert!(render(&q).ends_with("=== CẶP GHÉP ĐÚNG ===\n1. H2O → Nước\n2. NaCl → Muối\n"));

        let q = question(QuestionKind::Matching(MatchingQuestion::Columns {
            left: vec!["a".to_string(), "b".to_string()],
            right: vec!["1".to_string(), "2".to_string()],
        }));
        assert!(render(&q).ends_with("=== CẶP GHÉP ĐÚNG ===\nCột trái: a, b\nCột phải: 1, 2\n"));
    }

    #[test]
    fn test_ordering_permutation_resolves_items() {
        let q = question(QuestionKind::Ordering(OrderingQuestion::Permutation {
            items: vec!["ba".to_string(), "một".to_string(), "hai".to_string()],
            order: vec![1, 2, 0],
        }));
        assert!(render(&q).ends_with("=== THỨ TỰ ĐÚNG ===\n1. một\n2. hai\n3. ba\n"));
    }

    #[test]
    fn test_ordering_sequence() {
        let q = question(QuestionKind::Ordering(OrderingQuestion::Sequence(vec![
            "x".to_string(),
            "y".to_string(),
        ])));
        assert!(render(&q).ends_with("=== THỨ TỰ ĐÚNG ===\n1. x\n2. y\n"));
    }

    #[test]
    fn test_unknown_type_prints_answer_only_when_present() {
        let with_answer = question(QuestionKind::Other {
            type_name: "short_answer".to_string(),
            correct_answer: Some(Answer::from("42")),
        });
        assert!(render(&with_answer).ends_with("=== ĐÁP ÁN ===\n42\n"));

        let without = question(QuestionKind::Other {
            type_name: "short_answer".to_string(),
            correct_answer: None,
        });
        assert!(render(&without).ends_with("=== NỘI DUNG CÂU HỎI ===\nCâu hỏi mẫu\n\n"));

        let falsy = question(QuestionKind::Other {
            type_name: "short_answer".to_string(),
            correct_answer: Some(Answer::Flag(false)),
        });
        assert!(render(&falsy).ends_with("=== NỘI DUNG CÂU HỎI ===\nCâu hỏi mẫu\n\n"));

        let truthy = question(QuestionKind::Other {
            type_name: "short_answer".to_string(),
            correct_answer: Some(Answer::Flag(true)),
        });
        assert!(render(&truthy).ends_with("=== ĐÁP ÁN ===\ntrue\n"));
    }

    #[test]
    fn test_true_false_raw_answer_printed_as_is() {
        let q = question(QuestionKind::TrueFalse(TrueFalseQuestion::Single(Some(Answer::Flag(
            false,
        )))));
        assert!(render(&q).ends_with("=== ĐÁP ÁN ===\nfalse\n"));
    }

    #[test]
    fn test_empty_metadata_and_passages_are_skipped() {
        let metadata = RecordMetadata::new().subject("").topic("").difficulty("");
        let q = GeneratedQuestion::new(
            "Câu hỏi mẫu",
            QuestionKind::MultipleChoice(ChoiceQuestion {
                passage: Some(String::new()),
                body: ChoiceBody::Options { options: vec!["x".to_string()], correct_answer: None },
            }),
        );
        let text = format_question_as_text(&q, &metadata, &created_at());
        assert!(!text.contains("Môn học"));
        assert!(!text.contains("Chủ đề"));
        assert!(!text.contains("Độ khó"));
        assert!(!text.contains("ĐOẠN VĂN"));

        let essay = question(QuestionKind::Essay(EssayQuestion {
            passage: Some(String::new()),
            suggested_answer: Some(Answer::from("dàn ý")),
        }));
        let text = render(&essay);
        assert!(!text.contains("ĐOẠN VĂN THAM KHẢO"));
        assert!(text.ends_with("=== GỢI Ý TRẢ LỜI ===\ndàn ý\n"));
    }

    #[test]
    fn test_explanation_appended_for_any_type() {
        let q = question(QuestionKind::Matching(MatchingQuestion::Unmatched))
            .with_explanation("Vì vậy");
        assert!(render(&q).ends_with("=== CẶP GHÉP ĐÚNG ===\n\n=== GIẢI THÍCH ===\nVì vậy\n"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let q = GeneratedQuestion::multiple_choice("q", vec!["a".to_string()], "A");
        assert_eq!(render(&q), render(&q));
    }
}
