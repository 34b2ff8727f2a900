use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A generated exam question.
///
/// In memory the payload is a closed sum type keyed by question kind. On the wire
/// it keeps the flat camelCase layout with a `type` discriminator, so exported
/// indexes stay readable by the web client that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireQuestion", into = "WireQuestion")]
pub struct GeneratedQuestion {
    pub question: String,
    pub explanation: Option<String>,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    MultipleChoice(ChoiceQuestion),
    MultipleChoiceReading1(ChoiceQuestion),
    MultipleChoiceReading2(ChoiceQuestion),
    TrueFalse(TrueFalseQuestion),
    Essay(EssayQuestion),
    EssayReading(EssayQuestion),
    EssayWriting(EssayQuestion),
    FillInBlank(FillInBlankQuestion),
    Matching(MatchingQuestion),
    Ordering(OrderingQuestion),
    /// A `type` this crate has no dedicated rendering for.
    Other { type_name: String, correct_answer: Option<Answer> },
}

/// Correct answer as stored by the generator: a text, a list or a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
    Flag(bool),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceQuestion {
    pub passage: Option<String>,
    pub body: ChoiceBody,
}

/// Exactly one of the choice layouts. Cloze wins over reading, reading over flat options.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceBody {
    Cloze(Vec<ClozeBlank>),
    Reading(Vec<ReadingQuestion>),
    Options { options: Vec<String>, correct_answer: Option<Answer> },
    AnswerOnly(Option<Answer>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeBlank {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingQuestion {
    #[serde(default)]
    pub number: u32,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Answer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrueFalseQuestion {
    Statements(Vec<Statement>),
    Single(Option<Answer>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub answer: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EssayQuestion {
    pub passage: Option<String>,
    pub suggested_answer: Option<Answer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillInBlankQuestion {
    /// Structured per-blank answers (`blanks`).
    Blanks(Vec<String>),
    /// `correctAnswer` given as a list, one entry per blank.
    AnswerList(Vec<String>),
    Single(Option<Answer>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchingQuestion {
    Pairs(Vec<MatchPair>),
    Columns { left: Vec<String>, right: Vec<String> },
    Unmatched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderingQuestion {
    /// `order[position]` is the index into `items` of the item at that position.
    Permutation { items: Vec<String>, order: Vec<usize> },
    Sequence(Vec<String>),
    Unordered,
}

impl GeneratedQuestion {
    pub fn new(question: impl Into<String>, kind: QuestionKind) -> Self {
        Self { question: question.into(), explanation: None, kind }
    }

    /// Flat multiple-choice question with lettered options.
    pub fn multiple_choice(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self::new(
            question,
            QuestionKind::MultipleChoice(ChoiceQuestion {
                passage: None,
                body: ChoiceBody::Options {
                    options,
                    correct_answer: Some(Answer::Text(correct_answer.into())),
                },
            }),
        )
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Wire discriminator of this question.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Flat option list, if the question has one. Used by search.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice(choice)
            | QuestionKind::MultipleChoiceReading1(choice)
            | QuestionKind::MultipleChoiceReading2(choice) => match &choice.body {
                ChoiceBody::Options { options, .. } => options,
                _ => &[],
            },
            _ => &[],
        }
    }
}

impl QuestionKind {
    pub fn type_name(&self) -> &str {
        match self {
            Self::MultipleChoice(_) => "multiple_choice",
            Self::MultipleChoiceReading1(_) => "multiple_choice_reading1",
            Self::MultipleChoiceReading2(_) => "multiple_choice_reading2",
            Self::TrueFalse(_) => "true_false",
            Self::Essay(_) => "essay",
            Self::EssayReading(_) => "essay_reading",
            Self::EssayWriting(_) => "essay_writing",
            Self::FillInBlank(_) => "fill_in_blank",
            Self::Matching(_) => "matching",
            Self::Ordering(_) => "ordering",
            Self::Other { type_name, .. } => type_name,
        }
    }
}

impl Answer {
    /// Mirrors the generator's notion of "no answer": an empty string, `false` or zero.
    /// Lists always count as an answer, even empty ones.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(_) => false,
            Self::Flag(flag) => !flag,
            Self::Number(number) => number.as_f64() == Some(0.0),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Flag(flag) => write!(f, "{}", flag),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Vietnamese rendering of a boolean answer.
pub fn truth_label(value: bool) -> &'static str {
    if value { "Đúng" } else { "Sai" }
}

/// Flat wire layout shared by every question type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireQuestion {
    #[serde(rename = "type")]
    question_type: String,
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_answer: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    passage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cloze_blanks: Option<Vec<ClozeBlank>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reading_questions: Option<Vec<ReadingQuestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    statements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    statement_answers: Option<Vec<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    statement_explanations: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blanks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_matches: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_order: Option<Vec<usize>>,
}

impl From<WireQuestion> for GeneratedQuestion {
    fn from(wire: WireQuestion) -> Self {
        let kind = match wire.question_type.as_str() {
            "multiple_choice" => QuestionKind::MultipleChoice(choice_from_wire(&wire)),
            "multiple_choice_reading1" => {
                QuestionKind::MultipleChoiceReading1(choice_from_wire(&wire))
            }
            "multiple_choice_reading2" => {
                QuestionKind::MultipleChoiceReading2(choice_from_wire(&wire))
            }
            "true_false" => QuestionKind::TrueFalse(true_false_from_wire(&wire)),
            "essay" => QuestionKind::Essay(essay_from_wire(&wire)),
            "essay_reading" => QuestionKind::EssayReading(essay_from_wire(&wire)),
            "essay_writing" => QuestionKind::EssayWriting(essay_from_wire(&wire)),
            "fill_in_blank" => QuestionKind::FillInBlank(fill_in_blank_from_wire(&wire)),
            "matching" => QuestionKind::Matching(matching_from_wire(&wire)),
            "ordering" => QuestionKind::Ordering(ordering_from_wire(&wire)),
            other => QuestionKind::Other {
                type_name: other.to_string(),
                correct_answer: wire.correct_answer.clone(),
            },
        };

        Self { question: wire.question, explanation: wire.explanation, kind }
    }
}

fn choice_from_wire(wire: &WireQuestion) -> ChoiceQuestion {
    let body = if let Some(blanks) = &wire.cloze_blanks {
        ChoiceBody::Cloze(blanks.clone())
    } else if let Some(questions) = &wire.reading_questions {
        ChoiceBody::Reading(questions.clone())
    } else if let Some(options) = &wire.options {
        ChoiceBody::Options { options: options.clone(), correct_answer: wire.correct_answer.clone() }
    } else {
        ChoiceBody::AnswerOnly(wire.correct_answer.clone())
    };

    ChoiceQuestion { passage: wire.passage.clone(), body }
}

fn true_false_from_wire(wire: &WireQuestion) -> TrueFalseQuestion {
    match (&wire.statements, &wire.statement_answers) {
        (Some(statements), Some(answers)) => {
            let explanations = wire.statement_explanations.as_deref().unwrap_or(&[]);
            TrueFalseQuestion::Statements(
                statements
                    .iter()
                    .enumerate()
                    .map(|(i, text)| Statement {
                        text: text.clone(),
                        answer: answers.get(i).copied().unwrap_or(false),
                        explanation: explanations
                            .get(i)
                            .cloned()
                            .flatten()
                            .filter(|e| !e.is_empty()),
                    })
                    .collect(),
            )
        }
        _ => TrueFalseQuestion::Single(wire.correct_answer.clone()),
    }
}

fn essay_from_wire(wire: &WireQuestion) -> EssayQuestion {
    EssayQuestion { passage: wire.passage.clone(), suggested_answer: wire.correct_answer.clone() }
}

fn fill_in_blank_from_wire(wire: &WireQuestion) -> FillInBlankQuestion {
    if let Some(blanks) = &wire.blanks {
        FillInBlankQuestion::Blanks(blanks.clone())
    } else if let Some(Answer::List(answers)) = &wire.correct_answer {
        FillInBlankQuestion::AnswerList(answers.clone())
    } else {
        FillInBlankQuestion::Single(wire.correct_answer.clone())
    }
}

fn matching_from_wire(wire: &WireQuestion) -> MatchingQuestion {
    if let Some(matches) = &wire.correct_matches {
        MatchingQuestion::Pairs(
            matches
                .iter()
                .map(|(left, right)| MatchPair {
                    left: left.clone(),
                    right: match right {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    },
                })
                .collect(),
        )
    } else if let (Some(left), Some(right)) = (&wire.left_items, &wire.right_items) {
        MatchingQuestion::Columns { left: left.clone(), right: right.clone() }
    } else {
        MatchingQuestion::Unmatched
    }
}

fn ordering_from_wire(wire: &WireQuestion) -> OrderingQuestion {
    if let (Some(order), Some(items)) = (&wire.correct_order, &wire.items) {
        OrderingQuestion::Permutation { items: items.clone(), order: order.clone() }
    } else if let Some(Answer::List(sequence)) = &wire.correct_answer {
        OrderingQuestion::Sequence(sequence.clone())
    } else {
        OrderingQuestion::Unordered
    }
}

impl From<GeneratedQuestion> for WireQuestion {
    fn from(question: GeneratedQuestion) -> Self {
        let mut wire = WireQuestion {
            question_type: question.kind.type_name().to_string(),
            question: question.question,
            explanation: question.explanation,
            ..Default::default()
        };

        match question.kind {
            QuestionKind::MultipleChoice(choice)
            | QuestionKind::MultipleChoiceReading1(choice)
            | QuestionKind::MultipleChoiceReading2(choice) => {
                wire.passage = choice.passage;
                match choice.body {
                    ChoiceBody::Cloze(blanks) => wire.cloze_blanks = Some(blanks),
                    ChoiceBody::Reading(questions) => wire.reading_questions = Some(questions),
                    ChoiceBody::Options { options, correct_answer } => {
                        wire.options = Some(options);
                        wire.correct_answer = correct_answer;
                    }
                    ChoiceBody::AnswerOnly(correct_answer) => wire.correct_answer = correct_answer,
                }
            }
            QuestionKind::TrueFalse(TrueFalseQuestion::Statements(statements)) => {
                let has_explanations = statements.iter().any(|s| s.explanation.is_some());
                let mut texts = Vec::with_capacity(statements.len());
                let mut answers = Vec::with_capacity(statements.len());
                let mut explanations = Vec::with_capacity(statements.len());
                for statement in statements {
                    texts.push(statement.text);
                    answers.push(statement.answer);
                    explanations.push(statement.explanation);
                }
                wire.statements = Some(texts);
                wire.statement_answers = Some(answers);
                if has_explanations {
                    wire.statement_explanations = Some(explanations);
                }
            }
            QuestionKind::TrueFalse(TrueFalseQuestion::Single(correct_answer)) => {
                wire.correct_answer = correct_answer;
            }
            QuestionKind::Essay(essay)
            | QuestionKind::EssayReading(essay)
            | QuestionKind::EssayWriting(essay) => {
                wire.passage = essay.passage;
                wire.correct_answer = essay.suggested_answer;
            }
            QuestionKind::FillInBlank(FillInBlankQuestion::Blanks(blanks)) => {
                wire.blanks = Some(blanks);
            }
            QuestionKind::FillInBlank(FillInBlankQuestion::AnswerList(answers)) => {
                wire.correct_answer = Some(Answer::List(answers));
            }
            QuestionKind::FillInBlank(FillInBlankQuestion::Single(correct_answer)) => {
                wire.correct_answer = correct_answer;
            }
            QuestionKind::Matching(MatchingQuestion::Pairs(pairs)) => {
                wire.correct_matches = Some(
                    pairs.into_iter().map(|pair| (pair.left, Value::String(pair.right))).collect(),
                );
            }
            QuestionKind::Matching(MatchingQuestion::Columns { left, right }) => {
                wire.left_items = Some(left);
                wire.right_items = Some(right);
            }
            QuestionKind::Matching(MatchingQuestion::Unmatched) => {}
            QuestionKind::Ordering(OrderingQuestion::Permutation { items, order }) => {
                wire.items = Some(items);
                wire.correct_order = Some(order);
            }
            QuestionKind::Ordering(OrderingQuestion::Sequence(sequence)) => {
                wire.correct_answer = Some(Answer::List(sequence));
            }
            QuestionKind::Ordering(OrderingQuestion::Unordered) => {}
            QuestionKind::Other { correct_answer, .. } => wire.correct_answer = correct_answer,
        }

        wire
    }
}
