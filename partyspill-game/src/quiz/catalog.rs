//! Built-in quizzes.
use super::{QuestionKind, QuestionRef, Quiz, QuizQuestion, encode_answer, hash_password};
use crate::constants::ENCRYPTION_SALT;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const CATEGORIES: [QuizCategory; 4] = [
    QuizCategory {
        id: "general",
        title: "Allmennkunnskap",
        description: "Generelle spørsmål om verden rundt oss",
    },
    QuizCategory {
        id: "norway",
        title: "Norge",
        description: "Spørsmål om norsk kultur, historie og geografi",
    },
    QuizCategory {
        id: "entertainment",
        title: "Underholdning",
        description: "Spørsmål om film, musikk og TV",
    },
    QuizCategory {
        id: "food",
        title: "Mat og Drikke",
        description: "Spørsmål om kulinariske emner",
    },
];

#[must_use]
pub const fn categories() -> &'static [QuizCategory] {
    &CATEGORIES
}

fn obfuscate(answer: &str) -> String {
    encode_answer(answer, ENCRYPTION_SALT).unwrap_or_default()
}

fn choice(id: &str, prompt: &str, options: &[&str], answer: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        kind: QuestionKind::MultipleChoice {
            options: options.iter().map(ToString::to_string).collect(),
        },
        prompt: prompt.to_string(),
        obfuscated_answer: obfuscate(answer),
    }
}

fn text(id: &str, prompt: &str, answer: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        kind: QuestionKind::Text,
        prompt: prompt.to_string(),
        obfuscated_answer: obfuscate(answer),
    }
}

fn build_catalog() -> Vec<Quiz> {
    vec![
        Quiz {
            id: "mixed-quiz".to_string(),
            title: "Allmennkunnskap Quiz".to_string(),
            description: "Test din kunnskap om Norge og verden".to_string(),
            password_hash: Some(hash_password("allmenn")),
            questions: vec![
                choice(
                    "1",
                    "Når er Norges nasjonaldag?",
                    &["1. mai", "17. mai", "6. juni", "24. desember"],
                    "17. mai",
                ),
                text("2", "Hva heter Norges hovedstad?", "Oslo"),
                choice(
                    "3",
                    "Hvilken farge er ikke i det norske flagget?",
                    &["Rød", "Hvit", "Blå", "Gul"],
                    "Gul",
                ),
                choice(
                    "4",
                    "Hvilket år startet andre verdenskrig?",
                    &["1914", "1939", "1945", "1950"],
                    "1939",
                ),
                text("5", "Hva er hovedingrediensen i guacamole?", "Avokado"),
                choice(
                    "6",
                    "Hvilken planet er kjent som den røde planeten?",
                    &["Venus", "Jupiter", "Mars", "Saturn"],
                    "Mars",
                ),
                choice(
                    "7",
                    "Hva er hovedstaden i Japan?",
                    &["Beijing", "Seoul", "Tokyo", "Bangkok"],
                    "Tokyo",
                ),
                text("8", "Hvor mange bein har et voksent menneske?", "206"),
                choice(
                    "9",
                    "Hvilket element har symbolet \"O\" i periodesystemet?",
                    &["Osmium", "Oksygen", "Oganesson", "Oksid"],
                    "Oksygen",
                ),
                choice(
                    "10",
                    "Hvilken frukt er kjent som \"kjærlighetseple\" på norsk?",
                    &["Eple", "Tomat", "Fersken", "Jordbær"],
                    "Tomat",
                ),
            ],
        },
        Quiz {
            id: "norway-quiz".to_string(),
            title: "Norgesquiz".to_string(),
            description: "Test din kunnskap om Norge".to_string(),
            password_hash: Some(hash_password("norge")),
            questions: vec![
                choice(
                    "1",
                    "Hva heter Norges høyeste fjell?",
                    &["Glittertind", "Galdhøpiggen", "Snøhetta", "Gaustatoppen"],
                    "Galdhøpiggen",
                ),
                text("2", "Hvilken by kalles \"Nordens Paris\"?", "Trondheim"),
                choice(
                    "3",
                    "Hvilket år fikk Norge sin egen grunnlov?",
                    &["1814", "1905", "1945", "1994"],
                    "1814",
                ),
                choice(
                    "4",
                    "Hvilken norsk forfatter skrev \"Sult\"?",
                    &["Henrik Ibsen", "Knut Hamsun", "Sigrid Undset", "Jo Nesbø"],
                    "Knut Hamsun",
                ),
                text("5", "Hva heter Norges lengste elv?", "Glomma"),
            ],
        },
    ]
}

/// Every built-in quiz.
pub fn quizzes() -> &'static [Quiz] {
    static CATALOG: OnceLock<Vec<Quiz>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

#[must_use]
pub fn quiz_by_id(id: &str) -> Option<&'static Quiz> {
    quizzes().iter().find(|quiz| quiz.id == id)
}

#[must_use]
pub fn question_by_ref(question: &QuestionRef) -> Option<&'static QuizQuestion> {
    quiz_by_id(&question.quiz_id)?.question(&question.question_id)
}

/// Every question of every quiz, in catalog order.
#[must_use]
pub fn all_question_refs() -> Vec<QuestionRef> {
    quizzes()
        .iter()
        .flat_map(|quiz| {
            quiz.questions
                .iter()
                .map(|q| QuestionRef::new(quiz.id.as_str(), q.id.as_str()))
        })
        .collect()
}
