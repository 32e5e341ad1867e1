//! Keyword routing for free-text information requests.
//!
//! Rules are evaluated in declaration order and the first rule with any keyword
//! contained in the lower-cased message wins. Messages matching no rule fall
//! through to the school presentation.

use crate::domain::information::{InfoCategory, InformationQuery};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopicRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub query: InformationQuery,
}

pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        name: "admission",
        keywords: &["admission", "intégrer", "entrer", "condition"],
        query: InformationQuery { category: InfoCategory::Admission, topic: None },
    },
    TopicRule {
        name: "entrance_exam",
        keywords: &["concours", "examen", "épreuve"],
        query: InformationQuery { category: InfoCategory::EntranceExam, topic: None },
    },
    TopicRule {
        name: "scholarship",
        keywords: &["bourse", "aide financière"],
        query: InformationQuery { category: InfoCategory::StudentLife, topic: Some("Bourses") },
    },
    TopicRule {
        name: "housing",
        keywords: &["logement", "cité", "résidence"],
        query: InformationQuery { category: InfoCategory::StudentLife, topic: Some("Logement") },
    },
    TopicRule {
        name: "contact",
        keywords: &["contact", "adresse", "téléphone"],
        query: InformationQuery { category: InfoCategory::General, topic: Some("Contact") },
    },
];

pub const DEFAULT_QUERY: InformationQuery =
    InformationQuery { category: InfoCategory::General, topic: Some("Présentation ENSPD") };

/// Returns the first matching rule, or `None` when the default applies.
pub fn matching_rule(message: &str) -> Option<&'static TopicRule> {
    let message = message.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| message.contains(keyword)))
}

pub fn classify_message(message: &str) -> InformationQuery {
    matching_rule(message).map(|rule| rule.query).unwrap_or(DEFAULT_QUERY)
}
