//! Participant categories and sender classification.
//!
//! Every parsed message is tagged with a [`Category`] derived from its raw
//! sender token. The rule that maps a sender to a category lives behind the
//! [`ParticipantClassifier`] trait so deployments can swap it without
//! touching the parser.
//!
//! The default rule, [`NameOrNumber`], reflects how mentoring groups are
//! usually exported: mentors are saved contacts (the export shows a name),
//! students are not (the export shows a phone number).
//!
//! ```
//! use chatpulse::category::{Category, NameOrNumber, ParticipantClassifier};
//!
//! let classifier = NameOrNumber;
//! assert_eq!(classifier.classify("Alice"), Category::Mentor);
//! assert_eq!(classifier.classify("+15551234567"), Category::Student);
//! assert_eq!(classifier.classify("🦄"), Category::Unknown);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;

/// Participant role assigned to a message sender.
///
/// The declaration order is the fixed priority order used wherever a
/// deterministic tie-break between categories is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sender shown by name.
    Mentor,
    /// Sender shown by phone number (or any token containing digits).
    Student,
    /// Sender matching neither rule.
    Unknown,
}

impl Category {
    /// All categories in priority order.
    pub const ALL: [Category; 3] = [Category::Mentor, Category::Student, Category::Unknown];

    /// Returns the display label of this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Mentor => "Mentor",
            Category::Student => "Student",
            Category::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mentor" | "m" => Ok(Category::Mentor),
            "student" | "s" => Ok(Category::Student),
            "unknown" => Ok(Category::Unknown),
            _ => Err(format!(
                "Unknown category: '{}'. Expected one of: mentor, student, unknown",
                s
            )),
        }
    }
}

/// Maps a raw sender token to a [`Category`].
///
/// Implemented for any `Fn(&str) -> Category`, so a closure is enough for
/// one-off rules:
///
/// ```
/// use chatpulse::category::{Category, ParticipantClassifier};
///
/// let everyone_is_a_student = |_: &str| Category::Student;
/// assert_eq!(everyone_is_a_student.classify("Alice"), Category::Student);
/// ```
pub trait ParticipantClassifier {
    /// Classifies a raw sender token.
    fn classify(&self, sender: &str) -> Category;
}

impl<F> ParticipantClassifier for F
where
    F: Fn(&str) -> Category,
{
    fn classify(&self, sender: &str) -> Category {
        self(sender)
    }
}

/// Default classifier: names are mentors, numbers are students.
///
/// - any digit anywhere in the token → [`Category::Student`]
/// - only letters, combining marks (virama, accents) and name punctuation
///   (space, `.`, `'`, `-`) → [`Category::Mentor`]
/// - anything else (emoji, symbols, empty) → [`Category::Unknown`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameOrNumber;

impl ParticipantClassifier for NameOrNumber {
    fn classify(&self, sender: &str) -> Category {
        classify_sender(sender)
    }
}

/// Applies the [`NameOrNumber`] rule to a sender token.
pub fn classify_sender(sender: &str) -> Category {
    let sender = sender.trim();

    if sender.chars().any(char::is_numeric) {
        return Category::Student;
    }

    let has_letter = sender.chars().any(char::is_alphabetic);
    let name_like = sender
        .chars()
        .all(|c| c.is_alphabetic() || is_combining_mark(c) || is_name_punctuation(c));

    if has_letter && name_like {
        Category::Mentor
    } else {
        Category::Unknown
    }
}

fn is_name_punctuation(c: char) -> bool {
    matches!(c, ' ' | '.' | '\'' | '-' | '\u{a0}')
}

/// Explicit per-deployment roster consulted before a fallback classifier.
///
/// Names are matched case-insensitively after trimming.
///
/// ```
/// use chatpulse::category::{Category, NameOrNumber, ParticipantClassifier, Roster};
///
/// let roster = Roster::new(NameOrNumber)
///     .with_student("Priya")
///     .with_mentor("+91 98765 43210");
///
/// assert_eq!(roster.classify("priya"), Category::Student);
/// assert_eq!(roster.classify("+91 98765 43210"), Category::Mentor);
/// assert_eq!(roster.classify("Alice"), Category::Mentor);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Roster<C> {
    mentors: HashSet<String>,
    students: HashSet<String>,
    fallback: C,
}

impl<C: ParticipantClassifier> Roster<C> {
    /// Creates an empty roster on top of `fallback`.
    pub fn new(fallback: C) -> Self {
        Self {
            mentors: HashSet::new(),
            students: HashSet::new(),
            fallback,
        }
    }

    /// Registers a sender that must be classified as a mentor.
    #[must_use]
    pub fn with_mentor(mut self, name: impl AsRef<str>) -> Self {
        self.mentors.insert(roster_key(name.as_ref()));
        self
    }

    /// Registers a sender that must be classified as a student.
    #[must_use]
    pub fn with_student(mut self, name: impl AsRef<str>) -> Self {
        self.students.insert(roster_key(name.as_ref()));
        self
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty() && self.students.is_empty()
    }
}

impl<C: ParticipantClassifier> ParticipantClassifier for Roster<C> {
    fn classify(&self, sender: &str) -> Category {
        let key = roster_key(sender);
        if self.mentors.contains(&key) {
            Category::Mentor
        } else if self.students.contains(&key) {
            Category::Student
        } else {
            self.fallback.classify(sender)
        }
    }
}

fn roster_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_mentors() {
        assert_eq!(classify_sender("Alice"), Category::Mentor);
        assert_eq!(classify_sender("Dr. Jane Smith"), Category::Mentor);
        assert_eq!(classify_sender("Mary-Jane O'Neil"), Category::Mentor);
        assert_eq!(classify_sender("Иван"), Category::Mentor);
    }

    #[test]
    fn test_names_with_combining_marks_are_mentors() {
        assert_eq!(classify_sender("प्रिया"), Category::Mentor);
        assert_eq!(classify_sender("Jose\u{301}"), Category::Mentor);
        assert_eq!(classify_sender("श्री राम"), Category::Mentor);
        // a mark alone is not a name
        assert_eq!(classify_sender("\u{301}"), Category::Unknown);
    }

    #[test]
    fn test_numbers_are_students() {
        assert_eq!(classify_sender("+15551234567"), Category::Student);
        assert_eq!(classify_sender("+91 98765 43210"), Category::Student);
        assert_eq!(classify_sender("42"), Category::Student);
        assert_eq!(classify_sender("Alice2"), Category::Student);
    }

    #[test]
    fn test_everything_else_is_unknown() {
        assert_eq!(classify_sender(""), Category::Unknown);
        assert_eq!(classify_sender("   "), Category::Unknown);
        assert_eq!(classify_sender("+"), Category::Unknown);
        assert_eq!(classify_sender("🦄"), Category::Unknown);
        assert_eq!(classify_sender("Alice 🦄"), Category::Unknown);
        assert_eq!(classify_sender("..."), Category::Unknown);
    }

    #[test]
    fn test_closure_classifier() {
        let by_prefix = |s: &str| {
            if s.starts_with("Coach") {
                Category::Mentor
            } else {
                Category::Student
            }
        };
        assert_eq!(by_prefix.classify("Coach Sam"), Category::Mentor);
        assert_eq!(by_prefix.classify("Sam"), Category::Student);
    }

    #[test]
    fn test_roster_overrides_fallback() {
        let roster = Roster::new(NameOrNumber)
            .with_student("  Bob ")
            .with_mentor("+44 7700 900123");

        assert!(!roster.is_empty());
        assert_eq!(roster.classify("BOB"), Category::Student);
        assert_eq!(roster.classify("+44 7700 900123"), Category::Mentor);
        assert_eq!(roster.classify("Carol"), Category::Mentor);
        assert_eq!(roster.classify("12345"), Category::Student);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("mentor".parse::<Category>().unwrap(), Category::Mentor);
        assert_eq!("S".parse::<Category>().unwrap(), Category::Student);
        assert_eq!("Unknown".parse::<Category>().unwrap(), Category::Unknown);
        assert!("coach".parse::<Category>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert!(Category::Mentor < Category::Student);
        assert!(Category::Student < Category::Unknown);
        assert_eq!(Category::ALL[0], Category::Mentor);
    }
}
