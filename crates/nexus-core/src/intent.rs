//! Intent classification: maps free text to a topic and its parameter.
//!
//! Classification is a first-match-wins walk over [`RULES`], an ordered
//! dispatch table of `(keywords, intent, extractor)`. No input can make it
//! fail: anything unmatched becomes [`Query::Topic`]`(`[`Intent::Fallback`]`)`
//! and missing parameters fall back to documented defaults.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::{self, Day};

// ─── Intent ──────────────────────────────────────────────────────────────────

/// The classified topic of a user query.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  strum::Display,
  strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
  Results,
  Timetable,
  Attendance,
  Fees,
  Faculty,
  Placement,
  Project,
  Exam,
  Library,
  Event,
  Contact,
  Admission,
  Fallback,
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// A classified query: the intent plus whatever parameter it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
  /// `year` may lie outside 1–4; the lookup then yields no rows.
  Results { year: u32 },
  Timetable { day: Day },
  /// `batch` is the label as written; it may not be on record.
  Attendance { batch: String },
  /// Any intent that carries no parameter.
  Topic(Intent),
}

impl Query {
  pub fn intent(&self) -> Intent {
    match self {
      Self::Results { .. } => Intent::Results,
      Self::Timetable { .. } => Intent::Timetable,
      Self::Attendance { .. } => Intent::Attendance,
      Self::Topic(intent) => *intent,
    }
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// One row of the dispatch table.
pub struct Rule {
  pub intent:   Intent,
  /// The rule matches when any keyword is a substring of the query.
  pub keywords: &'static [&'static str],
  pub extract:  fn(Intent, &str) -> Query,
}

impl Rule {
  fn matches(&self, query: &str) -> bool {
    self.keywords.iter().any(|k| query.contains(k))
  }
}

const fn topic(intent: Intent, keywords: &'static [&'static str]) -> Rule {
  Rule { intent, keywords, extract: topic_only }
}

/// Rules in priority order: earlier rows win.
pub static RULES: [Rule; 12] = [
  Rule {
    intent:   Intent::Results,
    keywords: &["result", "grade", "marks"],
    extract:  extract_year,
  },
  Rule {
    intent:   Intent::Timetable,
    keywords: &["timetable", "schedule", "class"],
    extract:  extract_day,
  },
  Rule {
    intent:   Intent::Attendance,
    keywords: &["attendance", "present"],
    extract:  extract_batch,
  },
  topic(Intent::Fees, &["fees", "payment", "tuition"]),
  topic(Intent::Faculty, &["faculty", "teacher", "professor"]),
  topic(Intent::Placement, &["placement", "job", "career"]),
  topic(Intent::Project, &["project", "internship", "practical"]),
  topic(Intent::Exam, &["exam", "test", "assessment"]),
  topic(Intent::Library, &["library", "book", "resource"]),
  topic(Intent::Event, &["event", "workshop", "seminar"]),
  topic(Intent::Contact, &["contact", "phone", "email"]),
  topic(Intent::Admission, &["admission", "eligibility", "requirement"]),
];

/// Classify `text` (case-insensitively) and extract its parameter.
pub fn classify(text: &str) -> Query {
  let lowered = text.to_lowercase();

  let query = RULES
    .iter()
    .find(|rule| rule.matches(&lowered))
    .map(|rule| (rule.extract)(rule.intent, &lowered))
    .unwrap_or(Query::Topic(Intent::Fallback));

  tracing::debug!(intent = %query.intent(), "classified query");
  query
}

// ─── Extractors ──────────────────────────────────────────────────────────────

static YEAR_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"year ([0-9])").expect("valid year pattern"));

static BATCH_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([0-9]{4}-[0-9]{4})").expect("valid batch pattern"));

fn topic_only(intent: Intent, _: &str) -> Query { Query::Topic(intent) }

/// `year N` (a single digit); defaults to 1.
fn extract_year(_: Intent, query: &str) -> Query {
  let year = YEAR_RE
    .captures(query)
    .and_then(|c| c[1].parse().ok())
    .unwrap_or(1);
  Query::Results { year }
}

/// The first weekday named anywhere in the query; defaults to Monday.
fn extract_day(_: Intent, query: &str) -> Query {
  let day = Day::all()
    .find(|d| query.contains(&d.to_string().to_lowercase()))
    .unwrap_or_default();
  Query::Timetable { day }
}

/// A `DDDD-DDDD` batch label; defaults to the first batch on record.
fn extract_batch(_: Intent, query: &str) -> Query {
  let batch = BATCH_RE
    .captures(query)
    .map(|c| c[1].to_owned())
    .unwrap_or_else(|| data::default_batch().to_owned());
  Query::Attendance { batch }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn results_keywords() {
    for q in ["my results", "what grade did I get", "show marks"] {
      assert_eq!(classify(q), Query::Results { year: 1 }, "{q}");
    }
  }

  #[test]
  fn results_year_extraction() {
    for year in 1..=4 {
      let q = format!("results for year {year}");
      assert_eq!(classify(&q), Query::Results { year });
    }
  }

  #[test]
  fn out_of_range_year_is_kept() {
    assert_eq!(classify("grades year 7"), Query::Results { year: 7 });
    assert_eq!(classify("grades year 0"), Query::Results { year: 0 });
  }

  #[test]
  fn only_one_year_digit_is_read() {
    assert_eq!(classify("results year 12"), Query::Results { year: 1 });
  }

  #[test]
  fn timetable_day_is_case_insensitive() {
    for day in Day::all() {
      let q = format!("Timetable for {}", day.to_string().to_uppercase());
      assert_eq!(classify(&q), Query::Timetable { day });
    }
  }

  #[test]
  fn timetable_defaults_to_monday() {
    assert_eq!(classify("class schedule"), Query::Timetable { day: Day::Monday });
    assert_eq!(
      classify("timetable for saturday"),
      Query::Timetable { day: Day::Monday }
    );
  }

  #[test]
  fn attendance_batch_extraction() {
    assert_eq!(
      classify("attendance for 2022-2025 batch"),
      Query::Attendance { batch: "2022-2025".into() }
    );
    assert_eq!(
      classify("was I present"),
      Query::Attendance { batch: "2021-2024".into() }
    );
    assert_eq!(
      classify("attendance 1999-2002"),
      Query::Attendance { batch: "1999-2002".into() }
    );
  }

  #[test]
  fn only_ascii_digits_count_as_parameters() {
    assert_eq!(
      classify("attendance ٢٠٢١-٢٠٢٤"),
      Query::Attendance { batch: "2021-2024".into() }
    );
    assert_eq!(classify("results year ٣"), Query::Results { year: 1 });
  }

  #[test]
  fn static_topics() {
    let cases = [
      ("fee payment due?", Intent::Fees),
      ("who is the professor", Intent::Faculty),
      ("career options", Intent::Placement),
      ("internship rules", Intent::Project),
      ("when is the exam", Intent::Exam),
      ("library hours", Intent::Library),
      ("any workshop soon", Intent::Event),
      ("department phone number", Intent::Contact),
      ("admission eligibility", Intent::Admission),
    ];
    for (q, intent) in cases {
      assert_eq!(classify(q), Query::Topic(intent), "{q}");
    }
  }

  #[test]
  fn priority_order_wins() {
    // "class" (timetable) outranks "test" (exam).
    assert_eq!(classify("class test").intent(), Intent::Timetable);
    // "marks" (results) outranks "attendance".
    assert_eq!(classify("attendance marks").intent(), Intent::Results);
  }

  #[test]
  fn unmatched_is_fallback() {
    assert_eq!(classify("hello there"), Query::Topic(Intent::Fallback));
    assert_eq!(classify(""), Query::Topic(Intent::Fallback));
  }

  #[test]
  fn every_intent_but_fallback_has_a_rule() {
    let ruled: Vec<Intent> = RULES.iter().map(|r| r.intent).collect();
    for intent in Intent::iter().filter(|i| *i != Intent::Fallback) {
      assert!(ruled.contains(&intent), "{intent} has no rule");
    }
  }
}
