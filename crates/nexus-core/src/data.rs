//! Mock data tables: static, read-only stand-ins for a real backend.
//!
//! Every table is compiled into the binary; nothing here is ever written.

use strum::{EnumIter, IntoEnumIterator};

// ─── Results ─────────────────────────────────────────────────────────────────

/// One graded subject in a year's results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectResult {
  pub subject: &'static str,
  pub grade:   &'static str,
  pub marks:   u8,
}

const fn result(subject: &'static str, grade: &'static str, marks: u8) -> SubjectResult {
  SubjectResult { subject, grade, marks }
}

static RESULTS_BY_YEAR: [(u32, &[SubjectResult]); 4] = [
  (1, &[
    result("Mathematics", "A", 85),
    result("Physics", "B+", 78),
    result("Chemistry", "A-", 82),
    result("Computer Science", "A", 88),
  ]),
  (2, &[
    result("Data Structures", "A", 90),
    result("Algorithms", "A-", 85),
    result("Machine Learning", "B+", 80),
    result("Statistics", "A", 87),
  ]),
  (3, &[
    result("Deep Learning", "A", 92),
    result("Computer Vision", "A-", 88),
    result("NLP", "B+", 82),
    result("AI Ethics", "A", 89),
  ]),
  (4, &[
    result("Advanced ML", "A", 95),
    result("Big Data", "A-", 90),
    result("Project", "A", 96),
    result("Internship", "A", 93),
  ]),
];

/// Results for `year`; empty for any year outside the table.
pub fn results_for_year(year: u32) -> &'static [SubjectResult] {
  RESULTS_BY_YEAR
    .iter()
    .find(|(y, _)| *y == year)
    .map(|(_, rows)| *rows)
    .unwrap_or_default()
}

// ─── Timetable ───────────────────────────────────────────────────────────────

/// A teaching day. Only weekdays carry a timetable.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  EnumIter,
  strum::Display,
)]
pub enum Day {
  #[default]
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
}

impl Day {
  /// All teaching days in table order.
  pub fn all() -> impl Iterator<Item = Day> { Day::iter() }

  /// The time slots taught on this day.
  pub fn slots(self) -> &'static [&'static str] {
    match self {
      Day::Monday => &["ML 9-11", "DL 11-1", "CV 2-4"],
      Day::Tuesday => &["NLP 9-11", "AI Ethics 11-1", "Project 2-4"],
      Day::Wednesday => &["Data Mining 9-11", "Big Data 11-1", "Seminar 2-4"],
      Day::Thursday => &["Advanced ML 9-11", "Research 11-1", "Lab 2-4"],
      Day::Friday => &["Review 9-11", "Presentation 11-1"],
    }
  }
}

// ─── Attendance ──────────────────────────────────────────────────────────────

/// Classes attended out of classes held, with the recorded percentage.
///
/// The percentage is stored, not computed, so it matches the department's
/// published figures exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tally {
  pub attended:   u32,
  pub total:      u32,
  pub percentage: f64,
}

const fn tally(attended: u32, total: u32, percentage: f64) -> Tally {
  Tally { attended, total, percentage }
}

/// Attendance for every subject of one batch plus the overall figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchAttendance {
  /// Batch label in `YYYY-YYYY` form.
  pub batch:    &'static str,
  /// Subject tallies in display order.
  pub subjects: &'static [(&'static str, Tally)],
  pub overall:  Tally,
}

static ATTENDANCE_BY_BATCH: [BatchAttendance; 3] = [
  BatchAttendance {
    batch:    "2021-2024",
    subjects: &[
      ("Machine Learning", tally(45, 50, 90.0)),
      ("Deep Learning", tally(42, 48, 87.5)),
      ("Computer Vision", tally(38, 45, 84.4)),
      ("NLP", tally(40, 46, 87.0)),
      ("AI Ethics", tally(44, 48, 91.7)),
    ],
    overall:  tally(209, 237, 88.2),
  },
  BatchAttendance {
    batch:    "2022-2025",
    subjects: &[
      ("Data Structures", tally(43, 48, 89.6)),
      ("Algorithms", tally(41, 46, 89.1)),
      ("Machine Learning", tally(44, 50, 88.0)),
      ("Statistics", tally(39, 44, 88.6)),
      ("Big Data", tally(42, 48, 87.5)),
    ],
    overall:  tally(209, 236, 88.6),
  },
  BatchAttendance {
    batch:    "2023-2026",
    subjects: &[
      ("Mathematics", tally(46, 50, 92.0)),
      ("Physics", tally(44, 48, 91.7)),
      ("Chemistry", tally(42, 46, 91.3)),
      ("Computer Science", tally(45, 48, 93.8)),
      ("Data Structures", tally(43, 46, 93.5)),
    ],
    overall:  tally(220, 238, 92.4),
  },
];

/// Every batch with attendance records, in table order.
pub fn batches() -> &'static [BatchAttendance] { &ATTENDANCE_BY_BATCH }

/// The batch used when a query names none.
pub fn default_batch() -> &'static str { ATTENDANCE_BY_BATCH[0].batch }

/// Attendance for `batch`, if the batch is on record.
pub fn attendance_for_batch(batch: &str) -> Option<&'static BatchAttendance> {
  ATTENDANCE_BY_BATCH.iter().find(|b| b.batch == batch)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_year_has_four_subjects() {
    for year in 1..=4 {
      assert_eq!(results_for_year(year).len(), 4, "year {year}");
    }
  }

  #[test]
  fn unknown_year_is_empty() {
    assert!(results_for_year(0).is_empty());
    assert!(results_for_year(5).is_empty());
  }

  #[test]
  fn friday_has_two_slots() {
    assert_eq!(Day::Friday.slots().len(), 2);
    assert_eq!(Day::all().count(), 5);
    assert_eq!(Day::default(), Day::Monday);
  }

  #[test]
  fn attendance_lookup() {
    let b = attendance_for_batch("2021-2024").unwrap();
    assert_eq!(b.overall, tally(209, 237, 88.2));
    assert!(attendance_for_batch("1999-2002").is_none());
    assert_eq!(default_batch(), "2021-2024");
  }
}
