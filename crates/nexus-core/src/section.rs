//! Dashboard sections: static informational pages addressed by slug.

use crate::{Error, Result};

/// A dashboard tile and the page behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
  pub name:        &'static str,
  /// One-line summary shown on the dashboard tile.
  pub description: &'static str,
  /// Heading of the detail page.
  pub title:       &'static str,
  pub content:     &'static str,
}

impl Section {
  /// The route segment for this section: its name lowercased, spaces as
  /// dashes.
  pub fn slug(&self) -> String { slugify(self.name) }
}

/// Lowercase `name` and replace spaces with `-`.
pub fn slugify(name: &str) -> String { name.to_lowercase().replace(' ', "-") }

/// Placeholder shown for an unknown section.
pub const NOT_FOUND: &str = "Section not found";

static SECTIONS: [Section; 5] = [
  Section {
    name:        "Attendance",
    description: "View your attendance records",
    title:       "Attendance Records",
    content:     "Your attendance for AIML courses is 85%. You have attended \
                  17 out of 20 classes this semester.",
  },
  Section {
    name:        "Timetable",
    description: "Check your class schedule",
    title:       "Class Timetable",
    content:     "Monday: Machine Learning (9:00-10:30), Deep Learning (11:00-12:30)
Tuesday: Data Structures (9:00-10:30), AI Ethics (11:00-12:30)
Wednesday: Neural Networks (9:00-10:30), Computer Vision (11:00-12:30)
Thursday: Natural Language Processing (9:00-10:30), Big Data Analytics (11:00-12:30)
Friday: Project Work (9:00-12:00)",
  },
  Section {
    name:        "Results",
    description: "View your academic results",
    title:       "Academic Results",
    content:     "Semester 1: GPA 8.5
Semester 2: GPA 8.7
Semester 3: GPA 9.0
Overall GPA: 8.7",
  },
  Section {
    name:        "Academic Details",
    description: "Access your academic information",
    title:       "Academic Details",
    content:     "Program: B.Tech in Artificial Intelligence and Machine Learning
Year: 3rd Year
Specialization: Deep Learning and Computer Vision
Credits Completed: 120/160
Expected Graduation: 2025",
  },
  Section {
    name:        "Fees Structure",
    description: "Check fees and payment details",
    title:       "Fees Structure",
    content:     "Tuition Fee: ₹1,50,000 per year
Hostel Fee: ₹80,000 per year
Mess Fee: ₹40,000 per year
Total Annual Fee: ₹2,70,000
Scholarship Available: ₹50,000 (based on merit)
Net Payable: ₹2,20,000",
  },
];

/// All sections in dashboard order.
pub fn sections() -> &'static [Section] { &SECTIONS }

/// Look up a section by slug.
pub fn find(slug: &str) -> Result<&'static Section> {
  SECTIONS
    .iter()
    .find(|s| s.slug() == slug)
    .ok_or_else(|| Error::SectionNotFound(slug.to_owned()))
}
