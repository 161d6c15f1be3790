//! Response formatting: renders a classified [`Query`] as reply text.

use crate::{
  data::{self, BatchAttendance, Day},
  intent::{self, Intent, Query},
};

/// Overall attendance at or above this percentage is "Safe".
pub const ATTENDANCE_THRESHOLD: f64 = 75.0;

/// Classify `text` and render the reply in one step.
pub fn answer(text: &str) -> String { render(&intent::classify(text)) }

/// Render the reply for an already-classified query.
pub fn render(query: &Query) -> String {
  match query {
    Query::Results { year } => render_results(*year),
    Query::Timetable { day } => render_timetable(*day),
    Query::Attendance { batch } => match data::attendance_for_batch(batch) {
      Some(record) => render_attendance(record),
      None => render_unknown_batch(),
    },
    Query::Topic(intent) => topic_text(*intent).to_owned(),
  }
}

// ─── Tabular replies ─────────────────────────────────────────────────────────

fn render_results(year: u32) -> String {
  let lines: Vec<String> = data::results_for_year(year)
    .iter()
    .map(|r| format!("{}: {} ({}%)", r.subject, r.grade, r.marks))
    .collect();

  format!(
    "Here are your Year {year} results for AIML Department at Dayananda \
     Sagar College:\n{}\n\nFor detailed grade analysis or revaluation, \
     please contact the department office.",
    lines.join("\n")
  )
}

fn render_timetable(day: Day) -> String {
  format!(
    "Your {day} timetable for AIML Department:\n{}\n\nNote: Timetables are \
     subject to change. Check the college portal for updates.",
    day.slots().join("\n")
  )
}

/// `Safe` or `At Risk` for an overall attendance percentage.
pub fn attendance_status(percentage: f64) -> &'static str {
  if percentage >= ATTENDANCE_THRESHOLD { "Safe" } else { "At Risk" }
}

fn render_attendance(record: &BatchAttendance) -> String {
  let subjects: Vec<String> = record
    .subjects
    .iter()
    .map(|(name, t)| format!("{name}: {}/{} ({}%)", t.attended, t.total, t.percentage))
    .collect();
  let overall = record.overall;

  format!(
    "Attendance Records for AIML Department - Batch {batch}:\n\n\
     Subject-wise Attendance:\n{subjects}\n\n\
     Overall Attendance: {attended}/{total} ({pct}%)\n\n\
     Minimum required attendance: {threshold}%\n\
     Current status: {status}\n\n\
     For attendance regularization, contact your class coordinator.",
    batch = record.batch,
    subjects = subjects.join("\n"),
    attended = overall.attended,
    total = overall.total,
    pct = overall.percentage,
    threshold = ATTENDANCE_THRESHOLD,
    status = attendance_status(overall.percentage),
  )
}

fn render_unknown_batch() -> String {
  let known: Vec<&str> = data::batches().iter().map(|b| b.batch).collect();
  format!(
    "Available attendance records for batches: {}\n\nPlease specify a valid \
     batch year (e.g., \"attendance for 2021-2024 batch\").",
    known.join(", ")
  )
}

// ─── Static replies ──────────────────────────────────────────────────────────

fn topic_text(intent: Intent) -> &'static str {
  match intent {
    // Parameterised intents never reach here through `render`; fall back
    // to the help text if a caller builds such a `Topic` by hand.
    Intent::Results | Intent::Timetable | Intent::Attendance | Intent::Fallback => FALLBACK,
    Intent::Fees => FEES,
    Intent::Faculty => FACULTY,
    Intent::Placement => PLACEMENT,
    Intent::Project => PROJECT,
    Intent::Exam => EXAM,
    Intent::Library => LIBRARY,
    Intent::Event => EVENT,
    Intent::Contact => CONTACT,
    Intent::Admission => ADMISSION,
  }
}

const FEES: &str = "AIML Department Fee Structure at Dayananda Sagar College:
• Tuition Fee: ₹2,00,000 per year
• Lab Fee: ₹30,000 per year
• Library Fee: ₹10,000 per year
• Total Annual Fee: ₹2,40,000
• Outstanding Balance: ₹50,000

Payment deadline: End of current semester. Late fees apply after due date.";

const FACULTY: &str = "AIML Department Faculty at Dayananda Sagar College:
• Dr. Rajesh Kumar - HOD, Machine Learning
• Prof. Priya Sharma - Deep Learning
• Dr. Amit Singh - Computer Vision
• Asst. Prof. Meera Patel - NLP

For faculty consultation hours, check department notice board.";

const PLACEMENT: &str = "AIML Department Placement Highlights:
• Average Package: ₹8.5 LPA
• Highest Package: ₹15 LPA
• Companies: Google, Microsoft, Amazon, Infosys
• Placement Rate: 95%

Upcoming placement drives: Check placement portal regularly.";

const PROJECT: &str = "AIML Department Project Guidelines:
• Final Year Project: Mandatory
• Internship: 6 months required
• Technologies: Python, TensorFlow, PyTorch
• Domains: ML, DL, CV, NLP

Project submission deadline: End of semester.";

const EXAM: &str = "AIML Department Examination Schedule:
• Mid-term Exams: March 15-25
• End-term Exams: May 10-25
• Practical Exams: June 1-10

Hall tickets available on college portal. Best of luck!";

const LIBRARY: &str = "AIML Department Library Resources:
• Books: 500+ AI/ML titles
• Journals: IEEE, ACM subscriptions
• Online Databases: IEEE Xplore, ACM Digital Library
• Lab Access: 24/7 for students

Issue limit: 5 books per semester.";

const EVENT: &str = "Upcoming AIML Department Events:
• AI Workshop: March 20
• ML Hackathon: April 5-7
• Industry Seminar: April 15
• Project Showcase: May 10

Register through department portal.";

const CONTACT: &str = "AIML Department Contact Information:
• Phone: +91-80-42161750
• Email: aiml@dsc.edu.in
• Office Hours: 9 AM - 5 PM
• Location: Block A, 3rd Floor

For urgent matters, contact HOD directly.";

const ADMISSION: &str = "AIML Department Admission Requirements:
• Eligibility: 60% in 12th (PCM)
• Entrance: CET/KCET/JEE
• Fee: ₹2,40,000 per year
• Duration: 4 years
• Intake: 60 students

Apply through college admission portal.";

const FALLBACK: &str = "I am your AIML Nexus assistant for Dayananda Sagar College. I can help with:
• Academic results and grades
• Class timetable and schedule
• Attendance records
• Fee structure and payments
• Faculty information
• Placement details
• Project guidelines
• Exam schedules
• Library resources
• Department events
• Contact information

Please ask about any of these topics!";
