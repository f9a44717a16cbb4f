use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "classbook",
    version,
    about = "Student client for the classbook school API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in and store the session token
    Login { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show lessons for one day, or for the whole window
    Schedule {
        /// Day to show (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Show one lesson
    Lesson { lesson_id: String },
    /// Show attendance for a lesson, or mark yourself present
    Attendance {
        lesson_id: String,
        #[arg(long)]
        mark: bool,
    },
    /// Send feedback for a lesson
    Feedback {
        lesson_id: String,
        /// 1 to 5
        rating: u8,
        /// Feedback text; remaining words are joined with spaces
        #[arg(num_args = 1..)]
        text: Vec<String>,
        #[arg(long)]
        anonymous: bool,
    },
    /// Take the lesson's quiz, one option index per question
    Quiz {
        lesson_id: String,
        selections: Vec<usize>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", raw))
}
