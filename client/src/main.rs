use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use classbook_client::{
    api::Lesson,
    cli::{Cli, Command},
    config::AppConfig,
    pages::{
        attendance::{AttendanceStatus, AttendanceViewModel, MarkOutcome},
        feedback::{FeedbackOutcome, FeedbackViewModel},
        login::{LoginForm, LoginViewModel},
        quiz::{QuizPhase, QuizStep, QuizViewModel},
        schedule::ScheduleViewModel,
    },
    utils::storage::FileStorage,
    ApiClient, ApiError, FileTokenStore, HistoryNavigator, SessionGuard,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classbook_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = Cli::parse().command;

    let config = AppConfig::load()?;
    tracing::info!(
        api_base_url = %config.api_base_url,
        time_zone = %config.time_zone,
        storage_path = %config.storage_path.display(),
        "Loaded configuration"
    );

    let tokens = Arc::new(FileTokenStore::new(FileStorage::new(config.storage_path.clone())));
    let navigator = Arc::new(HistoryNavigator::new());
    let api = ApiClient::new(&config).context("failed to build HTTP client")?;
    let session = SessionGuard::new(api, tokens, navigator);

    if let Err(err) = run(command, session, &config).await {
        // Already surfaced to the view model and logged; print the notification.
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, session: SessionGuard, config: &AppConfig) -> Result<(), ApiError> {
    match command {
        Command::Login { email, password } => {
            let mut vm = LoginViewModel::new(session);
            vm.form = LoginForm::new(email, password);
            vm.submit().await?;
            println!("Signed in.");
        }
        Command::Logout => {
            LoginViewModel::new(session).logout()?;
            println!("Signed out.");
        }
        Command::Schedule { date } => {
            let mut vm = ScheduleViewModel::new(session, config);
            vm.load_schedule().await?;
            match date {
                Some(date) => {
                    let lessons = vm.select_day(date).to_vec();
                    println!("{}", date.format("%d/%m/%Y"));
                    print_lessons(&lessons);
                }
                None => {
                    for day in vm.days() {
                        let lessons = vm.lessons_for(day.date);
                        if lessons.is_empty() {
                            continue;
                        }
                        println!("{} {}", day.day_name, day.date_label);
                        print_lessons(lessons);
                    }
                    if !vm.undated_lessons().is_empty() {
                        println!("Date unknown");
                        print_lessons(vm.undated_lessons());
                    }
                }
            }
        }
        Command::Lesson { lesson_id } => {
            let vm = ScheduleViewModel::new(session, config);
            let lesson = vm.fetch_lesson(&lesson_id).await?;
            print_lessons(std::slice::from_ref(&lesson));
            if let Some(description) = &lesson.description {
                println!("    {}", description);
            }
            if !lesson.quiz_ids.is_empty() {
                println!("    quiz available");
            }
        }
        Command::Attendance { lesson_id, mark } => {
            let mut vm = AttendanceViewModel::new(session, lesson_id);
            vm.check_status().await;
            if mark {
                match vm.mark_present().await? {
                    MarkOutcome::Marked(message) => println!("{}", message),
                    MarkOutcome::AlreadyPresent => println!("Already marked present."),
                    MarkOutcome::Discarded => {}
                }
            } else {
                let label = match vm.status() {
                    AttendanceStatus::Present => "present",
                    AttendanceStatus::Absent => "absent",
                    AttendanceStatus::Unknown => "unknown",
                };
                println!("Attendance: {}", label);
            }
        }
        Command::Feedback {
            lesson_id,
            rating,
            text,
            anonymous,
        } => {
            let mut vm = FeedbackViewModel::new(session, lesson_id);
            vm.set_rating(rating);
            vm.draft.text = text.join(" ");
            vm.draft.anonymous = anonymous;
            if let FeedbackOutcome::Sent(message) = vm.submit().await? {
                println!("{}", message);
            }
        }
        Command::Quiz {
            lesson_id,
            selections,
        } => {
            let mut vm = QuizViewModel::new(session, lesson_id);
            vm.load().await?;
            if let QuizPhase::NoQuiz = vm.phase() {
                println!("{}", vm.error.as_deref().unwrap_or_default());
                return Ok(());
            }
            if let Some(attempt) = vm.attempt() {
                for (index, question) in attempt.quiz().questions.iter().enumerate() {
                    println!("{}. {}", index + 1, question.question_text);
                    for (option, choice) in question.options.iter().enumerate() {
                        println!("   [{}] {}", option, choice.text);
                    }
                }
            }
            for (question, option) in selections.into_iter().enumerate() {
                vm.select_option(question, option)?;
                if let QuizStep::Finished(result) = vm.advance().await? {
                    println!("{}", result);
                    return Ok(());
                }
            }
            // Fewer selections than questions stops at the first unanswered one.
            if let QuizStep::Finished(result) = vm.advance().await? {
                println!("{}", result);
            }
        }
    }
    Ok(())
}

fn print_lessons(lessons: &[Lesson]) {
    if lessons.is_empty() {
        println!("  No lessons.");
    }
    for lesson in lessons {
        println!(
            "  {:<11} {} ({}) [{}]",
            lesson.time, lesson.title, lesson.teacher.name, lesson.id
        );
    }
}
