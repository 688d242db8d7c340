use std::path::PathBuf;

use clap::Parser;
use quiz_master::{load_questions_from_json, Quiz, DEFAULT_TIME_LIMIT_SECS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = "questions.json")]
    questions: PathBuf,

    /// Seconds allowed per question
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TIME_LIMIT_SECS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    time_limit: u32,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let questions = match load_questions_from_json(&args.questions) {
        Ok(questions) => questions,
        Err(e) => {
            eprintln!("{}: {}", args.questions.display(), e);
            std::process::exit(1);
        }
    };

    let quiz = Quiz::with_time_limit(questions, args.time_limit)
        .expect("bank was validated during loading");

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
