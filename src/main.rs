use futures_channel::mpsc::unbounded;
use futures_util::StreamExt;
use log::{info, warn};
use quiz_session_rust::{
    config::QuizConfig,
    handlers::timer_handler::handle_quiz,
    helpers::{load_questions_or_default, parse_command},
    loggers::file_logger::init_file_logger,
    models::session::QuizSession,
    render::Renderer,
};
use std::{
    error::Error,
    fs,
    io::{self, Write},
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = QuizConfig::from_env()?;
    fs::create_dir_all(&config.log_dir)?;
    init_file_logger(&config.log_dir)?;
    info!("App started!");

    let questions = load_questions_or_default(config.questions_path.as_deref());
    let session = QuizSession::new(questions, config.time_limit_secs);

    let (tx_actions, rx_actions) = unbounded();
    let (tx_responses, mut rx_responses) = unbounded();
    let quiz = tokio::spawn(handle_quiz(
        session,
        rx_actions,
        tx_responses,
        config.tick_interval,
    ));

    let input = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Ok(command) => match command.into_action() {
                    Some(action) => {
                        if tx_actions.unbounded_send(action).is_err() {
                            break;
                        }
                    }
                    None => break,
                },
                Err(error) => {
                    warn!("Ignoring input: {}", error);
                    println!("{}", error);
                }
            }
        }
        // dropping the sender ends the session
        info!("Input closed");
    });

    let mut renderer = Renderer::new();
    let stdout = io::stdout();
    while let Some(response) = rx_responses.next().await {
        let mut out = stdout.lock();
        renderer.render(&response, &mut out)?;
        out.flush()?;
    }

    input.await?;
    let session = quiz.await?;
    info!(
        "Session {} finished, completed: {}, score: {:?}",
        session.id(),
        session.is_completed(),
        session.score()
    );

    Ok(())
}
