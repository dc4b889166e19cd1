//! Turns one line of user input into messages.

use std::path::PathBuf;

use career_core::Msg;

pub fn parse_line(line: &str) -> Vec<Msg> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (trimmed, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "help" | "?" => vec![Msg::HelpRequested],
        "quit" | "exit" => vec![Msg::QuitRequested],
        "email" => vec![Msg::EmailChanged(rest.to_string())],
        // Kept verbatim; passwords may end in spaces.
        "password" => vec![Msg::PasswordChanged(rest.to_string())],
        "name" => vec![Msg::FullNameChanged(rest.to_string())],
        "toggle" | "mode" => vec![Msg::AuthModeToggled],
        "submit" => vec![Msg::LoginSubmitted],
        "select" => match path_argument(rest) {
            Some(path) => vec![Msg::ResumeChosen(path)],
            None => vec![Msg::UnknownCommand(trimmed.to_string())],
        },
        "upload" => match path_argument(rest) {
            Some(path) => vec![Msg::ResumeChosen(path), Msg::UploadClicked],
            None => vec![Msg::UploadClicked],
        },
        "extract" => vec![Msg::ExtractTextSubmitted(rest.to_string())],
        "recommend" => match rest.trim() {
            "" => vec![Msg::RecommendClicked { top_n: None }],
            count => match count.parse::<usize>() {
                Ok(top_n) if top_n > 0 => vec![Msg::RecommendClicked { top_n: Some(top_n) }],
                _ => vec![Msg::UnknownCommand(trimmed.to_string())],
            },
        },
        "gap" => match rest.trim() {
            "" => vec![Msg::UnknownCommand(trimmed.to_string())],
            job_id => vec![Msg::SkillGapRequested {
                job_id: job_id.to_string(),
            }],
        },
        "skills" | "results" | "show" => vec![Msg::RedrawRequested],
        "logout" => vec![Msg::LogoutClicked],
        _ => vec![Msg::UnknownCommand(trimmed.to_string())],
    }
}

/// Path argument with optional surrounding quotes.
fn path_argument(rest: &str) -> Option<PathBuf> {
    let rest = rest.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| {
            rest.strip_prefix(*quote)
                .and_then(|inner| inner.strip_suffix(*quote))
        })
        .unwrap_or(rest);
    (!unquoted.is_empty()).then(|| PathBuf::from(unquoted))
}
