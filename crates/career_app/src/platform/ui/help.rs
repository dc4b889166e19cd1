use career_core::{AuthMode, Screen};

pub const APP_TITLE: &str = "AI Career Intelligence Platform";
pub const DASHBOARD_TITLE: &str = "Career Intelligence Dashboard";
pub const HELP_HINT: &str = "Type `help` for the list of commands.";

const LOGIN_COMMANDS: &[(&str, &str)] = &[
    ("email ADDRESS", "set the email address"),
    ("password SECRET", "set the password"),
    ("name FULL NAME", "set your full name (registration)"),
    ("toggle", "switch between sign in and registration"),
    ("submit", "sign in or create the account"),
];

const DASHBOARD_COMMANDS: &[(&str, &str)] = &[
    ("select PATH", "choose a PDF resume"),
    ("upload [PATH]", "upload the chosen resume"),
    ("extract TEXT", "extract skills from free text"),
    ("recommend [N]", "get the top N job recommendations"),
    ("gap JOB_ID", "show the skill gap for one job"),
    ("skills | results", "show your skills and recommendations again"),
    ("logout", "sign out"),
];

const COMMON_COMMANDS: &[(&str, &str)] = &[("help", "show this list"), ("quit", "leave")];

pub fn login_subtitle(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::SignIn => "Sign in to your account",
        AuthMode::Register => "Create your account",
    }
}

pub fn help_lines(screen: Screen) -> Vec<String> {
    let screen_commands = match screen {
        Screen::Login => LOGIN_COMMANDS,
        Screen::Dashboard => DASHBOARD_COMMANDS,
        Screen::Exited => &[],
    };
    let width = screen_commands
        .iter()
        .chain(COMMON_COMMANDS)
        .map(|(usage, _)| usage.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec!["Commands:".to_string()];
    lines.extend(
        screen_commands
            .iter()
            .chain(COMMON_COMMANDS)
            .map(|(usage, about)| format!("  {usage:<width$}  {about}")),
    );
    lines
}
