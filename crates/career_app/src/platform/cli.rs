use std::path::PathBuf;

use career_core::DEFAULT_TOP_N;
use career_engine::DEFAULT_BASE_URL;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "career",
    version,
    about = "Upload a resume, extract skills and get job recommendations"
)]
pub struct Cli {
    /// Base URL of the career API.
    #[arg(long, env = "CAREER_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// File holding the signed-in session. Defaults to ~/.career/session.ron.
    #[arg(long, env = "CAREER_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Recommendations requested when `recommend` is given no count.
    #[arg(long, env = "CAREER_TOP_N", default_value_t = DEFAULT_TOP_N, global = true)]
    pub top_n: usize,

    /// Give up on a request after this many seconds.
    #[arg(long, env = "CAREER_REQUEST_TIMEOUT_SECS", global = true)]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, env = "CAREER_LOG_FILE", default_value = "career.log", global = true)]
    pub log_file: PathBuf,

    /// Debug logging, mirrored to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in. Submits right away when both email and password are given.
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "CAREER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account. Submits right away when email and password are given.
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "CAREER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Open the dashboard from the stored session.
    Dashboard,
    /// Forget the stored session.
    Logout,
}
