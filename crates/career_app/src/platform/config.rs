use std::path::{Path, PathBuf};
use std::time::Duration;

use career_engine::ApiSettings;
use log::LevelFilter;

use super::cli::{Cli, Command};

const SESSION_DIR: &str = ".career";
const SESSION_FILE: &str = "session.ron";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings resolved from flags, environment and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub top_n: usize,
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub verbose: bool,
    pub command: Command,
}

impl ClientConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from);
        Self::resolve(cli, home.as_deref())
    }

    fn resolve(cli: Cli, home: Option<&Path>) -> Self {
        let session_file = cli
            .session_file
            .unwrap_or_else(|| default_session_file(home));
        Self {
            api_url: cli.api_url,
            session_file,
            top_n: cli.top_n.max(1),
            request_timeout: cli
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_file: cli.log_file,
            verbose: cli.verbose,
            command: cli.command.unwrap_or(Command::Dashboard),
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_url.clone(),
            connect_timeout: Some(CONNECT_TIMEOUT),
            request_timeout: self.request_timeout,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn default_session_file(home: Option<&Path>) -> PathBuf {
    home.unwrap_or_else(|| Path::new("."))
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("career").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults_open_dashboard_under_home() {
        let cli = parse(&["--api-url", "http://api.test/v1"]);
        let config = ClientConfig::resolve(cli, Some(Path::new("/home/ada")));
        assert_eq!(config.command, Command::Dashboard);
        assert_eq!(
            config.session_file,
            PathBuf::from("/home/ada/.career/session.ron")
        );
        assert_eq!(config.top_n, 10);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.log_level(), LevelFilter::Info);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--api-url",
            "http://api.test/v1",
            "--session-file",
            "/tmp/s.ron",
            "--top-n",
            "3",
            "--request-timeout-secs",
            "30",
            "-v",
            "login",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
        ]);
        let config = ClientConfig::resolve(cli, None);
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.ron"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(
            config.command,
            Command::Login {
                email: Some("ada@example.com".to_string()),
                password: Some("secret1".to_string()),
            }
        );

        let settings = config.api_settings();
        assert_eq!(settings.base_url, "http://api.test/v1");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_top_n_and_timeout_fall_back() {
        let cli = parse(&[
            "--api-url",
            "http://api.test/v1",
            "--top-n",
            "0",
            "--request-timeout-secs",
            "0",
            "logout",
        ]);
        let config = ClientConfig::resolve(cli, None);
        assert_eq!(config.top_n, 1);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.session_file, PathBuf::from("./.career/session.ron"));
    }
}
