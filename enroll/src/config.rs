use clap::Parser;
use std::path::PathBuf;

/// Where we register accounts unless told otherwise.
const DEFAULT_SERVER: &str = "https://api.enroll.app";

/// A TUI for creating an account
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Which server to register with
    #[clap(long, default_value = DEFAULT_SERVER)]
    server: String,

    /// Where should we write logs?
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

impl Config {
    /// The server to register with.
    pub fn server(&self) -> String {
        self.server.clone()
    }

    /// Get either the configured or a default log directory. If no log
    /// directory can be found (e.g. because `$HOME` is unset) we will use
    /// the current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("app", "enroll", "enroll")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
