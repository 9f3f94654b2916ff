use clap::Parser;
use common::{Rules, RulesError};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to read rules file {}: {source}", .path.display())]
    ReadRules {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("Failed to install the log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "backend", about = "Serves blackjack tables over websockets")]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
    #[arg(long, default_value_t = 8000)]
    pub port: u16,
    /// Directory for the daily rolling server log
    #[arg(long, default_value = "./logs")]
    pub log_dir: PathBuf,
    /// JSON file with table rules. Missing fields use the standard rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn ws_url(&self, id: &str) -> String {
        format!("ws://{}/ws/{}", self.addr(), id)
    }

    pub fn load_rules(&self) -> Result<Rules, StartupError> {
        match &self.rules {
            Some(path) => {
                let json =
                    std::fs::read_to_string(path).map_err(|source| StartupError::ReadRules {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Rules::from_json(&json)?)
            }
            None => Ok(Rules::default()),
        }
    }
}
