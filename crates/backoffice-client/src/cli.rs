use backoffice_shared::const_config::client::CLIENT_DEFAULT_SERVER_URL;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[arg(
        long = "server-url",
        help = "Base URL of the back office server (overrides BACKOFFICE_SERVER_URL)"
    )]
    pub server_url: Option<String>,

    #[arg(
        long = "reset-token",
        help = "Password reset token received by email, opens the reset screen directly"
    )]
    pub reset_token: Option<String>,
}

impl Cli {
    pub fn resolve_server_url(&self) -> String {
        if let Some(url) = &self.server_url {
            return url.clone();
        }
        std::env::var("BACKOFFICE_SERVER_URL")
            .unwrap_or_else(|_| CLIENT_DEFAULT_SERVER_URL.to_string())
    }
}
