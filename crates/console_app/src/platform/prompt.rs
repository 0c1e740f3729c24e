use std::io::{self, BufRead, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use console_engine::{Credential, CredentialPrompt};
use console_logging::{console_info, console_warn};

/// Asks for a username and password on the terminal. An empty username
/// declines.
#[derive(Debug, Default)]
pub(crate) struct TerminalPrompt;

#[async_trait::async_trait]
impl CredentialPrompt for TerminalPrompt {
    async fn acquire(&self) -> Option<Credential> {
        match tokio::task::spawn_blocking(read_login).await {
            Ok(Ok(credential)) => credential,
            Ok(Err(err)) => {
                console_warn!("Reading credentials failed: {}", err);
                None
            }
            Err(err) => {
                console_warn!("Credential prompt task failed: {}", err);
                None
            }
        }
    }
}

fn read_login() -> io::Result<Option<Credential>> {
    let mut stdout = io::stdout();
    writeln!(stdout, "\nThe server asked for a login (leave username empty to skip).")?;
    write!(stdout, "Username: ")?;
    stdout.flush()?;

    let mut username = String::new();
    io::stdin().lock().read_line(&mut username)?;
    let username = username.trim();
    if username.is_empty() {
        console_info!("Login prompt declined");
        return Ok(None);
    }

    let password = rpassword::prompt_password("Password: ")?;
    Ok(Some(basic_credential(username, &password)))
}

/// `user:password`, base64-encoded, as HTTP Basic expects.
pub(crate) fn basic_credential(username: &str, password: &str) -> Credential {
    Credential::new(STANDARD.encode(format!("{username}:{password}")))
}
