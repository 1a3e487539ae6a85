//! Login, registration and logout

use crate::context::AppContext;
use anyhow::{bail, Context, Result};
use console::Term;
use sitetrack_api_client::endpoints::auth::AccountRequest;
use sitetrack_cli::output::Status;
use sitetrack_cli::progress;
use tracing::info;

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let term = Term::stderr();
    if !term.is_term() {
        bail!("No password given. Pass --password or set SITETRACK_PASSWORD.");
    }
    term.write_str("Password: ")?;
    term.read_secure_line().context("Failed to read password")
}

/// `login`
pub async fn login(ctx: &AppContext, username: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let client = ctx.client()?;
    let store = ctx.credential_store()?;

    let pb = progress::spinner("Logging in...");
    let credentials = match client
        .auth()
        .login(&AccountRequest::new(username, password))
        .await
    {
        Ok(credentials) => credentials,
        Err(e) => {
            progress::finish_error(&pb, "Login failed");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    store.save(credentials.token())?;
    info!(path = %store.path().display(), "Stored access token");

    Status::success(&format!("Logged in as {username}"));
    Ok(())
}

/// `register`
pub async fn register(ctx: &AppContext, username: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let client = ctx.client()?;

    let pb = progress::spinner("Creating account...");
    let response = match client
        .auth()
        .register(&AccountRequest::new(username, password))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            progress::finish_error(&pb, "Registration failed");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    Status::success(&response.msg);
    Status::info("Run `sitetrack login` to continue");
    Ok(())
}

/// `logout`
pub fn logout(ctx: &AppContext) -> Result<()> {
    if ctx.credential_store()?.clear()? {
        Status::success("Logged out");
    } else {
        Status::info("Not logged in");
    }
    Ok(())
}
