use crate::credentials::Credentials;
use crate::login::state::DeskLogins;
use color_eyre::eyre::{bail, Result};
use color_eyre::owo_colors::OwoColorize;

pub fn whoami(credentials: Credentials) -> Result<()> {
    let url = credentials.site_url()?;
    let logins = DeskLogins::load(credentials.config_path.as_deref())?;
    if let Some(login) = logins.get_saved(url.as_ref(), credentials.username.as_ref()) {
        println!(
            "Logged into {} as user \"{}\"",
            login.url.as_str().cyan(),
            login.username.as_str().green()
        );
        Ok(())
    } else {
        bail!("You are not logged in.")
    }
}
