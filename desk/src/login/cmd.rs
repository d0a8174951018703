use color_eyre::eyre::{bail, Result};
use color_eyre::owo_colors::OwoColorize;
use deskapi::types::SiteUrl;
use deskapi::Api;

use crate::credentials::{verify, Credentials};
use crate::login::prompt::{prompt_if_missing, prompt_if_missing_password};
use crate::login::state::{DeskLogins, SERVICE};
use crate::login::store::{Backend, Login};

pub fn login(credentials: Credentials, backend: Backend, password_from_stdin: bool) -> Result<()> {
    if credentials.password.is_some() && password_from_stdin {
        bail!("Options --password and --password-stdin may not be used together.");
    }
    let url = credentials.site_url()?;
    let Credentials {
        username,
        password,
        config_path,
        ..
    } = credentials;
    let mut config = DeskLogins::load(config_path.as_deref())?;

    let url: SiteUrl = prompt_if_missing(url, "desk.com site URL")?;
    let username = prompt_if_missing(username, "username")?;
    let password = prompt_if_missing_password(password, "password", password_from_stdin)?;

    verify(&Api::connect(url.clone(), &username, &password)?)?;
    println!(
        "Logged into {} as user \"{}\"",
        url.as_str().cyan(),
        username.as_str().green()
    );
    config.add(
        Login {
            url,
            username,
            password,
        },
        backend,
    )?;
    config.save(config_path.as_deref())
}

/// Forget the saved logins for `--url` (and `--username`), or all of them.
pub fn logout(credentials: Credentials) -> Result<()> {
    let url = credentials.site_url()?;
    let mut config = DeskLogins::load(credentials.config_path.as_deref())?;
    let removed = match url {
        Some(url) => config.remove(&url, credentials.username.as_ref()),
        None => config.clear(),
    };
    if removed.is_empty() {
        bail!("Not logged in.");
    }
    for saved in &removed {
        saved.forget(SERVICE)?;
    }
    config.save(credentials.config_path.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskapi::types::Username;

    fn saved_login(config_path: &std::path::Path, site: &str, user: &str) -> Result<()> {
        let mut config = DeskLogins::load(Some(config_path))?;
        config.add(
            Login {
                url: SiteUrl::for_site(site)?,
                username: Username::from(user),
                password: "hunter2".to_string(),
            },
            Backend::ClearText,
        )?;
        config.save(Some(config_path))
    }

    #[test]
    fn test_logout_one_site() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("desk.ron");
        saved_login(&path, "one", "apple")?;
        saved_login(&path, "two", "pear")?;

        logout(Credentials {
            site: Some("one".to_string()),
            config_path: Some(path.clone()),
            ..Default::default()
        })?;
        let remaining = DeskLogins::load(Some(&path))?.logins;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].url.as_str(), "https://two.desk.com");
        Ok(())
    }

    #[test]
    fn test_logout_all() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("desk.ron");
        saved_login(&path, "one", "apple")?;
        saved_login(&path, "two", "pear")?;
        let credentials = Credentials {
            config_path: Some(path.clone()),
            ..Default::default()
        };
        logout(credentials.clone())?;
        assert!(DeskLogins::load(Some(&path))?.logins.is_empty());
        assert!(logout(credentials).is_err());
        Ok(())
    }

    #[test]
    fn test_password_twice() {
        let credentials = Credentials {
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(login(credentials, Backend::ClearText, true).is_err());
    }
}
