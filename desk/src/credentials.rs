use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, Error, Result};
use color_eyre::owo_colors::OwoColorize;
use deskapi::errors::DeskError;
use deskapi::reqwest::StatusCode;
use deskapi::types::{SiteUrl, Username};
use deskapi::Api;
use log::debug;

use crate::login::state::DeskLogins;

/// Command-line options of `desk` which are relevant to identifying the
/// user and obtaining an [Api].
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub url: Option<SiteUrl>,
    pub site: Option<String>,
    pub username: Option<Username>,
    pub password: Option<String>,
    /// Saved logins file.
    ///
    /// - `None`: use the default configuration file
    /// - `Some(_)`: custom file given by `--config`
    pub config_path: Option<PathBuf>,
}

impl Credentials {
    /// The site given by either `--url` or `--site`.
    pub fn site_url(&self) -> Result<Option<SiteUrl>> {
        match (&self.url, &self.site) {
            (Some(url), _) => Ok(Some(url.clone())),
            (None, Some(site)) => Ok(Some(SiteUrl::for_site(site)?)),
            (None, None) => Ok(None),
        }
    }

    /// If `--password` is given, use it with `--url` and `--username`.
    /// Else, use the saved login matching whichever of those are given,
    /// or the most recent saved login.
    pub fn get_api(self) -> Result<Api> {
        let url = self.site_url()?;
        let Credentials {
            username,
            password,
            config_path,
            ..
        } = self;
        if let Some(password) = password {
            let url = url.ok_or_else(|| eyre!("--url or --site is required"))?;
            let username = username.ok_or_else(|| eyre!("--username is required"))?;
            return Ok(Api::connect(url, &username, &password)?);
        }
        let login = DeskLogins::load(config_path.as_deref())?
            .get_login(url.as_ref(), username.as_ref())?
            .ok_or_else(|| {
                eyre!(
                    "Not logged in. Either use the {} option, or run `{}`",
                    "--password".bold(),
                    "desk login".bold()
                )
            })?;
        debug!("using saved login {}@{}", login.username, login.url);
        Ok(Api::connect(login.url, &login.username, &login.password)?)
    }
}

/// Make sure the credentials are accepted, by requesting the first topic.
pub fn verify(api: &Api) -> Result<()> {
    api.session()
        .get_with_params("topics", &[("per_page", "1")])
        .map(|_| ())
        .map_err(|e| handle_error(e, api))
}

fn handle_error(error: DeskError, api: &Api) -> Error {
    match error.status() {
        Some(StatusCode::UNAUTHORIZED) => Error::msg("Incorrect login"),
        Some(code) => Error::msg(format!("HTTP status code: {code}")),
        None => Error::new(error).wrap_err(format!("Failed HTTP request to {}", api.session().url())),
    }
}

/// Split a `name=value` argument.
pub fn split_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected name=value, got \"{}\"", arg),
    }
}
