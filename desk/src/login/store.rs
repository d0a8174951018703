//! Abstraction over password storage using keyring or in plaintext configuration file.
//! When saved to keyring, the password is identified by a string in the form
//! "<username>@<site URL>"

use color_eyre::eyre::{Result, WrapErr};
use color_eyre::owo_colors::OwoColorize;
use deskapi::types::{SiteUrl, Username};
use serde::{Deserialize, Serialize};

/// Supported mechanisms for storing secrets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backend {
    ClearText,
    Keyring,
}

/// A secret which may be securely stored.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
#[serde(tag = "store", content = "value")]
pub enum StoredPassword {
    Text(String),
    Keyring,
}

/// A [SavedLogin] is a precursor to [Login] which is what is stored
/// in the application's configuration file. The password might be stored
/// in the same file as plaintext, or it might be stored by a keyring.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct SavedLogin {
    pub url: SiteUrl,
    pub username: Username,
    pub store: StoredPassword,
}

impl SavedLogin {
    /// Convert this [SavedLogin] to a [Login]. In the case where the
    /// password is stored by a keyring, fetch it from the keyring.
    pub fn into_login(self, service: &str) -> Result<Login> {
        let password = match &self.store {
            StoredPassword::Text(password) => password.to_owned(),
            StoredPassword::Keyring => keyring::Entry::new(service, &self.to_keyring_username())
                .and_then(|entry| entry.get_password())
                .wrap_err_with(|| {
                    format!(
                        "Could not get password from keyring for {}",
                        self.to_keyring_username()
                    )
                })?,
        };
        Ok(Login {
            url: self.url,
            username: self.username,
            password,
        })
    }

    /// Remove the password from the keyring, if it is stored there.
    pub fn forget(&self, service: &str) -> Result<()> {
        if self.store == StoredPassword::Keyring {
            keyring::Entry::new(service, &self.to_keyring_username())
                .and_then(|entry| entry.delete_password())
                .wrap_err("Could not remove password from keyring")?;
        }
        Ok(())
    }

    fn to_keyring_username(&self) -> String {
        keyring_username(&self.username, &self.url)
    }
}

/// A [Login] is the data required to authenticate with a desk.com site.
#[derive(Eq, PartialEq, Debug)]
pub struct Login {
    pub url: SiteUrl,
    pub username: Username,
    pub password: String,
}

impl Login {
    /// Convert to [SavedLogin]. If specified to use keyring backend,
    /// password is saved to the keyring.
    pub fn into_saved(self, backend: Backend, service: &str) -> Result<SavedLogin> {
        let store = match backend {
            Backend::ClearText => StoredPassword::Text(self.password),
            Backend::Keyring => {
                keyring::Entry::new(service, &keyring_username(&self.username, &self.url))
                    .and_then(|entry| entry.set_password(&self.password))
                    .wrap_err_with(|| {
                        format!(
                            "Could not save password to keyring. Please try again with: `{}`",
                            format!(
                                "desk login --url={} --username={} --no-keyring",
                                &self.url, &self.username
                            )
                            .bold()
                        )
                    })?;
                StoredPassword::Keyring
            }
        };
        Ok(SavedLogin {
            url: self.url,
            username: self.username,
            store,
        })
    }
}

fn keyring_username(username: &Username, url: &SiteUrl) -> String {
    format!("{}@{}", username.as_str(), url.as_str())
}
