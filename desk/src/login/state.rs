use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use deskapi::types::{SiteUrl, Username};
use serde::{Deserialize, Serialize};

use crate::login::store::{Backend, Login, SavedLogin};

pub const SERVICE: &str = "com.desk.cli";
const APP_NAME: &str = "desk";

/// The application state is a list of saved logins, the most recent last.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct DeskLogins {
    pub logins: Vec<SavedLogin>,
}

impl DeskLogins {
    /// Get the [Login] corresponding to user-supplied URL and username.
    /// If URL is not given, the most recently saved login is returned.
    pub fn get_login(
        &self,
        url: Option<&SiteUrl>,
        username: Option<&Username>,
    ) -> Result<Option<Login>> {
        match self.get_saved(url, username) {
            None => Ok(None),
            Some(saved) => Ok(Some(saved.to_owned().into_login(SERVICE)?)),
        }
    }

    /// Get the saved login for a site. If `url` is not specified, then
    /// return the most recently added login, or the most recent one of
    /// `username` if given. A `username` for the `url` may be specified in
    /// cases where multiple logins for the same site are saved.
    pub fn get_saved(
        &self,
        url: Option<&SiteUrl>,
        username: Option<&Username>,
    ) -> Option<&SavedLogin> {
        match url {
            None => self
                .logins
                .iter()
                .rev()
                .find(|saved| username.map_or(true, |u| u == &saved.username)),
            Some(url) => self.find(url, username),
        }
    }

    fn find(&self, url: &SiteUrl, username: Option<&Username>) -> Option<&SavedLogin> {
        self.logins
            .iter()
            .find(|saved| &saved.url == url && username.map_or(true, |u| u == &saved.username))
    }

    /// Append the given [Login]. If there already exists a login for the
    /// same URL and username, it is overwritten.
    pub fn add(&mut self, login: Login, backend: Backend) -> Result<()> {
        self.remove(&login.url, Some(&login.username));
        self.logins.push(login.into_saved(backend, SERVICE)?);
        Ok(())
    }

    /// Remove saved login(s), returning the ones which were removed.
    pub fn remove(&mut self, url: &SiteUrl, username: Option<&Username>) -> Vec<SavedLogin> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.logins)
            .into_iter()
            .partition(|saved| &saved.url == url && username.map_or(true, |u| u == &saved.username));
        self.logins = kept;
        removed
    }

    /// Remove all saved logins, returning them.
    pub fn clear(&mut self) -> Vec<SavedLogin> {
        std::mem::take(&mut self.logins)
    }

    /// Load from the given file, or the default configuration file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let loaded = match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, None),
        };
        loaded.wrap_err("Could not load saved logins")
    }

    /// Write to the given file, or the default configuration file.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let stored = match path {
            Some(path) => confy::store_path(path, self),
            None => confy::store(APP_NAME, None, self),
        };
        stored.wrap_err("Couldn't write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login::store::StoredPassword;
    use rstest::*;

    fn url(s: &'static str) -> SiteUrl {
        SiteUrl::try_from(s).unwrap()
    }

    fn login(site: &'static str, username: &str, password: &str) -> Login {
        Login {
            url: url(site),
            username: Username::from(username),
            password: password.to_string(),
        }
    }

    #[fixture]
    fn desk_logins() -> DeskLogins {
        DeskLogins {
            logins: vec![
                SavedLogin {
                    url: url("https://a.desk.com"),
                    username: Username::from("aaaaa"),
                    store: StoredPassword::Text("password-a".to_string()),
                },
                SavedLogin {
                    url: url("https://b.desk.com"),
                    username: Username::from("b-first"),
                    store: StoredPassword::Text("password-b1".to_string()),
                },
                SavedLogin {
                    url: url("https://c.desk.com"),
                    username: Username::from("ccccc"),
                    store: StoredPassword::Keyring,
                },
                SavedLogin {
                    url: url("https://b.desk.com"),
                    username: Username::from("b-second"),
                    store: StoredPassword::Text("password-b2".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_empty() -> Result<()> {
        let empty = DeskLogins::default();
        let a = url("https://a.desk.com");
        let username = Username::from("aaaaa");
        assert!(empty.get_login(None, None)?.is_none());
        assert!(empty.get_login(Some(&a), None)?.is_none());
        assert!(empty.get_login(None, Some(&username))?.is_none());
        assert!(empty.get_login(Some(&a), Some(&username))?.is_none());
        Ok(())
    }

    #[rstest]
    fn test_get_default(desk_logins: DeskLogins) -> Result<()> {
        let expected = login("https://b.desk.com", "b-second", "password-b2");
        assert_eq!(Some(expected), desk_logins.get_login(None, None)?);
        Ok(())
    }

    #[rstest]
    #[case("aaaaa", Some(0))]
    #[case("b-first", Some(1))]
    #[case("b-second", Some(3))]
    #[case("nobody", None)]
    fn test_get_by_username_only(
        desk_logins: DeskLogins,
        #[case] username: &str,
        #[case] expected: Option<usize>,
    ) {
        let found = desk_logins.get_saved(None, Some(&Username::from(username)));
        assert_eq!(expected.map(|i| &desk_logins.logins[i]), found);
    }

    #[rstest]
    fn test_get_by_url(desk_logins: DeskLogins) {
        let c = url("https://c.desk.com");
        assert_eq!(Some(&desk_logins.logins[2]), desk_logins.find(&c, None));
        assert_eq!(
            Some(&desk_logins.logins[2]),
            desk_logins.find(&c, Some(&Username::from("ccccc")))
        );
        assert_eq!(None, desk_logins.find(&c, Some(&Username::from("aaaaa"))));
    }

    #[rstest]
    fn test_same_site_different_users(desk_logins: DeskLogins) -> Result<()> {
        let b = url("https://b.desk.com");
        let first = login("https://b.desk.com", "b-first", "password-b1");
        let second = login("https://b.desk.com", "b-second", "password-b2");
        assert_eq!(Some(&first), desk_logins.get_login(Some(&b), None)?.as_ref());
        assert_eq!(
            Some(&first),
            desk_logins.get_login(Some(&b), Some(&first.username))?.as_ref()
        );
        assert_eq!(
            Some(&second),
            desk_logins.get_login(Some(&b), Some(&second.username))?.as_ref()
        );
        Ok(())
    }

    #[test]
    fn test_add() -> Result<()> {
        let mut config = DeskLogins::default();
        let site = url("https://example.desk.com");
        config.add(
            login("https://example.desk.com", "apple", "red-delicious"),
            Backend::ClearText,
        )?;
        assert_eq!(1, config.logins.len());

        config.add(
            login("https://example.desk.com", "apple", "golden-delicious"),
            Backend::ClearText,
        )?;
        assert_eq!(
            1,
            config.logins.len(),
            "length is not the same after adding a login with same URL and username"
        );
        assert_eq!(
            StoredPassword::Text("golden-delicious".to_string()),
            config.get_saved(Some(&site), None).unwrap().store
        );

        config.add(
            login("https://example.desk.com", "pear", "nashi"),
            Backend::ClearText,
        )?;
        assert_eq!(
            2,
            config.logins.len(),
            "length did not increase after adding a login with a different username."
        );

        config.add(
            login("https://another.desk.com", "pear", "nashi"),
            Backend::ClearText,
        )?;
        assert_eq!(
            3,
            config.logins.len(),
            "length did not increase after adding a login with a different URL."
        );
        assert_eq!(
            config.get_saved(None, None).unwrap().url.as_str(),
            "https://another.desk.com"
        );
        Ok(())
    }

    #[rstest]
    fn test_remove(mut desk_logins: DeskLogins) {
        let b = url("https://b.desk.com");
        let removed = desk_logins.remove(&b, Some(&Username::from("b-second")));
        assert_eq!(removed.len(), 1);
        assert_eq!(desk_logins.logins.len(), 3);
        assert!(desk_logins
            .remove(&b, Some(&Username::from("b-second")))
            .is_empty());

        let a = url("https://a.desk.com");
        assert!(desk_logins.remove(&a, Some(&Username::from("b-first"))).is_empty());
        assert_eq!(desk_logins.remove(&b, None).len(), 1);
        assert!(desk_logins.get_saved(Some(&b), None).is_none());
        assert_eq!(desk_logins.logins.len(), 2);
    }

    #[rstest]
    fn test_clear(mut desk_logins: DeskLogins) {
        assert_eq!(desk_logins.clear().len(), 4);
        assert!(desk_logins.clear().is_empty());
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("desk.ron");
        let mut config = DeskLogins::load(Some(&path))?;
        assert!(config.logins.is_empty());
        config.add(
            login("https://example.desk.com", "apple", "fuji"),
            Backend::ClearText,
        )?;
        config.save(Some(&path))?;

        let reloaded = DeskLogins::load(Some(&path))?;
        assert_eq!(reloaded.logins, config.logins);
        Ok(())
    }
}
