//! Locating the root Gradle project and installing buildsrc into its
//! `settings.gradle`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::error::Error;

pub const SETTINGS_FILE: &str = "settings.gradle";

/// Any line containing this is ours; its presence means buildsrc is already
/// installed.
const MARKER: &str = "/// buildsrc";

const HEADER: &str = "\
/// buildsrc start ///
pluginManagement {
    repositories {
        gradlePluginPortal()
        maven { url 'https://papermc.io/repo/repository/maven-public/'}
    }
}
/// buildsrc end ///

";

const FOOTER: &str = "
/// buildsrc start ///
include 'buildsrc'
/// buildsrc end ///
";

/// Walk up from `start` to the first directory containing `settings.gradle`.
pub fn find_root(start: &Path) -> Result<PathBuf, Error> {
    start
        .ancestors()
        .find(|dir| dir.join(SETTINGS_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::RootNotFound(start.to_path_buf()))
}

/**
Add the buildsrc plugin repositories and module include to the content of a
`settings.gradle`. Returns the new content, and whether anything changed;
content that already mentions buildsrc is returned untouched.
*/
pub fn install_settings_content(content: &str) -> (String, bool) {
    match content.contains(MARKER) {
        true => (content.to_owned(), false),
        false => (format!("{HEADER}{content}{FOOTER}"), true),
    }
}

/// Install buildsrc into the project at `root`. Returns whether the settings
/// file was modified.
pub fn install(root: &Path) -> anyhow::Result<bool> {
    println!("installing buildsrc into proj({})", root.display());

    let settings = root.join(SETTINGS_FILE);
    let content = fs::read_to_string(&settings)
        .with_context(|| format!("failed to read {}", settings.display()))?;

    let (content, modified) = install_settings_content(&content);

    if modified {
        fs::write(&settings, content)
            .with_context(|| format!("failed to write {}", settings.display()))?;
        println!("{SETTINGS_FILE}: new content installed and written");
    } else {
        println!("{SETTINGS_FILE}: no install necessary");
    }

    println!("successfully installed buildsrc into proj({})", root.display());
    Ok(modified)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn find_root_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root(&nested).unwrap(), dir.path());
    }

    #[test]
    fn find_root_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();
        fs::write(inner.join(SETTINGS_FILE), "").unwrap();

        assert_eq!(find_root(&inner).unwrap(), inner);
    }

    #[test]
    fn find_root_ignores_directories_named_like_settings() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(SETTINGS_FILE)).unwrap();

        // The tempdir itself has no settings file; anything found must be
        // above it, never the tempdir.
        if let Ok(root) = find_root(dir.path()) {
            assert_ne!(root, dir.path());
        }
    }

    #[test]
    fn content_is_wrapped() {
        let (content, modified) = install_settings_content("rootProject.name = 'demo'\n");

        assert!(modified);
        assert!(content.starts_with("/// buildsrc start ///\npluginManagement {"));
        assert!(content.contains("}\n/// buildsrc end ///\n\nrootProject.name = 'demo'\n"));
        assert!(content.ends_with("\n/// buildsrc start ///\ninclude 'buildsrc'\n/// buildsrc end ///\n"));
    }

    #[test]
    fn content_install_is_idempotent() {
        let (once, _) = install_settings_content("rootProject.name = 'demo'\n");
        let (twice, modified) = install_settings_content(&once);

        assert!(!modified);
        assert_eq!(once, twice);
    }

    #[test]
    fn install_rewrites_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join(SETTINGS_FILE);
        fs::write(&settings, "rootProject.name = 'demo'\n").unwrap();

        assert!(install(dir.path()).unwrap());
        let installed = fs::read_to_string(&settings).unwrap();
        assert!(installed.contains("include 'buildsrc'"));

        assert!(!install(dir.path()).unwrap());
        assert_eq!(fs::read_to_string(&settings).unwrap(), installed);
    }

    #[test]
    fn install_without_settings_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(install(dir.path()).is_err());
    }
}
