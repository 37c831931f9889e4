use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Resolve the server home directory to an absolute path.
///
/// `None` (or a blank value) selects `<user home>/<default_subdir>`. A leading
/// `~` is expanded against the user home; other relative paths are anchored
/// at the current working directory. With `create` set the directory is
/// created if it does not exist yet.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = dirs::home_dir();

    let resolved = match configured.as_deref().map(str::trim) {
        None | Some("") => match &user_home {
            Some(home) => home.join(default_subdir),
            None => bail!("cannot determine the user home directory"),
        },
        Some(raw) => {
            let expanded = expand_tilde(raw, user_home.as_deref())?;
            if expanded.is_absolute() {
                expanded
            } else {
                std::env::current_dir()
                    .context("cannot read current directory")?
                    .join(expanded)
            }
        }
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("cannot create home_dir {}", resolved.display()))?;
    }

    Ok(resolved)
}

/// Expand `~` and `~/rest` against `home`. Other inputs pass through.
pub fn expand_tilde(raw: &str, home: Option<&Path>) -> Result<PathBuf> {
    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        rest
    } else {
        return Ok(PathBuf::from(raw));
    };

    match home {
        Some(home) if rest.is_empty() => Ok(home.to_path_buf()),
        Some(home) => Ok(home.join(rest)),
        None => bail!("cannot expand '{raw}': user home directory is unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tilde_is_expanded_against_home() {
        let home = Path::new("/home/registry");
        assert_eq!(
            expand_tilde("~/.user-registry", Some(home)).unwrap(),
            PathBuf::from("/home/registry/.user-registry")
        );
        assert_eq!(expand_tilde("~", Some(home)).unwrap(), home);
        assert_eq!(
            expand_tilde("/var/lib/registry", Some(home)).unwrap(),
            PathBuf::from("/var/lib/registry")
        );
    }

    #[test]
    fn tilde_without_home_is_an_error() {
        assert!(expand_tilde("~/x", None).is_err());
    }

    #[test]
    fn absolute_dir_is_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("a").join("b");

        let resolved =
            resolve_home_dir(Some(target.to_string_lossy().into_owned()), ".ignored", true)
                .unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn relative_dir_is_anchored_at_cwd() {
        let resolved = resolve_home_dir(Some("rel/home".into()), ".ignored", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("rel/home"));
    }
}
