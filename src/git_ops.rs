use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::Result;

/// Wrapper around git2 Repository for release bookkeeping operations.
///
/// Provides the high-level operations the release workflow needs: tag
/// listing, commit-all, annotated tag creation, remote lookup, and push.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository containing the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent
    /// directories, and requires at least one tracked file so a release is
    /// never cut from an empty repository.
    pub fn open() -> Result<Self> {
        Self::open_at(Path::new("."))
    }

    /// Open the repository containing `path`
    pub fn open_at(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| {
            git2::Error::from_str(&format!("not in a git repository: {}", e.message()))
        })?;

        if repo.index()?.is_empty() {
            return Err(git2::Error::from_str(
                "git repository has no tracked files, nothing to release",
            )
            .into());
        }

        Ok(GitRepo { repo })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| git2::Error::from_str("bare repository has no working tree").into())
    }

    /// All tag names in the repository
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(str::to_string).collect())
    }

    /// Stage every modified tracked file and commit with `message`.
    ///
    /// Mirrors `git commit -am`: tracked files only, untracked files are
    /// left alone. On an unborn branch (staged files, no commit yet) this
    /// creates the root commit.
    pub fn commit_all(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid.to_string())
    }

    /// Create an annotated tag on the current HEAD commit
    pub fn create_annotated_tag(&self, tag_name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(tag_name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    /// Whether a remote with the given name is configured
    pub fn has_remote(&self, remote_name: &str) -> bool {
        self.repo.find_remote(remote_name).is_ok()
    }

    /// Push the release branch and tag to a remote.
    ///
    /// Supports SSH authentication via keys from `~/.ssh/` or the SSH agent,
    /// falling back to default credentials.
    pub fn push_release(&self, remote_name: &str, branch: &str, tag_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            git2::Error::from_str(&format!("no remote named '{}' found", remote_name))
        })?;

        let mut push_options = git2::PushOptions::new();

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            // SSH key authentication
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                // Try different key types in order of preference
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                // Try SSH agent as fallback
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            // Fall back to default credentials
            git2::Cred::default()
        });

        // Catch per-reference rejections during push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                eprintln!(
                    "Warning: Could not update reference {}: {}",
                    refname, status
                );
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}",
                    refname
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        let refspecs = [
            format!("refs/heads/{}", branch),
            format!("refs/tags/{}", tag_name),
        ];
        let refspec_refs: Vec<&str> = refspecs.iter().map(String::as_str).collect();

        match remote.push(&refspec_refs, Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.class() == git2::ErrorClass::Net {
                    Err(git2::Error::from_str(&format!("network error during push: {}", e)).into())
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(
                        git2::Error::from_str(&format!("reference error during push: {}", e))
                            .into(),
                    )
                } else {
                    Err(git2::Error::from_str(&format!(
                        "failed to push '{}' and '{}': {}",
                        branch, tag_name, e
                    ))
                    .into())
                }
            }
        }
    }
}
