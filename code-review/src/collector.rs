//! Changed paths and per-file diffs between `HEAD~1` and `HEAD`.
//!
//! Uses libgit2 through `git2` on the repository discovered from the work
//! directory. Every operation fails soft: errors are logged and an empty
//! result is returned, so the batch simply has nothing to review.

use std::path::{Path, PathBuf};

use git2::{Delta, DiffFindOptions, DiffFormat, DiffOptions, Repository, Tree};
use tracing::{debug, warn};

/// Where the batch gets its changes from.
pub trait ChangeSource {
    /// Paths touched by the revision pair, blank entries removed.
    fn changed_paths(&self) -> Vec<String>;

    /// Textual diff of one path for the same revision pair (empty on failure).
    fn file_diff(&self, path: &str) -> String;
}

/// [`ChangeSource`] backed by a local git repository.
pub struct GitChangeSet {
    repo: Option<Repository>,
    workdir: PathBuf,
}

impl GitChangeSet {
    /// Discovers the repository containing `workdir`.
    ///
    /// A missing repository is logged, not returned: the change set is then empty.
    pub fn open(workdir: impl AsRef<Path>) -> Self {
        let workdir = workdir.as_ref().to_path_buf();
        let repo = match Repository::discover(&workdir) {
            Ok(repo) => Some(repo),
            Err(err) => {
                warn!(workdir = %workdir.display(), error = %err, "no git repository found");
                None
            }
        };
        Self { repo, workdir }
    }

    /// Directory the changed paths are relative to: the repository work tree,
    /// or the directory given to [`GitChangeSet::open`] when there is none.
    pub fn content_root(&self) -> PathBuf {
        self.repo
            .as_ref()
            .and_then(|repo| repo.workdir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.workdir.clone())
    }

    /// Trees of `HEAD~1` and `HEAD`.
    fn trees<'r>(repo: &'r Repository) -> Result<(Tree<'r>, Tree<'r>), git2::Error> {
        let old = repo.revparse_single("HEAD~1")?.peel_to_tree()?;
        let new = repo.revparse_single("HEAD")?.peel_to_tree()?;
        Ok((old, new))
    }

    fn try_changed_paths(repo: &Repository) -> Result<Vec<String>, git2::Error> {
        let (old, new) = Self::trees(repo)?;
        let mut diff = repo.diff_tree_to_tree(Some(&old), Some(&new), None)?;
        // A rename is one entry under its new name.
        diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

        let paths = diff
            .deltas()
            .filter_map(|delta| match delta.status() {
                Delta::Renamed | Delta::Copied => delta.new_file().path(),
                _ => delta.new_file().path().or_else(|| delta.old_file().path()),
            })
            .map(|p| p.to_string_lossy().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Ok(paths)
    }

    fn try_file_diff(repo: &Repository, path: &str) -> Result<String, git2::Error> {
        let (old, new) = Self::trees(repo)?;
        let mut opts = DiffOptions::new();
        opts.pathspec(path).disable_pathspec_match(true);
        let diff = repo.diff_tree_to_tree(Some(&old), Some(&new), Some(&mut opts))?;

        let mut out = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                out.push(line.origin());
            }
            out.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;
        Ok(out.trim().to_string())
    }
}

impl ChangeSource for GitChangeSet {
    fn changed_paths(&self) -> Vec<String> {
        let Some(repo) = &self.repo else {
            return Vec::new();
        };
        match Self::try_changed_paths(repo) {
            Ok(paths) => {
                debug!(count = paths.len(), "changed paths collected");
                paths
            }
            Err(err) => {
                warn!(workdir = %self.workdir.display(), error = %err, "failed to collect changed files");
                Vec::new()
            }
        }
    }

    fn file_diff(&self, path: &str) -> String {
        let Some(repo) = &self.repo else {
            return String::new();
        };
        Self::try_file_diff(repo, path).unwrap_or_else(|err| {
            warn!(%path, error = %err, "failed to get diff");
            String::new()
        })
    }
}
