//! Shared artifact writer. Every generated file (figure, LaTeX fragment,
//! JSON snapshot, report) goes through here: create the directory, then
//! overwrite the file in place. No locking and no temp-file rename; a rerun
//! simply replaces the previous artifact.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoreError;

pub fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, contents)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("charts/week1");

        let path = write_artifact(&nested, "a.svg", "first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        let path2 = write_artifact(&nested, "a.svg", "second").unwrap();
        assert_eq!(path, path2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
