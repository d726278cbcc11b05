// Output location: defaults derived from the input path, and sink creation.

use crate::error::{Result, ScriptError};
use crate::logger;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const SQL_EXTENSION: &str = "sql";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub file_name: String,
}

impl OutputTarget {
    // Missing pieces default to the input's directory and `<stem>.sql`.
    pub fn resolve(input: &Path, dir: Option<PathBuf>, file_name: Option<String>) -> Self {
        let dir = dir.unwrap_or_else(|| match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        });
        let file_name = file_name.unwrap_or_else(|| default_file_name(input));
        Self { dir, file_name }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    // Remove any previous output, create missing directories, open for writing.
    pub fn create(&self) -> Result<BufWriter<File>> {
        let path = self.path();
        let sink_err = |source: std::io::Error| ScriptError::SinkCreate {
            path: path.clone(),
            source,
        };

        if path.exists() {
            logger::debug(&format!("Output: removing existing {}", path.display()));
            fs::remove_file(&path).map_err(sink_err)?;
        }
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(sink_err)?;
        }
        let file = File::create(&path).map_err(sink_err)?;
        Ok(BufWriter::new(file))
    }
}

fn default_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("schema");
    format!("{}.{}", stem, SQL_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_follow_input() {
        let target = OutputTarget::resolve(Path::new("defs/model.thrift"), None, None);
        assert_eq!(target.dir, PathBuf::from("defs"));
        assert_eq!(target.file_name, "model.sql");
        assert_eq!(target.path(), PathBuf::from("defs/model.sql"));
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let target = OutputTarget::resolve(Path::new("model.thrift"), None, None);
        assert_eq!(target.dir, PathBuf::from("."));
        assert_eq!(target.file_name, "model.sql");
    }

    #[test]
    fn test_explicit_values_win() {
        let target = OutputTarget::resolve(
            Path::new("defs/model.thrift"),
            Some(PathBuf::from("out")),
            Some("tables.ddl".to_string()),
        );
        assert_eq!(target.path(), PathBuf::from("out/tables.ddl"));
    }

    #[test]
    fn test_only_last_extension_is_replaced() {
        let target = OutputTarget::resolve(Path::new("a/b.v2.thrift"), None, None);
        assert_eq!(target.file_name, "b.v2.sql");
    }

    #[test]
    fn test_create_replaces_existing_file_and_makes_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let target = OutputTarget {
            dir: tmp.path().join("nested/out"),
            file_name: "x.sql".to_string(),
        };

        {
            let mut sink = target.create().unwrap();
            sink.write_all(b"old content that is long").unwrap();
        }
        {
            let mut sink = target.create().unwrap();
            sink.write_all(b"new").unwrap();
        }

        assert_eq!(fs::read_to_string(target.path()).unwrap(), "new");
    }

    #[test]
    fn test_create_fails_when_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let target = OutputTarget {
            dir: blocker,
            file_name: "x.sql".to_string(),
        };
        let err = target.create().unwrap_err();
        assert!(matches!(err, ScriptError::SinkCreate { .. }));
    }
}
