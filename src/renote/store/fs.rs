use super::{DocumentStore, WriteMode};
use crate::error::{RenoteError, Result};
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(RenoteError::Io)?;
            }
        }
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn read(&self, name: &str) -> Result<String> {
        let path = self.resolve(name);
        debug!("reading {}", path.display());
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RenoteError::NotFound(path.display().to_string()),
            _ => RenoteError::Io(e),
        })
    }

    fn write(&mut self, name: &str, contents: &str, mode: WriteMode) -> Result<()> {
        let path = self.resolve(name);
        self.ensure_parent(&path)?;
        debug!("writing {} ({:?}, {} bytes)", path.display(), mode, contents.len());

        match mode {
            WriteMode::Overwrite => fs::write(&path, contents).map_err(RenoteError::Io)?,
            WriteMode::Append => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(RenoteError::Io)?;
                file.write_all(contents.as_bytes())
                    .map_err(RenoteError::Io)?;
            }
        }
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).exists()
    }
}
