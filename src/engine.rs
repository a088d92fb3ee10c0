//! # Cryption Engine
//!
//! Applies one [`Task`]: read the whole stream, encrypt or decrypt it, and
//! replace the file at the task's path with the result.

use crate::aliases::{Aes256Key32, PasswordString, PlainBuffer};
use crate::crypto::kdf::derive_key;
use crate::decryptor::decrypt_bytes;
use crate::encryptor::encrypt_bytes;
use crate::error::CryptError;
use crate::task::{Action, Task};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// How the transformed bytes replace the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write a sibling temporary file, then rename it over the target.
    /// A failed write leaves the original untouched.
    ///
    /// Symlinks are resolved first, so the file a link points at is the one
    /// replaced. A rename cannot update other hard links to the same inode,
    /// so a target with more than one link is rewritten in place instead.
    #[default]
    Atomic,
    /// Truncate the target and write into it. A failed write can leave a
    /// truncated file.
    InPlace,
}

/// What one successful transform did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    pub path: PathBuf,
    pub action: Action,
    pub bytes_in: usize,
    pub bytes_out: usize,
}

/// Keyed cryption engine. Cheap to share across threads by reference.
pub struct Engine {
    key: Aes256Key32,
    write_mode: WriteMode,
}

impl Engine {
    /// Derive the key from `passphrase` once for the lifetime of the engine.
    pub fn new(passphrase: &PasswordString) -> Result<Self, CryptError> {
        Ok(Self::from_key(derive_key(passphrase)?))
    }

    pub fn from_key(key: Aes256Key32) -> Self {
        Self {
            key,
            write_mode: WriteMode::default(),
        }
    }

    #[must_use]
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub fn key(&self) -> &Aes256Key32 {
        &self.key
    }

    /// Transform a buffer without touching the filesystem.
    pub fn apply(&self, action: Action, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        match action {
            Action::Encrypt => encrypt_bytes(input, &self.key),
            Action::Decrypt => decrypt_bytes(input, &self.key),
        }
    }

    /// Run one task to completion.
    pub fn transform(&self, task: Task) -> Result<TransformReport, CryptError> {
        // sized up front so read_to_end never leaves a stale copy behind
        let mut content = PlainBuffer::new(Vec::with_capacity(task.len_hint().unwrap_or(0)));
        let (spec, mut source) = task.into_parts();
        source.read_to_end(content.expose_secret_mut())?;
        drop(source);

        let output = PlainBuffer::new(self.apply(spec.action, content.expose_secret())?);
        self.write_output(&spec.path, output.expose_secret())?;

        log::debug!(
            "{} {}: {} -> {} bytes",
            spec.action,
            spec.path.display(),
            content.expose_secret().len(),
            output.expose_secret().len()
        );

        Ok(TransformReport {
            bytes_in: content.expose_secret().len(),
            bytes_out: output.expose_secret().len(),
            path: spec.path,
            action: spec.action,
        })
    }

    fn write_output(&self, path: &Path, bytes: &[u8]) -> Result<(), CryptError> {
        match self.write_mode {
            WriteMode::Atomic if has_other_links(path) => {
                log::warn!(
                    "{} has other hard links; rewriting it in place",
                    path.display()
                );
                write_in_place(path, bytes)
            }
            WriteMode::Atomic => write_atomic(path, bytes),
            WriteMode::InPlace => write_in_place(path, bytes),
        }
    }
}

fn write_in_place(path: &Path, bytes: &[u8]) -> Result<(), CryptError> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CryptError> {
    // rename over the file a symlink points at, not over the link
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e.into()),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    // keep the original permissions on the replacement
    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(tmp.path(), metadata.permissions())?;
    }

    tmp.persist(&target).map_err(|e| CryptError::Io(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn has_other_links(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path).is_ok_and(|metadata| metadata.nlink() > 1)
}

#[cfg(not(unix))]
fn has_other_links(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn engine() -> Engine {
        Engine::new(&PasswordString::new("engine-test".to_string())).unwrap()
    }

    #[test]
    fn transform_roundtrips_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, b"attack at dawn").unwrap();

        let engine = engine();
        let report = engine
            .transform(Task::open(&path, Action::Encrypt).unwrap())
            .unwrap();
        assert_eq!(report.bytes_in, 14);
        assert_eq!(report.bytes_out, 32);
        assert_ne!(fs::read(&path).unwrap(), b"attack at dawn");

        engine
            .transform(Task::open(&path, Action::Decrypt).unwrap())
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"attack at dawn");
    }

    #[test]
    fn failed_decrypt_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"definitely not a container!!!!!!!!").unwrap();

        let err = engine()
            .transform(Task::open(&path, Action::Decrypt).unwrap())
            .unwrap_err();
        assert!(matches!(err, CryptError::DecryptionFailed));
        assert_eq!(
            fs::read(&path).unwrap(),
            b"definitely not a container!!!!!!!!"
        );
    }

    #[test]
    fn in_place_mode_writes_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in_place.bin");
        let engine = engine().with_write_mode(WriteMode::InPlace);

        engine
            .transform(Task::new(&path, Action::Encrypt, Cursor::new(vec![0u8; 40])))
            .unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 16 + 48);
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_goes_through_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        fs::write(&real, b"top secret").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let engine = engine();
        engine
            .transform(Task::open(&link, Action::Encrypt).unwrap())
            .unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let container = fs::read(&real).unwrap();
        assert_eq!(container.len(), 32);
        assert_eq!(
            engine.apply(Action::Decrypt, &container).unwrap(),
            b"top secret"
        );
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_reaches_every_hard_link() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"top secret").unwrap();
        fs::hard_link(&a, &b).unwrap();

        engine()
            .transform(Task::open(&a, Action::Encrypt).unwrap())
            .unwrap();

        let through_b = fs::read(&b).unwrap();
        assert_eq!(through_b.len(), 32);
        assert_eq!(through_b, fs::read(&a).unwrap());
    }
}
