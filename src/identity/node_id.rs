//! Persistent node identity.
//!
//! The node id is a lowercase hyphenated UUID v4 persisted to a single-line
//! file. On first resolve the file is read and validated; if absent or
//! malformed, a fresh UUID is generated, the parent directory is created
//! (mode 0755) and the id written out (mode 0644). The resolved value is
//! cached for the life of the process, so the id only ever changes when the
//! file is removed externally and the process restarts.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct NodeIdentity {
    path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl NodeIdentity {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Resolve the node id, generating and persisting one if needed.
    pub fn node_id(&self) -> String {
        let mut cached = self.cached.lock();
        if let Some(id) = cached.as_ref() {
            return id.clone();
        }

        let id = match Self::read_from_file(&self.path) {
            Some(id) => {
                log::info!("Node id loaded from {}", self.path.display());
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                if let Err(e) = Self::write_to_file(&self.path, &id) {
                    // Keep running with the in-memory id; the peer still gets
                    // a stable identity for this process lifetime.
                    log::warn!(
                        "Failed to persist node id to {}: {}",
                        self.path.display(),
                        e
                    );
                } else {
                    log::info!("Generated new node id, saved to {}", self.path.display());
                }
                id
            }
        };

        *cached = Some(id.clone());
        id
    }

    fn read_from_file(path: &Path) -> Option<String> {
        let content = fs::read_to_string(path).ok()?;
        let id = content.lines().next()?.trim().to_string();
        if Self::looks_like_uuid(&id) {
            Some(id)
        } else {
            log::warn!("Invalid node id in {}, regenerating", path.display());
            None
        }
    }

    /// 36 characters in the 8-4-4-4-12 layout.
    fn looks_like_uuid(s: &str) -> bool {
        let bytes = s.as_bytes();
        if bytes.len() != 36 {
            return false;
        }
        s.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
    }

    fn write_to_file(path: &Path, id: &str) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                create_dir_0755(dir)?;
            }
        }
        fs::write(path, format!("{id}\n"))?;
        set_mode_0644(path);
        Ok(())
    }
}

#[cfg(unix)]
fn create_dir_0755(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_dir_0755(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn set_mode_0644(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o644)) {
        log::warn!("Failed to set node id file permissions: {}", e);
    }
}

#[cfg(not(unix))]
fn set_mode_0644(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_and_persists_uuid_v4() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids/node_id.txt");

        let identity = NodeIdentity::new(&path);
        let id = identity.node_id();

        assert!(NodeIdentity::looks_like_uuid(&id));
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);

        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk.trim(), id);
    }

    #[test]
    fn cached_after_first_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_id.txt");

        let identity = NodeIdentity::new(&path);
        let first = identity.node_id();

        // Even if the file changes underneath, the in-memory id stays stable
        // for the process lifetime.
        fs::write(&path, "ffffffff-ffff-4fff-8fff-ffffffffffff\n").unwrap();
        assert_eq!(identity.node_id(), first);
    }

    #[test]
    fn reuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_id.txt");
        fs::write(&path, "0a1b2c3d-4e5f-4678-9abc-def012345678\n").unwrap();

        let identity = NodeIdentity::new(&path);
        assert_eq!(identity.node_id(), "0a1b2c3d-4e5f-4678-9abc-def012345678");
    }

    #[test]
    fn removing_file_yields_new_id_on_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_id.txt");

        let first = NodeIdentity::new(&path).node_id();
        fs::remove_file(&path).unwrap();
        let second = NodeIdentity::new(&path).node_id();
        assert_ne!(first, second);

        // With the file kept, a fresh resolver sees the same id.
        let third = NodeIdentity::new(&path).node_id();
        assert_eq!(second, third);
    }

    #[test]
    fn malformed_file_regenerates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_id.txt");
        fs::write(&path, "not-a-uuid\n").unwrap();

        let id = NodeIdentity::new(&path).node_id();
        assert!(NodeIdentity::looks_like_uuid(&id));
        assert_ne!(id, "not-a-uuid");
    }

    #[cfg(unix)]
    #[test]
    fn file_mode_is_0644() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_id.txt");
        NodeIdentity::new(&path).node_id();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
