use std::fs;
use std::io::{self, Write};
use std::process::Command;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{GenError, Result};

/// Destination for snapshot files.
///
/// The generator holds one of these and never learns whether it writes to
/// the local disk or to a remote host. Writes are fire and forget per
/// blob, there is no partial-write recovery.
pub trait BlobSink {
    /// Make sure a directory exists before anything is written under it.
    fn ensure_dir(&mut self, dir: &str) -> Result<()>;

    /// Store one named blob, overwriting any previous content.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Plain filesystem sink.
pub struct LocalSink;

impl BlobSink for LocalSink {
    fn ensure_dir(&mut self, dir: &str) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| GenError::Storage {
            name: dir.to_string(),
            source,
        })
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        fs::write(name, bytes).map_err(|source| GenError::Storage {
            name: name.to_string(),
            source,
        })
    }
}

/// Sink that ships blobs to a remote host over ssh and scp.
///
/// The host string may carry a user part (`user@host`). Authentication is
/// delegated to the caller's keys or agent. Blobs are staged in a temp
/// file so scp sees a regular local path.
pub struct SshSink {
    host: String,
}

impl SshSink {
    pub fn new(host: impl Into<String>) -> SshSink {
        SshSink { host: host.into() }
    }

    fn run(&self, name: &str, command: &mut Command) -> Result<()> {
        let status = command.status().map_err(|source| GenError::Storage {
            name: name.to_string(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(GenError::Storage {
                name: name.to_string(),
                source: io::Error::new(
                    io::ErrorKind::Other,
                    format!("remote command exited with {status}"),
                ),
            })
        }
    }
}

impl BlobSink for SshSink {
    fn ensure_dir(&mut self, dir: &str) -> Result<()> {
        debug!("ssh {} mkdir -p {}", self.host, dir);
        let mut command = Command::new("ssh");
        command.arg(&self.host).arg("mkdir").arg("-p").arg(dir);
        self.run(dir, &mut command)
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let mut staged = NamedTempFile::new().map_err(|source| GenError::Storage {
            name: name.to_string(),
            source,
        })?;
        staged.write_all(bytes).map_err(|source| GenError::Storage {
            name: name.to_string(),
            source,
        })?;
        staged.flush().map_err(|source| GenError::Storage {
            name: name.to_string(),
            source,
        })?;
        let target = format!("{}:{}", self.host, name);
        debug!("scp {} {}", staged.path().display(), target);
        let mut command = Command::new("scp");
        command.arg("-q").arg(staged.path()).arg(&target);
        self.run(name, &mut command)
    }
}


#[cfg(test)]
mod test_sink {
    use crate::sink::{BlobSink, LocalSink};

    #[test]
    fn local_sink_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let mut sink = LocalSink;
        sink.ensure_dir(nested.to_str().unwrap()).unwrap();
        let file = nested.join("blob.tsv");
        sink.write(file.to_str().unwrap(), b"1\t2\t1\n").unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), b"1\t2\t1\n");
    }

    #[test]
    fn local_sink_surfaces_write_failures() {
        let mut sink = LocalSink;
        let err = sink
            .write("/definitely/not/a/writable/path/blob.tsv", b"x")
            .unwrap_err();
        assert!(matches!(err, crate::error::GenError::Storage { .. }));
    }
}
