//! Runner jar access.
//!
//! [`RunnerJar`] opens an existing archive, reads its manifest and entry
//! names, and closes the file before returning. [`JarWriter`] produces
//! archives with the manifest as the first entry, the same layout `jar`
//! tooling emits.

use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::{Path, PathBuf},
};

use zip::{result::ZipError, write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

use crate::{
    error::{JarError, Result},
    manifest::{Manifest, MANIFEST_PATH},
};

/// Read-only view of a runner jar.
#[derive(Debug, Clone)]
pub struct RunnerJar {
    path: PathBuf,
    manifest: Manifest,
    entries: Vec<String>,
}

impl RunnerJar {
    /// Opens the archive at `path` and reads its manifest.
    ///
    /// The underlying file handle is released when this returns.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, is not a zip container, has no
    /// manifest entry, or the manifest is malformed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| JarError::io(path, e))?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        let entries = archive.file_names().map(str::to_string).collect::<Vec<_>>();

        let bytes = match archive.by_name(MANIFEST_PATH) {
            Ok(mut entry) => {
                let mut buf = Vec::with_capacity(initial_capacity(entry.size()));
                entry
                    .read_to_end(&mut buf)
                    .map_err(|e| JarError::io(path, e))?;
                buf
            }
            Err(ZipError::FileNotFound) => {
                return Err(JarError::MissingManifest {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let manifest = Manifest::parse(&bytes)?;
        log::debug!(
            "read {} ({} entries, {} main attributes)",
            path.display(),
            entries.len(),
            manifest.main.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            manifest,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Names of all entries in archive order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }

    /// Directory that holds the jar, the base for relative `Class-Path` entries.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Upper bound for buffers pre-sized from a size declared in the archive.
const MAX_PREALLOC: usize = 64 * 1024;

/// Buffer capacity for an entry whose header declares `declared` bytes.
fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC))
}

/// Reads only the manifest of the archive at `path`.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    RunnerJar::open(path).map(|jar| jar.manifest)
}

/// Streaming jar writer.
///
/// # Example
///
/// ```rust,no_run
/// use runnerjar::{JarWriter, Manifest};
///
/// let manifest = Manifest::new()
///     .with_main_class("io.quarkus.runner.GeneratedMain")
///     .with_class_path(["lib/org.acme.dep-1.0.jar"]);
/// let mut writer = JarWriter::create("target/app-runner.jar", &manifest).unwrap();
/// writer.add_entry("io/quarkus/runner/GeneratedMain.class", b"").unwrap();
/// writer.finish().unwrap();
/// ```
pub struct JarWriter {
    path: PathBuf,
    inner: ZipWriter<File>,
    options: SimpleFileOptions,
}

impl JarWriter {
    /// Creates `path` and writes the `META-INF/` directory and manifest.
    pub fn create(path: impl AsRef<Path>, manifest: &Manifest) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| JarError::io(&path, e))?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut writer = Self {
            inner: ZipWriter::new(file),
            path,
            options,
        };
        writer.inner.add_directory("META-INF/", writer.options)?;
        writer.add_entry(MANIFEST_PATH, &manifest.to_bytes())?;
        Ok(writer)
    }

    /// Adds a file entry.
    pub fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.inner.start_file(name, self.options)?;
        self.inner
            .write_all(data)
            .map_err(|e| JarError::io(&self.path, e))
    }

    /// Adds a directory entry; `name` should end with `/`.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        self.inner.add_directory(name, self.options)?;
        Ok(())
    }

    /// Writes the central directory and closes the file.
    pub fn finish(self) -> Result<PathBuf> {
        self.inner.finish()?;
        Ok(self.path)
    }
}
