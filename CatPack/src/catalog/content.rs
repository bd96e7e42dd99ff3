//! Content references to the binary resources of catalog items
//!
//! A [`Content`] is one of three kinds:
//! - [`Content::Url`] - already addressable through a URL, which may be kept
//!   unchanged when a library is saved
//! - [`Content::Temporary`] - local data (typically imported files) that must
//!   be packaged into the saved library
//! - [`Content::Resource`] - data bundled in an archive, such as the library
//!   file being edited, that must be packaged too
//!
//! Contents are plain values: two equal contents are the same resource and
//! get a single entry when a library is written.

use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;
use zip::ZipArchive;

/// Where the bytes of a content can be read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentSource {
    /// A file on disk
    File(PathBuf),
    /// An entry of a ZIP archive on disk
    ArchiveEntry {
        /// The archive file
        archive: PathBuf,
        /// Entry name inside the archive, `/` separated
        entry: String,
    },
}

impl ContentSource {
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        ContentSource::File(path.into())
    }

    pub fn archive_entry(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        ContentSource::ArchiveEntry {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// Trailing path segment
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self {
            ContentSource::File(path) => path.file_name()?.to_str(),
            ContentSource::ArchiveEntry { entry, .. } => {
                entry.rsplit('/').next().filter(|name| !name.is_empty())
            }
        }
    }

    /// Directory of an archive entry including its trailing `/`
    ///
    /// Returns `""` for entries at the archive root and `None` for files.
    #[must_use]
    pub fn entry_directory(&self) -> Option<&str> {
        match self {
            ContentSource::File(_) => None,
            ContentSource::ArchiveEntry { entry, .. } => {
                Some(entry.rfind('/').map_or("", |i| &entry[..=i]))
            }
        }
    }

    /// Name of the innermost directory holding this source
    ///
    /// For an archive entry this is the entry's parent directory, or the
    /// archive file stem for entries at the archive root.
    #[must_use]
    pub fn directory_name(&self) -> Option<&str> {
        match self {
            ContentSource::File(path) => path.parent()?.file_name()?.to_str(),
            ContentSource::ArchiveEntry { archive, entry } => {
                let directory = entry.rfind('/').map(|i| &entry[..i]);
                match directory {
                    Some(dir) => dir.rsplit('/').next(),
                    None => archive.file_stem()?.to_str(),
                }
            }
        }
    }

    /// Read all bytes of this source
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            ContentSource::File(path) => Ok(std::fs::read(path)?),
            ContentSource::ArchiveEntry { archive, entry } => {
                let mut zip = open_archive(archive)?;
                let mut file = zip.by_name(entry)?;
                let mut buffer = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
                file.read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::File(path) => write!(f, "{}", path.display()),
            ContentSource::ArchiveEntry { archive, entry } => {
                write!(f, "{}!/{entry}", archive.display())
            }
        }
    }
}

/// Open a ZIP archive on disk for reading
pub(crate) fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// Private copy of a library archive taken when it is read
///
/// Bundled contents of a loaded library point into the copy, so the library
/// file itself can be overwritten while they are in use. The copy keeps the
/// file name of the archive and is deleted with its last clone.
#[derive(Debug, Clone)]
pub struct ArchiveSnapshot {
    _directory: Arc<TempDir>,
    path: PathBuf,
}

impl ArchiveSnapshot {
    /// Copy `archive` into a new temporary directory
    pub fn create(archive: &Path) -> Result<Self> {
        let file_name = archive
            .file_name()
            .ok_or_else(|| Error::InvalidPath(archive.display().to_string()))?;
        let directory = tempfile::Builder::new().prefix("catpack-").tempdir()?;
        let path = directory.path().join(file_name);
        io::copy(&mut File::open(archive)?, &mut File::create(&path)?)?;
        Ok(Self {
            _directory: Arc::new(directory),
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartialEq for ArchiveSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Split `jar:<outer>!/<inner>` into its outer URL and inner entry
#[must_use]
pub fn split_jar_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("jar:")?;
    let separator = rest.find("!/")?;
    Some((&rest[..separator], &rest[separator + 2..]))
}

/// A content reachable through a URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlContent {
    url: String,
    local: Option<ContentSource>,
}

impl UrlContent {
    /// Create a URL content, deriving its local source from `file:` URLs
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let local = local_source_for_url(&url);
        Self { url, local }
    }

    /// Create a URL content whose bytes are mirrored at `local`
    pub fn with_local(url: impl Into<String>, local: ContentSource) -> Self {
        Self {
            url: url.into(),
            local: Some(local),
        }
    }

    /// The URL as written in catalogs
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local copy of the bytes, if any
    #[must_use]
    pub fn local(&self) -> Option<&ContentSource> {
        self.local.as_ref()
    }

    /// `(outer, inner)` parts of a `jar:` URL
    #[must_use]
    pub fn jar_entry(&self) -> Option<(&str, &str)> {
        split_jar_url(&self.url)
    }

    /// Decoded trailing path segment
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        let path = match self.jar_entry() {
            Some((_, inner)) => inner,
            None => self.url.split(['?', '#']).next().unwrap_or(&self.url),
        };
        let segment = path.rsplit('/').next().filter(|s| !s.is_empty())?;
        Some(decode_segment(segment))
    }

    /// URL of the resource itself, or of its container for `jar:` URLs
    #[must_use]
    pub fn container_url(&self) -> &str {
        self.jar_entry().map_or(self.url.as_str(), |(outer, _)| outer)
    }

    /// True when the bytes can be fetched from an HTTP server
    #[must_use]
    pub fn is_downloadable(&self) -> bool {
        cfg!(feature = "remote")
            && Url::parse(self.container_url())
                .is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
    }

    /// Download the whole container of a `jar:` URL, or the resource itself
    pub fn download_container(&self) -> Result<Vec<u8>> {
        fetch(self.container_url())
    }

    /// Download the bytes of the resource
    pub fn download(&self) -> Result<Vec<u8>> {
        match self.jar_entry() {
            Some((outer, inner)) => {
                let mut archive = ZipArchive::new(Cursor::new(fetch(outer)?))?;
                let mut file = archive.by_name(&decode_segment(inner))?;
                let mut data = Vec::new();
                file.read_to_end(&mut data)?;
                Ok(data)
            }
            None => fetch(&self.url),
        }
    }
}

#[cfg(feature = "remote")]
fn fetch(url: &str) -> Result<Vec<u8>> {
    super::remote::download(url)
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str) -> Result<Vec<u8>> {
    Err(Error::UnsupportedContent {
        content: url.to_string(),
    })
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn local_source_for_url(url: &str) -> Option<ContentSource> {
    if let Some((outer, inner)) = split_jar_url(url) {
        let archive = Url::parse(outer).ok()?.to_file_path().ok()?;
        return Some(ContentSource::ArchiveEntry {
            archive,
            entry: decode_segment(inner),
        });
    }
    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() == "file" {
        parsed.to_file_path().ok().map(ContentSource::File)
    } else {
        None
    }
}

/// Reference to the binary data of a catalog item resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    /// Externally addressable content
    Url(UrlContent),
    /// Local data that must be copied when saving
    Temporary(ContentSource),
    /// Data bundled in an archive that must be copied when saving
    Resource(ContentSource),
}

impl Content {
    /// Temporary content backed by a file
    pub fn temporary_file<P: Into<PathBuf>>(path: P) -> Self {
        Content::Temporary(ContentSource::File(path.into()))
    }

    /// URL content; `file:` and `jar:file:` URLs get a local source
    pub fn from_url(url: impl Into<String>) -> Self {
        Content::Url(UrlContent::new(url))
    }

    /// Where the bytes can be read
    #[must_use]
    pub fn source(&self) -> Option<&ContentSource> {
        match self {
            Content::Url(url) => url.local(),
            Content::Temporary(source) | Content::Resource(source) => Some(source),
        }
    }

    /// True for temporary and bundled contents
    #[must_use]
    pub fn must_be_copied(&self) -> bool {
        !matches!(self, Content::Url(_))
    }

    /// Trailing path segment of the content
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        match self {
            Content::Url(url) => url.file_name(),
            Content::Temporary(source) | Content::Resource(source) => {
                source.file_name().map(str::to_string)
            }
        }
    }

    /// Read all bytes of the content
    ///
    /// URL contents without local data are downloaded when they are
    /// published over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedContent`] for other URL contents without
    /// local data, and [`Error::Download`] when the server fails.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match (self.source(), self) {
            (Some(source), _) => source.read_bytes(),
            (None, Content::Url(url)) if url.is_downloadable() => url.download(),
            (None, _) => Err(Error::UnsupportedContent {
                content: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Url(url) => f.write_str(url.url()),
            Content::Temporary(source) => write!(f, "temporary {source}"),
            Content::Resource(source) => write!(f, "resource {source}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_jar_url() {
        assert_eq!(
            split_jar_url("jar:http://host/models/chair.zip!/chair.obj"),
            Some(("http://host/models/chair.zip", "chair.obj"))
        );
        assert_eq!(split_jar_url("http://host/a.png"), None);
    }

    #[test]
    fn test_url_file_name() {
        let content = UrlContent::new("http://host/textures/Light%20Oak.jpg?v=2");
        assert_eq!(content.file_name().as_deref(), Some("Light Oak.jpg"));
        assert!(content.local().is_none());

        let jar = UrlContent::new("jar:http://host/chair.zip!/parts/seat%20top.obj");
        assert_eq!(jar.file_name().as_deref(), Some("seat top.obj"));
    }

    #[test]
    fn test_file_url_has_local_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oak.png");
        let url = Url::from_file_path(&path).unwrap();
        let content = UrlContent::new(url.as_str());
        assert_eq!(content.local(), Some(&ContentSource::File(path)));
    }

    #[test]
    fn test_jar_file_url_has_archive_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chair.zip");
        let url = Url::from_file_path(&path).unwrap();
        let content = UrlContent::new(format!("jar:{url}!/chair%20a.obj"));
        assert_eq!(
            content.local(),
            Some(&ContentSource::archive_entry(path, "chair a.obj"))
        );
    }

    #[test]
    fn test_entry_directory() {
        let nested = ContentSource::archive_entry("lib.sh3f", "chair/chair.obj");
        assert_eq!(nested.entry_directory(), Some("chair/"));
        assert_eq!(nested.directory_name(), Some("chair"));

        let root = ContentSource::archive_entry("/tmp/sofa.zip", "sofa.obj");
        assert_eq!(root.entry_directory(), Some(""));
        assert_eq!(root.directory_name(), Some("sofa"));

        assert_eq!(ContentSource::file("/tmp/a.png").entry_directory(), None);
    }

    #[test]
    fn test_url_content_without_local_cannot_be_read() {
        let content = Content::from_url("ftp://host/a.png");
        assert!(matches!(
            content.read_bytes(),
            Err(Error::UnsupportedContent { .. })
        ));
    }

    #[test]
    fn test_snapshot_outlives_original() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("woods.sh3t");
        std::fs::write(&archive, b"first").unwrap();

        let snapshot = ArchiveSnapshot::create(&archive).unwrap();
        std::fs::write(&archive, b"second").unwrap();
        assert_eq!(std::fs::read(snapshot.path()).unwrap(), b"first");
        assert_eq!(snapshot.path().file_name(), archive.file_name());

        let path = snapshot.path().to_path_buf();
        let clone = snapshot.clone();
        drop(snapshot);
        assert!(path.exists());
        drop(clone);
        assert!(!path.exists());
    }

    #[cfg(feature = "remote")]
    fn serve_once(body: &'static [u8]) -> String {
        use std::io::Write;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        });
        format!("http://{address}")
    }

    #[cfg(feature = "remote")]
    #[test]
    fn test_http_content_is_downloaded() {
        let base = serve_once(b"remote png");
        let content = Content::from_url(format!("{base}/textures/oak.png"));
        assert!(content.source().is_none());
        assert_eq!(content.read_bytes().unwrap(), b"remote png");
    }

    #[test]
    fn test_equal_contents_are_equal() {
        let a = Content::temporary_file("/tmp/a.png");
        let b = Content::temporary_file("/tmp/a.png");
        assert_eq!(a, b);
        assert_ne!(a, Content::Resource(ContentSource::file("/tmp/a.png")));
    }
}
