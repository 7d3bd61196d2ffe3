use std::{fs, io::{self, Cursor, Read}, path::{Path, PathBuf}};

/// A document the corpus builder can open
/// Opening happens inside the worker processing the document
pub trait DocumentSource: Send + Sync {
    /// identifier the document is known by in the corpus
    fn id(&self) -> &str;
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        (**self).open()
    }
}

/// Document backed by a file on disk
/// The identifier is the path as displayed
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    id: String,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.display().to_string();
        Self { path, id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(fs::File::open(&self.path)?))
    }
}

/// In-memory document
#[derive(Debug, Clone)]
pub struct TextDocument {
    id: String,
    text: String,
}

impl TextDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

impl DocumentSource for TextDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.text.clone().into_bytes())))
    }
}

/// Regular files directly inside `dir`, sorted by path
pub fn directory_documents<P: AsRef<Path>>(dir: P) -> io::Result<Vec<FileDocument>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files.into_iter().map(FileDocument::new).collect())
}
