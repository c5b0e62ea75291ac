use crate::error::{Error, Result};
use crate::formatting::{FormatContext, TermFinder};
use crate::scan::scan;
use crate::shared::text::truncate_with_ellipsis;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Hits reported per file before the rest of the file is skipped.
pub const MAX_HITS_PER_FILE: usize = 3;
pub const ELISION_MARKER: &str = "  ...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: String,
    /// 1-based.
    pub line_number: usize,
    pub line: String,
}

/// The hits of one file, in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHits {
    pub path: String,
    pub hits: Vec<SearchHit>,
    /// The cap was reached and reading stopped early.
    pub truncated: bool,
}

/// A directory to search, and the prefix its files are shown with.
#[derive(Debug, Clone)]
pub struct SearchRoot {
    pub dir: PathBuf,
    pub label: Option<String>,
}

impl SearchRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), label: None }
    }

    pub fn labeled(dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self { dir: dir.into(), label: Some(label.into()) }
    }

    fn display_path(&self, name: &str) -> String {
        match &self.label {
            Some(label) => format!("{label}/{name}"),
            None => name.to_string(),
        }
    }
}

pub struct Searcher {
    finder: TermFinder,
    max_hits: usize,
    recursive: bool,
}

impl Searcher {
    /// An empty term is a usage error; a term that cannot be compiled is
    /// reported as such.
    pub fn new(term: &str) -> Result<Self> {
        Self::from_finder(TermFinder::new(term))
    }

    fn from_finder(
        finder: std::result::Result<Option<TermFinder>, regex::Error>,
    ) -> Result<Self> {
        match finder {
            Ok(Some(finder)) => Ok(Self {
                finder,
                max_hits: MAX_HITS_PER_FILE,
                recursive: false,
            }),
            Ok(None) => Err(Error::usage("Provide a search term after -s")),
            Err(err) => Err(Error::Term(err)),
        }
    }

    pub fn recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    /// Files with at least one hit, produced one file at a time as the
    /// scan proceeds. Files that cannot be read are skipped.
    pub fn search<'a>(
        &'a self,
        roots: &'a [SearchRoot],
    ) -> impl Iterator<Item = FileHits> + 'a {
        roots
            .iter()
            .flat_map(move |root| {
                let mut names: Vec<String> =
                    scan(&root.dir, "", self.recursive).into_iter().collect();
                names.sort();
                names.into_iter().map(move |name| (root, name))
            })
            .filter_map(move |(root, name)| {
                let path = root.dir.join(&name);
                match self.search_file(&path, root.display_path(&name)) {
                    Ok(found) => found,
                    Err(err) => {
                        debug!(path = %path.display(), %err, "skipping unreadable note");
                        None
                    }
                }
            })
    }

    /// Scan one file line by line, stopping once the cap is reached.
    pub fn search_file(
        &self,
        path: &Path,
        display: String,
    ) -> io::Result<Option<FileHits>> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut hits = Vec::new();
        let mut truncated = false;
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if !self.finder.is_match(line) {
                continue;
            }
            hits.push(SearchHit {
                path: display.clone(),
                line_number,
                line: line.to_string(),
            });
            if hits.len() >= self.max_hits {
                truncated = true;
                break;
            }
        }

        if hits.is_empty() {
            return Ok(None);
        }
        Ok(Some(FileHits { path: display, hits, truncated }))
    }
}

/// Print one file's header, its hit lines and the elision marker.
pub fn print_file_hits(
    out: &mut dyn Write,
    file: &FileHits,
    term: &str,
    ctx: &FormatContext,
    width: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "{}", ctx.format_header(&file.path))?;
    for hit in &file.hits {
        let prefix = format!("  {}: ", hit.line_number);
        let line = match width {
            Some(w) => truncate_with_ellipsis(
                &hit.line,
                w.saturating_sub(prefix.chars().count()).max(1),
            ),
            None => hit.line.clone(),
        };
        writeln!(
            out,
            "{}{}",
            ctx.format_muted(&prefix),
            ctx.highlight_match(&line, term)
        )?;
    }
    if file.truncated {
        writeln!(out, "{}", ctx.format_muted(ELISION_MARKER))?;
    }
    Ok(())
}
