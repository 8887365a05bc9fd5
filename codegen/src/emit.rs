//! Declaration rendering and file output.
//!
//! Each accessor becomes one line of the form
//! `Swizzle<T, Dim, Packed, 2, 0, 1> zxy;`. `T`, `Dim` and `Packed` are left as
//! literal tokens for the including vector storage to give meaning to.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use swizzle_model::{enumerate, Accessor, Arity, Dimension};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::CodegenError;

/// Leading tokens of every declaration, up to the first index.
pub const DECLARATION_HEAD: &str = "Swizzle<T, Dim, Packed";

/// Accumulates declaration lines separated by `\n`, with no trailing newline.
pub struct DeclarationFile {
    /// Rendered content so far.
    pub buf: String,
    lines: usize,
}

impl DeclarationFile {
    /// Creates an empty file.
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(16 * 1024),
            lines: 0,
        }
    }

    /// Appends one line.
    pub fn line(&mut self, s: &str) {
        if self.lines > 0 {
            self.buf.push('\n');
        }
        self.buf.push_str(s);
        self.lines += 1;
    }

    /// Appends the declaration of `accessor`.
    pub fn declaration(&mut self, accessor: &Accessor) {
        let line = declaration(accessor);
        self.line(&line);
    }

    /// Number of lines appended.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Consumes the builder and returns the content.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for DeclarationFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a single declaration line.
pub fn declaration(accessor: &Accessor) -> String {
    let mut line = String::from(DECLARATION_HEAD);
    for index in accessor.indices() {
        let _ = write!(line, ", {index}");
    }
    let _ = write!(line, "> {};", accessor.name());
    line
}

/// Content of a rendered declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Dimension the declarations were rendered for.
    pub dimension: Dimension,
    /// Declaration count per arity, arity 1 first.
    pub arity_counts: Vec<usize>,
    /// File content.
    pub content: String,
}

impl Rendered {
    /// Total number of declaration lines.
    pub fn line_count(&self) -> usize {
        self.arity_counts.iter().sum()
    }
}

/// Renders every declaration for `dimension`, arity-1 block first.
pub fn render_declarations(dimension: Dimension) -> Rendered {
    let alphabet = dimension.alphabet();
    let mut f = DeclarationFile::new();
    let mut arity_counts = Vec::with_capacity(Arity::ALL.len());

    for &arity in &Arity::ALL {
        let block = enumerate(&alphabet, arity);
        for accessor in &block {
            f.declaration(accessor);
        }
        arity_counts.push(block.len());
    }

    debug!(
        dimension = dimension.get(),
        lines = f.line_count(),
        "rendered swizzle declarations"
    );

    Rendered {
        dimension,
        arity_counts,
        content: f.finish(),
    }
}

/// Replaces the contents of `path` with `content`.
///
/// The content is written to a temporary file next to `path` and renamed over
/// it, so readers see either the previous file or the complete new one. The
/// parent directory must already exist. An existing file keeps its
/// permissions. If `path` is a symbolic link, the file it points to is
/// replaced and the link is left in place.
///
/// # Errors
///
/// Returns [`CodegenError::DestinationUnwritable`] if the destination cannot be
/// inspected, the temporary file cannot be created or written, or the rename
/// fails.
pub fn write_file(path: &Path, content: &str) -> Result<(), CodegenError> {
    let unwritable = |source: io::Error| CodegenError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_destination(path).map_err(unwritable)?;
    if target.as_path() != path {
        debug!(link = %path.display(), resolved = %target.display(), "following symlink");
    }

    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => default_permissions(),
        Err(source) => return Err(unwritable(source)),
    };

    let mut tmp = NamedTempFile::new_in(parent_dir(&target)).map_err(unwritable)?;
    tmp.write_all(content.as_bytes()).map_err(unwritable)?;
    tmp.as_file().sync_all().map_err(unwritable)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(unwritable)?;
    }

    tmp.persist(&target).map_err(|e| unwritable(e.error))?;
    info!(path = %path.display(), bytes = content.len(), "replaced destination");
    Ok(())
}

/// Directory the temporary file is created in: the parent of `path`, or the
/// working directory for a bare file name.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Follows `path` if it is a symbolic link. A dangling link resolves to the
/// path it names, so the write creates the missing target.
fn resolve_destination(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(parent_dir(path).join(fs::read_link(path)?))
            }
            Err(e) => Err(e),
        },
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(dimension: Dimension) -> Vec<String> {
        render_declarations(dimension)
            .content
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn declaration_layout() {
        let accessors = swizzle_model::enumerate_dimension(Dimension::Three);
        let zxy = accessors.iter().find(|a| a.name() == "zxy");
        assert_eq!(
            zxy.map(declaration).as_deref(),
            Some("Swizzle<T, Dim, Packed, 2, 0, 1> zxy;")
        );
    }

    #[test]
    fn dimension_one_file() {
        assert_eq!(
            render_declarations(Dimension::One).content,
            "Swizzle<T, Dim, Packed, 0> x;\n\
             Swizzle<T, Dim, Packed, 0, 0> xx;\n\
             Swizzle<T, Dim, Packed, 0, 0, 0> xxx;\n\
             Swizzle<T, Dim, Packed, 0, 0, 0, 0> xxxx;"
        );
    }

    #[test]
    fn dimension_two_has_thirty_lines() {
        let rendered = render_declarations(Dimension::Two);
        assert_eq!(rendered.arity_counts, [2, 4, 8, 16]);
        assert_eq!(rendered.line_count(), 30);
        assert_eq!(lines(Dimension::Two).len(), 30);
    }

    #[test]
    fn dimension_three_blocks() {
        let lines = lines(Dimension::Three);
        assert_eq!(lines.len(), 120);
        assert_eq!(lines[0], "Swizzle<T, Dim, Packed, 0> x;");
        assert_eq!(lines[1], "Swizzle<T, Dim, Packed, 1> y;");
        assert_eq!(lines[2], "Swizzle<T, Dim, Packed, 2> z;");
        assert_eq!(lines[3], "Swizzle<T, Dim, Packed, 0, 0> xx;");
        assert_eq!(lines[119], "Swizzle<T, Dim, Packed, 2, 2, 2, 2> zzzz;");
    }

    #[test]
    fn dimension_four_ends_with_wwww() {
        let rendered = render_declarations(Dimension::Four);
        assert_eq!(rendered.line_count(), 340);
        assert!(rendered
            .content
            .ends_with("Swizzle<T, Dim, Packed, 3, 3, 3, 3> wwww;"));
        assert!(!rendered.content.ends_with('\n'));
    }

    #[test]
    fn builder_joins_without_trailing_newline() {
        let mut f = DeclarationFile::new();
        assert_eq!(f.line_count(), 0);
        f.line("a");
        f.line("b");
        assert_eq!(f.line_count(), 2);
        assert_eq!(f.finish(), "a\nb");
    }

    #[test]
    fn write_file_replaces_existing_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        write_file(&path, "first version, which is longer").expect("first write");
        write_file(&path, "second").expect("second write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "second");

        let entries = fs::read_dir(dir.path()).expect("list tempdir").count();
        assert_eq!(entries, 1, "temporary file left behind");
    }

    #[test]
    fn write_file_requires_parent_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.txt");
        let err = write_file(&path, "content").expect_err("parent does not exist");
        match err {
            CodegenError::DestinationUnwritable { path: reported, .. } => {
                assert_eq!(reported, path);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn uninspectable_destination_is_unwritable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("plain.txt");
        fs::write(&file, "not a directory").expect("seed");
        let path = file.join("out.txt");

        let err = write_file(&path, "content").expect_err("parent is a file");
        assert!(matches!(err, CodegenError::DestinationUnwritable { .. }));
        assert_eq!(fs::read_to_string(&file).expect("read back"), "not a directory");
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        write_file(&path, "x").expect("write");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_destination_replaces_the_target() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, "old").expect("seed target");
        symlink("real.txt", &link).expect("symlink");

        write_file(&link, "new").expect("write through link");

        let link_meta = fs::symlink_metadata(&link).expect("link metadata");
        assert!(link_meta.file_type().is_symlink(), "link was replaced by a file");
        assert_eq!(fs::read_to_string(&target).expect("read target"), "new");
        assert_eq!(fs::read_dir(dir.path()).expect("list").count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_creates_the_target() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().expect("tempdir");
        let link = dir.path().join("link.txt");
        symlink("real.txt", &link).expect("symlink");

        write_file(&link, "content").expect("write through dangling link");

        assert!(fs::symlink_metadata(&link)
            .expect("link metadata")
            .file_type()
            .is_symlink());
        assert_eq!(
            fs::read_to_string(dir.path().join("real.txt")).expect("read target"),
            "content"
        );
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_is_unwritable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).expect("create dir");
        let path = locked.join("out.txt");
        fs::write(&path, "previous").expect("seed");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).expect("chmod");

        // Permission bits do not bind a privileged user.
        let enforced = fs::File::create(locked.join("access-check")).is_err();
        if enforced {
            let err = write_file(&path, "replacement").expect_err("directory is read-only");
            match err {
                CodegenError::DestinationUnwritable { path: reported, .. } => {
                    assert_eq!(reported, path);
                }
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(fs::read_to_string(&path).expect("read back"), "previous");
        }

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");
    }
}
