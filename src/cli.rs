//! Command-line arguments.

use crate::error::{ErrorKind, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use librarian_archive::{Format, RECOGNIZED_EXTENSIONS};
use librarian_catalog::{AuthorName, Deletion};
use librarian_library::Source;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "librarian", version, about = "Catalog FictionBook files into a searchable SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML, YAML or JSON), merged over the defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging; repeat for more detail.
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Less logging; repeat to silence everything.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}
impl Cli {
    /// The `tracing` filter implied by `-v`/`-q`, if either was given.
    pub fn verbosity(&self) -> Option<&'static str> {
        match (self.verbose, self.quiet) {
            (0, 0) => None,
            (1, _) => Some("info"),
            (2, _) => Some("debug"),
            (_, 0) => Some("trace"),
            (_, 1) => Some("error"),
            (_, _) => Some("off"),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add the books found in a directory or file to the catalog.
    Ingest(IngestArgs),
    /// Look books up by name, and optionally author and year.
    Search(SearchArgs),
    /// Remove one book, or everything.
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["dir", "file"])))]
pub struct IngestArgs {
    /// Directory to search recursively for book files.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// A single book file (.fb2, .gz, .zip or no extension).
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Overwrite the year of books that are already cataloged.
    #[arg(long)]
    pub update: bool,
}
impl IngestArgs {
    pub fn source(&self) -> Result<Source> {
        match (&self.dir, &self.file) {
            (Some(dir), None) if dir.is_dir() => Ok(Source::Directory(dir.clone())),
            (Some(dir), None) => exn::bail!(ErrorKind::InvalidArgument(format!("not a directory: {}", dir.display()))),
            (None, Some(file)) if !file.is_file() => {
                exn::bail!(ErrorKind::InvalidArgument(format!("not a file: {}", file.display())))
            },
            (None, Some(file)) if !Format::is_recognized(file) => exn::bail!(ErrorKind::InvalidArgument(format!(
                "unrecognized extension on {} (expected {})",
                file.display(),
                expected_extensions()
            ))),
            (None, Some(file)) => Ok(Source::File(file.clone())),
            _ => exn::bail!(ErrorKind::InvalidArgument("exactly one of --dir and --file is required".to_string())),
        }
    }
}

fn expected_extensions() -> String {
    RECOGNIZED_EXTENSIONS
        .iter()
        .map(|ext| if ext.is_empty() { "none".to_string() } else { format!(".{ext}") })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Exact book name.
    #[arg(long)]
    pub name: String,
    /// Author as "FIRST LAST"; everything after the first space is the last name.
    #[arg(long, value_name = "FIRST LAST")]
    pub author: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    /// Print book ids only.
    #[arg(long)]
    pub ids: bool,
}

/// Split a full name at its first run of whitespace.
pub fn parse_author(raw: &str) -> Option<AuthorName> {
    let (first, last) = raw.trim().split_once(char::is_whitespace)?;
    let last = last.trim_start();
    if first.is_empty() || last.is_empty() {
        return None;
    }
    Some(AuthorName::new(first, last))
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "all"])))]
pub struct DeleteArgs {
    /// Id of the book to delete.
    #[arg(long)]
    pub id: Option<i64>,
    /// Delete every book and author.
    #[arg(long)]
    pub all: bool,
}
impl DeleteArgs {
    pub fn deletion(&self) -> Result<Deletion> {
        match (self.id, self.all) {
            (Some(id), false) => Ok(Deletion::Book(id)),
            (None, true) => Ok(Deletion::All),
            _ => exn::bail!(ErrorKind::InvalidArgument("exactly one of --id and --all is required".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind as ClapErrorKind;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("librarian").chain(args.iter().copied())).unwrap()
    }

    fn parse_err(args: &[&str]) -> ClapErrorKind {
        Cli::try_parse_from(std::iter::once("librarian").chain(args.iter().copied())).unwrap_err().kind()
    }

    #[test]
    fn test_ingest_args() {
        let cli = parse(&["ingest", "--dir", "/books", "--update"]);
        let Command::Ingest(args) = cli.command else { panic!("expected ingest") };
        assert_eq!(args.dir, Some(PathBuf::from("/books")));
        assert!(args.update);
    }

    #[rstest]
    #[case::neither(&["ingest"], ClapErrorKind::MissingRequiredArgument)]
    #[case::both(&["ingest", "--dir", "a", "--file", "b"], ClapErrorKind::ArgumentConflict)]
    #[case::delete_neither(&["delete"], ClapErrorKind::MissingRequiredArgument)]
    #[case::delete_both(&["delete", "--id", "1", "--all"], ClapErrorKind::ArgumentConflict)]
    #[case::search_without_name(&["search", "--year", "1"], ClapErrorKind::MissingRequiredArgument)]
    #[case::bad_year(&["search", "--name", "x", "--year", "soon"], ClapErrorKind::ValueValidation)]
    #[case::loud_and_quiet(&["-v", "-q", "delete", "--all"], ClapErrorKind::ArgumentConflict)]
    fn test_invalid_arguments(#[case] args: &[&str], #[case] expected: ClapErrorKind) {
        assert_eq!(parse_err(args), expected);
    }

    #[test]
    fn test_search_args() {
        let cli = parse(&["search", "--name", "Test", "--author", "John Doe", "--year", "1", "--ids"]);
        let Command::Search(args) = cli.command else { panic!("expected search") };
        assert_eq!(args.name, "Test");
        assert_eq!(args.author.as_deref(), Some("John Doe"));
        assert_eq!(args.year, Some(1));
        assert!(args.ids);
    }

    #[test]
    fn test_delete_args() {
        let Command::Delete(args) = parse(&["delete", "--id", "42"]).command else { panic!("expected delete") };
        assert_eq!(args.deletion().unwrap(), Deletion::Book(42));
        let Command::Delete(args) = parse(&["delete", "--all"]).command else { panic!("expected delete") };
        assert_eq!(args.deletion().unwrap(), Deletion::All);
    }

    #[rstest]
    #[case("John Doe", Some(("John", "Doe")))]
    #[case("  John   Doe ", Some(("John", "Doe")))]
    #[case("John Ronald Reuel Tolkien", Some(("John", "Ronald Reuel Tolkien")))]
    #[case("John\tDoe", Some(("John", "Doe")))]
    #[case("Homer", None)]
    #[case("", None)]
    #[case("   ", None)]
    fn test_parse_author(#[case] raw: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(parse_author(raw), expected.map(AuthorName::from));
    }

    #[rstest]
    #[case(&["delete", "--all"], None)]
    #[case(&["-v", "delete", "--all"], Some("info"))]
    #[case(&["-vv", "delete", "--all"], Some("debug"))]
    #[case(&["delete", "--all", "-vvv"], Some("trace"))]
    #[case(&["-q", "delete", "--all"], Some("error"))]
    #[case(&["-qq", "delete", "--all"], Some("off"))]
    fn test_verbosity(#[case] args: &[&str], #[case] expected: Option<&str>) {
        assert_eq!(parse(args).verbosity(), expected);
    }

    #[test]
    fn test_ingest_source_validation() {
        let dir = tempfile::tempdir().unwrap();
        let book = dir.path().join("book.fb2");
        let cover = dir.path().join("cover.jpg");
        std::fs::write(&book, "").unwrap();
        std::fs::write(&cover, "").unwrap();

        let args = |dir: Option<&PathBuf>, file: Option<&PathBuf>| IngestArgs {
            dir: dir.cloned(),
            file: file.cloned(),
            update: false,
        };
        let root = dir.path().to_path_buf();
        assert_eq!(args(Some(&root), None).source().unwrap(), Source::Directory(root.clone()));
        assert_eq!(args(None, Some(&book)).source().unwrap(), Source::File(book.clone()));
        for invalid in [args(Some(&book), None), args(None, Some(&root)), args(None, Some(&cover))] {
            let err = invalid.source().unwrap_err();
            assert!(matches!(*err, ErrorKind::InvalidArgument(_)), "{err:?}");
        }
    }

    #[test]
    fn test_expected_extensions() {
        assert_eq!(expected_extensions(), "none, .fb2, .gz, .zip");
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
