//! Command-line arguments.

use std::io::Write;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, IntoDiagnostic, WrapErr};
use thiserror::Error;

use crate::core::logging;
use crate::core::quest::QuestStore;
use crate::core::viewer::{html, Viewport};

pub const USAGE: &str = "\
Usage:
  quest-viewer                                  Browse quests in the terminal
  quest-viewer list                             Print the quest list
  quest-viewer html <quest-id> [--narrow] [-o FILE]
                                                Render one quest as an HTML page
  quest-viewer help                             Show this message";

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    List,
    Html {
        quest_id: u32,
        narrow: bool,
        /// Write to this file instead of stdout.
        output: Option<PathBuf>,
    },
    Help,
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code("QUEST::USAGE"), help("Run `quest-viewer help` for usage"))]
pub struct UsageError {
    message: String,
}

impl UsageError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Command {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let Some(command) = args.next() else {
            return Ok(Command::Tui);
        };

        match command.as_str() {
            "tui" => Ok(Command::Tui),
            "list" => Ok(Command::List),
            "help" | "-h" | "--help" => Ok(Command::Help),
            "html" => Self::parse_html(args),
            other => Err(UsageError::new(format!("Unknown command: {other}"))),
        }
    }

    fn parse_html(mut args: impl Iterator<Item = String>) -> Result<Self, UsageError> {
        let mut quest_id = None;
        let mut narrow = false;
        let mut output = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--narrow" => narrow = true,
                "-o" | "--output" => {
                    let path = args
                        .next()
                        .ok_or_else(|| UsageError::new(format!("{arg} needs a file path")))?;
                    output = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => {
                    return Err(UsageError::new(format!("Unknown option: {flag}")));
                }
                id if quest_id.is_none() => {
                    let parsed = id
                        .parse::<u32>()
                        .map_err(|_| UsageError::new(format!("Invalid quest id: {id}")))?;
                    quest_id = Some(parsed);
                }
                extra => {
                    return Err(UsageError::new(format!("Unexpected argument: {extra}")));
                }
            }
        }

        let quest_id = quest_id.ok_or_else(|| UsageError::new("html needs a quest id"))?;
        Ok(Command::Html {
            quest_id,
            narrow,
            output,
        })
    }
}

/// Run the `html` command. The page goes to `output` when given, otherwise to
/// `stdout`; status lines go to stderr so piped output stays a valid document.
pub fn export_html(
    store: &QuestStore,
    quest_id: u32,
    narrow: bool,
    output: Option<&Path>,
    stdout: &mut impl Write,
) -> miette::Result<()> {
    let viewport = if narrow { Viewport::Narrow } else { Viewport::Wide };
    let page = html::render_page(
        quest_id,
        &store.title(quest_id),
        |id| store.quest_data(id),
        viewport,
    );

    if store.quest_data(quest_id).is_none() {
        log::info!("Quest {quest_id} has no table data");
        logging::print_info(&format!("Quest {quest_id} has no table data"));
    }

    match output {
        Some(path) => {
            std::fs::write(path, page)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            logging::print_success(&format!("Wrote {}", path.display()));
        }
        None => stdout
            .write_all(page.as_bytes())
            .and_then(|()| stdout.flush())
            .into_diagnostic()
            .wrap_err("Failed to write page to stdout")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_no_args_opens_tui() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap(), Command::Tui);
    }

    #[rstest]
    #[case(&["list"], Command::List)]
    #[case(&["--help"], Command::Help)]
    #[case(&["html", "1000001"], Command::Html { quest_id: 1000001, narrow: false, output: None })]
    #[case(
        &["html", "--narrow", "42", "-o", "out.html"],
        Command::Html { quest_id: 42, narrow: true, output: Some(PathBuf::from("out.html")) }
    )]
    fn test_parse(#[case] args: &[&str], #[case] expected: Command) {
        assert_eq!(Command::parse(args.iter().copied()).unwrap(), expected);
    }

    #[rstest]
    #[case(&["frobnicate"], "Unknown command")]
    #[case(&["html"], "needs a quest id")]
    #[case(&["html", "abc"], "Invalid quest id")]
    #[case(&["html", "1", "2"], "Unexpected argument")]
    #[case(&["html", "1", "-o"], "needs a file path")]
    #[case(&["html", "1", "--wide"], "Unknown option")]
    fn test_parse_errors(#[case] args: &[&str], #[case] message: &str) {
        let err = Command::parse(args.iter().copied()).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    #[rstest]
    #[case(1000001, true)]
    #[case(2000102, false)]
    #[case(999, false)]
    fn test_export_html_to_stdout_is_a_document(#[case] quest_id: u32, #[case] has_data: bool) {
        let store = QuestStore::bundled().unwrap();
        let mut stdout = Vec::new();

        export_html(&store, quest_id, false, None, &mut stdout).unwrap();

        let page = String::from_utf8(stdout).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"), "{page}");
        assert!(page.trim_end().ends_with("</html>"));
        assert_eq!(page.contains("wave-title\">w1<"), has_data);
    }

    #[test]
    fn test_export_html_to_file_leaves_stdout_empty() {
        let store = QuestStore::bundled().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quest.html");
        let mut stdout = Vec::new();

        export_html(&store, 1000001, true, Some(&path), &mut stdout).unwrap();

        assert!(stdout.is_empty());
        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("colspan=\"3\""));
    }
}
