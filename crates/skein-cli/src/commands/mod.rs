pub mod check;
pub mod init;
pub mod list;
pub mod new;
pub mod play;
pub mod show;

use std::path::Path;

use skein_store::{LoadIssue, LoadResult, Severity, StoryletStore};

/// Open a storylet directory and print any load issues to stderr.
///
/// Bad records are skipped, not fatal: the call only fails when the
/// directory itself cannot be read.
fn load_store(dir: &Path) -> Result<LoadResult, String> {
    let result = StoryletStore::open(dir).map_err(|e| e.to_string())?;
    print_issues(&result.issues);
    Ok(result)
}

/// Print load issues to stderr using ariadne, with a count summary.
fn print_issues(issues: &[LoadIssue]) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        if issue.source.is_empty() {
            eprintln!("{issue}");
        } else {
            eprint!("{}", issue.render());
        }
    }

    let errors = issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count();
    let warnings = issues.len() - errors;

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
