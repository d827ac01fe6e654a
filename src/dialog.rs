use anyhow::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

use crate::archiver::DirectoryArchiver;

/// Interaction surface for the snapshot flow. The archiver itself never
/// talks to the user; everything goes through this trait so the flow can
/// run headless in tests.
pub trait Dialog {
    fn confirm(&self, title: &str, message: &str) -> Result<bool>;
    fn notify(&self, title: &str, message: &str, is_error: bool);
}

/// Terminal implementation on dialoguer/colored.
pub struct ConsoleDialog;

impl Dialog for ConsoleDialog {
    fn confirm(&self, title: &str, message: &str) -> Result<bool> {
        println!("{}", title.bold().color(crate::colors::HEADER));
        println!("{}", message);

        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Proceed?")
            .default(false)
            .interact()?;
        Ok(answer)
    }

    fn notify(&self, title: &str, message: &str, is_error: bool) {
        if is_error {
            eprintln!("{} {}", "✗".red(), title.bold().color(crate::colors::WARNING));
            eprintln!("   {}", message);
        } else {
            println!("{} {}", "✓".green(), title.bold().color(crate::colors::SUCCESS));
            println!("   {}", message);
        }
    }
}

/// Ask for confirmation with the effective exclusion list, then run one
/// snapshot. Returns the created folder, or `None` if the user declined.
///
/// Archive failures are reported through `dialog` and also returned, so a
/// non-interactive caller can still see what went wrong.
pub fn confirm_and_archive(
    archiver: &DirectoryArchiver,
    dialog: &dyn Dialog,
    skip_confirmation: bool,
) -> Result<Option<PathBuf>> {
    if !skip_confirmation {
        let excluded = archiver.exclusions().join("\n- ");
        let message = format!(
            "Create a snapshot of {} in {}, skipping entries named:\n- {}",
            archiver.source().display(),
            archiver.archive_dir().display(),
            excluded,
        );
        if !dialog.confirm("Confirm snapshot", &message)? {
            return Ok(None);
        }
    }

    match archiver.archive() {
        Ok(destination) => {
            dialog.notify(
                "Snapshot complete",
                &format!("Contents archived to {}", destination.display()),
                false,
            );
            Ok(Some(destination))
        }
        Err(e) => {
            dialog.notify("Snapshot failed", &e.to_string(), true);
            Err(e.into())
        }
    }
}
