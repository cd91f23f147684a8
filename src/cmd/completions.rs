//! Completions command implementation
//!
//! Handles the `native-image-report completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

const BIN_NAME: &str = "native-image-report";

/// Generate shell completion scripts for `cmd`
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// native-image-report completions bash > /etc/bash_completion.d/native-image-report
///
/// # Zsh
/// native-image-report completions zsh > ~/.zfunc/_native-image-report
///
/// # Fish
/// native-image-report completions fish > ~/.config/fish/completions/native-image-report.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write the completion script to `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut impl Write) {
    generate(shell, cmd, BIN_NAME, out);
}
