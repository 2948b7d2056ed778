//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::SleepError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `SleepError::Parse` if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, SleepError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "sleeptrack", &mut buf);
    String::from_utf8(buf).map_err(|e| SleepError::Parse(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_commands() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("sleeptrack"));
        assert!(script.contains("start"));
        assert!(script.contains("rate"));
    }
}
