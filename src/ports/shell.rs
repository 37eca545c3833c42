//! Shell executor port for running external commands.

/// The output of a command execution.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external programs.
///
/// Arguments are passed as a vector, never through a shell, so issue titles
/// and bodies need no quoting.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` and returns its captured output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned. A spawn failure
    /// caused by a missing binary surfaces as an `std::io::Error` with kind
    /// `NotFound`.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}
