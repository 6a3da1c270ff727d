//! Usage-example descriptor.

use serde::Deserialize;
use std::path::Path;

/// Placeholder in example commands substituted with the program name.
pub const PROG_PLACEHOLDER: &str = "%prog";

/// A single self-described example invocation of the project's entry point.
///
/// The output directory is an explicit field rather than being re-parsed out
/// of the command's `-o` flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UsageExample {
    /// Short title of the example.
    pub description: String,

    /// What the rendered output is expected to show.
    #[serde(default)]
    pub expected: String,

    /// Command template; `%prog` is replaced with the program name.
    pub command: String,

    /// Directory (relative to the example working directory) the command
    /// writes its output into.
    pub output_dir: String,
}

impl UsageExample {
    /// Substitutes the program-name placeholder into the command template.
    #[must_use]
    pub fn resolved_command(&self, program: &str) -> String {
        self.command.replace(PROG_PLACEHOLDER, program)
    }

    /// Validates the entry, returning a message describing the first problem.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err(format!("example '{}' has an empty command", self.description));
        }
        let output = Path::new(&self.output_dir);
        if self.output_dir.is_empty() || output.is_absolute() {
            return Err(format!(
                "example '{}' must name a relative output directory",
                self.description
            ));
        }
        if self
            .output_dir
            .split('/')
            .any(|part| part == ".." || part.is_empty())
        {
            return Err(format!(
                "example '{}' output directory escapes the build directory",
                self.description
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(output_dir: &str, command: &str) -> UsageExample {
        UsageExample {
            description: "PCoA plot".to_string(),
            expected: "an interactive ordination".to_string(),
            command: command.to_string(),
            output_dir: output_dir.to_string(),
        }
    }

    #[test]
    fn substitutes_program_name() {
        let example = sample("out1", "%prog -i table.txt -o out1");
        assert_eq!(
            example.resolved_command("make_emperor.py"),
            "make_emperor.py -i table.txt -o out1"
        );
    }

    #[test]
    fn rejects_empty_command() {
        assert!(sample("out1", "  ").validate().is_err());
    }

    #[test]
    fn rejects_absolute_output_dir() {
        assert!(sample("/tmp/out", "%prog").validate().is_err());
    }

    #[test]
    fn rejects_parent_escape() {
        assert!(sample("../out", "%prog").validate().is_err());
    }

    #[test]
    fn accepts_nested_relative_output_dir() {
        assert!(sample("plots/out1", "%prog -o plots/out1").validate().is_ok());
    }
}
