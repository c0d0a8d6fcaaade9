#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn test_root_help_lists_commands() {
        let mut cmd = Command::cargo_bin("glcli").unwrap();
        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("target"))
            .stdout(predicate::str::contains("config"))
            .stdout(predicate::str::contains("completions"));
    }

    #[test]
    fn test_root_help_lists_global_target_flags() {
        let mut cmd = Command::cargo_bin("glcli").unwrap();
        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("--garden"))
            .stdout(predicate::str::contains("--project"))
            .stdout(predicate::str::contains("--seed"))
            .stdout(predicate::str::contains("--shoot"));
    }

    #[test]
    fn test_target_help_lists_levels() {
        let mut cmd = Command::cargo_bin("glcli").unwrap();
        cmd.arg("target").arg("--help");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("garden"))
            .stdout(predicate::str::contains("project"))
            .stdout(predicate::str::contains("seed"))
            .stdout(predicate::str::contains("shoot"))
            .stdout(predicate::str::contains("unset"))
            .stdout(predicate::str::contains("view"));
    }

    #[test]
    fn test_hidden_complete_command_is_not_advertised() {
        let mut cmd = Command::cargo_bin("glcli").unwrap();
        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("complete ").not());
    }

    #[test]
    fn test_version_flag() {
        let mut cmd = Command::cargo_bin("glcli").unwrap();
        cmd.arg("--version");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("glcli"));
    }
}
