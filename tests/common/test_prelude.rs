// common/test_prelude.rs

// Re-export commonly used items for integration tests.
pub use assert_cmd::Command;
pub use predicates::prelude::*;
pub use predicates::str::contains;

/// The binary under test, pointed at `root` with logging left off.
pub fn ant_e(root: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("ant-e").unwrap();
    cmd.env_remove("RUST_LOG").arg("-C").arg(root);
    cmd
}
