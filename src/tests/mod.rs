// Test modules
#[cfg(test)]
mod test_driver;

#[cfg(test)]
pub mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    use crate::config::Config;

    /// Test context holding a temporary app tree
    pub struct TestContext {
        temp_dir: TempDir,
    }

    impl TestContext {
        pub fn new() -> Self {
            TestContext {
                temp_dir: TempDir::new().expect("Failed to create temp dir"),
            }
        }

        /// Write `content` to `relative` inside the app tree, creating parent directories
        pub fn write(&self, relative: &str, content: &str) -> PathBuf {
            let path = self.temp_dir.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(&path, content).expect("Failed to write test file");
            path
        }

        pub fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.temp_dir.path().join(relative))
                .expect("Failed to read test file")
        }

        pub fn root(&self) -> &Path {
            self.temp_dir.path()
        }

        /// The built-in target lists, rooted at the temporary tree
        pub fn config(&self) -> Config {
            Config::with_root(self.root())
        }
    }
}
