//! Recorded Google Books responses under `test_fixtures/responses`

use std::path::{Path, PathBuf};

fn responses_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join("responses")
}

/// Raw body of a recorded catalog response
pub fn load_response_fixture(name: &str) -> String {
    let path = responses_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", path.display(), e))
}
