use crate::config::Config;
use crate::context::ProjectContext;
use crate::generation::{GenerationError, GenerationService};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) const TEST_SYSTEM_PROMPT: &str = "Convert the draft into a mermaid flowchart.";

/// A project tree with the default layout and the system prompt in place.
pub(crate) fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for dir in [
        "prompts",
        "source/drafts",
        "source/mermaid",
        "source/generative",
        "source/polished",
        "assets/diagrams-generated",
    ] {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }
    write_file(root, "prompts/mermaid-generator.md", TEST_SYSTEM_PROMPT);

    temp_dir
}

pub(crate) fn test_context(root: &Path) -> ProjectContext {
    ProjectContext::from_parts(root.to_path_buf(), Config::default())
}

pub(crate) fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// In-memory [`GenerationService`] that records every call.
pub(crate) struct FakeService {
    text_reply: Option<String>,
    image_reply: Option<Vec<u8>>,
    pub(crate) text_calls: RefCell<Vec<(String, String)>>,
    pub(crate) image_calls: RefCell<Vec<String>>,
}

impl FakeService {
    /// Replies to text requests with `reply` and to image requests with fixed bytes.
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            text_reply: Some(reply.to_string()),
            image_reply: Some(b"\x89PNG fake".to_vec()),
            text_calls: RefCell::new(Vec::new()),
            image_calls: RefCell::new(Vec::new()),
        }
    }

    /// Fails every request with an API error.
    pub(crate) fn failing() -> Self {
        Self {
            text_reply: None,
            image_reply: None,
            text_calls: RefCell::new(Vec::new()),
            image_calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.text_calls.borrow().len() + self.image_calls.borrow().len()
    }
}

impl GenerationService for FakeService {
    fn generate_text(
        &self,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<String, GenerationError> {
        self.text_calls
            .borrow_mut()
            .push((system_prompt.to_string(), user_content.to_string()));
        self.text_reply.clone().ok_or_else(|| GenerationError::Api {
            status: 500,
            message: "fake failure".into(),
        })
    }

    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        self.image_calls.borrow_mut().push(prompt.to_string());
        self.image_reply.clone().ok_or_else(|| GenerationError::Api {
            status: 500,
            message: "fake failure".into(),
        })
    }
}
