//! Project and credential resolution for assetgen.
//!
//! Every path the pipeline reads or writes is resolved here against a single
//! project root, so commands behave the same whatever directory they are
//! launched from, as long as `--root` points at the project.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{AssetgenError, Result};
use crate::scan::Scanner;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolved project root plus its configuration.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path to the project root.
    pub root: PathBuf,

    /// Configuration loaded from `assetgen.yaml` (or defaults).
    pub config: Config,
}

impl ProjectContext {
    /// Resolve the project from an optional root and config path.
    ///
    /// The root defaults to the current directory. The config defaults to
    /// `<root>/assetgen.yaml` and may be absent; an explicit `config_path`
    /// must exist.
    pub fn resolve(root: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => env::current_dir().map_err(|e| {
                AssetgenError::UserError(format!(
                    "failed to get current working directory: {}",
                    e
                ))
            })?,
        };

        if !root.is_dir() {
            return Err(AssetgenError::UserError(format!(
                "project root '{}' is not a directory",
                root.display()
            )));
        }

        let config = match config_path {
            Some(path) => Config::load(root.join(path))?,
            None => Config::load_or_default(root.join(CONFIG_FILE_NAME))?,
        };

        Ok(Self::from_parts(root, config))
    }

    /// Build a context from an already-loaded config.
    pub fn from_parts(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// Resolve a project-relative path.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    /// Path of the diagram job's system-prompt template.
    pub fn system_prompt_path(&self) -> PathBuf {
        self.path(&self.config.system_prompt_path)
    }

    /// Output path for a draft: `<mermaid_output_dir>/<base>.mmd`.
    pub fn mermaid_output_path(&self, draft_base: &str) -> PathBuf {
        self.path(&self.config.mermaid_output_dir)
            .join(format!("{}.mmd", draft_base))
    }

    /// Directory for images whose spec names no `output_image`.
    pub fn image_output_dir(&self) -> PathBuf {
        self.path(&self.config.image_output_dir)
    }

    /// Scanner over the configured draft globs.
    pub fn drafts_scanner(&self) -> Result<Scanner> {
        self.scanner("drafts_globs", &self.config.drafts_globs)
    }

    /// Scanner over the configured spec globs.
    pub fn specs_scanner(&self) -> Result<Scanner> {
        self.scanner("spec_globs", &self.config.spec_globs)
    }

    fn scanner(&self, key: &str, globs: &[String]) -> Result<Scanner> {
        Scanner::new(&self.root, globs)
            .map_err(|e| AssetgenError::ConfigError(format!("{}: {}", key, e)))
    }

    /// Render `path` relative to the project root for status lines.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }
}

/// The service credential. `Debug` never prints the secret.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Look up `var` through `lookup`; unset or blank means no credential.
    pub fn from_lookup<F>(var: &str, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(var)
            .filter(|value| !value.trim().is_empty())
            .map(Self)
    }

    /// The raw secret, for the authorization header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_resolve_defaults_to_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("assetgen.yaml"), "text_model: gpt-4.1\n").unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        let ctx = ProjectContext::resolve(None, None).unwrap();
        assert_eq!(ctx.config.text_model, "gpt-4.1");
        assert_eq!(
            ctx.root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_resolve_without_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::resolve(Some(temp_dir.path()), None).unwrap();

        assert_eq!(ctx.root, temp_dir.path());
        assert_eq!(ctx.config.credential_env, "AI_API_KEY");
    }

    #[test]
    fn test_resolve_reads_project_config() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("assetgen.yaml"),
            "mermaid_output_dir: out/mmd\n",
        )
        .unwrap();

        let ctx = ProjectContext::resolve(Some(temp_dir.path()), None).unwrap();
        assert_eq!(
            ctx.mermaid_output_path("intro"),
            temp_dir.path().join("out/mmd/intro.mmd")
        );
    }

    #[test]
    fn test_resolve_explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let err =
            ProjectContext::resolve(Some(temp_dir.path()), Some(Path::new("other.yaml")))
                .unwrap_err();
        assert!(matches!(err, AssetgenError::ConfigError(_)));
    }

    #[test]
    fn test_resolve_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err =
            ProjectContext::resolve(Some(&temp_dir.path().join("nope")), None).unwrap_err();
        assert!(matches!(err, AssetgenError::UserError(_)));
    }

    #[test]
    fn test_default_paths() {
        let ctx = ProjectContext::from_parts(PathBuf::from("/p"), Config::default());

        assert_eq!(
            ctx.system_prompt_path(),
            PathBuf::from("/p/prompts/mermaid-generator.md")
        );
        assert_eq!(
            ctx.mermaid_output_path("intro"),
            PathBuf::from("/p/source/mermaid/intro.mmd")
        );
        assert_eq!(
            ctx.image_output_dir(),
            PathBuf::from("/p/assets/diagrams-generated")
        );
    }

    #[test]
    fn test_display_path() {
        let ctx = ProjectContext::from_parts(PathBuf::from("/p"), Config::default());
        assert_eq!(
            ctx.display_path(Path::new("/p/source/mermaid/a.mmd")),
            "source/mermaid/a.mmd"
        );
        assert_eq!(ctx.display_path(Path::new("/elsewhere/a.png")), "/elsewhere/a.png");
    }

    #[test]
    fn test_credential_from_lookup() {
        let found = Credential::from_lookup("AI_API_KEY", |_| Some("sk-123".to_string()));
        assert_eq!(found.unwrap().expose(), "sk-123");

        assert!(Credential::from_lookup("AI_API_KEY", |_| None).is_none());
        assert!(Credential::from_lookup("AI_API_KEY", |_| Some("  ".to_string())).is_none());
    }

    #[test]
    fn test_credential_debug_hides_secret() {
        let credential = Credential::new("sk-secret");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
    }
}
