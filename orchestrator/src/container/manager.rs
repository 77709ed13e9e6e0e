//! Container lifecycle management

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{ExecutionConfig, RuntimeConfig};
use crate::models::{ContainerInfo, CreatedContainer, ExecutionOutput, FileContent};

use super::error::{ContainerError, ExecutionError, Result};
use super::executor::{CommandSpec, ProcessExecutor};
use super::lock::ContainerLocks;
use super::naming::{ContainerId, FileName};

/// Manages containers: one directory per container under `data_dir`
pub struct ContainerManager {
    /// Base directory holding every container
    data_dir: PathBuf,

    /// Interpreter and seed program
    runtime: RuntimeConfig,

    /// Execution limits
    execution: ExecutionConfig,

    /// Runs container files
    executor: Arc<dyn ProcessExecutor>,

    /// Serializes file access within a container
    locks: ContainerLocks,
}

impl ContainerManager {
    /// Create a new container manager, creating `data_dir` if needed
    pub async fn new(
        data_dir: impl Into<PathBuf>,
        runtime: RuntimeConfig,
        execution: ExecutionConfig,
        executor: Arc<dyn ProcessExecutor>,
    ) -> Result<Self> {
        let data_dir = data_dir.into();

        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| ContainerError::storage("create data directory", &data_dir, e))?;

        // Executed files get absolute paths; the child runs inside the container
        let data_dir = tokio::fs::canonicalize(&data_dir)
            .await
            .map_err(|e| ContainerError::storage("resolve data directory", &data_dir, e))?;

        info!(
            data_dir = %data_dir.display(),
            runtime = %runtime.program,
            entry_file = %runtime.entry_file,
            "Container manager initialized"
        );

        Ok(Self {
            data_dir,
            runtime,
            execution,
            executor,
            locks: ContainerLocks::new(),
        })
    }

    /// Base directory of all containers
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create a new container seeded with the runtime's entry program
    pub async fn create_container(&self) -> Result<CreatedContainer> {
        let id = ContainerId::generate();
        let root = self.container_root(&id);
        let entry = FileName::parse(&self.runtime.entry_file)?;

        // create_dir, not create_dir_all: an existing directory is a collision
        tokio::fs::create_dir(&root)
            .await
            .map_err(|e| ContainerError::storage("create container directory", &root, e))?;

        let entry_path = root.join(entry.as_str());
        if let Err(e) = tokio::fs::write(&entry_path, &self.runtime.entry_content).await {
            // A container without its seed program must not be left behind
            if let Err(cleanup) = tokio::fs::remove_dir_all(&root).await {
                warn!(
                    container_id = %id,
                    error = %cleanup,
                    "Failed to remove partially created container"
                );
            }
            return Err(ContainerError::storage("write entry file", &entry_path, e));
        }

        info!(container_id = %id, "Container created");

        Ok(CreatedContainer {
            container_id: id.to_string(),
            folder_path: root,
        })
    }

    /// Create an empty file, truncating it if it already exists
    pub async fn create_file(&self, container_id: &str, file_name: &str) -> Result<()> {
        let (id, root, name) = self.resolve(container_id, file_name).await?;
        let _guard = self.locks.acquire(id).await;

        let path = contained_path(&root, &name).await?;
        tokio::fs::write(&path, b"")
            .await
            .map_err(|e| ContainerError::storage("create file", &path, e))?;

        debug!(container_id = %id, file_name = %name, "File created");
        Ok(())
    }

    /// List the files of a container
    pub async fn get_container_info(&self, container_id: &str) -> Result<ContainerInfo> {
        let id = self.existing_container(container_id).await?;
        let root = self.container_root(&id);

        let missing = || ContainerError::ContainerNotFound(container_id.to_string());
        let mut entries = tokio::fs::read_dir(&root)
            .await
            .map_err(|e| or_missing(e, missing(), "list container", &root))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ContainerError::storage("list container", &root, e))?
        {
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                // Not addressable through the API, so not listed
                Err(raw) => warn!(container_id = %id, name = ?raw, "Skipping non-UTF-8 file name"),
            }
        }

        Ok(ContainerInfo {
            container_id: id.to_string(),
            folder_path: root,
            files,
        })
    }

    /// Read a file as UTF-8 text
    pub async fn get_file(&self, container_id: &str, file_name: &str) -> Result<FileContent> {
        let (id, root, name) = self.resolve(container_id, file_name).await?;
        let _guard = self.locks.acquire(id).await;

        let path = contained_path(&root, &name).await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| or_missing(e, file_missing(&name), "read file", &path))?;

        let content = String::from_utf8(bytes).map_err(|source| ContainerError::Decode {
            file_name: name.to_string(),
            source,
        })?;

        Ok(FileContent {
            folder_path: root,
            file_name: name.to_string(),
            content,
        })
    }

    /// Replace the full content of a file
    pub async fn write_file(
        &self,
        container_id: &str,
        file_name: &str,
        content: &str,
    ) -> Result<()> {
        let (id, root, name) = self.resolve(container_id, file_name).await?;
        let _guard = self.locks.acquire(id).await;

        let path = contained_path(&root, &name).await?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ContainerError::storage("write file", &path, e))?;

        debug!(
            container_id = %id,
            file_name = %name,
            bytes = content.len(),
            "File saved"
        );
        Ok(())
    }

    /// Run a file with the configured runtime
    pub async fn execute_file(
        &self,
        container_id: &str,
        file_name: &str,
    ) -> Result<ExecutionOutput> {
        let (id, root, name) = self.resolve(container_id, file_name).await?;

        let path = contained_path(&root, &name).await?;
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .map_err(|e| or_missing(e, file_missing(&name), "inspect file", &path))?;
        if !is_file {
            return Err(file_missing(&name));
        }

        let command = self.build_command(&root, &path);
        info!(
            container_id = %id,
            file_name = %name,
            command = %command,
            "Executing file"
        );

        let output = self.executor.run(&command).await?;

        if !output.success() {
            warn!(
                container_id = %id,
                file_name = %name,
                exit_code = ?output.exit_code,
                duration_ms = output.duration_ms,
                "Execution failed"
            );
            return Err(ExecutionError::NonZeroExit { output }.into());
        }

        info!(
            container_id = %id,
            file_name = %name,
            duration_ms = output.duration_ms,
            "Execution completed"
        );
        Ok(output)
    }

    /// Number of containers on disk
    pub async fn container_count(&self) -> Result<u64> {
        let mut entries = tokio::fs::read_dir(&self.data_dir)
            .await
            .map_err(|e| ContainerError::storage("list data directory", &self.data_dir, e))?;

        let mut count = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ContainerError::storage("list data directory", &self.data_dir, e))?
        {
            let is_container = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.parse::<ContainerId>().is_ok());
            if is_container {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Version reported by the runtime program, if it runs at all
    pub async fn runtime_version(&self) -> Option<String> {
        let command = CommandSpec {
            program: self.runtime.program.clone(),
            args: vec!["--version".to_string()],
            working_dir: self.data_dir.clone(),
            timeout: Some(Duration::from_secs(5)),
        };

        match self.executor.run(&command).await {
            Ok(output) if output.success() => Some(output.stdout.trim().to_string()),
            _ => None,
        }
    }

    /// Directory of a container. The only place ids become paths.
    fn container_root(&self, id: &ContainerId) -> PathBuf {
        self.data_dir.join(id.dir_name())
    }

    fn build_command(&self, root: &Path, file: &Path) -> CommandSpec {
        let mut args = self.runtime.args.clone();
        args.push(file.to_string_lossy().into_owned());

        CommandSpec {
            program: self.runtime.program.clone(),
            args,
            working_dir: root.to_path_buf(),
            timeout: self.execution.timeout(),
        }
    }

    async fn existing_container(&self, container_id: &str) -> Result<ContainerId> {
        let id: ContainerId = container_id.parse()?;
        let root = self.container_root(&id);

        match tokio::fs::metadata(&root).await {
            Ok(meta) if meta.is_dir() => Ok(id),
            Ok(_) => Err(ContainerError::ContainerNotFound(container_id.to_string())),
            Err(e) => Err(or_missing(
                e,
                ContainerError::ContainerNotFound(container_id.to_string()),
                "inspect container",
                &root,
            )),
        }
    }

    /// Validate the file name first, then check that the container exists
    async fn resolve(
        &self,
        container_id: &str,
        file_name: &str,
    ) -> Result<(ContainerId, PathBuf, FileName)> {
        let name = FileName::parse(file_name)?;
        let id = self.existing_container(container_id).await?;
        let root = self.container_root(&id);
        Ok((id, root, name))
    }
}

/// Join a validated name to the root and make sure an existing target does
/// not resolve outside the root (e.g. through a symlink).
async fn contained_path(root: &Path, name: &FileName) -> Result<PathBuf> {
    let path = root.join(name.as_str());

    match tokio::fs::symlink_metadata(&path).await {
        Ok(_) => {}
        Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(path),
        Err(e) => return Err(ContainerError::storage("inspect file", &path, e)),
    }

    let escaped =
        || ContainerError::invalid_name(name.as_str(), "name resolves outside the container");

    let resolved = tokio::fs::canonicalize(&path).await.map_err(|e| {
        if e.kind() == IoErrorKind::NotFound {
            // dangling symlink
            escaped()
        } else {
            ContainerError::storage("resolve file", &path, e)
        }
    })?;
    let canonical_root = tokio::fs::canonicalize(root)
        .await
        .map_err(|e| ContainerError::storage("resolve container", root, e))?;

    if resolved.parent() != Some(canonical_root.as_path()) {
        return Err(escaped());
    }
    Ok(path)
}

fn file_missing(name: &FileName) -> ContainerError {
    ContainerError::FileNotFound(name.to_string())
}

/// Map a NotFound I/O error to `missing`, anything else to a storage error
fn or_missing(
    err: std::io::Error,
    missing: ContainerError,
    action: &'static str,
    path: &Path,
) -> ContainerError {
    if err.kind() == IoErrorKind::NotFound {
        missing
    } else {
        ContainerError::storage(action, path, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::executor::{MockProcessExecutor, SystemExecutor};
    use crate::container::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn shell_runtime() -> RuntimeConfig {
        RuntimeConfig {
            program: "sh".to_string(),
            args: vec![],
            entry_file: "main.sh".to_string(),
            entry_content: "echo \"Hello, world!\"\n".to_string(),
        }
    }

    async fn manager_with(executor: Arc<dyn ProcessExecutor>) -> (TempDir, ContainerManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = ContainerManager::new(
            dir.path().join("containers"),
            shell_runtime(),
            ExecutionConfig { timeout_seconds: 5 },
            executor,
        )
        .await
        .unwrap();
        (dir, manager)
    }

    async fn manager() -> (TempDir, ContainerManager) {
        manager_with(Arc::new(SystemExecutor::new())).await
    }

    /// Executor that fails the test if anything is spawned
    fn forbidden_executor() -> Arc<dyn ProcessExecutor> {
        let mut executor = MockProcessExecutor::new();
        executor.expect_run().never();
        Arc::new(executor)
    }

    #[tokio::test]
    async fn test_create_container_seeds_entry_file() {
        let (_dir, manager) = manager().await;

        let created = manager.create_container().await.unwrap();
        assert!(created.folder_path.is_dir());
        assert_eq!(created.folder_path, manager.data_dir().join(&created.container_id));

        let info = manager.get_container_info(&created.container_id).await.unwrap();
        assert_eq!(info.container_id, created.container_id);
        assert_eq!(info.folder_path, created.folder_path);
        assert_eq!(info.files, vec!["main.sh".to_string()]);

        let seeded = manager.get_file(&created.container_id, "main.sh").await.unwrap();
        assert_eq!(seeded.content, "echo \"Hello, world!\"\n");
    }

    #[tokio::test]
    async fn test_create_container_produces_distinct_ids() {
        let (_dir, manager) = manager().await;

        let mut ids = HashSet::new();
        let mut paths = HashSet::new();
        for _ in 0..20 {
            let created = manager.create_container().await.unwrap();
            ids.insert(created.container_id);
            paths.insert(created.folder_path);
        }

        assert_eq!(ids.len(), 20);
        assert_eq!(paths.len(), 20);
        assert_eq!(manager.container_count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn test_create_container_fails_when_data_dir_is_gone() {
        let (dir, manager) = manager().await;
        std::fs::remove_dir_all(dir.path().join("containers")).unwrap();

        let err = manager.create_container().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_create_file_is_empty() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        for name in ["a.txt", "notes", ".hidden", "with space.js"] {
            manager.create_file(&created.container_id, name).await.unwrap();
            let file = manager.get_file(&created.container_id, name).await.unwrap();
            assert_eq!(file.content, "");
            assert_eq!(file.file_name, name);
        }
    }

    #[tokio::test]
    async fn test_create_file_truncates_existing() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        manager.write_file(&created.container_id, "a.txt", "data").await.unwrap();
        manager.create_file(&created.container_id, "a.txt").await.unwrap();

        let file = manager.get_file(&created.container_id, "a.txt").await.unwrap();
        assert_eq!(file.content, "");
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        manager.create_file(&created.container_id, "a.txt").await.unwrap();
        manager.write_file(&created.container_id, "a.txt", "42").await.unwrap();

        let file = manager.get_file(&created.container_id, "a.txt").await.unwrap();
        assert_eq!(file.content, "42");
        assert_eq!(file.folder_path, created.folder_path);
    }

    #[tokio::test]
    async fn test_write_overwrites_instead_of_appending() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        manager
            .write_file(&created.container_id, "a.txt", "a much longer first version")
            .await
            .unwrap();
        manager.write_file(&created.container_id, "a.txt", "short").await.unwrap();

        let file = manager.get_file(&created.container_id, "a.txt").await.unwrap();
        assert_eq!(file.content, "short");
    }

    #[tokio::test]
    async fn test_path_escape_is_rejected_before_mutation() {
        let (dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        for name in ["../escape.txt", "../../escape.txt", "sub/a.txt", "/tmp/escape.txt", ".."] {
            let err = manager.create_file(&created.container_id, name).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "create_file({:?})", name);

            let err = manager.write_file(&created.container_id, name, "x").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "write_file({:?})", name);
        }

        assert!(!dir.path().join("containers").join("escape.txt").exists());
        assert!(!dir.path().join("escape.txt").exists());
        let info = manager.get_container_info(&created.container_id).await.unwrap();
        assert_eq!(info.files, vec!["main.sh".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_container_is_rejected() {
        let (dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        let outside = dir.path().join("secret.txt");
        std::fs::write(&outside, "secret").unwrap();
        std::os::unix::fs::symlink(&outside, created.folder_path.join("link.txt")).unwrap();

        let err = manager.get_file(&created.container_id, "link.txt").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = manager.write_file(&created.container_id, "link.txt", "owned").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(std::fs::read_to_string(&outside).unwrap(), "secret");
    }

    #[tokio::test]
    async fn test_missing_container_is_not_found() {
        let (_dir, manager) = manager_with(forbidden_executor()).await;
        let missing = ContainerId::generate().to_string();

        let err = manager.get_container_info(&missing).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = manager.get_file(&missing, "main.sh").await.unwrap_err();
        assert!(matches!(err, ContainerError::ContainerNotFound(_)));

        let err = manager.create_file(&missing, "a.txt").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = manager.write_file(&missing, "a.txt", "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = manager.execute_file(&missing, "main.sh").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = manager.get_container_info("not-a-container").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_dir, manager) = manager_with(forbidden_executor()).await;
        let created = manager.create_container().await.unwrap();

        let err = manager.get_file(&created.container_id, "nope.txt").await.unwrap_err();
        assert!(matches!(err, ContainerError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_execute_missing_file_spawns_nothing() {
        let (_dir, manager) = manager_with(forbidden_executor()).await;
        let created = manager.create_container().await.unwrap();

        let err = manager.execute_file(&created.container_id, "nope.sh").await.unwrap_err();
        assert!(matches!(err, ContainerError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_read_and_execute_reject_escaping_names() {
        let (_dir, manager) = manager_with(forbidden_executor()).await;
        let created = manager.create_container().await.unwrap();

        for name in ["../x", "../../etc/passwd", "..", "sub/x", "/etc/passwd"] {
            let err = manager.get_file(&created.container_id, name).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "get_file({:?})", name);

            let err = manager.execute_file(&created.container_id, name).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "execute_file({:?})", name);
        }
    }

    #[tokio::test]
    async fn test_container_id_aliases_are_not_found() {
        let (_dir, manager) = manager_with(forbidden_executor()).await;
        let created = manager.create_container().await.unwrap();
        let id = &created.container_id;

        let aliases = [
            id.to_uppercase(),
            format!("{{{}}}", id),
            format!("urn:uuid:{}", id),
            id.replace('-', ""),
        ];
        for alias in aliases {
            let err = manager.get_container_info(&alias).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{:?}", alias);

            let err = manager.get_file(&alias, "main.sh").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{:?}", alias);
        }
        assert!(manager.get_container_info(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_no_container_behind() {
        let dir = tempfile::tempdir().unwrap();
        // Valid name, but longer than any filesystem allows
        let runtime = RuntimeConfig {
            entry_file: "a".repeat(300),
            ..shell_runtime()
        };
        let manager = ContainerManager::new(
            dir.path().join("containers"),
            runtime,
            ExecutionConfig { timeout_seconds: 5 },
            forbidden_executor(),
        )
        .await
        .unwrap();

        let err = manager.create_container().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(manager.container_count().await.unwrap(), 0);
        assert_eq!(std::fs::read_dir(manager.data_dir()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_listing_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();
        let raw = created.folder_path.join(OsStr::from_bytes(b"bad\xffname"));
        std::fs::write(raw, "x").unwrap();

        let info = manager.get_container_info(&created.container_id).await.unwrap();
        assert_eq!(info.files, vec!["main.sh".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();
        std::fs::write(created.folder_path.join("blob.bin"), [0xff, 0xfe, 0x00]).unwrap();

        let err = manager.get_file(&created.container_id, "blob.bin").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_execute_seeded_file_prints_greeting() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();

        let output = manager.execute_file(&created.container_id, "main.sh").await.unwrap();
        assert!(output.stdout.contains("Hello, world!"));
        assert_eq!(output.exit_code, Some(0));
        assert!(output.success());
    }

    #[tokio::test]
    async fn test_execute_non_zero_exit_is_execution_error() {
        let (_dir, manager) = manager().await;
        let created = manager.create_container().await.unwrap();
        manager
            .write_file(&created.container_id, "fail.sh", "echo partial\necho boom >&2\nexit 7\n")
            .await
            .unwrap();

        let err = manager.execute_file(&created.container_id, "fail.sh").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Execution);
        match err {
            ContainerError::Execution(ExecutionError::NonZeroExit { output }) => {
                assert_eq!(output.exit_code, Some(7));
                assert_eq!(output.stdout, "partial\n");
                assert_eq!(output.stderr, "boom\n");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_builds_runtime_command() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_run()
            .times(1)
            .withf(|command: &CommandSpec| {
                command.program == "sh"
                    && command.args.len() == 1
                    && command.args[0].ends_with("main.sh")
                    && command.working_dir.join("main.sh") == PathBuf::from(&command.args[0])
                    && command.timeout == Some(Duration::from_secs(5))
            })
            .returning(|_| {
                Ok(ExecutionOutput {
                    stdout: "Hello, world!\n".to_string(),
                    stderr: String::new(),
                    exit_code: Some(0),
                    duration_ms: 1,
                })
            });

        let (_dir, manager) = manager_with(Arc::new(executor)).await;
        let created = manager.create_container().await.unwrap();

        let output = manager.execute_file(&created.container_id, "main.sh").await.unwrap();
        assert_eq!(output.stdout, "Hello, world!\n");
    }

    #[tokio::test]
    async fn test_execute_is_not_retried() {
        let mut executor = MockProcessExecutor::new();
        executor.expect_run().times(1).returning(|command| {
            Err(ExecutionError::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(IoErrorKind::NotFound, "missing"),
            })
        });

        let (_dir, manager) = manager_with(Arc::new(executor)).await;
        let created = manager.create_container().await.unwrap();

        let err = manager.execute_file(&created.container_id, "main.sh").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Execution);
    }

    #[tokio::test]
    async fn test_runtime_version_uses_executor() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_run()
            .withf(|command: &CommandSpec| command.args == vec!["--version".to_string()])
            .returning(|_| {
                Ok(ExecutionOutput {
                    stdout: "v20.11.0\n".to_string(),
                    stderr: String::new(),
                    exit_code: Some(0),
                    duration_ms: 2,
                })
            });

        let (_dir, manager) = manager_with(Arc::new(executor)).await;
        assert_eq!(manager.runtime_version().await, Some("v20.11.0".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_writes_never_tear() {
        let (_dir, manager) = manager().await;
        let manager = Arc::new(manager);
        let created = manager.create_container().await.unwrap();

        let contents: Vec<String> = (0..8).map(|i| i.to_string().repeat(64 * 1024)).collect();
        let mut handles = Vec::new();
        for content in contents.clone() {
            let manager = manager.clone();
            let id = created.container_id.clone();
            handles.push(tokio::spawn(async move {
                manager.write_file(&id, "shared.txt", &content).await.unwrap();
                manager.get_file(&id, "shared.txt").await.unwrap().content
            }));
        }

        for handle in handles {
            let seen = handle.await.unwrap();
            assert!(contents.contains(&seen), "read observed a torn write");
        }
    }
}
