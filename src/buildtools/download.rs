use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::ShellResult;

pub const BUILD_TOOLS_LATEST_JAR_URL: &str =
    "https://hub.spigotmc.org/jenkins/job/BuildTools/lastSuccessfulBuild/artifact/target/BuildTools.jar";

/// Make sure `jar_file` exists, downloading the latest BuildTools build if it does not.
///
/// Returns `true` when a download happened.
pub async fn ensure_jar(jar_file: &Path) -> ShellResult<bool> {
    if fs::try_exists(jar_file).await? {
        return Ok(false);
    }

    if let Some(parent) = jar_file.parent() {
        fs::create_dir_all(parent).await?;
    }

    log::info!(
        "downloading {} to {}",
        BUILD_TOOLS_LATEST_JAR_URL,
        jar_file.display()
    );
    let bytes = reqwest::get(BUILD_TOOLS_LATEST_JAR_URL)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    write_atomically(jar_file, &bytes).await?;
    log::info!("downloaded BuildTools.jar ({} bytes)", bytes.len());
    Ok(true)
}

/// Write to a sibling `.part` file first so an interrupted download never looks complete.
async fn write_atomically(target: &Path, bytes: &[u8]) -> ShellResult<()> {
    let partial = target.with_extension("jar.part");
    let mut out = fs::File::create(&partial).await?;
    out.write_all(bytes).await?;
    out.flush().await?;
    drop(out);
    fs::rename(&partial, target).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_jar_is_not_downloaded_again() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("BuildTools.jar");
        std::fs::write(&jar, b"PK").unwrap();

        let downloaded = tauri::async_runtime::block_on(ensure_jar(&jar)).unwrap();
        assert!(!downloaded);
        assert_eq!(std::fs::read(&jar).unwrap(), b"PK");
    }

    #[test]
    fn write_atomically_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("BuildTools.jar");

        tauri::async_runtime::block_on(write_atomically(&jar, b"jar bytes")).unwrap();
        assert_eq!(std::fs::read(&jar).unwrap(), b"jar bytes");
        assert!(!dir.path().join("BuildTools.jar.part").exists());
    }
}
