use droid_indexer::{index_path, state_path, IndexMode, ProjectIndexer};
use droid_vector_store::VectorStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stub_mode() {
    std::env::set_var("DROID_CONTEXT_EMBEDDING_MODE", "stub");
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture_project(root: &Path) {
    write(
        root,
        "app/src/main/java/com/example/app/MainActivity.kt",
        r#"package com.example.app

import com.example.app.data.UserRepository

class MainActivity {
    fun onCreate() {
        val repository = UserRepository()
        repository.warmUp()
    }
}
"#,
    );
    write(
        root,
        "app/src/main/java/com/example/app/data/UserRepository.kt",
        r#"package com.example.app.data

class UserRepository {
    fun warmUp() {}

    fun findUser(id: String): String = "user-$id"
}
"#,
    );
    write(
        root,
        "app/src/main/res/layout/activity_main.xml",
        "<LinearLayout>\n    <TextView android:text=\"hello\" />\n</LinearLayout>\n",
    );
    write(
        root,
        "app/build.gradle",
        "dependencies {\n    implementation 'androidx.core:core-ktx:1.12.0'\n}\n",
    );
}

#[tokio::test]
async fn full_index_creates_artifacts() {
    stub_mode();
    let dir = TempDir::new().unwrap();
    fixture_project(dir.path());

    let indexer = ProjectIndexer::new(dir.path()).unwrap();
    let stats = indexer.index(IndexMode::Full).await.unwrap();

    assert_eq!(stats.files, 4);
    assert!(stats.chunks > 0);
    assert!(stats.errors.is_empty());
    assert!(index_path(dir.path()).exists());
    assert!(state_path(dir.path()).exists());

    let deps = stats.dependencies.unwrap();
    assert!(deps.libraries.contains("androidx.core:core-ktx"));

    let store = VectorStore::load(index_path(dir.path())).await.unwrap();
    assert!(store.len() > 0);
}

#[tokio::test]
async fn incremental_reprocesses_only_changed_files() {
    stub_mode();
    let dir = TempDir::new().unwrap();
    fixture_project(dir.path());

    let indexer = ProjectIndexer::new(dir.path()).unwrap();
    indexer.index(IndexMode::Full).await.unwrap();

    // Nothing changed: nothing to do
    let stats = indexer.index(IndexMode::Incremental).await.unwrap();
    assert_eq!(stats.files, 0);

    // One file changed: exactly one file processed
    write(
        dir.path(),
        "app/src/main/java/com/example/app/data/UserRepository.kt",
        "package com.example.app.data\n\nclass UserRepository {\n    fun findUser(id: String): String = id\n}\n",
    );
    let stats = indexer.index(IndexMode::Incremental).await.unwrap();
    assert_eq!(stats.files, 1);
}

#[tokio::test]
async fn incremental_purges_deleted_files() {
    stub_mode();
    let dir = TempDir::new().unwrap();
    fixture_project(dir.path());

    let indexer = ProjectIndexer::new(dir.path()).unwrap();
    indexer.index(IndexMode::Full).await.unwrap();

    fs::remove_file(
        dir.path()
            .join("app/src/main/java/com/example/app/data/UserRepository.kt"),
    )
    .unwrap();
    indexer.index(IndexMode::Incremental).await.unwrap();

    let store = VectorStore::load(index_path(dir.path())).await.unwrap();
    assert!(store
        .chunks()
        .all(|stored| !stored.chunk.file_path.contains("UserRepository")));
}

#[tokio::test]
async fn incremental_without_state_behaves_like_full() {
    stub_mode();
    let dir = TempDir::new().unwrap();
    fixture_project(dir.path());

    let indexer = ProjectIndexer::new(dir.path()).unwrap();
    let stats = indexer.index(IndexMode::Incremental).await.unwrap();

    assert_eq!(stats.files, 4);
    assert!(index_path(dir.path()).exists());
}

#[test]
fn rejects_missing_project_path() {
    assert!(ProjectIndexer::new("/definitely/not/a/real/path").is_err());
}
