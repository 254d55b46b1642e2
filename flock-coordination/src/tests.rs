#[cfg(test)]
mod unit_tests {
    use crate::{FileSystemStore, InMemoryStore};
    use flock_core::CoordinationStore;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();

        // Nothing there initially
        assert!(!store.exists("/flock/nodes").await.unwrap());
        assert!(store.get("/flock/nodes").await.is_err());

        // Create, then read back
        store.create("/flock/nodes", b"v1").await.unwrap();
        assert!(store.exists("/flock/nodes").await.unwrap());
        assert_eq!(store.get("/flock/nodes").await.unwrap(), b"v1");

        // Overwrite
        store.set("/flock/nodes", b"v2").await.unwrap();
        assert_eq!(store.get("/flock/nodes").await.unwrap(), b"v2");
    }

    #[tokio::test]
    async fn test_in_memory_create_and_set_semantics() {
        let store = InMemoryStore::new();

        // Set without create fails
        assert!(store.set("/flock/nodes", b"v1").await.is_err());

        store.create("/flock/nodes", b"v1").await.unwrap();

        // Duplicate create fails
        assert!(store.create("/flock/nodes", b"v2").await.is_err());
        assert_eq!(store.get("/flock/nodes").await.unwrap(), b"v1");
    }

    #[tokio::test]
    async fn test_file_system_store() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path()).await.unwrap();

        assert!(!store.exists("/flock/nodes").await.unwrap());

        store.create("/flock/nodes", b"topology").await.unwrap();
        assert!(store.exists("/flock/nodes").await.unwrap());
        assert_eq!(store.get("/flock/nodes").await.unwrap(), b"topology");

        // A new instance over the same directory sees the same record
        let store2 = FileSystemStore::new(temp_dir.path()).await.unwrap();
        assert_eq!(store2.get("/flock/nodes").await.unwrap(), b"topology");

        store2.set("/flock/nodes", b"updated").await.unwrap();
        assert_eq!(store.get("/flock/nodes").await.unwrap(), b"updated");
    }

    #[tokio::test]
    async fn test_file_system_create_and_set_semantics() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path()).await.unwrap();

        assert!(store.set("/flock/nodes", b"v1").await.is_err());

        store.create("/flock/nodes", b"v1").await.unwrap();
        assert!(store.create("/flock/nodes", b"v2").await.is_err());
    }

    #[tokio::test]
    async fn test_distinct_paths_are_independent() {
        let store = InMemoryStore::new();

        store.create("/flock/nodes", b"nodes").await.unwrap();
        store.create("/flock/epoch", b"epoch").await.unwrap();

        assert_eq!(store.get("/flock/nodes").await.unwrap(), b"nodes");
        assert_eq!(store.get("/flock/epoch").await.unwrap(), b"epoch");
    }
}
