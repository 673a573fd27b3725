// tests/common/mock_storage.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use review_backend::error::AppResult;
use review_backend::service::storage_service::StorageService;

/// テスト用のインメモリストレージ
pub struct MockStorageService {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn upload(&self, key: &str, data: Vec<u8>, _content_type: &str) -> AppResult<String> {
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("http://mock-storage.local/test-bucket/{}", key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
