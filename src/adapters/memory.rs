use crate::domain::ports::StoreBackend;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process stand-in for dconf. `load` replaces the whole dump text.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Arc<Mutex<String>>,
    resets: Arc<Mutex<usize>>,
}

impl MemoryBackend {
    pub fn new(initial_dump: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(initial_dump.into())),
            resets: Arc::new(Mutex::new(0)),
        }
    }

    pub async fn contents(&self) -> String {
        self.contents.lock().await.clone()
    }

    pub async fn reset_count(&self) -> usize {
        *self.resets.lock().await
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn dump(&self) -> Result<String> {
        Ok(self.contents.lock().await.clone())
    }

    async fn load(&self, text: &str) -> Result<()> {
        *self.contents.lock().await = text.to_string();
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.contents.lock().await.clear();
        *self.resets.lock().await += 1;
        Ok(())
    }
}
