/// User-facing warning surface (alerts, toasts).
#[async_trait::async_trait]
pub trait UiPort: Send + Sync {
    async fn alert(&self, message: &str) -> anyhow::Result<()>;
}
