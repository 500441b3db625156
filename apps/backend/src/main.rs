#[tokio::main]
async fn main() -> anyhow::Result<()> {
    advanced_memory_backend::run().await
}
