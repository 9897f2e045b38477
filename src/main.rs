//src/main.rs

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crm_backend::start().await
}
