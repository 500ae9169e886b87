use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    salescope_cli::run().await
}
