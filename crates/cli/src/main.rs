use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    droid_cli::main_entry().await
}
