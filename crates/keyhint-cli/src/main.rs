#[tokio::main]
async fn main() -> anyhow::Result<()> {
    keyhint_cli::parse_and_run().await
}
