#[tokio::main]
async fn main() {
    if let Err(err) = ledger::start(std::env::args()).await {
        tracing::error!(?err, "query failed");
        std::process::exit(1);
    }
}
