#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    mascot_portfolio::server::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    mascot_portfolio::frontend::run();
}
