#[tokio::main]
async fn main() {
    clickstay_backend::run().await;
}
