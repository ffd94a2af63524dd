pub async fn liveness_handler() -> &'static str {
    "OK"
}
