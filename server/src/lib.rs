pub mod body;
pub mod error;
pub mod routes;

pub mod tracing {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            // disable printing the name of the module in every log line.
            .with_target(false)
            .init();
    }
}
