//! Registers one route and prints what a lookup finds.
//!
//! ```text
//! cargo run -p arbor --example lookup
//! ARBOR__LOGGING__FORMAT=json cargo run -p arbor --example lookup
//! ```

use arbor::prelude::*;
use arbor::telemetry::log_lookup;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::new()
        .with_development()
        .with_optional_file("arbor.toml")?
        .with_dotenv()?
        .with_env_prefix("ARBOR")
        .load()?;
    init_logging(&config.logging.to_log_config())?;

    let mut router = Router::with_options(config.router.to_options());
    router.on("get", "/foo/bar/:ker", "showKer")?;

    let path = "/foo/bar/alex";
    match router.lookup("get", path) {
        Some(found) => {
            log_lookup!("get", path, found);
            println!("handle: {:?}", found.handle);
            for param in &found.params {
                println!("  {} = {}", param.key, param.value);
            }
            println!("tsr: {}", found.tsr);
        }
        None => tracing::warn!(http.method = "get", "No tree for method"),
    }

    Ok(())
}
