use framegen_build::BuildConfig;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    framegen_build::build!("protocol/amqp0-9-1.json");
    framegen_build::build!("protocol/toy.json");

    // same version as the 0-9-1 description, so it needs its own prefix
    framegen_build::build!(
        "protocol/headers.json",
        BuildConfig {
            artifact_prefix: "framing_headers".to_string(),
            ..BuildConfig::default()
        }
    );

    Ok(())
}
