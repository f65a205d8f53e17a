//! Parse semantic versions given on the command line.
//!
//! ```sh
//! cargo run -p weft-grammars --example semver -- 1.0.0-alpha.beta+exp.sha.5114f85 01.0.0
//! ```

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weft_grammars::semver::Version;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs.push("1.0.0-alpha.beta+exp.sha.5114f85".to_owned());
    }

    let mut last_error = None;
    for input in inputs {
        match input.parse::<Version>() {
            Ok(version) => {
                info!(%version, pre_release = version.is_pre_release(), "parsed");
                println!(
                    "{input}: major {} minor {} patch {} pre-release {:?} build {:?}",
                    version.major, version.minor, version.patch, version.pre_release, version.build
                );
            }
            Err(error) => {
                warn!(%input, %error, "rejected");
                last_error = Some(error);
            }
        }
    }

    match last_error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
