use std::io;

use clickatell::{ClickatellClient, Credentials, RawPhoneNumber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let msisdn = std::env::var("CLICKATELL_MSISDN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_MSISDN environment variable is required",
        )
    })?;
    let msisdn = RawPhoneNumber::new(msisdn)?;

    let client = ClickatellClient::new(Credentials::from_env()?);
    let coverage = client.route_coverage(&msisdn).await?;
    println!(
        "charge: {}, description: {}",
        coverage.response().charge,
        coverage.response().description
    );

    Ok(())
}
