use clickatell::{ClickatellClient, Credentials};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = ClickatellClient::new(Credentials::from_env()?);
    let envelope = client.get_balance().await?;
    println!("{}", envelope.to_json()?);
    Ok(())
}
