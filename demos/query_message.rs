use std::io;

use clickatell::{ApiMsgId, ClickatellClient, Credentials};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_msg_id = std::env::var("CLICKATELL_API_MSG_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_API_MSG_ID environment variable is required",
        )
    })?;
    let api_msg_id = ApiMsgId::new(api_msg_id)?;

    let client = ClickatellClient::new(Credentials::from_env()?);
    let status = client.query_message(&api_msg_id).await?;
    let charge = client.get_message_charge(&api_msg_id).await?;

    println!(
        "status: {} ({}), charge: {}",
        status.response().status,
        status.response().description,
        charge.response().charge
    );

    Ok(())
}
