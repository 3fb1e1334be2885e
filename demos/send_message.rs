use std::io;

use clickatell::{
    ClickatellClient, Credentials, MessageText, RawPhoneNumber, SendMessage, SendOptions,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phones_raw = std::env::var("CLICKATELL_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_TO environment variable is required (comma-separated numbers)",
        )
    })?;
    let message = std::env::var("CLICKATELL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the clickatell demo.".to_owned());

    let client = ClickatellClient::new(Credentials::from_env()?);
    let recipients = phones_raw
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;
    let text = MessageText::new(message)?;
    let request = SendMessage::new(recipients, text, SendOptions::default())?;

    let envelope = client.send_message(request).await?;
    for recipient in envelope.response() {
        println!(
            "to: {}, apiMsgId: {:?}, error: {}, description: {:?}",
            recipient.to.raw(),
            recipient.api_msg_id.as_ref().map(|id| id.as_str()),
            recipient.error,
            recipient.description
        );
    }

    Ok(())
}
