use crate::config::SmtpConfig;
use crate::error::AppError;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Contact form submission relayed to the site owner.
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Outbound SMTP relay for the contact form.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    pub fn from_config(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = config
            .from_address
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid from_address: {e}"))?;
        let to = config
            .to_address
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid to_address: {e}"))?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    /// Relays a contact submission. Transport failures are reported to the
    /// caller instead of being swallowed.
    pub async fn send_contact(&self, contact: &ContactMessage) -> Result<(), AppError> {
        let body = format!(
            "{}\n{}\n{}\n{}",
            contact.name, contact.email, contact.phone, contact.message
        );

        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject("Message From Blog!")
            .body(body)
            .map_err(|e| AppError::Anyhow(anyhow::anyhow!("failed to build message: {e}")))?;

        self.transport.send(email).await?;
        Ok(())
    }
}
