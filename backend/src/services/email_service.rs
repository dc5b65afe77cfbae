//! SMTP delivery of verification and password-reset emails.
//!
//! The auth core hands this service a recipient and a raw token; link
//! construction and templating happen here. The raw token appears only in
//! the outgoing message, never in logs.

use crate::config::EmailConfig;
use crate::errors::{ServiceError, ServiceResult};
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::str::FromStr;

pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new EmailService instance
    pub fn new(config: EmailConfig) -> ServiceResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ServiceError::configuration(format!("Invalid SMTP host: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, config })
    }

    /// Sends an email-verification link carrying the raw token.
    pub async fn send_verification_email(
        &self,
        recipient_email: &str,
        raw_token: &str,
    ) -> ServiceResult<()> {
        let verify_url = format!("{}/verify-email?token={}", self.config.base_url, raw_token);

        let html_content = self.build_action_html(
            "Verify your email address",
            "Confirm this address to finish setting up your account.",
            "Verify Email",
            &verify_url,
        );
        let text_content = self.build_action_text(
            "Verify your email address",
            "Confirm this address to finish setting up your account.",
            &verify_url,
        );

        self.send_email(
            recipient_email,
            "Verify your email address",
            &html_content,
            &text_content,
        )
        .await
    }

    /// Sends a password-reset link carrying the raw token.
    pub async fn send_password_reset_email(
        &self,
        recipient_email: &str,
        raw_token: &str,
    ) -> ServiceResult<()> {
        let reset_url = format!("{}/reset-password?token={}", self.config.base_url, raw_token);

        let html_content = self.build_action_html(
            "Reset your password",
            "We received a request to reset the password for your account.",
            "Reset Password",
            &reset_url,
        );
        let text_content = self.build_action_text(
            "Reset your password",
            "We received a request to reset the password for your account.",
            &reset_url,
        );

        self.send_email(
            recipient_email,
            "Reset your password",
            &html_content,
            &text_content,
        )
        .await
    }

    /// Sends a generic email
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> ServiceResult<()> {
        let from_mailbox = Mailbox::from_str(&format!(
            "{} <{}>",
            self.config.from_name, self.config.from_email
        ))
        .map_err(|e| ServiceError::configuration(format!("Invalid from email: {e}")))?;

        let to_mailbox = Mailbox::from_str(to_email)
            .map_err(|e| ServiceError::validation(format!("Invalid recipient email: {e}")))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                lettre::message::MultiPart::alternative()
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_content.to_string()),
                    )
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_content.to_string()),
                    ),
            )
            .map_err(|e| ServiceError::internal_error(format!("Failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| ServiceError::external_service(format!("Failed to send email: {e}")))?;

        Ok(())
    }

    fn build_action_html(
        &self,
        heading: &str,
        intro: &str,
        button_label: &str,
        action_url: &str,
    ) -> String {
        format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <meta charset="UTF-8">
                <title>{}</title>
            </head>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #2c3e50;">{}</h2>

                    <p>{}</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{}"
                           style="background-color: #3498db; color: white; padding: 12px 30px;
                                  text-decoration: none; border-radius: 5px; display: inline-block;">
                            {}
                        </a>
                    </div>

                    <p>Or copy and paste this link into your browser:</p>
                    <p style="word-break: break-all; color: #7f8c8d;">{}</p>

                    <hr style="border: none; border-top: 1px solid #ecf0f1; margin: 30px 0;">

                    <p style="font-size: 12px; color: #7f8c8d;">
                        This link will expire in 24 hours. If you didn't request this,
                        you can safely ignore this email.
                    </p>
                </div>
            </body>
            </html>
            "#,
            heading, heading, intro, action_url, button_label, action_url
        )
    }

    fn build_action_text(&self, heading: &str, intro: &str, action_url: &str) -> String {
        format!(
            r#"{}

{}

Open the link below to continue:
{}

This link will expire in 24 hours. If you didn't request this, you can safely ignore this email.
            "#,
            heading, intro, action_url
        )
    }
}
