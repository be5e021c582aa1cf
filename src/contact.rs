//! Contact form delivery through the EmailJS REST API.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::i18n::LanguageStrings;

/// Form fields, named as the email template expects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub from_name: String,
    pub company_name: String,
    pub from_email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Names of required fields that are blank (name and email).
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.from_name.trim().is_empty() {
            missing.push("from_name");
        }
        if self.from_email.trim().is_empty() {
            missing.push("from_email");
        }
        missing
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactForm,
}

pub struct EmailClient {
    client: reqwest::Client,
    api_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.emailjs_api_url.trim_end_matches('/').to_string(),
            service_id: config.emailjs_service_id.clone(),
            template_id: config.emailjs_template_id.clone(),
            public_key: config.emailjs_public_key.clone(),
        }
    }

    pub async fn send(&self, form: &ContactForm) -> Result<()> {
        let url = format!("{}/api/v1.0/email/send", self.api_url);

        let request = SendEmailRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: form,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to EmailJS API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("EmailJS API error ({}): {}", status, body);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown to the visitor after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: &'static str,
}

/// The contact page's form: field values plus the in-flight flag.
#[derive(Debug, Default)]
pub struct ContactFormState {
    pub form: ContactForm,
    submitting: bool,
}

impl ContactFormState {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Label of the submit button in its current state.
    pub fn submit_label(&self, strings: &LanguageStrings) -> &'static str {
        if self.submitting {
            strings.contact.submitting
        } else {
            strings.contact.submit
        }
    }

    /// Send the form. Success clears it; failure keeps it for a retry.
    pub async fn submit(&mut self, client: &EmailClient, strings: &LanguageStrings) -> Notification {
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            warn!("Contact form missing required fields: {}", missing.join(", "));
            return Notification {
                kind: NotificationKind::Error,
                message: strings.contact.error_message,
            };
        }

        self.submitting = true;
        let result = client.send(&self.form).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!("✓ Contact form sent");
                self.form = ContactForm::default();
                Notification {
                    kind: NotificationKind::Success,
                    message: strings.contact.success_message,
                }
            }
            Err(e) => {
                error!("✗ Failed to send contact form: {:#}", e);
                Notification {
                    kind: NotificationKind::Error,
                    message: strings.contact.error_message,
                }
            }
        }
    }
}
