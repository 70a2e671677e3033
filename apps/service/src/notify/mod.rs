/// Outbound notifications
///
/// Notifiers return their delivery errors so callers can log them, but a
/// failed notification is never fatal and never retried.
pub mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;

use crate::error::NotifyDeliveryError;

/// Delivers a text message to a fixed destination
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyDeliveryError>;
}
