use anyhow::anyhow;
use learnexia_client_core::ResponseReceiver;
use learnexia_shared::internal_error;
use std::fmt::Debug;
use tracing::{error, warn};

/// A request that has been sent and whose outcome has not been taken yet
#[derive(Debug)]
pub struct AwaitingType<T>(pub ResponseReceiver<T>);

impl<T> AwaitingType<T> {
    /// Returns the outcome if it has arrived, without blocking
    pub fn try_outcome(&mut self) -> Option<anyhow::Result<T>> {
        match self.0.try_recv() {
            Ok(recv_opt) => recv_opt,
            Err(e) => {
                let err_msg = format!("Error receiving on channel. Error: {e:?}");
                error!(err_msg, "Error receiving on channel");
                Some(Err(anyhow!(err_msg)))
            }
        }
    }

    /// Waits for the outcome
    pub async fn outcome(&mut self) -> anyhow::Result<T> {
        match (&mut self.0).await {
            Ok(outcome) => outcome,
            Err(e) => Err(anyhow!(internal_error!(e))),
        }
    }
}

/// Waits for a read whose failure should not block the page
pub(crate) async fn settle_or_default<T>(rx: ResponseReceiver<T>, what: &str) -> T
where
    T: Default + Debug,
{
    match AwaitingType(rx).outcome().await {
        Ok(data) => data,
        Err(e) => {
            warn!(?e, what, "read failed, using default instead");
            T::default()
        }
    }
}

/// Text for an inline error, falls back to `fallback` if the error has none
pub(crate) fn error_message_or(e: &anyhow::Error, fallback: &str) -> String {
    let msg = e.to_string();
    if msg.trim().is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}
