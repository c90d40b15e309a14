//! Ordered delivery with fallback
//!
//! Transports are tried in sequence; the first response wins and every
//! failure before it is logged and kept for the error summary

use std::sync::Arc;

use easel_core::Credentials;
use serde_json::Value;

use crate::transport::{Target, Transport, TransportError};

/// Response delivered by one of the transports
#[derive(Debug)]
pub(crate) struct Delivery {
    /// Name of the transport that succeeded
    pub transport: &'static str,
    pub response: Value,
}

/// Failure of one transport, in attempt order
#[derive(Debug)]
pub(crate) struct Attempt {
    pub transport: &'static str,
    pub error: TransportError,
}

/// Try each transport in order until one returns a response
///
/// On exhaustion returns every failure; the list is empty only if no
/// transport was given
pub(crate) async fn deliver(
    transports: &[Arc<dyn Transport>],
    target: &Target<'_>,
    body: &[u8],
    credentials: Option<&Credentials>,
) -> Result<Delivery, Vec<Attempt>> {
    let mut attempts = Vec::with_capacity(transports.len());

    for (index, transport) in transports.iter().enumerate() {
        match transport.send(target, body, credentials).await {
            Ok(response) => {
                if index > 0 {
                    tracing::info!(
                        transport = transport.name(),
                        failed_attempts = attempts.len(),
                        "fallback transport succeeded"
                    );
                }
                return Ok(Delivery {
                    transport: transport.name(),
                    response,
                });
            }
            Err(error) => {
                let remaining = transports.len() - index - 1;
                tracing::warn!(
                    transport = transport.name(),
                    error = %error,
                    remaining,
                    "transport failed"
                );
                attempts.push(Attempt {
                    transport: transport.name(),
                    error,
                });
            }
        }
    }

    Err(attempts)
}
