use std::fmt::Display;

use futures_util::{Sink, SinkExt as _, Stream, StreamExt as _};
use pokechat_agent::Agent;

/// Answer each inbound message with exactly one outbound reply, in order
///
/// Returns when the inbound stream ends, the outbound side fails, or a turn
/// fails. A failed turn sends nothing.
pub async fn relay<I, O>(agent: &Agent, inbound: I, outbound: O)
where
    I: Stream<Item = String>,
    O: Sink<String>,
    O::Error: Display,
{
    let mut inbound = std::pin::pin!(inbound);
    let mut outbound = std::pin::pin!(outbound);

    while let Some(message) = inbound.next().await {
        tracing::debug!(bytes = message.len(), "message received");

        let reply = match agent.respond(&message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "agent turn failed, closing connection");
                return;
            }
        };

        if let Err(e) = outbound.send(reply).await {
            tracing::debug!(error = %e, "client went away");
            return;
        }
    }
}
