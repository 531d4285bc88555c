//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the text sent back so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing (or only a failure notice) was sent.
    Stop,
    /// Stop the chain and attach the text that was delivered.
    Reply(String),
}
