//! BPE token counting with the `cl100k_base` encoding.
//!
//! The encoding is loaded once, either by [`TokenCounter::preload`] at startup or on first use,
//! and the outcome (including a failure) is kept for the life of the counter, so a broken
//! tokenizer is reported on every call without reloading.

use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;
use tracing::{debug, error};

use crate::core::{BotError, Result};

/// Name of the encoding, as shown to users.
pub const ENCODING_NAME: &str = "cl100k_base";

type Loader = fn() -> anyhow::Result<CoreBPE>;

pub struct TokenCounter {
    loader: Loader,
    bpe: OnceLock<std::result::Result<CoreBPE, String>>,
}

impl TokenCounter {
    pub fn new() -> Self {
        Self::with_loader(tiktoken_rs::cl100k_base)
    }

    /// Counter with a custom encoding loader.
    pub fn with_loader(loader: Loader) -> Self {
        Self {
            loader,
            bpe: OnceLock::new(),
        }
    }

    fn bpe(&self) -> &std::result::Result<CoreBPE, String> {
        self.bpe.get_or_init(|| {
            debug!(encoding = ENCODING_NAME, "loading tokenizer");
            (self.loader)().map_err(|e| {
                error!(error = %e, encoding = ENCODING_NAME, "failed to load tokenizer");
                e.to_string()
            })
        })
    }

    /// Loads the encoding now. Blocking; call it off the async runtime.
    pub fn preload(&self) -> Result<()> {
        match self.bpe() {
            Ok(_) => Ok(()),
            Err(e) => Err(BotError::Tokenizer(e.clone())),
        }
    }

    /// Number of tokens in `text`; special-token text is encoded as ordinary tokens.
    pub fn count(&self, text: &str) -> Result<usize> {
        match self.bpe() {
            Ok(bpe) => Ok(bpe.encode_with_special_tokens(text).len()),
            Err(e) => Err(BotError::Tokenizer(format!(
                "tokenizer is not initialized: {}",
                e
            ))),
        }
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_count_empty_text_is_zero() {
        let counter = TokenCounter::new();
        assert_eq!(counter.count("").unwrap(), 0);
    }

    #[test]
    fn test_count_hello_world() {
        let counter = TokenCounter::new();
        assert_eq!(counter.count("hello world").unwrap(), 2);
    }

    #[test]
    fn test_preload_then_count() {
        let counter = TokenCounter::new();
        counter.preload().unwrap();
        assert_eq!(counter.count("hello world").unwrap(), 2);
    }

    static PRELOADS: AtomicUsize = AtomicUsize::new(0);

    fn counted_failing_loader() -> anyhow::Result<CoreBPE> {
        PRELOADS.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("no network"))
    }

    #[test]
    fn test_failed_preload_is_not_retried_by_count() {
        let counter = TokenCounter::with_loader(counted_failing_loader);

        let err = counter.preload().unwrap_err();
        assert!(matches!(err, BotError::Tokenizer(_)));
        assert!(counter.count("abc").unwrap_err().to_string().contains("no network"));
        assert_eq!(PRELOADS.load(Ordering::SeqCst), 1);
    }

    static LOADS: AtomicUsize = AtomicUsize::new(0);

    fn failing_loader() -> anyhow::Result<CoreBPE> {
        LOADS.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("vocabulary unavailable"))
    }

    #[test]
    fn test_failed_load_is_cached_and_reported() {
        let counter = TokenCounter::with_loader(failing_loader);

        let first = counter.count("abc").unwrap_err();
        let second = counter.count("def").unwrap_err();

        assert!(matches!(first, BotError::Tokenizer(_)));
        assert!(second.to_string().contains("vocabulary unavailable"));
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    }
}
