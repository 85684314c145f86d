//! Modelos neutrales (Message, Token, LanguageModelDoc, fingerprints,
//! ExecutionContext).

pub mod context;
pub mod document;
pub mod fingerprint;
pub mod message;
pub mod token;

pub use context::ExecutionContext;
pub use document::LanguageModelDoc;
pub use fingerprint::{Fingerprintable, NodeFingerprintInput};
pub use message::{Message, MessageValue};
pub use token::Token;
