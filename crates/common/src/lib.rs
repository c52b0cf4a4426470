//! Small helpers shared across the keymint workspace. Nothing here knows
//! about tags, operations, or the dispatcher — just the secrets-hygiene and
//! tracing conventions every crate in the workspace follows.

pub mod secret;

pub use secret::SecretBytes;
