//! Reference in-memory `Context`/`KeyFactory`/`EnforcementPolicy` fixtures
//! used by the keymint dispatcher's test suite. Nothing here is a
//! certified cryptographic implementation — see each module's docs for what
//! it stands in for and why the shortcuts are safe for tests only.

pub mod blob_codec;
pub mod context;
pub mod key_factory;
pub mod operation;
pub mod policy;

pub use context::InMemoryContext;
pub use key_factory::ToyAesKeyFactory;
pub use operation::{ToyCipherOperation, ToyOperationFactory};
pub use policy::InMemoryPolicy;
