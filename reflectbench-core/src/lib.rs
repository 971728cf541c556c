//! reflectbench Core Library
//!
//! The subject of the reflection benchmark: a sample [`Payload`] type, the two
//! reflection mechanisms under comparison (`bevy_reflect` and a hashed-id
//! meta registry), registration of the payload with both, and resolution of
//! the member handles the hot path reuses.

pub mod error;
pub mod meta;
pub mod payload;
pub mod reflect;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use error::{HardValidationError, RegistrationError, ReflectBenchError, ReflectBenchResult};
pub use meta::{hashed, MetaAny, MetaContext, MetaData, MetaFactory, MetaFunc, MetaId, MetaType};
pub use payload::{members, Payload};
pub use reflect::ReflectRegistry;
pub use registry::{ids, MetaHandles, ReflectHandles, Registries};
pub use types::{AccessPath, Mechanism};
