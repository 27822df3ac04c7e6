//! The three external-collaborator seams spec §6 carves out of the
//! editing engine: the embedded scripting bridge, the schematic
//! parser/serializer, and the rendering backend. None of their real
//! implementations live here -- this crate only defines the narrow
//! traits the core depends on, plus no-op/recording implementations used
//! by tests and headless tooling, following `core-plugin`'s
//! trait-plus-`Noop`-impl shape.

pub mod error;
pub mod outcome;
pub mod renderer;
pub mod schematic_io;
pub mod script_bridge;

pub use error::IoError;
pub use outcome::Outcome;
pub use renderer::{DrawCall, NoopRenderer, Phase, RecordingRenderer, Renderer};
pub use schematic_io::{LoadedSheet, NoopSchematicIo, SchematicIo, hash_schematic_text};
pub use script_bridge::{DialogAnswer, NoopScriptBridge, RecordingScriptBridge, ScriptBridge};
