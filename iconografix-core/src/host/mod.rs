//! Hand-off of selected icons to an embedding host
//!
//! The host embeds this application and listens for `ADD_OBJECT` messages.
//! Each message carries one icon's markup as a base64 data URI plus
//! descriptive metadata. There is no reply channel.

mod channel;
mod envelope;
mod export;
mod transport;

pub use channel::{HostMessagingChannel, TargetOrigin};
pub use envelope::{
    collapse_whitespace, encode_svg_data_uri, AddObjectMetadata, AddObjectPayload, HostMessage,
    ObjectKind, SVG_DATA_URI_PREFIX,
};
pub use export::{AddToProject, ExportReport};
pub use transport::{HostTransport, JsonLinesTransport, MemoryTransport};
