//! Identity services: persistent node id, ULID generation, and the per-track
//! object-id table.

mod node_id;
mod object_id;
pub mod ulid;

pub use node_id::NodeIdentity;
pub use object_id::ObjectIdTable;
