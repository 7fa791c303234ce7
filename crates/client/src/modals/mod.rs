//! Modal rendering: the registry of bodies, the shared frame and the
//! manager that mounts whatever the modal store currently holds.

mod bodies;
mod frame;
mod manager;
mod registry;

pub use manager::ModalManager;
pub use registry::{descriptor, registry, ModalBodyProps, ModalView};
