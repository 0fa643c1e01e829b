pub mod descriptor;

pub use descriptor::{Interface, ResourceDescriptor};
