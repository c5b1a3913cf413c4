pub mod intersection_sync;

pub use intersection_sync::{IntersectionSnapshot, IntersectionSync};
