//! API surface consumed by the application's transport layer.

pub mod api;

pub use api::{
    check_edit, health, queue_view, reorder_queue, EditCheckRequest, EditCheckResponse,
    Health, QueueViewResponse, ReorderRequest, ReorderResponse,
};
