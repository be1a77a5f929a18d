pub mod loader;
pub mod stream_event;
