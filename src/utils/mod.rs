pub mod buffer;
pub mod framing;
pub mod peak;
pub mod window;
