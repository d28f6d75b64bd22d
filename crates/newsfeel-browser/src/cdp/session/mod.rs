//! CDP page session for interacting with a single target.

mod bindings;
mod core;
mod dom;
mod js;
mod navigation;
mod network;

pub use self::bindings::BindingFn;
pub use self::core::PageSession;
pub use self::dom::ElementSnapshot;
pub use self::navigation::NetworkIdle;
pub use self::network::NetworkTracker;
