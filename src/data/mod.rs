// Network access from the viewer: relay socket and market list
pub mod markets;
pub mod relay_client;

// Re-export commonly used types
pub use markets::fetch_markets;
pub use relay_client::{ConnectionStatus, RelayConnection, RelayEvent};
