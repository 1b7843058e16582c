//! gRPC clients for other services.

mod account_client;

pub use account_client::{AccountClient, AccountServiceClient};

#[cfg(any(test, feature = "test-utils"))]
pub use account_client::MockAccountServiceClient;
