//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The core never talks to the network,
//! the navigation stack or the screen directly.

pub mod errors;
pub mod http;
pub mod objectives;
pub mod registration;
pub mod router;
pub mod ui;

pub use errors::{HttpError, RemoteError};
pub use http::{HttpClientPort, HttpMethod, HttpRequest, HttpResponse};
pub use objectives::{ObjectiveFeedPort, ObjectiveViewPort};
pub use registration::RegistrationGatewayPort;
pub use router::{Route, RouterPort};
pub use ui::UiPort;
