use crate::logging::RemoteLogger;
use crate::services::LinkService;

/// Shared application state, handed to every handler via `web::Data`.
pub struct AppState {
    pub service: LinkService,
    pub logger: RemoteLogger,
}
