use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::Stream;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/events", get(invalidation_stream))
}

/// Live invalidation feed. Dashboard and list views subscribe here and
/// refetch their query scopes whenever an appointment mutates.
async fn invalidation_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.bus.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).ok()?;
            Some(Ok(Event::default().event("invalidation").data(data)))
        }
        // Lagged receivers just miss events; the next one still triggers a refetch.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
