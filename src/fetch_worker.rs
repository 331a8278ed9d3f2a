use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::api::CatApi;
use crate::types::{AppEvent, FetchRequest};

/// Background task turning fetch requests into `AppEvent`s.
///
/// Each request runs as its own task, so a slow image search never holds up
/// a fact fetch. Answers arrive in completion order; the app discards the
/// ones whose generation is no longer current.
pub async fn run_fetch_worker(
    api: CatApi,
    mut requests: UnboundedReceiver<FetchRequest>,
    events: UnboundedSender<AppEvent>,
) {
    log::info!("[fetch] worker started");

    while let Some(req) = requests.recv().await {
        if events.is_closed() {
            break;
        }
        log::debug!("[fetch] request {req:?}");
        let api = api.clone();
        let events = events.clone();
        crate::platform::spawn(async move {
            let ev = perform(&api, req).await;
            if events.send(ev).is_err() {
                log::debug!("[fetch] app gone, dropping result");
            }
        });
    }

    log::info!("[fetch] worker shutting down");
}

/// Run one request to completion.
pub async fn perform(api: &CatApi, req: FetchRequest) -> AppEvent {
    match req {
        FetchRequest::Fact { generation } => {
            let result = api.fetch_fact().await;
            if let Err(e) = &result {
                log::error!("[fetch] cat fact failed: {e}");
            }
            AppEvent::FactFetched { generation, result }
        }
        FetchRequest::Image { generation, breed_id } => {
            let result = api.fetch_image(breed_id.as_deref()).await;
            if let Err(e) = &result {
                log::error!("[fetch] cat image failed (breed {breed_id:?}): {e}");
            }
            AppEvent::ImageFetched { generation, result }
        }
        FetchRequest::Breeds => {
            let result = api.fetch_breeds().await;
            match &result {
                Ok(breeds) => log::info!("[fetch] loaded {} breeds", breeds.len()),
                Err(e) => log::error!("[fetch] breed catalog failed: {e}"),
            }
            AppEvent::BreedsFetched(result)
        }
    }
}
