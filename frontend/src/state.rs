use chat_sync::{SessionId, SyncController, SyncState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpGateway;

type Controller = SyncController<HttpGateway>;

/// Shared application state, provided via Leptos context.
///
/// Components read `sync`; every change goes through the controller, whose
/// snapshots are mirrored into the signal.
#[derive(Clone, Copy)]
pub struct AppState {
    pub sync: ReadSignal<SyncState>,
    controller: StoredValue<Controller, LocalStorage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let controller = Controller::new(HttpGateway::default());
        let (sync, set_sync) = signal(controller.snapshot());
        controller
            .subscribe(move |snapshot| set_sync.set(snapshot.clone()))
            .detach();

        let state = Self {
            sync,
            controller: StoredValue::new_local(controller),
        };
        provide_context(state);
        state
    }

    fn controller(&self) -> Controller {
        self.controller.get_value()
    }

    /// Load sessions from the backend; opens the newest one if none is open.
    pub fn refresh(&self) {
        let controller = self.controller();
        spawn_local(async move {
            let _ = controller.refresh_directory().await;
        });
    }

    pub fn select(&self, id: SessionId) {
        spawn_local(self.controller().select_session(id));
    }

    pub fn create(&self) {
        let controller = self.controller();
        spawn_local(async move {
            if let Err(e) = controller.create_session().await {
                log::warn!("New chat not created: {e}");
            }
        });
    }

    pub fn set_draft(&self, text: String) {
        self.controller().set_draft(text);
    }

    pub fn send(&self) {
        let sending = self.controller().send_draft();
        spawn_local(async move {
            let outcome = sending.await;
            log::debug!("Send finished: {outcome:?}");
        });
    }

    pub fn dismiss_error(&self) {
        self.controller().dismiss_error();
    }
}
