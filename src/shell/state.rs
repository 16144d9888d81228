use std::sync::Arc;

use crate::modules::timers::use_cases::delete_entry::handler::DeleteEntryHandler;
use crate::modules::timers::use_cases::edit_entry::handler::EditEntryHandler;
use crate::modules::timers::use_cases::list_entries::handler::ListEntriesHandler;
use crate::modules::timers::use_cases::pause_timer::handler::PauseTimerHandler;
use crate::modules::timers::use_cases::resume_timer::handler::ResumeTimerHandler;
use crate::modules::timers::use_cases::start_timer::handler::StartTimerHandler;
use crate::modules::timers::use_cases::stop_timer::handler::StopTimerHandler;
use crate::shared::infrastructure::change_outbox::in_memory::InMemoryChangeOutbox;
use crate::shared::infrastructure::entry_store::in_memory::InMemoryEntryStore;

type Store = InMemoryEntryStore;
type Outbox = InMemoryChangeOutbox;

#[derive(Clone)]
pub struct AppState {
    pub start_timer: Arc<StartTimerHandler<Store, Outbox>>,
    pub pause_timer: Arc<PauseTimerHandler<Store, Outbox>>,
    pub resume_timer: Arc<ResumeTimerHandler<Store, Outbox>>,
    pub stop_timer: Arc<StopTimerHandler<Store, Outbox>>,
    pub edit_entry: Arc<EditEntryHandler<Store, Outbox>>,
    pub delete_entry: Arc<DeleteEntryHandler<Store, Outbox>>,
    pub list_entries: Arc<ListEntriesHandler<Store>>,
    pub store: Arc<Store>,
    pub outbox: Arc<Outbox>,
}

impl AppState {
    /// In-memory wiring, used by `main` and by the adapter tests.
    pub fn in_memory() -> Self {
        Self::with_infrastructure(Arc::new(Store::new()), Arc::new(Outbox::new()))
    }

    pub fn with_infrastructure(store: Arc<Store>, outbox: Arc<Outbox>) -> Self {
        Self {
            start_timer: Arc::new(StartTimerHandler::new(store.clone(), outbox.clone())),
            pause_timer: Arc::new(PauseTimerHandler::new(store.clone(), outbox.clone())),
            resume_timer: Arc::new(ResumeTimerHandler::new(store.clone(), outbox.clone())),
            stop_timer: Arc::new(StopTimerHandler::new(store.clone(), outbox.clone())),
            edit_entry: Arc::new(EditEntryHandler::new(store.clone(), outbox.clone())),
            delete_entry: Arc::new(DeleteEntryHandler::new(store.clone(), outbox.clone())),
            list_entries: Arc::new(ListEntriesHandler::new(store.clone())),
            store,
            outbox,
        }
    }
}
