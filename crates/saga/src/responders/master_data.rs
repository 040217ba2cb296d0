use std::sync::{Arc, RwLock};

use domain::{MasterDataRecord, MasterDataType};
use event_bus::{EventChannelExt, InProcessEventChannel, ListenerError, Reply};

use super::ResponderMode;
use crate::messages::MasterDataRequested;
use crate::topics::{MASTER_DATA_REQUESTED, MASTER_DATA_RETRIEVED};

#[derive(Debug, Default)]
struct MasterDataState {
    records: Vec<MasterDataRecord>,
    requests: Vec<MasterDataType>,
    mode: ResponderMode,
}

/// Answers `MasterDataRequested` with the seeded records of the asked type.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMasterDataResponder {
    state: Arc<RwLock<MasterDataState>>,
}

impl InMemoryMasterDataResponder {
    /// Creates a responder and subscribes it to `channel`.
    pub fn register(channel: &InProcessEventChannel) -> Self {
        let responder = Self::default();
        let state = Arc::clone(&responder.state);
        let weak = channel.downgrade();

        channel.subscribe_fn(MASTER_DATA_REQUESTED, move |event| {
            let request: MasterDataRequested = event.decode()?;

            let reply = {
                let mut state = state.write().unwrap();
                state.requests.push(request.tipe);
                match &state.mode {
                    ResponderMode::Answer => {
                        let records: Vec<&MasterDataRecord> = state
                            .records
                            .iter()
                            .filter(|record| record.kind == request.tipe)
                            .collect();
                        Reply::success(&records)?
                    }
                    ResponderMode::Reject(failure) => Reply::Error(failure.clone()),
                    ResponderMode::Crash => {
                        return Err(ListenerError::new("master data store unavailable"));
                    }
                    ResponderMode::Silent => return Ok(()),
                }
            };

            let channel = weak
                .upgrade()
                .ok_or_else(|| ListenerError::new("event channel dropped"))?;
            channel.reply(event, MASTER_DATA_RETRIEVED, &reply)?;
            Ok(())
        });

        responder
    }

    /// Adds a record to the answers.
    pub fn seed(&self, record: MasterDataRecord) {
        self.state.write().unwrap().records.push(record);
    }

    pub fn set_mode(&self, mode: ResponderMode) {
        self.state.write().unwrap().mode = mode;
    }

    /// Types asked for, in request order.
    pub fn requests(&self) -> Vec<MasterDataType> {
        self.state.read().unwrap().requests.clone()
    }

    /// Number of requests of the given type.
    pub fn request_count(&self, kind: MasterDataType) -> usize {
        self.state
            .read()
            .unwrap()
            .requests
            .iter()
            .filter(|asked| **asked == kind)
            .count()
    }
}
