use std::sync::Arc;

use launch_core::{ActionHandle, Entity, ProcessAction, ProcessActionRef};

use crate::process::ProcessTarget;

#[derive(Debug)]
pub(crate) struct FakeProcess {
    handle: ActionHandle,
    name: String,
}

impl Entity for FakeProcess {
    fn describe(&self) -> String {
        format!("FakeProcess(name='{}')", self.name)
    }

    fn as_process_action(self: Arc<Self>) -> Option<Arc<dyn ProcessAction>> {
        Some(self)
    }
}

impl ProcessAction for FakeProcess {
    fn handle(&self) -> ActionHandle {
        self.handle
    }
}

#[derive(Debug)]
pub(crate) struct LogInfo(pub &'static str);

impl Entity for LogInfo {
    fn describe(&self) -> String {
        format!("LogInfo(msg='{}')", self.0)
    }
}

pub(crate) fn fake_process(name: &str) -> ProcessActionRef {
    ProcessActionRef::new(Arc::new(FakeProcess {
        handle: ActionHandle::next(),
        name: name.to_string(),
    }))
}

pub(crate) fn log(msg: &'static str) -> Arc<dyn Entity> {
    Arc::new(LogInfo(msg))
}

pub(crate) fn target_for(action: &ProcessActionRef) -> ProcessTarget {
    ProcessTarget {
        action: action.clone(),
        name: "talker-1".to_string(),
        cmd: vec!["talker".to_string()],
        cwd: None,
        env: None,
        pid: 4242,
    }
}

pub(crate) fn descriptions(entities: &[Arc<dyn Entity>]) -> Vec<String> {
    entities.iter().map(|e| e.describe()).collect()
}
