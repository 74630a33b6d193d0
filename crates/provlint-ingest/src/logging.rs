// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    Enumerate,
    Extract,
    Assemble,
    Check,
    Persist,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanEvent {
    pub stage: ScanStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
pub struct ScanLog {
    events: Vec<ScanEvent>,
}

impl ScanLog {
    pub fn emit(
        &mut self,
        stage: ScanStage,
        name: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) {
        self.events.push(ScanEvent {
            stage,
            name: name.into(),
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<ScanEvent> {
        self.events
    }
}
