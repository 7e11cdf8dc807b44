use serde::Serialize;

use crate::process::ProcessRecord;

/// Result of one enumerate + enrich pass, in process table order.
///
/// Owned by the caller; records are never mutated after the pass completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProcessList {
    records: Vec<ProcessRecord>,
}

impl ProcessList {
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<ProcessRecord> {
        self.records
    }
}

impl IntoIterator for ProcessList {
    type Item = ProcessRecord;
    type IntoIter = std::vec::IntoIter<ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProcessList {
    type Item = &'a ProcessRecord;
    type IntoIter = std::slice::Iter<'a, ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
