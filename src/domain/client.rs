use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, EmployeeId};

/// Client record from the external directory, used to fill agenda client
/// pickers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    /// Tax or national identification number, searchable in the picker.
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Advisor whose portfolio holds this client.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

impl Client {
    /// Case-insensitive match on name, plain substring match on tax id.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term.to_lowercase())
            || self
                .tax_id
                .as_deref()
                .is_some_and(|tax_id| tax_id.contains(term))
    }
}
