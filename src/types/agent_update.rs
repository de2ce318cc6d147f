use crate::types::AgentCreateParams;

/// A partial update to an agent.
///
/// Only the fields set here change; everything else is carried over from the
/// agent's current configuration (the service rejects partial PUT bodies).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentUpdate {
    /// New display name.
    pub name: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New system prompt.
    pub master_prompt: Option<String>,

    /// New model.
    pub model: Option<String>,

    /// New temperature.
    pub model_temperature: Option<f64>,

    /// New status (`active` or `inactive`).
    pub status: Option<String>,

    /// Replacement connector list.
    pub connectors: Option<Vec<String>>,

    /// Replacement capability list.
    pub capabilities: Option<Vec<String>>,

    /// New role title.
    pub role: Option<String>,

    /// New priority.
    pub priority: Option<u32>,
}

impl AgentUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == AgentUpdate::default()
    }

    /// Applies this update on top of a full payload.
    pub fn apply(self, mut params: AgentCreateParams) -> AgentCreateParams {
        if let Some(name) = self.name {
            params.name = name;
        }
        if let Some(description) = self.description {
            params.description = description;
        }
        if let Some(master_prompt) = self.master_prompt {
            params.master_prompt = master_prompt;
        }
        if let Some(model) = self.model {
            params.model = model;
        }
        if let Some(model_temperature) = self.model_temperature {
            params.model_temperature = model_temperature;
        }
        if let Some(status) = self.status {
            params.status = status;
        }
        if let Some(connectors) = self.connectors {
            params.connectors = connectors;
        }
        if let Some(capabilities) = self.capabilities {
            params.capabilities = capabilities;
        }
        if let Some(role) = self.role {
            params.role = Some(role);
        }
        if let Some(priority) = self.priority {
            params.priority = priority;
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_set_fields() {
        let base = AgentCreateParams::new("Recon", "recon agent", "You are Recon.");
        let update = AgentUpdate {
            model: Some("gpt-5.2".to_string()),
            status: Some("inactive".to_string()),
            ..AgentUpdate::default()
        };
        let merged = update.apply(base.clone());
        assert_eq!(merged.model, "gpt-5.2");
        assert_eq!(merged.status, "inactive");
        assert_eq!(merged.name, base.name);
        assert_eq!(merged.master_prompt, base.master_prompt);
    }

    #[test]
    fn empty_update_is_detectable() {
        assert!(AgentUpdate::default().is_empty());
        let update = AgentUpdate {
            name: Some("X".to_string()),
            ..AgentUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
