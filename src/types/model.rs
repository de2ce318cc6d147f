use serde::{Deserialize, Serialize};

/// One entry in the model listing.
///
/// The models endpoint returns either bare name strings or objects with
/// `name`/`id` fields, depending on the model provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ModelEntry {
    /// A bare model name.
    Name(String),

    /// A model object.
    Info {
        /// Model name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,

        /// Model identifier.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl ModelEntry {
    /// Returns the best available display name for the model.
    pub fn display_name(&self) -> &str {
        match self {
            ModelEntry::Name(name) => name,
            ModelEntry::Info { name, id } => name
                .as_deref()
                .or(id.as_deref())
                .unwrap_or("unknown"),
        }
    }
}

/// Response shape of the model listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelListResponse {
    /// Available models.
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mixed_entry_shapes() {
        let resp: ModelListResponse = serde_json::from_value(json!({
            "models": [
                "claude-opus-4.5",
                {"id": "gpt-5.2"},
                {"name": "mistral-large-latest", "id": "mistral-large"}
            ]
        }))
        .unwrap();
        let names: Vec<&str> = resp.models.iter().map(|m| m.display_name()).collect();
        assert_eq!(
            names,
            vec!["claude-opus-4.5", "gpt-5.2", "mistral-large-latest"]
        );
    }
}
