// Public modules
pub mod activity;
pub mod agent;
pub mod agent_create_params;
pub mod agent_update;
pub mod channel;
pub mod integration;
pub mod message;
pub mod message_page;
pub mod message_part;
pub mod message_role;
pub mod model;
pub mod thread;
pub mod thread_create_params;
pub mod thread_state;

// Re-exports
pub use activity::{ActivityItem, BadgeCount};
pub use agent::{Agent, AgentTool, ConnectorToolConfig, ConnectorTools, ToolConfigurations};
pub use agent_create_params::{
    AgentCreateParams, DEFAULT_CONNECTORS, DEFAULT_MODEL, DEFAULT_PRIORITY, DEFAULT_TEMPERATURE,
};
pub use agent_update::AgentUpdate;
pub use channel::Channel;
pub use integration::{AuthData, Integration, IntegrationCreateParams};
pub use message::Message;
pub use message_page::MessagePage;
pub use message_part::MessagePart;
pub use message_role::MessageRole;
pub use model::{ModelEntry, ModelListResponse};
pub use thread::Thread;
pub use thread_create_params::{ThreadCreateParams, fresh_client_temp_id};
pub use thread_state::ThreadState;
