//! Initialize handshake types and the tool/prompt/resource descriptor and
//! request/result shapes.

pub mod initialize;
pub mod prompts;
pub mod resources;
pub mod tools;

pub use initialize::{Implementation, InitializeRequest, InitializeResult, InitializedNotification};
pub use prompts::{GetPromptRequest, GetPromptResult, ListPromptsResult, Prompt, PromptArgument, PromptMessage};
pub use resources::{
    ListResourcesResult, ListResourceTemplatesResult, ReadResourceRequest, ReadResourceResult,
    Resource, ResourceTemplate, SubscribeRequest, UnsubscribeRequest,
};
pub use tools::{CallToolRequest, GetToolRequest, ListToolsResult, Tool};
