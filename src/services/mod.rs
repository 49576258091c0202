pub mod context;
pub mod flow_service;
pub mod flows;
pub mod invoker;
pub mod model_client;

pub use context::FlowContext;
pub use flow_service::FlowService;
pub use invoker::{RetryPolicy, StructuredInvoker};
pub use model_client::{ModelClient, ModelRequest, OpenAiModelClient};
