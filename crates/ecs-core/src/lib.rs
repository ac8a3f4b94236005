pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod state;
pub mod task;
pub mod validate;
pub mod waiter;

pub use agent::EcsAgent;
pub use client::EcsClient;
pub use config::{AgentOptions, ContainerDefinition, Settings};
pub use error::AgentError;
pub use event::{Event, EventSink};
pub use state::AgentState;
pub use task::{TaskId, TaskRun, TaskStatus};
pub use waiter::WaiterConfig;
