pub mod compose;
pub mod context;
pub mod pipeline;
pub mod research;
pub mod step_forward_agent;
pub mod types;
pub mod workflow;

// Include tests
#[cfg(test)]
mod tests;
