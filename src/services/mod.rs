pub mod arrival_service;
pub mod candidate_service;
pub mod candidate_store;
pub mod queue_service;
