//! Client-side view-models over the hosted store: profile resolution,
//! dashboard aggregation, and tutor listing. Each loader re-fetches on every
//! call and owns no state; anything richer than an equality query happens
//! here, in process.

pub mod dashboard;
pub mod identity;
pub mod listing;
