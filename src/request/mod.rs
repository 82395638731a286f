//! Request builders and the helpers filling them

pub mod audience;
pub mod batch;
pub mod notification;
pub mod payload;
pub mod push;
pub mod schedule;
