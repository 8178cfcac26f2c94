//! # reaction-service
//!
//! Application layer: reaction and topic use cases, request/response DTOs,
//! and the dependency container they share.

pub mod dto;
pub mod services;

pub use services::{
    ReactionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    TopicService,
};
