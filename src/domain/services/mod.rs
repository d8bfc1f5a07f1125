//! # Domain Services
//!
//! エンティティにまたがるビジネスルール

pub mod conversion_mapper;
pub mod outcome_report;
