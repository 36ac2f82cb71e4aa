//! Core types and storage for the learning roadmap.
//!
//! Provides the graph data model ([`graph::TopicNode`], [`graph::NodeStore`],
//! [`graph::CompletionState`]), the canonical AI engineering fixture, load-time
//! validation, JSON persistence, and configuration.

pub mod config;
pub mod fixture;
pub mod graph;
pub mod schema;
pub mod storage;
pub mod validation;
