//! Wire messages and service stubs for the `pb` package
//!
//! Generated from `backend/proto/services/*.proto`. Field numbers are part of
//! the wire contract; append new fields, never renumber.
#![allow(clippy::derive_partial_eq_without_eq)]

tonic::include_proto!("pb");
