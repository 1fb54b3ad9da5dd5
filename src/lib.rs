//! Compensation Decomposition Engine
//!
//! This crate turns an employee's annual Cost-To-Company (CTC) into a
//! self-consistent monthly pay structure: basic, HRA, fixed allowances, a
//! balancing special allowance, statutory deductions, employer contributions
//! and a gratuity provision, such that the employer's total annual outlay
//! reproduces the CTC.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod statement;
pub mod telemetry;
