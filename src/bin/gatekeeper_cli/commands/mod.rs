// ABOUTME: Re-exports command modules for gatekeeper-cli
// ABOUTME: Admin management, token checks, and the demo walkthrough

pub mod admin;
pub mod demo;
pub mod token;
