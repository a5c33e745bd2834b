// ABOUTME: Re-exports helper modules for gatekeeper-cli
// ABOUTME: Provides display formatting utilities

pub mod display;
