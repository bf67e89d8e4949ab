#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Generative AI gateway for platecraft
//!
//! The [`AiGateway`] trait is the contract the generation pipeline depends
//! on; [`GoogleGateway`] implements it against the Google Generative
//! Language API.

mod error;
mod gateway;
mod google;
mod protocol;
mod types;

pub use error::{GatewayError, Result};
pub use gateway::AiGateway;
pub use google::GoogleGateway;
pub use types::ImageArtifact;
