mod social_network_service;

pub use social_network_service::*;
