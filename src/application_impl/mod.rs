mod social_network_service_impl;

pub use social_network_service_impl::*;
