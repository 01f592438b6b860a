//! Feature slices. Each one owns its requests, handlers, capabilities and
//! routes, and plugs into the application through a
//! [`FeatureModule`](crate::FeatureModule).

pub mod users;
