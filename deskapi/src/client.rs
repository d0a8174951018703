pub(crate) mod api;
pub(crate) mod registry;
pub(crate) mod session;
pub(crate) mod signer;
