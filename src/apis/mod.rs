/// External API clients
///
/// Shared HTTP plumbing lives in `client`; each upstream gets its own
/// submodule with a typed client and raw response types.

pub mod client;
pub mod coingecko;
