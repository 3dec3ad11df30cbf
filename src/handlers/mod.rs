// Two security tiers: public (no authentication) and protected (bearer token
// required). Protected routes get the auth middleware applied in lib.rs.
pub mod protected;
pub mod public;
