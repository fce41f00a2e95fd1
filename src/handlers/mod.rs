// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) and Protected (JWT auth). The protected tier trusts the
// AuthUser injected by middleware::auth and never looks at credentials itself.
pub mod params;
pub mod protected;
pub mod public;
