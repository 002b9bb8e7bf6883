//! Integration tests for Stallside.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and seed demo data
//! cargo run -p stallside-cli -- migrate
//! cargo run -p stallside-cli -- seed
//!
//! # Start the catalog server
//! cargo run -p stallside-catalog
//!
//! # Run integration tests (ignored by default)
//! cargo test -p stallside-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `CATALOG_BASE_URL` - Where the server listens (default
//!   `http://localhost:3000`)
//! - `CATALOG_TEST_SESSION_COOKIE` - Value of an `ss_session` cookie for an
//!   authenticated vendor-owning session (sessions are established by the
//!   external auth provider, so the tests take one as input)
//! - `CATALOG_TEST_MARKET_ID` - Market id the seeded vendor belongs to
